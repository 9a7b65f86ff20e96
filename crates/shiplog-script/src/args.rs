use shiplog_types::{clamp_max_len, CreateOptions, LogKey};

use crate::error::BindingResult;
use crate::value::{check_integer, check_string, to_boolean, ScriptValue};

/// Arguments to `createLog`.
///
/// `overwrite` defaults to `false` and `max_len` to `None` (unbounded).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateLogArgs {
    /// Empty for an unnamed log.
    pub idstr: String,
    pub logname: String,
    pub logtype: String,
    pub overwrite: bool,
    /// Raw caller bound; negative and zero both mean unbounded.
    pub max_len: Option<i64>,
}

impl CreateLogArgs {
    pub fn new(
        idstr: impl Into<String>,
        logname: impl Into<String>,
        logtype: impl Into<String>,
    ) -> Self {
        Self {
            idstr: idstr.into(),
            logname: logname.into(),
            logtype: logtype.into(),
            overwrite: false,
            max_len: None,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_max_len(mut self, max_len: i64) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Marshal positional script arguments.
    ///
    /// The bound is only read when a fifth argument is present; a nil
    /// fifth argument counts as absent.
    pub fn from_values(args: &[ScriptValue]) -> BindingResult<Self> {
        const METHOD: &str = "createLog";
        let max_len = match args.get(4) {
            None | Some(ScriptValue::Nil) => None,
            Some(_) => Some(check_integer(args, 5, METHOD)?),
        };
        Ok(Self {
            idstr: check_string(args, 1, METHOD)?,
            logname: check_string(args, 2, METHOD)?,
            logtype: check_string(args, 3, METHOD)?,
            overwrite: to_boolean(args, 4),
            max_len,
        })
    }

    /// Store key for these arguments.
    pub fn key(&self) -> LogKey {
        LogKey::new(&self.idstr, self.logname.clone(), self.logtype.clone())
    }

    /// Normalised creation options.
    pub fn options(&self) -> CreateOptions {
        CreateOptions::default()
            .overwrite(self.overwrite)
            .max_len(self.max_len.map_or(0, clamp_max_len))
    }
}
