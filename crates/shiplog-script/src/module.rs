use std::sync::Arc;

use shiplog_store::{LogStore, StoreError};
use tracing::{debug, warn};

use crate::args::CreateLogArgs;
use crate::error::{BindingError, BindingResult};
use crate::value::{check_string, ScriptValue};

/// Status returned for a successful call.
pub const STATUS_OK: i32 = 0;
/// Status returned when `appendLog` finds no target log.
pub const STATUS_FAILURE: i32 = -1;

/// Method names registered with the scripting host.
pub const METHODS: &[&str] = &["createLog", "appendLog"];

/// The `shiplog` script module.
///
/// Holds the session's store explicitly; hosts construct one module per
/// session and register [`METHODS`] against [`ShiplogModule::call`].
#[derive(Clone)]
pub struct ShiplogModule {
    store: Arc<dyn LogStore>,
}

impl ShiplogModule {
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        Self { store }
    }

    /// Names this module registers with the host.
    pub fn methods(&self) -> &'static [&'static str] {
        METHODS
    }

    /// The store this module writes to.
    pub fn store(&self) -> &Arc<dyn LogStore> {
        &self.store
    }

    /// `createLog`: always reports [`STATUS_OK`].
    ///
    /// Bad input is normalised rather than rejected, and a store failure
    /// is logged but not surfaced to the script.
    pub fn create_log(&self, args: &CreateLogArgs) -> i32 {
        match self.store.create_log(args.key(), args.options()) {
            Ok(handle) => debug!(%handle, idstr = %args.idstr, "createLog"),
            Err(e) => warn!(idstr = %args.idstr, error = %e, "createLog failed"),
        }
        STATUS_OK
    }

    /// `appendLog`: [`STATUS_OK`] on success, [`STATUS_FAILURE`] when no
    /// log resolves for `idstr` or the store fails.
    pub fn append_log(&self, idstr: &str, message: &str) -> i32 {
        match self.store.append(idstr, message) {
            Ok(_) => STATUS_OK,
            Err(StoreError::LogNotFound(_)) => {
                debug!(idstr, "appendLog: no such log");
                STATUS_FAILURE
            }
            Err(e) => {
                warn!(idstr, error = %e, "appendLog failed");
                STATUS_FAILURE
            }
        }
    }

    /// Dynamic entry point: dispatch `method` with positional arguments.
    pub fn call(&self, method: &str, args: &[ScriptValue]) -> BindingResult<ScriptValue> {
        let status = match method {
            "createLog" => self.create_log(&CreateLogArgs::from_values(args)?),
            "appendLog" => {
                let idstr = check_string(args, 1, "appendLog")?;
                let message = check_string(args, 2, "appendLog")?;
                self.append_log(&idstr, &message)
            }
            other => return Err(BindingError::UnknownMethod(other.to_string())),
        };
        Ok(ScriptValue::from(status))
    }
}

impl std::fmt::Debug for ShiplogModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShiplogModule")
            .field("methods", &METHODS)
            .finish()
    }
}
