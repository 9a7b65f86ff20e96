use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BindingError, BindingResult};

/// A dynamically typed value crossing the script boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptValue {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl ScriptValue {
    /// Name of the value's type, as shown in argument errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
        }
    }

    /// Script truthiness: only nil and `false` are false.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ScriptValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ScriptValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for ScriptValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for ScriptValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for ScriptValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

/// Integral numbers print without a fractional part.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Fetch argument `position` (1-based) as a string. Numbers coerce.
pub(crate) fn check_string(
    args: &[ScriptValue],
    position: usize,
    method: &'static str,
) -> BindingResult<String> {
    match args.get(position - 1) {
        Some(ScriptValue::Str(s)) => Ok(s.clone()),
        Some(v @ ScriptValue::Number(_)) => Ok(v.to_string()),
        other => Err(bad_argument(method, position, "string", other)),
    }
}

/// Fetch argument `position` as an integer, truncating toward zero.
/// Numeric strings coerce.
pub(crate) fn check_integer(
    args: &[ScriptValue],
    position: usize,
    method: &'static str,
) -> BindingResult<i64> {
    let arg = args.get(position - 1);
    let n = match arg {
        Some(ScriptValue::Number(n)) => Some(*n),
        Some(ScriptValue::Str(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match n {
        // `as` saturates at the i64 bounds.
        Some(n) if n.is_finite() => Ok(n.trunc() as i64),
        _ => Err(bad_argument(method, position, "number", arg)),
    }
}

/// Argument `position` as a boolean by truthiness; absent is `false`.
pub(crate) fn to_boolean(args: &[ScriptValue], position: usize) -> bool {
    args.get(position - 1).is_some_and(ScriptValue::is_truthy)
}

fn bad_argument(
    method: &'static str,
    position: usize,
    expected: &'static str,
    got: Option<&ScriptValue>,
) -> BindingError {
    BindingError::BadArgument {
        method,
        position,
        expected,
        got: got.map_or("no value", ScriptValue::type_name),
    }
}
