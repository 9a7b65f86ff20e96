//! Script-facing binding for the ship log.
//!
//! Scripts see two methods:
//!
//! ```text
//! createLog(idstr, logname, logtype [, overwrite [, maxLen]]) -> 0
//! appendLog(idstr, message)                                   -> 0 | -1
//! ```
//!
//! [`ShiplogModule`] implements them over any injected [`LogStore`], either
//! as typed calls ([`ShiplogModule::create_log`],
//! [`ShiplogModule::append_log`]) or through the dynamic
//! [`ShiplogModule::call`] entry point, which marshals [`ScriptValue`]
//! arguments the way a scripting host hands them over.
//!
//! Store outcomes are always reported as status numbers. Only marshaling
//! problems (unknown method, wrong argument type) surface as
//! [`BindingError`], for the host to raise as a script error.
//!
//! [`LogStore`]: shiplog_store::LogStore

pub mod args;
pub mod error;
pub mod module;
pub mod value;

pub use args::CreateLogArgs;
pub use error::{BindingError, BindingResult};
pub use module::{ShiplogModule, METHODS, STATUS_FAILURE, STATUS_OK};
pub use value::ScriptValue;
