use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BindingError {
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    #[error("bad argument #{position} to '{method}' ({expected} expected, got {got})")]
    BadArgument {
        method: &'static str,
        position: usize,
        expected: &'static str,
        got: &'static str,
    },
}

pub type BindingResult<T> = Result<T, BindingError>;
