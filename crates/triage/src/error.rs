use triage_core::{ContextError, SelectionError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid {flag} value {value:?}: expected {expected}")]
    InvalidArgument {
        flag: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    #[error("Response rejected: {0}")]
    ResponseRejected(#[from] SelectionError),
}
