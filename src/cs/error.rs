//! Error types shared by the channel codes.
//!
//! Every operation validates its textual input once at the boundary and
//! reports failures through [`Error`]; nothing is recovered locally.

use thiserror::Error;

/// Result type for channel coding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing or coding sequences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Empty or structurally malformed sequence
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A token did not parse as the expected kind of value
    #[error("malformed token {token:?}: expected {expected}")]
    Format {
        token: String,
        expected: &'static str,
    },

    /// Signal length is not a whole number of chip groups
    #[error("signal of {signal_len} chips is not a multiple of the code length {code_len}")]
    LengthMismatch { signal_len: usize, code_len: usize },

    /// Input exceeds what the implementation can represent
    #[error("input length {length} exceeds maximum {max_length}")]
    InputTooLarge { length: usize, max_length: usize },
}

impl Error {
    pub(crate) fn format(token: impl Into<String>, expected: &'static str) -> Self {
        Error::Format {
            token: token.into(),
            expected,
        }
    }
}
