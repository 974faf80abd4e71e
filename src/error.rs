//! Error types shared by every module of the library.
//!
//! All fallible operations return [`Result`], which carries an [`AddrError`].
//! The CLI wraps these in `color_eyre` reports; the library itself never panics
//! on malformed input.

/// Errors produced while parsing or manipulating addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddrError {
    #[error("Cannot parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("Value out of range: {0}")]
    Range(String),

    #[error("Division by zero")]
    DivideByZero,

    #[error("Unsupported radix: {0}")]
    UnsupportedRadix(u32),

    #[error("Malformed mapped address: {0}")]
    Format(String),
}

impl AddrError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log::debug!("Rejected '{}': {}", input, reason);
        AddrError::Parse {
            input: input.to_string(),
            reason,
        }
    }

    pub(crate) fn range(msg: impl Into<String>) -> Self {
        AddrError::Range(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AddrError>;
