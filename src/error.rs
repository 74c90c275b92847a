//! Error types for fhe-types.

use thiserror::Error;

/// Result type for fhe-types operations.
pub type Result<T> = core::result::Result<T, Error>;

/// SQLSTATE codes reported by the codecs.
pub mod sqlstate {
    /// `invalid_text_representation`
    pub const INVALID_TEXT_REPRESENTATION: &str = "22P02";
    /// `numeric_value_out_of_range`
    pub const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";
    /// `protocol_violation`
    pub const PROTOCOL_VIOLATION: &str = "08P01";
}

/// Error type for fhe-types.
#[derive(Debug, Error)]
pub enum Error {
    /// Text input does not match the type's grammar, or has trailing junk.
    ///
    /// `input` is always the complete original text, even when the failing
    /// token was embedded in a larger literal.
    #[error("invalid input syntax for type {type_name}: \"{input}\"")]
    InvalidTextRepresentation { type_name: String, input: String },

    /// Text input is well-formed but its magnitude does not fit the type.
    #[error("value \"{input}\" is out of range for type {type_name}")]
    OutOfRange { type_name: String, input: String },

    /// Protocol error (short binary buffer, etc.)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Value could not be decoded from a result column
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid usage (e.g., out-of-range setting)
    #[error("Invalid usage: {0}")]
    InvalidUsage(String),
}

impl Error {
    pub(crate) fn syntax(type_name: &str, input: &[u8]) -> Self {
        Error::InvalidTextRepresentation {
            type_name: type_name.to_string(),
            input: String::from_utf8_lossy(input).into_owned(),
        }
    }

    pub(crate) fn out_of_range(type_name: &str, input: &[u8]) -> Self {
        Error::OutOfRange {
            type_name: type_name.to_string(),
            input: String::from_utf8_lossy(input).into_owned(),
        }
    }

    /// Returns true if the input did not match the grammar.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::InvalidTextRepresentation { .. })
    }

    /// Returns true if the input was well-formed but out of range.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::OutOfRange { .. })
    }

    /// Get the SQLSTATE code the server would report for this error.
    pub fn sqlstate(&self) -> Option<&'static str> {
        match self {
            Error::InvalidTextRepresentation { .. } => Some(sqlstate::INVALID_TEXT_REPRESENTATION),
            Error::OutOfRange { .. } => Some(sqlstate::NUMERIC_VALUE_OUT_OF_RANGE),
            Error::Protocol(_) => Some(sqlstate::PROTOCOL_VIOLATION),
            Error::Decode(_) | Error::InvalidUsage(_) => None,
        }
    }
}

impl<Src: std::fmt::Debug, Dst: std::fmt::Debug + ?Sized>
    From<zerocopy::error::CastError<Src, Dst>> for Error
{
    fn from(err: zerocopy::error::CastError<Src, Dst>) -> Self {
        Error::Protocol(format!("zerocopy cast error: {err:?}"))
    }
}
