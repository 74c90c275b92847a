//! `fhe_int` and `fhe_float` as Rust values, with wire decoding and encoding.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::adt::float8::{
    FHE_FLOAT_LEN, float8_cmp, float8_in, float8_out, float8_out_default, float8_recv, float8_send,
};
use crate::adt::int8::{FHE_INT_LEN, int8_in, int8_out, int8_recv, int8_send};
use crate::error::{Error, Result};
use crate::opts::Opts;
use crate::protocol::codec::{write_null, write_value};
use crate::protocol::types::FormatCode;

/// Trait for decoding column values into Rust types.
///
/// This trait provides methods for decoding values from different formats:
/// - `from_null()` - Handle NULL values
/// - `from_text()` - Decode from text format (default for simple queries)
/// - `from_binary()` - Decode from binary format
pub trait FromValue<'a>: Sized {
    /// Decode from NULL value.
    ///
    /// Default implementation returns an error. Override for types that can
    /// represent NULL (like `Option<T>`).
    fn from_null() -> Result<Self> {
        Err(Error::Decode("unexpected NULL value".into()))
    }

    /// Decode from text format bytes.
    fn from_text(bytes: &'a [u8]) -> Result<Self>;

    /// Decode from binary format bytes.
    ///
    /// The slice must hold exactly one value.
    fn from_binary(bytes: &'a [u8]) -> Result<Self>;

    /// Decode a column as read by [`read_value`](crate::protocol::codec::read_value).
    fn from_wire(bytes: Option<&'a [u8]>, format: FormatCode) -> Result<Self> {
        match (bytes, format) {
            (None, _) => Self::from_null(),
            (Some(bytes), FormatCode::Text) => Self::from_text(bytes),
            (Some(bytes), FormatCode::Binary) => Self::from_binary(bytes),
        }
    }
}

/// Trait for encoding Rust values as binary parameters.
///
/// Implementations write length-prefixed binary data directly to the buffer:
/// - Int32 length followed by the value bytes, OR
/// - Int32 -1 for NULL
pub trait ToValue {
    /// Encode as a length-prefixed binary parameter.
    fn to_binary(&self, buf: &mut Vec<u8>) -> Result<()>;
}

// === Option<T> - NULL handling ===

impl<'a, T: FromValue<'a>> FromValue<'a> for Option<T> {
    fn from_null() -> Result<Self> {
        Ok(None)
    }

    fn from_text(bytes: &'a [u8]) -> Result<Self> {
        T::from_text(bytes).map(Some)
    }

    fn from_binary(bytes: &'a [u8]) -> Result<Self> {
        T::from_binary(bytes).map(Some)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_binary(&self, buf: &mut Vec<u8>) -> Result<()> {
        match self {
            Some(v) => v.to_binary(buf),
            None => {
                write_null(buf);
                Ok(())
            }
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_binary(&self, buf: &mut Vec<u8>) -> Result<()> {
        (*self).to_binary(buf)
    }
}

fn text_column(bytes: &[u8]) -> Result<&str> {
    simdutf8::compat::from_utf8(bytes).map_err(|e| Error::Decode(format!("invalid UTF-8: {}", e)))
}

fn exact_len<'a>(bytes: &'a [u8], len: usize, type_name: &str) -> Result<&'a [u8]> {
    if bytes.len() != len {
        return Err(Error::Decode(format!(
            "invalid {} length: {}",
            type_name,
            bytes.len()
        )));
    }
    Ok(bytes)
}

// === fhe_int ===

/// A value of the `fhe_int` type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FheInt(pub i64);

impl FheInt {
    /// Width of the binary representation.
    pub const TYPLEN: usize = FHE_INT_LEN;

    /// SQL name of the type.
    pub const TYPE_NAME: &'static str = "fhe_int";
}

impl From<i64> for FheInt {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<FheInt> for i64 {
    fn from(value: FheInt) -> Self {
        value.0
    }
}

impl FromStr for FheInt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        int8_in(s.as_bytes()).map(Self)
    }
}

impl fmt::Display for FheInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&int8_out(self.0))
    }
}

impl FromValue<'_> for FheInt {
    fn from_text(bytes: &[u8]) -> Result<Self> {
        text_column(bytes)?.parse()
    }

    fn from_binary(bytes: &[u8]) -> Result<Self> {
        let (value, _) = int8_recv(exact_len(bytes, Self::TYPLEN, Self::TYPE_NAME)?)?;
        Ok(Self(value))
    }
}

impl ToValue for FheInt {
    fn to_binary(&self, buf: &mut Vec<u8>) -> Result<()> {
        let mut payload = Vec::with_capacity(Self::TYPLEN);
        int8_send(self.0, &mut payload);
        write_value(buf, &payload)
    }
}

// === fhe_float ===

/// A value of the `fhe_float` type.
///
/// Equality and ordering follow the server: NaN equals NaN and sorts above
/// every number, and `-0.0 == 0.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FheFloat(pub f64);

impl FheFloat {
    /// Width of the binary representation.
    pub const TYPLEN: usize = FHE_FLOAT_LEN;

    /// SQL name of the type.
    pub const TYPE_NAME: &'static str = "fhe_float";

    /// Format with explicit options instead of the defaults `Display` uses.
    pub fn to_text(&self, opts: &Opts) -> String {
        float8_out(self.0, opts)
    }
}

impl From<f64> for FheFloat {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<FheFloat> for f64 {
    fn from(value: FheFloat) -> Self {
        value.0
    }
}

impl PartialEq for FheFloat {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FheFloat {}

impl PartialOrd for FheFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FheFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        float8_cmp(self.0, other.0)
    }
}

impl FromStr for FheFloat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        float8_in(s.as_bytes()).map(Self)
    }
}

impl fmt::Display for FheFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&float8_out_default(self.0))
    }
}

impl FromValue<'_> for FheFloat {
    fn from_text(bytes: &[u8]) -> Result<Self> {
        text_column(bytes)?.parse()
    }

    fn from_binary(bytes: &[u8]) -> Result<Self> {
        let (value, _) = float8_recv(exact_len(bytes, Self::TYPLEN, Self::TYPE_NAME)?)?;
        Ok(Self(value))
    }
}

impl ToValue for FheFloat {
    fn to_binary(&self, buf: &mut Vec<u8>) -> Result<()> {
        let mut payload = Vec::with_capacity(Self::TYPLEN);
        float8_send(self.0, &mut payload);
        write_value(buf, &payload)
    }
}
