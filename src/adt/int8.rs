//! `fhe_int`: a 64-bit signed integer with bigint semantics.
//!
//! Text format is `[-+]?[0-9]+` surrounded by optional whitespace. Binary
//! format is 8 bytes of big-endian two's complement with no length prefix.

use crate::error::{Error, Result};
use crate::protocol::codec::{read_i64, write_i64};

use super::{skip_digits, skip_spaces};

/// Width of the binary representation in bytes.
pub const FHE_INT_LEN: usize = 8;

/// Type label used in diagnostics.
pub const INT8_TYPE_NAME: &str = "bigint";

/// Magnitude of `i64::MIN`, which has no positive `i64` representation.
const INT64_MIN_DIGITS: &[u8] = b"9223372036854775808";

/// Parse text into an `fhe_int`.
///
/// Leading and trailing whitespace is skipped; anything else after the
/// digits is a syntax error.
pub fn int8_in(text: &[u8]) -> Result<i64> {
    let (value, end) = scan_int8(text, INT8_TYPE_NAME, text)?;
    if end != text.len() {
        return Err(Error::syntax(INT8_TYPE_NAME, text));
    }
    Ok(value)
}

/// Parse an integer that is embedded in a larger literal.
///
/// Returns the value and the offset where scanning stopped, after any
/// whitespace following the digits. Trailing input is left for the caller.
/// Errors name `type_name` and quote `orig`, the caller's complete input.
pub fn int8_in_partial(text: &[u8], type_name: &str, orig: &[u8]) -> Result<(i64, usize)> {
    scan_int8(text, type_name, orig)
}

/// Tentative parse: `None` instead of an error for malformed or
/// out-of-range input.
pub fn try_int8_in(text: &[u8]) -> Option<i64> {
    int8_in(text).ok()
}

fn scan_int8(text: &[u8], type_name: &str, orig: &[u8]) -> Result<(i64, usize)> {
    let mut pos = skip_spaces(text, 0);
    let mut negative = false;

    match text.get(pos) {
        Some(b'-') => {
            pos += 1;
            let rest = &text[pos..];
            if rest.starts_with(INT64_MIN_DIGITS) {
                pos += INT64_MIN_DIGITS.len();
                return Ok((i64::MIN, skip_spaces(text, pos)));
            }
            negative = true;
        }
        Some(b'+') => pos += 1,
        _ => {}
    }

    let digits_end = skip_digits(text, pos);
    if digits_end == pos {
        return Err(Error::syntax(type_name, orig));
    }

    let mut acc: i64 = 0;
    for &digit in &text[pos..digits_end] {
        acc = acc
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(digit - b'0')))
            .ok_or_else(|| Error::out_of_range(type_name, orig))?;
    }

    let value = if negative { -acc } else { acc };
    Ok((value, skip_spaces(text, digits_end)))
}

/// Format an `fhe_int` as canonical decimal text.
pub fn int8_out(value: i64) -> String {
    value.to_string()
}

/// Read an `fhe_int` from a binary message cursor.
///
/// Consumes exactly [`FHE_INT_LEN`] bytes and returns the rest.
pub fn int8_recv(buf: &[u8]) -> Result<(i64, &[u8])> {
    read_i64(buf)
}

/// Append the binary form of an `fhe_int` to `buf`.
pub fn int8_send(value: i64, buf: &mut Vec<u8>) {
    write_i64(buf, value);
}
