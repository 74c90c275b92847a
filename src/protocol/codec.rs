//! PostgreSQL wire protocol encoding and decoding primitives.
//!
//! PostgreSQL uses big-endian (network byte order) for all integers and
//! sends float8 as the big-endian image of its IEEE-754 bit pattern.
//!
//! Readers take the remaining buffer and return the decoded value together
//! with the rest of the buffer, so a `&[u8]` acts as the message cursor.

use crate::error::{Error, Result};
use zerocopy::{FromBytes, IntoBytes};

use super::types::{I32BE, I64BE, U64BE};

const INSUFFICIENT_DATA: &str = "insufficient data left in message";

/// Read 4-byte big-endian signed integer.
#[inline]
pub fn read_i32(data: &[u8]) -> Result<(i32, &[u8])> {
    if data.len() < 4 {
        return Err(Error::Protocol(format!(
            "read_i32: {INSUFFICIENT_DATA}: {} < 4",
            data.len()
        )));
    }
    let value = I32BE::ref_from_bytes(&data[..4])
        .map_err(|e| Error::Protocol(format!("read_i32: {e:?}")))?
        .get();
    Ok((value, &data[4..]))
}

/// Read 8-byte big-endian signed integer.
#[inline]
pub fn read_i64(data: &[u8]) -> Result<(i64, &[u8])> {
    if data.len() < 8 {
        return Err(Error::Protocol(format!(
            "read_i64: {INSUFFICIENT_DATA}: {} < 8",
            data.len()
        )));
    }
    let value = I64BE::ref_from_bytes(&data[..8])
        .map_err(|e| Error::Protocol(format!("read_i64: {e:?}")))?
        .get();
    Ok((value, &data[8..]))
}

/// Read 8-byte big-endian IEEE-754 double.
///
/// The bit pattern is preserved exactly, including NaN payloads.
#[inline]
pub fn read_f64(data: &[u8]) -> Result<(f64, &[u8])> {
    if data.len() < 8 {
        return Err(Error::Protocol(format!(
            "read_f64: {INSUFFICIENT_DATA}: {} < 8",
            data.len()
        )));
    }
    let bits = U64BE::ref_from_bytes(&data[..8])
        .map_err(|e| Error::Protocol(format!("read_f64: {e:?}")))?
        .get();
    Ok((f64::from_bits(bits), &data[8..]))
}

/// Read fixed-length bytes.
#[inline]
pub fn read_bytes(data: &[u8], len: usize) -> Result<(&[u8], &[u8])> {
    if data.len() < len {
        return Err(Error::Protocol(format!(
            "read_bytes: {INSUFFICIENT_DATA}: {} < {}",
            data.len(),
            len
        )));
    }
    Ok((&data[..len], &data[len..]))
}

/// Read a length-prefixed column value as found in DataRow and Bind.
///
/// A length of -1 is NULL and returns `None`.
#[inline]
pub fn read_value(data: &[u8]) -> Result<(Option<&[u8]>, &[u8])> {
    let (len, rest) = read_i32(data)?;
    if len < 0 {
        return Ok((None, rest));
    }
    let (value, rest) = read_bytes(rest, len as usize)?;
    Ok((Some(value), rest))
}

/// Write 4-byte big-endian signed integer.
#[inline]
pub fn write_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(I32BE::new(value).as_bytes());
}

/// Write 8-byte big-endian signed integer.
#[inline]
pub fn write_i64(out: &mut Vec<u8>, value: i64) {
    out.extend_from_slice(I64BE::new(value).as_bytes());
}

/// Write 8-byte big-endian IEEE-754 double.
#[inline]
pub fn write_f64(out: &mut Vec<u8>, value: f64) {
    out.extend_from_slice(U64BE::new(value.to_bits()).as_bytes());
}

/// Write raw bytes.
#[inline]
pub fn write_bytes(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(data);
}

/// Write a length-prefixed value (Int32 length, then payload).
///
/// Fails without writing anything if the payload length does not fit the
/// Int32 prefix.
#[inline]
pub fn write_value(out: &mut Vec<u8>, data: &[u8]) -> Result<()> {
    let len = i32::try_from(data.len())
        .map_err(|_| Error::InvalidUsage(format!("value too large: {} bytes", data.len())))?;
    write_i32(out, len);
    write_bytes(out, data);
    Ok(())
}

/// Write a NULL value (length -1, no payload).
#[inline]
pub fn write_null(out: &mut Vec<u8>) {
    write_i32(out, -1);
}
