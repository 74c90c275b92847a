//! Input/output codecs for the `fhe_int` and `fhe_float` PostgreSQL types.
//!
//! `fhe_int` behaves like `bigint` and `fhe_float` like `double precision`
//! at the type boundary: text input accepts the same literals, failures
//! carry the same SQLSTATE codes, and the binary send/recv formats are the
//! same 8-byte big-endian layouts. Error messages use one uniform wording
//! for both types rather than the server's per-type phrasing.
//!
//! # Features
//!
//! - **Bigint-style parsing**: whitespace, signs, `i64::MIN`, overflow,
//!   `NaN`/`Infinity` spellings and subnormal results
//! - **Round-trip output**: the default float format always reads back to
//!   the same bits
//! - **Partial and tentative parsing** for callers that embed numbers in
//!   larger literals or probe input speculatively
//!
//! # Example
//!
//! ```
//! use fhe_types::adt::float8::{float8_in, float8_out};
//! use fhe_types::adt::int8::{int8_in, int8_send};
//! use fhe_types::Opts;
//!
//! fn main() -> fhe_types::Result<()> {
//!     assert_eq!(int8_in(b" -9223372036854775808 ")?, i64::MIN);
//!
//!     let mut buf = Vec::new();
//!     int8_send(42, &mut buf);
//!     assert_eq!(buf, [0, 0, 0, 0, 0, 0, 0, 42]);
//!
//!     let x = float8_in(b"0.1")? + float8_in(b"0.2")?;
//!     assert_eq!(float8_out(x, &Opts::default()), "0.30000000000000004");
//!     Ok(())
//! }
//! ```

pub mod adt;
pub mod error;
pub mod opts;
pub mod protocol;
pub mod value;

pub use error::{Error, Result};
pub use opts::Opts;
pub use protocol::types::FormatCode;
pub use value::{FheFloat, FheInt, FromValue, ToValue};
