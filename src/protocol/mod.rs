//! PostgreSQL wire protocol pieces used by the binary send/recv codecs.
//!
//! # Structure
//!
//! - `codec`: Low-level encoding/decoding primitives over a slice cursor
//! - `types`: Common protocol types (FormatCode, big-endian wrappers)

pub mod codec;
pub mod types;

pub use types::FormatCode;
