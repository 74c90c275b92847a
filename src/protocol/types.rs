//! Common PostgreSQL wire protocol types.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Data format code in PostgreSQL protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u16)]
pub enum FormatCode {
    /// Text format (human-readable)
    #[default]
    Text = 0,
    /// Binary format (type-specific packed representation)
    Binary = 1,
}

/// Big-endian 32-bit signed integer for zerocopy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct I32BE([u8; 4]);

impl I32BE {
    /// Create a new I32BE from a native i32.
    pub const fn new(value: i32) -> Self {
        Self(value.to_be_bytes())
    }

    /// Get the native i32 value.
    pub const fn get(self) -> i32 {
        i32::from_be_bytes(self.0)
    }
}

/// Big-endian 64-bit signed integer for zerocopy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct I64BE([u8; 8]);

impl I64BE {
    /// Create a new I64BE from a native i64.
    pub const fn new(value: i64) -> Self {
        Self(value.to_be_bytes())
    }

    /// Get the native i64 value.
    pub const fn get(self) -> i64 {
        i64::from_be_bytes(self.0)
    }
}

/// Big-endian 64-bit unsigned integer for zerocopy.
///
/// Carries the raw IEEE-754 bit pattern of a float8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct U64BE([u8; 8]);

impl U64BE {
    /// Create a new U64BE from a native u64.
    pub const fn new(value: u64) -> Self {
        Self(value.to_be_bytes())
    }

    /// Get the native u64 value.
    pub const fn get(self) -> u64 {
        u64::from_be_bytes(self.0)
    }
}
