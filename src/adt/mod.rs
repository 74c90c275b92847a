//! Input/output functions for the extension's scalar types.
//!
//! Each type provides the four functions the server calls at its
//! boundaries:
//!
//! | function | direction |
//! |----------|-----------|
//! | `*_in`   | text -> value |
//! | `*_out`  | value -> text |
//! | `*_recv` | binary -> value |
//! | `*_send` | value -> binary |
//!
//! Text input is taken as raw bytes. Parsers report failures as
//! [`Error::InvalidTextRepresentation`](crate::Error::InvalidTextRepresentation)
//! or [`Error::OutOfRange`](crate::Error::OutOfRange) carrying the whole input.

pub mod float8;
pub mod int8;

/// Matches C `isspace` in the "C" locale.
#[inline]
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Return the first position at or after `pos` that is not whitespace.
#[inline]
pub(crate) fn skip_spaces(input: &[u8], mut pos: usize) -> usize {
    while pos < input.len() && is_space(input[pos]) {
        pos += 1;
    }
    pos
}

/// Return the first position at or after `pos` that is not an ASCII digit.
#[inline]
pub(crate) fn skip_digits(input: &[u8], mut pos: usize) -> usize {
    while pos < input.len() && input[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_spaces() {
        assert_eq!(skip_spaces(b" \t\n\x0b\x0c\rx", 0), 6);
        assert_eq!(skip_spaces(b"x  ", 0), 0);
        assert_eq!(skip_spaces(b"x  ", 1), 3);
        assert_eq!(skip_spaces(b"", 0), 0);
    }

    #[test]
    fn test_skip_digits() {
        assert_eq!(skip_digits(b"123abc", 0), 3);
        assert_eq!(skip_digits(b"abc", 0), 0);
    }
}
