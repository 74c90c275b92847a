//! `fhe_float`: an IEEE-754 double with double precision semantics.
//!
//! Text input accepts the usual decimal literal grammar plus the special
//! tokens `NaN`, `Infinity` and `inf` (optionally signed, matched without
//! regard to case). Text output follows C's `%.*g` with
//! `15 + extra_float_digits` significant digits, falling back to the
//! shortest exact representation when that would not read back to the same
//! value.
//!
//! Binary format is the 8-byte big-endian image of the IEEE-754 bit pattern.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::opts::{MAX_EXTRA_FLOAT_DIGITS, MIN_EXTRA_FLOAT_DIGITS, Opts};
use crate::protocol::codec::{read_f64, write_f64};

use super::{skip_digits, skip_spaces};

/// Width of the binary representation in bytes.
pub const FHE_FLOAT_LEN: usize = 8;

/// Type label used in diagnostics.
pub const FLOAT8_TYPE_NAME: &str = "double precision";

/// Decimal digits of precision a double carries.
pub const DBL_DIG: i32 = f64::DIGITS as i32;

/// Tried in order when no numeric literal is present at the cursor.
/// Longer spellings come first so that `inf` never matches a prefix of
/// `Infinity`.
const SPECIAL_VALUES: [(&[u8], f64); 7] = [
    (b"NaN", f64::NAN),
    (b"Infinity", f64::INFINITY),
    (b"+Infinity", f64::INFINITY),
    (b"-Infinity", f64::NEG_INFINITY),
    (b"inf", f64::INFINITY),
    (b"+inf", f64::INFINITY),
    (b"-inf", f64::NEG_INFINITY),
];

/// Parse text into an `fhe_float`.
pub fn float8_in(text: &[u8]) -> Result<f64> {
    let (value, end) = scan_float8(text, FLOAT8_TYPE_NAME, text)?;
    if end != text.len() {
        return Err(Error::syntax(FLOAT8_TYPE_NAME, text));
    }
    Ok(value)
}

/// Parse a double that is embedded in a larger literal, such as one
/// coordinate of a point.
///
/// Returns the value and the offset where scanning stopped, after any
/// whitespace following the number. Errors name `type_name` and quote
/// `orig`, the caller's complete input.
pub fn float8_in_partial(text: &[u8], type_name: &str, orig: &[u8]) -> Result<(f64, usize)> {
    scan_float8(text, type_name, orig)
}

/// Tentative parse: `None` instead of an error.
pub fn try_float8_in(text: &[u8]) -> Option<f64> {
    float8_in(text).ok()
}

fn scan_float8(text: &[u8], type_name: &str, orig: &[u8]) -> Result<(f64, usize)> {
    let start = skip_spaces(text, 0);

    // Empty input is rejected here, not by the number parser.
    if start == text.len() {
        return Err(Error::syntax(type_name, orig));
    }

    let (value, end) = match scan_literal(text, start) {
        Some(literal) => {
            let value = convert_literal(&text[start..literal.end], literal.nonzero, type_name, orig)?;
            (value, literal.end)
        }
        None => {
            let (value, len) =
                match_special(&text[start..]).ok_or_else(|| Error::syntax(type_name, orig))?;
            (value, start + len)
        }
    };

    Ok((value, skip_spaces(text, end)))
}

/// Extent of a decimal literal found by [`scan_literal`].
struct Literal {
    end: usize,
    /// Whether any mantissa digit is non-zero.
    nonzero: bool,
}

/// Find the longest prefix at `start` of the form
/// `[+-]? (digits [. digits*] | . digits) ([eE] [+-]? digits)?`.
///
/// An exponent marker that is not followed by digits is left unconsumed.
fn scan_literal(text: &[u8], start: usize) -> Option<Literal> {
    let mut pos = start;
    if matches!(text.get(pos), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    pos = skip_digits(text, pos);
    let mut nonzero = text[int_start..pos].iter().any(|&b| b != b'0');
    let mut ndigits = pos - int_start;

    if text.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let frac_end = skip_digits(text, frac_start);
        if ndigits + (frac_end - frac_start) > 0 {
            nonzero |= text[frac_start..frac_end].iter().any(|&b| b != b'0');
            ndigits += frac_end - frac_start;
            pos = frac_end;
        }
    }

    if ndigits == 0 {
        return None;
    }

    if matches!(text.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        if matches!(text.get(exp_pos), Some(b'+' | b'-')) {
            exp_pos += 1;
        }
        let exp_end = skip_digits(text, exp_pos);
        if exp_end > exp_pos {
            pos = exp_end;
        }
    }

    Some(Literal { end: pos, nonzero })
}

fn convert_literal(literal: &[u8], nonzero: bool, type_name: &str, orig: &[u8]) -> Result<f64> {
    let value: f64 = std::str::from_utf8(literal)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::syntax(type_name, orig))?;

    // The conversion saturates silently; reconstruct the range condition a
    // C strtod would raise. Subnormal results raise it too but are kept.
    let range_signalled = value.is_infinite() || value.is_subnormal() || (value == 0.0 && nonzero);
    if range_signalled {
        if value == 0.0 || value.abs() >= f64::MAX {
            return Err(Error::out_of_range(type_name, orig));
        }
        tracing::trace!("accepting subnormal {} input: {:e}", type_name, value);
    }

    Ok(value)
}

/// Match a special value at the start of `rest`, returning it and the
/// length of the matched token.
fn match_special(rest: &[u8]) -> Option<(f64, usize)> {
    SPECIAL_VALUES.iter().find_map(|&(token, value)| {
        let candidate = rest.get(..token.len())?;
        candidate
            .eq_ignore_ascii_case(token)
            .then_some((value, token.len()))
    })
}

/// Format an `fhe_float` as text.
pub fn float8_out(num: f64, opts: &Opts) -> String {
    if num.is_nan() {
        return "NaN".to_string();
    }
    if num.is_infinite() {
        return if num > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let extra = opts
        .extra_float_digits
        .clamp(MIN_EXTRA_FLOAT_DIGITS, MAX_EXTRA_FLOAT_DIGITS);
    let ndig = (DBL_DIG + extra).max(1) as usize;
    let text = format_general(num, ndig);

    // Negative extra_float_digits asks for fewer digits than a double needs,
    // so only non-negative settings promise an exact read-back.
    if extra >= 0 && !reads_back(&text, num) {
        tracing::trace!("{} digits do not round-trip {:e}, using shortest form", ndig, num);
        return format_shortest(num, ndig);
    }
    text
}

/// Format an `fhe_float` with default options.
pub fn float8_out_default(num: f64) -> String {
    float8_out(num, &Opts::default())
}

fn reads_back(text: &str, num: f64) -> bool {
    text.parse::<f64>()
        .is_ok_and(|parsed| parsed.to_bits() == num.to_bits())
}

/// C `%.{precision}g` for a finite value.
fn format_general(num: f64, precision: usize) -> String {
    let sci = format!("{:.*e}", precision - 1, num);
    layout_general(&sci, precision)
}

/// Shortest digit string that reads back exactly, laid out like `%g` with
/// the layout precision widened to fit every digit.
fn format_shortest(num: f64, precision: usize) -> String {
    let sci = format!("{:e}", num);
    let ndigits = sci
        .split('e')
        .next()
        .map_or(0, |m| m.bytes().filter(u8::is_ascii_digit).count());
    layout_general(&sci, precision.max(ndigits))
}

/// Lay out Rust's `{:e}` rendering (`-d.ddde-5`) the way `%g` does.
fn layout_general(sci: &str, precision: usize) -> String {
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let negative = mantissa.starts_with('-');

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = match digits.trim_end_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }

    if exp < -4 || exp >= precision as i32 {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        out.push('e');
        out.push(if exp < 0 { '-' } else { '+' });
        out.push_str(&format!("{:02}", exp.unsigned_abs()));
    } else if exp >= 0 {
        let int_len = exp as usize + 1;
        if digits.len() <= int_len {
            out.push_str(digits);
            out.extend(std::iter::repeat_n('0', int_len - digits.len()));
        } else {
            let (int_part, frac_part) = digits.split_at(int_len);
            out.push_str(int_part);
            out.push('.');
            out.push_str(frac_part);
        }
    } else {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', (-exp - 1) as usize));
        out.push_str(digits);
    }

    out
}

/// Read an `fhe_float` from a binary message cursor.
///
/// Consumes exactly [`FHE_FLOAT_LEN`] bytes and returns the rest.
pub fn float8_recv(buf: &[u8]) -> Result<(f64, &[u8])> {
    read_f64(buf)
}

/// Append the binary form of an `fhe_float` to `buf`.
pub fn float8_send(num: f64, buf: &mut Vec<u8>) {
    write_f64(buf, num);
}

/// Three-way comparison with the server's NaN convention: all NaNs are
/// equal to each other and greater than every other value.
pub fn float8_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Equality operator for `fhe_float`.
pub fn float8_eq(a: f64, b: f64) -> bool {
    float8_cmp(a, b) == Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(extra_float_digits: i32) -> Opts {
        Opts::default()
            .with_extra_float_digits(extra_float_digits)
            .unwrap()
    }

    #[test]
    fn test_float8_in_basic() {
        assert_eq!(float8_in(b"2.75").unwrap(), 2.75);
        assert_eq!(float8_in(b"-2.5").unwrap(), -2.5);
        assert_eq!(float8_in(b"+1").unwrap(), 1.0);
        assert_eq!(float8_in(b"5.").unwrap(), 5.0);
        assert_eq!(float8_in(b".5").unwrap(), 0.5);
        assert_eq!(float8_in(b"1e3").unwrap(), 1000.0);
        assert_eq!(float8_in(b"1.5E-2").unwrap(), 0.015);
        assert_eq!(float8_in(b"  42  ").unwrap(), 42.0);
        assert!(float8_in(b"-0").unwrap().is_sign_negative());
    }

    #[test]
    fn test_float8_in_special() {
        assert!(float8_in(b"NaN").unwrap().is_nan());
        assert!(float8_in(b"nan").unwrap().is_nan());
        assert!(float8_in(b" NAN ").unwrap().is_nan());
        assert_eq!(float8_in(b"Infinity").unwrap(), f64::INFINITY);
        assert_eq!(float8_in(b"infinity").unwrap(), f64::INFINITY);
        assert_eq!(float8_in(b"+Infinity").unwrap(), f64::INFINITY);
        assert_eq!(float8_in(b"-Infinity").unwrap(), f64::NEG_INFINITY);
        assert_eq!(float8_in(b"inf").unwrap(), f64::INFINITY);
        assert_eq!(float8_in(b"+INF").unwrap(), f64::INFINITY);
        assert_eq!(float8_in(b"-inf").unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_float8_in_syntax_errors() {
        let inputs: [&[u8]; 12] = [
            b"", b"  ", b"+", b"-", b".", b"abc", b"12a", b"1.2.3", b"e5", b"1e", b"infinityx",
            b"nana",
        ];
        for input in inputs {
            let err = float8_in(input).unwrap_err();
            assert!(err.is_syntax(), "{:?} should be a syntax error", input);
        }
    }

    #[test]
    fn test_float8_in_range() {
        assert!(float8_in(b"1e400").unwrap_err().is_out_of_range());
        assert!(float8_in(b"-1e400").unwrap_err().is_out_of_range());
        assert!(float8_in(b"1e-400").unwrap_err().is_out_of_range());

        // A zero mantissa never underflows
        assert_eq!(float8_in(b"0e-400").unwrap(), 0.0);
        assert_eq!(float8_in(b"0.000").unwrap(), 0.0);

        // Subnormal results are accepted
        let tiny = float8_in(b"4.9e-324").unwrap();
        assert_eq!(tiny.to_bits(), 1);
        assert!(float8_in(b"1e-310").unwrap().is_subnormal());

        assert_eq!(float8_in(b"1.7976931348623157e308").unwrap(), f64::MAX);
    }

    #[test]
    fn test_float8_error_carries_input() {
        let err = float8_in(b" 1e400 ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "value \" 1e400 \" is out of range for type double precision"
        );
        let err = float8_in(b"x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input syntax for type double precision: \"x\""
        );
    }

    #[test]
    fn test_float8_in_partial() {
        assert_eq!(
            float8_in_partial(b"123abc", FLOAT8_TYPE_NAME, b"123abc").unwrap(),
            (123.0, 3)
        );
        assert_eq!(
            float8_in_partial(b"1.5e,2", "point", b"(1.5e,2)").unwrap(),
            (1.5, 3)
        );
        assert_eq!(
            float8_in_partial(b" -inf , 3)", "point", b"(-inf , 3)").unwrap(),
            (f64::NEG_INFINITY, 6)
        );

        let err = float8_in_partial(b"x,2)", "point", b"(x,2)").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input syntax for type point: \"(x,2)\""
        );
    }

    #[test]
    fn test_try_float8_in() {
        assert_eq!(try_float8_in(b"2.5"), Some(2.5));
        assert_eq!(try_float8_in(b"2.5x"), None);
        assert_eq!(try_float8_in(b"1e999"), None);
    }

    #[test]
    fn test_float8_out_special() {
        assert_eq!(float8_out_default(f64::NAN), "NaN");
        assert_eq!(float8_out_default(f64::INFINITY), "Infinity");
        assert_eq!(float8_out_default(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_float8_out_general() {
        assert_eq!(float8_out_default(0.0), "0");
        assert_eq!(float8_out_default(-0.0), "-0");
        assert_eq!(float8_out_default(1.0), "1");
        assert_eq!(float8_out_default(0.1), "0.1");
        assert_eq!(float8_out_default(-2.5), "-2.5");
        assert_eq!(float8_out_default(100.0), "100");
        assert_eq!(float8_out_default(0.0001), "0.0001");
        assert_eq!(float8_out_default(0.00001), "1e-05");
        assert_eq!(float8_out_default(123456789012345.0), "123456789012345");
        assert_eq!(float8_out_default(1e15), "1e+15");
        assert_eq!(float8_out_default(1e100), "1e+100");
        assert_eq!(float8_out_default(-2.5e-10), "-2.5e-10");
        assert_eq!(float8_out_default(1.5e300), "1.5e+300");
    }

    #[test]
    fn test_float8_out_shortest_fallback() {
        assert_eq!(float8_out_default(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(float8_out_default(f64::MAX), "1.7976931348623157e+308");
        assert_eq!(float8_out_default(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn test_float8_out_extra_digits() {
        let unchecked = Opts {
            extra_float_digits: 1000,
            ..Opts::default()
        };
        assert_eq!(float8_out(0.1, &unchecked), float8_out(0.1, &opts(3)));

        assert_eq!(float8_out(0.1, &opts(3)), "0.100000000000000006");
        assert_eq!(float8_out(0.1, &opts(1)), "0.1");
        assert_eq!(float8_out(0.1 + 0.2, &opts(-1)), "0.3");
        assert_eq!(float8_out(1.23456, &opts(-13)), "1.2");
        assert_eq!(float8_out(123456.0, &opts(-13)), "1.2e+05");
        // Floored at a single significant digit
        assert_eq!(float8_out(1.23456, &opts(-15)), "1");
    }

    #[test]
    fn test_float8_text_round_trip() {
        let mut values = vec![
            1.0,
            -1.0,
            0.1,
            0.1 + 0.2,
            f64::MAX,
            f64::MIN,
            f64::MIN_POSITIVE,
            f64::EPSILON,
            f64::from_bits(1),
            std::f64::consts::PI,
            -std::f64::consts::E,
            1e22,
            1e23,
            2f64.powi(53) + 2.0,
        ];

        // xorshift over raw bit patterns
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        while values.len() < 2000 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let value = f64::from_bits(state);
            if value.is_finite() && value != 0.0 {
                values.push(value);
            }
        }

        for value in values {
            let text = float8_out_default(value);
            let parsed = float8_in(text.as_bytes()).unwrap();
            assert_eq!(parsed.to_bits(), value.to_bits(), "{} via {:?}", value, text);
        }
    }

    #[test]
    fn test_float8_binary() {
        let mut buf = Vec::new();
        float8_send(-2.0, &mut buf);
        assert_eq!(buf, [0xC0, 0, 0, 0, 0, 0, 0, 0]);

        let payload_nan = f64::from_bits(0x7FF8_0000_0000_0001);
        for value in [0.0, -0.0, 1.5, f64::INFINITY, f64::NEG_INFINITY, payload_nan] {
            let mut buf = Vec::new();
            float8_send(value, &mut buf);
            assert_eq!(buf.len(), FHE_FLOAT_LEN);
            let (decoded, rest) = float8_recv(&buf).unwrap();
            assert_eq!(decoded.to_bits(), value.to_bits());
            assert!(rest.is_empty());
        }
    }

    #[test]
    fn test_float8_recv_short() {
        assert!(float8_recv(&[0x3F, 0xF0]).is_err());
    }

    #[test]
    fn test_float8_cmp() {
        assert_eq!(float8_cmp(1.0, 2.0), Ordering::Less);
        assert_eq!(float8_cmp(2.0, 1.0), Ordering::Greater);
        assert_eq!(float8_cmp(f64::NAN, f64::NAN), Ordering::Equal);
        assert_eq!(float8_cmp(f64::NAN, f64::INFINITY), Ordering::Greater);
        assert_eq!(float8_cmp(f64::NEG_INFINITY, f64::NAN), Ordering::Less);
        assert!(float8_eq(0.0, -0.0));
        assert!(float8_eq(f64::NAN, -f64::NAN));
        assert!(!float8_eq(1.0, 1.0 + f64::EPSILON));
    }
}
