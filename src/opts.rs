//! Formatting options.

use no_panic::no_panic;
use url::Url;

use crate::error::Error;

/// Lowest accepted `extra_float_digits`, as bounded by the server.
pub const MIN_EXTRA_FLOAT_DIGITS: i32 = -15;

/// Highest accepted `extra_float_digits`, as bounded by the server.
pub const MAX_EXTRA_FLOAT_DIGITS: i32 = 3;

/// Session settings consulted by the text output functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Adjustment to the number of significant digits printed for
    /// `fhe_float` values, on top of the 15 a double reliably carries.
    ///
    /// Negative values trade round-trip fidelity for shorter output.
    ///
    /// Default: `0`
    pub extra_float_digits: i32,

    /// Additional settings that are carried along but not interpreted.
    ///
    /// Default: `[]`
    pub params: Vec<(String, String)>,
}

impl Default for Opts {
    #[no_panic]
    fn default() -> Self {
        Self {
            extra_float_digits: 0,
            params: Vec::new(),
        }
    }
}

impl Opts {
    /// Return a copy of these options with `extra_float_digits` replaced.
    pub fn with_extra_float_digits(mut self, value: i32) -> Result<Self, Error> {
        if !(MIN_EXTRA_FLOAT_DIGITS..=MAX_EXTRA_FLOAT_DIGITS).contains(&value) {
            return Err(Error::InvalidUsage(format!(
                "Invalid extra_float_digits: {} is outside the valid range [{}, {}]",
                value, MIN_EXTRA_FLOAT_DIGITS, MAX_EXTRA_FLOAT_DIGITS
            )));
        }
        self.extra_float_digits = value;
        Ok(self)
    }
}

impl TryFrom<&Url> for Opts {
    type Error = Error;

    /// Read session settings from a PostgreSQL connection URL.
    ///
    /// Format: `postgres://[user[:password]@]host[:port][/database][?param1=value1&..]`
    ///
    /// Supported query parameters:
    /// - `extra_float_digits`: integer in `[-15, 3]`
    ///
    /// Other parameters are kept in `params`.
    fn try_from(url: &Url) -> Result<Self, Self::Error> {
        if !["postgres", "pg"].contains(&url.scheme()) {
            return Err(Error::InvalidUsage(format!(
                "Invalid scheme: expected 'postgres://' or 'pg://', got '{}://'",
                url.scheme()
            )));
        }

        let mut opts = Opts::default();

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "extra_float_digits" => {
                    let digits: i32 = value.trim().parse().map_err(|_| {
                        Error::InvalidUsage(format!("Invalid extra_float_digits: {}", value))
                    })?;
                    opts = opts.with_extra_float_digits(digits)?;
                }
                _ => {
                    tracing::debug!("Keeping uninterpreted setting: {}", key);
                    opts.params.push((key.to_string(), value.to_string()));
                }
            }
        }

        Ok(opts)
    }
}

impl TryFrom<&str> for Opts {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let url = Url::parse(s).map_err(|e| Error::InvalidUsage(format!("Invalid URL: {}", e)))?;
        Self::try_from(&url)
    }
}
