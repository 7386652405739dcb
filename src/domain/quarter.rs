//! Quarter identifier used to select the quarterly dataset files.

use std::fmt;

/// Environment variable holding the quarter identifier.
pub const QUARTER_ENV: &str = "DDH_QUARTER";

/// Quarter used when none is configured.
pub const DEFAULT_QUARTER: &str = "20Q1";

/// Reporting-period label such as `20Q1`.
///
/// The value is kept verbatim; only emptiness is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quarter(String);

impl Quarter {
    /// Build a quarter, falling back to [`DEFAULT_QUARTER`] for an empty value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() { Self::default() } else { Self(value) }
    }

    /// Read the quarter from `DDH_QUARTER`.
    pub fn from_env() -> Self {
        std::env::var(QUARTER_ENV).map(Self::new).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Quarter {
    fn default() -> Self {
        Self(DEFAULT_QUARTER.to_string())
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
