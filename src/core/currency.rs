use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency code attached to a trade instruction.
///
/// Codes are free-form: whatever the upstream feed sends is accepted
/// (USD, GBP, SGP, ...). Only AED and SAR carry settlement-calendar
/// significance; every other code behaves identically.
///
/// # Examples
///
/// ```
/// use trade_register::core::currency::CurrencyCode;
///
/// let sar = CurrencyCode::new("SAR");
/// assert!(sar.observes_fri_sat_weekend());
///
/// let sgp = CurrencyCode::new("SGP");
/// assert!(!sgp.observes_fri_sat_weekend());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for markets that close Friday–Saturday instead of
    /// Saturday–Sunday: AED and SAR. The comparison is trimmed and
    /// case-insensitive.
    pub fn observes_fri_sat_weekend(&self) -> bool {
        let code = self.0.trim();
        code.eq_ignore_ascii_case("AED") || code.eq_ignore_ascii_case("SAR")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
