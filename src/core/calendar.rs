//! Settlement date adjustment.
//!
//! Pure date arithmetic with no I/O and no state. A raw settlement date
//! that falls on a closed day for its market rolls forward to the next
//! open day; which days are closed depends on the currency.

use crate::core::currency::CurrencyCode;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Render and parse format for settlement dates, e.g. `"17 Jan 2016"`.
pub const DATE_FORMAT: &str = "%d %b %Y";

/// Grouping key for settlement-date aggregation.
///
/// The key is the rendered day-granularity string, not the date value,
/// so two adjusted dates that render identically share a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(DATE_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The date this key renders, when it parses back cleanly.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, DATE_FORMAT).ok()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Shift a raw settlement date forward to the next open settlement day.
///
/// AED and SAR markets close Friday–Saturday: a Friday date rolls two
/// days to Sunday and a Saturday rolls one. All other markets close
/// Saturday–Sunday: Friday settles as-is, Saturday rolls two days to
/// Monday, Sunday one.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use trade_register::core::calendar::adjust;
/// use trade_register::core::currency::CurrencyCode;
///
/// // 15 Jan 2016 is a Friday; SAR settles on Sunday the 17th.
/// let raw = NaiveDate::from_ymd_opt(2016, 1, 15).unwrap();
/// let adjusted = adjust(raw, &CurrencyCode::new("SAR"));
/// assert_eq!(adjusted, NaiveDate::from_ymd_opt(2016, 1, 17).unwrap());
/// ```
pub fn adjust(raw: NaiveDate, currency: &CurrencyCode) -> NaiveDate {
    let offset = match (raw.weekday(), currency.observes_fri_sat_weekend()) {
        (Weekday::Fri, true) => 2,
        (Weekday::Sat, true) => 1,
        (Weekday::Sat, false) => 2,
        (Weekday::Sun, false) => 1,
        _ => 0,
    };
    raw + Duration::days(offset)
}
