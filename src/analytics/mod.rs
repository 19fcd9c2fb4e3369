mod chart;
mod snapshot;
mod summary;

pub use chart::{build_chart, Canvas, ChartGeometry, ChartPoint};
pub use snapshot::{set_paid, Snapshot};
pub use summary::{summarize, Summary};

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// One company's aggregate invoiced amount for one month, with its
/// settlement flag. Produced server-side; the client only reads it and
/// toggles `paid`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CompanyTotal {
    pub company: String,
    pub month_key: String,
    pub total_amount: f64,
    pub paid: bool,
}

/// Total invoiced earnings for one calendar month across all companies.
/// The server does not guarantee ordering; consumers sort by `month_key`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EarningsPoint {
    pub month_key: String,
    pub total_amount: f64,
}

/// Validate the canonical `YYYY-MM` month key format.
///
/// Lexicographic ordering of month keys is only correct because the format
/// is zero-padded and fixed-width, so the format is checked rather than
/// assumed.
pub fn validate_month_key(month_key: &str) -> Result<()> {
    let bytes = month_key.as_bytes();
    let well_formed = bytes.len() == 7
        && bytes[4] == b'-'
        && bytes[..4].iter().all(|b| b.is_ascii_digit())
        && bytes[5..].iter().all(|b| b.is_ascii_digit())
        && matches!(month_key[5..].parse::<u8>(), Ok(1..=12));
    if well_formed {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidMonthKey(month_key.to_string()))
    }
}

/// Month key for the current local date.
pub fn current_month_key() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}
