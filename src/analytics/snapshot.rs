use super::{summarize, CompanyTotal, EarningsPoint, Summary};

/// One refresh's worth of server data for the analytics view.
///
/// A snapshot is replaced wholesale when a refresh succeeds; a failed
/// refresh never mixes fresh rows into a stale snapshot. Derived values
/// (summary, chart geometry) are recomputed from the snapshot on demand
/// and never cached across a mutation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub month_key: String,
    pub totals: Vec<CompanyTotal>,
    pub earnings: Vec<EarningsPoint>,
}

impl Snapshot {
    pub fn summary(&self) -> Summary {
        summarize(&self.totals)
    }
}

/// Replace the `paid` flag for one company, leaving every other row
/// untouched. This is the local half of the mark-paid protocol: the caller
/// issues the POST first and applies this transition only after the server
/// confirms success, so a failed mutation leaves displayed state unchanged.
pub fn set_paid(totals: &[CompanyTotal], company: &str, paid: bool) -> Vec<CompanyTotal> {
    totals
        .iter()
        .map(|t| {
            if t.company == company {
                CompanyTotal { paid, ..t.clone() }
            } else {
                t.clone()
            }
        })
        .collect()
}
