use super::CompanyTotal;

/// Financial summary over one month's company totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total: f64,
    pub paid: f64,
    pub outstanding: f64,
}

/// Aggregate a month's company totals into owed/paid/outstanding figures.
///
/// The input is trusted to already be filtered to a single month; no
/// re-filtering happens here. Empty input yields all zeros. Negative
/// amounts are not expected upstream but sum through arithmetically.
pub fn summarize(totals: &[CompanyTotal]) -> Summary {
    let total: f64 = totals.iter().map(|t| t.total_amount).sum();
    let paid: f64 = totals
        .iter()
        .filter(|t| t.paid)
        .map(|t| t.total_amount)
        .sum();

    Summary {
        total,
        paid,
        outstanding: total - paid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(company: &str, amount: f64, paid: bool) -> CompanyTotal {
        CompanyTotal {
            company: company.to_string(),
            month_key: "2025-01".to_string(),
            total_amount: amount,
            paid,
        }
    }

    #[test]
    fn sums_total_paid_and_outstanding() {
        let totals = vec![row("Acme", 100.0, true), row("Globex", 50.0, false)];
        let summary = summarize(&totals);
        assert_eq!(summary.total, 150.0);
        assert_eq!(summary.paid, 100.0);
        assert_eq!(summary.outstanding, 50.0);
    }

    #[test]
    fn empty_input_yields_zeros() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.paid, 0.0);
        assert_eq!(summary.outstanding, 0.0);
    }

    #[test]
    fn outstanding_equals_total_minus_paid() {
        let totals = vec![
            row("Acme", 1200.50, true),
            row("Globex", 330.25, false),
            row("Initech", 75.0, true),
            row("Hooli", 0.0, false),
        ];
        let summary = summarize(&totals);
        assert_eq!(summary.paid, 1275.50);
        assert_eq!(summary.outstanding, summary.total - summary.paid);
    }

    #[test]
    fn negative_amounts_sum_without_clamping() {
        let totals = vec![row("Acme", -25.0, false), row("Globex", 100.0, true)];
        let summary = summarize(&totals);
        assert_eq!(summary.total, 75.0);
        assert_eq!(summary.paid, 100.0);
        assert_eq!(summary.outstanding, -25.0);
    }
}
