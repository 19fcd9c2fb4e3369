use std::thread;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;
use ureq::Agent;

use crate::analytics::{validate_month_key, CompanyTotal, EarningsPoint, Snapshot};
use crate::config::ApiSettings;
use crate::error::{AnalyticsError, Result};

/// Client for the invoicing backend's analytics endpoints.
///
/// Bearer auth is attached when a token is configured. No retries: every
/// failed request is terminal for that attempt and requires the user to
/// re-run the command.
pub struct ApiClient {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(10)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
        }
    }

    /// Company totals for one month. The server pre-filters by month; rows
    /// come back unaggregated per company.
    pub fn company_totals(&self, month_key: &str) -> Result<Vec<CompanyTotal>> {
        validate_month_key(month_key)?;
        self.get(&format!("/analytics/company_totals?month_key={month_key}"))
    }

    /// Full earnings series, one point per month, in no particular order.
    pub fn earnings(&self) -> Result<Vec<EarningsPoint>> {
        self.get("/analytics/earnings")
    }

    /// Set the paid flag for one company's monthly total.
    pub fn mark_paid(&self, company: &str, month_key: &str, paid: bool) -> Result<()> {
        validate_month_key(month_key)?;
        let body = json!({
            "company": company,
            "month_key": month_key,
            "paid": paid,
        });
        let _: serde_json::Value =
            self.post("/analytics/company_totals/mark_paid", &body.to_string())?;
        Ok(())
    }

    /// Refresh the analytics view: both series are fetched concurrently and
    /// the refresh fails as a unit if either request fails, so a snapshot
    /// never mixes fresh and stale rows.
    pub fn fetch_snapshot(&self, month_key: &str) -> Result<Snapshot> {
        validate_month_key(month_key)?;

        let (totals, earnings) = thread::scope(|s| {
            let totals = s.spawn(|| self.company_totals(month_key));
            let earnings = s.spawn(|| self.earnings());
            (totals.join(), earnings.join())
        });

        Ok(Snapshot {
            month_key: month_key.to_string(),
            totals: totals.map_err(|_| AnalyticsError::FetchPanicked)??,
            earnings: earnings.map_err(|_| AnalyticsError::FetchPanicked)??,
        })
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let mut request = self.agent.get(format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        let response = request.call().map_err(Box::new)?;
        read_json(response)
    }

    fn post<T: DeserializeOwned>(&self, path: &str, body: &str) -> Result<T> {
        let mut request = self
            .agent
            .post(format!("{}{}", self.base_url, path))
            .header("Content-Type", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        let response = request.send(body).map_err(Box::new)?;
        read_json(response)
    }
}

/// Parse a JSON response on HTTP success; on any non-success status, fail
/// with the raw response body text so callers can display it verbatim.
fn read_json<T: DeserializeOwned>(
    mut response: ureq::http::Response<ureq::Body>,
) -> Result<T> {
    let status = response.status();
    let body = response.body_mut().read_to_string().map_err(Box::new)?;

    if !status.is_success() {
        return Err(AnalyticsError::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
