pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod svg;

pub use analytics::{
    build_chart, current_month_key, set_paid, summarize, validate_month_key, Canvas,
    ChartGeometry, ChartPoint, CompanyTotal, EarningsPoint, Snapshot, Summary,
};
pub use api::ApiClient;
pub use config::Config;
pub use error::{AnalyticsError, Result};
