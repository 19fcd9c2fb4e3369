use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Config directory not found at {0}. Run 'earnings init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid month key '{0}'. Expected YYYY-MM (e.g., 2025-01).")]
    InvalidMonthKey(String),

    /// Non-success HTTP status; the message is the raw response body,
    /// shown to the user verbatim.
    #[error("{body}")]
    Api { status: u16, body: String },

    #[error("Request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("Analytics fetch worker panicked")]
    FetchPanicked,

    #[error("Non-finite amount for month '{0}'")]
    NonFiniteAmount(String),

    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
