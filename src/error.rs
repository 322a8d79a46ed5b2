use thiserror::Error;

/// Failure of a single upstream gazetteer search.
///
/// Always absorbed by the resolver; never crosses the HTTP boundary.
#[derive(Error, Debug)]
pub enum UpstreamFailure {
    #[error("gazetteer returned status {status}")]
    Status {
        status: u16,
        body: Option<String>,
    },
    #[error("gazetteer request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("gazetteer payload could not be decoded: {0}")]
    Decode(String),
}

impl UpstreamFailure {
    /// HTTP status reported by the gazetteer, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamFailure::Status { status, .. } => Some(*status),
            UpstreamFailure::Transport(e) => e.status().map(|s| s.as_u16()),
            UpstreamFailure::Decode(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid gazetteer url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("invalid proxy url '{url}': {source}")]
    InvalidProxy {
        url: String,
        source: reqwest::Error,
    },
    #[error("invalid allowed origin '{origin}': {source}")]
    InvalidOrigin {
        origin: String,
        source: axum::http::header::InvalidHeaderValue,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
