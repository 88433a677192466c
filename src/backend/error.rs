use thiserror::Error;

/// Why a backend call did not take effect.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never got an HTTP answer (connection refused, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success HTTP status.
    #[error("backend returned HTTP {0}")]
    Status(reqwest::StatusCode),
    /// The body was not the JSON we expected.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// The backend processed the call and reported `status != "success"`.
    #[error("rejected by backend: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
    /// The client could not be built from the configuration.
    #[error("invalid backend configuration: {0}")]
    Config(String),
}

impl BackendError {
    /// Whether the backend itself refused the change (as opposed to the call failing).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
