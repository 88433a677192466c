use serde::{Deserialize, Serialize};

/// The `{status, error?, message?}` body every backend endpoint answers with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiEnvelope {
    pub status: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ApiEnvelope {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// The backend's explanation for a failure, if it gave one.
    ///
    /// Validation failures carry it in `error`; the refresh endpoint reports
    /// its own failures through `message`.
    pub fn reason(&self) -> Option<String> {
        self.error.clone().or_else(|| self.message.clone())
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationUpdate<'a> {
    pub exe_name: &'a str,
    pub is_game: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobalLimitUpdate {
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppLimitUpdate<'a> {
    pub exe_name: &'a str,
    pub max_time: u32,
}
