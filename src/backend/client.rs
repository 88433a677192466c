use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::types::{BackendConfig, Endpoints};
use crate::types::{
    ApiEnvelope, AppLimitUpdate, ClassificationUpdate, GlobalLimitUpdate, SettingsSnapshot,
};

use super::error::BackendError;

/// Client for the screen-time service's settings endpoints.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection pool.
/// No call is ever retried; every failure is reported once to the caller.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    endpoints: Endpoints,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(BackendError::Config(format!(
                "base_url must start with http:// or https://, got {:?}",
                config.base_url
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            endpoints: config.endpoints.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Load everything the settings screens display.
    pub async fn fetch_snapshot(&self) -> Result<SettingsSnapshot, BackendError> {
        let resp = self.http.get(self.url(&self.endpoints.snapshot)).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }
        let mut snapshot: SettingsSnapshot = decode(&resp.text().await?)?;
        snapshot.sort_apps();
        Ok(snapshot)
    }

    pub async fn update_classification(
        &self,
        exe_name: &str,
        is_game: bool,
    ) -> Result<(), BackendError> {
        let body = ClassificationUpdate { exe_name, is_game };
        self.post(&self.endpoints.update_classification, Some(&body))
            .await
    }

    pub async fn update_global_limit(&self, limit: u32) -> Result<(), BackendError> {
        self.post(&self.endpoints.update_global_limit, Some(&GlobalLimitUpdate { limit }))
            .await
    }

    pub async fn update_app_limit(&self, exe_name: &str, max_time: u32) -> Result<(), BackendError> {
        let body = AppLimitUpdate { exe_name, max_time };
        self.post(&self.endpoints.update_time_limit, Some(&body)).await
    }

    /// Ask the backend to add default limits for every game that lacks one.
    ///
    /// Unlike the update calls, this endpoint reports its own failures with an
    /// envelope on a 5xx status, so the body is read whatever the status.
    pub async fn refresh_time_limits(&self) -> Result<(), BackendError> {
        let resp = self
            .http
            .post(self.url(&self.endpoints.refresh_time_limits))
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        match decode::<ApiEnvelope>(&text) {
            Ok(envelope) => check_envelope(&envelope),
            Err(_) if !status.is_success() => Err(BackendError::Status(status)),
            Err(e) => Err(e),
        }
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), BackendError> {
        let mut req = self.http.post(self.url(path));
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }
        let envelope: ApiEnvelope = decode(&resp.text().await?)?;
        check_envelope(&envelope)
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, BackendError> {
    serde_json::from_str(text).map_err(|e| BackendError::Decode(e.to_string()))
}

fn check_envelope(envelope: &ApiEnvelope) -> Result<(), BackendError> {
    if envelope.is_success() {
        Ok(())
    } else {
        Err(BackendError::Rejected(envelope.reason()))
    }
}
