use tokio::sync::mpsc::UnboundedReceiver;

use crate::backend::{BackendClient, BackendError};
use crate::config::types::BackendConfig;

use super::interface::{Engine, EngineHandle, Event, Outcome, Request};

/// The real backend engine: performs HTTP calls against the screen-time service.
pub struct HttpEngine {
    client: BackendClient,
}

impl HttpEngine {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        Ok(Self {
            client: BackendClient::new(config)?,
        })
    }
}

impl Engine for HttpEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        let handle = EngineHandle::new(tx);
        let _ = std::thread::Builder::new()
            .name("playtime-engine".to_owned())
            .spawn(move || {
                let rt = tokio::runtime::Runtime::new().expect("tokio runtime init");
                rt.block_on(self.run_loop(rx));
            });
        handle
    }
}

impl HttpEngine {
    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        while let Some(req) = rx.recv().await {
            if matches!(req, Request::Shutdown) {
                break;
            }
            tracing::debug!("engine: received {}", req.name());
            // Calls are independent and never cancelled: a second update may
            // be issued before the first one has been answered.
            tokio::spawn(handle_request(req, self.client.clone()));
        }
        tracing::debug!("engine: shutting down");
    }
}

// ---------------------------------------------------------------------------
// Request dispatch
// ---------------------------------------------------------------------------

async fn handle_request(req: Request, client: BackendClient) {
    match req {
        Request::FetchSnapshot { reply_tx } => {
            let event = match client.fetch_snapshot().await {
                Ok(snapshot) => {
                    tracing::debug!(
                        "engine: sending SnapshotFetched apps={} limits={}",
                        snapshot.apps.len(),
                        snapshot.time_limit_settings.len()
                    );
                    Event::SnapshotFetched { snapshot }
                }
                Err(e) => {
                    tracing::error!("engine: FetchSnapshot error: {e}");
                    Event::SnapshotFailed {
                        message: e.to_string(),
                    }
                }
            };
            let _ = reply_tx.send(event);
        }

        Request::UpdateClassification {
            exe_name,
            is_game,
            reply_tx,
        } => {
            let outcome = log_outcome(
                "UpdateClassification",
                client.update_classification(&exe_name, is_game).await,
            );
            let _ = reply_tx.send(Event::ClassificationUpdated {
                exe_name,
                is_game,
                outcome,
            });
        }

        Request::UpdateGlobalLimit { limit, reply_tx } => {
            let outcome = log_outcome(
                "UpdateGlobalLimit",
                client.update_global_limit(limit).await,
            );
            let _ = reply_tx.send(Event::GlobalLimitUpdated { limit, outcome });
        }

        Request::UpdateAppLimit {
            exe_name,
            max_time,
            reply_tx,
        } => {
            let outcome = log_outcome(
                "UpdateAppLimit",
                client.update_app_limit(&exe_name, max_time).await,
            );
            let _ = reply_tx.send(Event::AppLimitUpdated {
                exe_name,
                max_time,
                outcome,
            });
        }

        Request::RefreshTimeLimits { reply_tx } => {
            let outcome = log_outcome("RefreshTimeLimits", client.refresh_time_limits().await);
            let _ = reply_tx.send(Event::TimeLimitsRefreshed { outcome });
        }

        Request::Shutdown => {}
    }
}

fn log_outcome(context: &str, result: Result<(), BackendError>) -> Outcome {
    match &result {
        Ok(()) => tracing::debug!("engine: {context} ok"),
        Err(e) if e.is_rejection() => tracing::warn!("engine: {context} {e}"),
        Err(e) => tracing::error!("engine: {context} failed: {e}"),
    }
    Outcome::from(result)
}
