use tokio::sync::mpsc::UnboundedReceiver;

use crate::types::SettingsSnapshot;

use super::interface::{Engine, EngineHandle, Event, Outcome, Request};

/// A stub engine that serves a fixture snapshot without any network calls.
///
/// Useful for integration tests and UI demos that must not require a running
/// backend. Every mutation succeeds instantly.
pub struct StubEngine {
    pub snapshot: SettingsSnapshot,
}

impl Engine for StubEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("stub tokio runtime");
            rt.block_on(self.run_loop(rx));
        });
        EngineHandle::new(tx)
    }
}

impl StubEngine {
    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        while let Some(req) = rx.recv().await {
            match req {
                Request::FetchSnapshot { reply_tx } => {
                    let mut snapshot = self.snapshot.clone();
                    snapshot.sort_apps();
                    let _ = reply_tx.send(Event::SnapshotFetched { snapshot });
                }
                Request::UpdateClassification {
                    exe_name,
                    is_game,
                    reply_tx,
                } => {
                    let _ = reply_tx.send(Event::ClassificationUpdated {
                        exe_name,
                        is_game,
                        outcome: Outcome::Applied,
                    });
                }
                Request::UpdateGlobalLimit { limit, reply_tx } => {
                    let _ = reply_tx.send(Event::GlobalLimitUpdated {
                        limit,
                        outcome: Outcome::Applied,
                    });
                }
                Request::UpdateAppLimit {
                    exe_name,
                    max_time,
                    reply_tx,
                } => {
                    let _ = reply_tx.send(Event::AppLimitUpdated {
                        exe_name,
                        max_time,
                        outcome: Outcome::Applied,
                    });
                }
                Request::RefreshTimeLimits { reply_tx } => {
                    let _ = reply_tx.send(Event::TimeLimitsRefreshed {
                        outcome: Outcome::Applied,
                    });
                }
                Request::Shutdown => break,
            }
        }
    }
}
