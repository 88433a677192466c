use std::sync::mpsc::Sender;

use crate::backend::BackendError;
use crate::types::SettingsSnapshot;

/// Handle to the backend engine held by the UI layer.
///
/// Cheaply cloneable. When the last handle is dropped the sender channel
/// closes, signalling the engine to shut down.
#[derive(Clone)]
pub struct EngineHandle {
    tx: tokio::sync::mpsc::UnboundedSender<Request>,
}

impl EngineHandle {
    pub(crate) fn new(tx: tokio::sync::mpsc::UnboundedSender<Request>) -> Self {
        Self { tx }
    }

    /// A handle with no engine behind it. Requests are dropped.
    pub fn disconnected() -> Self {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        Self { tx }
    }

    /// Send a request to the engine. Non-blocking, returns immediately.
    pub fn send(&self, req: Request) {
        // Ignore errors: if the receiver is gone the engine has already shut down.
        let _ = self.tx.send(req);
    }
}

/// Trait implemented by both `HttpEngine` and `StubEngine`.
pub trait Engine: Send + 'static {
    fn start(self) -> EngineHandle;
}

/// All operations the UI layer can send to the engine.
pub enum Request {
    FetchSnapshot {
        reply_tx: Sender<Event>,
    },
    UpdateClassification {
        exe_name: String,
        is_game: bool,
        reply_tx: Sender<Event>,
    },
    UpdateGlobalLimit {
        limit: u32,
        reply_tx: Sender<Event>,
    },
    UpdateAppLimit {
        exe_name: String,
        max_time: u32,
        reply_tx: Sender<Event>,
    },
    RefreshTimeLimits {
        reply_tx: Sender<Event>,
    },
    Shutdown,
}

impl Request {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchSnapshot { .. } => "FetchSnapshot",
            Self::UpdateClassification { .. } => "UpdateClassification",
            Self::UpdateGlobalLimit { .. } => "UpdateGlobalLimit",
            Self::UpdateAppLimit { .. } => "UpdateAppLimit",
            Self::RefreshTimeLimits { .. } => "RefreshTimeLimits",
            Self::Shutdown => "Shutdown",
        }
    }
}

/// How a mutation call ended, as far as the UI is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The backend answered but refused, with its reason when it gave one.
    Rejected(Option<String>),
    /// The call failed before the backend could answer meaningfully.
    Failed(String),
}

impl From<Result<(), BackendError>> for Outcome {
    fn from(result: Result<(), BackendError>) -> Self {
        match result {
            Ok(()) => Self::Applied,
            Err(BackendError::Rejected(reason)) => Self::Rejected(reason),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// All events the engine can push back to the UI.
pub enum Event {
    SnapshotFetched {
        snapshot: SettingsSnapshot,
    },
    SnapshotFailed {
        message: String,
    },
    ClassificationUpdated {
        exe_name: String,
        is_game: bool,
        outcome: Outcome,
    },
    GlobalLimitUpdated {
        limit: u32,
        outcome: Outcome,
    },
    AppLimitUpdated {
        exe_name: String,
        max_time: u32,
        outcome: Outcome,
    },
    TimeLimitsRefreshed {
        outcome: Outcome,
    },
}
