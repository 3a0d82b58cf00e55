use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::gateway::GatewayError;
use crate::timeline::CollectionKind;

/// How long `success` and `error` stay visible before reading as `idle`.
pub const DEFAULT_STATUS_WINDOW: Duration = Duration::from_secs(3);

/// Message shown when a sync fails and there is nothing cached to fall back on.
pub const CONNECT_FAILURE_MESSAGE: &str = "Could not connect to remote store";

/// Sync status shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    #[default]
    Idle,
    Syncing,
    Success,
    Error,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Idle => "idle",
            SyncStatus::Syncing => "syncing",
            SyncStatus::Success => "success",
            SyncStatus::Error => "error",
        }
    }

    /// Indicator text for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            SyncStatus::Idle => "Ready",
            SyncStatus::Syncing => "Syncing...",
            SyncStatus::Success => "Synced",
            SyncStatus::Error => "Offline",
        }
    }

    /// `success` and `error` are terminal and fade back to `idle`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SyncStatus::Success | SyncStatus::Error)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The status as it should be observed `elapsed` after it was set.
pub fn visible_status(status: SyncStatus, elapsed: Duration, window: Duration) -> SyncStatus {
    if status.is_terminal() && elapsed >= window {
        SyncStatus::Idle
    } else {
        status
    }
}

/// Status and message after a failed full sync.
///
/// With cached people the client keeps working offline and stays `idle`.
pub fn fetch_failure_status(has_cached_people: bool) -> (SyncStatus, Option<String>) {
    if has_cached_people {
        (SyncStatus::Idle, None)
    } else {
        (SyncStatus::Error, Some(CONNECT_FAILURE_MESSAGE.to_string()))
    }
}

/// Message recorded when an optimistic write fails.
pub fn write_failure_message(kind: CollectionKind, error: &GatewayError) -> String {
    match error {
        GatewayError::Rejected(_) => match error.server_message() {
            Some(message) => message.to_string(),
            None => format!("Failed to save {}", kind.record_noun()),
        },
        other => other.to_string(),
    }
}

/// Result of a full sync request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SyncOutcome {
    /// Both collections were replaced with the remote snapshot.
    Synced { people: usize, events: usize },
    /// The fetch failed; cached data stays in use.
    Offline { reason: String },
    /// The fetch failed with nothing cached to fall back on.
    Failed { reason: String },
    /// Another full sync was already in flight; this one was dropped.
    AlreadyRunning,
}

impl SyncOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced { .. })
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Synced { people, events } => {
                write!(f, "synced {people} people and {events} events")
            }
            SyncOutcome::Offline { reason } => write!(f, "offline, using cached data ({reason})"),
            SyncOutcome::Failed { reason } => write!(f, "sync failed ({reason})"),
            SyncOutcome::AlreadyRunning => f.write_str("a sync is already running"),
        }
    }
}
