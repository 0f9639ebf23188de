use std::sync::Arc;
use std::time::Instant;

use scenario_core::ScenarioResult;
use serde::{Deserialize, Serialize};

pub const PROGRESS_QUEUED: u8 = 1;
pub const PROGRESS_PREPARING: u8 = 10;
pub const PROGRESS_RUNNING: u8 = 25;
pub const PROGRESS_FINALIZING: u8 = 90;
pub const PROGRESS_DONE: u8 = 100;

pub const MESSAGE_IDLE: &str = "Idle";
pub const MESSAGE_QUEUED: &str = "Waiting for slot...";
pub const MESSAGE_PREPARING: &str = "Preparing spatial data...";
pub const MESSAGE_RUNNING: &str = "Running heavy spatial models...";
pub const MESSAGE_FINALIZING: &str = "Finalizing results...";
pub const MESSAGE_DONE: &str = "Simulation complete!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

/// Lifecycle state of one client session.
///
/// `result` is set only while `Ready` and `error` only while `Error`.
#[derive(Debug, Clone)]
pub struct Session {
    pub status: SessionStatus,
    pub message: String,
    pub progress: u8,
    pub result: Option<Arc<ScenarioResult>>,
    pub error: Option<String>,
    /// Token of the latest run started on this session. Task writes carrying
    /// any other token are stale and get dropped.
    pub run: Option<u64>,
    /// Informational; eviction order is kept by the store's LRU.
    pub last_access: Instant,
}

impl Session {
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Idle,
            message: MESSAGE_IDLE.to_string(),
            progress: 0,
            result: None,
            error: None,
            run: None,
            last_access: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_access = Instant::now();
    }

    /// Whether a write from run `run` may still change this session.
    pub fn accepts(&self, run: u64) -> bool {
        self.status == SessionStatus::Loading && self.run == Some(run)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            message: self.message.clone(),
            progress: self.progress,
            error: self.error.clone(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// What a status poll returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub message: String,
    pub progress: u8,
    pub error: Option<String>,
}
