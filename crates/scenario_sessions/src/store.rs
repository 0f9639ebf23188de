//! Session state shared between request handlers and simulation tasks.
//!
//! Sessions live in one LRU map bounded by `max_sessions`. Every operation
//! that touches a session promotes it, so the session evicted when a new one
//! arrives is always the least recently accessed.
//!
//! Each start hands out a run token unique to the store. Simulation tasks
//! write progress and outcomes with their token; a write lands only while the
//! session is still loading that same run. Writes from a run whose session
//! was evicted, restarted or recreated are dropped.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use lru::LruCache;
use scenario_core::ScenarioResult;
use tracing::debug;

use crate::config::DEFAULT_MAX_SESSIONS;
use crate::error::SessionError;
use crate::session::{
    Session, SessionSnapshot, SessionStatus, MESSAGE_DONE, MESSAGE_QUEUED, PROGRESS_DONE,
    PROGRESS_QUEUED,
};

pub struct SessionStore {
    sessions: Mutex<LruCache<String, Session>>,
    next_run: AtomicU64,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        let capacity = NonZeroUsize::new(max_sessions).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: Mutex::new(LruCache::new(capacity)),
            next_run: AtomicU64::new(1),
        }
    }

    pub fn max_sessions(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the session exists. Does not count as an access.
    pub fn contains(&self, session_id: &str) -> bool {
        self.lock().contains(session_id)
    }

    /// When the session was last read or written. Does not count as an access.
    pub fn last_access(&self, session_id: &str) -> Option<Instant> {
        self.lock()
            .peek(session_id)
            .map(|session| session.last_access)
    }

    /// Create an idle session if absent, evicting the least recently accessed
    /// session when full.
    pub fn ensure_session(&self, session_id: &str) {
        let mut sessions = self.lock();
        Self::session_entry(&mut sessions, session_id);
    }

    pub fn get_status(&self, session_id: &str) -> SessionSnapshot {
        let mut sessions = self.lock();
        Self::session_entry(&mut sessions, session_id).snapshot()
    }

    /// The result, only when the session exists and is ready.
    pub fn get_data(&self, session_id: &str) -> Option<Arc<ScenarioResult>> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(session_id)?;
        session.touch();
        match session.status {
            SessionStatus::Ready => session.result.clone(),
            _ => None,
        }
    }

    /// Mark the session as queued and return the token of the new run, or
    /// `None` when a run is already loading.
    pub fn set_running(&self, session_id: &str) -> Option<u64> {
        let mut sessions = self.lock();
        let session = Self::session_entry(&mut sessions, session_id);
        if session.status == SessionStatus::Loading {
            return None;
        }
        let run = self.next_run.fetch_add(1, Ordering::Relaxed);
        session.status = SessionStatus::Loading;
        session.message = MESSAGE_QUEUED.to_string();
        session.progress = PROGRESS_QUEUED;
        session.result = None;
        session.error = None;
        session.run = Some(run);
        Some(run)
    }

    pub fn report_progress(&self, session_id: &str, run: u64, progress: u8, message: &str) {
        self.update(session_id, run, |session| {
            session.progress = progress.max(session.progress).min(PROGRESS_DONE);
            session.message = message.to_string();
        });
    }

    pub fn complete(&self, session_id: &str, run: u64, result: Arc<ScenarioResult>) {
        self.update(session_id, run, |session| {
            session.status = SessionStatus::Ready;
            session.progress = PROGRESS_DONE;
            session.message = MESSAGE_DONE.to_string();
            session.result = Some(result);
            session.error = None;
        });
    }

    /// Move the session to the error state, keeping its last progress value.
    pub fn fail(&self, session_id: &str, run: u64, error: &SessionError) {
        self.update(session_id, run, |session| {
            session.status = SessionStatus::Error;
            session.message = error.status_message();
            session.error = Some(error.to_string());
            session.result = None;
        });
    }

    fn update(&self, session_id: &str, run: u64, apply: impl FnOnce(&mut Session)) {
        let mut sessions = self.lock();
        match sessions.get_mut(session_id) {
            Some(session) if session.accepts(run) => {
                session.touch();
                apply(session);
            }
            Some(_) => debug!(session_id, run, "stale run, dropping update"),
            None => debug!(session_id, run, "session evicted, dropping update"),
        }
    }

    fn session_entry<'a>(
        sessions: &'a mut LruCache<String, Session>,
        session_id: &str,
    ) -> &'a mut Session {
        if !sessions.contains(session_id) {
            if let Some((evicted, _)) = sessions.push(session_id.to_string(), Session::new()) {
                debug!(session_id = %evicted, "evicted least recently used session");
            }
        }
        let session = sessions.get_or_insert_mut(session_id.to_string(), Session::new);
        session.touch();
        session
    }

    // Poisoning is ignored: every write replaces whole fields.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}
