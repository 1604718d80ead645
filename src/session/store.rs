//! Session storage and management.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::{Flash, SessionId};
use crate::error::TodoError;
use crate::todo::Lists;
use crate::Result;

/// Default idle timeout before a session is discarded.
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 3600;

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session ID.
    pub cookie_name: String,
    /// Sessions idle for longer than this are discarded.
    pub idle_timeout: Duration,
    /// Add the `Secure` attribute to the session cookie.
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "todo_session".to_string(),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            secure_cookie: false,
        }
    }
}

/// State held for one browser session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique identifier.
    pub id: SessionId,
    /// The session's todo lists.
    pub lists: Lists,
    /// Messages for the next rendered page.
    pub flash: Flash,
    /// Time when session was created.
    pub created_at: Instant,
    /// Time of last activity.
    pub last_activity: Instant,
}

impl Session {
    /// Create a new, empty session.
    pub fn new(id: SessionId) -> Self {
        let now = Instant::now();
        Self {
            id,
            lists: Lists::new(),
            flash: Flash::default(),
            created_at: now,
            last_activity: now,
        }
    }

    /// Update the last activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Get the idle duration since last activity.
    pub fn idle_duration(&self) -> Duration {
        self.last_activity.elapsed()
    }
}

/// Thread-safe storage for sessions.
///
/// All mutation goes through [`SessionStore::update`], which holds the
/// write lock for the duration of the closure. Two requests from the same
/// session therefore never interleave their changes.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
    config: SessionConfig,
}

impl SessionStore {
    /// Create a new empty session store with default settings.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a new empty session store.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Create a new empty session and return its ID.
    ///
    /// Expired sessions are swept first.
    pub fn create(&self) -> Result<SessionId> {
        let expired = self.purge_expired()?;
        if expired > 0 {
            info!(count = expired, "Expired sessions removed");
        }

        let id = SessionId::generate();
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| TodoError::LockPoisoned)?;
        sessions.insert(id.clone(), Session::new(id.clone()));

        debug!(total = sessions.len(), "Session created");
        Ok(id)
    }

    /// Map a client-supplied token to a live session, creating one if needed.
    ///
    /// Returns the session ID and whether it was newly created.
    pub fn resolve(&self, token: Option<&str>) -> Result<(SessionId, bool)> {
        if let Some(id) = token.and_then(|t| t.parse::<SessionId>().ok()) {
            let mut sessions = self
                .sessions
                .write()
                .map_err(|_| TodoError::LockPoisoned)?;

            let live = sessions
                .get(&id)
                .map(|s| s.idle_duration() <= self.config.idle_timeout);

            match live {
                Some(true) => {
                    if let Some(session) = sessions.get_mut(&id) {
                        session.touch();
                    }
                    return Ok((id, false));
                }
                Some(false) => {
                    sessions.remove(&id);
                    debug!("Session expired");
                }
                None => {}
            }
        }

        Ok((self.create()?, true))
    }

    /// Get a clone of the session with the given ID.
    pub fn get(&self, id: &SessionId) -> Result<Option<Session>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| TodoError::LockPoisoned)?;
        Ok(sessions.get(id).cloned())
    }

    /// Check if a session exists.
    pub fn contains(&self, id: &SessionId) -> Result<bool> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| TodoError::LockPoisoned)?;
        Ok(sessions.contains_key(id))
    }

    /// Run a closure against a session under the write lock.
    ///
    /// Returns the closure's result, or an error if the session doesn't exist.
    pub fn update<F, R>(&self, id: &SessionId, f: F) -> Result<R>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| TodoError::LockPoisoned)?;

        let session = sessions
            .get_mut(id)
            .ok_or_else(|| TodoError::SessionNotFound(id.to_string()))?;

        session.touch();
        Ok(f(session))
    }

    /// Remove a session from the store.
    pub fn remove(&self, id: &SessionId) -> Result<Option<Session>> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| TodoError::LockPoisoned)?;
        Ok(sessions.remove(id))
    }

    /// Get the number of sessions in the store.
    pub fn count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Remove sessions idle for longer than the configured timeout.
    pub fn purge_expired(&self) -> Result<usize> {
        let timeout = self.config.idle_timeout;
        self.remove_matching(|s| s.idle_duration() > timeout)
    }

    /// Remove all sessions matching a predicate.
    ///
    /// Returns the number of sessions removed.
    pub fn remove_matching<F>(&self, predicate: F) -> Result<usize>
    where
        F: Fn(&Session) -> bool,
    {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| TodoError::LockPoisoned)?;

        let before = sessions.len();
        sessions.retain(|_, session| !predicate(session));
        Ok(before - sessions.len())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
