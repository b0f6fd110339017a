//! Session state and the session store.
//!
//! A session is created lazily the first time its id is referenced and lives
//! for the lifetime of the process. Each session sits behind its own mutex so
//! that turns for one id are serialized without blocking other ids.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::error::StoreError;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in a session's conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            at: Utc::now(),
        }
    }
}

/// The writable intake fields of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionField {
    Name,
    Goal,
    Timeline,
}

/// Per-conversation intake state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    /// Append-only conversation log.
    #[serde(default)]
    pub history: Vec<Turn>,
    pub created_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            name: None,
            goal: None,
            timeline: None,
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

impl Session {
    /// Current value of a field. Empty strings count as unset.
    pub fn field(&self, field: SessionField) -> Option<&str> {
        let value = match field {
            SessionField::Name => self.name.as_deref(),
            SessionField::Goal => self.goal.as_deref(),
            SessionField::Timeline => self.timeline.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Whether a field holds a non-empty value.
    pub fn has(&self, field: SessionField) -> bool {
        self.field(field).is_some()
    }

    /// Overwrite a field.
    pub fn set(&mut self, field: SessionField, value: impl Into<String>) {
        let slot = match field {
            SessionField::Name => &mut self.name,
            SessionField::Goal => &mut self.goal,
            SessionField::Timeline => &mut self.timeline,
        };
        *slot = Some(value.into());
    }

    /// Append a turn to the history.
    pub fn record(&mut self, turn: Turn) {
        self.history.push(turn);
    }
}

/// A live, lockable session. Hold the lock for the duration of a turn.
pub type SharedSession = Arc<Mutex<Session>>;

/// Keyed session storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Return the session for `id`, creating an empty one if absent.
    async fn get_or_create(&self, id: &str) -> Result<SharedSession, StoreError>;

    /// Snapshot of the session for `id`, if it exists. Never creates.
    async fn get(&self, id: &str) -> Result<Option<Session>, StoreError>;

    /// Overwrite one field, creating the session if absent.
    async fn upsert_field(
        &self,
        id: &str,
        field: SessionField,
        value: String,
    ) -> Result<(), StoreError>;

    /// Append a turn to the history, creating the session if absent.
    async fn append_history(&self, id: &str, turn: Turn) -> Result<(), StoreError>;
}

/// Process-lifetime session store. No expiry, no eviction.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SharedSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of sessions held.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: &str) -> Result<SharedSession, StoreError> {
        if let Some(session) = self.sessions.read().await.get(id) {
            return Ok(Arc::clone(session));
        }

        let mut sessions = self.sessions.write().await;
        // Another request may have created it between the two locks.
        let session = sessions.entry(id.to_string()).or_insert_with(|| {
            debug!(session_id = %id, "Creating session");
            Arc::new(Mutex::new(Session::default()))
        });
        Ok(Arc::clone(session))
    }

    async fn get(&self, id: &str) -> Result<Option<Session>, StoreError> {
        let shared = self.sessions.read().await.get(id).cloned();
        match shared {
            Some(session) => Ok(Some(session.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn upsert_field(
        &self,
        id: &str,
        field: SessionField,
        value: String,
    ) -> Result<(), StoreError> {
        let session = self.get_or_create(id).await?;
        session.lock().await.set(field, value);
        Ok(())
    }

    async fn append_history(&self, id: &str, turn: Turn) -> Result<(), StoreError> {
        let session = self.get_or_create(id).await?;
        session.lock().await.record(turn);
        Ok(())
    }
}
