//! IntakeService: prime and chat operations over an injected session store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::engine::{ChatReply, DialogueEngine};
use super::session::{SessionField, SessionStore};
use super::stage::Stage;
use crate::error::StoreError;

/// Body of a prime request.
#[derive(Debug, Clone, Deserialize)]
pub struct PrimeRequest {
    pub session_id: String,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
}

/// Body of a prime response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimeResponse {
    pub ok: bool,
}

/// Body of a chat request.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Coordinates the session store and the dialogue engine.
pub struct IntakeService {
    store: Arc<dyn SessionStore>,
    engine: DialogueEngine,
}

impl IntakeService {
    pub fn new(store: Arc<dyn SessionStore>, engine: DialogueEngine) -> Self {
        Self { store, engine }
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Pre-populate goal and/or timeline. Creates the session if absent and
    /// overwrites any non-empty value supplied. Name and history are untouched.
    pub async fn prime(&self, req: PrimeRequest) -> Result<PrimeResponse, StoreError> {
        self.store.get_or_create(&req.session_id).await?;

        for (field, value) in [
            (SessionField::Goal, req.goal),
            (SessionField::Timeline, req.timeline),
        ] {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                debug!(session_id = %req.session_id, ?field, "Priming field");
                self.store.upsert_field(&req.session_id, field, value).await?;
            }
        }

        Ok(PrimeResponse { ok: true })
    }

    /// Run one chat turn. The session lock is held for the whole turn so
    /// concurrent turns on the same id apply one after the other.
    pub async fn chat(&self, req: ChatRequest) -> Result<ChatReply, StoreError> {
        let shared = self.store.get_or_create(&req.session_id).await?;
        let mut session = shared.lock().await;
        let reply = self.engine.respond(&mut session, &req.message);
        info!(
            session_id = %req.session_id,
            escalation = reply.escalation,
            stage = %Stage::of(&session),
            turns = session.history.len(),
            "Chat turn handled"
        );
        Ok(reply)
    }
}
