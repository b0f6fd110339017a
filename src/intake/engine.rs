//! Dialogue engine: one user message in, one reply out.
//!
//! Per turn:
//! 1. Log the message to history.
//! 2. Run the advice gate; a match escalates and ends the turn.
//! 3. Derive the stage and try to fill its field from the message.
//! 4. On a fill, re-derive the stage and offer the *same* message to the
//!    next stage's extractor; on a miss, re-prompt and stop.
//! 5. Once every field is filled, reply with the document checklist.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::checklist;
use super::classifier::{AdvicePolicy, Intent};
use super::extract::{extract_goal, extract_name, extract_timeline};
use super::prompts;
use super::session::{Session, SessionField, Turn};
use super::stage::Stage;

/// Reply to a single chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    #[serde(default)]
    pub escalation: bool,
    #[serde(default)]
    pub chips: Vec<String>,
}

impl ChatReply {
    fn new(reply: impl Into<String>, chips: &[&str]) -> Self {
        Self {
            reply: reply.into(),
            escalation: false,
            chips: chips.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn escalation() -> Self {
        Self {
            escalation: true,
            ..Self::new(prompts::ESCALATION_REPLY, prompts::ESCALATION_CHIPS)
        }
    }
}

/// Drives the scripted intake over a session.
#[derive(Debug, Clone, Default)]
pub struct DialogueEngine {
    policy: AdvicePolicy,
}

impl DialogueEngine {
    pub fn new(policy: AdvicePolicy) -> Self {
        Self { policy }
    }

    /// Process one user message against a session, mutating it in place.
    ///
    /// The caller must hold the session exclusively for the whole call.
    pub fn respond(&self, session: &mut Session, message: &str) -> ChatReply {
        let message = message.trim();
        session.record(Turn::user(message));

        if let Some(phrase) = self.policy.matched_phrase(message) {
            info!(intent = %Intent::Escalate, %phrase, "Escalating advice request");
            // Escalation replies are not logged to history.
            return ChatReply::escalation();
        }

        let mut stage = Stage::of(session);
        debug!(%stage, "Handling intake turn");

        if stage == Stage::AskName {
            match extract_name(message) {
                Some(name) => stage = commit(session, stage, name),
                None => return ChatReply::new(prompts::ASK_NAME_REPLY, prompts::ASK_NAME_CHIPS),
            }
        }

        if stage == Stage::AskGoal {
            match extract_goal(message) {
                Some(goal) => stage = commit(session, stage, goal),
                None => {
                    let name = session.field(SessionField::Name).unwrap_or_default();
                    return ChatReply::new(prompts::ask_goal(name), prompts::goal_chips());
                }
            }
        }

        if stage == Stage::AskTimeline {
            match extract_timeline(message) {
                Some(timeline) => stage = commit(session, stage, timeline),
                None => {
                    return ChatReply::new(prompts::ASK_TIMELINE_REPLY, prompts::timeline_chips());
                }
            }
        }

        if stage == Stage::Assist {
            let goal = session.field(SessionField::Goal);
            let reply = prompts::assist(
                session.field(SessionField::Name).unwrap_or_default(),
                goal.unwrap_or("(goal not set)"),
                session.field(SessionField::Timeline).unwrap_or("(timeline not set)"),
                checklist::resolve(goal),
            );
            session.record(Turn::assistant(reply.clone()));
            return ChatReply::new(reply, prompts::ASSIST_CHIPS);
        }

        ChatReply::new(prompts::FALLBACK_REPLY, prompts::FALLBACK_CHIPS)
    }
}

/// Store the value for `from`'s field and return the freshly derived stage.
fn commit(session: &mut Session, from: Stage, value: impl Into<String>) -> Stage {
    let value = value.into();
    if let Some(field) = from.field() {
        debug!(stage = %from, ?field, %value, "Committed intake field");
        session.set(field, value);
    }
    let next = Stage::of(session);
    debug_assert!(next > from, "intake stage must only move forward");
    next
}
