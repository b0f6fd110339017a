//! Intake stages: derived from which session fields are filled.
//!
//! The stage is never stored. It is recomputed from the session on every
//! turn, so a session primed out-of-band always lands on the right stage.

use serde::{Deserialize, Serialize};

use super::session::{Session, SessionField};

/// The steps of the intake conversation.
///
/// Progresses linearly: AskName → AskGoal → AskTimeline → Assist.
/// Variants are declared in progression order, so `Ord` follows the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AskName,
    AskGoal,
    AskTimeline,
    Assist,
}

impl Stage {
    /// Derive the stage from a session snapshot: the first missing field
    /// decides, and a fully filled session is in `Assist`.
    pub fn of(session: &Session) -> Self {
        if !session.has(SessionField::Name) {
            Self::AskName
        } else if !session.has(SessionField::Goal) {
            Self::AskGoal
        } else if !session.has(SessionField::Timeline) {
            Self::AskTimeline
        } else {
            Self::Assist
        }
    }

    /// The field this stage collects, if any.
    pub fn field(&self) -> Option<SessionField> {
        match self {
            Self::AskName => Some(SessionField::Name),
            Self::AskGoal => Some(SessionField::Goal),
            Self::AskTimeline => Some(SessionField::Timeline),
            Self::Assist => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AskName => "ask_name",
            Self::AskGoal => "ask_goal",
            Self::AskTimeline => "ask_timeline",
            Self::Assist => "assist",
        };
        write!(f, "{s}")
    }
}
