//! Intake flow: scripted mortgage-broking intake conversation.
//!
//! Each chat turn is first checked against the advice gate; anything that
//! looks like a request for credit advice escalates to a human broker.
//! Otherwise the dialogue engine collects name, goal, and timeline in order
//! and finishes with a document checklist for the stated goal.

pub mod checklist;
pub mod classifier;
pub mod engine;
pub mod extract;
pub mod prompts;
pub mod routes;
pub mod service;
pub mod session;
pub mod stage;

pub use classifier::{AdvicePolicy, Intent};
pub use engine::{ChatReply, DialogueEngine};
pub use routes::{IntakeRouteState, intake_routes};
pub use service::{ChatRequest, IntakeService, PrimeRequest, PrimeResponse};
pub use session::{InMemorySessionStore, Session, SessionField, SessionStore, Turn};
pub use stage::Stage;
