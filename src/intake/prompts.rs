//! Reply texts and quick-reply chip sets for each point in the intake.

use super::extract::{GOAL_OPTIONS, TIMELINE_OPTIONS};

pub const ESCALATION_CHIPS: &[&str] = &["Book a broker call", "Not now"];
pub const ASK_NAME_CHIPS: &[&str] = &["I'm Alex", "My name is Sam"];
pub const ASSIST_CHIPS: &[&str] = &[
    "What documents do I need?",
    "What's the process?",
    "Book a broker call",
];
pub const FALLBACK_CHIPS: &[&str] = &["I'm Alex", "First home", "Refinance"];

pub const ESCALATION_REPLY: &str = "I can't provide credit advice here. I can connect you with a \
Finspo broker who'll act in your Best Interests. Would you like me to arrange a quick call?";

pub const ASK_NAME_REPLY: &str = "Hi! I'm **Finny the Peacock**. To personalise things, what's \
your first name? You can say, for example: **I'm Alex**.";

pub const ASK_TIMELINE_REPLY: &str = "Great. When are you hoping to move ahead?";

pub const FALLBACK_REPLY: &str = "I can help with general questions about the process and \
documents, or get you set up in the portal. Tell me your first name to begin (e.g., **I'm Alex**).";

/// Chips offered while asking for the goal.
pub fn goal_chips() -> &'static [&'static str] {
    GOAL_OPTIONS
}

/// Chips offered while asking for the timeline.
pub fn timeline_chips() -> &'static [&'static str] {
    TIMELINE_OPTIONS
}

/// Greeting that asks what the user is here for.
pub fn ask_goal(name: &str) -> String {
    format!("Nice to meet you, {name}! What brings you in today?")
}

/// Summary of the collected fields plus the document checklist.
pub fn assist(name: &str, goal: &str, timeline: &str, checklist: &[&str]) -> String {
    let bullets = checklist
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Thanks {name}, got it: **{goal}**, timeline **{timeline}**.\n\n\
         Here's a quick document checklist to fast-track things:\n{bullets}\n\n\
         I can also walk you through the process, share portal setup steps, or connect you \
         with a broker when you're ready."
    )
}
