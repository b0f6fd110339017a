//! Field extractors: pull a name, goal, or timeline out of free text.
//!
//! Each extractor is a pure function returning `None` when nothing usable is
//! found. The caller re-prompts on `None`; extractors never guess.

use std::sync::LazyLock;

use regex::Regex;

/// Goals offered to the user, in match priority order.
pub const GOAL_OPTIONS: &[&str] = &["First home", "Refinance", "Investor", "Upgrade", "Construction"];

/// Timelines offered to the user, in match priority order.
pub const TIMELINE_OPTIONS: &[&str] = &[
    "ASAP (0–1 month)",
    "Soon (1–3 months)",
    "Planning (3–6 months)",
    "Exploring (6+ months)",
];

/// Whole messages that are never taken as a name.
pub const RESERVED_WORDS: &[&str] = &["start"];

/// "I am …", "I'm …", "my name is …" followed by the name text.
static INTRODUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:i\s*am|i['’]m|my name is)\s+([A-Za-z][A-Za-z\-\s']{1,40})")
        .expect("introduction pattern is valid")
});

/// A message that is nothing but a single name-like token.
static BARE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[A-Za-z][A-Za-z\-']{1,19}\z").expect("bare name pattern is valid")
});

/// Extract a first name from a message.
pub fn extract_name(message: &str) -> Option<String> {
    let text = message.trim();
    if RESERVED_WORDS.iter().any(|w| text.eq_ignore_ascii_case(w)) {
        return None;
    }

    if let Some(caps) = INTRODUCTION.captures(text) {
        return caps
            .get(1)
            .and_then(|m| m.as_str().split_whitespace().next())
            .map(capitalize);
    }

    BARE_NAME.is_match(text).then(|| capitalize(text))
}

/// Extract a goal: the first option whose first word appears in the message.
pub fn extract_goal(message: &str) -> Option<&'static str> {
    first_matching_option(message, GOAL_OPTIONS, false)
}

/// Extract a timeline: the first option whose first word or full label
/// appears in the message.
pub fn extract_timeline(message: &str) -> Option<&'static str> {
    first_matching_option(message, TIMELINE_OPTIONS, true)
}

fn first_matching_option<'a>(
    message: &str,
    options: &[&'a str],
    match_full_label: bool,
) -> Option<&'a str> {
    let lower = message.to_lowercase();
    options.iter().copied().find(|option| {
        let label = option.to_lowercase();
        let first_word = label.split_whitespace().next().unwrap_or_default();
        (!first_word.is_empty() && lower.contains(first_word))
            || (match_full_label && lower.contains(&label))
    })
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
