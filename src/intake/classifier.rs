//! Advice gate: decides whether a message asks for regulated credit advice.
//!
//! Runs before any stage logic on every message. A match escalates to a human
//! broker regardless of how far the intake has progressed.

use serde::Serialize;

/// Phrases that signal a request for credit advice.
pub const ADVICE_KEYWORDS: &[&str] = &[
    "best loan",
    "which bank",
    "which lender",
    "recommend",
    "rate",
    "interest rate",
    "serviceability",
    "can i borrow",
    "how much can i borrow",
    "compare lenders",
    "is this suitable",
];

/// Outcome of classifying a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Hand off to a human broker.
    Escalate,
    /// Continue the scripted intake.
    Freeform,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Escalate => write!(f, "escalate"),
            Self::Freeform => write!(f, "freeform"),
        }
    }
}

/// Case-insensitive keyword gate.
#[derive(Debug, Clone)]
pub struct AdvicePolicy {
    /// Lower-cased trigger phrases.
    phrases: Vec<String>,
}

impl AdvicePolicy {
    /// Build a policy from arbitrary trigger phrases.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Classify a message. Pure; no side effects.
    pub fn classify(&self, message: &str) -> Intent {
        self.matched_phrase(message)
            .map_or(Intent::Freeform, |_| Intent::Escalate)
    }

    /// The first trigger phrase contained in the message, if any.
    pub fn matched_phrase(&self, message: &str) -> Option<&str> {
        let lower = message.to_lowercase();
        self.phrases
            .iter()
            .find(|p| lower.contains(p.as_str()))
            .map(String::as_str)
    }
}

impl Default for AdvicePolicy {
    fn default() -> Self {
        Self::new(ADVICE_KEYWORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advice_phrases_escalate() {
        let policy = AdvicePolicy::default();
        for msg in [
            "What's the BEST LOAN for me?",
            "which lender should I use",
            "How much can I borrow?",
            "can you recommend something",
            "Is this suitable for me",
            "what interest rate would I get",
        ] {
            assert_eq!(policy.classify(msg), Intent::Escalate, "{msg}");
        }
    }

    #[test]
    fn ordinary_messages_pass() {
        let policy = AdvicePolicy::default();
        for msg in ["I'm Alex", "First home", "Refinance", "ASAP", "start", ""] {
            assert_eq!(policy.classify(msg), Intent::Freeform, "{msg}");
        }
    }

    #[test]
    fn substring_match_is_literal() {
        // "rate" is a bare keyword, so any word containing it trips the gate.
        let policy = AdvicePolicy::default();
        assert_eq!(policy.classify("I'll separate my accounts"), Intent::Escalate);
        assert_eq!(policy.matched_phrase("separately"), Some("rate"));
    }

    #[test]
    fn custom_phrases_are_case_folded() {
        let policy = AdvicePolicy::new(["Tax Advice", ""]);
        assert_eq!(policy.classify("need tax advice"), Intent::Escalate);
        assert_eq!(policy.classify("anything"), Intent::Freeform);
    }

    #[test]
    fn display_matches_serde() {
        for intent in [Intent::Escalate, Intent::Freeform] {
            let json = serde_json::to_string(&intent).unwrap();
            assert_eq!(format!("\"{intent}\""), json);
        }
    }
}
