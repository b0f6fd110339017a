//! Document checklists keyed by goal category.

/// Category used when no named category matches.
pub const DEFAULT_CATEGORY: &str = "default";

/// Named categories in lookup order. Keys are lower-case.
pub const CHECKLISTS: &[(&str, &[&str])] = &[
    (
        "first home",
        &[
            "Photo ID (passport/driver licence)",
            "Income docs: last 2 payslips OR last 2 tax returns (self-employed)",
            "Bank statements (last 3 months)",
            "Savings history & deposit amount",
            "Property details (if found)",
        ],
    ),
    (
        "refinance",
        &[
            "Photo ID",
            "Income docs: payslips/tax returns",
            "Recent home loan statement(s)",
            "Rates notice / insurance",
            "Bank statements (last 3 months)",
        ],
    ),
    (
        "investor",
        &[
            "Photo ID",
            "Income docs + rental income statements",
            "Existing loan statements",
            "Bank statements (last 3 months)",
            "Property portfolio details",
        ],
    ),
    (
        "upgrade",
        &[
            "Photo ID",
            "Income docs",
            "Current mortgage statements",
            "Estimated sale price / equity",
            "Property preferences",
        ],
    ),
    (
        "construction",
        &[
            "Photo ID",
            "Income docs",
            "Bank statements (last 3 months)",
            "Land contract & build contract",
            "Plans & specifications (if available)",
        ],
    ),
];

/// Fallback list for goals outside the named categories.
pub const DEFAULT_CHECKLIST: &[&str] = &[
    "Photo ID",
    "Income docs: payslips/tax returns",
    "Bank statements (last 3 months)",
    "Property details (if available)",
];

fn find(goal: Option<&str>) -> Option<(&'static str, &'static [&'static str])> {
    let key = goal.unwrap_or_default().to_lowercase();
    CHECKLISTS
        .iter()
        .copied()
        .find(|(category, _)| key.contains(category))
}

/// The category key a goal resolves to.
pub fn category_for(goal: Option<&str>) -> &'static str {
    find(goal).map_or(DEFAULT_CATEGORY, |(category, _)| category)
}

/// Resolve the document checklist for a goal.
///
/// The goal only has to contain a category key; the first key found in
/// lookup order wins. Anything else, including no goal, gets the default.
pub fn resolve(goal: Option<&str>) -> &'static [&'static str] {
    find(goal).map_or(DEFAULT_CHECKLIST, |(_, items)| items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_goal_option_has_a_category() {
        for goal in crate::intake::extract::GOAL_OPTIONS {
            assert_ne!(category_for(Some(goal)), DEFAULT_CATEGORY, "{goal}");
        }
    }

    #[test]
    fn first_home_list() {
        let items = resolve(Some("First home"));
        assert_eq!(items.len(), 5);
        assert_eq!(items[0], "Photo ID (passport/driver licence)");
        assert_eq!(items[4], "Property details (if found)");
    }

    #[test]
    fn containment_is_case_insensitive() {
        assert_eq!(category_for(Some("Looking to REFINANCE soon")), "refinance");
        assert_eq!(resolve(Some("Looking to REFINANCE soon"))[2], "Recent home loan statement(s)");
    }

    #[test]
    fn unknown_or_missing_goal_uses_default() {
        assert_eq!(resolve(None), DEFAULT_CHECKLIST);
        assert_eq!(resolve(Some("")), DEFAULT_CHECKLIST);
        assert_eq!(resolve(Some("holiday home")), DEFAULT_CHECKLIST);
        assert_eq!(category_for(Some("holiday home")), DEFAULT_CATEGORY);
    }

    #[test]
    fn lookup_order_breaks_ties() {
        assert_eq!(category_for(Some("refinance then upgrade")), "refinance");
        assert_eq!(category_for(Some("upgrade or first home")), "first home");
    }

    #[test]
    fn resolution_is_deterministic() {
        let a = resolve(Some("Investor"));
        let b = resolve(Some("Investor"));
        assert_eq!(a, b);
        assert!(std::ptr::eq(a, b));
    }
}
