//! Event rules presentation
//!
//! Splits an event's free-text rules into items and picks an icon for each
//! from an ordered keyword table. The first matching entry wins, so the
//! table order decides the icon when a rule mentions several keywords.

use serde::{Deserialize, Serialize};
use crate::utils::helpers::{normalize_whitespace, strip_list_marker};

/// Icon shown next to a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleIcon {
    Users,
    Clock,
    Upload,
    Code,
    Shield,
    Award,
    Trophy,
    Info,
}

/// Ordered (keywords, icon) table
const ICON_TABLE: &[(&[&str], RuleIcon)] = &[
    (&["team"], RuleIcon::Users),
    (&["time", "deadline", "hour"], RuleIcon::Clock),
    (&["submit", "submission"], RuleIcon::Upload),
    (&["code", "repository", "github"], RuleIcon::Code),
    (&["plagiarism", "original"], RuleIcon::Shield),
    (&["judge", "score", "evaluation"], RuleIcon::Award),
    (&["prize"], RuleIcon::Trophy),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleItem {
    pub text: String,
    pub icon: RuleIcon,
}

/// Pick the icon for a single rule, case-insensitively
pub fn icon_for_rule(rule: &str) -> RuleIcon {
    let lowered = rule.to_lowercase();

    ICON_TABLE
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, icon)| *icon)
        .unwrap_or(RuleIcon::Info)
}

/// Parse free-text rules into display items. Absent or blank rules yield no items.
pub fn parse_rules(rules: Option<&str>) -> Vec<RuleItem> {
    let Some(rules) = rules else {
        return Vec::new();
    };

    rules
        .lines()
        .map(strip_list_marker)
        .map(normalize_whitespace)
        .filter(|line| !line.is_empty())
        .map(|text| RuleItem {
            icon: icon_for_rule(&text),
            text,
        })
        .collect()
}
