use crate::types::Intent;

/// Keywords per intent, matched as whole words, case-insensitively
pub(crate) const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Feature,
        &["add", "create", "implement", "build", "new", "feature", "features"],
    ),
    (
        Intent::Bugfix,
        &[
            "fix", "bug", "bugs", "broken", "error", "errors", "issue", "issues", "crash",
        ],
    ),
    (
        Intent::Refactor,
        &[
            "refactor",
            "improve",
            "optimize",
            "clean",
            "restructure",
            "reorganize",
        ],
    ),
    (
        Intent::Documentation,
        &["document", "docs", "readme", "guide", "comment", "comments"],
    ),
    (
        Intent::Test,
        &[
            "test",
            "tests",
            "spec",
            "specs",
            "testing",
            "coverage",
            "unit",
            "integration",
        ],
    ),
];

/// Feature keywords that name the work itself rather than a generic action
pub(crate) const FEATURE_NOUNS: &[&str] = &["feature", "features"];

/// Verbs that describe the action, never the area of the codebase
pub(crate) const ACTION_VERBS: &[&str] = &[
    "add",
    "create",
    "implement",
    "build",
    "fix",
    "improve",
    "optimize",
    "clean",
    "restructure",
    "reorganize",
    "document",
];

pub(crate) const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "should", "could", "may", "might", "must", "can", "this",
    "that", "these", "those",
];

pub(crate) fn is_stop_word(token: &str) -> bool {
    contains_ignore_case(STOP_WORDS, token)
}

pub(crate) fn is_action_verb(token: &str) -> bool {
    contains_ignore_case(ACTION_VERBS, token)
}

fn contains_ignore_case(words: &[&str], token: &str) -> bool {
    words.iter().any(|w| w.eq_ignore_ascii_case(token))
}
