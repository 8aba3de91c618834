use crate::types::Intent;
use crate::vocabulary::{FEATURE_NOUNS, INTENT_KEYWORDS};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// One whole-word keyword hit inside a task description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentMatch {
    /// Keyword as written in the input
    pub keyword: String,
    /// Byte offset of the keyword in the input
    pub offset: usize,
    pub intent: Intent,
}

static INTENT_PATTERNS: Lazy<Vec<(Intent, Regex)>> = Lazy::new(|| {
    INTENT_KEYWORDS
        .iter()
        .map(|(intent, words)| {
            let pattern = format!(r"(?i)\b(?:{})\b", words.join("|"));
            (*intent, Regex::new(&pattern).expect("Invalid regex"))
        })
        .collect()
});

/// All keyword hits, ordered by position in the input
pub fn intent_matches(text: &str) -> Vec<IntentMatch> {
    let mut matches: Vec<IntentMatch> = INTENT_PATTERNS
        .iter()
        .flat_map(|(intent, re)| {
            re.find_iter(text).map(move |m| IntentMatch {
                keyword: m.as_str().to_string(),
                offset: m.start(),
                intent: *intent,
            })
        })
        .collect();
    matches.sort_by_key(|m| m.offset);
    matches
}

/// Classify a task description into one of the five intents.
///
/// - no keyword hit: `Feature`
/// - hits for a single intent: that intent
/// - exactly one non-feature intent, and the feature hits are only action
///   verbs ("add unit tests"): the non-feature intent
/// - otherwise the intent of the earliest hit
pub fn extract_intent(text: &str) -> Intent {
    let matches = intent_matches(text);
    let Some(first) = matches.first() else {
        return Intent::Feature;
    };

    let intents: BTreeSet<Intent> = matches.iter().map(|m| m.intent).collect();
    if intents.len() == 1 {
        return first.intent;
    }

    let specific: Vec<Intent> = intents
        .iter()
        .copied()
        .filter(|intent| *intent != Intent::Feature)
        .collect();
    let names_feature = matches.iter().any(|m| {
        m.intent == Intent::Feature
            && FEATURE_NOUNS
                .iter()
                .any(|noun| noun.eq_ignore_ascii_case(&m.keyword))
    });

    if specific.len() == 1 && !names_feature {
        return specific[0];
    }

    first.intent
}
