use crate::vocabulary::{is_action_verb, is_stop_word};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("Invalid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid regex"));
static CAMEL_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z][A-Z]").expect("Invalid regex"));

/// Extract the keywords that identify which part of the codebase a task is
/// about. Tokens keep their original spelling; duplicates are dropped while
/// keeping first-occurrence order.
pub fn identify_scope(text: &str) -> Vec<String> {
    let normalized = NON_WORD.replace_all(text, " ");
    let normalized = WHITESPACE.replace_all(&normalized, " ");

    let mut candidates: Vec<&str> = Vec::new();
    for token in normalized.split_whitespace() {
        candidates.push(token);
        // camelCase identifiers get a second, explicit entry
        if CAMEL_CASE.is_match(token) {
            candidates.push(token);
        }
    }

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|token| !is_stop_word(token))
        .filter(|token| !is_action_verb(token))
        .filter(|token| token.chars().count() >= 2 && token.chars().any(char::is_alphabetic))
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_punctuation_stop_words_and_action_verbs() {
        assert_eq!(
            identify_scope("Fix the authentication bug in login.ts!"),
            vec!["authentication", "bug", "login", "ts"]
        );
    }

    #[test]
    fn camel_case_tokens_survive_once() {
        assert_eq!(
            identify_scope("Refactor getUserById and getUserById callers"),
            vec!["Refactor", "getUserById", "callers"]
        );
    }

    #[test]
    fn drops_short_and_numeric_tokens() {
        assert_eq!(
            identify_scope("Add 2 x buttons v2 to 404 page"),
            vec!["buttons", "v2", "page"]
        );
    }

    #[test]
    fn stop_word_matching_ignores_case() {
        assert_eq!(identify_scope("The Cache AND The Store"), vec!["Cache", "Store"]);
    }

    #[test]
    fn dedup_is_case_sensitive() {
        assert_eq!(identify_scope("auth Auth auth"), vec!["auth", "Auth"]);
    }

    #[test]
    fn empty_and_stop_word_only_inputs_yield_empty_scope() {
        assert!(identify_scope("").is_empty());
        assert!(identify_scope("the and of a").is_empty());
        assert!(identify_scope("add create fix").is_empty());
    }

    #[test]
    fn underscores_are_word_characters() {
        assert_eq!(identify_scope("fix user_session.ts"), vec!["user_session", "ts"]);
    }
}
