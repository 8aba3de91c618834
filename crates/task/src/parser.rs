use crate::error::{Result, TaskError};
use crate::intent::extract_intent;
use crate::scope::identify_scope;
use crate::types::TaskDescription;

/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 10_000;

/// Validate a raw task sentence and derive its intent and scope
pub fn parse_task_description(raw: &str) -> Result<TaskDescription> {
    let sanitized = validate(raw)?;

    let intent = extract_intent(sanitized);
    let scope = identify_scope(sanitized);
    log::debug!("Parsed task: intent={intent}, scope={scope:?}");

    Ok(TaskDescription {
        title: sanitized.to_string(),
        description: sanitized.to_string(),
        intent,
        scope,
    })
}

/// Returns the trimmed description.
///
/// Over-long input is reported as too long even when it is only whitespace.
fn validate(raw: &str) -> Result<&str> {
    if raw.is_empty() {
        return Err(TaskError::Empty);
    }

    let len = raw.chars().count();
    if len > MAX_DESCRIPTION_CHARS {
        return Err(TaskError::TooLong {
            len,
            max: MAX_DESCRIPTION_CHARS,
        });
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskError::Empty);
    }

    if !trimmed.chars().any(char::is_alphanumeric) {
        return Err(TaskError::NoAlphanumeric);
    }

    Ok(trimmed)
}
