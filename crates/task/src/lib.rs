//! # Scope Task
//!
//! Turns a free-text development task ("Fix authentication bug") into a
//! [`TaskDescription`]: an [`Intent`] plus an ordered, deduplicated list of
//! scope keywords.
//!
//! Everything here is deterministic keyword matching; there is no model.
//!
//! ```rust
//! use scope_task::{parse_task_description, Intent};
//!
//! let task = parse_task_description("Add unit tests for the tokenizer").unwrap();
//! assert_eq!(task.intent, Intent::Test);
//! assert_eq!(task.scope, vec!["unit", "tests", "tokenizer"]);
//! ```

mod error;
mod intent;
mod parser;
mod scope;
mod types;
mod vocabulary;

pub use error::{Result, TaskError};
pub use intent::{extract_intent, intent_matches, IntentMatch};
pub use parser::{parse_task_description, MAX_DESCRIPTION_CHARS};
pub use scope::identify_scope;
pub use types::{Intent, TaskDescription};
