use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskError>;

/// Reasons a raw task description is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Invalid task description: description is empty")]
    Empty,

    #[error("Invalid task description: {len} characters exceeds the limit of {max}")]
    TooLong { len: usize, max: usize },

    #[error("Invalid task description: must contain at least one letter or digit")]
    NoAlphanumeric,
}
