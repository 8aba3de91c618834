use scope_task::TaskError;
use scope_workspace::WorkspaceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the caller passed a task description that failed validation
    pub fn is_invalid_task(&self) -> bool {
        matches!(self, Self::Task(_))
    }
}
