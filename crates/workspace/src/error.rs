use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorkspaceError>;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("No workspace root: pass a root path or configure a default workspace")]
    NoWorkspace,

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: scope_structure::StructureError,
    },

    #[error("Not a TypeScript/JavaScript source file: {}", path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("Path rejected ({reason}): {path}")]
    PathRejected { path: String, reason: &'static str },

    #[error("File discovery failed: {0}")]
    Discovery(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
