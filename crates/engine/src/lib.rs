//! # Scope Engine
//!
//! Answers "which files matter for this task?" for a TypeScript/JavaScript
//! workspace.
//!
//! ## Architecture
//!
//! ```text
//! "Fix authentication bug"          workspace root
//!     │                                  │
//!     ▼                                  ▼
//! scope-task                        scope-workspace (cached)
//! intent + scope keywords           files, dependencies, patterns
//!     │                                  │
//!     └──────────────┬───────────────────┘
//!                    ▼
//!           relevance::rank
//!           (name 10, path 5, import 3, export 3 per keyword)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use scope_engine::{EngineConfig, ScopeEngine};
//! use std::path::Path;
//!
//! # async fn demo() -> scope_engine::Result<()> {
//! let engine = ScopeEngine::new(EngineConfig::load(None)?)?;
//! let task = engine.parse_task_description("Fix authentication bug")?;
//! let files = engine
//!     .find_relevant_files(&task, Some(Path::new("./my-app")))
//!     .await?;
//! for file in files.iter().take(5) {
//!     println!("{}", file.path.display());
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod engine;
mod error;
pub mod relevance;

pub use config::{EngineConfig, ENV_MAX_CONCURRENCY, ENV_STRICT_SYNTAX, ENV_WORKSPACE_ROOT};
pub use engine::ScopeEngine;
pub use error::{EngineError, Result};
pub use relevance::{rank, rank_scored, score, ScoreWeights, ScoredFile};

pub use scope_structure::CodeStructure;
pub use scope_task::{Intent, TaskDescription, TaskError};
pub use scope_workspace::{
    AnalysisStats, AnalyzerConfig, CodePattern, FileKind, FileRecord, PatternKind,
    WorkspaceAnalysis, WorkspaceError,
};
