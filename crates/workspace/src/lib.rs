//! # Scope Workspace
//!
//! Whole-workspace structural map: file inventory, import dependencies and a
//! function/class pattern index.
//!
//! ## Architecture
//!
//! ```text
//! Workspace root
//!     │
//!     ├──> FileDiscovery (GlobScanner: include/exclude globs)
//!     │
//!     ├──> Per-file pass (bounded, order-preserving)
//!     │    read ──> classify kind ──> parse + extract (sources only)
//!     │    └─> FileRecord (degraded on read/parse failure)
//!     │
//!     ├──> dependencies (files with at least one import)
//!     │
//!     └──> PatternCollector (second pass: functions, classes)
//!          └─> WorkspaceAnalysis, cached per root
//! ```
//!
//! Per-file failures are logged and absorbed; only a missing root is an
//! error.

mod analyzer;
mod config;
mod error;
mod patterns;
mod pool;
mod reader;
mod scanner;
mod stats;
mod types;

pub use analyzer::{WorkspaceAnalyzer, WorkspaceAnalyzerBuilder};
pub use config::{
    default_concurrency, parse_concurrency, AnalyzerConfig, DEFAULT_EXCLUDE, DEFAULT_INCLUDE,
    MAX_ANALYZE_CONCURRENCY,
};
pub use error::{Result, WorkspaceError};
pub use patterns::PatternCollector;
pub use reader::{guard_path, FileReader, FsReader};
pub use scanner::{FileDiscovery, GlobScanner};
pub use stats::AnalysisStats;
pub use types::{CodePattern, FileKind, FileRecord, PatternKind, WorkspaceAnalysis};
