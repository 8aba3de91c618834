use crate::types::FileKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Workspace scan statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisStats {
    /// Number of files recorded in the analysis
    pub files: usize,

    /// Recorded files per kind
    pub kinds: BTreeMap<FileKind, usize>,

    /// Files recorded without imports/exports (unreadable or unparsable)
    pub degraded: usize,

    /// Files that vanished between discovery and reading
    pub dropped: usize,

    pub dependencies: usize,

    pub patterns: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Per-file failures, `path: reason`
    pub errors: Vec<String>,
}

impl AnalysisStats {
    pub fn new() -> Self {
        Self {
            files: 0,
            kinds: BTreeMap::new(),
            degraded: 0,
            dropped: 0,
            dependencies: 0,
            patterns: 0,
            time_ms: 0,
            errors: Vec::new(),
        }
    }

    pub fn add_file(&mut self, kind: FileKind) {
        self.files += 1;
        *self.kinds.entry(kind).or_insert(0) += 1;
    }

    pub fn add_degraded(&mut self, error: String) {
        self.degraded += 1;
        self.errors.push(error);
    }

    pub fn add_dropped(&mut self, error: String) {
        self.dropped += 1;
        self.errors.push(error);
    }
}

impl Default for AnalysisStats {
    fn default() -> Self {
        Self::new()
    }
}
