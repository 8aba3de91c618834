use serde::{Deserialize, Serialize};

/// Upper bound for concurrent per-file read/parse tasks
pub const MAX_ANALYZE_CONCURRENCY: usize = 32;

/// Primary/secondary sources, data and documentation
pub const DEFAULT_INCLUDE: &str = "**/*.{ts,tsx,mts,cts,js,jsx,mjs,cjs,json,md,mdx}";

/// Dependency caches, version control and build output
pub const DEFAULT_EXCLUDE: &str =
    "**/{node_modules,bower_components,.git,.hg,.svn,dist,build,out,target,coverage,.next}/**";

/// Configuration for workspace scanning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Glob patterns (relative to the root) a file must match
    pub include: Vec<String>,

    /// Glob patterns (relative to the root) that exclude a file
    pub exclude: Vec<String>,

    /// Maximum files read and parsed at the same time
    pub max_concurrency: usize,

    /// Treat sources with syntax errors as unparsable
    pub strict_syntax: bool,

    /// Skip files ignored by `.gitignore`
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            include: vec![DEFAULT_INCLUDE.to_string()],
            exclude: vec![DEFAULT_EXCLUDE.to_string()],
            max_concurrency: default_concurrency(),
            strict_syntax: true,
            respect_gitignore: false,
        }
    }
}

impl AnalyzerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.include.iter().all(|p| p.trim().is_empty()) {
            return Err("include must contain at least one glob pattern".to_string());
        }

        if self.max_concurrency == 0 {
            return Err("max_concurrency must be > 0".to_string());
        }

        if self.max_concurrency > MAX_ANALYZE_CONCURRENCY {
            return Err(format!(
                "max_concurrency ({}) cannot exceed {MAX_ANALYZE_CONCURRENCY}",
                self.max_concurrency
            ));
        }

        Ok(())
    }
}

pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(1, 8)
}

/// Parse a concurrency override, falling back to `default_value` on garbage
pub fn parse_concurrency(raw: Option<&str>, default_value: usize) -> usize {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default_value)
        .clamp(1, MAX_ANALYZE_CONCURRENCY)
}
