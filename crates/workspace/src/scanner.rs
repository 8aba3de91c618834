use crate::config::AnalyzerConfig;
use crate::error::{Result, WorkspaceError};
use crate::types::relative_location;
use async_trait::async_trait;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Finds candidate files under a workspace root
#[async_trait]
pub trait FileDiscovery: Send + Sync {
    /// Absolute paths of every file matching `include` and not matching
    /// `exclude`, in a stable order
    async fn discover(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Glob-filtered directory walker
#[derive(Clone)]
pub struct GlobScanner {
    include: Arc<GlobSet>,
    exclude: Arc<GlobSet>,
    respect_gitignore: bool,
}

impl GlobScanner {
    pub fn new<I, E>(include: I, exclude: E) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            include: Arc::new(build_globset(include)?),
            exclude: Arc::new(build_globset(exclude)?),
            respect_gitignore: false,
        })
    }

    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        Ok(Self::new(&config.include, &config.exclude)?
            .with_gitignore(config.respect_gitignore))
    }

    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Whether a root-relative, `/`-separated path passes both glob sets
    pub fn matches(&self, relative: &str) -> bool {
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }

    /// Whether a directory can be skipped without descending into it
    fn prunes_dir(&self, relative: &str) -> bool {
        // `dir/**` style excludes match anything below `dir`, probe with a child
        self.exclude.is_match(relative) || self.exclude.is_match(format!("{relative}/_"))
    }

    fn scan(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(false)
            .parents(self.respect_gitignore)
            .ignore(self.respect_gitignore)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        let pruner = self.clone();
        let walk_root = root.to_path_buf();
        builder.filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            if !is_dir || entry.depth() == 0 {
                return true;
            }
            let relative = relative_location(&walk_root, entry.path());
            !pruner.prunes_dir(&relative)
        });

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let relative = relative_location(root, entry.path());
                    if !self.matches(&relative) {
                        continue;
                    }

                    files.push(entry.into_path());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        log::debug!("Discovered {} files under {}", files.len(), root.display());
        files
    }
}

impl Default for GlobScanner {
    fn default() -> Self {
        let config = AnalyzerConfig::default();
        Self {
            include: Arc::new(build_globset(&config.include).unwrap_or_else(|_| GlobSet::empty())),
            exclude: Arc::new(build_globset(&config.exclude).unwrap_or_else(|_| GlobSet::empty())),
            respect_gitignore: config.respect_gitignore,
        }
    }
}

#[async_trait]
impl FileDiscovery for GlobScanner {
    async fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(WorkspaceError::Discovery(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let scanner = self.clone();
        let root = root.to_path_buf();
        tokio::task::spawn_blocking(move || scanner.scan(&root))
            .await
            .map_err(|e| WorkspaceError::Discovery(format!("scan task failed: {e}")))
    }
}

fn build_globset<I>(patterns: I) -> Result<GlobSet>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref().trim();
        if pattern.is_empty() {
            continue;
        }
        let glob = Glob::new(pattern)
            .map_err(|e| WorkspaceError::Config(format!("invalid glob '{pattern}': {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| WorkspaceError::Config(format!("failed to build glob set: {e}")))
}
