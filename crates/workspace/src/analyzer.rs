use crate::config::AnalyzerConfig;
use crate::error::{Result, WorkspaceError};
use crate::patterns::PatternCollector;
use crate::pool::map_ordered;
use crate::reader::{guard_path, FileReader, FsReader};
use crate::scanner::{FileDiscovery, GlobScanner};
use crate::stats::AnalysisStats;
use crate::types::{FileKind, FileRecord, WorkspaceAnalysis};
use scope_structure::{
    CodeStructure, SourceParser, StructureError, StructureExtractor, TreeSitterParser,
};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Scans a workspace into a [`WorkspaceAnalysis`] and keeps the latest one.
///
/// The cache slot lock is held for the whole scan, so concurrent callers for
/// the same root share one computation.
pub struct WorkspaceAnalyzer {
    config: AnalyzerConfig,
    default_root: Option<PathBuf>,
    discovery: Arc<dyn FileDiscovery>,
    reader: Arc<dyn FileReader>,
    parser: Arc<dyn SourceParser>,
    cache: Mutex<Option<Arc<WorkspaceAnalysis>>>,
    last_stats: Mutex<Option<AnalysisStats>>,
}

#[derive(Default)]
pub struct WorkspaceAnalyzerBuilder {
    config: AnalyzerConfig,
    default_root: Option<PathBuf>,
    discovery: Option<Arc<dyn FileDiscovery>>,
    reader: Option<Arc<dyn FileReader>>,
    parser: Option<Arc<dyn SourceParser>>,
}

impl WorkspaceAnalyzerBuilder {
    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Root used when `analyze` is called without one
    pub fn default_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.default_root = Some(root.into());
        self
    }

    pub fn discovery(mut self, discovery: Arc<dyn FileDiscovery>) -> Self {
        self.discovery = Some(discovery);
        self
    }

    pub fn reader(mut self, reader: Arc<dyn FileReader>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn parser(mut self, parser: Arc<dyn SourceParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn build(self) -> Result<WorkspaceAnalyzer> {
        self.config.validate().map_err(WorkspaceError::Config)?;

        let discovery: Arc<dyn FileDiscovery> = match self.discovery {
            Some(discovery) => discovery,
            None => Arc::new(GlobScanner::from_config(&self.config)?),
        };
        let parser: Arc<dyn SourceParser> = match self.parser {
            Some(parser) => parser,
            None => Arc::new(TreeSitterParser::with_strict(self.config.strict_syntax)),
        };
        let reader: Arc<dyn FileReader> = match self.reader {
            Some(reader) => reader,
            None => Arc::new(FsReader),
        };

        Ok(WorkspaceAnalyzer {
            default_root: self.default_root,
            discovery,
            reader,
            parser,
            config: self.config,
            cache: Mutex::new(None),
            last_stats: Mutex::new(None),
        })
    }
}

enum FileOutcome {
    Analyzed(FileRecord),
    Degraded(FileRecord, String),
    Dropped(PathBuf, String),
}

impl WorkspaceAnalyzer {
    pub fn builder() -> WorkspaceAnalyzerBuilder {
        WorkspaceAnalyzerBuilder::default()
    }

    /// Analyzer with default collaborators
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Analyze `root` (or the default root), reusing the cached analysis
    /// when it was computed for the same root
    pub async fn analyze(&self, root: Option<&Path>) -> Result<Arc<WorkspaceAnalysis>> {
        let root = self.resolve_root(root)?;

        let mut slot = self.cache.lock().await;
        if let Some(cached) = slot.as_ref() {
            if cached.root_path == root {
                log::debug!("Workspace analysis cache hit for {}", root.display());
                return Ok(cached.clone());
            }
            log::debug!(
                "Cached analysis is for {}, rescanning {}",
                cached.root_path.display(),
                root.display()
            );
        }

        let (analysis, stats) = self.compute(&root).await;
        let analysis = Arc::new(analysis);
        *slot = Some(analysis.clone());
        *self.last_stats.lock().await = Some(stats);
        Ok(analysis)
    }

    /// Drop the cached analysis; snapshots already handed out stay valid
    pub async fn invalidate(&self) {
        let mut slot = self.cache.lock().await;
        if slot.take().is_some() {
            log::debug!("Workspace analysis cache cleared");
        }
    }

    pub async fn cached(&self) -> Option<Arc<WorkspaceAnalysis>> {
        self.cache.lock().await.clone()
    }

    /// Statistics of the most recent scan
    pub async fn last_stats(&self) -> Option<AnalysisStats> {
        self.last_stats.lock().await.clone()
    }

    /// Structure of one source file under the workspace root
    pub async fn analyze_file(&self, path: &Path) -> Result<CodeStructure> {
        let path = self.guarded(path).await?;
        let source = self.read_guarded(&path).await?;

        if !FileKind::from_path(&path).is_source() {
            return Err(WorkspaceError::UnsupportedFile { path });
        }

        let extracted = extract_structure(self.parser.clone(), source, &path).await;
        extracted.map_err(|source| WorkspaceError::Parse { path, source })
    }

    /// Content of one file under the workspace root
    pub async fn read_file(&self, path: &Path) -> Result<String> {
        let path = self.guarded(path).await?;
        self.read_guarded(&path).await
    }

    fn resolve_root(&self, root: Option<&Path>) -> Result<PathBuf> {
        let root = root
            .map(Path::to_path_buf)
            .or_else(|| self.default_root.clone())
            .ok_or(WorkspaceError::NoWorkspace)?;

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(root)
        };
        Ok(normalize_root(&root))
    }

    /// Directed operations resolve against the last analyzed root, else the
    /// default root
    async fn guarded(&self, path: &Path) -> Result<PathBuf> {
        let cached_root = self.cache.lock().await.as_ref().map(|a| a.root_path.clone());
        let root = match cached_root {
            Some(root) => root,
            None => self.resolve_root(None)?,
        };
        guard_path(&root, path)
    }

    async fn read_guarded(&self, path: &Path) -> Result<String> {
        self.reader.read_to_string(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => WorkspaceError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => WorkspaceError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })
    }

    async fn compute(&self, root: &Path) -> (WorkspaceAnalysis, AnalysisStats) {
        let started = Instant::now();
        let mut stats = AnalysisStats::new();

        let discovered = match self.discovery.discover(root).await {
            Ok(files) => files,
            Err(e) => {
                log::warn!("File discovery failed for {}: {e}", root.display());
                Vec::new()
            }
        };
        log::debug!("Analyzing {} files under {}", discovered.len(), root.display());

        let outcomes = map_ordered(discovered, self.config.max_concurrency, |path| {
            let reader = self.reader.clone();
            let parser = self.parser.clone();
            async move { analyze_one(reader, parser, path).await }
        })
        .await;

        let mut files = Vec::with_capacity(outcomes.len());
        for outcome in outcomes.into_iter().flatten() {
            match outcome {
                FileOutcome::Analyzed(record) => {
                    stats.add_file(record.kind);
                    files.push(record);
                }
                FileOutcome::Degraded(record, reason) => {
                    stats.add_file(record.kind);
                    stats.add_degraded(format!("{}: {reason}", record.path.display()));
                    files.push(record);
                }
                FileOutcome::Dropped(path, reason) => {
                    stats.add_dropped(format!("{}: {reason}", path.display()));
                }
            }
        }

        let dependencies: BTreeMap<String, Vec<String>> = files
            .iter()
            .filter(|f| !f.imports.is_empty())
            .map(|f| (f.path_key(), f.imports.clone()))
            .collect();

        let patterns = PatternCollector::new(
            self.reader.clone(),
            self.parser.clone(),
            self.config.max_concurrency,
        )
        .collect(root, &files)
        .await;

        stats.dependencies = dependencies.len();
        stats.patterns = patterns.len();
        stats.time_ms = started.elapsed().as_millis() as u64;

        log::info!(
            "Analyzed {} files ({} degraded, {} dropped), {} with imports, {} patterns in {}ms",
            stats.files,
            stats.degraded,
            stats.dropped,
            stats.dependencies,
            stats.patterns,
            stats.time_ms
        );

        let analysis = WorkspaceAnalysis {
            root_path: root.to_path_buf(),
            files,
            dependencies,
            patterns,
        };
        (analysis, stats)
    }
}

async fn analyze_one(
    reader: Arc<dyn FileReader>,
    parser: Arc<dyn SourceParser>,
    path: PathBuf,
) -> FileOutcome {
    let kind = FileKind::from_path(&path);

    let read = reader.read_to_string(&path).await;
    let source = match read {
        Ok(source) => source,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("File disappeared before reading: {}", path.display());
            return FileOutcome::Dropped(path, e.to_string());
        }
        Err(e) => {
            log::warn!("Failed to read {}: {e}", path.display());
            return FileOutcome::Degraded(FileRecord::bare(path, kind, 0), e.to_string());
        }
    };
    let size_bytes = source.len() as u64;

    if !kind.is_source() {
        return FileOutcome::Analyzed(FileRecord::bare(path, kind, size_bytes));
    }

    let extracted = extract_structure(parser, source, &path).await;
    match extracted {
        Ok(structure) => FileOutcome::Analyzed(FileRecord {
            imports: structure.import_sources(),
            exports: structure.export_names(),
            path,
            kind,
            size_bytes,
        }),
        Err(e) => {
            log::warn!("Failed to parse {}: {e}", path.display());
            FileOutcome::Degraded(FileRecord::bare(path, kind, size_bytes), e.to_string())
        }
    }
}

/// Lexically drop `.` and fold `..` against an absolute root; the directory
/// need not exist
fn normalize_root(root: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in root.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Parse and extract on the blocking pool
pub(crate) async fn extract_structure(
    parser: Arc<dyn SourceParser>,
    source: String,
    path: &Path,
) -> scope_structure::Result<CodeStructure> {
    let file_name = path.to_string_lossy().into_owned();
    tokio::task::spawn_blocking(move || {
        let parsed = parser.parse(source, &file_name)?;
        Ok(StructureExtractor::extract(&parsed))
    })
    .await
    .map_err(|e| StructureError::parse(format!("extraction task failed: {e}")))?
}
