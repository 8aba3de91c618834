use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File category, decided purely by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Primary source (`.ts`, `.tsx`, `.mts`, `.cts`)
    TypeScript,
    /// Secondary source (`.js`, `.jsx`, `.mjs`, `.cjs`)
    JavaScript,
    /// Data (`.json`)
    Json,
    /// Documentation (`.md`, `.mdx`)
    Markdown,
    Other,
}

impl FileKind {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "ts" | "tsx" | "mts" | "cts" => FileKind::TypeScript,
            "js" | "jsx" | "mjs" | "cjs" => FileKind::JavaScript,
            "json" => FileKind::Json,
            "md" | "mdx" => FileKind::Markdown,
            _ => FileKind::Other,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileKind::Other)
    }

    /// Source kinds are parsed and run through the structure extractor
    pub fn is_source(self) -> bool {
        matches!(self, FileKind::TypeScript | FileKind::JavaScript)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::TypeScript => "typescript",
            FileKind::JavaScript => "javascript",
            FileKind::Json => "json",
            FileKind::Markdown => "markdown",
            FileKind::Other => "other",
        }
    }
}

/// One analyzed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Absolute path
    pub path: PathBuf,
    pub kind: FileKind,
    pub size_bytes: u64,
    /// Module specifiers, one per import statement
    pub imports: Vec<String>,
    pub exports: Vec<String>,
}

impl FileRecord {
    /// Record without imports/exports: non-source files, and files whose
    /// content or syntax could not be used
    pub fn bare(path: PathBuf, kind: FileKind, size_bytes: u64) -> Self {
        Self {
            path,
            kind,
            size_bytes,
            imports: Vec::new(),
            exports: Vec::new(),
        }
    }

    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// Absolute path as used for `WorkspaceAnalysis::dependencies` keys
    pub fn path_key(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Function,
    Class,
    /// Not produced yet
    Component,
    /// Not produced yet
    Module,
}

/// A named function or class and the file declaring it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodePattern {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub name: String,
    /// Path relative to the workspace root, `/`-separated
    pub location: String,
}

/// Whole-workspace snapshot produced by one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceAnalysis {
    pub root_path: PathBuf,
    /// Discovery order
    pub files: Vec<FileRecord>,
    /// Absolute file path -> import specifiers; files without imports are absent
    pub dependencies: BTreeMap<String, Vec<String>>,
    pub patterns: Vec<CodePattern>,
}

impl WorkspaceAnalysis {
    pub fn file(&self, path: &Path) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn source_files(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.kind.is_source())
    }

    /// Files whose import list contains `specifier` verbatim
    pub fn dependents_of(&self, specifier: &str) -> Vec<&FileRecord> {
        self.files
            .iter()
            .filter(|f| {
                self.dependencies
                    .get(&f.path_key())
                    .is_some_and(|imports| imports.iter().any(|i| i == specifier))
            })
            .collect()
    }
}

pub(crate) fn relative_location(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
