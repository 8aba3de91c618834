use crate::error::{Result, StructureError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source language (and dialect) a file is parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
    Unknown,
}

/// Whether the grammar accepts JSX elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceVariant {
    Plain,
    Jsx,
}

impl SourceLanguage {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "ts" | "mts" | "cts" => SourceLanguage::TypeScript,
            "tsx" => SourceLanguage::Tsx,
            "js" | "mjs" | "cjs" => SourceLanguage::JavaScript,
            "jsx" => SourceLanguage::Jsx,
            _ => SourceLanguage::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(SourceLanguage::Unknown)
    }

    /// Get language name as string
    pub fn as_str(self) -> &'static str {
        match self {
            SourceLanguage::TypeScript => "typescript",
            SourceLanguage::Tsx => "tsx",
            SourceLanguage::JavaScript => "javascript",
            SourceLanguage::Jsx => "jsx",
            SourceLanguage::Unknown => "unknown",
        }
    }

    pub fn variant(self) -> SourceVariant {
        match self {
            SourceLanguage::Tsx | SourceLanguage::Jsx => SourceVariant::Jsx,
            _ => SourceVariant::Plain,
        }
    }

    /// Get Tree-sitter language instance
    ///
    /// The JavaScript grammar parses JSX natively, so `.js` and `.jsx` share it.
    pub fn tree_sitter_language(self) -> Result<tree_sitter::Language> {
        match self {
            SourceLanguage::TypeScript => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            SourceLanguage::Tsx => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
            SourceLanguage::JavaScript | SourceLanguage::Jsx => {
                Ok(tree_sitter_javascript::LANGUAGE.into())
            }
            SourceLanguage::Unknown => Err(StructureError::unsupported_language(self.as_str())),
        }
    }
}
