use thiserror::Error;

/// Result type for structure extraction operations
pub type Result<T> = std::result::Result<T, StructureError>;

/// Errors that can occur while turning source text into a syntax tree
#[derive(Error, Debug)]
pub enum StructureError {
    /// No grammar is available for the file name hint
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Tree-sitter rejected the grammar (ABI mismatch)
    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),

    /// The parser produced no tree at all
    #[error("Parse error: {0}")]
    ParseFailed(String),

    /// The tree contains syntax errors and the parser runs in strict mode
    #[error("Syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
}

impl StructureError {
    /// Create an unsupported language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitter(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseFailed(msg.into())
    }
}
