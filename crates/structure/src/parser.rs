use crate::error::{Result, StructureError};
use crate::language::SourceLanguage;
use tree_sitter::{Node, Parser, Tree};

/// Source text together with its syntax tree
pub struct ParsedSource {
    pub source: String,
    pub tree: Tree,
    pub language: SourceLanguage,
}

impl ParsedSource {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

/// Turns raw text into a syntax tree the extractor can walk.
///
/// `file_name` is only a hint used to pick the grammar (`.tsx` vs `.ts`, ...).
pub trait SourceParser: Send + Sync {
    fn parse(&self, source: String, file_name: &str) -> Result<ParsedSource>;
}

/// Tree-sitter backed parser for TypeScript and JavaScript
#[derive(Debug, Clone, Copy)]
pub struct TreeSitterParser {
    strict: bool,
}

impl Default for TreeSitterParser {
    fn default() -> Self {
        Self::strict()
    }
}

impl TreeSitterParser {
    /// Trees containing syntax errors are rejected
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Error-tolerant: extraction runs over whatever tree-sitter recovered
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    pub fn with_strict(strict: bool) -> Self {
        Self { strict }
    }
}

impl SourceParser for TreeSitterParser {
    fn parse(&self, source: String, file_name: &str) -> Result<ParsedSource> {
        let language = SourceLanguage::from_path(file_name);
        let ts_language = language.tree_sitter_language()?;

        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| StructureError::tree_sitter(format!("Failed to set language: {e}")))?;

        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| StructureError::parse(format!("Failed to parse {file_name}")))?;

        if self.strict {
            if let Some(node) = first_error(tree.root_node()) {
                let pos = node.start_position();
                log::debug!(
                    "Syntax error in {file_name} at {}:{}",
                    pos.row + 1,
                    pos.column + 1
                );
                return Err(StructureError::Syntax {
                    line: pos.row + 1,
                    column: pos.column + 1,
                });
            }
        }

        Ok(ParsedSource {
            source,
            tree,
            language,
        })
    }
}

/// First ERROR or MISSING node in document order.
///
/// Descends into the first erroneous child at each level instead of
/// recursing, so nesting depth is bounded only by the tree.
fn first_error<'a>(node: Node<'a>) -> Option<Node<'a>> {
    if !node.has_error() {
        return None;
    }

    let mut node = node;
    loop {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }

        let mut cursor = node.walk();
        let next = node.children(&mut cursor).find(|child| child.has_error());
        match next {
            Some(child) => node = child,
            // has_error() is set but no child carries it: the node itself is the culprit
            None => return Some(node),
        }
    }
}
