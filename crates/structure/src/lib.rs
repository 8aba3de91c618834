//! # Scope Structure
//!
//! Normalized structural summaries of TypeScript and JavaScript sources.
//!
//! ## Architecture
//!
//! ```text
//! Source text + file name
//!     │
//!     ├──> Language Detection (from extension: .ts / .tsx / .js / .jsx)
//!     │
//!     ├──> Tree-sitter Parsing → ParsedSource
//!     │
//!     └──> StructureExtractor (single full traversal)
//!          ├─> functions (declarations + function-valued variables)
//!          ├─> classes (methods, properties)
//!          ├─> imports / exports
//!          └─> interfaces / type aliases
//! ```
//!
//! ## Example
//!
//! ```rust
//! use scope_structure::{SourceParser, StructureExtractor, TreeSitterParser};
//!
//! let code = r#"
//! import { hash } from './crypto';
//! export async function login(user: string): Promise<void> {}
//! "#;
//!
//! let parsed = TreeSitterParser::default()
//!     .parse(code.to_string(), "auth.ts")
//!     .unwrap();
//! let structure = StructureExtractor::extract(&parsed);
//!
//! assert_eq!(structure.functions[0].name, "login");
//! assert_eq!(structure.imports[0].source, "./crypto");
//! ```

mod error;
mod extractor;
mod language;
mod parser;
mod types;

pub use error::{Result, StructureError};
pub use extractor::StructureExtractor;
pub use language::{SourceLanguage, SourceVariant};
pub use parser::{ParsedSource, SourceParser, TreeSitterParser};
pub use types::{
    ClassInfo, CodeStructure, ExportInfo, ExportKind, FunctionInfo, ImportInfo, InterfaceInfo,
    TypeAliasInfo, ANONYMOUS_EXPORT, DESTRUCTURED_PARAM,
};
