use serde::{Deserialize, Serialize};

/// Structural summary of a single source file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CodeStructure {
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub imports: Vec<ImportInfo>,
    pub exports: Vec<ExportInfo>,
    pub interfaces: Vec<InterfaceInfo>,
    pub type_aliases: Vec<TypeAliasInfo>,
}

impl CodeStructure {
    /// Module specifiers in import statement order (one per statement)
    pub fn import_sources(&self) -> Vec<String> {
        self.imports.iter().map(|i| i.source.clone()).collect()
    }

    /// Exported names in declaration order
    pub fn export_names(&self) -> Vec<String> {
        self.exports.iter().map(|e| e.name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
            && self.classes.is_empty()
            && self.imports.is_empty()
            && self.exports.is_empty()
            && self.interfaces.is_empty()
            && self.type_aliases.is_empty()
    }
}

/// A function declaration or a variable bound to a function value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    pub name: String,
    /// Parameter names in declaration order; destructuring patterns are
    /// recorded as [`DESTRUCTURED_PARAM`].
    pub params: Vec<String>,
    /// Return type annotation text without the leading `:`
    pub return_type: Option<String>,
    pub is_exported: bool,
    pub is_async: bool,
    /// Line (1-indexed)
    pub line: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub name: String,
    pub methods: Vec<String>,
    pub properties: Vec<String>,
    pub is_exported: bool,
    pub line: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportInfo {
    /// Literal module specifier (`'./auth'`, `'react'`)
    pub source: String,
    /// Local names bound by `{ a, b as c }`
    pub named: Vec<String>,
    pub default_import: Option<String>,
    /// Local name bound by `* as ns`
    pub namespace_import: Option<String>,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Named,
    Default,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub name: String,
    pub kind: ExportKind,
    pub line: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceInfo {
    pub name: String,
    pub properties: Vec<String>,
    pub is_exported: bool,
    pub line: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypeAliasInfo {
    pub name: String,
    pub is_exported: bool,
    pub line: usize,
}

/// Placeholder recorded for parameters bound by a destructuring pattern
pub const DESTRUCTURED_PARAM: &str = "<destructured>";

/// Placeholder recorded for default exports that are not a bare identifier
pub const ANONYMOUS_EXPORT: &str = "<anonymous>";
