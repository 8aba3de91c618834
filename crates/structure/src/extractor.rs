use crate::parser::ParsedSource;
use crate::types::{
    ClassInfo, CodeStructure, ExportInfo, ExportKind, FunctionInfo, ImportInfo, InterfaceInfo,
    TypeAliasInfo, ANONYMOUS_EXPORT, DESTRUCTURED_PARAM,
};
use tree_sitter::Node;

/// Walks a parsed TypeScript/JavaScript tree and collects its structure.
///
/// Node kinds outside the recognized categories are skipped; extraction never
/// fails. Both the TypeScript and JavaScript grammars are understood (they
/// differ in how parameters and class fields are shaped).
pub struct StructureExtractor;

impl StructureExtractor {
    pub fn extract(parsed: &ParsedSource) -> CodeStructure {
        let mut walk = Walk {
            src: parsed.source.as_str(),
            out: CodeStructure::default(),
        };
        walk.visit(parsed.root());
        walk.out
    }
}

struct Walk<'s> {
    src: &'s str,
    out: CodeStructure,
}

impl<'s> Walk<'s> {
    /// Pre-order traversal on an explicit stack; bundled code nests deeper
    /// than the thread stack allows
    fn visit(&mut self, root: Node) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            self.record(node);

            let mut cursor = node.walk();
            let children: Vec<_> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    fn record(&mut self, node: Node) {
        match node.kind() {
            "function_declaration" | "generator_function_declaration" => {
                self.record_function_declaration(node);
            }
            "lexical_declaration" | "variable_declaration" => {
                self.record_function_variables(node);
            }
            // `export default function name() {}` may surface as a named expression
            "function_expression" | "function" | "generator_function" if is_exported(node) => {
                self.record_function_declaration(node);
            }
            "class_declaration" | "abstract_class_declaration" => self.record_class(node),
            "class" if is_exported(node) => self.record_class(node),
            "import_statement" => self.record_import(node),
            "export_statement" => self.record_export(node),
            "interface_declaration" => self.record_interface(node),
            "type_alias_declaration" => self.record_type_alias(node),
            _ => {}
        }
    }

    fn record_function_declaration(&mut self, node: Node) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };

        self.out.functions.push(FunctionInfo {
            name: self.text(name).to_string(),
            params: self.params_of(node),
            return_type: self.return_type_of(node),
            is_exported: is_exported(node),
            is_async: has_token(node, "async"),
            line: line_of(node),
        });
    }

    /// `const handler = async (req) => { ... }` is recorded as function `handler`
    fn record_function_variables(&mut self, node: Node) {
        let exported = is_exported(node);

        let mut cursor = node.walk();
        let declarators: Vec<_> = node
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "variable_declarator")
            .collect();

        for declarator in declarators {
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            if name.kind() != "identifier" {
                continue;
            }
            let Some(value) = declarator.child_by_field_name("value") else {
                continue;
            };
            if !is_function_value(value) {
                continue;
            }

            self.out.functions.push(FunctionInfo {
                name: self.text(name).to_string(),
                params: self.params_of(value),
                return_type: self.return_type_of(value),
                is_exported: exported,
                is_async: has_token(value, "async"),
                line: line_of(declarator),
            });
        }
    }

    fn record_class(&mut self, node: Node) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };

        let mut methods = Vec::new();
        let mut properties = Vec::new();

        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for member in body.named_children(&mut cursor) {
                match member.kind() {
                    "method_definition" | "method_signature" | "abstract_method_signature" => {
                        if let Some(member_name) = self.simple_member_name(member, "name") {
                            if member_name != "constructor" {
                                methods.push(member_name);
                            }
                        }
                    }
                    // TypeScript grammar
                    "public_field_definition" => {
                        if let Some(member_name) = self.simple_member_name(member, "name") {
                            properties.push(member_name);
                        }
                    }
                    // JavaScript grammar
                    "field_definition" => {
                        if let Some(member_name) = self.simple_member_name(member, "property") {
                            properties.push(member_name);
                        }
                    }
                    _ => {}
                }
            }
        }

        self.out.classes.push(ClassInfo {
            name: self.text(name).to_string(),
            methods,
            properties,
            is_exported: is_exported(node),
            line: line_of(node),
        });
    }

    fn record_import(&mut self, node: Node) {
        let Some(source) = node.child_by_field_name("source") else {
            return;
        };

        let mut import = ImportInfo {
            source: unquote(self.text(source)).to_string(),
            named: Vec::new(),
            default_import: None,
            namespace_import: None,
            line: line_of(node),
        };

        let mut cursor = node.walk();
        let clauses: Vec<_> = node
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "import_clause")
            .collect();

        for clause in clauses {
            let mut clause_cursor = clause.walk();
            for binding in clause.named_children(&mut clause_cursor) {
                match binding.kind() {
                    "identifier" => import.default_import = Some(self.text(binding).to_string()),
                    "namespace_import" => {
                        import.namespace_import = first_named_of_kind(binding, "identifier")
                            .map(|id| self.text(id).to_string());
                    }
                    "named_imports" => {
                        let mut spec_cursor = binding.walk();
                        for spec in binding.named_children(&mut spec_cursor) {
                            if spec.kind() != "import_specifier" {
                                continue;
                            }
                            let local = spec
                                .child_by_field_name("alias")
                                .or_else(|| spec.child_by_field_name("name"));
                            if let Some(local) = local {
                                import.named.push(unquote(self.text(local)).to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        self.out.imports.push(import);
    }

    fn record_export(&mut self, node: Node) {
        let line = line_of(node);
        let is_default = has_token(node, "default");

        if let Some(declaration) = node.child_by_field_name("declaration") {
            let kind = if is_default {
                ExportKind::Default
            } else {
                ExportKind::Named
            };
            let names = self.declared_names(declaration);
            if names.is_empty() {
                if is_default {
                    self.push_export(ANONYMOUS_EXPORT.to_string(), kind, line);
                }
                return;
            }
            for name in names {
                self.push_export(name, kind, line);
            }
            return;
        }

        // `export default <expr>` and TypeScript's `export = <expr>`
        let assigned = node.child_by_field_name("value").or_else(|| {
            if has_token(node, "=") {
                let mut cursor = node.walk();
                let expr = node.named_children(&mut cursor).next();
                expr
            } else {
                None
            }
        });
        if let Some(value) = assigned {
            let name = match value.kind() {
                "identifier" => self.text(value).to_string(),
                "function_expression" | "function" | "generator_function" | "class" => value
                    .child_by_field_name("name")
                    .map(|n| self.text(n).to_string())
                    .unwrap_or_else(|| ANONYMOUS_EXPORT.to_string()),
                _ => ANONYMOUS_EXPORT.to_string(),
            };
            self.push_export(name, ExportKind::Default, line);
            return;
        }

        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        for child in children {
            match child.kind() {
                "export_clause" => {
                    let mut spec_cursor = child.walk();
                    let specs: Vec<_> = child
                        .named_children(&mut spec_cursor)
                        .filter(|s| s.kind() == "export_specifier")
                        .collect();
                    for spec in specs {
                        let exported = spec
                            .child_by_field_name("alias")
                            .or_else(|| spec.child_by_field_name("name"));
                        if let Some(exported) = exported {
                            let name = unquote(self.text(exported)).to_string();
                            let kind = if name == "default" {
                                ExportKind::Default
                            } else {
                                ExportKind::Named
                            };
                            self.push_export(name, kind, line_of(spec));
                        }
                    }
                }
                // `export * as ns from './mod'`
                "namespace_export" => {
                    if let Some(id) = first_named_of_kind(child, "identifier") {
                        let name = self.text(id).to_string();
                        self.push_export(name, ExportKind::Named, line);
                    }
                }
                _ => {}
            }
        }
    }

    fn record_interface(&mut self, node: Node) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };

        let mut properties = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for member in body.named_children(&mut cursor) {
                if member.kind() == "property_signature" {
                    if let Some(prop) = self.simple_member_name(member, "name") {
                        properties.push(prop);
                    }
                }
            }
        }

        self.out.interfaces.push(InterfaceInfo {
            name: self.text(name).to_string(),
            properties,
            is_exported: is_exported(node),
            line: line_of(node),
        });
    }

    fn record_type_alias(&mut self, node: Node) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        self.out.type_aliases.push(TypeAliasInfo {
            name: self.text(name).to_string(),
            is_exported: is_exported(node),
            line: line_of(node),
        });
    }

    fn push_export(&mut self, name: String, kind: ExportKind, line: usize) {
        self.out.exports.push(ExportInfo { name, kind, line });
    }

    /// Names introduced by an exported declaration
    fn declared_names(&self, declaration: Node) -> Vec<String> {
        match declaration.kind() {
            "lexical_declaration" | "variable_declaration" => {
                let mut cursor = declaration.walk();
                declaration
                    .named_children(&mut cursor)
                    .filter(|c| c.kind() == "variable_declarator")
                    .filter_map(|d| d.child_by_field_name("name"))
                    .filter(|n| n.kind() == "identifier")
                    .map(|n| self.text(n).to_string())
                    .collect()
            }
            _ => declaration
                .child_by_field_name("name")
                .map(|n| vec![self.text(n).to_string()])
                .unwrap_or_default(),
        }
    }

    fn params_of(&self, function: Node) -> Vec<String> {
        // `x => x * 2` has a bare `parameter` field instead of a list
        if let Some(single) = function.child_by_field_name("parameter") {
            return vec![self.param_name(single)];
        }

        let Some(params) = function.child_by_field_name("parameters") else {
            return Vec::new();
        };

        let mut cursor = params.walk();
        params
            .named_children(&mut cursor)
            .filter(|p| !matches!(p.kind(), "comment" | "decorator"))
            .map(|p| self.param_name(p))
            .collect()
    }

    fn param_name(&self, param: Node) -> String {
        let binding = match param.kind() {
            // TypeScript wraps each parameter and keeps the binding in `pattern`
            "required_parameter" | "optional_parameter" => param.child_by_field_name("pattern"),
            // JavaScript default value: `x = 1`
            "assignment_pattern" => param.child_by_field_name("left"),
            _ => Some(param),
        };

        let Some(binding) = binding else {
            return DESTRUCTURED_PARAM.to_string();
        };

        match binding.kind() {
            "identifier" | "this" => self.text(binding).to_string(),
            "rest_pattern" => match binding.named_child(0) {
                Some(inner) if inner.kind() == "identifier" => self.text(inner).to_string(),
                _ => DESTRUCTURED_PARAM.to_string(),
            },
            _ => DESTRUCTURED_PARAM.to_string(),
        }
    }

    fn return_type_of(&self, function: Node) -> Option<String> {
        let annotation = function.child_by_field_name("return_type")?;
        let text = self.text(annotation).trim();
        let text = text.strip_prefix(':').unwrap_or(text).trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    /// Member name if it is a plain identifier (computed, string, numeric and
    /// `#private` names are ignored)
    fn simple_member_name(&self, member: Node, field: &str) -> Option<String> {
        let name = member.child_by_field_name(field)?;
        match name.kind() {
            "property_identifier" | "identifier" => Some(self.text(name).to_string()),
            _ => None,
        }
    }

    fn text(&self, node: Node) -> &'s str {
        node.utf8_text(self.src.as_bytes()).unwrap_or_default()
    }
}

fn is_function_value(node: Node) -> bool {
    matches!(
        node.kind(),
        "arrow_function" | "function_expression" | "function" | "generator_function"
    )
}

/// Declaration carries an explicit `export` / `export default` modifier
fn is_exported(node: Node) -> bool {
    node.parent()
        .is_some_and(|parent| parent.kind() == "export_statement")
}

/// Anonymous keyword/punctuation child such as `async`, `default` or `=`
fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

fn first_named_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}

fn line_of(node: Node) -> usize {
    node.start_position().row + 1
}

fn unquote(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
}
