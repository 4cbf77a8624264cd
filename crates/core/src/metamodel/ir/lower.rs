//! Lowering: meta-model → Lua IR.
//!
//! All meta-model specific decisions are resolved here so that emission is a
//! plain walk over [`LuaModule`]. Inline `literal` types are lifted into
//! anonymous classes registered on the [`LowerContext`].

use tracing::{debug, warn};

use super::types::{
    AnonymousRecord, DeclKind, LuaDecl, LuaEnumMember, LuaField, LuaHeader, LuaLiteral, LuaModule,
    LuaType,
};
use crate::config::GenConfig;
use crate::metamodel::spec::{
    EnumValue, Enumeration, LiteralBody, MetaModel, Property, Structure, TypeAlias, TypeExpr,
};

/// A type expression that could not be lowered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The unsupported `kind` tag.
    pub kind: String,
    /// Declaration being lowered when the kind was met (`Structure Foo`).
    pub declaration: String,
    /// Field path inside the declaration, if any.
    pub path: Option<String>,
}

/// Per-run lowering state: anonymous record registry and diagnostics.
#[derive(Debug)]
pub struct LowerContext<'a> {
    config: &'a GenConfig,
    anonymous: Vec<AnonymousRecord>,
    diagnostics: Vec<Diagnostic>,
    declaration: String,
}

impl<'a> LowerContext<'a> {
    pub fn new(config: &'a GenConfig) -> Self {
        Self {
            config,
            anonymous: Vec::new(),
            diagnostics: Vec::new(),
            declaration: String::new(),
        }
    }

    /// Anonymous records registered so far, in allocation order.
    pub fn anonymous(&self) -> &[AnonymousRecord] {
        &self.anonymous
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the context, returning the registry and the diagnostics.
    pub fn finish(self) -> (Vec<AnonymousRecord>, Vec<Diagnostic>) {
        (self.anonymous, self.diagnostics)
    }

    fn enter(&mut self, declaration: String) {
        self.declaration = declaration;
    }

    /// Annotation name for a referenced or base type.
    fn type_name(&self, name: &str) -> String {
        if self.config.is_simple_type(name) {
            name.to_string()
        } else {
            self.config.qualified(name)
        }
    }

    /// Lower a type expression. `path` is the chain of field names leading here.
    pub fn lower(&mut self, ty: &TypeExpr, path: Option<&str>) -> LuaType {
        match ty {
            TypeExpr::Reference { name } | TypeExpr::Base { name } => {
                LuaType::Named(self.type_name(name))
            }
            TypeExpr::Array { element } => LuaType::Array(Box::new(self.lower(element, path))),
            TypeExpr::Or { items } => self.lower_union(items, path),
            TypeExpr::Map { key, value } => LuaType::Table {
                key: Box::new(self.lower(key, path)),
                value: Box::new(self.lower(value, path)),
            },
            TypeExpr::StringLiteral { value } => LuaType::StringLiteral(value.clone()),
            TypeExpr::Literal { value } => LuaType::Named(self.register_literal(value, path)),
            TypeExpr::Tuple { items } => {
                LuaType::Tuple(items.iter().map(|item| self.lower(item, path)).collect())
            }
            TypeExpr::Unknown { kind, .. } => {
                warn!(
                    kind = %kind,
                    declaration = %self.declaration,
                    path = path.unwrap_or(""),
                    "Unsupported type expression kind, emitting empty type"
                );
                self.diagnostics.push(Diagnostic {
                    kind: kind.clone(),
                    declaration: self.declaration.clone(),
                    path: path.map(str::to_string),
                });
                LuaType::Placeholder
            }
        }
    }

    /// Lower union alternatives in order, splicing nested unions into one flat list.
    ///
    /// Alternatives that could not be lowered are left out; they already have a
    /// diagnostic. A union with nothing left is itself a placeholder.
    fn lower_union(&mut self, items: &[TypeExpr], path: Option<&str>) -> LuaType {
        let mut alternatives = Vec::with_capacity(items.len());
        for item in items {
            match self.lower(item, path) {
                LuaType::Union(nested) => alternatives.extend(nested),
                LuaType::Placeholder => {}
                other => alternatives.push(other),
            }
        }
        if alternatives.is_empty() {
            LuaType::Placeholder
        } else {
            LuaType::Union(alternatives)
        }
    }

    /// Register an inline literal as an anonymous class and return its name.
    ///
    /// The slot is reserved before the properties are lowered, so a parent
    /// always gets a smaller ordinal than the literals nested inside it.
    fn register_literal(&mut self, body: &LiteralBody, path: Option<&str>) -> String {
        let index = self.anonymous.len();
        let ordinal = index + 1;
        let base = self.config.qualified(&format!("_anonym{ordinal}"));
        let name = match path {
            Some(path) => format!("{base}.{path}"),
            None => base,
        };

        self.anonymous.push(AnonymousRecord {
            ordinal,
            path: path.map(str::to_string),
            decl: LuaDecl {
                name: name.clone(),
                docs: body.documentation.clone(),
                kind: DeclKind::Class {
                    parents: Vec::new(),
                    fields: Vec::new(),
                },
            },
        });

        let fields = self.lower_properties(&body.properties, path);
        if let Some(record) = self.anonymous.get_mut(index) {
            record.decl.kind = DeclKind::Class {
                parents: Vec::new(),
                fields,
            };
        }
        name
    }

    fn lower_properties(&mut self, properties: &[Property], parent: Option<&str>) -> Vec<LuaField> {
        properties
            .iter()
            .map(|prop| {
                let path = match parent {
                    Some(parent) => format!("{parent}.{}", prop.name),
                    None => prop.name.clone(),
                };
                LuaField {
                    name: prop.name.clone(),
                    ty: self.lower(&prop.ty, Some(&path)),
                    optional: prop.optional,
                    docs: prop.documentation.clone(),
                }
            })
            .collect()
    }

    /// Lower a named structure into a class declaration.
    pub fn lower_structure(&mut self, structure: &Structure) -> LuaDecl {
        self.enter(format!("Structure {}", structure.name));
        let parents = structure
            .extends
            .iter()
            .chain(&structure.mixins)
            .map(|parent| self.lower(parent, None))
            .collect();
        let fields = self.lower_properties(&structure.properties, None);

        LuaDecl {
            name: self.config.qualified(&structure.name),
            docs: structure.documentation.clone(),
            kind: DeclKind::Class { parents, fields },
        }
    }

    /// Lower an enumeration into an alias with one alternative per value.
    pub fn lower_enumeration(&mut self, enumeration: &Enumeration) -> LuaDecl {
        self.enter(format!("Enumeration {}", enumeration.name));
        let members = enumeration
            .values
            .iter()
            .map(|entry| LuaEnumMember {
                name: entry.name.clone(),
                value: match &entry.value {
                    EnumValue::String(s) => LuaLiteral::String(s.clone()),
                    EnumValue::Integer(i) => LuaLiteral::Int(*i),
                },
            })
            .collect();

        LuaDecl {
            name: self.config.qualified(&enumeration.name),
            docs: enumeration.documentation.clone(),
            kind: DeclKind::Enum { members },
        }
    }

    /// Lower a type alias. A top-level `or` becomes a flat union.
    pub fn lower_type_alias(&mut self, alias: &TypeAlias) -> LuaDecl {
        self.enter(format!("TypeAlias {}", alias.name));
        let ty = match &alias.ty {
            TypeExpr::Or { items } => self.lower_union(items, None),
            other => self.lower(other, None),
        };

        LuaDecl {
            name: self.config.qualified(&alias.name),
            docs: alias.documentation.clone(),
            kind: DeclKind::Alias { ty },
        }
    }
}

/// Lower a whole meta-model.
///
/// Declarations are visited in source-list order (structures, enumerations,
/// type aliases), which fixes the anonymous ordinals.
pub fn lower_meta_model(
    model: &MetaModel,
    config: &GenConfig,
    version: &str,
) -> (LuaModule, Vec<Diagnostic>) {
    let mut ctx = LowerContext::new(config);

    let structures = model
        .structures
        .iter()
        .map(|s| ctx.lower_structure(s))
        .collect::<Vec<_>>();
    let enumerations = model
        .enumerations
        .iter()
        .map(|e| ctx.lower_enumeration(e))
        .collect::<Vec<_>>();
    let aliases = model
        .type_aliases
        .iter()
        .map(|a| ctx.lower_type_alias(a))
        .collect::<Vec<_>>();

    let (anonymous, diagnostics) = ctx.finish();
    debug!(
        structures = structures.len(),
        enumerations = enumerations.len(),
        aliases = aliases.len(),
        anonymous = anonymous.len(),
        diagnostics = diagnostics.len(),
        "Lowered meta-model"
    );

    let module = LuaModule {
        header: LuaHeader {
            version: version.to_string(),
            regenerate: format!("lspgen gen --version {version}"),
            aliases: config.primitive_aliases.clone(),
        },
        structures,
        enumerations,
        aliases,
        anonymous,
    };
    (module, diagnostics)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::metamodel::ir::Emit;

    fn parse(json: &str) -> TypeExpr {
        serde_json::from_str(json).unwrap()
    }

    fn lower_str(json: &str) -> String {
        let config = GenConfig::default();
        let mut ctx = LowerContext::new(&config);
        ctx.lower(&parse(json), None).emit()
    }

    #[test]
    fn test_simple_and_namespaced_names() {
        assert_eq!(lower_str(r#"{ "kind": "base", "name": "string" }"#), "string");
        assert_eq!(lower_str(r#"{ "kind": "base", "name": "uinteger" }"#), "uinteger");
        assert_eq!(lower_str(r#"{ "kind": "base", "name": "DocumentUri" }"#), "lsp.DocumentUri");
        assert_eq!(lower_str(r#"{ "kind": "base", "name": "null" }"#), "lsp.null");
        assert_eq!(lower_str(r#"{ "kind": "reference", "name": "Range" }"#), "lsp.Range");
    }

    #[test]
    fn test_array_parenthesization() {
        let union_array = r#"{ "kind": "array", "element": { "kind": "or", "items": [
            { "kind": "reference", "name": "A" },
            { "kind": "reference", "name": "B" }
        ] } }"#;
        assert_eq!(lower_str(union_array), "(lsp.A|lsp.B)[]");

        let single_union_array = r#"{ "kind": "array", "element": { "kind": "or", "items": [
            { "kind": "reference", "name": "A" }
        ] } }"#;
        assert_eq!(lower_str(single_union_array), "lsp.A[]");

        let plain = r#"{ "kind": "array", "element": { "kind": "base", "name": "string" } }"#;
        assert_eq!(lower_str(plain), "string[]");
    }

    #[test]
    fn test_map_tuple_and_string_literal() {
        assert_eq!(
            lower_str(
                r#"{ "kind": "map",
                     "key": { "kind": "base", "name": "DocumentUri" },
                     "value": { "kind": "array", "element": { "kind": "reference", "name": "TextEdit" } } }"#
            ),
            "table<lsp.DocumentUri, lsp.TextEdit[]>"
        );
        assert_eq!(
            lower_str(
                r#"{ "kind": "tuple", "items": [
                    { "kind": "base", "name": "uinteger" },
                    { "kind": "base", "name": "uinteger" }
                ] }"#
            ),
            "{ [1]: uinteger, [2]: uinteger }"
        );
        assert_eq!(lower_str(r#"{ "kind": "stringLiteral", "value": "full" }"#), r#""full""#);
    }

    #[test]
    fn test_nested_unions_are_flattened() {
        let ty = parse(
            r#"{ "kind": "or", "items": [
                { "kind": "reference", "name": "A" },
                { "kind": "or", "items": [
                    { "kind": "reference", "name": "B" },
                    { "kind": "base", "name": "null" }
                ] }
            ] }"#,
        );
        let config = GenConfig::default();
        let mut ctx = LowerContext::new(&config);
        let lowered = ctx.lower(&ty, None);

        assert_eq!(
            lowered,
            LuaType::Union(vec![
                LuaType::Named("lsp.A".into()),
                LuaType::Named("lsp.B".into()),
                LuaType::Named("lsp.null".into()),
            ])
        );
        assert_eq!(lowered.emit(), "lsp.A|lsp.B|lsp.null");
    }

    #[test]
    fn test_literal_registers_anonymous_records_in_preorder() {
        let ty = parse(
            r#"{ "kind": "literal", "value": { "properties": [
                { "name": "range", "type": { "kind": "literal", "value": { "properties": [
                    { "name": "start", "type": { "kind": "reference", "name": "Position" } }
                ] } } },
                { "name": "text", "type": { "kind": "base", "name": "string" }, "optional": true }
            ] } }"#,
        );
        let config = GenConfig::default();
        let mut ctx = LowerContext::new(&config);

        let name = ctx.lower(&ty, Some("change")).emit();
        assert_eq!(name, "lsp._anonym1.change");

        let records = ctx.anonymous();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ordinal, 1);
        assert_eq!(records[0].decl.name, "lsp._anonym1.change");
        assert_eq!(records[1].ordinal, 2);
        assert_eq!(records[1].decl.name, "lsp._anonym2.change.range");

        let DeclKind::Class { fields, .. } = &records[0].decl.kind else {
            panic!("anonymous record should be a class");
        };
        assert_eq!(fields.len(), 2, "parent fields filled after children are lowered");
        assert_eq!(fields[0].ty.emit(), "lsp._anonym2.change.range");
        assert!(fields[1].optional);
    }

    #[test]
    fn test_literal_without_path() {
        let ty = parse(r#"{ "kind": "literal", "value": { "properties": [] } }"#);
        let config = GenConfig::default();
        let mut ctx = LowerContext::new(&config);
        assert_eq!(ctx.lower(&ty, None).emit(), "lsp._anonym1");
    }

    #[test]
    fn test_identical_literals_are_not_merged() {
        let literal = r#"{ "kind": "literal", "value": { "properties": [
            { "name": "x", "type": { "kind": "base", "name": "integer" } }
        ] } }"#;
        let config = GenConfig::default();
        let mut ctx = LowerContext::new(&config);
        let first = ctx.lower(&parse(literal), None).emit();
        let second = ctx.lower(&parse(literal), None).emit();

        assert_eq!(first, "lsp._anonym1");
        assert_eq!(second, "lsp._anonym2");
        assert_eq!(ctx.anonymous().len(), 2);
    }

    #[test]
    fn test_unknown_kind_records_diagnostic() {
        let ty = parse(
            r#"{ "kind": "or", "items": [
                { "kind": "base", "name": "string" },
                { "kind": "integerLiteral", "value": 1 }
            ] }"#,
        );
        let config = GenConfig::default();
        let mut ctx = LowerContext::new(&config);
        ctx.enter("TypeAlias Example".to_string());

        let lowered = ctx.lower(&ty, Some("field"));
        assert_eq!(lowered, LuaType::Union(vec![LuaType::Named("string".into())]));
        assert_eq!(lowered.emit(), "string");

        let diagnostics = ctx.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, "integerLiteral");
        assert_eq!(diagnostics[0].declaration, "TypeAlias Example");
        assert_eq!(diagnostics[0].path.as_deref(), Some("field"));
    }

    #[test]
    fn test_unknown_alternatives_leave_no_dangling_separator() {
        let config = GenConfig::default();
        let mut ctx = LowerContext::new(&config);

        let array = parse(
            r#"{ "kind": "array", "element": { "kind": "or", "items": [
                { "kind": "reference", "name": "A" },
                { "kind": "booleanLiteral", "value": true }
            ] } }"#,
        );
        assert_eq!(ctx.lower(&array, None).emit(), "lsp.A[]");

        let nested = parse(
            r#"{ "kind": "or", "items": [
                { "kind": "or", "items": [{ "kind": "and", "items": [] }] },
                { "kind": "reference", "name": "B" },
                { "kind": "integerLiteral", "value": 1 }
            ] }"#,
        );
        assert_eq!(ctx.lower(&nested, None).emit(), "lsp.B");

        let all_unknown = parse(
            r#"{ "kind": "or", "items": [
                { "kind": "and", "items": [] },
                { "kind": "integerLiteral", "value": 1 }
            ] }"#,
        );
        assert_eq!(ctx.lower(&all_unknown, None), LuaType::Placeholder);
        assert_eq!(ctx.diagnostics().len(), 5);
    }

    #[test]
    fn test_custom_simple_types_and_prefix() {
        let config = GenConfig {
            type_prefix: "proto".to_string(),
            simple_types: vec!["string".to_string(), "RegExp".to_string()],
            ..GenConfig::default()
        };
        let mut ctx = LowerContext::new(&config);
        let regexp = ctx.lower(&parse(r#"{ "kind": "base", "name": "RegExp" }"#), None);
        let integer = ctx.lower(&parse(r#"{ "kind": "base", "name": "integer" }"#), None);

        assert_eq!(regexp.emit(), "RegExp");
        assert_eq!(integer.emit(), "proto.integer");
    }
}
