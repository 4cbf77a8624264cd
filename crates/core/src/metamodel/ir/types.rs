//! LuaLS annotation IR.
//!
//! This module defines the target-side representation:
//! - LuaType: type syntax (names, arrays, unions, tables, tuples, literals)
//! - LuaField / LuaEnumMember: members of class and enum declarations
//! - LuaDecl: one `---@class` or `---@alias` block
//! - LuaModule: the complete generated file

/// LuaLS type syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LuaType {
    /// Bare or namespaced type name: `string`, `lsp.Range`, `lsp._anonym1.range`
    Named(String),
    /// Array type: `T[]`
    Array(Box<LuaType>),
    /// Union type: `A|B|C`
    Union(Vec<LuaType>),
    /// Map type: `table<K, V>`
    Table { key: Box<LuaType>, value: Box<LuaType> },
    /// String singleton: `"full"`
    StringLiteral(String),
    /// Fixed-size sequence: `{ [1]: A, [2]: B }`
    Tuple(Vec<LuaType>),
    /// Stand-in for a type expression that could not be lowered
    Placeholder,
}

impl LuaType {
    /// Unions with more than one alternative need parentheses in array position.
    pub fn is_multi_union(&self) -> bool {
        matches!(self, LuaType::Union(items) if items.len() > 1)
    }
}

/// A `---@field` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuaField {
    pub name: String,
    pub ty: LuaType,
    pub optional: bool,
    pub docs: Option<String>,
}

/// One `---| value # name` alternative of an enumeration alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuaEnumMember {
    pub name: String,
    pub value: LuaLiteral,
}

/// Literal values that appear in enumeration aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LuaLiteral {
    String(String),
    Int(i64),
}

/// Declaration kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclKind {
    /// ---@class Name: Parent, Mixin
    Class {
        parents: Vec<LuaType>,
        fields: Vec<LuaField>,
    },
    /// ---@alias Name A|B
    Alias { ty: LuaType },
    /// ---@alias Name followed by one `---|` line per member
    Enum { members: Vec<LuaEnumMember> },
}

/// A named declaration with its documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuaDecl {
    pub name: String,
    pub docs: Option<String>,
    pub kind: DeclKind,
}

/// Inline literal lifted to a named class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymousRecord {
    /// 1-based allocation order, unique within a run.
    pub ordinal: usize,
    /// Dotted chain of field names that led to the literal, if any.
    pub path: Option<String>,
    pub decl: LuaDecl,
}

/// Banner information for the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuaHeader {
    pub version: String,
    pub regenerate: String,
    pub aliases: Vec<(String, String)>,
}

/// Complete generated annotation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuaModule {
    pub header: LuaHeader,
    pub structures: Vec<LuaDecl>,
    pub enumerations: Vec<LuaDecl>,
    pub aliases: Vec<LuaDecl>,
    pub anonymous: Vec<AnonymousRecord>,
}
