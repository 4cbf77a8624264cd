//! LSP meta-model structs for serde deserialization.
//!
//! This module defines the subset of `metaModel.json` needed to produce
//! LuaLS annotations. Keys we do not emit (`params`, `result`,
//! `partialResult`, `registrationOptions`, `since`, `proposed`, ...) are
//! ignored by serde, so their shape never affects parsing.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Root of the meta-model document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaModel {
    /// Version information embedded in the document.
    pub meta_data: Option<MetaData>,
    #[serde(default)]
    pub requests: Vec<Request>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub structures: Vec<Structure>,
    #[serde(default)]
    pub enumerations: Vec<Enumeration>,
    #[serde(default)]
    pub type_aliases: Vec<TypeAlias>,
}

/// `metaData` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaData {
    pub version: String,
}

/// Which side sends a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageDirection {
    ClientToServer,
    ServerToClient,
    Both,
}

/// A request message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub method: String,
    pub message_direction: MessageDirection,
    pub documentation: Option<String>,
    pub server_capability: Option<String>,
}

/// A notification message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub method: String,
    pub message_direction: MessageDirection,
    pub documentation: Option<String>,
    pub server_capability: Option<String>,
}

/// A named record type.
#[derive(Debug, Clone, Deserialize)]
pub struct Structure {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub extends: Vec<TypeExpr>,
    #[serde(default)]
    pub mixins: Vec<TypeExpr>,
    pub documentation: Option<String>,
}

/// A property of a structure or of an inline literal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub optional: bool,
    pub documentation: Option<String>,
}

/// A closed set of named values.
#[derive(Debug, Clone, Deserialize)]
pub struct Enumeration {
    pub name: String,
    pub values: Vec<EnumerationEntry>,
    pub documentation: Option<String>,
}

/// One member of an enumeration.
#[derive(Debug, Clone, Deserialize)]
pub struct EnumerationEntry {
    pub name: String,
    pub value: EnumValue,
    pub documentation: Option<String>,
}

/// Enumeration values are strings or integers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    String(String),
    Integer(i64),
}

/// A named alias for an arbitrary type expression.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeAlias {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    pub documentation: Option<String>,
}

/// Body of a `literal` type expression.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LiteralBody {
    #[serde(default)]
    pub properties: Vec<Property>,
    pub documentation: Option<String>,
}

/// Node of the meta-model type grammar.
///
/// Kinds outside the supported set are kept as [`TypeExpr::Unknown`] so a
/// newer meta-model still parses; lowering reports them and moves on.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Reference { name: String },
    Base { name: String },
    Array { element: Box<TypeExpr> },
    Or { items: Vec<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    StringLiteral { value: String },
    Literal { value: LiteralBody },
    Tuple { items: Vec<TypeExpr> },
    Unknown { kind: String, raw: Value },
}

/// Supported kinds, deserialized from the `kind` tag.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum KnownTypeExpr {
    Reference { name: String },
    Base { name: String },
    Array { element: Box<TypeExpr> },
    Or { items: Vec<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    StringLiteral { value: String },
    Literal { value: LiteralBody },
    Tuple { items: Vec<TypeExpr> },
}

const KNOWN_KINDS: [&str; 8] = [
    "reference",
    "base",
    "array",
    "or",
    "map",
    "stringLiteral",
    "literal",
    "tuple",
];

impl From<KnownTypeExpr> for TypeExpr {
    fn from(known: KnownTypeExpr) -> Self {
        match known {
            KnownTypeExpr::Reference { name } => TypeExpr::Reference { name },
            KnownTypeExpr::Base { name } => TypeExpr::Base { name },
            KnownTypeExpr::Array { element } => TypeExpr::Array { element },
            KnownTypeExpr::Or { items } => TypeExpr::Or { items },
            KnownTypeExpr::Map { key, value } => TypeExpr::Map { key, value },
            KnownTypeExpr::StringLiteral { value } => TypeExpr::StringLiteral { value },
            KnownTypeExpr::Literal { value } => TypeExpr::Literal { value },
            KnownTypeExpr::Tuple { items } => TypeExpr::Tuple { items },
        }
    }
}

impl<'de> Deserialize<'de> for TypeExpr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let kind = raw
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| D::Error::missing_field("kind"))?
            .to_string();

        if !KNOWN_KINDS.contains(&kind.as_str()) {
            return Ok(TypeExpr::Unknown { kind, raw });
        }

        KnownTypeExpr::deserialize(raw)
            .map(TypeExpr::from)
            .map_err(|e| D::Error::custom(format!("invalid `{kind}` type expression: {e}")))
    }
}

impl TypeExpr {
    /// The `kind` tag this node was parsed from.
    pub fn kind(&self) -> &str {
        match self {
            TypeExpr::Reference { .. } => "reference",
            TypeExpr::Base { .. } => "base",
            TypeExpr::Array { .. } => "array",
            TypeExpr::Or { .. } => "or",
            TypeExpr::Map { .. } => "map",
            TypeExpr::StringLiteral { .. } => "stringLiteral",
            TypeExpr::Literal { .. } => "literal",
            TypeExpr::Tuple { .. } => "tuple",
            TypeExpr::Unknown { kind, .. } => kind,
        }
    }
}

impl MetaModel {
    /// Parse a meta-model from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
