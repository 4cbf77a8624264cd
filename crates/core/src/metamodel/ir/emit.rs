//! LuaLS annotation emission via the Emit trait.
//!
//! Every IR node renders itself; declarations render as complete comment
//! blocks terminated by a blank line.

use super::docs::reformat;
use super::types::{
    AnonymousRecord, DeclKind, LuaDecl, LuaEnumMember, LuaField, LuaHeader, LuaLiteral, LuaModule,
    LuaType,
};
use super::utils::double_quoted;

/// Trait for emitting annotation text from IR nodes.
pub trait Emit {
    /// Convert the IR node to its annotation string representation.
    fn emit(&self) -> String;
}

/// Append `line` plus a newline, dropping trailing whitespace.
fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn push_docs(out: &mut String, docs: Option<&str>) {
    if let Some(docs) = docs {
        out.push_str(&reformat(docs));
    }
}

// =============================================================================
// Types
// =============================================================================

impl Emit for LuaType {
    fn emit(&self) -> String {
        match self {
            LuaType::Named(name) => name.clone(),
            LuaType::Array(element) => {
                if element.is_multi_union() {
                    format!("({})[]", element.emit())
                } else {
                    format!("{}[]", element.emit())
                }
            }
            LuaType::Union(items) => items.iter().map(Emit::emit).collect::<Vec<_>>().join("|"),
            LuaType::Table { key, value } => format!("table<{}, {}>", key.emit(), value.emit()),
            LuaType::StringLiteral(value) => double_quoted(value),
            LuaType::Tuple(items) => {
                let slots = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| format!("[{}]: {}", i + 1, item.emit()))
                    .collect::<Vec<_>>();
                format!("{{ {} }}", slots.join(", "))
            }
            LuaType::Placeholder => String::new(),
        }
    }
}

impl Emit for LuaLiteral {
    fn emit(&self) -> String {
        match self {
            LuaLiteral::String(s) => double_quoted(s),
            LuaLiteral::Int(i) => i.to_string(),
        }
    }
}

// =============================================================================
// Members
// =============================================================================

impl Emit for LuaField {
    fn emit(&self) -> String {
        let mut out = String::new();
        push_docs(&mut out, self.docs.as_deref());
        let opt = if self.optional { "?" } else { "" };
        push_line(
            &mut out,
            &format!("---@field {}{} {}", self.name, opt, self.ty.emit()),
        );
        out
    }
}

impl Emit for LuaEnumMember {
    fn emit(&self) -> String {
        format!("---| {} # {}\n", self.value.emit(), self.name)
    }
}

// =============================================================================
// Declarations
// =============================================================================

impl Emit for LuaDecl {
    fn emit(&self) -> String {
        let mut out = String::new();
        push_docs(&mut out, self.docs.as_deref());

        match &self.kind {
            DeclKind::Class { parents, fields } => {
                if parents.is_empty() {
                    push_line(&mut out, &format!("---@class {}", self.name));
                } else {
                    let parents = parents.iter().map(Emit::emit).collect::<Vec<_>>();
                    push_line(
                        &mut out,
                        &format!("---@class {}: {}", self.name, parents.join(", ")),
                    );
                }
                for field in fields {
                    out.push_str(&field.emit());
                }
            }
            DeclKind::Alias { ty } => {
                push_line(&mut out, &format!("---@alias {} {}", self.name, ty.emit()));
            }
            DeclKind::Enum { members } => {
                push_line(&mut out, &format!("---@alias {}", self.name));
                for member in members {
                    out.push_str(&member.emit());
                }
            }
        }

        out.push('\n');
        out
    }
}

impl Emit for AnonymousRecord {
    fn emit(&self) -> String {
        self.decl.emit()
    }
}

// =============================================================================
// Module
// =============================================================================

impl Emit for LuaHeader {
    fn emit(&self) -> String {
        let mut out = String::new();
        out.push_str("--[[\n");
        out.push_str("THIS FILE IS GENERATED by lspgen\n");
        out.push_str("DO NOT EDIT MANUALLY\n");
        out.push('\n');
        out.push_str(&format!("Based on LSP protocol {}\n", self.version));
        out.push('\n');
        out.push_str("Regenerate:\n");
        out.push_str(&format!("{}\n", self.regenerate));
        out.push_str("--]]\n");
        out.push('\n');
        out.push_str("---@meta\n");
        out.push_str("error('Cannot require a meta file')\n");
        out.push('\n');
        for (name, target) in &self.aliases {
            out.push_str(&format!("---@alias {name} {target}\n"));
        }
        if !self.aliases.is_empty() {
            out.push('\n');
        }
        out
    }
}

impl Emit for LuaModule {
    fn emit(&self) -> String {
        let mut out = self.header.emit();
        for decl in self
            .structures
            .iter()
            .chain(&self.enumerations)
            .chain(&self.aliases)
        {
            out.push_str(&decl.emit());
        }
        for record in &self.anonymous {
            out.push_str(&record.emit());
        }
        out
    }
}
