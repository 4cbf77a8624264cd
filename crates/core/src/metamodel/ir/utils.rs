//! Common utilities for Lua code generation.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Lua keywords that cannot be used as table keys in `name = value` form.
pub static LUA_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
        "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
    ]
    .into_iter()
    .collect()
});

/// Derive a Lua identifier from a method name.
///
/// - A leading `$` becomes `dollar` (`$/progress` → `dollar_progress`)
/// - `/` and any other character outside `[A-Za-z0-9_]` becomes `_`
/// - A leading digit gets a `_` prefix
/// - Lua keywords get a `_` suffix
pub fn to_lua_identifier(method: &str) -> String {
    let (mut ident, rest) = match method.strip_prefix('$') {
        Some(rest) => ("dollar".to_string(), rest),
        None => (String::with_capacity(method.len()), method),
    };

    ident.extend(rest.chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' {
            c
        } else {
            '_'
        }
    }));

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if LUA_RESERVED_WORDS.contains(ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Check that a string is a valid Lua identifier.
pub fn is_lua_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !LUA_RESERVED_WORDS.contains(name)
}

/// Quote a string with double quotes, escaping `\` and `"`.
pub fn double_quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Quote a string with single quotes, escaping `\` and `'`.
pub fn single_quoted(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
