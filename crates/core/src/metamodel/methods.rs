//! Method-name and capability tables.
//!
//! Requests and notifications are merged, keyed by their derived Lua
//! identifier and emitted in identifier order:
//! - alias hierarchy `Method.<Direction>.<Kind>` → `Method.<Direction>` → `Method`
//! - `protocol.Methods`, the identifier → method-name table
//! - `protocol._request_name_to_capability`, method → capability path

use std::collections::BTreeMap;

use tracing::debug;

use super::ir::docs::reformat_indented;
use super::ir::utils::{single_quoted, to_lua_identifier};
use super::patch::GENERATED_MARKER;
use super::spec::{MessageDirection, MetaModel};
use crate::config::GenConfig;
use crate::error::GenError;

/// Request or notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    Notification,
}

impl MessageKind {
    const ALL: [Self; 2] = [Self::Request, Self::Notification];

    fn as_str(self) -> &'static str {
        match self {
            Self::Request => "Request",
            Self::Notification => "Notification",
        }
    }
}

/// A concrete sending side. `both` messages belong to each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    ClientToServer,
    ServerToClient,
}

impl Side {
    const ALL: [Self; 2] = [Self::ClientToServer, Self::ServerToClient];

    fn as_str(self) -> &'static str {
        match self {
            Self::ClientToServer => "ClientToServer",
            Self::ServerToClient => "ServerToClient",
        }
    }

    fn includes(self, direction: MessageDirection) -> bool {
        matches!(
            (self, direction),
            (_, MessageDirection::Both)
                | (Self::ClientToServer, MessageDirection::ClientToServer)
                | (Self::ServerToClient, MessageDirection::ServerToClient)
        )
    }
}

/// One message as it appears in the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEntry {
    pub ident: String,
    pub method: String,
    pub kind: MessageKind,
    pub direction: MessageDirection,
    pub documentation: Option<String>,
    pub server_capability: Option<String>,
}

impl MethodEntry {
    /// Capability path segments (`a.b` → `["a", "b"]`).
    pub fn capability_path(&self) -> Option<Vec<&str>> {
        self.server_capability
            .as_deref()
            .map(|cap| cap.split('.').collect())
    }
}

/// Merge requests and notifications, sorted by derived identifier.
///
/// Two messages deriving the same identifier is an error.
pub fn collect_methods(model: &MetaModel) -> Result<Vec<MethodEntry>, GenError> {
    let requests = model.requests.iter().map(|r| MethodEntry {
        ident: to_lua_identifier(&r.method),
        method: r.method.clone(),
        kind: MessageKind::Request,
        direction: r.message_direction,
        documentation: r.documentation.clone(),
        server_capability: r.server_capability.clone(),
    });
    let notifications = model.notifications.iter().map(|n| MethodEntry {
        ident: to_lua_identifier(&n.method),
        method: n.method.clone(),
        kind: MessageKind::Notification,
        direction: n.message_direction,
        documentation: n.documentation.clone(),
        server_capability: n.server_capability.clone(),
    });

    let mut by_ident: BTreeMap<String, MethodEntry> = BTreeMap::new();
    for entry in requests.chain(notifications) {
        if let Some(existing) = by_ident.get(&entry.ident) {
            return Err(GenError::DuplicateIdentifier {
                ident: entry.ident,
                first: existing.method.clone(),
                second: entry.method,
            });
        }
        by_ident.insert(entry.ident.clone(), entry);
    }

    debug!(count = by_ident.len(), "Collected protocol methods");
    Ok(by_ident.into_values().collect())
}

fn emit_method_aliases(entries: &[MethodEntry], namespace: &str, out: &mut String) {
    for side in Side::ALL {
        for kind in MessageKind::ALL {
            out.push_str(&format!(
                "--- @alias {namespace}.{}.{}\n",
                side.as_str(),
                kind.as_str()
            ));
            for entry in entries
                .iter()
                .filter(|e| e.kind == kind && side.includes(e.direction))
            {
                out.push_str(&format!("--- | {},\n", single_quoted(&entry.method)));
            }
            out.push('\n');
        }
    }

    for side in Side::ALL {
        out.push_str(&format!("--- @alias {namespace}.{}\n", side.as_str()));
        for kind in MessageKind::ALL {
            out.push_str(&format!(
                "--- | {namespace}.{}.{}\n",
                side.as_str(),
                kind.as_str()
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!("--- @alias {namespace}\n"));
    for side in Side::ALL {
        out.push_str(&format!("--- | {namespace}.{}\n", side.as_str()));
    }
    out.push('\n');
}

fn emit_methods_table(entries: &[MethodEntry], module: &str, out: &mut String) {
    out.push_str("--- LSP method names.\n");
    out.push_str(&format!("{module}.Methods = {{\n"));
    for entry in entries {
        if let Some(docs) = &entry.documentation {
            out.push_str(&reformat_indented(docs, "  "));
        }
        out.push_str(&format!(
            "  {} = {},\n",
            entry.ident,
            single_quoted(&entry.method)
        ));
    }
    out.push_str("}\n\n");
}

fn emit_capability_table(entries: &[MethodEntry], module: &str, out: &mut String) {
    out.push_str("--- Maps method names to the required server capability\n");
    out.push_str(&format!("{module}._request_name_to_capability = {{\n"));
    for entry in entries {
        let Some(path) = entry.capability_path() else {
            continue;
        };
        let segments = path
            .into_iter()
            .map(single_quoted)
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "  [{}] = {{ {segments} }},\n",
            single_quoted(&entry.method)
        ));
    }
    out.push_str("}\n\n");
}

/// Render the generated tail of the methods file.
///
/// The block starts with [`GENERATED_MARKER`] and ends with `return <module>`.
pub fn render_method_block(
    entries: &[MethodEntry],
    config: &GenConfig,
    methods: bool,
    capabilities: bool,
) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_MARKER);
    out.push_str("\n\n");

    if methods {
        emit_method_aliases(entries, &config.method_namespace, &mut out);
        emit_methods_table(entries, &config.module_table, &mut out);
    }
    if capabilities {
        emit_capability_table(entries, &config.module_table, &mut out);
    }

    out.push_str(&format!("return {}\n", config.module_table));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    const MESSAGES_JSON: &str = r##"{
      "requests": [
        {
          "method": "textDocument/hover",
          "messageDirection": "clientToServer",
          "documentation": "Request to request hover information at a given text document position.",
          "serverCapability": "hoverProvider",
          "result": { "kind": "reference", "name": "Hover" }
        },
        {
          "method": "workspace/configuration",
          "messageDirection": "serverToClient",
          "result": { "kind": "array", "element": { "kind": "reference", "name": "LSPAny" } }
        },
        {
          "method": "textDocument/semanticTokens/full/delta",
          "messageDirection": "clientToServer",
          "serverCapability": "semanticTokensProvider.full.delta"
        }
      ],
      "notifications": [
        { "method": "$/progress", "messageDirection": "both" },
        { "method": "initialized", "messageDirection": "clientToServer" }
      ]
    }"##;

    fn entries() -> Vec<MethodEntry> {
        collect_methods(&MetaModel::from_json(MESSAGES_JSON).unwrap()).unwrap()
    }

    #[test]
    fn test_sorted_by_identifier() {
        let idents = entries().into_iter().map(|e| e.ident).collect::<Vec<_>>();
        assert_eq!(
            idents,
            vec![
                "dollar_progress",
                "initialized",
                "textDocument_hover",
                "textDocument_semanticTokens_full_delta",
                "workspace_configuration",
            ]
        );
    }

    #[test]
    fn test_duplicate_identifier_is_fatal() {
        let model = MetaModel::from_json(
            r#"{
              "requests": [{ "method": "a/b", "messageDirection": "clientToServer" }],
              "notifications": [{ "method": "a.b", "messageDirection": "clientToServer" }]
            }"#,
        )
        .unwrap();

        match collect_methods(&model) {
            Err(GenError::DuplicateIdentifier { ident, first, second }) => {
                assert_eq!(ident, "a_b");
                assert_eq!(first, "a/b");
                assert_eq!(second, "a.b");
            }
            other => panic!("expected duplicate identifier error, got {other:?}"),
        }
    }

    #[test]
    fn test_capability_path_splitting() {
        let entries = entries();
        let delta = entries
            .iter()
            .find(|e| e.method == "textDocument/semanticTokens/full/delta")
            .unwrap();
        assert_eq!(
            delta.capability_path().unwrap(),
            vec!["semanticTokensProvider", "full", "delta"]
        );

        let block = render_method_block(&entries, &GenConfig::default(), false, true);
        assert!(block.contains(
            "  ['textDocument/semanticTokens/full/delta'] = { 'semanticTokensProvider', 'full', 'delta' },\n"
        ));
        assert!(block.contains("  ['textDocument/hover'] = { 'hoverProvider' },\n"));
        assert!(!block.contains("workspace/configuration"), "no capability, no entry");
        assert!(!block.contains("protocol.Methods"), "methods table not requested");
    }

    #[test]
    fn test_both_direction_appears_on_each_side() {
        let block = render_method_block(&entries(), &GenConfig::default(), true, false);

        let c2s = "--- @alias vim.lsp.protocol.Method.ClientToServer.Notification\n\
                   --- | '$/progress',\n\
                   --- | 'initialized',\n\n";
        let s2c = "--- @alias vim.lsp.protocol.Method.ServerToClient.Notification\n\
                   --- | '$/progress',\n\n";
        assert!(block.contains(c2s), "client notifications missing:\n{block}");
        assert!(block.contains(s2c), "server notifications missing:\n{block}");
        assert!(block.contains(
            "--- @alias vim.lsp.protocol.Method.ServerToClient.Request\n--- | 'workspace/configuration',\n\n"
        ));
    }

    #[test]
    fn test_alias_hierarchy() {
        let block = render_method_block(&entries(), &GenConfig::default(), true, false);
        assert!(block.contains(
            "--- @alias vim.lsp.protocol.Method.ClientToServer\n\
             --- | vim.lsp.protocol.Method.ClientToServer.Request\n\
             --- | vim.lsp.protocol.Method.ClientToServer.Notification\n"
        ));
        assert!(block.contains(
            "--- @alias vim.lsp.protocol.Method\n\
             --- | vim.lsp.protocol.Method.ClientToServer\n\
             --- | vim.lsp.protocol.Method.ServerToClient\n"
        ));
    }

    #[test]
    fn test_methods_table_with_docs() {
        let block = render_method_block(&entries(), &GenConfig::default(), true, false);
        assert!(block.contains(
            "protocol.Methods = {\n  dollar_progress = '$/progress',\n  initialized = 'initialized',\n"
        ));
        assert!(block.contains(
            "  --- Request to request hover information at a given text document position.\n  textDocument_hover = 'textDocument/hover',\n"
        ));
    }

    #[test]
    fn test_block_framing() {
        let block = render_method_block(&entries(), &GenConfig::default(), true, true);
        assert!(block.starts_with(GENERATED_MARKER));
        assert!(block.ends_with("return protocol\n"));
        assert_eq!(
            block.lines().filter(|l| l.starts_with("-- Generated by")).count(),
            1,
            "only the leading marker line may look like a marker"
        );
    }
}
