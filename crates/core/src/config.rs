//! Generator configuration.
//!
//! Everything that is protocol data rather than algorithm lives here: the
//! set of simple type names that are emitted verbatim, the namespace prefix
//! for references, the Lua module names used by the method tables, and the
//! location of the upstream meta-model. Defaults reproduce the stock LSP
//! setup; any field can be overridden from a TOML file.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::GenError;

/// Protocol version used when none is given on the command line.
pub const DEFAULT_LSP_VERSION: &str = "3.18";

/// Default path of the generated annotation file.
pub const DEFAULT_OUTPUT_FILE: &str = "runtime/lua/vim/lsp/_meta/protocol.lua";

/// Default path of the hand-maintained file that receives the method tables.
pub const DEFAULT_METHODS_FILE: &str = "runtime/lua/vim/lsp/protocol.lua";

const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/microsoft/language-server-protocol/gh-pages/_specifications/lsp";

/// Tunables for lowering and emission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GenConfig {
    /// Namespace prepended to every non-simple type name (`lsp` → `lsp.Range`).
    pub type_prefix: String,
    /// Type names emitted verbatim instead of namespaced.
    pub simple_types: Vec<String>,
    /// Fixed aliases written after the banner, as `(name, target)` pairs.
    pub primitive_aliases: Vec<(String, String)>,
    /// Lua local holding the protocol module (`protocol.Methods`, `return protocol`).
    pub module_table: String,
    /// Annotation namespace of the method-name aliases.
    pub method_namespace: String,
    /// Base URL; `/<version>/metaModel/metaModel.json` is appended.
    pub base_url: String,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            type_prefix: "lsp".to_string(),
            simple_types: ["string", "boolean", "integer", "uinteger", "decimal"]
                .into_iter()
                .map(String::from)
                .collect(),
            primitive_aliases: [
                ("lsp.null", "nil"),
                ("uinteger", "integer"),
                ("decimal", "number"),
                ("lsp.DocumentUri", "string"),
                ("lsp.URI", "string"),
            ]
            .into_iter()
            .map(|(name, target)| (name.to_string(), target.to_string()))
            .collect(),
            module_table: "protocol".to_string(),
            method_namespace: "vim.lsp.protocol.Method".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl GenConfig {
    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, GenError> {
        let source = fs::read_to_string(path).map_err(|source| GenError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&source).map_err(|source| GenError::Config {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Whether `name` is emitted without the namespace prefix.
    pub fn is_simple_type(&self, name: &str) -> bool {
        self.simple_types.iter().any(|simple| simple == name)
    }

    /// Fully qualified annotation name for a schema type name.
    pub fn qualified(&self, name: &str) -> String {
        format!("{}.{name}", self.type_prefix)
    }

    /// URL of the meta-model document for a protocol version.
    pub fn meta_model_url(&self, version: &str) -> String {
        format!(
            "{}/{version}/metaModel/metaModel.json",
            self.base_url.trim_end_matches('/')
        )
    }
}

/// Per-run options, normally filled from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenOptions {
    /// Protocol version to generate from.
    pub version: String,
    /// Destination of the annotation file (fully overwritten).
    pub output_file: PathBuf,
    /// Hand-maintained file patched with the method/capability tables.
    pub methods_file: PathBuf,
    /// Read the meta-model from this file instead of fetching it.
    pub input: Option<PathBuf>,
    /// Emit the method-name table.
    pub methods: bool,
    /// Emit the capability requirement map.
    pub capabilities: bool,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            version: DEFAULT_LSP_VERSION.to_string(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            methods_file: PathBuf::from(DEFAULT_METHODS_FILE),
            input: None,
            methods: false,
            capabilities: false,
        }
    }
}

impl GenOptions {
    /// Whether the second file needs patching at all.
    pub fn patches_methods_file(&self) -> bool {
        self.methods || self.capabilities
    }
}
