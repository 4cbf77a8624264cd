//! LuaLS annotation emitter for the LSP meta-model.
//!
//! This module is a thin wrapper around the IR-based generation.
//! The pipeline is:
//! 1. Parse: metaModel.json -> MetaModel
//! 2. Lower: MetaModel -> LuaModule (anonymous records resolved here)
//! 3. Emit: LuaModule -> String (via Emit trait)

use crate::config::GenConfig;
use crate::error::GenError;
use crate::metamodel::ir::{Diagnostic, Emit, lower_meta_model};
use crate::metamodel::methods::{collect_methods, render_method_block};
use crate::metamodel::spec::MetaModel;

/// Generated annotation text plus the type expressions that were skipped.
#[derive(Debug, Clone)]
pub struct Annotations {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Generate the annotation file for a parsed meta-model.
pub fn generate_annotations(model: &MetaModel, config: &GenConfig, version: &str) -> Annotations {
    let (module, diagnostics) = lower_meta_model(model, config, version);
    Annotations {
        text: module.emit(),
        diagnostics,
    }
}

/// Generate the marker-prefixed method/capability block.
pub fn generate_method_block(
    model: &MetaModel,
    config: &GenConfig,
    methods: bool,
    capabilities: bool,
) -> Result<String, GenError> {
    let entries = collect_methods(model)?;
    Ok(render_method_block(&entries, config, methods, capabilities))
}

/// Generate annotations from meta-model JSON text.
pub fn generate(json: &str, config: &GenConfig, version: &str) -> Result<String, GenError> {
    let model = MetaModel::from_json(json)?;
    Ok(generate_annotations(&model, config, version).text)
}
