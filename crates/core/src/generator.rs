//! Generation driver: load → parse → emit → write/patch.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::config::{GenConfig, GenOptions};
use crate::error::GenError;
use crate::fetch::{fetch_meta_model, read_meta_model_file};
use crate::metamodel::{
    MetaModel, apply_generated_block, generate_annotations, generate_method_block,
};

/// What a generation run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenSummary {
    /// Bytes written to the annotation file.
    pub annotations_len: usize,
    /// Type expressions emitted as empty placeholders.
    pub skipped_types: usize,
    /// Whether the methods file was patched.
    pub patched_methods_file: bool,
}

fn write_file(path: &Path, contents: &str) -> Result<(), GenError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| GenError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| GenError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Current contents of the methods file; a missing file counts as empty.
fn read_methods_file(path: &Path) -> Result<String, GenError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Methods file does not exist yet, creating it.");
            Ok(String::new())
        }
        Err(source) => Err(GenError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load the meta-model text from `--input` or the network.
pub fn load_meta_model(options: &GenOptions, config: &GenConfig) -> Result<MetaModel, GenError> {
    let json = match &options.input {
        Some(path) => read_meta_model_file(path)?,
        None => fetch_meta_model(config, &options.version)?,
    };
    let model = MetaModel::from_json(&json)?;
    debug!(
        meta_model_version = model.meta_data.as_ref().map_or("unknown", |m| m.version.as_str()),
        requests = model.requests.len(),
        notifications = model.notifications.len(),
        structures = model.structures.len(),
        enumerations = model.enumerations.len(),
        type_aliases = model.type_aliases.len(),
        "Parsed meta-model."
    );
    Ok(model)
}

/// Run one generation from an already parsed meta-model.
///
/// The method block is rendered before anything is written so a duplicate
/// identifier leaves both files untouched.
pub fn generate_files(
    model: &MetaModel,
    options: &GenOptions,
    config: &GenConfig,
) -> Result<GenSummary, GenError> {
    let method_block = if options.patches_methods_file() {
        Some(generate_method_block(
            model,
            config,
            options.methods,
            options.capabilities,
        )?)
    } else {
        None
    };

    let annotations = generate_annotations(model, config, &options.version);
    write_file(&options.output_file, &annotations.text)?;
    info!(
        path = %options.output_file.display(),
        bytes = annotations.text.len(),
        skipped_types = annotations.diagnostics.len(),
        "Wrote annotations."
    );

    let mut summary = GenSummary {
        annotations_len: annotations.text.len(),
        skipped_types: annotations.diagnostics.len(),
        patched_methods_file: false,
    };

    if let Some(block) = method_block {
        let old = read_methods_file(&options.methods_file)?;
        let new = apply_generated_block(&old, &block);
        write_file(&options.methods_file, &new)?;
        info!(
            path = %options.methods_file.display(),
            methods = options.methods,
            capabilities = options.capabilities,
            "Patched methods file."
        );
        summary.patched_methods_file = true;
    }

    Ok(summary)
}

/// Full run: load the meta-model, then generate and write.
pub fn run_gen(options: &GenOptions, config: &GenConfig) -> Result<GenSummary, GenError> {
    debug!(
        version = %options.version,
        output_file = %options.output_file.display(),
        input = ?options.input,
        "Starting generation."
    );
    let model = load_meta_model(options, config)?;
    generate_files(&model, options, config)
}
