use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use lspgen_core::config::{
    DEFAULT_LSP_VERSION, DEFAULT_METHODS_FILE, DEFAULT_OUTPUT_FILE, GenConfig, GenOptions,
};
use lspgen_core::run_gen;

use crate::run_command;

#[derive(Args, Debug, Clone)]
pub struct GenArgs {
    #[arg(
        long = "out",
        value_name = "PATH",
        default_value = DEFAULT_OUTPUT_FILE,
        help = "Annotation file to write (overwritten)"
    )]
    pub out: PathBuf,
    #[arg(
        long = "version",
        value_name = "VERSION",
        default_value = DEFAULT_LSP_VERSION,
        help = "LSP protocol version to generate from"
    )]
    pub version: String,
    #[arg(long = "methods", help = "Write the method-name aliases and Methods table")]
    pub methods: bool,
    #[arg(long = "capabilities", help = "Write the method to server capability map")]
    pub capabilities: bool,
    #[arg(
        long = "methods-file",
        value_name = "PATH",
        default_value = DEFAULT_METHODS_FILE,
        help = "File patched with the generated tables after its marker line"
    )]
    pub methods_file: PathBuf,
    #[arg(
        long = "input",
        value_name = "PATH",
        help = "Read metaModel.json from a local file instead of downloading it"
    )]
    pub input: Option<PathBuf>,
    #[arg(long = "config", value_name = "PATH", help = "TOML file overriding generator defaults")]
    pub config: Option<PathBuf>,
}

impl GenArgs {
    fn options(&self) -> GenOptions {
        GenOptions {
            version: self.version.clone(),
            output_file: self.out.clone(),
            methods_file: self.methods_file.clone(),
            input: self.input.clone(),
            methods: self.methods,
            capabilities: self.capabilities,
        }
    }
}

pub fn run(args: GenArgs) -> i32 {
    run_command(|| run_inner(args))
}

fn run_inner(args: GenArgs) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => GenConfig::load(path).map_err(|err| err.to_string())?,
        None => GenConfig::default(),
    };
    let options = args.options();
    debug!(?options, custom_config = args.config.is_some(), "Resolved gen options.");

    let summary = run_gen(&options, &config).map_err(|err| err.to_string())?;

    println!("Generated {}", options.output_file.display());
    if summary.patched_methods_file {
        println!("Patched {}", options.methods_file.display());
    }
    if summary.skipped_types > 0 {
        println!(
            "Skipped {} unsupported type expression(s), see warnings above",
            summary.skipped_types
        );
    }
    Ok(())
}
