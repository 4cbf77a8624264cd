//! lspgen - LuaLS annotation generator for the LSP meta-model

fn main() {
    lspgen_cli::init_tracing();
    std::process::exit(lspgen_cli::run_cli(std::env::args().collect()));
}
