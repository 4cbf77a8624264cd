#![forbid(unsafe_code)]
#![deny(unused_must_use, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
#![allow(missing_docs)]

//! Core of lspgen: LSP meta-model parsing, lowering to LuaLS annotations,
//! method tables, marker patching and the generation driver.

pub mod config;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod metamodel;

pub use config::{GenConfig, GenOptions};
pub use error::GenError;
pub use generator::{GenSummary, run_gen};
