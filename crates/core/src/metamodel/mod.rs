//! LSP meta-model to LuaLS annotation generator.
//!
//! This module parses `metaModel.json` and generates:
//! - `---@class` blocks for structures and inline literal types
//! - `---@alias` blocks for enumerations and type aliases
//! - method-name aliases, the `Methods` table and the capability map,
//!   written as a marker-delimited block into a hand-maintained file

mod emitter;
pub mod ir;
pub mod methods;
pub mod patch;
pub mod spec;

pub use emitter::{Annotations, generate, generate_annotations, generate_method_block};
pub use patch::{GENERATED_MARKER, apply_generated_block};
pub use spec::MetaModel;
