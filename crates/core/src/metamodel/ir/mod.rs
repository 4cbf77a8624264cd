//! Intermediate representation for meta-model to LuaLS annotation generation.
//!
//! Two layers:
//! 1. Lowering: meta-model type expressions and declarations -> Lua IR, with
//!    inline literals lifted into anonymous records
//! 2. Emission: Lua IR -> annotation text via the `Emit` trait
//!
//! ## Module Structure
//!
//! - `types`: Lua IR (LuaType, LuaField, LuaDecl, LuaModule)
//! - `lower`: meta-model -> Lua IR, owns the anonymous record registry
//! - `emit`: Lua IR -> annotation strings
//! - `docs`: documentation comment reformatting
//! - `utils`: identifiers and quoting

pub mod docs;
mod emit;
mod lower;
pub mod types;
pub mod utils;

pub use emit::Emit;
pub use lower::{Diagnostic, LowerContext, lower_meta_model};
