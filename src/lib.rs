//! Calculo Crush (workspace facade crate).
//!
//! Re-exports the workspace crates as `calculo_crush::{core,engine,input,term,types}`
//! and holds the command-line plumbing shared by the binaries.

pub mod cli;

pub use calculo_crush_core as core;
pub use calculo_crush_engine as engine;
pub use calculo_crush_input as input;
pub use calculo_crush_term as term;
pub use calculo_crush_types as types;
