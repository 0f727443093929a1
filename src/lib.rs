//! Typefall (workspace facade crate).
//!
//! Re-exports the workspace crates as `typefall::{core,input,term,types}` so the binary,
//! integration tests and benches share one import path. The implementation lives in the
//! dedicated crates under `crates/`.

pub mod logging;

pub use typefall_core as core;
pub use typefall_input as input;
pub use typefall_term as term;
pub use typefall_types as types;
