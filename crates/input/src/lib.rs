//! Desktop input mapped to movement actions, sampled once per tick.
//!
//! # Invariants
//! - Jump is edge-triggered: holding the key yields exactly one press.
//! - The first absolute pointer position never produces look motion.
//! - Recorded scripts replay the exact inputs and frame times they captured.

pub mod action;
pub mod sampler;
pub mod script;

pub use action::{Action, KeyBindings};
pub use sampler::{EdgeTrigger, InputSampler};
pub use script::{InputScript, ScriptError};

pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
