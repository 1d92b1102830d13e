//! Shared types for the gungale workspace: per-tick input, camera pose, and the
//! exponential approach used by every smoothed quantity.

pub mod blend;
pub mod types;

pub use blend::{Blend, approach};
pub use types::{Axis, CameraPose, ScriptStep, TickInput};

pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
