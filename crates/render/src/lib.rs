//! Rendering adapter: turns a player frame into view and projection
//! matrices, and defines the renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read simulation state, never mutate it.
//! - The view derives only from the player frame and the output aspect ratio.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
