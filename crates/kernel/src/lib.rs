//! Movement kernel: kinematic body, first-person camera, tuning and the
//! deterministic player simulation built from them.
//!
//! # Invariants
//! - After every body step the body is at or above the ground plane, and a
//!   grounded body has zero vertical velocity.
//! - Camera pitch stays strictly inside ±π/2, so the look vector never
//!   reaches a pole.
//! - The simulation is pure with respect to its inputs: the same tuning and
//!   the same sequence of inputs and frame times yield the same state hash.

pub mod body;
pub mod camera;
pub mod clock;
pub mod player;
pub mod simulation;
pub mod tuning;

pub use body::{KinematicBody, StepOutcome};
pub use camera::{FirstPersonCamera, LookState};
pub use clock::{FALLBACK_DT, FrameClock, FrameTimer, sanitize_dt};
pub use player::{Player, PlayerFrame};
pub use simulation::{SimEvent, Simulation};
pub use tuning::{DecayModel, MovementTuning, Tuning, TuningError, ViewTuning};

/// Returns the crate version.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
}
