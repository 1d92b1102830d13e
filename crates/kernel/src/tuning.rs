//! Movement and view constants, loadable from JSON.
//!
//! Every field defaults to the stock walking-simulator value, so
//! a tuning file only needs to name what it changes.

use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Errors from loading or validating a tuning file.
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must lie in (0, 1], got {value}")]
    NotAFactor { field: &'static str, value: f32 },
    #[error("crouch_speed ({crouch}) exceeds max_speed ({max})")]
    CrouchFasterThanRun { crouch: f32, max: f32 },
    #[error("{field} must lie in (0, 180) degrees, got {value}")]
    FovOutOfRange { field: &'static str, value: f32 },
    #[error("{field} must lie in (0, pi/2) radians, got {value}")]
    MarginOutOfRange { field: &'static str, value: f32 },
}

/// How the per-tick friction and air drag factors are applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecayModel {
    /// Multiply by the factor once per tick regardless of tick length.
    #[default]
    PerTick,
    /// Raise the factor to `dt * reference_hz`, so a tick of `1 / reference_hz`
    /// seconds decays exactly as `PerTick` does.
    TimeNormalized { reference_hz: f32 },
}

impl DecayModel {
    /// Multiplier to apply to horizontal velocity for one tick of length `dt`.
    pub fn factor(self, per_tick: f32, dt: f32) -> f32 {
        match self {
            Self::PerTick => per_tick,
            Self::TimeNormalized { reference_hz } => per_tick.powf(dt * reference_hz),
        }
    }
}

/// Constants driving [`KinematicBody::step`](crate::KinematicBody::step).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Downward acceleration while airborne (units/s²).
    pub gravity: f32,
    pub max_speed: f32,
    pub crouch_speed: f32,
    /// Vertical velocity set on a jump.
    pub jump_force: f32,
    /// Cap on speed gained per second along the facing direction.
    pub max_accel: f32,
    /// Per-tick horizontal decay while grounded.
    pub friction: f32,
    /// Per-tick horizontal decay while airborne.
    pub air_drag: f32,
    /// Rate at which the facing direction follows input.
    pub control: f32,
    /// Horizontal speeds below `max_speed * rest_ratio` snap to zero.
    pub rest_ratio: f32,
    /// Optional terminal fall speed. `None` lets the body fall without limit.
    pub max_fall_speed: Option<f32>,
    pub decay: DecayModel,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            gravity: 32.0,
            max_speed: 20.0,
            crouch_speed: 5.0,
            jump_force: 12.0,
            max_accel: 150.0,
            friction: 0.86,
            air_drag: 0.98,
            control: 15.0,
            rest_ratio: 0.01,
            max_fall_speed: None,
            decay: DecayModel::PerTick,
        }
    }
}

/// Constants driving the first-person camera and its cosmetic blends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewTuning {
    /// Radians per pointer pixel, x for yaw and y for pitch.
    pub sensitivity: Vec2,
    /// Eye offset from the body origin before stance height is added.
    pub bottom_height: f32,
    pub stand_height: f32,
    pub crouch_height: f32,
    pub stance_rate: f32,
    /// Head phase advance per second while walking.
    pub head_bob_rate: f32,
    pub walk_blend_rate: f32,
    pub fov_idle: f32,
    pub fov_walk: f32,
    pub fov_rate: f32,
    pub lean_rate: f32,
    /// Roll lean per unit of strafe input.
    pub lean_strafe: f32,
    /// Pitch lean per unit of forward input.
    pub lean_forward: f32,
    pub bob_side: f32,
    pub bob_up: f32,
    /// Roll amplitude of the breathing up-vector.
    pub step_rotation: f32,
    /// Gap kept between the look vector and the poles by the geometric clamp.
    pub pitch_margin: f32,
    /// Gap kept from ±π/2 by the numeric clamp on the applied pitch angle.
    pub pitch_limit_margin: f32,
}

impl Default for ViewTuning {
    fn default() -> Self {
        Self {
            sensitivity: Vec2::new(0.001, 0.001),
            bottom_height: 0.5,
            stand_height: 1.0,
            crouch_height: 0.0,
            stance_rate: 20.0,
            head_bob_rate: 3.0,
            walk_blend_rate: 10.0,
            fov_idle: 60.0,
            fov_walk: 55.0,
            fov_rate: 5.0,
            lean_rate: 10.0,
            lean_strafe: 0.02,
            lean_forward: 0.015,
            bob_side: 0.1,
            bob_up: 0.15,
            step_rotation: 0.01,
            pitch_margin: 0.001,
            pitch_limit_margin: 0.0001,
        }
    }
}

/// Complete tuning for one player.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub movement: MovementTuning,
    pub view: ViewTuning,
}

impl Tuning {
    /// Parse and validate a JSON tuning document.
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON tuning file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "loaded tuning");
        Ok(tuning)
    }

    pub fn to_json_pretty(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the integrator cannot run with.
    pub fn validate(&self) -> Result<(), TuningError> {
        let m = &self.movement;
        positive("gravity", m.gravity)?;
        positive("max_speed", m.max_speed)?;
        positive("crouch_speed", m.crouch_speed)?;
        positive("jump_force", m.jump_force)?;
        positive("max_accel", m.max_accel)?;
        positive("control", m.control)?;
        factor("friction", m.friction)?;
        factor("air_drag", m.air_drag)?;
        factor("rest_ratio", m.rest_ratio)?;
        if m.crouch_speed > m.max_speed {
            return Err(TuningError::CrouchFasterThanRun {
                crouch: m.crouch_speed,
                max: m.max_speed,
            });
        }
        if let Some(limit) = m.max_fall_speed {
            positive("max_fall_speed", limit)?;
        }
        if let DecayModel::TimeNormalized { reference_hz } = m.decay {
            positive("decay.reference_hz", reference_hz)?;
        }

        let v = &self.view;
        positive("sensitivity.x", v.sensitivity.x)?;
        positive("sensitivity.y", v.sensitivity.y)?;
        positive("stance_rate", v.stance_rate)?;
        positive("walk_blend_rate", v.walk_blend_rate)?;
        positive("fov_rate", v.fov_rate)?;
        positive("lean_rate", v.lean_rate)?;
        pitch_margin("pitch_margin", v.pitch_margin)?;
        pitch_margin("pitch_limit_margin", v.pitch_limit_margin)?;
        fov("fov_idle", v.fov_idle)?;
        fov("fov_walk", v.fov_walk)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

fn factor(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(TuningError::NotAFactor { field, value })
    }
}

fn fov(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value < 180.0 {
        Ok(())
    } else {
        Err(TuningError::FovOutOfRange { field, value })
    }
}

fn pitch_margin(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value < FRAC_PI_2 {
        Ok(())
    } else {
        Err(TuningError::MarginOutOfRange { field, value })
    }
}
