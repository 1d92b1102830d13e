use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A digital input axis driven by two opposing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl Axis {
    /// Combine two held keys: positive minus negative.
    pub fn from_keys(negative: bool, positive: bool) -> Self {
        match (negative, positive) {
            (true, false) => Self::Negative,
            (false, true) => Self::Positive,
            _ => Self::Neutral,
        }
    }

    /// -1, 0 or +1.
    pub fn value(self) -> f32 {
        match self {
            Self::Negative => -1.0,
            Self::Neutral => 0.0,
            Self::Positive => 1.0,
        }
    }

    pub fn is_neutral(self) -> bool {
        self == Self::Neutral
    }
}

/// Everything the movement core consumes for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    /// Right is positive.
    pub strafe: Axis,
    /// Forward is positive.
    pub forward: Axis,
    /// True only on the tick the jump key went from released to pressed.
    pub jump_pressed: bool,
    pub crouch_held: bool,
    /// Pointer motion since the previous tick, in pixels.
    pub pointer_delta: Vec2,
}

impl TickInput {
    /// Whether any directional key is held.
    pub fn is_moving(&self) -> bool {
        !self.strafe.is_neutral() || !self.forward.is_neutral()
    }
}

/// One recorded tick: the input and the frame time it was sampled with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(default)]
    pub input: TickInput,
    pub dt: f32,
}

/// Derived camera pose handed to the renderer each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
        }
    }
}

impl CameraPose {
    /// Unit vector from eye to target.
    pub fn look_direction(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Right-handed view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}
