use glam::Vec3;
use gungale_common::{Axis, approach};
use serde::{Deserialize, Serialize};

use crate::tuning::MovementTuning;

/// What happened to the body during one [`KinematicBody::step`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepOutcome {
    pub jumped: bool,
    /// Downward speed at touchdown, set only on the tick the body lands.
    pub impact_speed: Option<f32>,
}

/// A single controllable entity moving over the ground plane y = 0.
///
/// Horizontal motion follows an accelerate-toward-target-speed model along a
/// smoothed facing direction, so the body coasts and turns with momentum
/// instead of snapping to the input direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Smoothed desired horizontal direction. Not normalized.
    pub facing_dir: Vec3,
    pub is_grounded: bool,
    tuning: MovementTuning,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self::new(MovementTuning::default())
    }
}

impl KinematicBody {
    /// A body at rest on the ground at the origin.
    pub fn new(tuning: MovementTuning) -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            facing_dir: Vec3::ZERO,
            is_grounded: true,
            tuning,
        }
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    /// Speed in the xz plane.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }

    /// Advance the body by one tick.
    ///
    /// `jump_requested` must already be edge-triggered; a level-held key would
    /// jump again on every landing tick. `dt` must be strictly positive.
    pub fn step(
        &mut self,
        facing_yaw: f32,
        strafe: Axis,
        forward: Axis,
        jump_requested: bool,
        crouch_held: bool,
        dt: f32,
    ) -> StepOutcome {
        debug_assert!(dt > 0.0, "step needs a positive dt, got {dt}");
        let t = self.tuning;
        let mut outcome = StepOutcome::default();
        let was_grounded = self.is_grounded;

        if !self.is_grounded {
            self.velocity.y -= t.gravity * dt;
            if let Some(limit) = t.max_fall_speed {
                self.velocity.y = self.velocity.y.max(-limit);
            }
        }

        if self.is_grounded && jump_requested {
            self.velocity.y = t.jump_force;
            self.is_grounded = false;
            outcome.jumped = true;
            tracing::debug!(position = ?self.position, "jump");
        }

        // Positive forward input runs along -front, the direction the camera looks.
        let front = Vec3::new(facing_yaw.sin(), 0.0, facing_yaw.cos());
        let right = Vec3::new((-facing_yaw).cos(), 0.0, (-facing_yaw).sin());
        let desired = right * strafe.value() + front * -forward.value();
        self.facing_dir = approach(self.facing_dir, desired, t.control, dt);

        let per_tick = if self.is_grounded { t.friction } else { t.air_drag };
        let decel = t.decay.factor(per_tick, dt);
        let mut horizontal = Vec3::new(self.velocity.x * decel, 0.0, self.velocity.z * decel);
        if horizontal.length() < t.max_speed * t.rest_ratio {
            horizontal = Vec3::ZERO;
        }

        let speed = horizontal.dot(self.facing_dir);
        let target_speed = if crouch_held { t.crouch_speed } else { t.max_speed };
        let accel = (target_speed - speed).max(0.0).min(t.max_accel * dt);
        horizontal.x += self.facing_dir.x * accel;
        horizontal.z += self.facing_dir.z * accel;

        self.velocity.x = horizontal.x;
        self.velocity.z = horizontal.z;
        self.position += self.velocity * dt;

        if self.position.y <= 0.0 {
            if !was_grounded {
                outcome.impact_speed = Some(-self.velocity.y);
            }
            self.position.y = 0.0;
            self.velocity.y = 0.0;
            self.is_grounded = true;
        }

        tracing::trace!(
            position = ?self.position,
            velocity = ?self.velocity,
            grounded = self.is_grounded,
            "body step"
        );
        outcome
    }
}
