use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec2, Vec3};
use gungale_common::{CameraPose, TickInput, approach};
use serde::{Deserialize, Serialize};

use crate::tuning::ViewTuning;

/// Accumulated look orientation plus the cosmetic state layered on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LookState {
    /// Radians, unbounded.
    pub yaw: f32,
    /// Radians, positive tilts the view down. Clamped inside ±π/2 on every
    /// pose derivation.
    pub pitch: f32,
    /// Head-bob phase accumulator.
    pub head_phase: f32,
    /// 0 when idle, 1 when fully walking.
    pub walk_blend: f32,
    /// x rolls the view, y pitches it.
    pub lean: Vec2,
}

/// First-person camera riding on a [`KinematicBody`](crate::KinematicBody).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FirstPersonCamera {
    look: LookState,
    stance_height: f32,
    fov_degrees: f32,
    tuning: ViewTuning,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self::new(ViewTuning::default())
    }
}

impl FirstPersonCamera {
    /// Standing, idle, looking down -z.
    pub fn new(tuning: ViewTuning) -> Self {
        Self {
            look: LookState::default(),
            stance_height: tuning.stand_height,
            fov_degrees: tuning.fov_idle,
            tuning,
        }
    }

    pub fn look(&self) -> &LookState {
        &self.look
    }

    pub fn look_mut(&mut self) -> &mut LookState {
        &mut self.look
    }

    pub fn tuning(&self) -> &ViewTuning {
        &self.tuning
    }

    /// Smoothed head height above the body's bottom offset.
    pub fn stance_height(&self) -> f32 {
        self.stance_height
    }

    /// Smoothed vertical field of view in degrees.
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Accumulate pointer motion. Pointer right turns right, pointer down tilts down.
    pub fn turn(&mut self, pointer_delta: Vec2, sensitivity: Vec2) {
        self.look.yaw -= pointer_delta.x * sensitivity.x;
        self.look.pitch += pointer_delta.y * sensitivity.y;
    }

    /// Advance stance, head-bob, walk blend, field of view and lean by one tick.
    ///
    /// `grounded` is the body's state after its step for the same tick.
    pub fn animate(&mut self, input: &TickInput, grounded: bool, dt: f32) {
        let t = self.tuning;

        let stance_target = if input.crouch_held {
            t.crouch_height
        } else {
            t.stand_height
        };
        self.stance_height = approach(self.stance_height, stance_target, t.stance_rate, dt);

        let (walk_target, fov_target) = if grounded && input.is_moving() {
            self.look.head_phase += dt * t.head_bob_rate;
            (1.0, t.fov_walk)
        } else {
            (0.0, t.fov_idle)
        };
        self.look.walk_blend = approach(self.look.walk_blend, walk_target, t.walk_blend_rate, dt);
        self.fov_degrees = approach(self.fov_degrees, fov_target, t.fov_rate, dt);

        let lean_target = Vec2::new(
            input.strafe.value() * t.lean_strafe,
            input.forward.value() * t.lean_forward,
        );
        self.look.lean = approach(self.look.lean, lean_target, t.lean_rate, dt);
    }

    /// Eye position before head-bob: body position raised by the stance.
    pub fn eye_anchor(&self, body_position: Vec3) -> Vec3 {
        body_position + Vec3::Y * (self.tuning.bottom_height + self.stance_height)
    }

    /// Derive eye, target and up for the current look state.
    ///
    /// Clamps the stored pitch so the look vector stays off the poles.
    pub fn pose(&mut self, body_position: Vec3) -> CameraPose {
        let t = self.tuning;
        let look = &mut self.look;

        let yawed = rotate_about(Vec3::NEG_Z, Vec3::Y, look.yaw);

        // Geometric clamp against world up and world down.
        let max_up = angle_between(Vec3::Y, yawed) - t.pitch_margin;
        if -look.pitch > max_up {
            look.pitch = -max_up;
        }
        let max_down = -angle_between(Vec3::NEG_Y, yawed) + t.pitch_margin;
        if -look.pitch < max_down {
            look.pitch = -max_down;
        }

        let right = yawed.cross(Vec3::Y).normalize_or_zero();

        // Numeric clamp on the angle actually applied, lean included.
        let limit = (FRAC_PI_2 - t.pitch_limit_margin).max(0.0);
        let pitch_angle = (-look.pitch - look.lean.y).clamp(-limit, limit);
        let look_dir = rotate_about(yawed, right, pitch_angle);

        let (head_sin, head_cos) = (look.head_phase * PI).sin_cos();
        let up = rotate_about(Vec3::Y, look_dir, head_sin * t.step_rotation + look.lean.x);

        let mut bob = right * (head_sin * t.bob_side);
        bob.y = (head_cos * t.bob_up).abs();

        let walk_blend = look.walk_blend;
        let eye = self.eye_anchor(body_position) + bob * walk_blend;
        CameraPose {
            eye,
            target: eye + look_dir,
            up,
        }
    }

    /// Apply pointer motion and derive the pose in one call.
    pub fn update(&mut self, pointer_delta: Vec2, sensitivity: Vec2, body_position: Vec3) -> CameraPose {
        self.turn(pointer_delta, sensitivity);
        self.pose(body_position)
    }
}

/// Rotate `v` about `axis` by `angle` radians, right-handed.
fn rotate_about(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let axis = axis.normalize_or_zero();
    if axis == Vec3::ZERO {
        return v;
    }
    Quat::from_axis_angle(axis, angle) * v
}

/// Unsigned angle between two vectors; 0 when either has zero length.
fn angle_between(a: Vec3, b: Vec3) -> f32 {
    let (la, lb) = (a.length(), b.length());
    if la == 0.0 || lb == 0.0 {
        return 0.0;
    }
    (a.dot(b) / (la * lb)).clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gungale_common::Axis;

    const DT: f32 = 1.0 / 60.0;

    fn walking() -> TickInput {
        TickInput {
            forward: Axis::Positive,
            ..TickInput::default()
        }
    }

    #[test]
    fn rest_pose_looks_down_negative_z() {
        let mut cam = FirstPersonCamera::default();
        let pose = cam.pose(Vec3::ZERO);
        assert_eq!(pose.eye, Vec3::new(0.0, 1.5, 0.0));
        assert!((pose.look_direction() - Vec3::NEG_Z).length() < 1e-6);
        assert!((pose.up - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn large_horizontal_pointer_turns_exactly_one_radian() {
        let mut cam = FirstPersonCamera::default();
        cam.update(Vec2::new(1000.0, 0.0), Vec2::splat(0.001), Vec3::ZERO);
        assert!((cam.look().yaw + 1.0).abs() < 1e-6);
        assert_eq!(cam.look().pitch, 0.0);
    }

    #[test]
    fn pointer_right_turns_view_right() {
        let mut cam = FirstPersonCamera::default();
        let pose = cam.update(Vec2::new(100.0, 0.0), Vec2::splat(0.001), Vec3::ZERO);
        // Right of -z is +x.
        assert!(pose.look_direction().x > 0.0);
    }

    #[test]
    fn pointer_down_tilts_view_down() {
        let mut cam = FirstPersonCamera::default();
        let pose = cam.update(Vec2::new(0.0, 100.0), Vec2::splat(0.001), Vec3::ZERO);
        assert!(pose.look_direction().y < 0.0);
    }

    #[test]
    fn pitch_stays_off_the_poles_for_extreme_deltas() {
        let mut cam = FirstPersonCamera::default();
        let deltas = [1.0e9, -1.0e9, 3.0e4, -7.5e3, 1.0e30, -1.0e30, 0.5];
        for (i, dy) in deltas.iter().enumerate() {
            let pose = cam.update(Vec2::new(i as f32 * 37.0, *dy), Vec2::splat(0.001), Vec3::ZERO);
            let pitch = cam.look().pitch;
            assert!(pitch.abs() < FRAC_PI_2 - 0.0009, "pitch {pitch}");
            let dir = pose.look_direction();
            assert!(dir.dot(Vec3::Y).abs() < 1.0);
            assert!(!dir.is_nan());
            assert!(!pose.up.is_nan());
        }
    }

    #[test]
    fn pitch_clamp_holds_with_full_lean() {
        let mut cam = FirstPersonCamera::default();
        cam.look_mut().lean = Vec2::new(0.0, -0.5);
        let pose = cam.update(Vec2::new(0.0, -1.0e6), Vec2::splat(0.001), Vec3::ZERO);
        assert!(cam.look().pitch.abs() < FRAC_PI_2 - 0.0009);
        assert!(pose.look_direction().y > 0.99);
        assert!(!pose.up.is_nan());
    }

    #[test]
    fn idle_animation_keeps_eye_steady() {
        let mut cam = FirstPersonCamera::default();
        for _ in 0..60 {
            cam.animate(&TickInput::default(), true, DT);
        }
        assert_eq!(cam.look().head_phase, 0.0);
        assert_eq!(cam.look().walk_blend, 0.0);
        assert_eq!(cam.fov_degrees(), 60.0);
        assert_eq!(cam.pose(Vec3::ZERO).eye, Vec3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn walking_blends_bob_and_narrows_fov() {
        let mut cam = FirstPersonCamera::default();
        for _ in 0..120 {
            cam.animate(&walking(), true, DT);
        }
        assert!(cam.look().walk_blend > 0.99);
        assert!((cam.fov_degrees() - 55.0).abs() < 0.01);
        assert!((cam.look().head_phase - 6.0).abs() < 1e-3);
        assert!((cam.look().lean.y - 0.015).abs() < 1e-4);
        assert_eq!(cam.look().lean.x, 0.0);
    }

    #[test]
    fn airborne_walk_input_does_not_bob() {
        let mut cam = FirstPersonCamera::default();
        for _ in 0..30 {
            cam.animate(&walking(), false, DT);
        }
        assert_eq!(cam.look().head_phase, 0.0);
        assert_eq!(cam.look().walk_blend, 0.0);
    }

    #[test]
    fn bob_lifts_eye_while_walking() {
        let mut cam = FirstPersonCamera::default();
        for _ in 0..120 {
            cam.animate(&walking(), true, DT);
        }
        let base = cam.eye_anchor(Vec3::ZERO);
        let pose = cam.pose(Vec3::ZERO);
        let offset = pose.eye - base;
        assert!(offset.y >= 0.0);
        assert!(offset.y <= 0.15 + 1e-6);
        assert!(offset.length() <= (0.1_f32.powi(2) + 0.15_f32.powi(2)).sqrt() + 1e-6);
    }

    #[test]
    fn bob_peak_offsets_eye_sideways_and_rolls_up() {
        let mut cam = FirstPersonCamera::default();
        cam.look_mut().head_phase = 0.5;
        cam.look_mut().walk_blend = 1.0;
        let pose = cam.pose(Vec3::ZERO);

        // sin(0.5 * pi) = 1: full side sway along +x (right of -z), no lift.
        let offset = pose.eye - cam.eye_anchor(Vec3::ZERO);
        assert!((offset - Vec3::new(0.1, 0.0, 0.0)).length() < 1e-6, "{offset:?}");

        // Up rolls by step_rotation about the look axis, toward +x.
        assert!((angle_between(pose.up, Vec3::Y) - 0.01).abs() < 1e-4);
        assert!((pose.up.x - 0.01_f32.sin()).abs() < 1e-6);
        assert!(pose.up.z.abs() < 1e-6);
    }

    #[test]
    fn half_walk_blend_halves_the_sway() {
        let mut cam = FirstPersonCamera::default();
        cam.look_mut().head_phase = 0.5;
        cam.look_mut().walk_blend = 0.5;
        let offset = cam.pose(Vec3::ZERO).eye - cam.eye_anchor(Vec3::ZERO);
        assert!((offset.x - 0.05).abs() < 1e-6);
    }

    #[test]
    fn crouch_lowers_stance() {
        let mut cam = FirstPersonCamera::default();
        let input = TickInput {
            crouch_held: true,
            ..TickInput::default()
        };
        for _ in 0..60 {
            cam.animate(&input, true, DT);
        }
        assert!(cam.stance_height() < 0.01);
        assert!((cam.eye_anchor(Vec3::ZERO).y - 0.5).abs() < 0.01);
    }

    #[test]
    fn strafe_leans_and_rolls_up_vector() {
        let mut cam = FirstPersonCamera::default();
        let input = TickInput {
            strafe: Axis::Positive,
            ..TickInput::default()
        };
        for _ in 0..60 {
            cam.animate(&input, false, DT);
        }
        assert!((cam.look().lean.x - 0.02).abs() < 1e-4);
        let pose = cam.pose(Vec3::ZERO);
        assert!(pose.up.x.abs() > 0.0);
        assert!((pose.up.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn target_is_one_unit_ahead_of_eye() {
        let mut cam = FirstPersonCamera::default();
        let pose = cam.update(Vec2::new(321.0, -123.0), Vec2::splat(0.001), Vec3::new(4.0, 2.0, -7.0));
        assert!(((pose.target - pose.eye).length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn oversized_limit_margin_does_not_panic() {
        let tuning = ViewTuning {
            pitch_limit_margin: 2.0,
            ..ViewTuning::default()
        };
        let mut cam = FirstPersonCamera::new(tuning);
        let pose = cam.update(Vec2::new(0.0, 500.0), Vec2::splat(0.001), Vec3::ZERO);
        assert!(!pose.look_direction().is_nan());
    }

    #[test]
    fn angle_between_zero_vector_is_zero() {
        assert_eq!(angle_between(Vec3::ZERO, Vec3::Y), 0.0);
        assert!((angle_between(Vec3::X, Vec3::Y) - FRAC_PI_2).abs() < 1e-6);
    }
}
