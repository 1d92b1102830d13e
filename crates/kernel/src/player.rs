use glam::Vec3;
use gungale_common::{CameraPose, TickInput};

use crate::body::{KinematicBody, StepOutcome};
use crate::camera::FirstPersonCamera;
use crate::tuning::Tuning;

/// Everything the renderer needs from one player tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerFrame {
    pub pose: CameraPose,
    pub fov_degrees: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
}

impl PlayerFrame {
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}

/// A body and the camera riding on it, advanced together once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Player {
    body: KinematicBody,
    camera: FirstPersonCamera,
    last_step: StepOutcome,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            body: KinematicBody::new(tuning.movement),
            camera: FirstPersonCamera::new(tuning.view),
            last_step: StepOutcome::default(),
        }
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut KinematicBody {
        &mut self.body
    }

    pub fn camera(&self) -> &FirstPersonCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FirstPersonCamera {
        &mut self.camera
    }

    /// Run one tick: look, move, animate, derive the pose.
    ///
    /// The body moves with the yaw that includes this tick's pointer motion,
    /// and the camera blends react to the grounded state after the move.
    /// `dt` must be strictly positive.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> PlayerFrame {
        let sensitivity = self.camera.tuning().sensitivity;
        self.camera.turn(input.pointer_delta, sensitivity);

        self.last_step = self.body.step(
            self.camera.look().yaw,
            input.strafe,
            input.forward,
            input.jump_pressed,
            input.crouch_held,
            dt,
        );

        self.camera.animate(input, self.body.is_grounded, dt);
        self.frame()
    }

    /// Jump and landing flags from the most recent [`tick`](Self::tick).
    pub fn last_step(&self) -> StepOutcome {
        self.last_step
    }

    /// The current frame without advancing time.
    pub fn frame(&mut self) -> PlayerFrame {
        PlayerFrame {
            pose: self.camera.pose(self.body.position),
            fov_degrees: self.camera.fov_degrees(),
            position: self.body.position,
            velocity: self.body.velocity,
            grounded: self.body.is_grounded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use gungale_common::Axis;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn initial_frame_is_standing_at_origin() {
        let mut player = Player::new(&Tuning::default());
        let frame = player.frame();
        assert_eq!(frame.position, Vec3::ZERO);
        assert!(frame.grounded);
        assert_eq!(frame.pose.eye, Vec3::new(0.0, 1.5, 0.0));
        assert_eq!(frame.fov_degrees, 60.0);
    }

    #[test]
    fn body_moves_where_the_camera_looks() {
        let mut player = Player::new(&Tuning::default());
        // Turn a quarter to the right, then walk.
        let turn = TickInput {
            pointer_delta: Vec2::new(std::f32::consts::FRAC_PI_2 * 1000.0, 0.0),
            ..TickInput::default()
        };
        player.tick(&turn, DT);
        let walk = TickInput {
            forward: Axis::Positive,
            ..TickInput::default()
        };
        let mut frame = player.frame();
        for _ in 0..60 {
            frame = player.tick(&walk, DT);
        }
        let look = frame.pose.look_direction();
        assert!(look.x > 0.99);
        assert!(frame.velocity.x > 0.0);
        assert!(frame.velocity.z.abs() < 1e-3);
        assert!(frame.position.x > 0.0);
    }

    #[test]
    fn eye_follows_jump() {
        let mut player = Player::new(&Tuning::default());
        let jump = TickInput {
            jump_pressed: true,
            ..TickInput::default()
        };
        let frame = player.tick(&jump, DT);
        assert!(!frame.grounded);
        assert!(frame.pose.eye.y > 1.5);
        assert_eq!(frame.velocity.y, 12.0);
    }

    #[test]
    fn walking_frame_reports_speed_and_narrower_fov() {
        let mut player = Player::new(&Tuning::default());
        let walk = TickInput {
            forward: Axis::Positive,
            ..TickInput::default()
        };
        let mut frame = player.frame();
        for _ in 0..120 {
            frame = player.tick(&walk, DT);
        }
        assert!(frame.horizontal_speed() > 17.0);
        assert!(frame.fov_degrees < 55.1);
    }
}
