use clap::ValueEnum;
use glam::Vec2;
use gungale_input::InputSampler;

/// Built-in input patterns for `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Stand still.
    Idle,
    /// Hold forward.
    Walk,
    /// Hold strafe right.
    Strafe,
    /// Walk forward and jump once a second.
    Jump,
    /// Walk forward while crouched.
    Crouch,
    /// Stand still and sweep the cursor in a circle.
    Look,
}

const SCREEN_CENTER: Vec2 = Vec2::new(640.0, 360.0);

impl Scenario {
    /// Feed the raw key and pointer events for `tick` into `sampler`.
    pub fn drive(self, sampler: &mut InputSampler, tick: u64) {
        match self {
            Scenario::Idle => {}
            Scenario::Walk => {
                sampler.key_down("W");
            }
            Scenario::Strafe => {
                sampler.key_down("D");
            }
            Scenario::Jump => {
                sampler.key_down("W");
                if tick % 60 == 0 {
                    sampler.key_down("Space");
                } else {
                    sampler.key_up("Space");
                }
            }
            Scenario::Crouch => {
                sampler.key_down("W");
                sampler.key_down("ControlLeft");
            }
            Scenario::Look => {
                let phase = tick as f32 * 0.05;
                let offset = Vec2::new(phase.cos() * 200.0, phase.sin() * 100.0);
                sampler.pointer_moved(SCREEN_CENTER + offset);
            }
        }
    }
}
