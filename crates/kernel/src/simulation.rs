use glam::Vec3;
use gungale_common::{ScriptStep, TickInput};
use serde::{Deserialize, Serialize};

use crate::clock::sanitize_dt;
use crate::player::{Player, PlayerFrame};
use crate::tuning::Tuning;

/// A record of something observable that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Simulation advanced one tick with the given (sanitized) frame time.
    Stepped { tick: u64, dt: f32 },
    /// Body left the ground from a jump.
    Jumped { tick: u64 },
    /// Body touched the ground after being airborne.
    Landed { tick: u64, impact_speed: f32 },
}

/// The authoritative player simulation.
///
/// Every state change goes through [`step`](Self::step). Given the same tuning
/// and the same sequence of inputs and frame times, two simulations produce
/// bit-identical state, which [`state_hash`](Self::state_hash) makes cheap to
/// compare.
#[derive(Debug, Clone)]
pub struct Simulation {
    player: Player,
    tuning: Tuning,
    tick: u64,
    elapsed: f64,
    /// Append-only log of everything that happened since the last drain.
    event_log: Vec<SimEvent>,
}

impl Simulation {
    /// A player standing at the origin at tick 0.
    pub fn new(tuning: Tuning) -> Self {
        Self {
            player: Player::new(&tuning),
            tuning,
            tick: 0,
            elapsed: 0.0,
            event_log: Vec::new(),
        }
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds since tick 0.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SimEvent] {
        &self.event_log
    }

    /// The current frame without advancing time.
    pub fn frame(&mut self) -> PlayerFrame {
        self.player.frame()
    }

    /// Advance the simulation by one tick.
    ///
    /// A non-positive or non-finite `dt` is replaced with
    /// [`FALLBACK_DT`](crate::FALLBACK_DT).
    pub fn step(&mut self, input: &TickInput, dt: f32) -> PlayerFrame {
        let dt = sanitize_dt(dt);
        self.tick += 1;
        self.elapsed += f64::from(dt);
        let _span = tracing::trace_span!("sim_step", tick = self.tick).entered();

        let frame = self.player.tick(input, dt);
        let outcome = self.player.last_step();

        self.event_log.push(SimEvent::Stepped {
            tick: self.tick,
            dt,
        });
        if outcome.jumped {
            self.event_log.push(SimEvent::Jumped { tick: self.tick });
        }
        if let Some(impact_speed) = outcome.impact_speed {
            tracing::debug!(tick = self.tick, impact_speed, "landed");
            self.event_log.push(SimEvent::Landed {
                tick: self.tick,
                impact_speed,
            });
        }
        frame
    }

    /// Run a recorded input sequence from a fresh simulation.
    pub fn replay(tuning: Tuning, steps: &[ScriptStep]) -> Self {
        let mut sim = Self::new(tuning);
        for step in steps {
            sim.step(&step.input, step.dt);
        }
        tracing::debug!(ticks = sim.tick, hash = sim.state_hash(), "replay finished");
        sim
    }

    /// Deterministic FNV-1a hash over the tick and every float of simulation state.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mix_vec = |h: &mut u64, v: Vec3| {
            for c in v.to_array() {
                mix(h, &c.to_le_bytes());
            }
        };

        let body = self.player.body();
        let camera = self.player.camera();
        let look = camera.look();

        mix(&mut h, &self.tick.to_le_bytes());
        mix_vec(&mut h, body.position);
        mix_vec(&mut h, body.velocity);
        mix_vec(&mut h, body.facing_dir);
        mix(&mut h, &[u8::from(body.is_grounded)]);
        for f in [
            look.yaw,
            look.pitch,
            look.head_phase,
            look.walk_blend,
            look.lean.x,
            look.lean.y,
            camera.stance_height(),
            camera.fov_degrees(),
        ] {
            mix(&mut h, &f.to_le_bytes());
        }
        h
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
