use glam::Vec2;
use gungale_common::{Axis, TickInput};

use crate::action::{Action, KeyBindings};

/// Turns a level signal into a one-tick pulse on each released-to-pressed change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTrigger {
    was_down: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only when `down` is set and was not set on the previous call.
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.was_down;
        self.was_down = down;
        pressed
    }
}

/// Collects raw key and pointer events between ticks and emits one
/// [`TickInput`] per [`sample`](Self::sample).
#[derive(Debug, Clone)]
pub struct InputSampler {
    bindings: KeyBindings,
    held: [bool; Action::ALL.len()],
    jump: EdgeTrigger,
    last_pointer: Option<Vec2>,
    pointer_accum: Vec2,
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl InputSampler {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: [false; Action::ALL.len()],
            jump: EdgeTrigger::new(),
            last_pointer: None,
            pointer_accum: Vec2::ZERO,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// A bound key went down. Returns the action it maps to, if any.
    pub fn key_down(&mut self, key: &str) -> Option<Action> {
        self.set_key(key, true)
    }

    /// A bound key went up. Returns the action it maps to, if any.
    pub fn key_up(&mut self, key: &str) -> Option<Action> {
        self.set_key(key, false)
    }

    fn set_key(&mut self, key: &str, down: bool) -> Option<Action> {
        let Some(action) = self.bindings.action_for(key) else {
            tracing::trace!(key, "unbound key ignored");
            return None;
        };
        self.set_action(action, down);
        Some(action)
    }

    pub fn set_action(&mut self, action: Action, down: bool) {
        self.held[action as usize] = down;
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action as usize]
    }

    /// Absolute cursor position in screen pixels, y down.
    ///
    /// The first position only seeds the tracker, so a cursor that starts
    /// far from its last known place does not produce a jump in view.
    pub fn pointer_moved(&mut self, position: Vec2) {
        if let Some(last) = self.last_pointer {
            self.pointer_accum += position - last;
        }
        self.last_pointer = Some(position);
    }

    /// Relative pointer motion, for devices that report deltas directly.
    pub fn pointer_delta(&mut self, delta: Vec2) {
        self.pointer_accum += delta;
    }

    /// Forget the last cursor position, e.g. after the cursor was recaptured.
    pub fn reset_pointer(&mut self) {
        self.last_pointer = None;
        self.pointer_accum = Vec2::ZERO;
    }

    /// Emit the input for one tick and clear the pointer accumulator.
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            strafe: Axis::from_keys(
                self.is_held(Action::StrafeLeft),
                self.is_held(Action::StrafeRight),
            ),
            forward: Axis::from_keys(
                self.is_held(Action::MoveBack),
                self.is_held(Action::MoveForward),
            ),
            jump_pressed: self.jump.update(self.is_held(Action::Jump)),
            crouch_held: self.is_held(Action::Crouch),
            pointer_delta: std::mem::take(&mut self.pointer_accum),
        };
        tracing::trace!(?input, "input sampled");
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_trigger_fires_once_per_press() {
        let mut edge = EdgeTrigger::new();
        let pulses: Vec<bool> = [false, true, true, true, false, true]
            .into_iter()
            .map(|down| edge.update(down))
            .collect();
        assert_eq!(pulses, [false, true, false, false, false, true]);
    }

    #[test]
    fn idle_sampler_yields_default_input() {
        let mut sampler = InputSampler::default();
        assert_eq!(sampler.sample(), TickInput::default());
    }

    #[test]
    fn wasd_maps_to_axes() {
        let mut sampler = InputSampler::default();
        sampler.key_down("W");
        sampler.key_down("D");
        let input = sampler.sample();
        assert_eq!(input.forward, Axis::Positive);
        assert_eq!(input.strafe, Axis::Positive);

        sampler.key_down("S");
        sampler.key_up("D");
        sampler.key_down("A");
        let input = sampler.sample();
        assert_eq!(input.forward, Axis::Neutral);
        assert_eq!(input.strafe, Axis::Negative);
    }

    #[test]
    fn held_jump_is_edge_triggered() {
        let mut sampler = InputSampler::default();
        sampler.key_down("Space");
        assert!(sampler.sample().jump_pressed);
        assert!(!sampler.sample().jump_pressed);
        sampler.key_up("Space");
        assert!(!sampler.sample().jump_pressed);
        sampler.key_down("Space");
        assert!(sampler.sample().jump_pressed);
    }

    #[test]
    fn crouch_is_level_triggered() {
        let mut sampler = InputSampler::default();
        sampler.key_down("ControlLeft");
        assert!(sampler.sample().crouch_held);
        assert!(sampler.sample().crouch_held);
        sampler.key_up("ControlLeft");
        assert!(!sampler.sample().crouch_held);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut sampler = InputSampler::default();
        assert_eq!(sampler.key_down("F13"), None);
        assert_eq!(sampler.sample(), TickInput::default());
    }

    #[test]
    fn first_pointer_sample_is_suppressed() {
        let mut sampler = InputSampler::default();
        sampler.pointer_moved(Vec2::new(640.0, 360.0));
        assert_eq!(sampler.sample().pointer_delta, Vec2::ZERO);

        sampler.pointer_moved(Vec2::new(650.0, 355.0));
        sampler.pointer_moved(Vec2::new(652.0, 350.0));
        assert_eq!(sampler.sample().pointer_delta, Vec2::new(12.0, -10.0));
        assert_eq!(sampler.sample().pointer_delta, Vec2::ZERO);
    }

    #[test]
    fn reset_pointer_suppresses_next_sample_again() {
        let mut sampler = InputSampler::default();
        sampler.pointer_moved(Vec2::ZERO);
        sampler.reset_pointer();
        sampler.pointer_moved(Vec2::new(500.0, 500.0));
        assert_eq!(sampler.sample().pointer_delta, Vec2::ZERO);
    }

    #[test]
    fn relative_deltas_accumulate() {
        let mut sampler = InputSampler::default();
        sampler.pointer_delta(Vec2::new(1.0, 2.0));
        sampler.pointer_delta(Vec2::new(3.0, -1.0));
        assert_eq!(sampler.sample().pointer_delta, Vec2::new(4.0, 1.0));
    }

    #[test]
    fn custom_bindings_drive_actions() {
        let mut bindings = KeyBindings::empty();
        bindings.bind("Up", Action::MoveForward);
        let mut sampler = InputSampler::new(bindings);
        assert_eq!(sampler.key_down("W"), None);
        assert_eq!(sampler.key_down("Up"), Some(Action::MoveForward));
        assert_eq!(sampler.sample().forward, Axis::Positive);
    }
}
