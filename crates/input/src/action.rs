use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A movement action any input device can produce.
///
/// The sampler consumes actions, never raw key names, so rebinding keys does
/// not touch the movement logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    Jump,
    Crouch,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Jump,
        Action::Crouch,
    ];
}

/// Maps key names to actions. Keys without a binding are ignored.
///
/// Uses BTreeMap so serialized bindings come out in a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    keys: BTreeMap<String, Action>,
}

impl Default for KeyBindings {
    /// WASD to move, Space to jump, left Control to crouch.
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind("W", Action::MoveForward);
        bindings.bind("S", Action::MoveBack);
        bindings.bind("A", Action::StrafeLeft);
        bindings.bind("D", Action::StrafeRight);
        bindings.bind("Space", Action::Jump);
        bindings.bind("ControlLeft", Action::Crouch);
        bindings
    }
}

impl KeyBindings {
    /// No keys bound at all.
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Bind `key` to `action`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: impl Into<String>, action: Action) -> Option<Action> {
        self.keys.insert(key.into(), action)
    }

    pub fn unbind(&mut self, key: &str) -> Option<Action> {
        self.keys.remove(key)
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.keys.get(key).copied()
    }

    /// Every key bound to `action`, in key order.
    pub fn keys_for(&self, action: Action) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(move |(_, a)| **a == action)
            .map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_every_action() {
        let bindings = KeyBindings::default();
        for action in Action::ALL {
            assert_eq!(bindings.keys_for(action).count(), 1, "{action:?}");
        }
        assert_eq!(bindings.action_for("W"), Some(Action::MoveForward));
        assert_eq!(bindings.action_for("ControlLeft"), Some(Action::Crouch));
    }

    #[test]
    fn unbound_key_has_no_action() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.action_for("Q"), None);
    }

    #[test]
    fn rebinding_replaces_previous_action() {
        let mut bindings = KeyBindings::default();
        let previous = bindings.bind("Space", Action::Crouch);
        assert_eq!(previous, Some(Action::Jump));
        assert_eq!(bindings.keys_for(Action::Jump).count(), 0);
        assert_eq!(bindings.keys_for(Action::Crouch).count(), 2);
    }

    #[test]
    fn bindings_roundtrip_as_flat_json_map() {
        let mut bindings = KeyBindings::empty();
        bindings.bind("Up", Action::MoveForward);
        let json = serde_json::to_string(&bindings).unwrap();
        assert_eq!(json, r#"{"Up":"move_forward"}"#);
        let back: KeyBindings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bindings);
    }
}
