// ==============================================================================
// input.rs — KEY STATE + PER-FRAME INPUT SNAPSHOT
// ==============================================================================
// KeyState is the held/released map fed by viewer key events. Identifiers are
// lowercased on the way in, so "A" and "a" (or "ArrowUp" and "arrowup") are
// the same key.
//
// InputSnapshot is the only thing the vehicle model sees: four booleans read
// once per frame.
//
//   steer_left  : "a" | "arrowleft"
//   steer_right : "d" | "arrowright"
//   accelerate  : "w" | "arrowup"
//   decelerate  : "s" | "arrowdown"
// ==============================================================================

use std::collections::HashMap;

const STEER_LEFT_KEYS: [&str; 2] = ["a", "arrowleft"];
const STEER_RIGHT_KEYS: [&str; 2] = ["d", "arrowright"];
const ACCELERATE_KEYS: [&str; 2] = ["w", "arrowup"];
const DECELERATE_KEYS: [&str; 2] = ["s", "arrowdown"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub steer_left: bool,
    pub steer_right: bool,
    pub accelerate: bool,
    pub decelerate: bool,
}

impl InputSnapshot {
    /// Signal-wise OR; a control is held if any source holds it.
    pub fn merge(self, other: InputSnapshot) -> InputSnapshot {
        InputSnapshot {
            steer_left: self.steer_left || other.steer_left,
            steer_right: self.steer_right || other.steer_right,
            accelerate: self.accelerate || other.accelerate,
            decelerate: self.decelerate || other.decelerate,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyState {
    keys: HashMap<String, bool>,
}

#[inline]
fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, pressed: bool) {
        self.keys.insert(normalize_key(key), pressed);
    }

    pub fn press(&mut self, key: &str) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: &str) {
        self.set(key, false);
    }

    pub fn release_all(&mut self) {
        self.keys.values_mut().for_each(|held| *held = false);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.keys.get(&normalize_key(key)).copied().unwrap_or(false)
    }

    fn any_held(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|k| self.keys.get(*k).copied().unwrap_or(false))
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            steer_left: self.any_held(&STEER_LEFT_KEYS),
            steer_right: self.any_held(&STEER_RIGHT_KEYS),
            accelerate: self.any_held(&ACCELERATE_KEYS),
            decelerate: self.any_held(&DECELERATE_KEYS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let mut ks = KeyState::new();
        ks.press("W");
        assert!(ks.is_held("w"));
        assert!(ks.snapshot().accelerate);

        ks.release("w");
        assert!(!ks.snapshot().accelerate);
    }

    #[test]
    fn arrow_aliases_map_to_controls() {
        let mut ks = KeyState::new();
        ks.press("ArrowLeft");
        ks.press("ArrowDown");
        let snap = ks.snapshot();
        assert!(snap.steer_left);
        assert!(snap.decelerate);
        assert!(!snap.steer_right);
        assert!(!snap.accelerate);
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let mut ks = KeyState::new();
        ks.press("q");
        ks.press(" ");
        assert_eq!(ks.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn release_all_clears_every_control() {
        let mut ks = KeyState::new();
        ks.press("a");
        ks.press("arrowup");
        ks.release_all();
        assert_eq!(ks.snapshot(), InputSnapshot::default());
    }

    #[test]
    fn merge_is_or() {
        let a = InputSnapshot { steer_left: true, ..Default::default() };
        let b = InputSnapshot { accelerate: true, ..Default::default() };
        let m = a.merge(b);
        assert!(m.steer_left && m.accelerate);
        assert!(!m.steer_right && !m.decelerate);
    }
}
