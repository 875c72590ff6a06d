//! Keyboard and touch input collection
//!
//! Raw DOM events are folded into a set of held movement keys plus an
//! edge-triggered attack flag. The game loop drains it once per frame with
//! `take_frame`. Malformed events (no touches, unknown keys) are ignored.

use std::collections::BTreeSet;

use glam::Vec2;

use crate::consts::SWIPE_THRESHOLD;
use crate::sim::FrameInput;

/// Movement keys the game listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoveKey {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl MoveKey {
    /// Parse a `KeyboardEvent.key` value (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" => Some(MoveKey::W),
            "a" => Some(MoveKey::A),
            "s" => Some(MoveKey::S),
            "d" => Some(MoveKey::D),
            "arrowup" => Some(MoveKey::ArrowUp),
            "arrowdown" => Some(MoveKey::ArrowDown),
            "arrowleft" => Some(MoveKey::ArrowLeft),
            "arrowright" => Some(MoveKey::ArrowRight),
            _ => None,
        }
    }
}

fn is_attack_key(key: &str) -> bool {
    matches!(key, " " | "Space" | "Spacebar")
}

#[derive(Debug, Clone, Copy)]
struct Swipe {
    start: Vec2,
}

/// Accumulates input between frames
#[derive(Debug, Clone)]
pub struct InputCollector {
    held: BTreeSet<MoveKey>,
    swipe: Option<Swipe>,
    swipe_threshold: f32,
    attack: bool,
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}

impl InputCollector {
    pub fn new(swipe_threshold: f32) -> Self {
        Self {
            held: BTreeSet::new(),
            swipe: None,
            swipe_threshold,
            attack: false,
        }
    }

    pub fn key_down(&mut self, key: &str) {
        if is_attack_key(key) {
            self.attack = true;
        } else if let Some(k) = MoveKey::from_key(key) {
            self.held.insert(k);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(k) = MoveKey::from_key(key) {
            self.held.remove(&k);
        }
    }

    /// Touch began; `touches` are client positions of every active touch.
    /// The first touch anchors a swipe, a second finger means attack.
    pub fn touch_start(&mut self, touches: &[Vec2]) {
        let Some(&first) = touches.first() else {
            return;
        };
        self.swipe = Some(Swipe { start: first });
        if touches.len() >= 2 {
            self.attack = true;
        }
    }

    /// Swipe moved: replaces held directions with the dominant swipe axis
    pub fn touch_move(&mut self, touches: &[Vec2]) {
        let (Some(swipe), Some(&current)) = (self.swipe, touches.first()) else {
            return;
        };
        let delta = current - swipe.start;

        self.held.clear();
        if delta.x.abs() > self.swipe_threshold || delta.y.abs() > self.swipe_threshold {
            let key = if delta.x.abs() > delta.y.abs() {
                if delta.x > 0.0 { MoveKey::D } else { MoveKey::A }
            } else if delta.y > 0.0 {
                MoveKey::S
            } else {
                MoveKey::W
            };
            self.held.insert(key);
        }
    }

    pub fn touch_end(&mut self) {
        self.swipe = None;
        self.held.clear();
    }

    pub fn is_swiping(&self) -> bool {
        self.swipe.is_some()
    }

    /// Forget everything (session restart, focus loss)
    pub fn reset(&mut self) {
        self.held.clear();
        self.swipe = None;
        self.attack = false;
    }

    /// Direction from held keys, un-normalized (each axis in -1..=1)
    pub fn move_dir(&self) -> Vec2 {
        let held = |a: MoveKey, b: MoveKey| self.held.contains(&a) || self.held.contains(&b);
        let mut dir = Vec2::ZERO;
        if held(MoveKey::W, MoveKey::ArrowUp) {
            dir.y -= 1.0;
        }
        if held(MoveKey::S, MoveKey::ArrowDown) {
            dir.y += 1.0;
        }
        if held(MoveKey::A, MoveKey::ArrowLeft) {
            dir.x -= 1.0;
        }
        if held(MoveKey::D, MoveKey::ArrowRight) {
            dir.x += 1.0;
        }
        dir
    }

    /// Snapshot for this frame; consumes the attack edge
    pub fn take_frame(&mut self) -> FrameInput {
        let input = FrameInput {
            move_dir: self.move_dir(),
            attack: self.attack,
        };
        self.attack = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_combine() {
        let mut input = InputCollector::default();
        input.key_down("W");
        input.key_down("d");
        assert_eq!(input.take_frame().move_dir, Vec2::new(1.0, -1.0));

        input.key_up("w");
        assert_eq!(input.take_frame().move_dir, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_duplicate_direction_keys() {
        let mut input = InputCollector::default();
        input.key_down("w");
        input.key_down("ArrowUp");
        assert_eq!(input.move_dir(), Vec2::new(0.0, -1.0));

        // Releasing one still leaves the other held
        input.key_up("w");
        assert_eq!(input.move_dir(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputCollector::default();
        input.key_down("a");
        input.key_down("ArrowRight");
        assert_eq!(input.move_dir(), Vec2::ZERO);
    }

    #[test]
    fn test_attack_is_edge_triggered() {
        let mut input = InputCollector::default();
        input.key_down(" ");
        assert!(input.take_frame().attack);
        assert!(!input.take_frame().attack);
        input.key_up(" ");
        input.key_down("Enter");
        assert!(!input.take_frame().attack);
    }

    #[test]
    fn test_swipe_dominant_axis() {
        let mut input = InputCollector::default();
        input.touch_start(&[Vec2::new(100.0, 100.0)]);
        input.touch_move(&[Vec2::new(110.0, 105.0)]);
        assert_eq!(input.move_dir(), Vec2::ZERO);

        input.touch_move(&[Vec2::new(60.0, 90.0)]);
        assert_eq!(input.move_dir(), Vec2::new(-1.0, 0.0));

        input.touch_move(&[Vec2::new(90.0, 160.0)]);
        assert_eq!(input.move_dir(), Vec2::new(0.0, 1.0));

        input.touch_end();
        assert_eq!(input.move_dir(), Vec2::ZERO);
        assert!(!input.is_swiping());
    }

    #[test]
    fn test_swipe_overrides_keys() {
        let mut input = InputCollector::default();
        input.key_down("d");
        input.touch_start(&[Vec2::ZERO]);
        input.touch_move(&[Vec2::new(0.0, -40.0)]);
        assert_eq!(input.move_dir(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_two_finger_attack() {
        let mut input = InputCollector::default();
        input.touch_start(&[Vec2::ZERO, Vec2::new(50.0, 0.0)]);
        assert!(input.take_frame().attack);
        assert!(input.is_swiping());
    }

    #[test]
    fn test_empty_touch_events_ignored() {
        let mut input = InputCollector::default();
        input.touch_start(&[]);
        assert!(!input.is_swiping());
        input.touch_move(&[Vec2::new(500.0, 0.0)]);
        assert_eq!(input.take_frame(), FrameInput::default());
    }

    #[test]
    fn test_arrow_and_letter_keys_are_movement() {
        for key in ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", "w", "A", "s", "D"] {
            assert!(MoveKey::from_key(key).is_some(), "{key}");
        }
        assert_eq!(MoveKey::from_key(" "), None);
        assert_eq!(MoveKey::from_key("Tab"), None);
    }
}
