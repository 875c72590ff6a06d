//! Health, score and progress bookkeeping
//!
//! `GameData` only changes through `apply`, one `FrameEvent` at a time. Every
//! field is clamped rather than rejected.

use serde::{Deserialize, Serialize};

use super::tick::FrameEvent;
use crate::consts::{COLLECTIBLE_COUNT, ENEMY_COUNT, MAX_HEALTH};

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every collectible gathered
    Victory,
    Defeat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    pub health: u32,
    pub max_health: u32,
    pub score: u64,
    pub collectibles: u32,
    pub total_collectibles: u32,
    pub enemies_defeated: u32,
    pub total_enemies: u32,
}

impl Default for GameData {
    fn default() -> Self {
        Self::new(MAX_HEALTH, COLLECTIBLE_COUNT as u32, ENEMY_COUNT as u32)
    }
}

impl GameData {
    /// Fresh session values: full health, nothing collected
    pub fn new(max_health: u32, total_collectibles: u32, total_enemies: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            score: 0,
            collectibles: 0,
            total_collectibles,
            enemies_defeated: 0,
            total_enemies,
        }
    }

    /// Fold one event into the totals. Returns true when this event took
    /// health from positive to zero.
    pub fn apply(&mut self, event: &FrameEvent) -> bool {
        match *event {
            FrameEvent::PlayerDamaged { amount, .. } => {
                let was_alive = self.health > 0;
                self.health = self.health.saturating_sub(amount).min(self.max_health);
                was_alive && self.health == 0
            }
            FrameEvent::CollectiblePicked { points, .. } => {
                self.score = self.score.saturating_add(points);
                self.collectibles = (self.collectibles + 1).min(self.total_collectibles);
                false
            }
            FrameEvent::EnemyDefeated { points, .. } => {
                self.score = self.score.saturating_add(points);
                self.enemies_defeated = (self.enemies_defeated + 1).min(self.total_enemies);
                false
            }
            FrameEvent::AttackStarted => false,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn all_collected(&self) -> bool {
        self.collectibles >= self.total_collectibles
    }

    pub fn outcome(&self) -> Outcome {
        if self.all_collected() {
            Outcome::Victory
        } else {
            Outcome::Defeat
        }
    }

    /// Health as 0.0..=1.0 for the HUD bar
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn damage(amount: u32) -> FrameEvent {
        FrameEvent::PlayerDamaged { enemy_id: 1, amount }
    }

    #[test]
    fn test_initial_values() {
        let data = GameData::default();
        assert_eq!(data.health, 100);
        assert_eq!(data.max_health, 100);
        assert_eq!(data.score, 0);
        assert_eq!(data.collectibles, 0);
        assert_eq!(data.total_collectibles, 8);
        assert_eq!(data.enemies_defeated, 0);
        assert_eq!(data.total_enemies, 4);
    }

    #[test]
    fn test_health_never_negative() {
        let mut data = GameData::default();
        for _ in 0..9 {
            assert!(!data.apply(&damage(10)));
        }
        assert_eq!(data.health, 10);
        assert!(data.apply(&damage(25)));
        assert_eq!(data.health, 0);
        // Already dead: no second "just died" signal
        assert!(!data.apply(&damage(10)));
        assert_eq!(data.health, 0);
        assert!(data.is_defeated());
    }

    #[test]
    fn test_counters_are_capped() {
        let mut data = GameData::default();
        for id in 0..12 {
            data.apply(&FrameEvent::CollectiblePicked { collectible_id: id, points: 100 });
            data.apply(&FrameEvent::EnemyDefeated { enemy_id: id, points: 250 });
        }
        assert_eq!(data.collectibles, 8);
        assert_eq!(data.enemies_defeated, 4);
        assert_eq!(data.score, 12 * 350);
    }

    #[test]
    fn test_outcome() {
        let mut data = GameData::default();
        assert_eq!(data.outcome(), Outcome::Defeat);
        data.collectibles = data.total_collectibles;
        assert_eq!(data.outcome(), Outcome::Victory);
    }

    #[test]
    fn test_health_fraction() {
        let mut data = GameData::default();
        data.apply(&damage(40));
        assert!((data.health_fraction() - 0.6).abs() < 1e-6);
    }
}
