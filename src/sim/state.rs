//! Arena state and entity records
//!
//! Entities are created once per session and never removed: enemies are
//! flagged dead, collectibles flagged collected. Vector order is the stable id
//! order, so iteration is deterministic.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::ArenaBounds;
use crate::consts::*;
use crate::facing_angle;
use crate::settings::Tuning;

/// Enemy spawn points, one per arena corner
pub const ENEMY_SPAWNS: [(f32, f32); ENEMY_COUNT] =
    [(-6.0, -6.0), (6.0, -6.0), (-6.0, 6.0), (6.0, 6.0)];

/// Collectible layout: a cross at radius 4 plus a diagonal square at 3
pub const COLLECTIBLE_SPAWNS: [(f32, f32); COLLECTIBLE_COUNT] = [
    (-4.0, 0.0),
    (4.0, 0.0),
    (0.0, -4.0),
    (0.0, 4.0),
    (-3.0, -3.0),
    (3.0, -3.0),
    (-3.0, 3.0),
    (3.0, 3.0),
];

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Yaw in radians, kept from the last non-zero movement
    pub facing: f32,
    /// Seconds left in the visible attack window
    pub attack_timer: f32,
    /// Seconds before another attack may start
    pub attack_cooldown: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, PLAYER_HEIGHT, 0.0),
            facing: 0.0,
            attack_timer: 0.0,
            attack_cooldown: 0.0,
        }
    }
}

impl Player {
    /// Integrate one frame of movement along an (x, z) direction
    pub fn advance(&mut self, dir: Vec2, speed: f32, dt: f32, bounds: &ArenaBounds) {
        let dir = dir.normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }
        let step = dir * speed * dt;
        self.pos = bounds.clamp(self.pos + Vec3::new(step.x, 0.0, step.y));
        self.facing = facing_angle(dir);
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_timer > 0.0
    }

    pub fn can_attack(&self) -> bool {
        self.attack_cooldown <= 0.0
    }

    /// Count down the attack window and cooldown
    pub fn tick_timers(&mut self, dt: f32) {
        self.attack_timer = (self.attack_timer - dt).max(0.0);
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
    }
}

/// A roaming drone that chases the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec3,
    pub alive: bool,
    /// Yaw toward the player, for the renderer
    pub facing: f32,
    /// Seconds before this enemy can damage the player again
    pub hit_cooldown: f32,
    /// Private clock driving wobble and speed pulse
    pub phase: f32,
}

impl Enemy {
    pub fn new(id: u32, x: f32, z: f32, phase: f32) -> Self {
        Self {
            id,
            pos: Vec3::new(x, ENEMY_HEIGHT, z),
            alive: true,
            facing: 0.0,
            hit_cooldown: 0.0,
            phase,
        }
    }

    pub fn hit_ready(&self) -> bool {
        self.hit_cooldown <= 0.0
    }

    /// Seek toward `target` with wobble and a pulsing speed, then clamp
    pub fn advance(&mut self, target: Vec3, dt: f32, tuning: &Tuning, bounds: &ArenaBounds) {
        self.phase = (self.phase + dt).rem_euclid(ENEMY_PHASE_PERIOD);
        let t = self.phase;

        let seek = (target - self.pos).normalize_or_zero();
        let wobble = Vec3::new(
            (t * ENEMY_WOBBLE_FREQ_X).sin() * tuning.enemy_wobble,
            0.0,
            (t * ENEMY_WOBBLE_FREQ_Z).cos() * tuning.enemy_wobble,
        );
        let speed = tuning.enemy_base_speed + t.sin() * tuning.enemy_speed_pulse;

        let mut pos = bounds.clamp(self.pos + seek * speed * dt + wobble * dt);
        pos.y = ENEMY_HEIGHT;
        self.pos = pos;

        let to_target = target - self.pos;
        if to_target.x != 0.0 || to_target.z != 0.0 {
            self.facing = facing_angle(Vec2::new(to_target.x, to_target.z));
        }
    }
}

/// A crystal worth points when touched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec3,
    pub collected: bool,
}

impl Collectible {
    pub fn new(id: u32, x: f32, z: f32) -> Self {
        Self {
            id,
            pos: Vec3::new(x, COLLECTIBLE_HEIGHT, z),
            collected: false,
        }
    }
}

/// Complete simulation state for one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaState {
    /// Seed the enemy phases were drawn from
    pub seed: u64,
    pub tuning: Tuning,
    pub bounds: ArenaBounds,
    pub player: Player,
    /// Sorted by id
    pub enemies: Vec<Enemy>,
    /// Sorted by id
    pub collectibles: Vec<Collectible>,
    /// Simulated seconds since the session started
    pub elapsed: f32,
    /// Frames stepped
    pub frame: u64,
}

impl ArenaState {
    /// Spawn the initial layout. Same seed and tuning give the same state.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let enemies = ENEMY_SPAWNS
            .iter()
            .enumerate()
            .map(|(i, &(x, z))| {
                let phase = rng.random_range(0.0..ENEMY_PHASE_RANGE);
                Enemy::new(i as u32 + 1, x, z, phase)
            })
            .collect();

        let collectibles = COLLECTIBLE_SPAWNS
            .iter()
            .enumerate()
            .map(|(i, &(x, z))| Collectible::new(i as u32 + 1, x, z))
            .collect();

        Self {
            seed,
            bounds: ArenaBounds::new(tuning.arena_bound),
            tuning,
            player: Player::default(),
            enemies,
            collectibles,
            elapsed: 0.0,
            frame: 0,
        }
    }

    pub fn alive_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    pub fn remaining_collectibles(&self) -> impl Iterator<Item = &Collectible> {
        self.collectibles.iter().filter(|c| !c.collected)
    }

    pub fn total_enemies(&self) -> u32 {
        self.enemies.len() as u32
    }

    pub fn total_collectibles(&self) -> u32 {
        self.collectibles.len() as u32
    }
}
