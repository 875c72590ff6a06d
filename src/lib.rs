//! Cyber Nexus - A neon arena action game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, enemy AI, pickups, combat)
//! - `input`: Keyboard/touch event collection into per-frame input
//! - `session`: Start/playing/game-over lifecycle around the simulation
//! - `settings`: Data-driven game balance and preferences

pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

pub use input::{InputCollector, MoveKey};
pub use session::{ArenaSnapshot, FrameReport, Session, SessionPhase};
pub use settings::{Settings, SettingsError, Tuning};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Half-extent of the square arena on both horizontal axes
    pub const ARENA_BOUND: f32 = 8.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Player hovers this far above the floor
    pub const PLAYER_HEIGHT: f32 = 0.5;

    /// Enemy defaults
    pub const ENEMY_COUNT: usize = 4;
    pub const ENEMY_HEIGHT: f32 = 0.5;
    pub const ENEMY_BASE_SPEED: f32 = 1.5;
    /// Amplitude of the sinusoidal speed pulse
    pub const ENEMY_SPEED_PULSE: f32 = 0.5;
    /// Lateral wobble amplitude (units/s)
    pub const ENEMY_WOBBLE: f32 = 0.3;
    pub const ENEMY_WOBBLE_FREQ_X: f32 = 3.0;
    pub const ENEMY_WOBBLE_FREQ_Z: f32 = 2.5;
    /// Shared period of the wobble (3, 2.5) and speed pulse (1) frequencies
    pub const ENEMY_PHASE_PERIOD: f32 = 4.0 * std::f32::consts::PI;
    /// Enemy phase accumulators start somewhere in [0, this)
    pub const ENEMY_PHASE_RANGE: f32 = 100.0;

    /// Collectible defaults
    pub const COLLECTIBLE_COUNT: usize = 8;
    pub const COLLECTIBLE_HEIGHT: f32 = 0.8;

    /// Contact radius for enemy hits and pickups
    pub const CONTACT_RADIUS: f32 = 1.2;
    /// Area attack reach
    pub const ATTACK_RADIUS: f32 = 2.5;

    pub const MAX_HEALTH: u32 = 100;
    pub const ENEMY_DAMAGE: u32 = 10;
    pub const COLLECTIBLE_POINTS: u64 = 100;
    pub const ENEMY_POINTS: u64 = 250;

    /// Timers (seconds)
    pub const ATTACK_WINDOW: f32 = 0.2;
    pub const ATTACK_COOLDOWN: f32 = 0.5;
    pub const HIT_COOLDOWN: f32 = 1.0;
    pub const GAME_OVER_GRACE: f32 = 0.5;

    /// Largest frame delta fed to the simulation (tab switches, hitches)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Touch swipe dead zone (pixels)
    pub const SWIPE_THRESHOLD: f32 = 20.0;
}

/// Clamp the horizontal (x, z) coordinates of a position to `[-bound, bound]`
#[inline]
pub fn clamp_to_arena(pos: Vec3, bound: f32) -> Vec3 {
    Vec3::new(pos.x.clamp(-bound, bound), pos.y, pos.z.clamp(-bound, bound))
}

/// Yaw (radians about +Y) that faces along an (x, z) direction
#[inline]
pub fn facing_angle(dir: Vec2) -> f32 {
    dir.x.atan2(dir.y)
}
