//! Game settings and balance tuning
//!
//! Loaded from LocalStorage on the web and from a JSON file on native.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{COLLECTIBLE_SPAWNS, ENEMY_SPAWNS};

/// Errors raised while loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Gameplay numbers, all in world units and seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_bound: f32,
    pub player_speed: f32,
    pub enemy_base_speed: f32,
    pub enemy_speed_pulse: f32,
    pub enemy_wobble: f32,
    pub contact_radius: f32,
    pub attack_radius: f32,
    pub max_health: u32,
    pub enemy_damage: u32,
    pub collectible_points: u64,
    pub enemy_points: u64,
    pub attack_window: f32,
    pub attack_cooldown: f32,
    pub hit_cooldown: f32,
    pub game_over_grace: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_bound: ARENA_BOUND,
            player_speed: PLAYER_SPEED,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_speed_pulse: ENEMY_SPEED_PULSE,
            enemy_wobble: ENEMY_WOBBLE,
            contact_radius: CONTACT_RADIUS,
            attack_radius: ATTACK_RADIUS,
            max_health: MAX_HEALTH,
            enemy_damage: ENEMY_DAMAGE,
            collectible_points: COLLECTIBLE_POINTS,
            enemy_points: ENEMY_POINTS,
            attack_window: ATTACK_WINDOW,
            attack_cooldown: ATTACK_COOLDOWN,
            hit_cooldown: HIT_COOLDOWN,
            game_over_grace: GAME_OVER_GRACE,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay balance
    pub tuning: Tuning,

    // === Input ===
    /// Swipe distance (pixels) before a touch drag counts as movement
    pub swipe_threshold: f32,

    // === Session ===
    /// Gathering every collectible ends the session like a defeat does.
    /// Off by default: a cleared arena keeps running until the player dies.
    pub victory_ends_session: bool,
    /// Frame delta cap (seconds)
    pub max_frame_dt: f32,
    /// Fixed RNG seed (random per session when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            swipe_threshold: SWIPE_THRESHOLD,
            victory_ends_session: false,
            max_frame_dt: MAX_FRAME_DT,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "cyber_nexus_settings";

    /// Environment variable naming a settings file (native only)
    #[allow(dead_code)]
    const ENV_PATH: &'static str = "CYBER_NEXUS_SETTINGS";

    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        let t = &self.tuning;
        let positive = [
            ("arena_bound", t.arena_bound),
            ("player_speed", t.player_speed),
            ("enemy_base_speed", t.enemy_base_speed),
            ("contact_radius", t.contact_radius),
            ("attack_radius", t.attack_radius),
            ("attack_window", t.attack_window),
            ("attack_cooldown", t.attack_cooldown),
            ("hit_cooldown", t.hit_cooldown),
            ("game_over_grace", t.game_over_grace),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid(format!("{name} must be > 0, got {value}")));
            }
        }
        // Every spawn point must start inside the arena
        let furthest = ENEMY_SPAWNS
            .iter()
            .chain(COLLECTIBLE_SPAWNS.iter())
            .map(|&(x, z)| x.abs().max(z.abs()))
            .fold(0.0_f32, f32::max);
        if t.arena_bound < furthest {
            return Err(SettingsError::Invalid(format!(
                "arena_bound must be >= {furthest} to hold the spawn points, got {}",
                t.arena_bound
            )));
        }
        if t.max_health == 0 {
            return Err(SettingsError::Invalid("max_health must be > 0".into()));
        }
        if !(self.swipe_threshold.is_finite() && self.swipe_threshold >= 0.0) {
            return Err(SettingsError::Invalid(format!(
                "swipe_threshold must be >= 0, got {}",
                self.swipe_threshold
            )));
        }
        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `CYBER_NEXUS_SETTINGS`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_file(std::path::Path::new(&path)) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
