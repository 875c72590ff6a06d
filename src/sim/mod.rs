//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame delta passed in, no wall-clock timers
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod arena;
pub mod autopilot;
pub mod collision;
pub mod game_data;
pub mod state;
pub mod tick;

pub use arena::ArenaBounds;
pub use collision::{Contact, collectibles_in_range, enemies_in_range, within_radius};
pub use game_data::{GameData, Outcome};
pub use state::{ArenaState, COLLECTIBLE_SPAWNS, Collectible, ENEMY_SPAWNS, Enemy, Player};
pub use tick::{FrameEvent, FrameInput, step};
