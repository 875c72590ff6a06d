//! Idle/demo mode - the game plays itself
//!
//! Produces the same `FrameInput` a human would, so the simulation does not
//! know the difference.

use glam::{Vec2, Vec3};

use super::collision::{nearest, within_radius};
use super::state::ArenaState;
use super::tick::FrameInput;

/// Pick a heading and decide whether to swing
pub fn drive(state: &ArenaState) -> FrameInput {
    let player = &state.player;
    let tuning = &state.tuning;

    let crystals: Vec<Vec3> = state.remaining_collectibles().map(|c| c.pos).collect();
    let enemies: Vec<Vec3> = state.alive_enemies().map(|e| e.pos).collect();

    // Crystals first, then hunt whatever is left
    let target = nearest(player.pos, &crystals).or_else(|| nearest(player.pos, &enemies));

    let move_dir = target
        .map(|t| {
            let to = t - player.pos;
            Vec2::new(to.x, to.z)
        })
        .filter(|d| d.length_squared() > 1e-4)
        .map(Vec2::normalize)
        .unwrap_or(Vec2::ZERO);

    let attack = player.can_attack()
        && enemies
            .iter()
            .any(|&e| within_radius(player.pos, e, tuning.attack_radius * 0.9));

    FrameInput { move_dir, attack }
}
