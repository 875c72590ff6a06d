//! Per-frame simulation step
//!
//! Advances the arena by one rendered frame and reports what happened as a
//! list of `FrameEvent`s. Stages run in a fixed order: timers, player
//! movement, enemy AI and contact damage, pickups, attack resolution.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Contact, collectibles_in_range, enemies_in_range};
use super::state::ArenaState;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Movement direction on the floor plane (x, z); need not be normalized
    pub move_dir: Vec2,
    /// Attack pressed since the last frame
    pub attack: bool,
}

/// Something that happened during a step, for the game-data aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameEvent {
    PlayerDamaged { enemy_id: u32, amount: u32 },
    CollectiblePicked { collectible_id: u32, points: u64 },
    EnemyDefeated { enemy_id: u32, points: u64 },
    /// An attack went off (whether or not it hit anything)
    AttackStarted,
}

/// Advance the arena by `dt` seconds
pub fn step(state: &mut ArenaState, input: &FrameInput, dt: f32) -> Vec<FrameEvent> {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let mut events = Vec::new();

    state.frame += 1;
    state.elapsed += dt;
    state.player.tick_timers(dt);

    let tuning = &state.tuning;
    let bounds = state.bounds;

    // Player movement
    state
        .player
        .advance(input.move_dir, tuning.player_speed, dt, &bounds);
    let player_pos = state.player.pos;

    // Enemy AI and contact damage
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        enemy.hit_cooldown = (enemy.hit_cooldown - dt).max(0.0);
        enemy.advance(player_pos, dt, tuning, &bounds);

        let contact = Contact::check(enemy.pos, player_pos, tuning.contact_radius);
        if contact.hit && enemy.hit_ready() {
            log::debug!(
                "Enemy {} hit player at distance {:.2}",
                enemy.id,
                contact.distance
            );
            enemy.hit_cooldown = tuning.hit_cooldown;
            events.push(FrameEvent::PlayerDamaged {
                enemy_id: enemy.id,
                amount: tuning.enemy_damage,
            });
        }
    }

    // Pickups
    for idx in collectibles_in_range(&state.collectibles, player_pos, tuning.contact_radius) {
        let collectible = &mut state.collectibles[idx];
        collectible.collected = true;
        log::debug!("Collectible {} picked up", collectible.id);
        events.push(FrameEvent::CollectiblePicked {
            collectible_id: collectible.id,
            points: tuning.collectible_points,
        });
    }

    // Attack resolution (area hit, every enemy in reach)
    if input.attack && state.player.can_attack() {
        state.player.attack_timer = tuning.attack_window;
        state.player.attack_cooldown = tuning.attack_cooldown;
        events.push(FrameEvent::AttackStarted);

        for idx in enemies_in_range(&state.enemies, player_pos, tuning.attack_radius) {
            let enemy = &mut state.enemies[idx];
            enemy.alive = false;
            log::debug!("Enemy {} destroyed", enemy.id);
            events.push(FrameEvent::EnemyDefeated {
                enemy_id: enemy.id,
                points: tuning.enemy_points,
            });
        }
    }

    log::trace!(
        "frame {}: player=({:.2}, {:.2}) events={}",
        state.frame,
        player_pos.x,
        player_pos.z,
        events.len()
    );

    events
}
