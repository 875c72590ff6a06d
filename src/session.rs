//! Play session lifecycle
//!
//! Owns the arena and the game data, feeds each frame through the simulation
//! and turns the results into phase changes. Presentation code reads
//! `snapshot()` and never touches the state directly.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{ArenaState, FrameEvent, FrameInput, GameData, Outcome, step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title screen, nothing simulated yet
    Start,
    Playing,
    GameOver,
}

/// What one call to `Session::frame` produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub events: Vec<FrameEvent>,
    /// Set on the frame the session ends
    pub game_over: Option<Outcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec3,
    pub facing: f32,
    pub attacking: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec3,
    pub facing: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectibleView {
    pub id: u32,
    pub pos: Vec3,
}

/// Read-only view handed to the renderer and HUD each frame
#[derive(Debug, Clone, Serialize)]
pub struct ArenaSnapshot {
    pub phase: SessionPhase,
    pub player: PlayerView,
    /// Alive enemies only
    pub enemies: Vec<EnemyView>,
    /// Uncollected collectibles only
    pub collectibles: Vec<CollectibleView>,
    pub data: GameData,
    /// Present once the session is over
    pub outcome: Option<Outcome>,
}

pub struct Session {
    settings: Settings,
    seed: u64,
    phase: SessionPhase,
    arena: ArenaState,
    data: GameData,
    /// Seconds left before an armed game over takes effect
    grace: Option<f32>,
}

impl Session {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        let arena = ArenaState::new(seed, settings.tuning.clone());
        let data = Self::fresh_data(&settings, &arena);
        Self {
            settings,
            seed,
            phase: SessionPhase::Start,
            arena,
            data,
            grace: None,
        }
    }

    fn fresh_data(settings: &Settings, arena: &ArenaState) -> GameData {
        GameData::new(
            settings.tuning.max_health,
            arena.total_collectibles(),
            arena.total_enemies(),
        )
    }

    /// Seed used by the next `start_session` (ignored when settings pin one)
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = self.settings.seed.unwrap_or(seed);
    }

    /// (Re)initialize every entity and the game data, then start playing
    pub fn start_session(&mut self) {
        self.arena = ArenaState::new(self.seed, self.settings.tuning.clone());
        self.data = Self::fresh_data(&self.settings, &self.arena);
        self.grace = None;
        self.phase = SessionPhase::Playing;
        log::info!("Session started (seed {})", self.seed);
    }

    /// Advance one rendered frame
    pub fn frame(&mut self, input: &FrameInput, dt: f32) -> FrameReport {
        if self.phase != SessionPhase::Playing {
            return FrameReport::default();
        }
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.settings.max_frame_dt)
        } else {
            0.0
        };

        if let Some(remaining) = self.grace.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                return self.finish();
            }
        }

        let events = step(&mut self.arena, input, dt);
        for event in &events {
            if self.data.apply(event) {
                log::info!("Player destroyed (score {})", self.data.score);
                self.arm_game_over();
            }
        }
        if self.settings.victory_ends_session && self.data.all_collected() {
            self.arm_game_over();
        }

        FrameReport {
            events,
            game_over: None,
        }
    }

    fn arm_game_over(&mut self) {
        if self.grace.is_none() {
            self.grace = Some(self.settings.tuning.game_over_grace);
        }
    }

    fn finish(&mut self) -> FrameReport {
        self.grace = None;
        self.phase = SessionPhase::GameOver;
        let outcome = self.data.outcome();
        log::info!(
            "Game over: {:?} score={} collectibles={}/{} enemies={}",
            outcome,
            self.data.score,
            self.data.collectibles,
            self.data.total_collectibles,
            self.data.enemies_defeated
        );
        FrameReport {
            events: Vec::new(),
            game_over: Some(outcome),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn arena(&self) -> &ArenaState {
        &self.arena
    }

    /// True while a game over is pending
    pub fn ending(&self) -> bool {
        self.grace.is_some()
    }

    pub fn snapshot(&self) -> ArenaSnapshot {
        let player = &self.arena.player;
        ArenaSnapshot {
            phase: self.phase,
            player: PlayerView {
                pos: player.pos,
                facing: player.facing,
                attacking: player.is_attacking(),
            },
            enemies: self
                .arena
                .alive_enemies()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    facing: e.facing,
                })
                .collect(),
            collectibles: self
                .arena
                .remaining_collectibles()
                .map(|c| CollectibleView { id: c.id, pos: c.pos })
                .collect(),
            data: self.data.clone(),
            outcome: (self.phase == SessionPhase::GameOver).then(|| self.data.outcome()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    const DT: f32 = 1.0 / 60.0;

    fn playing() -> Session {
        let mut session = Session::new(Settings::default(), 5);
        session.start_session();
        session
    }

    /// Take every enemy out of play
    fn quiet(session: &mut Session) {
        for enemy in &mut session.arena.enemies {
            enemy.alive = false;
        }
    }

    #[test]
    fn test_start_phase_is_inert() {
        let mut session = Session::new(Settings::default(), 5);
        assert_eq!(session.phase(), SessionPhase::Start);
        let input = FrameInput {
            move_dir: glam::Vec2::new(1.0, 0.0),
            attack: true,
        };
        assert_eq!(session.frame(&input, DT), FrameReport::default());
        assert_eq!(session.arena().player.pos.x, 0.0);
    }

    #[test]
    fn test_game_over_after_grace_delay() {
        let mut session = playing();
        quiet(&mut session);
        session.data.health = 10;
        session.arena.enemies[0].alive = true;
        session.arena.enemies[0].pos = Vec3::new(1.0, ENEMY_HEIGHT, 0.0);

        let report = session.frame(&FrameInput::default(), DT);
        assert!(matches!(report.events[0], FrameEvent::PlayerDamaged { .. }));
        assert_eq!(session.data().health, 0);
        assert!(session.ending());
        assert_eq!(session.phase(), SessionPhase::Playing);

        // 0.4s in: still playing
        for _ in 0..24 {
            assert_eq!(session.frame(&FrameInput::default(), DT).game_over, None);
        }
        assert_eq!(session.phase(), SessionPhase::Playing);

        let mut outcome = None;
        for _ in 0..10 {
            if let Some(o) = session.frame(&FrameInput::default(), DT).game_over {
                outcome = Some(o);
                break;
            }
        }
        assert_eq!(outcome, Some(Outcome::Defeat));
        assert_eq!(session.phase(), SessionPhase::GameOver);
        assert_eq!(session.snapshot().outcome, Some(Outcome::Defeat));

        // Frozen after the end
        assert_eq!(session.frame(&FrameInput::default(), DT), FrameReport::default());
    }

    #[test]
    fn test_restart_restores_initial_values() {
        let mut session = playing();
        let initial = session.snapshot();

        let input = FrameInput {
            move_dir: glam::Vec2::new(-1.0, 0.0),
            attack: true,
        };
        for _ in 0..120 {
            session.frame(&input, DT);
        }
        assert_ne!(session.data().score, 0);

        session.start_session();
        let again = session.snapshot();
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(again.data, GameData::default());
        assert_eq!(again.enemies.len(), 4);
        assert_eq!(again.collectibles.len(), 8);
        assert_eq!(again.player.pos, initial.player.pos);
        for (a, b) in again.enemies.iter().zip(&initial.enemies) {
            assert_eq!(a.pos, b.pos);
        }
        assert!(session.arena().enemies.iter().all(|e| e.hit_ready()));
        assert!(!session.ending());
    }

    #[test]
    fn test_victory_ends_session_when_enabled() {
        let settings = Settings {
            victory_ends_session: true,
            ..Default::default()
        };
        let mut session = Session::new(settings, 5);
        session.start_session();
        quiet(&mut session);
        for c in &mut session.arena.collectibles {
            c.pos = Vec3::new(0.3, COLLECTIBLE_HEIGHT, 0.0);
        }
        let report = session.frame(&FrameInput::default(), DT);
        assert_eq!(report.events.len(), 8);
        assert_eq!(session.data().score, 800);

        let mut outcome = None;
        for _ in 0..40 {
            outcome = outcome.or(session.frame(&FrameInput::default(), DT).game_over);
        }
        assert_eq!(outcome, Some(Outcome::Victory));
        assert_eq!(session.data().health, 100);
    }

    #[test]
    fn test_cleared_arena_keeps_running() {
        let mut session = playing();
        quiet(&mut session);
        for c in &mut session.arena.collectibles {
            c.pos = Vec3::new(0.3, COLLECTIBLE_HEIGHT, 0.0);
        }
        for _ in 0..120 {
            assert_eq!(session.frame(&FrameInput::default(), DT).game_over, None);
        }
        assert!(session.data().all_collected());
        assert!(!session.ending());
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.data().health, 100);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut session = playing();
        quiet(&mut session);
        let input = FrameInput {
            move_dir: glam::Vec2::new(0.0, 1.0),
            attack: false,
        };
        session.frame(&input, 5.0);
        let expected = PLAYER_SPEED * MAX_FRAME_DT;
        assert!((session.arena().player.pos.z - expected).abs() < 1e-5);
    }

    #[test]
    fn test_snapshot_hides_dead_and_collected() {
        let mut session = playing();
        session.arena.enemies[1].alive = false;
        session.arena.collectibles[3].collected = true;
        let snap = session.snapshot();
        assert_eq!(snap.enemies.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3, 4]);
        assert_eq!(snap.collectibles.len(), 7);
        assert!(snap.outcome.is_none());
        assert!(serde_json::to_string(&snap).is_ok());
    }

    #[test]
    fn test_pinned_seed_wins() {
        let settings = Settings {
            seed: Some(77),
            ..Default::default()
        };
        let mut session = Session::new(settings, 1);
        session.set_seed(2);
        session.start_session();
        assert_eq!(session.arena().seed, 77);
    }
}
