//! Game session state and lifecycle
//!
//! One `GameSession` per game instance. The presentation layer drives it
//! through `start`/`set_player_intent`/`step` and reads the public fields back.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Direction, Falling, FallingKind, Player, Sprite};
use super::spawner::Spawner;
use crate::tuning::GameConfig;

/// Top-level state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, waiting for start
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended; only `start`/`restart` leaves this phase
    GameOver,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DebrisCollected { id: u32 },
    OilSlickHit { id: u32, lives_left: u32 },
    GameOver { final_score: u64 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Balance knobs, fixed for the session's lifetime
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Frames simulated since the last start
    pub frame: u64,
    pub player: Player,
    /// Live debris, in spawn order
    pub debris: Vec<Falling>,
    /// Live oil slicks, in spawn order
    pub oil_slicks: Vec<Falling>,
    /// Score recorded when the run ended
    pub final_score: Option<u64>,
    /// Events produced by the most recent step
    pub events: Vec<GameEvent>,
    spawner: Spawner,
    rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameSession {
    /// Create an idle session; nothing moves until `start`
    pub fn new(config: GameConfig, seed: u64) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("Session created with invalid tuning: {}", e);
        }
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            lives: config.starting_lives,
            frame: 0,
            player: Player::spawn(&config),
            debris: Vec::new(),
            oil_slicks: Vec::new(),
            final_score: None,
            events: Vec::new(),
            spawner: Spawner::new(&config),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            config,
        }
    }

    /// Reset everything and enter `Running`. Valid from any phase.
    pub fn start(&mut self) {
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.frame = 0;
        self.player = Player::spawn(&self.config);
        self.debris.clear();
        self.oil_slicks.clear();
        self.final_score = None;
        self.events.clear();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.next_id = 1;
        self.phase = GamePhase::Running;

        if self.config.may_hit_spawn_cap() {
            let (debris, oil) = self.config.estimated_peak_live();
            log::warn!(
                "Tuning spawns faster than it culls (~{} debris, ~{} oil slicks alive, cap {})",
                debris,
                oil,
                self.config.max_live_per_kind
            );
        }
        log::info!("Session started with seed: {}", self.seed);
    }

    /// Same as `start`; named for the game-over screen
    pub fn restart(&mut self) {
        self.start();
    }

    /// Start a fresh run with a new seed
    pub fn start_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.start();
    }

    /// Advance one frame. No-op unless running.
    pub fn step(&mut self) {
        super::tick::tick(self);
    }

    /// Record input intent; read by the next `step`. Ignored unless running.
    pub fn set_player_intent(&mut self, direction: Direction) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.player.set_intent(direction, self.config.player_speed);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Live entities in draw order: player, debris, oil slicks
    pub fn sprites(&self) -> Vec<Sprite> {
        let mut sprites = Vec::with_capacity(1 + self.debris.len() + self.oil_slicks.len());
        sprites.push(Sprite::from(&self.player));
        sprites.extend(self.debris.iter().map(Sprite::from));
        sprites.extend(self.oil_slicks.iter().map(Sprite::from));
        sprites
    }

    /// Add a falling entity at `x`, unless that kind is already at its cap
    pub fn spawn_falling(&mut self, kind: FallingKind, x: f32) -> Option<u32> {
        let cap = self.config.max_live_per_kind;
        let live = match kind {
            FallingKind::Debris => self.debris.len(),
            FallingKind::OilSlick => self.oil_slicks.len(),
        };
        if live >= cap {
            log::warn!("Spawn cap reached ({} {:?}), skipping spawn", cap, kind);
            return None;
        }

        let id = self.next_entity_id();
        let entity = Falling::spawn(id, kind, x, &self.config);
        log::debug!("Spawned {:?} #{} at x={:.1}", kind, id, x);
        match kind {
            FallingKind::Debris => self.debris.push(entity),
            FallingKind::OilSlick => self.oil_slicks.push(entity),
        }
        Some(id)
    }

    /// Ask the spawner what is due on the current frame and add it
    pub(crate) fn spawn_due(&mut self) {
        let requests = self.spawner.spawn(self.frame, &self.config, &mut self.rng);
        for request in requests {
            self.spawn_falling(request.kind, request.x);
        }
    }

    /// Enter `GameOver`, recording the final score
    pub(crate) fn finish(&mut self) {
        self.phase = GamePhase::GameOver;
        self.final_score = Some(self.score);
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!(
            "Game over: score {} after {} frames",
            self.score,
            self.frame
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = GameSession::new(GameConfig::default(), 1);
        assert_eq!(session.phase, GamePhase::Idle);
        assert_eq!(session.lives, 3);
        assert!(session.debris.is_empty());
        assert!(session.oil_slicks.is_empty());
    }

    #[test]
    fn test_step_while_idle_does_nothing() {
        let mut session = GameSession::new(GameConfig::default(), 1);
        session.step();
        assert_eq!(session.frame, 0);
        assert!(session.debris.is_empty());
    }

    #[test]
    fn test_intent_ignored_unless_running() {
        let mut session = GameSession::new(GameConfig::default(), 1);
        session.set_player_intent(Direction::Left);
        assert_eq!(session.player.vel_x, 0.0);

        session.start();
        session.set_player_intent(Direction::Left);
        assert_eq!(session.player.vel_x, -5.0);
    }

    #[test]
    fn test_start_resets_everything() {
        let mut session = GameSession::new(GameConfig::default(), 1);
        session.start();
        for _ in 0..150 {
            session.step();
        }
        session.score = 40;
        session.lives = 1;
        session.set_player_intent(Direction::Right);

        session.restart();
        assert_eq!(session.phase, GamePhase::Running);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        assert_eq!(session.frame, 0);
        assert!(session.debris.is_empty());
        assert!(session.oil_slicks.is_empty());
        assert_eq!(session.player.vel_x, 0.0);
        assert_eq!(session.final_score, None);
    }

    #[test]
    fn test_spawn_cap_skips_extra_entities() {
        let config = GameConfig {
            max_live_per_kind: 2,
            ..Default::default()
        };
        let mut session = GameSession::new(config, 1);
        session.start();
        assert!(session.spawn_falling(FallingKind::Debris, 0.0).is_some());
        assert!(session.spawn_falling(FallingKind::Debris, 0.0).is_some());
        assert!(session.spawn_falling(FallingKind::Debris, 0.0).is_none());
        assert_eq!(session.debris.len(), 2);
        // Other kind has its own cap
        assert!(session.spawn_falling(FallingKind::OilSlick, 0.0).is_some());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut session = GameSession::new(GameConfig::default(), 1);
        session.start();
        let a = session.spawn_falling(FallingKind::Debris, 0.0);
        let b = session.spawn_falling(FallingKind::OilSlick, 0.0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_sprites_draw_order() {
        use crate::sim::EntityKind;

        let mut session = GameSession::new(GameConfig::default(), 1);
        session.start();
        session.spawn_falling(FallingKind::OilSlick, 0.0);
        session.spawn_falling(FallingKind::Debris, 0.0);
        let kinds: Vec<_> = session.sprites().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![EntityKind::Player, EntityKind::Debris, EntityKind::OilSlick]
        );
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = GameSession::new(GameConfig::default(), 2024);
        let mut b = GameSession::new(GameConfig::default(), 2024);
        a.start();
        b.start();
        for _ in 0..450 {
            a.step();
            b.step();
        }
        let xs = |s: &GameSession| s.debris.iter().map(|d| d.rect.pos.x).collect::<Vec<_>>();
        assert_eq!(xs(&a), xs(&b));
        assert_eq!(a.score, b.score);
    }
}
