//! Ocean Cleanup Defender - a falling-debris arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, session state)
//! - `driver`: Frame loop over a pluggable frame scheduler
//! - `renderer`: WebGPU rendering pipeline
//! - `input`: Keyboard mapping to player intent
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod highscores;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use driver::{FrameHandle, FrameScheduler, GameLoop, ManualScheduler};
pub use highscores::HighScores;
pub use tuning::{ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (the reference frame rate the speeds are tuned for)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Canvas dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player defaults - sits just above the bottom edge
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

    /// Debris (collectible) defaults
    pub const DEBRIS_WIDTH: f32 = 20.0;
    pub const DEBRIS_HEIGHT: f32 = 20.0;
    pub const DEBRIS_SPEED: f32 = 2.0;
    pub const DEBRIS_SPAWN_PERIOD: u64 = 100;
    pub const SCORE_PER_DEBRIS: u64 = 10;

    /// Oil slick (hazard) defaults
    pub const OIL_SLICK_WIDTH: f32 = 60.0;
    pub const OIL_SLICK_HEIGHT: f32 = 30.0;
    pub const OIL_SLICK_SPEED: f32 = 1.5;
    pub const OIL_SLICK_SPAWN_PERIOD: u64 = 200;

    pub const STARTING_LIVES: u32 = 3;

    /// Upper bound on live entities of one kind
    pub const MAX_LIVE_PER_KIND: usize = 64;
}
