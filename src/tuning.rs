//! Data-driven game balance
//!
//! Tuning is fixed at build time: `assets/tuning.json` is embedded into the
//! binary and parsed on startup. Missing fields fall back to `consts`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Builtin tuning file
const BUILTIN_TUNING: &str = include_str!("../assets/tuning.json");

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Visible play area (pixels)
    pub canvas_size: Vec2,

    // === Player ===
    pub player_size: Vec2,
    /// Horizontal speed (pixels/frame)
    pub player_speed: f32,
    /// Gap between the player's bottom edge and the canvas bottom
    pub player_bottom_margin: f32,

    // === Debris ===
    pub debris_size: Vec2,
    /// Fall speed (pixels/frame)
    pub debris_speed: f32,
    /// Frames between debris spawns
    pub debris_spawn_period: u64,
    pub score_per_debris: u64,

    // === Oil slicks ===
    pub oil_slick_size: Vec2,
    /// Fall speed (pixels/frame)
    pub oil_slick_speed: f32,
    /// Frames between oil slick spawns
    pub oil_slick_spawn_period: u64,

    pub starting_lives: u32,
    /// Spawns of a kind are skipped while this many are alive
    pub max_live_per_kind: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_size: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),

            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_speed: PLAYER_SPEED,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,

            debris_size: Vec2::new(DEBRIS_WIDTH, DEBRIS_HEIGHT),
            debris_speed: DEBRIS_SPEED,
            debris_spawn_period: DEBRIS_SPAWN_PERIOD,
            score_per_debris: SCORE_PER_DEBRIS,

            oil_slick_size: Vec2::new(OIL_SLICK_WIDTH, OIL_SLICK_HEIGHT),
            oil_slick_speed: OIL_SLICK_SPEED,
            oil_slick_spawn_period: OIL_SLICK_SPAWN_PERIOD,

            starting_lives: STARTING_LIVES,
            max_live_per_kind: MAX_LIVE_PER_KIND,
        }
    }
}

impl GameConfig {
    /// Tuning embedded at build time (falls back to defaults if it is broken)
    pub fn builtin() -> Self {
        match Self::from_json(BUILTIN_TUNING) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Builtin tuning rejected ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn canvas_width(&self) -> f32 {
        self.canvas_size.x
    }

    pub fn canvas_height(&self) -> f32 {
        self.canvas_size.y
    }

    /// Reject values that would break clamping, spawning or termination
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.canvas_size) {
            return Err(ConfigError::invalid("canvas_size", "must be positive"));
        }
        if !is_positive(self.player_size) {
            return Err(ConfigError::invalid("player_size", "must be positive"));
        }
        if !is_positive(self.debris_size) {
            return Err(ConfigError::invalid("debris_size", "must be positive"));
        }
        if !is_positive(self.oil_slick_size) {
            return Err(ConfigError::invalid("oil_slick_size", "must be positive"));
        }
        if self.player_size.x > self.canvas_size.x {
            return Err(ConfigError::invalid("player_size", "wider than the canvas"));
        }
        if self.player_size.y + self.player_bottom_margin > self.canvas_size.y {
            return Err(ConfigError::invalid("player_size", "taller than the canvas"));
        }
        if !(self.player_speed.is_finite() && self.player_speed >= 0.0) {
            return Err(ConfigError::invalid("player_speed", "must be finite and >= 0"));
        }
        if !(self.debris_speed.is_finite() && self.debris_speed > 0.0) {
            return Err(ConfigError::invalid("debris_speed", "must be finite and > 0"));
        }
        if !(self.oil_slick_speed.is_finite() && self.oil_slick_speed > 0.0) {
            return Err(ConfigError::invalid("oil_slick_speed", "must be finite and > 0"));
        }
        if self.debris_spawn_period == 0 {
            return Err(ConfigError::invalid("debris_spawn_period", "must be > 0"));
        }
        if self.oil_slick_spawn_period == 0 {
            return Err(ConfigError::invalid("oil_slick_spawn_period", "must be > 0"));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::invalid("starting_lives", "must be > 0"));
        }
        if self.max_live_per_kind == 0 {
            return Err(ConfigError::invalid("max_live_per_kind", "must be > 0"));
        }
        Ok(())
    }

    /// Steady-state live count per kind when nothing is collected: how many
    /// spawn periods fit in one fall from above the top edge to past the bottom.
    ///
    /// Returns `(debris, oil_slicks)`.
    pub fn estimated_peak_live(&self) -> (usize, usize) {
        let debris = frames_on_screen(self.canvas_size.y, self.debris_size.y, self.debris_speed)
            / self.debris_spawn_period as f32;
        let oil = frames_on_screen(
            self.canvas_size.y,
            self.oil_slick_size.y,
            self.oil_slick_speed,
        ) / self.oil_slick_spawn_period as f32;
        (debris.ceil() as usize, oil.ceil() as usize)
    }

    /// True if spawning can outpace culling under this tuning
    pub fn may_hit_spawn_cap(&self) -> bool {
        let (debris, oil) = self.estimated_peak_live();
        debris > self.max_live_per_kind || oil > self.max_live_per_kind
    }
}

fn is_positive(v: Vec2) -> bool {
    v.is_finite() && v.x > 0.0 && v.y > 0.0
}

/// Frames from spawning at `y = -height` until `y > canvas_height`
fn frames_on_screen(canvas_height: f32, height: f32, speed: f32) -> f32 {
    (canvas_height + height) / speed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_matches_defaults() {
        assert_eq!(GameConfig::builtin(), GameConfig::default());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "player_speed": 8.0 }"#).unwrap();
        assert_eq!(config.player_speed, 8.0);
        assert_eq!(config.debris_spawn_period, DEBRIS_SPAWN_PERIOD);
        assert_eq!(config.canvas_size, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));
    }

    #[test]
    fn test_vec2_fields_parse_as_arrays() {
        let config = GameConfig::from_json(r#"{ "canvas_size": [800.0, 600.0] }"#).unwrap();
        assert_eq!(config.canvas_width(), 800.0);
        assert_eq!(config.canvas_height(), 600.0);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_spawn_period_rejected() {
        let err = GameConfig::from_json(r#"{ "debris_spawn_period": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "debris_spawn_period",
                ..
            }
        ));
    }

    #[test]
    fn test_player_wider_than_canvas_rejected() {
        let config = GameConfig {
            player_size: Vec2::new(500.0, 40.0),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("player_size"));
    }

    #[test]
    fn test_zero_lives_rejected() {
        let config = GameConfig {
            starting_lives: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_peak_live_estimate() {
        let config = GameConfig::default();
        // Debris: (600 + 20) / 2 = 310 frames on screen, one per 100 frames
        // Oil: (600 + 30) / 1.5 = 420 frames on screen, one per 200 frames
        assert_eq!(config.estimated_peak_live(), (4, 3));
        assert!(!config.may_hit_spawn_cap());
    }

    #[test]
    fn test_fast_spawns_flagged() {
        let config = GameConfig {
            debris_spawn_period: 1,
            debris_speed: 0.5,
            ..Default::default()
        };
        assert!(config.may_hit_spawn_cap());
    }
}
