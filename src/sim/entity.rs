//! Entity variants: the player boat and the things falling toward it

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::GameConfig;

/// Horizontal intent requested by input (or the autopilot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Stop,
    Right,
}

impl Direction {
    /// Build from an axis value; any negative is left, any positive is right
    pub fn from_axis(axis: i32) -> Self {
        match axis.signum() {
            -1 => Direction::Left,
            1 => Direction::Right,
            _ => Direction::Stop,
        }
    }

    /// -1, 0 or +1
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Stop => 0.0,
            Direction::Right => 1.0,
        }
    }
}

/// The player's boat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal velocity (pixels/frame), one of -speed, 0, +speed
    pub vel_x: f32,
}

impl Player {
    /// Centred horizontally, resting just above the bottom edge
    pub fn spawn(config: &GameConfig) -> Self {
        let size = config.player_size;
        let pos = Vec2::new(
            config.canvas_width() / 2.0 - size.x / 2.0,
            config.canvas_height() - size.y - config.player_bottom_margin,
        );
        Self {
            rect: Rect::new(pos, size),
            vel_x: 0.0,
        }
    }

    /// Set velocity from intent; takes effect on the next `update`
    pub fn set_intent(&mut self, direction: Direction, speed: f32) {
        self.vel_x = direction.sign() * speed;
    }

    /// Move by the current velocity and clamp inside the canvas
    pub fn update(&mut self, canvas_width: f32) {
        let max_x = (canvas_width - self.rect.size.x).max(0.0);
        self.rect.pos.x = (self.rect.pos.x + self.vel_x).clamp(0.0, max_x);
    }
}

/// Things that fall from the top of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallingKind {
    /// Collectible: worth points
    Debris,
    /// Hazard: costs a life
    OilSlick,
}

impl FallingKind {
    pub fn size(self, config: &GameConfig) -> Vec2 {
        match self {
            FallingKind::Debris => config.debris_size,
            FallingKind::OilSlick => config.oil_slick_size,
        }
    }

    pub fn speed(self, config: &GameConfig) -> f32 {
        match self {
            FallingKind::Debris => config.debris_speed,
            FallingKind::OilSlick => config.oil_slick_speed,
        }
    }
}

/// A falling entity (debris or oil slick)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Falling {
    pub id: u32,
    pub kind: FallingKind,
    pub rect: Rect,
    /// Fall speed (pixels/frame)
    pub speed: f32,
}

impl Falling {
    /// Create at horizontal position `x`, fully above the top edge
    pub fn spawn(id: u32, kind: FallingKind, x: f32, config: &GameConfig) -> Self {
        let size = kind.size(config);
        Self {
            id,
            kind,
            rect: Rect::new(Vec2::new(x, -size.y), size),
            speed: kind.speed(config),
        }
    }

    pub fn update(&mut self) {
        self.rect.pos.y += self.speed;
    }

    /// Fully below the visible area
    pub fn is_below(&self, canvas_height: f32) -> bool {
        self.rect.pos.y > canvas_height
    }
}

/// Entity variant, used by the presentation layer to pick a fill colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Debris,
    OilSlick,
}

impl From<FallingKind> for EntityKind {
    fn from(kind: FallingKind) -> Self {
        match kind {
            FallingKind::Debris => EntityKind::Debris,
            FallingKind::OilSlick => EntityKind::OilSlick,
        }
    }
}

/// Everything the renderer needs to draw one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: EntityKind,
    pub rect: Rect,
}

impl From<&Falling> for Sprite {
    fn from(falling: &Falling) -> Self {
        Self {
            kind: falling.kind.into(),
            rect: falling.rect,
        }
    }
}

impl From<&Player> for Sprite {
    fn from(player: &Player) -> Self {
        Self {
            kind: EntityKind::Player,
            rect: player.rect,
        }
    }
}
