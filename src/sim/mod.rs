//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `step()` per fixed frame
//! - Seeded RNG only
//! - Stable iteration order (insertion order, removal by filtering)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_intent;
pub use collision::{CollisionOutcome, cull_below, resolve_debris, resolve_oil_slicks};
pub use entity::{Direction, EntityKind, Falling, FallingKind, Player, Sprite};
pub use rect::Rect;
pub use spawner::{SpawnRequest, Spawner};
pub use state::{GameEvent, GamePhase, GameSession};
