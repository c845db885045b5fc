//! Collision resolution between the player and falling entities
//!
//! A pass moves each entity and tests it in the same visit, so an early stop
//! leaves the rest of the list exactly as it was.
//!
//! Every removal goes through `Vec::retain`, so each entity is visited exactly
//! once per pass and a removal never shifts an unvisited entity past the cursor.

use std::ops::ControlFlow;

use super::entity::Falling;
use super::rect::Rect;

/// What a collision pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// IDs removed by collision, in collection order
    pub removed: Vec<u32>,
    /// The hit handler asked to stop; entities after the last hit were not tested
    pub halted: bool,
}

/// Move each entity one frame, then remove it if it overlaps `player`, calling
/// `on_hit` for each removal.
///
/// Returning `ControlFlow::Break` from `on_hit` stops the pass: the entity that
/// triggered it is still removed, every later entity is kept unmoved and
/// untested.
pub fn resolve_collisions<F>(
    player: &Rect,
    entities: &mut Vec<Falling>,
    mut on_hit: F,
) -> CollisionOutcome
where
    F: FnMut(&Falling) -> ControlFlow<()>,
{
    let mut outcome = CollisionOutcome::default();
    entities.retain_mut(|entity| {
        if outcome.halted {
            return true;
        }
        entity.update();
        if !player.overlaps(&entity.rect) {
            return true;
        }
        outcome.removed.push(entity.id);
        if on_hit(entity).is_break() {
            outcome.halted = true;
        }
        false
    });
    outcome
}

/// Move debris and collect every piece touching the player, adding `points`
/// per piece
pub fn resolve_debris(
    player: &Rect,
    debris: &mut Vec<Falling>,
    score: &mut u64,
    points: u64,
) -> CollisionOutcome {
    resolve_collisions(player, debris, |_| {
        *score += points;
        ControlFlow::Continue(())
    })
}

/// Move oil slicks and take a life for every one touching the player.
///
/// Stops at the hit that brings `lives` to zero; slicks after it stay where
/// they were.
pub fn resolve_oil_slicks(
    player: &Rect,
    oil_slicks: &mut Vec<Falling>,
    lives: &mut u32,
) -> CollisionOutcome {
    resolve_collisions(player, oil_slicks, |_| {
        *lives = lives.saturating_sub(1);
        if *lives == 0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
}

/// Drop entities that fell past the bottom edge, returning their IDs
pub fn cull_below(entities: &mut Vec<Falling>, canvas_height: f32) -> Vec<u32> {
    let mut culled = Vec::new();
    entities.retain(|entity| {
        if entity.is_below(canvas_height) {
            culled.push(entity.id);
            false
        } else {
            true
        }
    });
    culled
}
