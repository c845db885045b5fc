//! Idle/demo mode: a simple AI that plays the game
//!
//! Produces the same kind of intent a keyboard would, so it drives the session
//! through the normal input path.

use super::entity::{Direction, Falling};
use super::state::GameSession;

/// How far above the player an oil slick starts to count as a threat (pixels)
const DANGER_ZONE: f32 = 160.0;

/// Pick an intent: dodge the closest threatening oil slick, otherwise chase
/// the lowest debris that can still be caught.
pub fn autopilot_intent(session: &GameSession) -> Direction {
    let player = session.player.rect;
    // Pad by one frame of travel so we start dodging before contact
    let pad = session.config.player_speed;

    let threat = session
        .oil_slicks
        .iter()
        .filter(|oil| {
            let above_by = player.top() - oil.rect.bottom();
            above_by < DANGER_ZONE
                && oil.rect.top() < player.bottom()
                && oil.rect.left() < player.right() + pad
                && oil.rect.right() > player.left() - pad
        })
        .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()));

    if let Some(oil) = threat {
        return dodge(session, oil);
    }

    let target = session
        .debris
        .iter()
        .filter(|d| d.rect.bottom() <= player.bottom())
        .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()));

    match target {
        Some(debris) => steer_toward(player.center().x, debris.rect.center().x, pad),
        None => steer_toward(
            player.center().x,
            session.config.canvas_width() / 2.0,
            pad,
        ),
    }
}

/// Move to whichever side of the slick has room for the boat
fn dodge(session: &GameSession, oil: &Falling) -> Direction {
    let player = session.player.rect;
    let room_left = oil.rect.left();
    let room_right = session.config.canvas_width() - oil.rect.right();
    let fits_left = room_left >= player.size.x;
    let fits_right = room_right >= player.size.x;

    match (fits_left, fits_right) {
        (true, false) => Direction::Left,
        (false, true) => Direction::Right,
        _ => {
            // Both (or neither) fit: take the shorter trip
            if player.center().x < oil.rect.center().x {
                Direction::Left
            } else {
                Direction::Right
            }
        }
    }
}

/// Dead zone of `tolerance` pixels keeps the boat from jittering on target
fn steer_toward(from: f32, to: f32, tolerance: f32) -> Direction {
    let delta = to - from;
    if delta > tolerance {
        Direction::Right
    } else if delta < -tolerance {
        Direction::Left
    } else {
        Direction::Stop
    }
}
