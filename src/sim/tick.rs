//! Fixed-frame simulation step
//!
//! Core game loop that advances a session deterministically, one frame per call.

use super::collision::{cull_below, resolve_debris, resolve_oil_slicks};
use super::state::{GameEvent, GamePhase, GameSession};

/// Advance the session by one frame.
///
/// Order: move player, spawn, debris (move and collect, cull), oil slicks (move
/// and hit, cull), frame counter. Losing the last life ends the step
/// immediately: later oil slicks are neither moved nor tested.
pub fn tick(session: &mut GameSession) {
    // Don't tick unless running; events from the last step stay readable
    if session.phase != GamePhase::Running {
        return;
    }
    session.events.clear();

    let canvas_width = session.config.canvas_width();
    let canvas_height = session.config.canvas_height();

    session.player.update(canvas_width);
    let player = session.player.rect;

    session.spawn_due();

    // Debris: collect for points
    let points = session.config.score_per_debris;
    let collected = resolve_debris(&player, &mut session.debris, &mut session.score, points);
    for id in collected.removed {
        log::debug!("Collected debris #{}", id);
        session.events.push(GameEvent::DebrisCollected { id });
    }
    cull_below(&mut session.debris, canvas_height);

    // Oil slicks: lose a life per hit
    let lives_before = session.lives;
    let hits = resolve_oil_slicks(&player, &mut session.oil_slicks, &mut session.lives);
    for (n, id) in hits.removed.iter().enumerate() {
        let lives_left = lives_before.saturating_sub(n as u32 + 1);
        log::debug!("Hit oil slick #{} ({} lives left)", id, lives_left);
        session.events.push(GameEvent::OilSlickHit { id: *id, lives_left });
    }
    if hits.halted || session.lives == 0 {
        session.finish();
        return;
    }
    cull_below(&mut session.oil_slicks, canvas_height);

    session.frame += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Direction, FallingKind};
    use crate::tuning::GameConfig;
    use proptest::prelude::*;

    fn running_session() -> GameSession {
        let mut session = GameSession::new(GameConfig::default(), 12345);
        session.start();
        session
    }

    /// Put a falling entity so that after one `update` it sits exactly on the player
    fn drop_on_player(session: &mut GameSession, kind: FallingKind) -> u32 {
        let id = session.spawn_falling(kind, 0.0).unwrap();
        let player = session.player.rect;
        let list = match kind {
            FallingKind::Debris => &mut session.debris,
            FallingKind::OilSlick => &mut session.oil_slicks,
        };
        let entity = list.iter_mut().find(|e| e.id == id).unwrap();
        entity.rect.pos.x = player.pos.x;
        entity.rect.pos.y = player.pos.y - entity.speed;
        id
    }

    #[test]
    fn test_first_step_spawns_both_kinds() {
        let mut session = running_session();
        session.step();
        assert_eq!(session.debris.len(), 1);
        assert_eq!(session.oil_slicks.len(), 1);
        assert_eq!(session.frame, 1);
        // Spawned at -height, then moved once
        assert_eq!(session.debris[0].rect.pos.y, -18.0);
        assert_eq!(session.oil_slicks[0].rect.pos.y, -28.5);
    }

    #[test]
    fn test_collect_debris_scores() {
        let mut session = running_session();
        session.frame = 1; // off the spawn cadence
        let id = drop_on_player(&mut session, FallingKind::Debris);
        session.step();
        assert_eq!(session.score, 10);
        assert!(session.debris.iter().all(|d| d.id != id));
        assert_eq!(session.events, vec![GameEvent::DebrisCollected { id }]);
    }

    #[test]
    fn test_hit_oil_slick_costs_life() {
        let mut session = running_session();
        session.frame = 1;
        let id = drop_on_player(&mut session, FallingKind::OilSlick);
        session.step();
        assert_eq!(session.lives, 2);
        assert_eq!(session.phase, GamePhase::Running);
        assert_eq!(
            session.events,
            vec![GameEvent::OilSlickHit { id, lives_left: 2 }]
        );
    }

    #[test]
    fn test_last_life_ends_game_and_stops_step() {
        let mut session = running_session();
        session.frame = 1;
        session.lives = 1;
        drop_on_player(&mut session, FallingKind::OilSlick);
        let pending = drop_on_player(&mut session, FallingKind::OilSlick);
        let pending_y = session.oil_slicks[1].rect.pos.y;

        session.step();
        assert_eq!(session.lives, 0);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(session.final_score, Some(0));
        // Frame counter is not advanced on the terminating step
        assert_eq!(session.frame, 1);
        // The second slick was never moved or tested
        let pending_oil = session.oil_slicks.iter().find(|o| o.id == pending);
        assert_eq!(pending_oil.map(|o| o.rect.pos.y), Some(pending_y));
        assert!(matches!(
            session.events.last(),
            Some(GameEvent::GameOver { final_score: 0 })
        ));
    }

    #[test]
    fn test_step_after_game_over_is_noop() {
        let mut session = running_session();
        session.frame = 1;
        session.lives = 1;
        drop_on_player(&mut session, FallingKind::OilSlick);
        session.step();
        assert!(session.is_over());

        let score = session.score;
        let debris = session.debris.len();
        let oil = session.oil_slicks.len();
        let events = session.events.clone();
        for _ in 0..10 {
            session.step();
        }
        assert_eq!(session.score, score);
        assert_eq!(session.lives, 0);
        assert_eq!(session.debris.len(), debris);
        assert_eq!(session.oil_slicks.len(), oil);
        assert_eq!(session.events, events);
    }

    #[test]
    fn test_offscreen_debris_culled() {
        let mut session = running_session();
        session.frame = 1;
        let id = session.spawn_falling(FallingKind::Debris, 0.0).unwrap();
        session.debris[0].rect.pos.y = 599.0;
        session.step();
        assert!(session.debris.iter().all(|d| d.id != id));
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_offscreen_oil_slick_culled() {
        let mut session = running_session();
        session.frame = 1;
        let id = session.spawn_falling(FallingKind::OilSlick, 0.0).unwrap();
        session.oil_slicks[0].rect.pos.y = 599.0;
        session.step();
        assert!(session.oil_slicks.iter().all(|o| o.id != id));
        assert_eq!(session.lives, 3);
        assert!(session.is_running());
    }

    #[test]
    fn test_slick_far_from_lethal_hit_stays_put() {
        let mut session = running_session();
        session.frame = 1;
        session.lives = 1;
        drop_on_player(&mut session, FallingKind::OilSlick);
        let far = session.spawn_falling(FallingKind::OilSlick, 300.0).unwrap();
        let far_y = session.oil_slicks[1].rect.pos.y;

        session.step();
        assert!(session.is_over());
        let far_oil = session.oil_slicks.iter().find(|o| o.id == far);
        assert_eq!(far_oil.map(|o| o.rect.pos.y), Some(far_y));
    }

    #[test]
    fn test_collected_and_culled_same_frame_both_removed() {
        let mut session = running_session();
        session.frame = 1;
        session.spawn_falling(FallingKind::Debris, 0.0);
        session.debris[0].rect.pos.y = 700.0;
        let collected = drop_on_player(&mut session, FallingKind::Debris);
        session.step();
        assert!(session.debris.is_empty());
        assert_eq!(session.score, 10);
        assert_eq!(
            session.events,
            vec![GameEvent::DebrisCollected { id: collected }]
        );
    }

    #[test]
    fn test_player_moves_before_collision() {
        let mut session = running_session();
        session.frame = 1;
        session.set_player_intent(Direction::Right);
        session.step();
        assert_eq!(session.player.rect.pos.x, 185.0);
    }

    proptest! {
        #[test]
        fn prop_score_and_lives_are_monotonic(
            seed in any::<u64>(),
            intents in proptest::collection::vec(-1i32..=1, 1..600),
        ) {
            let mut session = GameSession::new(GameConfig::default(), seed);
            session.start();
            for axis in intents {
                session.set_player_intent(Direction::from_axis(axis));
                let score = session.score;
                let lives = session.lives;
                session.step();

                let collected = session
                    .events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::DebrisCollected { .. }))
                    .count() as u64;
                let hits = session
                    .events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::OilSlickHit { .. }))
                    .count() as u32;

                prop_assert!(session.score >= score);
                prop_assert_eq!(session.score - score, collected * 10);
                prop_assert!(session.lives <= lives);
                prop_assert_eq!(lives - session.lives, hits);
                if session.is_over() {
                    prop_assert_eq!(session.lives, 0);
                    break;
                }
            }
        }
    }
}
