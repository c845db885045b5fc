//! Frame-cadence spawning of debris and oil slicks

use rand::Rng;

use super::entity::FallingKind;
use crate::tuning::GameConfig;

/// A spawn decided for this frame: what and where (left edge, pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub kind: FallingKind,
    pub x: f32,
}

/// Decides which entities appear on a given frame
#[derive(Debug, Clone, Copy)]
pub struct Spawner {
    pub debris_period: u64,
    pub oil_slick_period: u64,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            debris_period: config.debris_spawn_period.max(1),
            oil_slick_period: config.oil_slick_spawn_period.max(1),
        }
    }

    /// Kinds due on `frame`. Both checks are independent, so frame 0 spawns both.
    pub fn due(&self, frame: u64) -> impl Iterator<Item = FallingKind> + use<> {
        let debris = frame.is_multiple_of(self.debris_period);
        let oil = frame.is_multiple_of(self.oil_slick_period);
        [
            debris.then_some(FallingKind::Debris),
            oil.then_some(FallingKind::OilSlick),
        ]
        .into_iter()
        .flatten()
    }

    /// Spawn requests for `frame`, with x uniform over `[0, canvas_width - width]`
    pub fn spawn<R: Rng>(
        &self,
        frame: u64,
        config: &GameConfig,
        rng: &mut R,
    ) -> Vec<SpawnRequest> {
        self.due(frame)
            .map(|kind| {
                let max_x = (config.canvas_width() - kind.size(config).x).max(0.0);
                SpawnRequest {
                    kind,
                    x: rng.random_range(0.0..=max_x),
                }
            })
            .collect()
    }
}
