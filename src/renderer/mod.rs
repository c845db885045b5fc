//! WebGPU rendering module
//!
//! Everything is a flat-coloured rectangle: the scene is turned into a
//! triangle list in canvas pixels, then mapped to clip space on upload.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;

use crate::sim::{EntityKind, GameSession};

/// Fill colour for an entity variant
pub fn fill_color(kind: EntityKind) -> [f32; 4] {
    match kind {
        EntityKind::Player => vertex::colors::PLAYER,
        EntityKind::Debris => vertex::colors::DEBRIS,
        EntityKind::OilSlick => vertex::colors::OIL_SLICK,
    }
}

/// Build the frame's vertices: player first, then debris, then oil slicks
pub fn scene_vertices(session: &GameSession) -> Vec<Vertex> {
    let sprites = session.sprites();
    let mut vertices = Vec::with_capacity(sprites.len() * shapes::RECT_VERTICES);
    for sprite in &sprites {
        vertices.extend(shapes::rect(&sprite.rect, fill_color(sprite.kind)));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FallingKind;
    use crate::tuning::GameConfig;

    #[test]
    fn test_scene_has_six_vertices_per_entity() {
        let mut session = GameSession::new(GameConfig::default(), 3);
        session.start();
        session.spawn_falling(FallingKind::Debris, 10.0);
        session.spawn_falling(FallingKind::OilSlick, 10.0);
        let vertices = scene_vertices(&session);
        assert_eq!(vertices.len(), 3 * shapes::RECT_VERTICES);
        assert_eq!(vertices[0].color, vertex::colors::PLAYER);
        assert_eq!(vertices[6].color, vertex::colors::DEBRIS);
        assert_eq!(vertices[12].color, vertex::colors::OIL_SLICK);
    }

    #[test]
    fn test_variants_have_distinct_colors() {
        assert_ne!(fill_color(EntityKind::Player), fill_color(EntityKind::Debris));
        assert_ne!(fill_color(EntityKind::Debris), fill_color(EntityKind::OilSlick));
    }
}
