//! Stateless geometry tests for shaped entities. Not part of the tree
//! mechanics: callers resolve positions first (or use the scene-aware
//! convenience below, which does it for them).

use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Axis-aligned overlap test for two top-left/size rectangles.
/// Rectangles that merely share an edge do not overlap.
pub fn aabb_overlap(a_min: Vec2, a_size: Vec2, b_min: Vec2, b_size: Vec2) -> bool {
    a_min.x < b_min.x + b_size.x
        && b_min.x < a_min.x + a_size.x
        && a_min.y < b_min.y + b_size.y
        && b_min.y < a_min.y + a_size.y
}

/// Resolve both entities through the tree and test their bounding boxes.
/// Unknown ids never overlap.
pub fn entities_overlap(scene: &mut Scene, a: EntityId, b: EntityId) -> bool {
    let (Some(a_size), Some(b_size)) = (
        scene.get(a).map(|entity| entity.size),
        scene.get(b).map(|entity| entity.size),
    ) else {
        return false;
    };
    let a_min = scene.relative_position(a);
    let b_min = scene.relative_position(b);
    aabb_overlap(a_min, a_size, b_min, b_size)
}
