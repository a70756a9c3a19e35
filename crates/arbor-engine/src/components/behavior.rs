// components/behavior.rs
//
// Capability components for per-entity logic. Traversal dispatches on
// presence: a node without a capability is stepped/skipped by the scene's
// built-in rules alone.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use crate::renderer::surface::DrawSurface;
use crate::renderer::viewport::Viewport;

/// Explicit propagation result of an update/render hook.
///
/// A missing hook always propagates; a present hook chooses. `Stop` from
/// an update hook freezes the node's subtree for this tick without hiding
/// it; `Stop` from a draw hook skips the subtree's rendering this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Per-tick update capability.
pub trait Behavior {
    /// Runs after the node's own lifecycle and physics step, before its
    /// children are visited. The capability is temporarily taken out of
    /// the node for the duration of the call, so implementations get full
    /// mutable scene access and may spawn, attach and detach freely
    /// (structural changes to the child list land next tick).
    fn update(&mut self, scene: &mut Scene, id: EntityId, dt: f32) -> Flow;
}

/// Per-frame render capability.
pub trait Drawable {
    /// Only invoked while the node's `display` flag is true. Read the
    /// composited position from `ctx.position` (never the entity's raw
    /// local position) and map through `ctx.viewport` when drawing.
    fn draw(&mut self, entity: &Entity, ctx: &mut DrawContext<'_>) -> Flow;
}

/// Everything a draw hook needs for one invocation.
pub struct DrawContext<'a> {
    /// Absolute (tree-composited) position of the node being drawn.
    pub position: Vec2,
    /// Active logical-to-device mapping.
    pub viewport: Viewport,
    /// The output surface.
    pub surface: &'a mut dyn DrawSurface,
}
