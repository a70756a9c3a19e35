pub mod api;
pub mod components;
pub mod core;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{AudioCommand, EntityId, GameEvent, SoundId};
pub use components::behavior::{Behavior, DrawContext, Drawable, Flow};
pub use components::entity::Entity;
pub use components::sprite::Sprite;
pub use crate::core::scene::Scene;
pub use renderer::surface::{DrawSurface, ImageId, Rgba};
pub use renderer::viewport::{ScaleMode, Viewport};
pub use systems::collision::{aabb_overlap, entities_overlap};
pub use systems::gravity::{field_delta_v, FieldSample, MIN_FIELD_DISTANCE};
