use std::collections::HashMap;

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::behavior::{Behavior, Drawable};

/// Cache stamp meaning "never resolved".
pub(crate) const FRAME_NEVER: u64 = u64::MAX;

/// Fat scene-tree node — a single struct with optional capability slots.
/// Designed for simplicity and rapid prototyping over ECS purity.
///
/// Entities are constructed detached and enter the tree through
/// [`Scene::add_child`](crate::core::scene::Scene::add_child) (or are born
/// attached via `create_child`). Tree links and the relative-position
/// cache are managed by the scene.
pub struct Entity {
    /// String tag for finding entities by name.
    pub tag: String,
    /// Local position relative to the parent (top-left corner).
    /// Direct writes surface on the next frame's cache recomputation; use
    /// [`Scene::set_left`](crate::core::scene::Scene::set_left) /
    /// `set_top` for writes that must be visible within the same frame.
    pub position: Vec2,
    /// Velocity in units per second. The whole physics step is skipped
    /// while this is exactly zero, so static entities never accumulate
    /// field forces.
    pub velocity: Vec2,
    /// Per-tick velocity gain, applied on top of field forces.
    pub acceleration: Vec2,
    /// Width/height in game units. Not parent-relative.
    pub size: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Mass, read when this entity appears in another entity's `fields`.
    pub mass: f32,
    /// Visibility gate: when false, the node and its whole subtree are
    /// skipped during rendering.
    pub display: bool,
    /// Free-form user data.
    pub state: HashMap<String, serde_json::Value>,
    /// Attractors this entity is subject to, by id.
    pub fields: Vec<EntityId>,
    /// Seconds of accumulated update time after which the node detaches
    /// itself from its parent.
    pub time_to_live: Option<f32>,
    /// Update capability (optional — entities without one are inert
    /// beyond the built-in physics step).
    pub behavior: Option<Box<dyn Behavior>>,
    /// Render capability (optional — entities without one are invisible
    /// but still traversed).
    pub drawable: Option<Box<dyn Drawable>>,

    // Tree links and relative-position cache, managed by Scene.
    pub(crate) parent: Option<EntityId>,
    pub(crate) children: Vec<EntityId>,
    pub(crate) in_tree: bool,
    pub(crate) age: f32,
    pub(crate) relative: Vec2,
    pub(crate) relative_frame: u64,
}

impl Entity {
    /// Create a new detached entity at the origin.
    pub fn new() -> Self {
        Self {
            tag: String::new(),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            size: Vec2::ZERO,
            rotation: 0.0,
            mass: 0.0,
            display: true,
            state: HashMap::new(),
            fields: Vec::new(),
            time_to_live: None,
            behavior: None,
            drawable: None,
            parent: None,
            children: Vec::new(),
            in_tree: false,
            age: 0.0,
            relative: Vec2::ZERO,
            relative_frame: FRAME_NEVER,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec2) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    pub fn with_field(mut self, field: EntityId) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_time_to_live(mut self, seconds: f32) -> Self {
        self.time_to_live = Some(seconds);
        self
    }

    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    pub fn with_drawable(mut self, drawable: impl Drawable + 'static) -> Self {
        self.drawable = Some(Box::new(drawable));
        self
    }

    // -- Transform accessors --

    /// Local x coordinate.
    pub fn left(&self) -> f32 {
        self.position.x
    }

    /// Local y coordinate.
    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    // -- Tree state --

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    /// Whether the node has gained scene context (attached to the tree,
    /// directly or transitively, at some point). Only in-tree nodes take
    /// part in relative-position caching.
    pub fn in_tree(&self) -> bool {
        self.in_tree
    }

    /// Accumulated update time in seconds.
    pub fn age(&self) -> f32 {
        self.age
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}
