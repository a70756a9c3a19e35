// core/scene.rs
//
// The scene tree: an id-keyed entity arena with parent/child links,
// per-frame memoization of composited positions, and the update/render
// traversals. The frame counter and render statistic live here: every
// cache lookup is keyed on this scene, never on ambient global state.

use std::collections::HashMap;

use glam::Vec2;
use log::{debug, warn};

use crate::api::types::EntityId;
use crate::components::behavior::{DrawContext, Flow};
use crate::components::entity::Entity;
use crate::renderer::surface::DrawSurface;
use crate::renderer::viewport::Viewport;
use crate::systems::gravity::{field_delta_v, FieldSample};

/// Entity storage plus the per-scene state traversals depend on.
///
/// Entities enter detached ([`spawn`](Scene::spawn)) and join the tree
/// through [`add_child`](Scene::add_child) / [`create_child`](Scene::create_child);
/// the driver designates roots with [`spawn_root`](Scene::spawn_root) and
/// walks them once per tick ([`update_entity`](Scene::update_entity)) and
/// once per frame ([`render_entity`](Scene::render_entity), after
/// [`advance_frame`](Scene::advance_frame)).
///
/// Traversals snapshot child lists before descending, so hooks may attach
/// and detach mid-walk; the structural change takes effect next tick.
pub struct Scene {
    entities: HashMap<EntityId, Entity>,
    next_id: u32,
    /// Monotonically non-decreasing, incremented once per render frame.
    /// Cache entries are invalidated purely by comparison against this.
    frame: u64,
    /// Total draw-hook invocations since the scene was created.
    render_count: u64,
    /// Active logical-to-device mapping, handed to draw hooks.
    pub viewport: Viewport,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            next_id: 1,
            frame: 0,
            render_count: 0,
            viewport: Viewport::windowed(),
        }
    }

    /// Create a scene with room for a specific entity count.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: HashMap::with_capacity(capacity),
            ..Self::new()
        }
    }

    // -- Storage --

    /// Insert a detached entity. It has no parent and no scene context
    /// until attached.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, entity);
        id
    }

    /// Insert an entity with scene context: a tree root the driver will
    /// traverse directly.
    pub fn spawn_root(&mut self, entity: Entity) -> EntityId {
        let id = self.spawn(entity);
        self.mark_in_tree(id);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Iterate over all entities, attached or not.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Entity)> {
        self.entities.iter_mut().map(|(id, entity)| (*id, entity))
    }

    /// Find an entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, entity)| entity.tag == tag)
            .map(|(id, _)| *id)
    }

    /// Number of entities in the arena.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Remove every entity. Frame counter and statistics keep running.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    // -- Frame state --

    /// Current render-frame counter value.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance the render-frame counter, invalidating every cached
    /// composited position. Call once per render frame, before
    /// traversing roots.
    pub fn advance_frame(&mut self) {
        self.frame += 1;
    }

    /// Total draw-hook invocations since the scene was created.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    // -- Child lifecycle --

    /// Construct a plain node attached under `parent`. Returns the new
    /// id, or None when `parent` is unknown.
    pub fn create_child(&mut self, parent: EntityId) -> Option<EntityId> {
        if !self.entities.contains_key(&parent) {
            return None;
        }
        let child = self.spawn(Entity::new());
        self.add_child(parent, child);
        Some(child)
    }

    /// Attach `child` under `parent`, reparenting if it already hangs
    /// elsewhere. Scene context spreads to the whole attached subtree, so
    /// trees built offline gain caching the moment they are attached.
    ///
    /// Returns false (with a warning) for unknown ids, self-parenting, or
    /// an attachment that would close a cycle; the tree is left unchanged.
    pub fn add_child(&mut self, parent: EntityId, child: EntityId) -> bool {
        if parent == child
            || !self.entities.contains_key(&parent)
            || !self.entities.contains_key(&child)
        {
            warn!("refusing to attach {child:?} under {parent:?}");
            return false;
        }
        if self.is_ancestor(child, parent) {
            warn!("refusing to attach {child:?} under its descendant {parent:?}");
            return false;
        }
        if let Some(old) = self.entities.get(&child).and_then(|entity| entity.parent) {
            self.detach_child(old, child);
        }
        if let Some(entity) = self.entities.get_mut(&child) {
            entity.parent = Some(parent);
        }
        let in_tree = match self.entities.get_mut(&parent) {
            Some(entity) => {
                entity.children.push(child);
                entity.in_tree
            }
            None => false,
        };
        if in_tree {
            self.mark_in_tree(child);
        }
        debug!("attached {child:?} under {parent:?}");
        true
    }

    /// Remove `child` from `parent`'s child list (identity match) and
    /// clear its parent back-reference, so a detached node resolves as a
    /// root until reattached. Scene context is kept. Returns whether a
    /// match was found; detaching an absent pairing is a silent no-op.
    pub fn detach_child(&mut self, parent: EntityId, child: EntityId) -> bool {
        let removed = match self.entities.get_mut(&parent) {
            Some(entity) => match entity.children.iter().position(|&c| c == child) {
                Some(index) => {
                    entity.children.remove(index);
                    true
                }
                None => false,
            },
            None => false,
        };
        if removed {
            if let Some(entity) = self.entities.get_mut(&child) {
                entity.parent = None;
            }
            debug!("detached {child:?} from {parent:?}");
        }
        removed
    }

    /// Remove a node and its whole subtree from the arena, detaching the
    /// node from its parent first. Children are owned exclusively: they
    /// go down with their ancestor. Returns the number of removed nodes.
    pub fn despawn_recursive(&mut self, id: EntityId) -> usize {
        if let Some(parent) = self.entities.get(&id).and_then(|entity| entity.parent) {
            self.detach_child(parent, id);
        }
        let removed = self.despawn_subtree(id);
        if removed > 0 {
            debug!("despawned {id:?} ({removed} nodes)");
        }
        removed
    }

    fn despawn_subtree(&mut self, id: EntityId) -> usize {
        let Some(entity) = self.entities.remove(&id) else {
            return 0;
        };
        let mut removed = 1;
        for child in entity.children {
            removed += self.despawn_subtree(child);
        }
        removed
    }

    /// Whether `node` appears on `of`'s ancestor chain.
    fn is_ancestor(&self, node: EntityId, of: EntityId) -> bool {
        let mut cursor = self.entities.get(&of).and_then(|entity| entity.parent);
        while let Some(current) = cursor {
            if current == node {
                return true;
            }
            cursor = self.entities.get(&current).and_then(|entity| entity.parent);
        }
        false
    }

    fn mark_in_tree(&mut self, id: EntityId) {
        let children = match self.entities.get_mut(&id) {
            Some(entity) => {
                entity.in_tree = true;
                entity.children.clone()
            }
            None => return,
        };
        for child in children {
            self.mark_in_tree(child);
        }
    }

    // -- Composited position --

    /// Absolute position of a node: its local position composed through
    /// every ancestor's local offset.
    ///
    /// Resolution walks up the parent chain once per frame per node: a
    /// node with scene context caches the result stamped with the current
    /// frame counter, and every later resolve this frame (render, field
    /// sampling, collision checks) hits the cache, bounding the tree-wide
    /// cost to O(nodes) amortized. Detached-from-scene nodes recompute on
    /// every read. Unknown ids resolve to the origin.
    pub fn relative_position(&mut self, id: EntityId) -> Vec2 {
        let (parent, local) = match self.entities.get(&id) {
            Some(entity) => {
                if entity.in_tree && entity.relative_frame == self.frame {
                    return entity.relative;
                }
                (entity.parent, entity.position)
            }
            None => return Vec2::ZERO,
        };
        let base = match parent {
            // Dangling parent ids compose as zero: the node degrades to a root.
            Some(parent) => self.relative_position(parent),
            None => Vec2::ZERO,
        };
        let absolute = local + base;
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.relative = absolute;
            entity.relative_frame = self.frame;
        }
        absolute
    }

    /// Absolute x coordinate (see [`relative_position`](Scene::relative_position)).
    pub fn relative_left(&mut self, id: EntityId) -> f32 {
        self.relative_position(id).x
    }

    /// Absolute y coordinate (see [`relative_position`](Scene::relative_position)).
    pub fn relative_top(&mut self, id: EntityId) -> f32 {
        self.relative_position(id).y
    }

    /// Set the local x coordinate, eagerly refreshing the cached absolute
    /// x so a cache warmed earlier this frame stays consistent. The cache
    /// stamp is untouched: a cold cache still recomputes in full on the
    /// next read.
    pub fn set_left(&mut self, id: EntityId, left: f32) {
        let Some(parent) = self.entities.get(&id).map(|entity| entity.parent) else {
            return;
        };
        let base = match parent {
            Some(parent) => self.relative_position(parent).x,
            None => 0.0,
        };
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.position.x = left;
            entity.relative.x = left + base;
        }
    }

    /// Set the local y coordinate. See [`set_left`](Scene::set_left).
    pub fn set_top(&mut self, id: EntityId, top: f32) {
        let Some(parent) = self.entities.get(&id).map(|entity| entity.parent) else {
            return;
        };
        let base = match parent {
            Some(parent) => self.relative_position(parent).y,
            None => 0.0,
        };
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.position.y = top;
            entity.relative.y = top + base;
        }
    }

    // -- Update traversal --

    /// Step one node and, unless its behavior stops propagation, its
    /// subtree, pre-order: a node's own step completes before its
    /// children begin. `dt` is the tick's elapsed time in seconds.
    pub fn update_entity(&mut self, id: EntityId, dt: f32) {
        // Lifecycle: age, then self-detach on expiry. The rest of this
        // tick's update still runs for a node that just expired.
        let expired_parent = {
            let Some(entity) = self.entities.get_mut(&id) else {
                return;
            };
            entity.age += dt;
            match entity.time_to_live {
                Some(ttl) if entity.age >= ttl => entity.parent,
                _ => None,
            }
        };
        if let Some(parent) = expired_parent {
            self.detach_child(parent, id);
        }

        self.physics_step(id, dt);

        // Behavior hook. The capability is taken out of the node for the
        // duration of the call so the hook gets full scene access; a hook
        // that installed a replacement wins over the put-back.
        let mut behavior = self
            .entities
            .get_mut(&id)
            .and_then(|entity| entity.behavior.take());
        let flow = behavior
            .as_mut()
            .map(|behavior| behavior.update(self, id, dt));
        if let Some(entity) = self.entities.get_mut(&id) {
            if entity.behavior.is_none() {
                entity.behavior = behavior;
            }
        }

        if flow == Some(Flow::Stop) {
            return;
        }
        let children = match self.entities.get(&id) {
            Some(entity) => entity.children.clone(),
            None => return,
        };
        for child in children {
            self.update_entity(child, dt);
        }
    }

    /// Velocity/acceleration integration with field accumulation.
    /// Skipped entirely while the velocity is exactly zero.
    fn physics_step(&mut self, id: EntityId, dt: f32) {
        let fields = match self.entities.get(&id) {
            Some(entity) if entity.velocity != Vec2::ZERO => entity.fields.clone(),
            _ => return,
        };
        let origin = self.relative_position(id);
        let mut samples = Vec::with_capacity(fields.len());
        for field in fields {
            // Unknown field ids are skipped silently.
            let Some(mass) = self.entities.get(&field).map(|entity| entity.mass) else {
                continue;
            };
            samples.push(FieldSample {
                position: self.relative_position(field),
                mass,
            });
        }
        if let Some(entity) = self.entities.get_mut(&id) {
            let delta_v = entity.acceleration + field_delta_v(origin, &samples, dt);
            entity.velocity += delta_v;
            let velocity = entity.velocity;
            entity.position += velocity * dt;
        }
    }

    // -- Render traversal --

    /// Render one node and, unless it is invisible or its drawable stops
    /// propagation, its subtree, pre-order. Call
    /// [`advance_frame`](Scene::advance_frame) once per frame first.
    ///
    /// An invisible node (`display == false`) hides its whole subtree; a
    /// `Stop` from a draw hook skips the subtree without counting as
    /// invisible elsewhere. Nodes without a drawable are traversed
    /// silently.
    pub fn render_entity(&mut self, id: EntityId, surface: &mut dyn DrawSurface) {
        match self.entities.get(&id) {
            Some(entity) if entity.display => {}
            _ => return,
        }
        // Resolve before drawing; this also warms the cache for every
        // descendant resolving through this node.
        let position = self.relative_position(id);
        let mut drawable = self
            .entities
            .get_mut(&id)
            .and_then(|entity| entity.drawable.take());
        let mut flow = Flow::Continue;
        if let Some(drawable) = drawable.as_mut() {
            if let Some(entity) = self.entities.get(&id) {
                let mut ctx = DrawContext {
                    position,
                    viewport: self.viewport,
                    surface: &mut *surface,
                };
                flow = drawable.draw(entity, &mut ctx);
                self.render_count += 1;
            }
        }
        if let Some(entity) = self.entities.get_mut(&id) {
            if entity.drawable.is_none() {
                entity.drawable = drawable;
            }
        }

        if flow == Flow::Stop {
            return;
        }
        let children = match self.entities.get(&id) {
            Some(entity) => entity.children.clone(),
            None => return,
        };
        for child in children {
            self.render_entity(child, surface);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
