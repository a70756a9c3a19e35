use serde::{Deserialize, Serialize};

use crate::api::types::{AudioCommand, EntityId, GameEvent};
use crate::core::scene::Scene;
use crate::renderer::surface::DrawSurface;
use crate::renderer::viewport::ScaleMode;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// How logical coordinates map to the output surface.
    pub scale_mode: ScaleMode,
    /// Maximum number of audio commands per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            scale_mode: ScaleMode::Windowed,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill. The outer frame loop is
/// supplied by the host: per simulation tick it calls [`Game::update`]
/// followed by [`EngineContext::step`] on the root entity, and per render
/// frame [`EngineContext::render_frame`] followed by [`Game::render`].
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state: spawn entities, build the scene tree.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Runs before the scene's own update traversal.
    fn update(&mut self, ctx: &mut EngineContext, dt: f32);

    /// Optional pass for custom drawing on top of the scene.
    fn render(&mut self, _ctx: &mut EngineContext, _surface: &mut dyn DrawSurface) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub sounds: Vec<AudioCommand>,
    pub events: Vec<GameEvent>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            sounds: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Create an EngineContext with queue capacities from a config.
    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
        }
    }

    /// Queue an audio command to be drained by the host.
    pub fn emit_sound(&mut self, command: AudioCommand) {
        self.sounds.push(command);
    }

    /// Queue a game event to be drained by the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (audio commands, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }

    /// One simulation tick: clear the per-frame queues, then run the
    /// update traversal from `root`.
    pub fn step(&mut self, root: EntityId, dt: f32) {
        self.clear_frame_data();
        self.scene.update_entity(root, dt);
    }

    /// One render frame: advance the frame counter (invalidating cached
    /// relative positions), then run the render traversal from `root`.
    pub fn render_frame(&mut self, root: EntityId, surface: &mut dyn DrawSurface) {
        self.scene.advance_frame();
        self.scene.render_entity(root, surface);
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
