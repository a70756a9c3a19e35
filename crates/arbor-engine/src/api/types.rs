use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Identifies a sound loaded by the host audio wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundId(pub u32);

/// Audio boundary command, queued by game logic and drained by the host.
/// The engine has no audio internals of its own: playback, decoding and
/// mixing all live behind this enum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AudioCommand {
    /// Ask the host to load (or re-load) a sound.
    Load(SoundId),
    Play(SoundId),
    Pause(SoundId),
    /// Seek to a playback position in seconds.
    Seek(SoundId, f32),
}

/// A game event communicated from the engine to the host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}
