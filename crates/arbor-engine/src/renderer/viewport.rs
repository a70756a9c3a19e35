use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How logical coordinates map to the output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScaleMode {
    /// Logical units are device pixels; no transform.
    #[default]
    Windowed,
    /// Aspect-fit the logical area into the device, letterboxing the
    /// leftover space.
    Fullscreen,
}

/// Logical-to-device coordinate adapter handed to draw hooks.
///
/// Positions get scale + offset; widths and heights get scale only.
/// In `Windowed` mode every mapping is the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub mode: ScaleMode,
    /// Device pixels per logical unit, per axis.
    pub scale: Vec2,
    /// Letterbox offset in device pixels.
    pub offset: Vec2,
}

impl Viewport {
    /// Identity mapping.
    pub fn windowed() -> Self {
        Self {
            mode: ScaleMode::Windowed,
            scale: Vec2::ONE,
            offset: Vec2::ZERO,
        }
    }

    /// Aspect-fit `logical` into `device`, centering the scaled area.
    pub fn fit(logical: Vec2, device: Vec2) -> Self {
        let ratio = (device.x / logical.x).min(device.y / logical.y);
        let scale = Vec2::splat(ratio);
        Self {
            mode: ScaleMode::Fullscreen,
            scale,
            offset: (device - logical * ratio) / 2.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.mode != ScaleMode::Windowed
    }

    /// Map a logical x position to device space.
    pub fn scale_left(&self, left: f32) -> f32 {
        match self.mode {
            ScaleMode::Windowed => left,
            ScaleMode::Fullscreen => left * self.scale.x + self.offset.x,
        }
    }

    /// Map a logical y position to device space.
    pub fn scale_top(&self, top: f32) -> f32 {
        match self.mode {
            ScaleMode::Windowed => top,
            ScaleMode::Fullscreen => top * self.scale.y + self.offset.y,
        }
    }

    /// Map a logical width to device space. No letterbox offset.
    pub fn scale_width(&self, width: f32) -> f32 {
        match self.mode {
            ScaleMode::Windowed => width,
            ScaleMode::Fullscreen => width * self.scale.x,
        }
    }

    /// Map a logical height to device space. No letterbox offset.
    pub fn scale_height(&self, height: f32) -> f32 {
        match self.mode {
            ScaleMode::Windowed => height,
            ScaleMode::Fullscreen => height * self.scale.y,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::windowed()
    }
}
