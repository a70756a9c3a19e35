//! Drawing-surface contract for host render backends.
//!
//! The engine ships no renderer of its own: draw hooks receive a
//! `&mut dyn DrawSurface` and the host supplies the implementation:
//! anything that can satisfy these primitives, from a canvas to a GPU
//! quad batcher. Coordinates handed to the surface are device-space;
//! hooks map logical coordinates through the active
//! [`Viewport`](crate::renderer::viewport::Viewport) first.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Identifies a host-side image/texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageId(pub u32);

/// Straight-alpha color, 4 floats for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// 2D drawing surface implemented by the host backend.
pub trait DrawSurface {
    /// Output size in device pixels.
    fn size(&self) -> Vec2;

    /// Fill the whole surface with one color.
    fn clear(&mut self, color: Rgba);

    /// Fill an axis-aligned rectangle (top-left corner + size).
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba);

    /// Draw an image into a rectangle, rotated around its center.
    fn draw_image(&mut self, image: ImageId, min: Vec2, size: Vec2, rotation: f32, alpha: f32);

    /// Stroke a line segment.
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}
