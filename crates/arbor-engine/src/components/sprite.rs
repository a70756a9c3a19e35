use glam::Vec2;

use crate::components::behavior::{DrawContext, Flow, Drawable};
use crate::components::entity::Entity;
use crate::renderer::surface::ImageId;

/// Stock drawable: a textured quad at the entity's composited position,
/// sized by the entity and mapped through the active viewport.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Which host-side image to draw.
    pub image: ImageId,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl Sprite {
    pub fn new(image: ImageId) -> Self {
        Self { image, alpha: 1.0 }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

impl Drawable for Sprite {
    fn draw(&mut self, entity: &Entity, ctx: &mut DrawContext<'_>) -> Flow {
        let viewport = ctx.viewport;
        let min = Vec2::new(
            viewport.scale_left(ctx.position.x),
            viewport.scale_top(ctx.position.y),
        );
        let size = Vec2::new(
            viewport.scale_width(entity.width()),
            viewport.scale_height(entity.height()),
        );
        ctx.surface
            .draw_image(self.image, min, size, entity.rotation, self.alpha);
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::{DrawSurface, Rgba};
    use crate::renderer::viewport::Viewport;

    #[derive(Default)]
    struct Recorder {
        images: Vec<(ImageId, Vec2, Vec2, f32, f32)>,
    }

    impl DrawSurface for Recorder {
        fn size(&self) -> Vec2 {
            Vec2::new(1920.0, 1080.0)
        }
        fn clear(&mut self, _color: Rgba) {}
        fn fill_rect(&mut self, _min: Vec2, _size: Vec2, _color: Rgba) {}
        fn draw_image(&mut self, image: ImageId, min: Vec2, size: Vec2, rotation: f32, alpha: f32) {
            self.images.push((image, min, size, rotation, alpha));
        }
        fn draw_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Rgba) {}
    }

    #[test]
    fn sprite_draws_at_composited_position() {
        let entity = Entity::new().with_size(Vec2::new(40.0, 20.0));
        let mut sprite = Sprite::new(ImageId(2)).with_alpha(0.5);
        let mut surface = Recorder::default();
        let mut ctx = DrawContext {
            position: Vec2::new(100.0, 50.0),
            viewport: Viewport::windowed(),
            surface: &mut surface,
        };

        let flow = sprite.draw(&entity, &mut ctx);

        assert_eq!(flow, Flow::Continue);
        let (image, min, size, rotation, alpha) = surface.images[0];
        assert_eq!(image, ImageId(2));
        assert_eq!(min, Vec2::new(100.0, 50.0));
        assert_eq!(size, Vec2::new(40.0, 20.0));
        assert_eq!(rotation, 0.0);
        assert_eq!(alpha, 0.5);
    }

    #[test]
    fn sprite_maps_through_letterbox_viewport() {
        let entity = Entity::new().with_size(Vec2::new(100.0, 100.0));
        let mut sprite = Sprite::new(ImageId(0));
        let mut surface = Recorder::default();
        // 800x600 logical on a 1920x1080 device: scale 1.8, x offset 240.
        let mut ctx = DrawContext {
            position: Vec2::new(10.0, 10.0),
            viewport: Viewport::fit(Vec2::new(800.0, 600.0), Vec2::new(1920.0, 1080.0)),
            surface: &mut surface,
        };

        sprite.draw(&entity, &mut ctx);

        let (_, min, size, _, _) = surface.images[0];
        assert!((min.x - (10.0 * 1.8 + 240.0)).abs() < 1e-4);
        assert!((min.y - 18.0).abs() < 1e-4);
        assert!((size.x - 180.0).abs() < 1e-4);
        assert!((size.y - 180.0).abs() < 1e-4);
    }
}
