use crate::coords::tile_center;
use macroquad::prelude::*;

/// Camera position in world pixels. Moves are instantaneous.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    position: Vec2,
}

impl Camera {
    /// A camera at the world origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position in world pixels.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Jumps to a world pixel position.
    pub fn goto_pixel(&mut self, x: f32, y: f32) {
        self.position = vec2(x, y);
    }

    /// Centres the camera on tile `(x, y)` of a `tile_w` x `tile_h` grid.
    pub fn goto_tile(&mut self, x: i32, y: i32, tile_w: u32, tile_h: u32) {
        let c = tile_center(ivec2(x, y), tile_w, tile_h);
        self.goto_pixel(c.x as f32, c.y as f32);
    }

    /// A y-up macroquad camera centred on the current position, showing
    /// `viewport` pixels of world.
    pub fn to_camera2d(&self, viewport: Vec2) -> Camera2D {
        Camera2D {
            target: self.position,
            zoom: vec2(2.0 / viewport.x, 2.0 / viewport.y),
            ..Default::default()
        }
    }
}
