use crate::core::math::Rect;
use glam::Vec2;

/// Positional state shared by every world object
///
/// `position` is the top-left corner of the bounding box. Velocity is in
/// world units per frame; static objects simply keep it at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
}

impl Body {
    /// Create a body at rest
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
            velocity: Vec2::ZERO,
        }
    }

    /// Bounding box in world space
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Shift the body without touching its velocity
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Replace the bounding-box size, keeping the top-left corner fixed
    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }
}
