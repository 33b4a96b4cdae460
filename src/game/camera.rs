// Horizontal scrolling camera

use glam::Vec2;

use crate::core::math::Rect;

/// Side-scrolling camera
///
/// Only the horizontal offset moves. The view scrolls by the player's own
/// speed whenever the player walks into the scroll area at either window
/// edge, so the player is pushed along rather than centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    offset_x: f32,
    view_width: f32,
    scroll_area: f32,
}

impl Camera {
    pub fn new(offset_x: f32, view_width: f32, scroll_area: f32) -> Self {
        Self {
            offset_x,
            view_width,
            scroll_area,
        }
    }

    /// Scroll after the player moved with horizontal velocity `vx`
    pub fn follow(&mut self, target: Rect, vx: f32) {
        let near_right = target.right() - self.offset_x >= self.view_width - self.scroll_area;
        let near_left = target.left() - self.offset_x <= self.scroll_area;

        if (near_right && vx > 0.0) || (near_left && vx < 0.0) {
            self.offset_x += vx;
        }
    }

    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    /// World position to window position
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x - self.offset_x, world.y)
    }
}
