// Window, timing and world-scale presets

use crate::engine::game_loop::DEFAULT_FPS;

/// Session-wide settings
#[derive(Debug, Clone, PartialEq)]
pub struct GameSettings {
    /// Window size in pixels; the world is drawn 1:1
    pub window_width: u32,
    pub window_height: u32,
    /// Target frame rate
    pub fps: u32,
    /// Distance from a window edge at which the camera starts scrolling
    pub scroll_area_width: f32,
    /// Edge length of a terrain block
    pub block_size: u32,
    /// Horizontal camera offset when a level starts
    pub initial_offset_x: f32,
    /// Directory holding the sprite sheets
    pub asset_root: &'static str,
}

/// The presets the levels are laid out for
pub const DEFAULT_SETTINGS: GameSettings = GameSettings {
    window_width: 1000,
    window_height: 800,
    fps: DEFAULT_FPS,
    scroll_area_width: 200.0,
    block_size: 96,
    // Centres the view on the spawn area: -1550 + width / 2
    initial_offset_x: -1050.0,
    asset_root: "assets",
};

impl Default for GameSettings {
    fn default() -> Self {
        DEFAULT_SETTINGS
    }
}

impl GameSettings {
    pub fn width(&self) -> f32 {
        self.window_width as f32
    }

    pub fn height(&self) -> f32 {
        self.window_height as f32
    }

    pub fn block(&self) -> f32 {
        self.block_size as f32
    }
}
