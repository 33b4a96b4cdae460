// Player movement presets, one per level

/// Movement and health tuning for the player
///
/// All speeds are in world units per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    // Movement
    /// Horizontal speed while a direction is held
    pub move_speed: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_velocity: f32,
    /// Jumps allowed before landing
    pub max_jumps: u8,

    // Physics
    /// Scales how fast falling accelerates
    pub gravity: f32,
    /// Downward speed above which the fall animation plays
    pub fall_threshold: f32,

    // Presentation
    /// Frames each animation image is shown for
    pub animation_delay: u32,

    // Combat
    pub max_health: i32,
}

/// Fire level: floaty, long jumps
pub const FIRE_STATS: PlayerStats = PlayerStats {
    move_speed: 4.0,
    jump_velocity: -8.0,
    max_jumps: 2,
    gravity: 1.0,
    fall_threshold: 2.0,
    animation_delay: 3,
    max_health: 1,
};

/// Saw level: fast runner, short hops
pub const SAW_STATS: PlayerStats = PlayerStats {
    move_speed: 6.0,
    jump_velocity: -4.0,
    max_jumps: 2,
    gravity: 2.0,
    fall_threshold: 8.0,
    animation_delay: 3,
    max_health: 1,
};

/// Spike-head level: heavy, high jumps
pub const SPIKE_HEAD_STATS: PlayerStats = PlayerStats {
    move_speed: 4.0,
    jump_velocity: -20.0,
    max_jumps: 2,
    gravity: 5.0,
    fall_threshold: 40.0,
    animation_delay: 3,
    max_health: 1,
};

impl Default for PlayerStats {
    fn default() -> Self {
        FIRE_STATS
    }
}

impl PlayerStats {
    /// How far the horizontal collision probes reach on each side
    pub fn probe_reach(&self) -> f32 {
        self.move_speed * 2.0
    }
}
