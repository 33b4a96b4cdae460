// Player state derivation

use glam::Vec2;

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Suffix of the directional sprite sheet names
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// What the player is doing this frame
///
/// The state is not stored between frames: it is derived from the player's
/// hit flag, velocity and jump count every time the sprite is updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Running,
    /// Rising after the first or second jump
    Jumping(u8),
    Falling,
    /// Inside the damage cooldown window
    Hit,
}

impl PlayerState {
    /// Every state that has its own sprite sheet
    #[cfg(test)]
    pub const ALL: [PlayerState; 6] = [
        Self::Idle,
        Self::Running,
        Self::Jumping(1),
        Self::Jumping(2),
        Self::Falling,
        Self::Hit,
    ];

    /// Pick the state for the current frame
    ///
    /// Hit wins over everything. While rising the jump count selects the
    /// jump sheet; a rise without a matching jump shows idle. Otherwise a
    /// fall faster than `fall_threshold` beats running.
    pub fn derive(hit: bool, velocity: Vec2, jump_count: u8, fall_threshold: f32) -> Self {
        if hit {
            Self::Hit
        } else if velocity.y < 0.0 {
            match jump_count {
                1 | 2 => Self::Jumping(jump_count),
                _ => Self::Idle,
            }
        } else if velocity.y > fall_threshold {
            Self::Falling
        } else if velocity.x != 0.0 {
            Self::Running
        } else {
            Self::Idle
        }
    }

    /// Sprite sheet name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "run",
            Self::Jumping(2) => "double_jump",
            Self::Jumping(_) => "jump",
            Self::Falling => "fall",
            Self::Hit => "hit",
        }
    }
}

/// Full sprite key, e.g. `double_jump_left`
pub fn sprite_key(state: PlayerState, facing: Facing) -> String {
    format!("{}_{}", state.animation_name(), facing.suffix())
}
