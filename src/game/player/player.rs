// The controllable actor

use glam::Vec2;
use log::debug;
use std::sync::Arc;

use super::animation::{frame_index, AnimationSet};
use super::state::{sprite_key, Facing, PlayerState};
use super::stats::PlayerStats;
use crate::core::math::Rect;
use crate::engine::assets::Frame;
use crate::engine::physics::{kinematics, Body, Collider, Kinematic, PixelMask};

/// The player character
///
/// Created once per level start and thrown away on restart; there is no
/// respawn in place.
#[derive(Debug, Clone)]
pub struct Player {
    body: Body,
    stats: PlayerStats,
    facing: Facing,
    state: PlayerState,

    /// Frames since the current animation was (re)started
    animation_count: u32,
    /// Frames since the last landing or first jump
    fall_count: u32,
    /// Jumps since the last landing
    jump_count: u8,

    /// Inside the damage cooldown window
    hit: bool,
    /// Frames spent in the current cooldown window
    hit_count: u32,
    health: i32,

    animations: AnimationSet,
    sequence: Arc<[Frame]>,
    frame_index: usize,
}

impl Player {
    /// Create a player at rest with its top-left corner at `spawn`
    pub fn new(spawn: Vec2, stats: PlayerStats, animations: AnimationSet) -> Self {
        let facing = Facing::default();
        let state = PlayerState::default();
        let sequence = Arc::clone(animations.sequence(state, facing));
        let size = sequence[0].size();

        Self {
            body: Body::new(spawn.x, spawn.y, size.x, size.y),
            stats,
            facing,
            state,
            animation_count: 0,
            fall_count: 0,
            jump_count: 0,
            hit: false,
            hit_count: 0,
            health: stats.max_health,
            animations,
            sequence,
            frame_index: 0,
        }
    }

    /// Jump if the jump budget allows it
    ///
    /// Returns `false` (and changes nothing) once `max_jumps` jumps have been
    /// used since the last landing.
    pub fn try_jump(&mut self) -> bool {
        if self.jump_count >= self.stats.max_jumps {
            return false;
        }

        self.body.velocity.y = self.stats.jump_velocity;
        self.animation_count = 0;
        self.jump_count += 1;
        if self.jump_count == 1 {
            self.fall_count = 0;
        }
        debug!("Jump {} (vy = {})", self.jump_count, self.body.velocity.y);
        true
    }

    pub fn move_left(&mut self) {
        self.body.velocity.x = -self.stats.move_speed;
        self.face(Facing::Left);
    }

    pub fn move_right(&mut self) {
        self.body.velocity.x = self.stats.move_speed;
        self.face(Facing::Right);
    }

    /// Drop horizontal velocity; input decides again every frame
    pub fn stop(&mut self) {
        self.body.velocity.x = 0.0;
    }

    fn face(&mut self, facing: Facing) {
        if self.facing != facing {
            self.facing = facing;
            self.animation_count = 0;
        }
    }

    /// Advance one frame: gravity, motion, hit cooldown and sprite
    pub fn tick(&mut self, fps: u32) {
        kinematics::integrate(&mut self.body, self.fall_count, fps, self.stats.gravity);

        if self.hit {
            self.hit_count += 1;
        }
        if self.hit_count > fps * 2 {
            self.hit = false;
            self.hit_count = 0;
        }

        self.fall_count = self.fall_count.saturating_add(1);
        self.update_sprite();
    }

    /// Re-derive the state and pick the image to show
    ///
    /// The bounding box takes the size of the new image, anchored at the
    /// top-left corner.
    fn update_sprite(&mut self) {
        self.state = PlayerState::derive(
            self.hit,
            self.body.velocity,
            self.jump_count,
            self.stats.fall_threshold,
        );

        let sequence = self.animations.sequence(self.state, self.facing);
        self.frame_index = frame_index(
            self.animation_count,
            self.stats.animation_delay,
            sequence.len(),
        );
        self.sequence = Arc::clone(sequence);
        self.animation_count = self.animation_count.wrapping_add(1);

        let size = self.current_frame().size();
        self.body.resize(size);
    }

    /// Lose one health point unless a cooldown window is already running
    ///
    /// Returns whether health was taken.
    pub fn take_damage(&mut self) -> bool {
        if self.hit || self.hit_count != 0 {
            return false;
        }

        self.health -= 1;
        self.hit = true;
        debug!("Player hit, health now {}", self.health);
        true
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    #[cfg(test)]
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    #[cfg(test)]
    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }

    pub fn jump_count(&self) -> u8 {
        self.jump_count
    }

    #[cfg(test)]
    pub fn fall_count(&self) -> u32 {
        self.fall_count
    }

    #[cfg(test)]
    pub fn animation_count(&self) -> u32 {
        self.animation_count
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    #[cfg(test)]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    #[cfg(test)]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Key of the sheet currently shown, e.g. `run_left`
    pub fn sprite_key(&self) -> String {
        sprite_key(self.state, self.facing)
    }

    /// The image currently shown
    pub fn current_frame(&self) -> &Frame {
        &self.sequence[self.frame_index]
    }

    #[cfg(test)]
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }
}

impl Collider for Player {
    fn bounds(&self) -> Rect {
        self.body.rect()
    }

    fn mask(&self) -> &PixelMask {
        self.current_frame().mask()
    }
}

impl Kinematic for Player {
    fn position(&self) -> Vec2 {
        self.body.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.body.position = position;
    }

    fn land(&mut self) {
        self.fall_count = 0;
        self.body.velocity.y = 0.0;
        self.jump_count = 0;
    }

    fn bump_head(&mut self) {
        self.body.velocity.y = -self.body.velocity.y;
    }
}
