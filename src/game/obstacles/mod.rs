// World obstacles
//
// Every obstacle blocks the player. The kind tag decides what touching it
// does on top of that (damage, finishing the level); the behaviour decides
// how it moves and animates from frame to frame.

pub mod oscillator;
pub mod trap;

use glam::Vec2;
use std::sync::Arc;

use crate::core::math::Rect;
use crate::engine::assets::{AssetError, AssetResult, Frame};
use crate::engine::physics::{Body, Collider, PixelMask};

pub use oscillator::Oscillator;
pub use trap::{FrameCycle, TrapAnimation};

/// Frames each trap image is shown for
pub const TRAP_ANIMATION_DELAY: u32 = 3;

/// Frames each spike-head image is shown for
pub const SPIKE_HEAD_ANIMATION_DELAY: u32 = 12;

/// Fill colour of moving platforms
const PLATFORM_COLOR: [u8; 4] = [0, 0, 0, 255];

/// What touching an obstacle means; fixed for the obstacle's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    /// Plain terrain
    Block,
    /// On/off hazard (fire, saw)
    Trap,
    /// Solid platform moving up and down
    MovingPlatform,
    /// Blinking hazard moving up and down
    SpikeHead,
    /// Touching it finishes the level
    LevelEnd,
}

impl ObstacleKind {
    /// Whether contact damages the player
    pub fn is_hazard(&self) -> bool {
        matches!(self, Self::Trap | Self::SpikeHead)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Trap => "trap",
            Self::MovingPlatform => "moving_platform",
            Self::SpikeHead => "spike_head",
            Self::LevelEnd => "level_end",
        }
    }
}

#[derive(Debug, Clone)]
enum Behaviour {
    Static,
    Trap(TrapAnimation),
    Platform(Oscillator),
    SpikeHead { motion: Oscillator, blink: FrameCycle },
}

/// A block, trap, platform or goal in the level
#[derive(Debug, Clone)]
pub struct Obstacle {
    kind: ObstacleKind,
    body: Body,
    frames: Arc<[Frame]>,
    frame_index: usize,
    behaviour: Behaviour,
}

fn require_frames(kind: ObstacleKind, frames: &Arc<[Frame]>) -> AssetResult<()> {
    if frames.is_empty() {
        return Err(AssetError::EmptySequence(kind.name().to_string()));
    }
    Ok(())
}

impl Obstacle {
    fn with_frames(
        kind: ObstacleKind,
        position: Vec2,
        frames: Arc<[Frame]>,
        behaviour: Behaviour,
    ) -> AssetResult<Self> {
        require_frames(kind, &frames)?;
        let size = frames[0].size();
        Ok(Self {
            kind,
            body: Body::new(position.x, position.y, size.x, size.y),
            frames,
            frame_index: 0,
            behaviour,
        })
    }

    /// Static terrain showing the first image of `frames`
    pub fn block(position: Vec2, frames: Arc<[Frame]>) -> AssetResult<Self> {
        Self::with_frames(ObstacleKind::Block, position, frames, Behaviour::Static)
    }

    /// Static goal block
    pub fn level_end(position: Vec2, frames: Arc<[Frame]>) -> AssetResult<Self> {
        Self::with_frames(ObstacleKind::LevelEnd, position, frames, Behaviour::Static)
    }

    /// A trap that starts switched off
    pub fn trap(position: Vec2, on: Arc<[Frame]>, off: Arc<[Frame]>) -> AssetResult<Self> {
        require_frames(ObstacleKind::Trap, &on)?;
        let animation = TrapAnimation::new(on, off.clone(), TRAP_ANIMATION_DELAY);
        Self::with_frames(
            ObstacleKind::Trap,
            position,
            off,
            Behaviour::Trap(animation),
        )
    }

    /// A spike head blinking through `blink` while it moves
    pub fn spike_head(
        position: Vec2,
        blink: Arc<[Frame]>,
        motion: Oscillator,
    ) -> AssetResult<Self> {
        Self::with_frames(
            ObstacleKind::SpikeHead,
            position,
            blink,
            Behaviour::SpikeHead {
                motion,
                blink: FrameCycle::new(SPIKE_HEAD_ANIMATION_DELAY),
            },
        )
    }

    /// A solid black platform of the given size
    pub fn moving_platform(position: Vec2, size: Vec2, motion: Oscillator) -> Self {
        let frame = Frame::solid(size.x.max(1.0) as u32, size.y.max(1.0) as u32, PLATFORM_COLOR);
        Self {
            kind: ObstacleKind::MovingPlatform,
            body: Body::new(position.x, position.y, size.x, size.y),
            frames: Arc::from(vec![frame]),
            frame_index: 0,
            behaviour: Behaviour::Platform(motion),
        }
    }

    /// Advance motion and animation by one frame
    pub fn tick(&mut self) {
        match &mut self.behaviour {
            Behaviour::Static => {}
            Behaviour::Trap(animation) => {
                self.frame_index = animation.advance();
                self.frames = Arc::clone(animation.frames());
            }
            Behaviour::Platform(motion) => {
                self.body.position.y = motion.step(self.body.position.y);
            }
            Behaviour::SpikeHead { motion, blink } => {
                self.body.position.y = motion.step(self.body.position.y);
                self.frame_index = blink.advance(self.frames.len());
            }
        }

        let size = self.current_frame().size();
        self.body.resize(size);
    }

    /// Light a trap. Returns `false` for obstacles without an on/off state.
    pub fn switch_on(&mut self) -> bool {
        match &mut self.behaviour {
            Behaviour::Trap(animation) => {
                animation.switch_on();
                true
            }
            _ => false,
        }
    }

    /// Put a trap out. Returns `false` for obstacles without an on/off state.
    pub fn switch_off(&mut self) -> bool {
        match &mut self.behaviour {
            Behaviour::Trap(animation) => {
                animation.switch_off();
                true
            }
            _ => false,
        }
    }

    /// `Some(lit)` for traps, `None` otherwise
    #[cfg(test)]
    pub fn is_on(&self) -> Option<bool> {
        match &self.behaviour {
            Behaviour::Trap(animation) => Some(animation.is_on()),
            _ => None,
        }
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// The image currently shown
    pub fn current_frame(&self) -> &Frame {
        // Sequences are checked to be non-empty on construction and every
        // index comes from a modulo of their length
        &self.frames[self.frame_index]
    }

    #[cfg(test)]
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }
}

impl Collider for Obstacle {
    fn bounds(&self) -> Rect {
        self.body.rect()
    }

    fn mask(&self) -> &PixelMask {
        self.current_frame().mask()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(len: usize, w: u32, h: u32) -> Arc<[Frame]> {
        (0..len)
            .map(|i| Frame::solid(w, h, [i as u8, 0, 0, 255]))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_hazard_kinds() {
        assert!(ObstacleKind::Trap.is_hazard());
        assert!(ObstacleKind::SpikeHead.is_hazard());
        assert!(!ObstacleKind::Block.is_hazard());
        assert!(!ObstacleKind::MovingPlatform.is_hazard());
        assert!(!ObstacleKind::LevelEnd.is_hazard());
    }

    #[test]
    fn test_block_is_static() {
        let mut block = Obstacle::block(Vec2::new(96.0, 704.0), frames(1, 96, 96)).unwrap();
        block.tick();
        assert_eq!(block.kind(), ObstacleKind::Block);
        assert_eq!(block.bounds(), Rect::new(96.0, 704.0, 96.0, 96.0));
        assert_eq!(block.mask().count(), 96 * 96);
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let result = Obstacle::block(Vec2::ZERO, frames(0, 1, 1));
        assert!(matches!(result, Err(AssetError::EmptySequence(_))));

        let result = Obstacle::trap(Vec2::ZERO, frames(0, 1, 1), frames(1, 1, 1));
        assert!(matches!(result, Err(AssetError::EmptySequence(_))));
    }

    #[test]
    fn test_trap_toggle_changes_animation_only() {
        let mut trap =
            Obstacle::trap(Vec2::new(0.0, 640.0), frames(8, 32, 64), frames(1, 32, 64)).unwrap();
        assert_eq!(trap.is_on(), Some(false));

        for _ in 0..4 {
            trap.tick();
        }
        assert_eq!(trap.frame_index(), 0);

        assert!(trap.switch_on());
        trap.tick();
        assert_eq!(trap.is_on(), Some(true));
        assert_eq!(trap.frame_index(), 1);
        assert_eq!(trap.kind(), ObstacleKind::Trap);
        assert!(trap.kind().is_hazard());

        assert!(trap.switch_off());
        trap.tick();
        assert_eq!(trap.frame_index(), 0);
        assert!(trap.kind().is_hazard());
    }

    #[test]
    fn test_switch_on_non_trap() {
        let mut block = Obstacle::block(Vec2::ZERO, frames(1, 4, 4)).unwrap();
        assert!(!block.switch_on());
        assert!(!block.switch_off());
        assert_eq!(block.is_on(), None);
    }

    #[test]
    fn test_moving_platform_oscillates() {
        let mut platform = Obstacle::moving_platform(
            Vec2::new(-288.0, 224.0),
            Vec2::new(96.0, 24.0),
            Oscillator::new(2.0, 128.0, 627.2),
        );
        platform.tick();
        assert_eq!(platform.position(), Vec2::new(-288.0, 226.0));
        assert_eq!(platform.bounds().height(), 24.0);

        for _ in 0..1000 {
            platform.tick();
            let y = platform.position().y;
            assert!((128.0..=627.2).contains(&y));
        }
    }

    #[test]
    fn test_spike_head_moves_and_blinks() {
        let mut spike = Obstacle::spike_head(
            Vec2::new(-584.0, 204.0),
            frames(4, 108, 140),
            Oscillator::new(5.0, 0.0, 704.0),
        )
        .unwrap();

        for _ in 0..12 {
            spike.tick();
        }
        assert_eq!(spike.position().y, 264.0);
        assert_eq!(spike.frame_index(), 0);

        spike.tick();
        assert_eq!(spike.frame_index(), 1);
        assert_eq!(spike.bounds().size.x, 108.0);
    }
}
