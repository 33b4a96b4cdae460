// Player animation set

use std::sync::Arc;

use super::state::{sprite_key, Facing, PlayerState};
use crate::engine::assets::{AssetError, AssetLoader, AssetResult, Frame, SpriteLibrary};

/// Sheet directory group for playable characters
const CHARACTER_GROUP: &str = "MainCharacters";

/// Character sheets are cut into square frames of this size before upscaling
const CHARACTER_FRAME_SIZE: u32 = 32;

/// Left and right versions of one animation
#[derive(Debug, Clone)]
struct Directional {
    left: Arc<[Frame]>,
    right: Arc<[Frame]>,
}

impl Directional {
    fn require(library: &SpriteLibrary, state: PlayerState) -> AssetResult<Self> {
        Ok(Self {
            left: non_empty(library, &sprite_key(state, Facing::Left))?,
            right: non_empty(library, &sprite_key(state, Facing::Right))?,
        })
    }

    #[cfg(test)]
    fn uniform(frames: &Arc<[Frame]>) -> Self {
        Self {
            left: Arc::clone(frames),
            right: Arc::clone(frames),
        }
    }

    fn facing(&self, facing: Facing) -> &Arc<[Frame]> {
        match facing {
            Facing::Left => &self.left,
            Facing::Right => &self.right,
        }
    }
}

fn non_empty(library: &SpriteLibrary, key: &str) -> AssetResult<Arc<[Frame]>> {
    let frames = library.require(key)?;
    if frames.is_empty() {
        return Err(AssetError::EmptySequence(key.to_string()));
    }
    Ok(frames)
}

/// Every sequence the player can show, checked when the set is built
///
/// Holds shared references into the sprite library, so cloning a set is
/// cheap and never copies pixels.
#[derive(Debug, Clone)]
pub struct AnimationSet {
    idle: Directional,
    run: Directional,
    jump: Directional,
    double_jump: Directional,
    fall: Directional,
    hit: Directional,
}

impl AnimationSet {
    /// Resolve every `(state, facing)` sequence from a library
    ///
    /// Fails if any of the twelve sheets is missing or empty.
    pub fn from_library(library: &SpriteLibrary) -> AssetResult<Self> {
        Ok(Self {
            idle: Directional::require(library, PlayerState::Idle)?,
            run: Directional::require(library, PlayerState::Running)?,
            jump: Directional::require(library, PlayerState::Jumping(1))?,
            double_jump: Directional::require(library, PlayerState::Jumping(2))?,
            fall: Directional::require(library, PlayerState::Falling)?,
            hit: Directional::require(library, PlayerState::Hit)?,
        })
    }

    /// Load a character from `MainCharacters/<name>`
    pub fn load(loader: &AssetLoader, character: &str) -> AssetResult<Self> {
        let library = SpriteLibrary::load(
            loader,
            CHARACTER_GROUP,
            character,
            CHARACTER_FRAME_SIZE,
            CHARACTER_FRAME_SIZE,
            true,
        )?;
        Self::from_library(&library)
    }

    /// A set that shows the same frame in every state
    #[cfg(test)]
    pub fn uniform(frame: Frame) -> Self {
        let frames: Arc<[Frame]> = Arc::from(vec![frame]);
        let same = Directional::uniform(&frames);
        Self {
            idle: same.clone(),
            run: same.clone(),
            jump: same.clone(),
            double_jump: same.clone(),
            fall: same.clone(),
            hit: same,
        }
    }

    /// The sequence for a state and facing
    pub fn sequence(&self, state: PlayerState, facing: Facing) -> &Arc<[Frame]> {
        let directional = match state {
            PlayerState::Idle => &self.idle,
            PlayerState::Running => &self.run,
            PlayerState::Jumping(2) => &self.double_jump,
            PlayerState::Jumping(_) => &self.jump,
            PlayerState::Falling => &self.fall,
            PlayerState::Hit => &self.hit,
        };
        directional.facing(facing)
    }
}

/// Index of the image to show after `counter` frames
///
/// Each image stays up for `delay` frames and the sequence loops.
pub fn frame_index(counter: u32, delay: u32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (counter / delay.max(1)) as usize % len
}
