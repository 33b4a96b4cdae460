// Looping obstacle animations

use std::sync::Arc;

use crate::engine::assets::Frame;
use crate::game::player::animation::frame_index;

/// Frame counter for a looping obstacle animation
///
/// The counter restarts once `count / delay` passes the sequence length, so
/// the first image of a sequence is shown a little longer than the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCycle {
    delay: u32,
    count: u32,
}

impl FrameCycle {
    pub fn new(delay: u32) -> Self {
        Self {
            delay: delay.max(1),
            count: 0,
        }
    }

    /// Index to show this frame, then advance the counter
    pub fn advance(&mut self, len: usize) -> usize {
        let index = frame_index(self.count, self.delay, len);
        self.count += 1;
        if (self.count / self.delay) as usize > len {
            self.count = 0;
        }
        index
    }

    #[cfg(test)]
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Two-state trap animation (fire, saw)
///
/// The state only selects which sequence plays; it has no effect on
/// collisions.
#[derive(Debug, Clone)]
pub struct TrapAnimation {
    on: Arc<[Frame]>,
    off: Arc<[Frame]>,
    lit: bool,
    cycle: FrameCycle,
}

impl TrapAnimation {
    /// A trap that starts switched off
    pub fn new(on: Arc<[Frame]>, off: Arc<[Frame]>, delay: u32) -> Self {
        Self {
            on,
            off,
            lit: false,
            cycle: FrameCycle::new(delay),
        }
    }

    pub fn switch_on(&mut self) {
        self.lit = true;
    }

    pub fn switch_off(&mut self) {
        self.lit = false;
    }

    #[cfg(test)]
    pub fn is_on(&self) -> bool {
        self.lit
    }

    /// The sequence for the current state
    pub fn frames(&self) -> &Arc<[Frame]> {
        if self.lit {
            &self.on
        } else {
            &self.off
        }
    }

    /// Index of the image to show this frame
    pub fn advance(&mut self) -> usize {
        let len = self.frames().len();
        self.cycle.advance(len)
    }
}
