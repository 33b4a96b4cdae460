/// Frame pacing for the main loop
///
/// Caps the game at a fixed frame rate. Each frame runs exactly one step of
/// the world, so all motion constants are expressed per frame. When the
/// window falls behind, frames are dropped instead of replayed.
use std::time::{Duration, Instant};

/// Default frame rate the world constants are tuned for
pub const DEFAULT_FPS: u32 = 60;

/// Per-frame timing handed to the world step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Target frames per second; per-frame constants assume this rate
    pub fps: u32,
    /// Number of the frame being run, starting at 1
    pub frame: u64,
    /// Time since the clock started
    pub elapsed: Duration,
}

impl FrameContext {
    /// Context for a clock running at `fps`, used where no real clock exists
    #[cfg(test)]
    pub fn at_rate(fps: u32) -> Self {
        Self {
            fps,
            frame: 0,
            elapsed: Duration::ZERO,
        }
    }
}

/// Frame pacing state
pub struct FrameClock {
    /// Target frames per second
    fps: u32,

    /// Length of one frame at the target rate
    frame_duration: Duration,

    /// When the next frame is due
    next_deadline: Instant,

    /// Time when the clock was started
    start_time: Instant,

    /// Frames run so far
    frame_count: u64,

    /// Frames that started more than one frame late
    overruns: u64,
}

impl FrameClock {
    /// Create a clock targeting `fps` frames per second, starting now
    pub fn new(fps: u32) -> Self {
        Self::starting_at(fps, Instant::now())
    }

    /// Create a clock whose first frame is due at `start`
    pub fn starting_at(fps: u32, start: Instant) -> Self {
        let fps = fps.max(1);
        Self {
            fps,
            frame_duration: Duration::from_secs(1) / fps,
            next_deadline: start,
            start_time: start,
            frame_count: 0,
            overruns: 0,
        }
    }

    /// Start a frame if one is due at `now`
    ///
    /// Returns `false` when called before the deadline. A late frame runs
    /// once and the schedule restarts from `now`.
    pub fn begin_frame(&mut self, now: Instant) -> bool {
        if now < self.next_deadline {
            return false;
        }

        let late_by = now.duration_since(self.next_deadline);
        if late_by > self.frame_duration {
            self.overruns += 1;
            log::warn!(
                "Frame {} started {:.1}ms late",
                self.frame_count,
                late_by.as_secs_f32() * 1000.0
            );
            self.next_deadline = now + self.frame_duration;
        } else {
            self.next_deadline += self.frame_duration;
        }

        self.frame_count += 1;
        true
    }

    /// Timing for the frame that was just started
    pub fn context(&self) -> FrameContext {
        FrameContext {
            fps: self.fps,
            frame: self.frame_count,
            elapsed: self.elapsed(),
        }
    }

    /// When the next frame is due
    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    /// Target frames per second
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Length of one frame
    #[cfg(test)]
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Total number of frames run
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Number of frames that started late
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Time since the clock started
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}
