//! Frame rate gating.

use crate::time::Milliseconds;

/// Lower bound of the configurable frame delay.
pub const MIN_FRAME_DELAY: Milliseconds = Milliseconds(10);
/// Upper bound of the configurable frame delay.
pub const MAX_FRAME_DELAY: Milliseconds = Milliseconds(1000);
/// Frame delay used when nothing else is configured.
pub const DEFAULT_FRAME_DELAY: Milliseconds = Milliseconds(50);

/// Decides which host ticks produce a frame.
///
/// A tick produces a frame only if strictly more than the frame delay has
/// passed since the last produced frame. Skipped ticks are dropped, nothing
/// is queued for later.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RenderScheduler {
    frame_delay: Milliseconds,
    last_render: Option<Milliseconds>,
}

impl RenderScheduler {
    /// Creates a scheduler, the delay is clamped to the supported range.
    pub fn new(frame_delay: Milliseconds) -> Self {
        Self {
            frame_delay: frame_delay.clamp(MIN_FRAME_DELAY, MAX_FRAME_DELAY),
            last_render: None,
        }
    }

    pub fn frame_delay(&self) -> Milliseconds {
        self.frame_delay
    }

    /// Returns the time of the last produced frame.
    pub fn last_render(&self) -> Option<Milliseconds> {
        self.last_render
    }

    /// Returns `true` and remembers `now` if the tick should produce a frame.
    ///
    /// The first tick always produces a frame.
    pub fn poll(&mut self, now: Milliseconds) -> bool {
        let due = match self.last_render {
            Some(last) => now.saturating_since(last) > self.frame_delay,
            None => true,
        };
        if due {
            self.last_render = Some(now);
        }
        due
    }

    /// Marks `now` as a produced frame regardless of the delay.
    pub fn force(&mut self, now: Milliseconds) {
        self.last_render = Some(now);
    }
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_DELAY)
    }
}
