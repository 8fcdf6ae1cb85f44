//! Frame clock
//!
//! The host owns one FrameClock and reads it once per displayed frame. Each
//! reading is a [`Tick`] that is fanned out to every registered producer.

use std::time::Instant;

/// One frame's time reading
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tick {
    /// Frame number, starting at 1 for the first tick
    pub frame: u64,
    /// Seconds since the clock started (never decreases)
    pub elapsed: f32,
    /// Seconds since the previous tick
    pub delta: f32,
}

impl Tick {
    /// A tick at an explicit time, for driving producers by hand
    pub fn at(frame: u64, elapsed: f32) -> Self {
        Self { frame, elapsed, delta: 0.0 }
    }
}

/// Monotonic frame clock
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    frame: u64,
    elapsed: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Read the wall clock and produce the next tick
    pub fn tick(&mut self) -> Tick {
        let now = self.start.elapsed().as_secs_f32();
        self.tick_at(now)
    }

    /// Produce the next tick at an explicit elapsed time
    ///
    /// Times earlier than the previous reading are clamped to it.
    pub fn tick_at(&mut self, elapsed: f32) -> Tick {
        let elapsed = elapsed.max(self.elapsed);
        let delta = elapsed - self.elapsed;
        self.elapsed = elapsed;
        self.frame += 1;
        Tick {
            frame: self.frame,
            elapsed,
            delta,
        }
    }

    /// Restart from zero
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
