//! Animation simulation system
//!
//! Owns the frame clock and drives the frame loop:
//! - One tick per displayed frame
//! - Fan-out to every registered producer
//! - Periodic frame statistics at debug level

use cafe3d_core::{DirtyFlags, FrameClock, FrameLoop, Tick};

/// Result of a simulation update
pub struct SimulationResult {
    /// The tick that was delivered
    pub tick: Tick,
    /// What the producers touched during this tick
    pub dirty: DirtyFlags,
}

/// Ticks the frame loop once per frame
pub struct SimulationSystem {
    clock: FrameClock,
    stats_interval: u64,
    stats_frame: u64,
    stats_elapsed: f32,
}

impl SimulationSystem {
    /// Create a new simulation system
    ///
    /// `stats_interval` is the number of frames between statistics log
    /// lines; 0 disables them.
    pub fn new(stats_interval: u64) -> Self {
        Self {
            clock: FrameClock::new(),
            stats_interval,
            stats_frame: 0,
            stats_elapsed: 0.0,
        }
    }

    /// Run one frame off the wall clock
    pub fn update(&mut self, frame_loop: &mut FrameLoop) -> SimulationResult {
        let tick = self.clock.tick();
        self.advance(tick, frame_loop)
    }

    /// Run one frame at an explicit elapsed time
    pub fn update_at(&mut self, elapsed: f32, frame_loop: &mut FrameLoop) -> SimulationResult {
        let tick = self.clock.tick_at(elapsed);
        self.advance(tick, frame_loop)
    }

    fn advance(&mut self, tick: Tick, frame_loop: &mut FrameLoop) -> SimulationResult {
        let dirty = frame_loop.tick(&tick);

        if self.stats_interval > 0 && tick.frame - self.stats_frame >= self.stats_interval {
            let frames = tick.frame - self.stats_frame;
            let seconds = tick.elapsed - self.stats_elapsed;
            if seconds > 0.0 {
                log::debug!(
                    "frame {}: {:.1} fps, {} producers",
                    tick.frame,
                    frames as f32 / seconds,
                    frame_loop.len()
                );
            }
            self.stats_frame = tick.frame;
            self.stats_elapsed = tick.elapsed;
        }

        SimulationResult { tick, dirty }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe3d_core::{CoffeeScene, SceneLayout};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_loop_is_clean() {
        let mut simulation = SimulationSystem::default();
        let mut frame_loop = FrameLoop::new();
        let result = simulation.update_at(0.5, &mut frame_loop);
        assert_eq!(result.tick.frame, 1);
        assert_eq!(result.dirty, DirtyFlags::NONE);
    }

    #[test]
    fn test_mounted_scene_reports_dirty() {
        let mut simulation = SimulationSystem::new(2);
        let mut frame_loop = FrameLoop::new();
        let mut rng = StdRng::seed_from_u64(3);
        CoffeeScene::mount(&SceneLayout::coffee(), &mut frame_loop, &mut rng);

        let result = simulation.update_at(0.016, &mut frame_loop);
        assert!(result.dirty.contains(DirtyFlags::POINTS));
        assert!(result.dirty.contains(DirtyFlags::TRANSFORM));

        let result = simulation.update_at(0.032, &mut frame_loop);
        assert_eq!(result.tick.frame, 2);
        assert_eq!(simulation.clock().frame(), 2);
    }
}
