//! Frame timing utilities

use std::time::Instant;

/// Per-frame timer driving the main loop.
///
/// Call [`FrameTimer::tick`] exactly once at the top of each frame; the
/// delta and aggregate figures then describe the frame that just ended.
pub struct FrameTimer {
    started: Instant,
    last_frame: Instant,
    delta_time: f32,
    frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a timer anchored at the current instant.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_frame: now,
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the timer by one frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Seconds elapsed between the two most recent ticks.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Seconds elapsed since the timer was created.
    pub fn total_time(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Number of ticks so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second over the timer's whole lifetime.
    pub fn average_fps(&self) -> f32 {
        let total = self.total_time();
        if total > 0.0 {
            self.frame_count as f32 / total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances_frame_count_and_delta() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.frame_count(), 0);
        timer.tick();
        timer.tick();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.delta_time() >= 0.0);
        assert!(timer.total_time() >= timer.delta_time());
    }
}
