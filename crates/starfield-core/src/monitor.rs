use crate::constants::{FPS_SAMPLE_SECS, FPS_WARN_BELOW};
use std::time::Duration;

/// Once-per-second frame rate sampler. Logs a warning when a sample falls
/// below the threshold.
#[derive(Clone, Debug)]
pub struct FrameRateMonitor {
    frames: u32,
    elapsed: Duration,
    warn_below: f32,
}

impl Default for FrameRateMonitor {
    fn default() -> Self {
        Self::new(FPS_WARN_BELOW)
    }
}

impl FrameRateMonitor {
    pub fn new(warn_below: f32) -> Self {
        Self {
            frames: 0,
            elapsed: Duration::ZERO,
            warn_below,
        }
    }

    /// Counts one frame; returns the rounded FPS whenever a sample window
    /// closes.
    pub fn record(&mut self, dt: Duration) -> Option<u32> {
        self.frames += 1;
        self.elapsed += dt;
        let secs = self.elapsed.as_secs_f32();
        if secs < FPS_SAMPLE_SECS {
            return None;
        }
        let fps = (self.frames as f32 / secs).round() as u32;
        if (fps as f32) < self.warn_below {
            log::warn!("[perf] frame rate below target: {}", fps);
        }
        self.frames = 0;
        self.elapsed = Duration::ZERO;
        Some(fps)
    }
}
