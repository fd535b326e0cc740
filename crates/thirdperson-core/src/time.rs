//! Frame clock
//!
//! Tracks the clamped, scaled delta of the current frame. Gameplay code reads
//! it when it needs "seconds since the last frame" outside of the tick
//! callback itself (rate-based look input, for instance).

use serde::{Deserialize, Serialize};

/// Frame clock settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Game seconds per real second
    pub time_scale: f32,
    /// Longest real frame accepted; hitches beyond this are cut off
    pub max_frame_delta: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_frame_delta: 0.25,
        }
    }
}

/// Per-frame game clock
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    pub config: TimeConfig,
    delta: f32,
    elapsed: f64,
    frames: u64,
    paused: bool,
}

impl GameTime {
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Start a new frame that took `real_delta` seconds and return its game delta.
    ///
    /// Negative deltas count as zero. While paused the game delta is zero but
    /// frames are still counted.
    pub fn advance(&mut self, real_delta: f32) -> f32 {
        self.frames += 1;
        self.delta = if self.paused {
            0.0
        } else {
            real_delta.clamp(0.0, self.config.max_frame_delta) * self.config.time_scale
        };
        self.elapsed += f64::from(self.delta);
        self.delta
    }

    /// Game seconds of the current frame
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Game seconds since the clock started
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    /// Frames advanced so far, paused ones included
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Negative scales are treated as zero (frozen)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.config.time_scale = scale.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_frames_have_zero_delta() {
        let mut time = GameTime::default();
        assert!(time.advance(0.016) > 0.0);
        assert_eq!(time.frame_count(), 1);

        time.pause();
        assert_eq!(time.advance(0.016), 0.0);
        assert_eq!(time.delta_seconds(), 0.0);
        assert_eq!(time.frame_count(), 2);
        assert!((time.elapsed_seconds() - 0.016).abs() < 1e-6);

        time.resume();
        assert!(!time.is_paused());
        assert!(time.advance(0.016) > 0.0);
    }

    #[test]
    fn test_delta_is_clamped_and_scaled() {
        let mut time = GameTime::default();
        time.set_time_scale(2.0);
        assert!((time.advance(1.0) - 0.5).abs() < f32::EPSILON);
        assert_eq!(time.advance(-1.0), 0.0);

        time.set_time_scale(-3.0);
        assert_eq!(time.config.time_scale, 0.0);
    }
}
