//! Engine tunables.

use crate::{format::DisplayMode, speed::SpeedRange};

pub const DEFAULT_IDLE_POLL_MS: u64 = 100;
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 50;
pub const DEFAULT_REFERENCE_EXTENT: f32 = 400.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub speed_range: SpeedRange,
    pub mode: DisplayMode,
    /// Re-check interval while speed is zero.
    pub idle_poll_ms: u64,
    /// Floor on the per-word interval.
    pub min_interval_ms: u64,
    /// Drag distance that maps to a full-scale offset.
    pub reference_extent: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            speed_range: SpeedRange::new(3, 45),
            mode: DisplayMode::Orp,
            idle_poll_ms: DEFAULT_IDLE_POLL_MS,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            reference_extent: DEFAULT_REFERENCE_EXTENT,
        }
    }
}

impl EngineConfig {
    pub const fn with_speed_range(mut self, speed_range: SpeedRange) -> Self {
        self.speed_range = speed_range;
        self
    }

    pub const fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_idle_poll_ms(mut self, idle_poll_ms: u64) -> Self {
        self.idle_poll_ms = idle_poll_ms;
        self
    }

    pub const fn with_min_interval_ms(mut self, min_interval_ms: u64) -> Self {
        self.min_interval_ms = min_interval_ms;
        self
    }

    pub const fn with_reference_extent(mut self, reference_extent: f32) -> Self {
        self.reference_extent = reference_extent;
        self
    }

    /// Delay after emitting a word at `speed`, or the idle poll when holding.
    pub fn step_interval_ms(&self, speed: i32) -> u64 {
        match speed.unsigned_abs() {
            0 => self.idle_poll_ms,
            magnitude => (1_000 / magnitude as u64).max(self.min_interval_ms),
        }
    }
}
