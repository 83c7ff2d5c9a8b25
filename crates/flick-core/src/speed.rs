//! Gesture offset to signed playback speed.
//!
//! Offsets are vertical drag distances normalized to `[-1, 1]`. Negative
//! offsets read backwards at one of two fixed presets, a dead-zone around the
//! touch point holds, and the forward branch interpolates into the configured
//! words-per-second range.

pub const REVERSE_FAST_BELOW: f32 = -0.55;
pub const REVERSE_SLOW_BELOW: f32 = -0.15;
pub const FORWARD_FROM: f32 = 0.15;

pub const REVERSE_FAST_SPEED: i32 = -5;
pub const REVERSE_SLOW_SPEED: i32 = -1;

const INDICATOR_REVERSE_FAST: f32 = 0.90;
const INDICATOR_REVERSE_SLOW: f32 = 0.40;
const INDICATOR_NEUTRAL: f32 = 0.15;

/// Forward words-per-second bounds. `max >= min` always holds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpeedRange {
    min: u16,
    max: u16,
}

impl SpeedRange {
    pub const fn new(min: u16, max: u16) -> Self {
        let max = if max < min { min } else { max };
        Self { min, max }
    }

    pub const fn min(self) -> u16 {
        self.min
    }

    pub const fn max(self) -> u16 {
        self.max
    }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self::new(3, 45)
    }
}

/// Divide a raw drag distance by the reference extent and clamp to `[-1, 1]`.
pub fn normalize_drag(delta: f32, reference_extent: f32) -> f32 {
    if !(reference_extent > 0.0) || !delta.is_finite() {
        return 0.0;
    }
    (delta / reference_extent).clamp(-1.0, 1.0)
}

/// Map a normalized offset to a signed speed.
pub fn speed_for_offset(offset: f32, range: SpeedRange) -> i32 {
    let offset = sanitize(offset);

    if offset < REVERSE_FAST_BELOW {
        REVERSE_FAST_SPEED
    } else if offset < REVERSE_SLOW_BELOW {
        REVERSE_SLOW_SPEED
    } else if offset < FORWARD_FROM {
        0
    } else {
        let span = (range.max - range.min) as f32;
        let value = range.min as f32 + forward_fraction(offset) * span;
        // Non-negative, so truncating after +0.5 rounds to nearest.
        (value + 0.5) as i32
    }
}

/// Fraction of the speed indicator's full scale to fill for `offset`.
pub fn indicator_fraction(offset: f32) -> f32 {
    let offset = sanitize(offset);

    if offset < REVERSE_FAST_BELOW {
        INDICATOR_REVERSE_FAST
    } else if offset < REVERSE_SLOW_BELOW {
        INDICATOR_REVERSE_SLOW
    } else if offset < FORWARD_FROM {
        INDICATOR_NEUTRAL
    } else {
        INDICATOR_NEUTRAL + forward_fraction(offset) * (1.0 - INDICATOR_NEUTRAL)
    }
}

fn forward_fraction(offset: f32) -> f32 {
    ((offset - FORWARD_FROM) / (1.0 - FORWARD_FROM)).clamp(0.0, 1.0)
}

fn sanitize(offset: f32) -> f32 {
    if offset.is_nan() {
        0.0
    } else {
        offset.clamp(-1.0, 1.0)
    }
}

/// Speed mapping bound to a range and the extent drags are normalized by.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedController {
    range: SpeedRange,
    reference_extent: f32,
}

impl SpeedController {
    pub const fn new(range: SpeedRange, reference_extent: f32) -> Self {
        Self {
            range,
            reference_extent,
        }
    }

    pub const fn range(&self) -> SpeedRange {
        self.range
    }

    pub fn set_range(&mut self, range: SpeedRange) {
        self.range = range;
    }

    pub fn speed_for_drag(&self, delta: f32) -> i32 {
        speed_for_offset(normalize_drag(delta, self.reference_extent), self.range)
    }

    pub fn indicator_for_drag(&self, delta: f32) -> f32 {
        indicator_fraction(normalize_drag(delta, self.reference_extent))
    }
}
