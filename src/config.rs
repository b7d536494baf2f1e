//! Engine configuration and the firmware defaults.

use embassy_time::Duration;

use crate::effect::EffectId;
use crate::language::{Language, SecondsMode};

/// Rainbow cycle time at speed 50 (seconds)
pub const EFFECT_CYCLE_TIME_BASE_S: f32 = 45.0;
/// Fastest rainbow cycle time (seconds)
pub const EFFECT_CYCLE_TIME_MIN_S: f32 = 2.5;
/// Slowest rainbow cycle time (seconds)
pub const EFFECT_CYCLE_TIME_MAX_S: f32 = 450.0;
/// Speed value at which base periods apply
pub const EFFECT_SPEED_SCALE: f32 = 50.0;

pub const PULSE_PERIOD_BASE_MS: f32 = 1000.0;
pub const BREATHE_PERIOD_BASE_MS: f32 = 4000.0;
pub const COLOR_CYCLE_PERIOD_BASE_MS: f32 = 10_000.0;

/// Hue offset per LED at spread 100
pub const HUE_SPREAD_FACTOR: f32 = 0.1;

/// Shortest fade-out used when a zero duration would otherwise divide by zero
pub const MIN_FADE_DURATION: Duration = Duration::from_millis(10);

/// Reboot if no valid time arrives within this window
pub const BOOT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Fade and typing durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    /// Duration of a word fading in
    pub words_fade_in: Duration,
    /// Duration of a word fading out
    pub words_fade_out: Duration,
    /// Length of the trail left by the seconds ring
    pub seconds_fade_out: Duration,
    /// Delay between consecutive LEDs when typing words in
    pub typing_delay: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            words_fade_in: Duration::from_millis(300),
            words_fade_out: Duration::from_millis(1000),
            seconds_fade_out: Duration::from_secs(90),
            typing_delay: Duration::from_millis(130),
        }
    }
}

/// Configuration for the word clock engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub language: Language,
    pub seconds_mode: SecondsMode,
    pub words_effect: EffectId,
    pub seconds_effect: EffectId,
    pub timings: TransitionTimings,
    /// Rainbow spread across a word group, `[0, 100]`
    pub rainbow_spread: f32,
    /// Words effect brightness, `[0, 100]`
    pub words_effect_brightness: f32,
    /// Seconds effect brightness, `[0, 100]`
    pub seconds_effect_brightness: f32,
    /// Effect speed, `[0, 100]`
    pub effect_speed: f32,
    pub boot_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            language: Language::French,
            seconds_mode: SecondsMode::Current,
            words_effect: EffectId::Rainbow,
            seconds_effect: EffectId::Rainbow,
            timings: TransitionTimings::default(),
            rainbow_spread: 15.0,
            words_effect_brightness: 50.0,
            seconds_effect_brightness: 50.0,
            effect_speed: 10.0,
            boot_timeout: BOOT_TIMEOUT,
        }
    }
}

/// Rainbow cycle time in seconds for `speed` in `[0, 100]`
pub fn effect_cycle_time(speed: f32) -> f32 {
    let speed = speed.clamp(0.0, 100.0);
    if speed <= EFFECT_SPEED_SCALE {
        EFFECT_CYCLE_TIME_MAX_S
            - (speed / EFFECT_SPEED_SCALE) * (EFFECT_CYCLE_TIME_MAX_S - EFFECT_CYCLE_TIME_BASE_S)
    } else {
        EFFECT_CYCLE_TIME_BASE_S
            - ((speed - EFFECT_SPEED_SCALE) / EFFECT_SPEED_SCALE)
                * (EFFECT_CYCLE_TIME_BASE_S - EFFECT_CYCLE_TIME_MIN_S)
    }
}

/// Effect period in milliseconds for `speed` in `[0, 100]`
///
/// `base_period_ms` is the period at speed 60.
pub fn effect_period(base_period_ms: f32, speed: f32) -> f32 {
    let speed = speed.clamp(0.0, 100.0);
    base_period_ms * (100.0 - speed + 10.0) / EFFECT_SPEED_SCALE
}

/// Convert user-facing seconds to a duration; negative values become zero
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn duration_from_secs(seconds: f32) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        return Duration::from_millis(0);
    }
    Duration::from_micros((seconds * 1_000_000.0) as u64)
}

/// Duration as fractional seconds
pub fn as_secs_f32(duration: Duration) -> f32 {
    duration.as_micros() as f32 / 1_000_000.0
}
