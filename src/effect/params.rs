use embassy_time::Instant;

use crate::config::{
    BREATHE_PERIOD_BASE_MS, COLOR_CYCLE_PERIOD_BASE_MS, EngineConfig, HUE_SPREAD_FACTOR,
    PULSE_PERIOD_BASE_MS, effect_cycle_time, effect_period,
};

/// LED group an effect is applied to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectGroup {
    Words,
    Seconds,
}

/// Per-frame effect inputs
///
/// Derived from wall-clock time and configuration only. Both groups read the
/// same instance so their phases agree within a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectParams {
    now_ms: u64,
    /// Global rainbow phase in `[0, 1)`, decreasing over time
    pub hue_time: f32,
    /// Hue increment per LED position within a group
    pub hue_per_led: f32,
    pub pulse_period_ms: u64,
    pub breathe_period_ms: u64,
    pub color_cycle_period_ms: u64,
    pub words_brightness: f32,
    pub seconds_brightness: f32,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn period_ms(period: f32) -> u64 {
    (period as u64).max(1)
}

/// Rainbow phase in `[0, 1)` that decreases once per `cycle_ms`
///
/// Uses integer milliseconds modulo the cycle so precision does not decay
/// with uptime.
pub fn rotating_hue(now_ms: u64, cycle_ms: u64) -> f32 {
    let cycle_ms = cycle_ms.max(1);
    let elapsed = (now_ms % cycle_ms) as f32 / cycle_ms as f32;
    if elapsed > 0.0 { 1.0 - elapsed } else { 0.0 }
}

impl EffectParams {
    pub fn new(now: Instant, config: &EngineConfig) -> Self {
        let now_ms = now.as_millis();
        let speed = config.effect_speed;

        let cycle_ms = period_ms(effect_cycle_time(speed) * 1000.0);

        Self {
            now_ms,
            hue_time: rotating_hue(now_ms, cycle_ms),
            hue_per_led: config.rainbow_spread / 100.0 * HUE_SPREAD_FACTOR,
            pulse_period_ms: period_ms(effect_period(PULSE_PERIOD_BASE_MS, speed)),
            breathe_period_ms: period_ms(effect_period(BREATHE_PERIOD_BASE_MS, speed)),
            color_cycle_period_ms: period_ms(effect_period(COLOR_CYCLE_PERIOD_BASE_MS, speed)),
            words_brightness: config.words_effect_brightness / 100.0,
            seconds_brightness: config.seconds_effect_brightness / 100.0,
        }
    }

    /// Brightness multiplier of `group`
    pub const fn brightness(&self, group: EffectGroup) -> f32 {
        match group {
            EffectGroup::Words => self.words_brightness,
            EffectGroup::Seconds => self.seconds_brightness,
        }
    }

    /// Position within a period, in `[0, 1)`
    pub fn phase(&self, period_ms: u64) -> f32 {
        let period_ms = period_ms.max(1);
        (self.now_ms % period_ms) as f32 / period_ms as f32
    }
}
