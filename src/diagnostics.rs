//! Power estimate for status reporting (WS2812B ECO figures).

use crate::color::Rgb;
use crate::layout::is_excluded;

/// Quiescent current of one LED
pub const IDLE_CURRENT_MA: f32 = 1.0;
/// Current of one channel at full duty
pub const MAX_CURRENT_PER_CHANNEL_MA: f32 = 12.0;
pub const LED_VOLTAGE: f32 = 5.0;

/// Estimated draw of one LED in milliwatts
pub fn led_power_mw(color: Rgb) -> f32 {
    let duty = (f32::from(color.r) + f32::from(color.g) + f32::from(color.b)) / 255.0;
    (IDLE_CURRENT_MA + duty * MAX_CURRENT_PER_CHANNEL_MA) * LED_VOLTAGE
}

/// Estimated draw of a frame in watts; excluded positions are not counted
pub fn estimate_power_w(frame: &[Rgb]) -> f32 {
    let total_mw: f32 = frame
        .iter()
        .enumerate()
        .filter(|(led, _)| !is_excluded(*led, frame.len()))
        .map(|(_, &color)| led_power_mw(color))
        .sum();
    total_mw / 1000.0
}
