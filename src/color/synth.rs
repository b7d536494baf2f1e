//! HSV to RGB conversion with a memoized hue table.
//!
//! Within one frame almost every conversion shares the same saturation and
//! value, so the synth keeps one table of 360 hues for the last-seen pair and
//! rebuilds it only when that pair changes.

use libm::floorf;

use crate::color::{BLACK, Rgb};

/// Hue table resolution (one entry per degree)
pub const HUE_STEPS: usize = 360;

/// HSV synthesizer owning its hue cache
#[derive(Debug, Clone)]
pub struct ColorSynth {
    table: [Rgb; HUE_STEPS],
    saturation: f32,
    value: f32,
    rebuilds: u32,
}

impl Default for ColorSynth {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSynth {
    /// Create a synth with an empty cache
    pub const fn new() -> Self {
        Self {
            table: [BLACK; HUE_STEPS],
            // Never equal to a valid input, so the first lookup rebuilds.
            saturation: -1.0,
            value: -1.0,
            rebuilds: 0,
        }
    }

    /// Convert `h` (taken modulo 1), `s` and `v` to an RGB color
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rgb_from_hsv(&mut self, h: f32, s: f32, v: f32) -> Rgb {
        if s != self.saturation || v != self.value {
            self.rebuild(s, v);
        }

        let h = h - floorf(h);
        let index = ((h * HUE_STEPS as f32) as usize) % HUE_STEPS;
        self.table[index]
    }

    /// Number of table rebuilds since creation
    pub const fn rebuilds(&self) -> u32 {
        self.rebuilds
    }

    fn rebuild(&mut self, s: f32, v: f32) {
        self.saturation = s;
        self.value = v;
        self.rebuilds = self.rebuilds.wrapping_add(1);

        for (degree, entry) in self.table.iter_mut().enumerate() {
            *entry = hsv_to_rgb_uncached(degree as f32 / HUE_STEPS as f32, s, v);
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
fn hsv_to_rgb_uncached(h: f32, s: f32, v: f32) -> Rgb {
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    let sector = (h * 6.0) as u32;
    let f = h * 6.0 - sector as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match sector % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb {
        r: (r * 255.0) as u8,
        g: (g * 255.0) as u8,
        b: (b * 255.0) as u8,
    }
}
