use libm::roundf;

use crate::color::Rgb;

/// Fully dark pixel
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Smoothstep easing curve `t²(3 − 2t)` over `[0, 1]`
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Blend two RGB colors with an eased curve
///
/// # Arguments
/// * `from` - Color at `progress == 0`
/// * `to` - Color at `progress == 1`
/// * `progress` - Blend factor, clamped to `[0, 1]`
///
/// Both endpoints are returned exactly, so a finished fade never leaves
/// residue on the strip.
#[inline]
pub fn blend_colors(from: Rgb, to: Rgb, progress: f32) -> Rgb {
    if progress <= 0.0 {
        return from;
    }
    if progress >= 1.0 {
        return to;
    }
    let eased = smoothstep(progress);
    Rgb {
        r: blend_channel(from.r, to.r, eased),
        g: blend_channel(from.g, to.g, eased),
        b: blend_channel(from.b, to.b, eased),
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend_channel(from: u8, to: u8, eased: f32) -> u8 {
    let from = f32::from(from);
    let to = f32::from(to);
    roundf(from + (to - from) * eased).clamp(0.0, 255.0) as u8
}

/// Scale every channel by `factor` (expected within `[0, 1]`)
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale_color(color: Rgb, factor: f32) -> Rgb {
    let factor = factor.clamp(0.0, 1.0);
    Rgb {
        r: (f32::from(color.r) * factor) as u8,
        g: (f32::from(color.g) * factor) as u8,
        b: (f32::from(color.b) * factor) as u8,
    }
}

/// Per-channel saturating sum
#[inline]
pub const fn add_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: a.r.saturating_add(b.r),
        g: a.g.saturating_add(b.g),
        b: a.b.saturating_add(b.b),
    }
}

/// Sum of absolute channel differences (0..=765)
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn channel_distance(a: Rgb, b: Rgb) -> u16 {
    a.r.abs_diff(b.r) as u16 + a.g.abs_diff(b.g) as u16 + a.b.abs_diff(b.b) as u16
}
