//! Rainbow effect
//!
//! Every LED of a group gets a hue offset proportional to its position, on
//! top of a global phase that decreases over time. The pattern stays fixed
//! while its colors flow in one visual direction.

use libm::fmodf;

use super::{Effect, EffectGroup, EffectParams};
use crate::color::{ColorSynth, Rgb};

#[derive(Debug, Clone, Copy, Default)]
pub struct RainbowEffect;

impl Effect for RainbowEffect {
    fn color_at(
        &self,
        params: &EffectParams,
        group: EffectGroup,
        index: usize,
        _base: Rgb,
        synth: &mut ColorSynth,
    ) -> Rgb {
        let hue = fmodf(index as f32 * params.hue_per_led + params.hue_time, 1.0);
        synth.rgb_from_hsv(hue, 1.0, params.brightness(group))
    }
}
