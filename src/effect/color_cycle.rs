use super::{Effect, EffectGroup, EffectParams};
use crate::color::{ColorSynth, Rgb};

/// Whole group shares one hue that sweeps over its own period
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorCycleEffect;

impl Effect for ColorCycleEffect {
    fn color_at(
        &self,
        params: &EffectParams,
        group: EffectGroup,
        _index: usize,
        _base: Rgb,
        synth: &mut ColorSynth,
    ) -> Rgb {
        let hue = params.phase(params.color_cycle_period_ms);
        synth.rgb_from_hsv(hue, 1.0, params.brightness(group))
    }
}
