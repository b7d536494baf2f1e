//! Sinusoidal intensity effects (pulse and breathe)

use core::f32::consts::PI;

use libm::sinf;

use super::{Effect, EffectGroup, EffectParams};
use crate::color::{ColorSynth, Rgb, scale_color};

const PULSE_MIN_INTENSITY: f32 = 0.3;
const PULSE_INTENSITY_RANGE: f32 = 0.7;
const BREATHE_MIN_INTENSITY: f32 = 0.1;
const BREATHE_INTENSITY_RANGE: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PulsePeriod {
    Pulse,
    Breathe,
}

/// Modulates the ambient color with a sine wave
#[derive(Debug, Clone, Copy)]
pub struct PulseEffect {
    min_intensity: f32,
    intensity_range: f32,
    period: PulsePeriod,
}

impl PulseEffect {
    pub const fn pulse() -> Self {
        Self {
            min_intensity: PULSE_MIN_INTENSITY,
            intensity_range: PULSE_INTENSITY_RANGE,
            period: PulsePeriod::Pulse,
        }
    }

    pub const fn breathe() -> Self {
        Self {
            min_intensity: BREATHE_MIN_INTENSITY,
            intensity_range: BREATHE_INTENSITY_RANGE,
            period: PulsePeriod::Breathe,
        }
    }

    /// Intensity factor in `[0, 1]` for this frame
    pub fn intensity(&self, params: &EffectParams, group: EffectGroup) -> f32 {
        let period_ms = match self.period {
            PulsePeriod::Pulse => params.pulse_period_ms,
            PulsePeriod::Breathe => params.breathe_period_ms,
        };
        let wave = (sinf(params.phase(period_ms) * 2.0 * PI) + 1.0) / 2.0;
        let intensity = self.min_intensity + wave * self.intensity_range;
        (intensity * params.brightness(group) * 2.0).min(1.0)
    }
}

impl Effect for PulseEffect {
    fn color_at(
        &self,
        params: &EffectParams,
        group: EffectGroup,
        _index: usize,
        base: Rgb,
        _synth: &mut ColorSynth,
    ) -> Rgb {
        scale_color(base, self.intensity(params, group))
    }
}
