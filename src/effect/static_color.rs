//! Ambient color effect
//!
//! Every LED keeps its light source color.

use super::{Effect, EffectGroup, EffectParams};
use crate::color::{ColorSynth, Rgb};

/// Effect used when no animation is selected
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticColorEffect;

impl Effect for StaticColorEffect {
    fn color_at(
        &self,
        _params: &EffectParams,
        _group: EffectGroup,
        _index: usize,
        base: Rgb,
        _synth: &mut ColorSynth,
    ) -> Rgb {
        base
    }

    fn is_animated(&self) -> bool {
        false
    }
}
