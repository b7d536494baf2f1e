//! Effect system with compile-time known effect variants
//!
//! All effects are stored in an enum to avoid heap allocations.
//! Each effect implements the `Effect` trait and colors one LED of a group
//! (words or seconds) per call.

mod color_cycle;
mod params;
mod pulse;
mod rainbow;
mod static_color;

pub use color_cycle::ColorCycleEffect;
pub use params::{EffectGroup, EffectParams, rotating_hue};
pub use pulse::PulseEffect;
pub use rainbow::RainbowEffect;
pub use static_color::StaticColorEffect;

use crate::color::{ColorSynth, Rgb};

const EFFECT_NAME_NONE: &str = "none";
const EFFECT_NAME_RAINBOW: &str = "rainbow";
const EFFECT_NAME_PULSE: &str = "pulse";
const EFFECT_NAME_BREATHE: &str = "breathe";
const EFFECT_NAME_COLOR_CYCLE: &str = "color_cycle";

const EFFECT_ID_NONE: u8 = 0;
const EFFECT_ID_RAINBOW: u8 = 1;
const EFFECT_ID_PULSE: u8 = 2;
const EFFECT_ID_BREATHE: u8 = 3;
const EFFECT_ID_COLOR_CYCLE: u8 = 4;

pub trait Effect {
    /// Color of the LED at `index` within its group (reading order)
    ///
    /// `base` is the ambient color of the LED's category.
    fn color_at(
        &self,
        params: &EffectParams,
        group: EffectGroup,
        index: usize,
        base: Rgb,
        synth: &mut ColorSynth,
    ) -> Rgb;

    /// Check if the effect output changes over time
    fn is_animated(&self) -> bool {
        true
    }
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    /// Ambient color, no animation
    None(StaticColorEffect),
    /// Per-LED hue offsets rotating through hue space
    Rainbow(RainbowEffect),
    /// Fast sinusoidal intensity
    Pulse(PulseEffect),
    /// Slow sinusoidal intensity with a deeper floor
    Breathe(PulseEffect),
    /// One hue shared by the whole group, sweeping linearly
    ColorCycle(ColorCycleEffect),
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    None = EFFECT_ID_NONE,
    #[default]
    Rainbow = EFFECT_ID_RAINBOW,
    Pulse = EFFECT_ID_PULSE,
    Breathe = EFFECT_ID_BREATHE,
    ColorCycle = EFFECT_ID_COLOR_CYCLE,
}

impl Default for EffectSlot {
    fn default() -> Self {
        EffectId::default().to_slot()
    }
}

impl EffectId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_NONE => Self::None,
            EFFECT_ID_RAINBOW => Self::Rainbow,
            EFFECT_ID_PULSE => Self::Pulse,
            EFFECT_ID_BREATHE => Self::Breathe,
            EFFECT_ID_COLOR_CYCLE => Self::ColorCycle,
            _ => return None,
        })
    }

    pub fn to_slot(self) -> EffectSlot {
        match self {
            Self::None => EffectSlot::None(StaticColorEffect),
            Self::Rainbow => EffectSlot::Rainbow(RainbowEffect),
            Self::Pulse => EffectSlot::Pulse(PulseEffect::pulse()),
            Self::Breathe => EffectSlot::Breathe(PulseEffect::breathe()),
            Self::ColorCycle => EffectSlot::ColorCycle(ColorCycleEffect),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => EFFECT_NAME_NONE,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
            Self::Pulse => EFFECT_NAME_PULSE,
            Self::Breathe => EFFECT_NAME_BREATHE,
            Self::ColorCycle => EFFECT_NAME_COLOR_CYCLE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_NONE => Some(Self::None),
            EFFECT_NAME_RAINBOW => Some(Self::Rainbow),
            EFFECT_NAME_PULSE => Some(Self::Pulse),
            EFFECT_NAME_BREATHE => Some(Self::Breathe),
            EFFECT_NAME_COLOR_CYCLE => Some(Self::ColorCycle),
            _ => None,
        }
    }
}

impl EffectSlot {
    /// Color of a single LED of a group
    pub fn color_at(
        &self,
        params: &EffectParams,
        group: EffectGroup,
        index: usize,
        base: Rgb,
        synth: &mut ColorSynth,
    ) -> Rgb {
        match self {
            Self::None(effect) => effect.color_at(params, group, index, base, synth),
            Self::Rainbow(effect) => effect.color_at(params, group, index, base, synth),
            Self::Pulse(effect) | Self::Breathe(effect) => {
                effect.color_at(params, group, index, base, synth)
            }
            Self::ColorCycle(effect) => effect.color_at(params, group, index, base, synth),
        }
    }

    pub fn is_animated(&self) -> bool {
        match self {
            Self::None(effect) => effect.is_animated(),
            Self::Rainbow(effect) => effect.is_animated(),
            Self::Pulse(effect) | Self::Breathe(effect) => effect.is_animated(),
            Self::ColorCycle(effect) => effect.is_animated(),
        }
    }

    /// Get the effect ID for external observation
    pub fn id(&self) -> EffectId {
        match self {
            Self::None(_) => EffectId::None,
            Self::Rainbow(_) => EffectId::Rainbow,
            Self::Pulse(_) => EffectId::Pulse,
            Self::Breathe(_) => EffectId::Breathe,
            Self::ColorCycle(_) => EffectId::ColorCycle,
        }
    }
}
