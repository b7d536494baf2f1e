//! Settings intents and the queue that carries them to the render loop.
//!
//! Control code (UI entities, network handlers, interrupts) pushes intents
//! through a [`SettingsSender`]; the frame scheduler drains them at the start
//! of each tick, so the engine only observes configuration between frames.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::category::Category;
use crate::config::{EngineConfig, duration_from_secs};
use crate::effect::EffectId;
use crate::language::{Language, SecondsMode};
use crate::source::{LightSource, Lights};

/// Error returned when the settings queue is full; carries the intent back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrySendError(pub SettingsIntent);

/// A single configuration change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsIntent {
    /// Master power switch
    Power(bool),
    Language(Language),
    SecondsMode(SecondsMode),
    WordsEffect(EffectId),
    SecondsEffect(EffectId),
    /// Words fade-in duration in seconds
    WordsFadeIn(f32),
    /// Words fade-out duration in seconds
    WordsFadeOut(f32),
    /// Seconds trail length in seconds
    SecondsFadeOut(f32),
    /// Delay between typed LEDs in seconds
    TypingDelay(f32),
    /// `[0, 100]`
    RainbowSpread(f32),
    /// `[0, 100]`
    WordsEffectBrightness(f32),
    /// `[0, 100]`
    SecondsEffectBrightness(f32),
    /// `[0, 100]`
    EffectSpeed(f32),
    /// Replace (or remove) the light source of a category
    Light(Category, Option<LightSource>),
    /// Restore every setting to its default
    FactoryReset,
}

/// Bounded settings queue guarded by a critical section
pub struct SettingsChannel<const SIZE: usize> {
    queue: Mutex<RefCell<Deque<SettingsIntent, SIZE>>>,
}

impl<const SIZE: usize> Default for SettingsChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SIZE: usize> SettingsChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Sender handle; any number may coexist
    pub const fn sender(&self) -> SettingsSender<'_, SIZE> {
        SettingsSender { channel: self }
    }

    /// Receiver handle for the render loop
    pub const fn receiver(&self) -> SettingsReceiver<'_, SIZE> {
        SettingsReceiver { channel: self }
    }

    fn push(&self, intent: SettingsIntent) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(intent)
                .map_err(TrySendError)
        })
    }

    fn pop(&self) -> Option<SettingsIntent> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().pop_front())
    }
}

#[derive(Clone, Copy)]
pub struct SettingsSender<'a, const SIZE: usize> {
    channel: &'a SettingsChannel<SIZE>,
}

impl<const SIZE: usize> SettingsSender<'_, SIZE> {
    /// Queue an intent; returns it back if the queue is full
    pub fn try_send(&self, intent: SettingsIntent) -> Result<(), TrySendError> {
        self.channel.push(intent)
    }
}

#[derive(Clone, Copy)]
pub struct SettingsReceiver<'a, const SIZE: usize> {
    channel: &'a SettingsChannel<SIZE>,
}

impl<const SIZE: usize> SettingsReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Option<SettingsIntent> {
        self.channel.pop()
    }
}

/// What the engine must do after a batch of intents was applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsEffects {
    /// At least one intent was applied
    pub changed: bool,
    pub power: Option<bool>,
    pub language_changed: bool,
    /// Seconds display inputs changed; active sets must be recomputed
    pub seconds_changed: bool,
    pub effects_changed: bool,
    pub factory_reset: bool,
}

impl SettingsEffects {
    pub const fn needs_recompute(&self) -> bool {
        self.language_changed || self.seconds_changed || self.factory_reset
    }
}

fn percent(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Drains pending intents into the engine configuration
pub struct SettingsProcessor<'a, const SIZE: usize> {
    intents: SettingsReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> SettingsProcessor<'a, SIZE> {
    pub const fn new(intents: SettingsReceiver<'a, SIZE>) -> Self {
        Self { intents }
    }

    /// Apply every queued intent (non-blocking)
    pub fn process_pending(
        &mut self,
        config: &mut EngineConfig,
        lights: &mut Lights,
    ) -> SettingsEffects {
        let mut effects = SettingsEffects::default();
        while let Some(intent) = self.intents.try_receive() {
            apply_intent(intent, config, lights, &mut effects);
        }
        effects
    }
}

/// Apply one intent, recording the follow-up work in `effects`
pub fn apply_intent(
    intent: SettingsIntent,
    config: &mut EngineConfig,
    lights: &mut Lights,
    effects: &mut SettingsEffects,
) {
    effects.changed = true;
    match intent {
        SettingsIntent::Power(on) => effects.power = Some(on),
        SettingsIntent::Language(language) => {
            if config.language != language {
                config.language = language;
                effects.language_changed = true;
            }
        }
        SettingsIntent::SecondsMode(mode) => {
            if config.seconds_mode != mode {
                config.seconds_mode = mode;
                effects.seconds_changed = true;
            }
        }
        SettingsIntent::WordsEffect(effect) => {
            config.words_effect = effect;
            effects.effects_changed = true;
        }
        SettingsIntent::SecondsEffect(effect) => {
            config.seconds_effect = effect;
            effects.effects_changed = true;
        }
        SettingsIntent::WordsFadeIn(secs) => {
            config.timings.words_fade_in = duration_from_secs(secs);
        }
        SettingsIntent::WordsFadeOut(secs) => {
            config.timings.words_fade_out = duration_from_secs(secs);
        }
        SettingsIntent::SecondsFadeOut(secs) => {
            config.timings.seconds_fade_out = duration_from_secs(secs);
        }
        SettingsIntent::TypingDelay(secs) => config.timings.typing_delay = duration_from_secs(secs),
        SettingsIntent::RainbowSpread(value) => config.rainbow_spread = percent(value),
        SettingsIntent::WordsEffectBrightness(value) => {
            config.words_effect_brightness = percent(value);
        }
        SettingsIntent::SecondsEffectBrightness(value) => {
            config.seconds_effect_brightness = percent(value);
        }
        SettingsIntent::EffectSpeed(value) => config.effect_speed = percent(value),
        SettingsIntent::Light(category, source) => {
            let seconds_toggled = category == Category::Seconds
                && lights.is_on(category) != source.is_some_and(|s| s.on);
            lights.set(category, source);
            effects.seconds_changed |= seconds_toggled;
        }
        SettingsIntent::FactoryReset => {
            effects.language_changed |= config.language != EngineConfig::default().language;
            *config = EngineConfig::default();
            *lights = Lights::default();
            effects.power = Some(true);
            effects.effects_changed = true;
            effects.factory_reset = true;
        }
    }
}
