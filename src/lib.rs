#![no_std]

pub mod boot;
pub mod canvas;
pub mod category;
pub mod clock;
pub mod color;
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod effect;
pub mod error;
pub mod fade;
pub mod frame_scheduler;
pub mod language;
pub mod layout;
pub mod led_map;
pub mod renderer;
pub mod settings;
pub mod source;

pub use boot::{BootSequencer, BootState, Connectivity};
pub use category::{Category, LedClassifier};
pub use clock::TimeOfDay;
pub use config::{EngineConfig, TransitionTimings};
pub use detector::{ChangeDetector, DetectedChanges};
pub use effect::{EffectId, EffectSlot};
pub use error::BootError;
pub use fade::{FadeEngine, FadeState, TypingState};
pub use frame_scheduler::{AdaptiveScheduler, FrameResult, FrameScheduler};
pub use language::{ActiveLeds, Language, SecondsMode};
pub use layout::{LedIndex, NUM_LEDS};
pub use renderer::Renderer;
pub use settings::{
    SettingsChannel, SettingsIntent, SettingsProcessor, SettingsReceiver, SettingsSender,
};
pub use source::{BrightnessRange, LightSource, Lights};

pub use color::{ColorSynth, Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The frame scheduler is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}

/// Word clock engine for the 256-LED panel
pub type WordClock = Renderer<NUM_LEDS>;
