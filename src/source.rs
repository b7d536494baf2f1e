//! Logical light sources and the per-category color they resolve to.
//!
//! Each category is driven by one user-facing light (on/off, color,
//! brightness). Brightness is remapped into a category-specific window so the
//! panel never reaches full drive and the background stays dim.

use crate::category::Category;
use crate::color::{BLACK, Rgb};

/// Window into which a user brightness in `[0, 1]` is remapped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessRange {
    min: f32,
    max: f32,
}

impl BrightnessRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn min(self) -> f32 {
        self.min
    }

    pub const fn max(self) -> f32 {
        self.max
    }

    /// Map `value` from `[0, 1]` into `[min, max]`
    pub fn map(self, value: f32) -> f32 {
        let value = value.clamp(0.0, 1.0);
        self.min + value * (self.max - self.min)
    }
}

pub const HOURS_BRIGHTNESS_RANGE: BrightnessRange = BrightnessRange::new(0.15, 0.75);
pub const MINUTES_BRIGHTNESS_RANGE: BrightnessRange = BrightnessRange::new(0.15, 0.75);
pub const SECONDS_BRIGHTNESS_RANGE: BrightnessRange = BrightnessRange::new(0.15, 0.75);
pub const BACKGROUND_BRIGHTNESS_RANGE: BrightnessRange = BrightnessRange::new(0.15, 0.30);

/// State of one user-facing light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub on: bool,
    pub color: Rgb,
    /// Brightness in `[0, 1]`
    pub brightness: f32,
}

impl LightSource {
    pub const fn new(color: Rgb, brightness: f32) -> Self {
        Self {
            on: true,
            color,
            brightness,
        }
    }

    #[must_use]
    pub const fn off(mut self) -> Self {
        self.on = false;
        self
    }

    /// Scaled color within `range`, black when the light is off
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resolve(&self, range: BrightnessRange) -> Rgb {
        if !self.on {
            return BLACK;
        }
        let brightness = range.map(self.brightness);
        Rgb {
            r: (f32::from(self.color.r) * brightness) as u8,
            g: (f32::from(self.color.g) * brightness) as u8,
            b: (f32::from(self.color.b) * brightness) as u8,
        }
    }
}

/// The four category lights; an absent light counts as off
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub hours: Option<LightSource>,
    pub minutes: Option<LightSource>,
    pub seconds: Option<LightSource>,
    pub background: Option<LightSource>,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            hours: Some(LightSource::new(Rgb::new(0, 128, 128), 0.5)),
            minutes: Some(LightSource::new(Rgb::new(255, 128, 0), 0.5)),
            seconds: Some(LightSource::new(Rgb::new(128, 0, 255), 0.5)),
            background: Some(LightSource::new(Rgb::new(26, 26, 26), 0.1).off()),
        }
    }
}

impl Lights {
    /// All lights absent
    pub const fn none() -> Self {
        Self {
            hours: None,
            minutes: None,
            seconds: None,
            background: None,
        }
    }

    pub const fn get(&self, category: Category) -> Option<&LightSource> {
        match category {
            Category::Hours => self.hours.as_ref(),
            Category::Minutes => self.minutes.as_ref(),
            Category::Seconds => self.seconds.as_ref(),
            Category::Background => self.background.as_ref(),
        }
    }

    pub fn set(&mut self, category: Category, light: Option<LightSource>) {
        match category {
            Category::Hours => self.hours = light,
            Category::Minutes => self.minutes = light,
            Category::Seconds => self.seconds = light,
            Category::Background => self.background = light,
        }
    }

    /// Whether the light for `category` exists and is on
    pub fn is_on(&self, category: Category) -> bool {
        self.get(category).is_some_and(|light| light.on)
    }

    /// Ambient color of `category` after brightness remapping
    pub fn resolve(&self, category: Category) -> Rgb {
        self.get(category)
            .map(|light| light.resolve(brightness_range(category)))
            .unwrap_or(BLACK)
    }

    /// Resolve all four categories at once
    pub fn resolve_all(&self) -> CategoryColors {
        CategoryColors {
            hours: self.resolve(Category::Hours),
            minutes: self.resolve(Category::Minutes),
            seconds: self.resolve(Category::Seconds),
            background: self.resolve(Category::Background),
        }
    }
}

/// Brightness window used for `category`
pub const fn brightness_range(category: Category) -> BrightnessRange {
    match category {
        Category::Hours => HOURS_BRIGHTNESS_RANGE,
        Category::Minutes => MINUTES_BRIGHTNESS_RANGE,
        Category::Seconds => SECONDS_BRIGHTNESS_RANGE,
        Category::Background => BACKGROUND_BRIGHTNESS_RANGE,
    }
}

/// Colors resolved for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryColors {
    pub hours: Rgb,
    pub minutes: Rgb,
    pub seconds: Rgb,
    pub background: Rgb,
}
