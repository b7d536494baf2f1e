//! LED ownership categories and the O(1) per-LED classification index.

use crate::layout::{LedIndex, is_excluded};

/// Logical owner of a LED for the current time value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Category {
    Hours = 0,
    Minutes = 1,
    Seconds = 2,
    #[default]
    Background = 3,
}

impl Category {
    /// Hours or minutes, the two categories that form the words
    pub const fn is_word(self) -> bool {
        matches!(self, Self::Hours | Self::Minutes)
    }

    /// Any category other than background
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Background)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Background => "background",
        }
    }
}

/// Dense LED → category index
///
/// Rebuilt from the active lists on every time change and read once per LED
/// per frame.
#[derive(Debug, Clone)]
pub struct LedClassifier<const N: usize> {
    index: [Category; N],
}

impl<const N: usize> Default for LedClassifier<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LedClassifier<N> {
    pub const fn new() -> Self {
        Self {
            index: [Category::Background; N],
        }
    }

    /// Rebuild the index from the per-category active lists
    ///
    /// Writes happen in hours, minutes, seconds order. Excluded positions stay
    /// background.
    pub fn rebuild(&mut self, hours: &[LedIndex], minutes: &[LedIndex], seconds: &[LedIndex]) {
        self.index.fill(Category::Background);
        self.assign(hours, Category::Hours);
        self.assign(minutes, Category::Minutes);
        self.assign(seconds, Category::Seconds);
    }

    fn assign(&mut self, leds: &[LedIndex], category: Category) {
        for &led in leds {
            let led = usize::from(led);
            if !is_excluded(led, N) {
                self.index[led] = category;
            }
        }
    }

    /// Category currently owning `led`; background when out of range
    pub fn lookup(&self, led: usize) -> Category {
        self.index.get(led).copied().unwrap_or_default()
    }

    /// Reset every LED to background
    pub fn clear(&mut self) {
        self.index.fill(Category::Background);
    }

    pub const fn as_slice(&self) -> &[Category] {
        &self.index
    }
}
