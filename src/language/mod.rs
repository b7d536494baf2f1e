//! Time-to-words mappings.
//!
//! Every language is a variant of [`Language`]; the engine never dispatches
//! through trait objects. A language appends each word's LEDs, in reading
//! order, to [`ActiveLeds`].

mod english_uk;
mod french;
mod seconds;

use heapless::Vec;

pub use seconds::SecondsMode;

use crate::category::Category;
use crate::clock::TimeOfDay;
use crate::layout::LedIndex;

const LANGUAGE_NAME_FRENCH: &str = "french";
const LANGUAGE_NAME_ENGLISH_UK: &str = "english_uk";

const LANGUAGE_ID_FRENCH: u8 = 0;
const LANGUAGE_ID_ENGLISH_UK: u8 = 1;

/// Capacity of the hours and minutes lists
pub const WORD_LEDS_CAPACITY: usize = 64;
/// Capacity of the seconds list (the whole ring)
pub const SECONDS_LEDS_CAPACITY: usize = 64;
/// Capacity of the typing sequence (hours and minutes together)
pub const TYPING_SEQUENCE_CAPACITY: usize = 2 * WORD_LEDS_CAPACITY;

/// Matrix language
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Language {
    #[default]
    French = LANGUAGE_ID_FRENCH,
    EnglishUk = LANGUAGE_ID_ENGLISH_UK,
}

impl Language {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            LANGUAGE_ID_FRENCH => Self::French,
            LANGUAGE_ID_ENGLISH_UK => Self::EnglishUk,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::French => LANGUAGE_NAME_FRENCH,
            Self::EnglishUk => LANGUAGE_NAME_ENGLISH_UK,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            LANGUAGE_NAME_FRENCH => Some(Self::French),
            LANGUAGE_NAME_ENGLISH_UK => Some(Self::EnglishUk),
            _ => None,
        }
    }

    /// Display name
    pub const fn label(self) -> &'static str {
        match self {
            Self::French => "Français",
            Self::EnglishUk => "English UK",
        }
    }

    /// Short code used in status lines
    pub const fn code(self) -> &'static str {
        match self {
            Self::French => "FR",
            Self::EnglishUk => "UK",
        }
    }

    /// Fill `out` with the LEDs lit for `time`
    ///
    /// `out` is cleared first; its buffers are reused.
    pub fn compute_active_leds(
        self,
        time: TimeOfDay,
        seconds: SecondsDisplay,
        out: &mut ActiveLeds,
    ) {
        out.clear();
        match self {
            Self::French => french::compute_words(time, out),
            Self::EnglishUk => english_uk::compute_words(time, out),
        }
        seconds::compute_seconds(time.second, seconds, out);
    }

    /// LED group shown by the boot animation ("42")
    pub const fn boot_glyph(self) -> &'static [LedIndex] {
        match self {
            Self::French => french::BOOT_GLYPH,
            Self::EnglishUk => english_uk::BOOT_GLYPH,
        }
    }
}

/// How the seconds ring should be filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondsDisplay {
    pub mode: SecondsMode,
    /// False when the seconds light is off or absent
    pub enabled: bool,
}

/// Ordered LED lists for the current time value
#[derive(Debug, Clone, Default)]
pub struct ActiveLeds {
    hours: Vec<LedIndex, WORD_LEDS_CAPACITY>,
    minutes: Vec<LedIndex, WORD_LEDS_CAPACITY>,
    seconds: Vec<LedIndex, SECONDS_LEDS_CAPACITY>,
    typing_sequence: Vec<LedIndex, TYPING_SEQUENCE_CAPACITY>,
}

impl ActiveLeds {
    pub const fn new() -> Self {
        Self {
            hours: Vec::new(),
            minutes: Vec::new(),
            seconds: Vec::new(),
            typing_sequence: Vec::new(),
        }
    }

    /// Empty every list, keeping the storage
    pub fn clear(&mut self) {
        self.hours.clear();
        self.minutes.clear();
        self.seconds.clear();
        self.typing_sequence.clear();
    }

    /// Append a word to `category`
    ///
    /// Hours and minutes words also extend the typing sequence. LEDs past the
    /// list capacity are dropped.
    pub fn add_word(&mut self, leds: &[LedIndex], category: Category) {
        let target = match category {
            Category::Hours => &mut self.hours,
            Category::Minutes => &mut self.minutes,
            Category::Seconds => {
                for &led in leds {
                    let _ = self.seconds.push(led);
                }
                return;
            }
            Category::Background => return,
        };
        for &led in leds {
            let _ = target.push(led);
            let _ = self.typing_sequence.push(led);
        }
    }

    pub fn hours(&self) -> &[LedIndex] {
        &self.hours
    }

    pub fn minutes(&self) -> &[LedIndex] {
        &self.minutes
    }

    pub fn seconds(&self) -> &[LedIndex] {
        &self.seconds
    }

    /// Hours and minutes LEDs in the order words were added
    pub fn typing_sequence(&self) -> &[LedIndex] {
        &self.typing_sequence
    }

    /// Number of word LEDs (hours and minutes)
    pub fn words_len(&self) -> usize {
        self.hours.len() + self.minutes.len()
    }
}
