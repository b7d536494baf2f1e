//! Category change detection between two time values.
//!
//! Compares the previous per-LED categories with the freshly rebuilt
//! classification and seeds typing entries and fade-outs in the fade engine.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::category::{Category, LedClassifier};
use crate::color::{BLACK, Rgb};
use crate::config::TransitionTimings;
use crate::fade::FadeEngine;
use crate::language::{ActiveLeds, TYPING_SEQUENCE_CAPACITY};
use crate::layout::{LedIndex, is_excluded};

/// Number of transitions seeded by one detection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectedChanges {
    /// Word LEDs queued for typing
    pub appearing: usize,
    /// Word LEDs that were fading out and became active again
    pub revived: usize,
    /// Word fade-outs started
    pub disappearing_words: usize,
    /// Seconds fade-outs started
    pub disappearing_seconds: usize,
}

fn origin(origins: &[Rgb], led: usize) -> Rgb {
    origins.get(led).copied().unwrap_or(BLACK)
}

/// Previous-frame category snapshot and word order
#[derive(Debug, Clone)]
pub struct ChangeDetector<const N: usize> {
    prev_types: [Category; N],
    prev_active_words: Vec<LedIndex, TYPING_SEQUENCE_CAPACITY>,
}

impl<const N: usize> Default for ChangeDetector<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ChangeDetector<N> {
    pub const fn new() -> Self {
        Self {
            prev_types: [Category::Background; N],
            prev_active_words: Vec::new(),
        }
    }

    /// Take the current state as baseline without seeding any transition
    pub fn prime(&mut self, classifier: &LedClassifier<N>, active: &ActiveLeds) {
        self.copy_types(classifier);
        self.remember_words(active);
    }

    /// Forget the baseline; the next detection sees every LED as new
    pub fn reset(&mut self) {
        self.prev_types.fill(Category::Background);
        self.prev_active_words.clear();
    }

    /// Category of `led` in the previous snapshot
    pub fn previous(&self, led: usize) -> Category {
        self.prev_types.get(led).copied().unwrap_or_default()
    }

    /// Diff the previous snapshot against `classifier` and seed `fades`
    ///
    /// Origins of the fade-outs are read from `origins`, the colors of the
    /// last rendered frame. Active LEDs always win: any fade left on a LED
    /// that is lit again is dropped, and typing is only kept for word LEDs.
    #[allow(clippy::too_many_arguments)]
    pub fn detect(
        &mut self,
        active: &ActiveLeds,
        classifier: &LedClassifier<N>,
        origins: &[Rgb],
        timings: &TransitionTimings,
        second: u8,
        now: Instant,
        fades: &mut FadeEngine<N>,
    ) -> DetectedChanges {
        let zero = Duration::from_ticks(0);
        let mut changes = DetectedChanges::default();

        // Appearing words, in reading order
        let seed_typing = timings.words_fade_in > zero || timings.typing_delay > zero;
        let mut sequence_index: u16 = 0;
        for &led in active.typing_sequence() {
            let led = usize::from(led);
            if is_excluded(led, N) || self.previous(led) != Category::Background {
                continue;
            }
            if !classifier.lookup(led).is_word() {
                continue;
            }
            // A LED caught mid fade-out shows as active immediately.
            if fades.cancel_fades(led) {
                fades.cancel_typing(led);
                changes.revived += 1;
                continue;
            }
            if seed_typing && fades.start_typing(led, now, sequence_index) {
                sequence_index = sequence_index.saturating_add(1);
                changes.appearing += 1;
            }
        }

        // Disappearing words, mirrored reading order
        let seed_word_fades = timings.words_fade_out > zero || timings.typing_delay > zero;
        let mut sequence_index: u16 = 0;
        for &led in self.prev_active_words.iter().rev() {
            let led = usize::from(led);
            if is_excluded(led, N) || classifier.lookup(led) != Category::Background {
                continue;
            }
            if seed_word_fades
                && fades.start_word_fade(
                    led,
                    origin(origins, led),
                    now,
                    timings.words_fade_out,
                    sequence_index,
                )
            {
                changes.disappearing_words += 1;
            }
            sequence_index = sequence_index.saturating_add(1);
        }
        self.remember_words(active);

        // Disappearing seconds
        if timings.seconds_fade_out > zero {
            for led in 0..N {
                if is_excluded(led, N) || self.prev_types[led] != Category::Seconds {
                    continue;
                }
                if classifier.lookup(led) != Category::Background {
                    continue;
                }
                fades.start_seconds_fade(
                    led,
                    origin(origins, led),
                    now,
                    timings.seconds_fade_out,
                    second,
                );
                changes.disappearing_seconds += 1;
            }
        }

        for led in 0..N {
            let category = classifier.lookup(led);
            if category.is_active() {
                fades.cancel_fades(led);
            }
            if !category.is_word() {
                fades.cancel_typing(led);
            }
        }

        self.copy_types(classifier);
        changes
    }

    fn remember_words(&mut self, active: &ActiveLeds) {
        self.prev_active_words.clear();
        for &led in active.hours().iter().chain(active.minutes()) {
            let _ = self.prev_active_words.push(led);
        }
    }

    fn copy_types(&mut self, classifier: &LedClassifier<N>) {
        for led in 0..N {
            if !is_excluded(led, N) {
                self.prev_types[led] = classifier.lookup(led);
            }
        }
    }
}
