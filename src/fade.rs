//! Per-LED timed transitions: typing (fade-in), word fade-out and the
//! seconds trail.
//!
//! Entries are created by the change detector and advanced here once per
//! rendered frame. Removal only happens at the points documented on each
//! method, never while an iterator over the same map is alive.

use embassy_time::{Duration, Instant};

use crate::canvas::Canvas;
use crate::category::{Category, LedClassifier};
use crate::color::{Rgb, blend_colors};
use crate::config::{MIN_FADE_DURATION, TransitionTimings, as_secs_f32};
use crate::layout::{LedIndex, led_second};
use crate::led_map::LedMap;

/// Lowest fade-in progress drawn, so the first visible frame is never black
pub const MIN_FADE_IN_PROGRESS: f32 = 0.01;

/// Pending fade-in of a word LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingState {
    pub start: Instant,
    /// Position among the LEDs that appeared together, in reading order
    pub sequence_index: u16,
}

/// Fade-out of a LED that left its category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeState {
    /// Color rendered when the LED left its category
    pub origin: Rgb,
    pub start: Instant,
    pub duration: Duration,
    /// Word fades: position in the reversed word order.
    /// Seconds fades: second value at which the fade started.
    pub sequence_index: u16,
}

/// Signed microseconds between `start + delay` and `now`
#[allow(clippy::cast_possible_wrap)]
fn elapsed_after_delay(now: Instant, start: Instant, delay: Duration) -> i64 {
    let elapsed = now.saturating_duration_since(start).as_micros() as i64;
    elapsed - delay.as_micros() as i64
}

fn sequence_delay(typing_delay: Duration, sequence_index: u16) -> Duration {
    typing_delay * u32::from(sequence_index)
}

/// Owner of the three transient per-LED maps
#[derive(Debug, Clone, Default)]
pub struct FadeEngine<const N: usize> {
    typing: LedMap<TypingState, N>,
    word_fades: LedMap<FadeState, N>,
    seconds_fades: LedMap<FadeState, N>,
}

impl<const N: usize> FadeEngine<N> {
    pub const fn new() -> Self {
        Self {
            typing: LedMap::new(),
            word_fades: LedMap::new(),
            seconds_fades: LedMap::new(),
        }
    }

    /// Queue a fade-in; an existing entry for `led` is kept as is
    pub fn start_typing(&mut self, led: usize, now: Instant, sequence_index: u16) -> bool {
        if self.typing.contains(led) {
            return false;
        }
        self.typing.insert(
            led,
            TypingState {
                start: now,
                sequence_index,
            },
        );
        true
    }

    /// Start a word fade-out unless `led` is already fading
    pub fn start_word_fade(
        &mut self,
        led: usize,
        origin: Rgb,
        now: Instant,
        duration: Duration,
        sequence_index: u16,
    ) -> bool {
        if self.word_fades.contains(led) {
            return false;
        }
        let duration = if duration == Duration::from_ticks(0) {
            MIN_FADE_DURATION
        } else {
            duration
        };
        self.word_fades.insert(
            led,
            FadeState {
                origin,
                start: now,
                duration,
                sequence_index,
            },
        );
        true
    }

    /// Start (or restart) a seconds fade-out
    pub fn start_seconds_fade(
        &mut self,
        led: usize,
        origin: Rgb,
        now: Instant,
        duration: Duration,
        second: u8,
    ) {
        self.seconds_fades.insert(
            led,
            FadeState {
                origin,
                start: now,
                duration,
                sequence_index: u16::from(second),
            },
        );
    }

    /// Drop both fade-outs of `led`; returns true if a word fade was running
    pub fn cancel_fades(&mut self, led: usize) -> bool {
        self.seconds_fades.remove(led);
        self.word_fades.remove(led).is_some()
    }

    pub fn cancel_typing(&mut self, led: usize) {
        self.typing.remove(led);
    }

    /// Drop every typing entry and word fade
    pub fn clear_words(&mut self) {
        self.typing.clear();
        self.word_fades.clear();
    }

    pub fn clear_seconds(&mut self) {
        self.seconds_fades.clear();
    }

    pub fn clear(&mut self) {
        self.clear_words();
        self.clear_seconds();
    }

    /// True while any entry is alive, so frames keep being rendered
    pub fn has_transients(&self) -> bool {
        !self.typing.is_empty() || !self.word_fades.is_empty() || !self.seconds_fades.is_empty()
    }

    pub fn typing(&self) -> &LedMap<TypingState, N> {
        &self.typing
    }

    pub fn word_fades(&self) -> &LedMap<FadeState, N> {
        &self.word_fades
    }

    pub fn seconds_fades(&self) -> &LedMap<FadeState, N> {
        &self.seconds_fades
    }

    /// Fade-in progress of a word LED
    ///
    /// Returns `None` while the LED still waits for its typing delay (it must
    /// not be drawn at all). LEDs without an entry are fully visible. The entry
    /// is removed once progress reaches 1.
    pub fn typing_progress(
        &mut self,
        led: usize,
        now: Instant,
        timings: &TransitionTimings,
    ) -> Option<f32> {
        let Some(state) = self.typing.get(led).copied() else {
            return Some(1.0);
        };

        let delay = sequence_delay(timings.typing_delay, state.sequence_index);
        let elapsed = elapsed_after_delay(now, state.start, delay);
        if elapsed < 0 {
            return None;
        }

        let fade_in = timings.words_fade_in.as_micros();
        if fade_in == 0 {
            self.typing.remove(led);
            return Some(1.0);
        }

        let progress = elapsed as f32 / fade_in as f32;
        if progress >= 1.0 {
            self.typing.remove(led);
            return Some(1.0);
        }
        Some(progress.max(MIN_FADE_IN_PROGRESS))
    }

    /// Draw every word fade-out
    ///
    /// Entries whose LED is active again are dropped without drawing. An entry
    /// still waiting for its sequence delay holds its origin color; a finished
    /// one draws `background` and is dropped.
    pub fn render_word_fades(
        &mut self,
        now: Instant,
        typing_delay: Duration,
        background: Rgb,
        classifier: &LedClassifier<N>,
        canvas: &mut Canvas<N>,
    ) {
        if self.word_fades.is_empty() {
            return;
        }

        for led in 0..N {
            let Some(fade) = self.word_fades.get(led).copied() else {
                continue;
            };

            if classifier.lookup(led).is_active() {
                self.word_fades.remove(led);
                continue;
            }

            let delay = sequence_delay(typing_delay, fade.sequence_index);
            let elapsed = elapsed_after_delay(now, fade.start, delay);
            if elapsed < 0 {
                canvas.put(led, fade.origin);
                continue;
            }

            let progress = elapsed as f32 / fade.duration.as_micros().max(1) as f32;
            if progress >= 1.0 {
                canvas.put(led, background);
                self.word_fades.remove(led);
            } else {
                canvas.put(led, blend_colors(fade.origin, background, progress));
            }
        }
    }

    /// Draw the seconds trail
    ///
    /// The age of each entry is counted in whole seconds from its ring position
    /// to `current_second`. `origin` is the live color of the seconds group.
    /// Entries older than the fade window are dropped; entries whose LED is
    /// lit as a second again are skipped.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render_seconds_fades(
        &mut self,
        current_second: u8,
        fade_out: Duration,
        origin: Rgb,
        background: Rgb,
        classifier: &LedClassifier<N>,
        canvas: &mut Canvas<N>,
    ) {
        if self.seconds_fades.is_empty() {
            return;
        }

        let duration = as_secs_f32(fade_out);
        if duration <= 0.0 {
            self.seconds_fades.clear();
            return;
        }
        let window = (duration as u32).min(59);

        for led in 0..N {
            if !self.seconds_fades.contains(led) {
                continue;
            }
            if classifier.lookup(led) == Category::Seconds {
                continue;
            }

            let Some(second) = LedIndex::try_from(led).ok().and_then(led_second) else {
                self.seconds_fades.remove(led);
                continue;
            };
            let age = (u32::from(current_second) + 60 - u32::from(second)) % 60;
            if age == 0 {
                continue;
            }

            let progress = age as f32 / duration;
            if age > window || progress >= 1.0 {
                self.seconds_fades.remove(led);
                continue;
            }
            canvas.put(led, blend_colors(origin, background, progress));
        }
    }
}
