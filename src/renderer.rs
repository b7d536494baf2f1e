use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::boot::{self, BOOT_REFRESH_INTERVAL, BootSequencer, BootState, Connectivity};
use crate::canvas::Canvas;
use crate::category::{Category, LedClassifier};
use crate::clock::TimeOfDay;
use crate::color::{BLACK, ColorSynth, Rgb, blend_colors, channel_distance};
use crate::config::EngineConfig;
use crate::detector::{ChangeDetector, DetectedChanges};
use crate::diagnostics::estimate_power_w;
use crate::effect::{EffectGroup, EffectId, EffectParams, EffectSlot};
use crate::error::BootError;
use crate::fade::FadeEngine;
use crate::frame_scheduler::{AdaptiveScheduler, TIME_POLL_INTERVAL};
use crate::language::{ActiveLeds, SecondsDisplay, TYPING_SEQUENCE_CAPACITY};
use crate::layout::{LedIndex, is_excluded};
use crate::settings::{SettingsEffects, SettingsIntent, SettingsProcessor, apply_intent};
use crate::source::{CategoryColors, Lights};

/// Largest per-LED channel difference sum (3 × 255)
const MAX_CHANNEL_DISTANCE: f32 = 765.0;

/// Word clock engine - the main orchestrator
///
/// Owns every piece of animation state: active LED lists, classification,
/// previous-frame snapshots, fades and the frame buffer. Configuration only
/// changes between frames, through [`Renderer::apply`] or a settings queue.
pub struct Renderer<const N: usize> {
    // Configuration
    config: EngineConfig,
    lights: Lights,
    power_on: bool,
    words_effect: EffectSlot,
    seconds_effect: EffectSlot,

    // Time-derived state
    last_time: Option<TimeOfDay>,
    active: ActiveLeds,
    classifier: LedClassifier<N>,
    detector: ChangeDetector<N>,
    last_changes: DetectedChanges,

    // Animation state
    fades: FadeEngine<N>,
    boot: BootSequencer,
    adaptive: AdaptiveScheduler,
    synth: ColorSynth,

    // Output
    canvas: Canvas<N>,
    snapshot: [Rgb; N],
    dirty: bool,
}

impl<const N: usize> Renderer<N> {
    /// Create an engine; `now` starts the boot timeout
    pub fn new(config: EngineConfig, lights: Lights, now: Instant) -> Self {
        Self {
            words_effect: config.words_effect.to_slot(),
            seconds_effect: config.seconds_effect.to_slot(),
            boot: BootSequencer::new(now, config.boot_timeout),
            config,
            lights,
            power_on: true,
            last_time: None,
            active: ActiveLeds::new(),
            classifier: LedClassifier::new(),
            detector: ChangeDetector::new(),
            last_changes: DetectedChanges::default(),
            fades: FadeEngine::new(),
            adaptive: AdaptiveScheduler::new(),
            synth: ColorSynth::new(),
            canvas: Canvas::new(),
            snapshot: [BLACK; N],
            dirty: true,
        }
    }

    /// Last rendered frame
    pub const fn frame(&self) -> &[Rgb] {
        self.canvas.pixels()
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub const fn lights(&self) -> &Lights {
        &self.lights
    }

    pub const fn is_power_on(&self) -> bool {
        self.power_on
    }

    pub const fn boot_state(&self) -> BootState {
        self.boot.state()
    }

    pub const fn active_leds(&self) -> &ActiveLeds {
        &self.active
    }

    pub const fn classifier(&self) -> &LedClassifier<N> {
        &self.classifier
    }

    pub const fn fades(&self) -> &FadeEngine<N> {
        &self.fades
    }

    pub const fn adaptive(&self) -> &AdaptiveScheduler {
        &self.adaptive
    }

    /// Transitions seeded by the last time change
    pub const fn last_changes(&self) -> DetectedChanges {
        self.last_changes
    }

    /// Estimated draw of the current frame in watts
    pub fn power_estimate_w(&self) -> f32 {
        estimate_power_w(self.canvas.pixels())
    }

    /// Apply a single settings change
    pub fn apply(&mut self, intent: SettingsIntent, now: Instant) {
        let mut effects = SettingsEffects::default();
        apply_intent(intent, &mut self.config, &mut self.lights, &mut effects);
        self.apply_effects(effects, now);
    }

    /// Drain a settings queue (non-blocking)
    pub fn process_settings<const SIZE: usize>(
        &mut self,
        processor: &mut SettingsProcessor<'_, SIZE>,
        now: Instant,
    ) {
        let effects = processor.process_pending(&mut self.config, &mut self.lights);
        self.apply_effects(effects, now);
    }

    fn apply_effects(&mut self, effects: SettingsEffects, now: Instant) {
        if !effects.changed {
            return;
        }
        self.dirty = true;

        if let Some(power) = effects.power {
            self.power_on = power;
        }
        if effects.effects_changed {
            self.words_effect = self.config.words_effect.to_slot();
            self.seconds_effect = self.config.seconds_effect.to_slot();
        }
        if effects.factory_reset {
            #[cfg(feature = "esp32-log")]
            println!("[Renderer.apply_effects] factory reset");
        }

        if effects.language_changed {
            #[cfg(feature = "esp32-log")]
            println!(
                "[Renderer.apply_effects] language -> {}",
                self.config.language.as_str()
            );
            // Stale colors and categories would otherwise flash the old words.
            self.snapshot.fill(BLACK);
            self.detector.reset();
        }

        if !effects.needs_recompute() {
            return;
        }
        let Some(time) = self.last_time else {
            return;
        };
        match self.boot.state() {
            BootState::Complete => {
                self.recompute(time);
                self.last_changes = self.detector.detect(
                    &self.active,
                    &self.classifier,
                    &self.snapshot,
                    &self.config.timings,
                    time.second,
                    now,
                    &mut self.fades,
                );
            }
            BootState::TransitionToTime => {
                self.recompute(time);
                self.detector.prime(&self.classifier, &self.active);
            }
            _ => {}
        }
    }

    /// Advance the engine by one tick
    ///
    /// Returns whether a new frame was rendered. The only error is the boot
    /// timeout, signalled once.
    pub fn update(
        &mut self,
        now: Instant,
        time: Option<TimeOfDay>,
        connectivity: Connectivity,
    ) -> Result<bool, BootError> {
        match self.boot.state() {
            state if state.is_waiting() => {
                if let Some(time) = time {
                    self.sync_time(time, now);
                    self.render_transition(now);
                    return Ok(true);
                }
                self.boot.poll(now, connectivity)?;
                if !self.boot.should_refresh(now) {
                    return Ok(false);
                }
                self.render_waiting(now);
                Ok(true)
            }
            BootState::TransitionToTime => {
                if let Some(time) = time {
                    if self.last_time != Some(time) {
                        self.last_time = Some(time);
                        self.recompute(time);
                        self.detector.prime(&self.classifier, &self.active);
                    }
                }
                self.render_transition(now);
                Ok(true)
            }
            _ => Ok(self.update_running(now, time)),
        }
    }

    /// Time left before the engine wants another tick
    pub fn time_until_next_frame(&self, now: Instant) -> Duration {
        match self.boot.state() {
            BootState::Complete if self.dirty => Duration::from_ticks(0),
            BootState::Complete if self.is_animating() => self.adaptive.time_until_next(now),
            // Static display: only a new second can change the frame.
            BootState::Complete => TIME_POLL_INTERVAL,
            BootState::TransitionToTime => Duration::from_ticks(0),
            _ => BOOT_REFRESH_INTERVAL,
        }
    }

    fn sync_time(&mut self, time: TimeOfDay, now: Instant) {
        #[cfg(feature = "esp32-log")]
        println!(
            "[Renderer.sync_time] time synchronized {:02}:{:02}:{:02}",
            time.hour, time.minute, time.second
        );
        self.last_time = Some(time);
        self.recompute(time);
        self.detector.prime(&self.classifier, &self.active);
        self.fades.clear();
        self.boot.time_synced(now);
    }

    fn update_running(&mut self, now: Instant, time: Option<TimeOfDay>) -> bool {
        if let Some(time) = time {
            if self.last_time != Some(time) {
                let second_changed = self.last_time.is_none_or(|last| last.second != time.second);
                self.last_time = Some(time);
                self.recompute(time);
                self.last_changes = self.detector.detect(
                    &self.active,
                    &self.classifier,
                    &self.snapshot,
                    &self.config.timings,
                    time.second,
                    now,
                    &mut self.fades,
                );
                // A time change always renders immediately, bypassing the gate.
                self.render_frame(now, true);
                if second_changed {
                    self.log_status();
                }
                return true;
            }
        }

        if self.dirty {
            self.render_frame(now, false);
            return true;
        }

        if !self.is_animating() || !self.adaptive.should_update(now) {
            return false;
        }
        self.render_frame(now, false);
        true
    }

    /// Whether frames differ without a time change
    fn is_animating(&self) -> bool {
        self.power_on
            && (self.words_effect.is_animated()
                || self.seconds_effect.is_animated()
                || self.fades.has_transients())
    }

    /// Recompute active lists and the classification for `time`
    fn recompute(&mut self, time: TimeOfDay) {
        let seconds = SecondsDisplay {
            mode: self.config.seconds_mode,
            enabled: self.lights.is_on(Category::Seconds),
        };
        self.config
            .language
            .compute_active_leds(time, seconds, &mut self.active);
        self.classifier.rebuild(
            self.active.hours(),
            self.active.minutes(),
            self.active.seconds(),
        );
    }

    /// Render one frame of the running display
    fn render_frame(&mut self, now: Instant, time_changed: bool) {
        self.dirty = false;

        if !self.power_on {
            self.canvas.clear();
            self.finish_frame(now, time_changed);
            return;
        }

        let colors = self.lights.resolve_all();
        let params = EffectParams::new(now, &self.config);
        self.canvas.begin();

        let words_enabled =
            self.lights.is_on(Category::Hours) || self.lights.is_on(Category::Minutes);
        if words_enabled {
            self.render_words(now, &params, &colors);
        } else {
            self.fades.clear_words();
        }

        let seconds_on = self.lights.is_on(Category::Seconds);
        if seconds_on {
            self.render_seconds(&params, &colors);
        }

        let fade_out = self.config.timings.seconds_fade_out;
        if !seconds_on || fade_out.as_micros() == 0 {
            self.fades.clear_seconds();
        } else {
            let origin = if self.seconds_effect.id() == EffectId::Rainbow {
                self.seconds_effect.color_at(
                    &params,
                    EffectGroup::Seconds,
                    0,
                    colors.seconds,
                    &mut self.synth,
                )
            } else {
                colors.seconds
            };
            let second = self.last_time.map_or(0, |time| time.second);
            self.fades.render_seconds_fades(
                second,
                fade_out,
                origin,
                colors.background,
                &self.classifier,
                &mut self.canvas,
            );
        }

        self.fades.render_word_fades(
            now,
            self.config.timings.typing_delay,
            colors.background,
            &self.classifier,
            &mut self.canvas,
        );

        self.canvas.fill_unwritten(colors.background);
        self.finish_frame(now, time_changed);
    }

    /// Words of every enabled category, with effect and typing applied
    fn render_words(&mut self, now: Instant, params: &EffectParams, colors: &CategoryColors) {
        let groups = [
            (Category::Hours, colors.hours),
            (Category::Minutes, colors.minutes),
        ];

        let mut index = 0;
        for (category, base) in groups {
            let leds = match category {
                Category::Hours => self.active.hours(),
                _ => self.active.minutes(),
            };
            if !self.lights.is_on(category) {
                // Typing never progresses on a dark category.
                for &led in leds {
                    self.fades.cancel_typing(usize::from(led));
                }
                continue;
            }
            for &led in leds {
                let led = usize::from(led);
                let position = index;
                index += 1;
                if is_excluded(led, N) {
                    continue;
                }

                let Some(progress) = self.fades.typing_progress(led, now, &self.config.timings)
                else {
                    // Still waiting for its typing slot: keep whatever is on screen.
                    self.canvas.hold(led);
                    continue;
                };

                let color = self.words_effect.color_at(
                    params,
                    EffectGroup::Words,
                    position,
                    base,
                    &mut self.synth,
                );
                let color = if progress < 1.0 {
                    blend_colors(colors.background, color, progress)
                } else {
                    color
                };
                self.canvas.put(led, color);
            }
        }
    }

    fn render_seconds(&mut self, params: &EffectParams, colors: &CategoryColors) {
        for (position, &led) in self.active.seconds().iter().enumerate() {
            let color = self.seconds_effect.color_at(
                params,
                EffectGroup::Seconds,
                position,
                colors.seconds,
                &mut self.synth,
            );
            self.canvas.put(usize::from(led), color);
        }
    }

    fn render_waiting(&mut self, now: Instant) {
        if self.power_on {
            boot::render_waiting(
                &mut self.canvas,
                &mut self.synth,
                self.boot.state(),
                self.config.language.boot_glyph(),
                now,
            );
        } else {
            self.canvas.clear();
        }
        self.snapshot.copy_from_slice(self.canvas.pixels());
    }

    fn render_transition(&mut self, now: Instant) {
        let progress = self
            .boot
            .transition_progress(now, self.config.timings.words_fade_out);

        if self.power_on {
            let colors = self.lights.resolve_all();
            let params = EffectParams::new(now, &self.config);

            let mut words: Vec<LedIndex, TYPING_SEQUENCE_CAPACITY> = Vec::new();
            let mut word_colors: Vec<Rgb, TYPING_SEQUENCE_CAPACITY> = Vec::new();
            let groups = [
                (self.active.hours(), colors.hours),
                (self.active.minutes(), colors.minutes),
            ];
            for (position, (led, base)) in groups
                .iter()
                .flat_map(|(leds, base)| leds.iter().map(move |&led| (led, *base)))
                .enumerate()
            {
                let color = self.words_effect.color_at(
                    &params,
                    EffectGroup::Words,
                    position,
                    base,
                    &mut self.synth,
                );
                if words.push(led).is_err() || word_colors.push(color).is_err() {
                    break;
                }
            }

            boot::render_transition(
                &mut self.canvas,
                &mut self.synth,
                self.config.language.boot_glyph(),
                &words,
                &word_colors,
                colors.background,
                progress,
                now,
            );
        } else {
            self.canvas.clear();
        }
        self.snapshot.copy_from_slice(self.canvas.pixels());

        if progress >= 1.0 {
            self.boot.complete();
            self.dirty = true;
        }
    }

    /// Register the frame's change and store it as the next baseline
    fn finish_frame(&mut self, now: Instant, time_changed: bool) {
        let intensity = if time_changed {
            1.0
        } else {
            self.visual_change()
        };
        self.adaptive.register_visual_change(intensity);
        self.adaptive.frame_rendered(now);
        self.snapshot.copy_from_slice(self.canvas.pixels());
    }

    /// Mean normalized channel difference over the LEDs that changed
    fn visual_change(&self) -> f32 {
        let mut total: u32 = 0;
        let mut changed: u32 = 0;
        for led in 0..N {
            if is_excluded(led, N) {
                continue;
            }
            let distance = channel_distance(self.canvas.get(led), self.snapshot[led]);
            if distance > 0 {
                total += u32::from(distance);
                changed += 1;
            }
        }
        if changed == 0 {
            return 0.0;
        }
        total as f32 / (changed as f32 * MAX_CHANNEL_DISTANCE)
    }

    #[cfg_attr(not(feature = "esp32-log"), allow(clippy::unused_self))]
    fn log_status(&self) {
        #[cfg(feature = "esp32-log")]
        if let Some(time) = self.last_time {
            println!(
                "[Renderer] {:02}:{:02}:{:02} | {} | words={} seconds={} | {:.2} W | {} ms",
                time.hour,
                time.minute,
                time.second,
                self.config.language.code(),
                self.active.words_len(),
                self.active.seconds().len(),
                self.power_estimate_w(),
                self.adaptive.interval().as_millis()
            );
        }
    }
}
