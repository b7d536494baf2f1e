//! Boot sequence: waiting animation, time-sync timeout and the crossfade
//! into the first time display.

use embassy_time::{Duration, Instant};
use libm::fmodf;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::canvas::Canvas;
use crate::color::{BLACK, ColorSynth, Rgb, add_colors, blend_colors, scale_color};
use crate::config::{HUE_SPREAD_FACTOR, MIN_FADE_DURATION};
use crate::effect::rotating_hue;
use crate::error::BootError;
use crate::layout::{LedIndex, SECONDS_RING_SIZE, is_excluded, ring_slot, second_led};

/// Boot display refresh interval
pub const BOOT_REFRESH_INTERVAL: Duration = Duration::from_millis(30);
/// Time the spinner head stays on one ring slot
pub const BOOT_RING_STEP: Duration = Duration::from_millis(120);
/// Spinner trail length, in ring slots
pub const BOOT_RING_TRAIL_LENGTH: f32 = 135.0;
/// Rainbow spread of the boot glyph
pub const BOOT_RAINBOW_SPREAD: f32 = 25.0;
/// Rainbow cycle of the boot glyph
pub const BOOT_CYCLE: Duration = Duration::from_secs(11);
/// Value (brightness) of the boot glyph and spinner
pub const BOOT_BRIGHTNESS: f32 = 0.5;

const RING_WAITING_WIFI: Rgb = Rgb::new(0, 0, 255);
const RING_WAITING_TIME: Rgb = Rgb::new(0, 255, 0);
const RING_CAPTIVE_PORTAL: Rgb = Rgb::new(255, 165, 0);

const BOOT_STATE_NAME_WAITING_WIFI: &str = "waiting_wifi";
const BOOT_STATE_NAME_WAITING_TIME_SYNC: &str = "waiting_time_sync";
const BOOT_STATE_NAME_CAPTIVE_PORTAL: &str = "captive_portal";
const BOOT_STATE_NAME_TRANSITION: &str = "transition_to_time";
const BOOT_STATE_NAME_COMPLETE: &str = "complete";

/// Boot progression
///
/// Strictly ordered except for the waiting states, which follow connectivity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BootState {
    #[default]
    WaitingWifi,
    WaitingTimeSync,
    CaptivePortal,
    TransitionToTime,
    Complete,
}

impl BootState {
    /// True before a valid time has been seen
    pub const fn is_waiting(self) -> bool {
        matches!(
            self,
            Self::WaitingWifi | Self::WaitingTimeSync | Self::CaptivePortal
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WaitingWifi => BOOT_STATE_NAME_WAITING_WIFI,
            Self::WaitingTimeSync => BOOT_STATE_NAME_WAITING_TIME_SYNC,
            Self::CaptivePortal => BOOT_STATE_NAME_CAPTIVE_PORTAL,
            Self::TransitionToTime => BOOT_STATE_NAME_TRANSITION,
            Self::Complete => BOOT_STATE_NAME_COMPLETE,
        }
    }

    /// Spinner color shown while waiting
    const fn ring_color(self) -> Rgb {
        match self {
            Self::WaitingTimeSync | Self::TransitionToTime => RING_WAITING_TIME,
            Self::CaptivePortal => RING_CAPTIVE_PORTAL,
            Self::WaitingWifi | Self::Complete => RING_WAITING_WIFI,
        }
    }
}

/// Network status reported by the platform
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Connectivity {
    pub wifi_connected: bool,
    pub captive_portal_active: bool,
}

/// Boot state machine
#[derive(Debug, Clone)]
pub struct BootSequencer {
    state: BootState,
    started: Instant,
    timeout: Duration,
    transition_start: Instant,
    timeout_signalled: bool,
    last_refresh: Option<Instant>,
}

impl BootSequencer {
    pub const fn new(now: Instant, timeout: Duration) -> Self {
        Self {
            state: BootState::WaitingWifi,
            started: now,
            timeout,
            transition_start: now,
            timeout_signalled: false,
            last_refresh: None,
        }
    }

    pub const fn state(&self) -> BootState {
        self.state
    }

    fn set_state(&mut self, state: BootState) {
        if self.state == state {
            return;
        }
        #[cfg(feature = "esp32-log")]
        println!(
            "[BootSequencer.set_state] {} -> {}",
            self.state.as_str(),
            state.as_str()
        );
        self.state = state;
    }

    /// Follow connectivity while waiting and enforce the sync timeout
    ///
    /// The timeout error is returned once; later calls keep waiting quietly so
    /// the boot animation stays on screen until the platform restarts.
    pub fn poll(&mut self, now: Instant, connectivity: Connectivity) -> Result<(), BootError> {
        if !self.state.is_waiting() {
            return Ok(());
        }

        let next = if connectivity.wifi_connected {
            BootState::WaitingTimeSync
        } else if connectivity.captive_portal_active {
            BootState::CaptivePortal
        } else {
            BootState::WaitingWifi
        };
        self.set_state(next);

        let waited = now.saturating_duration_since(self.started);
        if waited >= self.timeout && !self.timeout_signalled {
            self.timeout_signalled = true;
            #[cfg(feature = "esp32-log")]
            println!(
                "[BootSequencer.poll] no time sync after {} s, restart required",
                waited.as_secs()
            );
            return Err(BootError::TimeSyncTimeout {
                waited_s: waited.as_secs(),
            });
        }
        Ok(())
    }

    /// A valid time arrived; start the crossfade
    pub fn time_synced(&mut self, now: Instant) {
        if !self.state.is_waiting() {
            return;
        }
        self.transition_start = now;
        self.set_state(BootState::TransitionToTime);
    }

    /// Crossfade progress in `[0, 1]`
    pub fn transition_progress(&self, now: Instant, duration: Duration) -> f32 {
        let duration = if duration.as_micros() == 0 {
            MIN_FADE_DURATION
        } else {
            duration
        };
        let elapsed = now.saturating_duration_since(self.transition_start);
        (elapsed.as_micros() as f32 / duration.as_micros() as f32).clamp(0.0, 1.0)
    }

    pub fn complete(&mut self) {
        if self.state == BootState::TransitionToTime {
            self.set_state(BootState::Complete);
        }
    }

    /// Rate limit for the waiting animation
    pub fn should_refresh(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_refresh {
            if now.saturating_duration_since(last) < BOOT_REFRESH_INTERVAL {
                return false;
            }
        }
        self.last_refresh = Some(now);
        true
    }
}

fn glyph_color(synth: &mut ColorSynth, now: Instant, index: usize) -> Rgb {
    let hue = rotating_hue(now.as_millis(), BOOT_CYCLE.as_millis());
    let hue_per_led = BOOT_RAINBOW_SPREAD / 100.0 * HUE_SPREAD_FACTOR;
    synth.rgb_from_hsv(
        fmodf(index as f32 * hue_per_led + hue, 1.0),
        1.0,
        BOOT_BRIGHTNESS,
    )
}

/// Spinner color of every ring LED, scaled by `fade`
#[allow(clippy::cast_possible_truncation)]
fn for_each_ring_led(now: Instant, color: Rgb, fade: f32, mut f: impl FnMut(usize, Rgb)) {
    let step = BOOT_RING_STEP.as_millis().max(1);
    let position = (now.as_millis() / step) as usize % SECONDS_RING_SIZE;
    for second in 1..60 {
        let (Some(led), Some(slot)) = (second_led(second), ring_slot(second)) else {
            continue;
        };
        let distance = (slot + SECONDS_RING_SIZE - position) % SECONDS_RING_SIZE;
        let trail = 1.0 - distance as f32 / BOOT_RING_TRAIL_LENGTH;
        let brightness = trail * trail * fade * BOOT_BRIGHTNESS;
        f(usize::from(led), scale_color(color, brightness));
    }
}

/// Draw the waiting animation: rainbow glyph and spinner on black
pub fn render_waiting<const N: usize>(
    canvas: &mut Canvas<N>,
    synth: &mut ColorSynth,
    state: BootState,
    glyph: &[LedIndex],
    now: Instant,
) {
    canvas.clear();
    for (index, &led) in glyph.iter().enumerate() {
        canvas.put(usize::from(led), glyph_color(synth, now, index));
    }
    for_each_ring_led(now, state.ring_color(), 1.0, |led, color| canvas.put(led, color));
}

/// Draw one crossfade frame from the boot display to the time display
///
/// `words` and `word_colors` are the time words and their fully-visible
/// colors, index for index.
#[allow(clippy::too_many_arguments)]
pub fn render_transition<const N: usize>(
    canvas: &mut Canvas<N>,
    synth: &mut ColorSynth,
    glyph: &[LedIndex],
    words: &[LedIndex],
    word_colors: &[Rgb],
    background: Rgb,
    progress: f32,
    now: Instant,
) {
    canvas.begin();
    canvas.fill_unwritten(background);

    for (index, &led) in glyph.iter().enumerate() {
        let color = glyph_color(synth, now, index);
        canvas.put(usize::from(led), blend_colors(color, BLACK, progress));
    }

    for (&led, &color) in words.iter().zip(word_colors) {
        let led = usize::from(led);
        if is_excluded(led, N) {
            continue;
        }
        canvas.put(led, blend_colors(canvas.get(led), color, progress));
    }

    for_each_ring_led(now, RING_WAITING_TIME, 1.0 - progress, |led, color| {
        canvas.put(led, add_colors(canvas.get(led), color));
    });
}
