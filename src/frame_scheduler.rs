//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::boot::Connectivity;
use crate::clock::TimeOfDay;
use crate::error::BootError;
use crate::renderer::Renderer;
use crate::settings::{SettingsProcessor, SettingsReceiver};
use crate::OutputDriver;

/// Frame interval while the display changes a lot
pub const FAST_INTERVAL: Duration = Duration::from_millis(20);
/// Frame interval for moderate change
pub const MEDIUM_INTERVAL: Duration = Duration::from_millis(50);
/// Frame interval for a mostly static display
pub const SLOW_INTERVAL: Duration = Duration::from_millis(100);

/// Change rate at or above which the fast interval is used
pub const HIGH_CHANGE_RATE: f32 = 0.5;
/// Change rate at or above which the medium interval is used
pub const MEDIUM_CHANGE_RATE: f32 = 0.1;

/// Weight of the previous rate in the moving average
const RATE_SMOOTHING: f32 = 0.9;

/// Longest sleep between ticks, so a new second is never noticed late.
pub const TIME_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Frame interval for a smoothed change rate
pub fn interval_for_rate(rate: f32) -> Duration {
    if rate >= HIGH_CHANGE_RATE {
        FAST_INTERVAL
    } else if rate >= MEDIUM_CHANGE_RATE {
        MEDIUM_INTERVAL
    } else {
        SLOW_INTERVAL
    }
}

/// Variable frame rate driven by measured visual change
#[derive(Debug, Clone)]
pub struct AdaptiveScheduler {
    rate: f32,
    interval: Duration,
    last_update: Option<Instant>,
}

impl Default for AdaptiveScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl AdaptiveScheduler {
    pub const fn new() -> Self {
        Self {
            rate: 1.0,
            interval: FAST_INTERVAL,
            last_update: None,
        }
    }

    /// Gate for frames that are not forced by a time change
    ///
    /// Returns false until the current interval has elapsed since the last
    /// rendered frame. On success the interval is re-derived from the rate.
    pub fn should_update(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_update {
            if now.saturating_duration_since(last) < self.interval {
                return false;
            }
        }
        self.last_update = Some(now);
        self.interval = interval_for_rate(self.rate);
        true
    }

    /// Feed the change intensity of a rendered frame, in `[0, 1]`
    pub fn register_visual_change(&mut self, intensity: f32) {
        let intensity = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        self.rate = RATE_SMOOTHING * self.rate + (1.0 - RATE_SMOOTHING) * intensity;
    }

    pub const fn rate(&self) -> f32 {
        self.rate
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Record a rendered frame, gated or forced by a time change
    ///
    /// The next gated frame is measured from the latest one.
    pub fn frame_rendered(&mut self, now: Instant) {
        if self.last_update.is_none_or(|last| now > last) {
            self.last_update = Some(now);
        }
    }

    /// Time left until `should_update` can succeed
    pub fn time_until_next(&self, now: Instant) -> Duration {
        let Some(last) = self.last_update else {
            return Duration::from_ticks(0);
        };
        let elapsed = now.saturating_duration_since(last);
        if elapsed >= self.interval {
            Duration::from_ticks(0)
        } else {
            self.interval - elapsed
        }
    }
}

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// Whether a frame was written to the output this tick.
    pub rendered: bool,
    /// How long to wait until the next tick.
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Applies pending settings before anything else
/// - Drives the word clock engine with the current time and connectivity
/// - Writes rendered frames to the output driver
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// static SETTINGS: SettingsChannel<16> = SettingsChannel::new();
///
/// let renderer = Renderer::<NUM_LEDS>::new(EngineConfig::default(), Lights::default(), now());
/// let mut scheduler = FrameScheduler::new(renderer, driver, SETTINGS.receiver());
///
/// loop {
///     match scheduler.tick(now(), rtc_time(), connectivity()) {
///         Ok(result) => sleep(result.sleep_duration),
///         Err(BootError::TimeSyncTimeout { .. }) => restart(),
///     }
/// }
/// ```
pub struct FrameScheduler<'a, O: OutputDriver, const N: usize, const SETTINGS_SIZE: usize> {
    output: O,
    renderer: Renderer<N>,
    settings: SettingsProcessor<'a, SETTINGS_SIZE>,
}

impl<'a, O: OutputDriver, const N: usize, const SETTINGS_SIZE: usize>
    FrameScheduler<'a, O, N, SETTINGS_SIZE>
{
    pub fn new(
        renderer: Renderer<N>,
        driver: O,
        settings: SettingsReceiver<'a, SETTINGS_SIZE>,
    ) -> Self {
        Self {
            output: driver,
            renderer,
            settings: SettingsProcessor::new(settings),
        }
    }

    /// Process one tick and return timing information.
    ///
    /// `time` is `None` while the clock has no valid time. The only error is
    /// the boot timeout, reported once; the caller must restart the device.
    pub fn tick(
        &mut self,
        now: Instant,
        time: Option<TimeOfDay>,
        connectivity: Connectivity,
    ) -> Result<FrameResult, BootError> {
        self.renderer.process_settings(&mut self.settings, now);

        let rendered = self.renderer.update(now, time, connectivity)?;
        if rendered {
            self.output.write(self.renderer.frame());
        }

        let sleep_duration = self.renderer.time_until_next_frame(now).min(TIME_POLL_INTERVAL);
        Ok(FrameResult {
            rendered,
            sleep_duration,
        })
    }

    /// Get a reference to the renderer.
    pub fn renderer(&self) -> &Renderer<N> {
        &self.renderer
    }

    /// Get a mutable reference to the renderer.
    pub fn renderer_mut(&mut self) -> &mut Renderer<N> {
        &mut self.renderer
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
