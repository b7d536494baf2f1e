//! Persistent frame buffer with a per-frame write mask.

use crate::color::{BLACK, Rgb};
use crate::layout::is_excluded;

/// Output frame for `N` LEDs
///
/// Pixels persist across frames. Each pass starts by clearing the write mask;
/// positions nobody claims during the pass are filled with the background at
/// the end. Excluded positions are never written.
#[derive(Debug, Clone)]
pub struct Canvas<const N: usize> {
    pixels: [Rgb; N],
    written: [bool; N],
}

impl<const N: usize> Default for Canvas<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Canvas<N> {
    pub const fn new() -> Self {
        Self {
            pixels: [BLACK; N],
            written: [false; N],
        }
    }

    /// Start a new pass
    pub fn begin(&mut self) {
        self.written.fill(false);
    }

    /// Write `color` at `led` and claim it for this pass
    pub fn put(&mut self, led: usize, color: Rgb) {
        if is_excluded(led, N) {
            return;
        }
        self.pixels[led] = color;
        self.written[led] = true;
    }

    /// Claim `led` for this pass, keeping the previous frame's pixel
    pub fn hold(&mut self, led: usize) {
        if is_excluded(led, N) {
            return;
        }
        self.written[led] = true;
    }

    pub fn is_written(&self, led: usize) -> bool {
        self.written.get(led).copied().unwrap_or(false)
    }

    /// Fill every unclaimed, non-excluded position with `color`
    pub fn fill_unwritten(&mut self, color: Rgb) {
        for led in 0..N {
            if !self.written[led] && !is_excluded(led, N) {
                self.pixels[led] = color;
                self.written[led] = true;
            }
        }
    }

    /// Blank the whole frame, excluded positions included
    pub fn clear(&mut self) {
        self.pixels.fill(BLACK);
        self.written.fill(false);
    }

    pub fn get(&self, led: usize) -> Rgb {
        self.pixels.get(led).copied().unwrap_or(BLACK)
    }

    pub const fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }
}
