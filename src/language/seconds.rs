use super::{ActiveLeds, SecondsDisplay};
use crate::category::Category;
use crate::layout::{SECONDS_RING_GAP, second_led};

const MODE_NAME_CURRENT: &str = "current";
const MODE_NAME_PASSED: &str = "passed";
const MODE_NAME_INVERTED: &str = "inverted";

const MODE_ID_CURRENT: u8 = 0;
const MODE_ID_PASSED: u8 = 1;
const MODE_ID_INVERTED: u8 = 2;

/// How the seconds ring represents the current second
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum SecondsMode {
    /// Only the current second is lit
    #[default]
    Current = MODE_ID_CURRENT,
    /// Every second elapsed in this minute is lit
    Passed = MODE_ID_PASSED,
    /// Every second except the current one is lit
    Inverted = MODE_ID_INVERTED,
}

impl SecondsMode {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_CURRENT => Self::Current,
            MODE_ID_PASSED => Self::Passed,
            MODE_ID_INVERTED => Self::Inverted,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => MODE_NAME_CURRENT,
            Self::Passed => MODE_NAME_PASSED,
            Self::Inverted => MODE_NAME_INVERTED,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_CURRENT => Some(Self::Current),
            MODE_NAME_PASSED => Some(Self::Passed),
            MODE_NAME_INVERTED => Some(Self::Inverted),
            _ => None,
        }
    }
}

fn add_second(second: u8, out: &mut ActiveLeds) {
    if let Some(led) = second_led(second) {
        out.add_word(&[led], Category::Seconds);
    }
}

/// Append the seconds ring LEDs for `second`
///
/// Second 0 and the ring gap have no LED of their own.
pub(super) fn compute_seconds(second: u8, display: SecondsDisplay, out: &mut ActiveLeds) {
    if !display.enabled {
        return;
    }

    if second == 0 || second == SECONDS_RING_GAP {
        match display.mode {
            SecondsMode::Passed if second == SECONDS_RING_GAP => {
                (1..SECONDS_RING_GAP).for_each(|s| add_second(s, out));
            }
            SecondsMode::Inverted => {
                (1..60).for_each(|s| add_second(s, out));
            }
            _ => {}
        }
        return;
    }

    match display.mode {
        SecondsMode::Current => add_second(second, out),
        SecondsMode::Passed => (1..=second).for_each(|s| add_second(s, out)),
        SecondsMode::Inverted => (1..60)
            .filter(|&s| s != second)
            .for_each(|s| add_second(s, out)),
    }
}
