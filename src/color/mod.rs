mod synth;
mod utils;

use smart_leds::RGB8;
use smart_leds::hsv::Hsv as HSV;

pub use synth::{ColorSynth, HUE_STEPS};
pub use utils::{BLACK, add_colors, blend_colors, channel_distance, scale_color, smoothstep};

pub type Rgb = RGB8;
pub type Hsv = HSV;
