use super::ActiveLeds;
use crate::category::Category;
use crate::clock::TimeOfDay;
use crate::layout::LedIndex;

const IT: &[LedIndex] = &[17, 18];
const IS: &[LedIndex] = &[20, 21];

const NOON: &[LedIndex] = &[186, 187, 188, 189];
const MIDNIGHT: &[LedIndex] = &[210, 211, 212, 213, 214, 215, 216, 217];
const OCLOCK: &[LedIndex] = &[231, 230, 229, 228, 227, 226];

const HALF: &[LedIndex] = &[121, 122, 123, 124];
const QUARTER: &[LedIndex] = &[137, 136, 135, 134, 133, 132, 131];
const MINUTE: &[LedIndex] = &[145, 146, 147, 148, 149, 150];
const MINUTES: &[LedIndex] = &[145, 146, 147, 148, 149, 150, 151];
const PAST: &[LedIndex] = &[153, 154, 155, 156];
const TO: &[LedIndex] = &[156, 157];

/// "FIVE FOUR THREE TWO", a countdown in place of "42"
pub(super) const BOOT_GLYPH: &[LedIndex] = &[
    165, 164, 163, 162, //
    169, 168, 167, 166, //
    174, 173, 172, 171, 170, //
    198, 197, 196,
];

fn hour_word(hour: u8) -> &'static [LedIndex] {
    match hour {
        1 => &[196, 195, 194],
        2 => &[198, 197, 196],
        3 => &[174, 173, 172, 171, 170],
        4 => &[169, 168, 167, 166],
        5 => &[165, 164, 163, 162],
        6 => &[178, 179, 180],
        7 => &[182, 183, 184, 185, 186],
        8 => &[202, 201, 200, 199, 198],
        9 => &[205, 204, 203, 202],
        10 => &[217, 218, 219],
        11 => &[238, 237, 236, 235, 234, 233],
        12 => &[114, 115, 116, 117, 118, 119],
        _ => &[],
    }
}

fn minute_word(minute: u8) -> &'static [LedIndex] {
    match minute {
        1 => &[43, 42, 41],
        2 => &[45, 44, 43],
        3 => &[39, 38, 37, 36, 35],
        4 => &[50, 51, 52, 53],
        5 => &[110, 109, 108, 107],
        6 => &[54, 55, 56],
        7 => &[77, 76, 75, 74, 73],
        8 => &[82, 83, 84, 85, 86],
        9 => &[73, 72, 71, 70],
        10 => &[106, 105, 104],
        11 => &[103, 102, 101, 100, 99, 98],
        12 => &[114, 115, 116, 117, 118, 119],
        13 => &[86, 87, 88, 89, 90, 91, 92, 93],
        14 => &[50, 51, 52, 53, 57, 58, 59, 60],
        16 => &[54, 55, 56, 57, 58, 59, 60],
        17 => &[77, 76, 75, 74, 73, 69, 68, 67, 66],
        18 => &[82, 83, 84, 85, 86, 90, 91, 92, 93],
        19 => &[73, 72, 71, 70, 69, 68, 67, 66],
        20 => &[23, 24, 25, 26, 27, 28],
        _ => &[],
    }
}

fn add_minutes_phrase(minutes: u8, out: &mut ActiveLeds) {
    match minutes {
        15 => out.add_word(QUARTER, Category::Minutes),
        30 => out.add_word(HALF, Category::Minutes),
        25 => {
            out.add_word(minute_word(20), Category::Minutes);
            out.add_word(minute_word(5), Category::Minutes);
        }
        5 | 10 | 20 => out.add_word(minute_word(minutes), Category::Minutes),
        1 => {
            out.add_word(minute_word(1), Category::Minutes);
            out.add_word(MINUTE, Category::Minutes);
        }
        2..=9 | 11..=19 => {
            out.add_word(minute_word(minutes), Category::Minutes);
            out.add_word(MINUTES, Category::Minutes);
        }
        21..=29 => {
            out.add_word(minute_word(20), Category::Minutes);
            out.add_word(minute_word(minutes % 10), Category::Minutes);
            out.add_word(MINUTES, Category::Minutes);
        }
        _ => {}
    }
}

pub(super) fn compute_words(time: TimeOfDay, out: &mut ActiveLeds) {
    let TimeOfDay { hour, minute, .. } = time;

    out.add_word(IT, Category::Hours);
    out.add_word(IS, Category::Hours);

    if minute == 0 {
        match hour {
            0 => out.add_word(MIDNIGHT, Category::Hours),
            12 => out.add_word(NOON, Category::Hours),
            _ => {
                let hour_12 = if hour > 12 { hour - 12 } else { hour };
                out.add_word(hour_word(hour_12), Category::Hours);
                out.add_word(OCLOCK, Category::Hours);
            }
        }
        return;
    }

    let use_to = minute > 30;
    let (display_minutes, display_hour) = if use_to {
        (60 - minute, (hour + 1) % 24)
    } else {
        (minute, hour)
    };

    add_minutes_phrase(display_minutes, out);
    out.add_word(if use_to { TO } else { PAST }, Category::Minutes);

    match display_hour {
        0 => out.add_word(MIDNIGHT, Category::Hours),
        12 => out.add_word(NOON, Category::Hours),
        h if h > 12 => out.add_word(hour_word(h - 12), Category::Hours),
        h => out.add_word(hour_word(h), Category::Hours),
    }
}
