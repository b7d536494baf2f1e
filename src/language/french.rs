use super::ActiveLeds;
use crate::category::Category;
use crate::clock::TimeOfDay;
use crate::layout::LedIndex;

const IL: &[LedIndex] = &[17, 18];
const EST: &[LedIndex] = &[20, 21, 22];

const MINUIT: &[LedIndex] = &[24, 25, 26, 27, 28, 29];
const MIDI: &[LedIndex] = &[84, 85, 86, 87];
const HEURE: &[LedIndex] = &[88, 89, 90, 91, 92];
const HEURES_S: &[LedIndex] = &[93];

const ET: &[LedIndex] = &[110, 109];
const MOINS: &[LedIndex] = &[108, 107, 106, 105, 104];
const LE: &[LedIndex] = &[114, 115];
const QUART: &[LedIndex] = &[121, 122, 123, 124, 125];
const DEMIE: &[LedIndex] = &[153, 154, 155, 156, 157];
const ET_MINUTES: &[LedIndex] = &[209, 210];

/// "QUARANTE DEUX"
pub(super) const BOOT_GLYPH: &[LedIndex] = &[
    145, 146, 147, 148, 149, 150, 151, 152, //
    197, 196, 195, 194,
];

fn hour_word(hour: u8) -> &'static [LedIndex] {
    match hour {
        1 => &[46, 45, 44],
        2 => &[58, 59, 60, 61],
        3 => &[40, 39, 38, 37, 36],
        4 => &[52, 53, 54, 55, 56, 57],
        5 => &[49, 50, 51, 52],
        6 => &[36, 35, 34],
        7 => &[43, 42, 41, 40],
        8 => &[78, 77, 76, 75],
        9 => &[74, 73, 72, 71],
        10 => &[81, 82, 83],
        11 => &[69, 68, 67, 66],
        _ => &[],
    }
}

fn minute_word(minute: u8) -> &'static [LedIndex] {
    match minute {
        1 => &[212, 213, 214],
        2 => &[197, 196, 195, 194],
        3 => &[185, 186, 187, 188, 189],
        4 => &[206, 205, 204, 203, 202, 201],
        5 => &[142, 141, 140, 139],
        6 => &[228, 227, 226],
        7 => &[217, 218, 219, 220],
        8 => &[237, 236, 235, 234],
        9 => &[232, 231, 230, 229],
        10 => &[174, 173, 172],
        11 => &[133, 132, 131, 130],
        12 => &[166, 165, 164, 163, 162],
        13 => &[203, 202, 201, 200, 199, 198],
        14 => &[177, 178, 179, 180, 181, 182, 183, 184],
        16 => &[171, 170, 169, 168, 167],
        20 => &[116, 117, 118, 119, 120],
        30 => &[103, 102, 101, 100, 99, 98],
        40 => &[145, 146, 147, 148, 149, 150, 151, 152],
        50 => &[142, 141, 140, 139, 138, 137, 136, 135, 134],
        _ => &[],
    }
}

pub(super) fn compute_words(time: TimeOfDay, out: &mut ActiveLeds) {
    let minutes = time.minute;
    let mut hours = time.hour;
    let mut morning = true;

    out.add_word(IL, Category::Hours);
    out.add_word(EST, Category::Hours);

    if hours == 0 {
        morning = false;
    }
    if hours > 12 {
        hours -= 12;
        morning = false;
    }

    // "trois heures moins le quart"
    let use_moins = minutes > 30 && minutes % 5 == 0;
    if use_moins {
        hours += 1;
        if hours == 13 {
            hours = 1;
        }
    }

    if hours > 0 && hours != 12 {
        out.add_word(hour_word(hours), Category::Hours);
        out.add_word(HEURE, Category::Hours);
        if hours > 1 {
            out.add_word(HEURES_S, Category::Hours);
        }
    } else if morning {
        out.add_word(MIDI, Category::Hours);
    } else {
        out.add_word(MINUIT, Category::Hours);
    }

    if use_moins {
        out.add_word(MOINS, Category::Minutes);
        match minutes {
            45 => {
                out.add_word(LE, Category::Minutes);
                out.add_word(QUART, Category::Minutes);
            }
            35 => {
                out.add_word(minute_word(20), Category::Minutes);
                out.add_word(minute_word(5), Category::Minutes);
            }
            40 => out.add_word(minute_word(20), Category::Minutes),
            50 => out.add_word(minute_word(10), Category::Minutes),
            _ => out.add_word(minute_word(5), Category::Minutes),
        }
    } else if minutes == 30 {
        out.add_word(ET, Category::Minutes);
        out.add_word(DEMIE, Category::Minutes);
    } else if minutes == 15 {
        out.add_word(ET, Category::Minutes);
        out.add_word(QUART, Category::Minutes);
    } else if minutes > 0 {
        if minutes % 10 == 0 || minutes <= 16 {
            out.add_word(minute_word(minutes), Category::Minutes);
        } else {
            let unit = minutes % 10;
            out.add_word(minute_word(minutes - unit), Category::Minutes);
            if unit == 1 {
                out.add_word(ET_MINUTES, Category::Minutes);
            }
            out.add_word(minute_word(unit), Category::Minutes);
        }
    }
}
