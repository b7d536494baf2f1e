//! Physical layout of the 16x16 word matrix and its seconds ring.

/// Position in the addressable LED buffer
pub type LedIndex = u16;

/// Number of LEDs on the word clock panel
pub const NUM_LEDS: usize = 256;

/// Decorative corner pixels that animations never drive
pub const EXCLUDED_LEDS: [LedIndex; 16] = [
    0, 31, 32, 63, 64, 95, 96, 127, 128, 159, 160, 191, 192, 223, 224, 255,
];

/// Second value without a ring LED (the ring is split at the bottom)
pub const SECONDS_RING_GAP: u8 = 30;

/// Number of LEDs on the seconds ring (60 seconds minus 0 and the gap)
pub const SECONDS_RING_SIZE: usize = 58;

/// Seconds ring, indexed by second. Seconds 0 and 30 have no LED.
const SECONDS_RING: [Option<LedIndex>; 60] = {
    let leds: [LedIndex; 60] = [
        0, 8, 7, 6, 5, 4, 3, 2, 1, 30, //
        33, 62, 65, 94, 97, 126, 129, 158, 161, 190, //
        193, 222, 225, 254, 253, 252, 251, 250, 249, 248, //
        0, 247, 246, 245, 244, 243, 242, 241, 240, 239, //
        208, 207, 176, 175, 144, 143, 112, 111, 80, 79, //
        48, 47, 16, 15, 14, 13, 12, 11, 10, 9,
    ];
    let mut ring = [None; 60];
    let mut second = 1;
    while second < 60 {
        if second != SECONDS_RING_GAP as usize {
            ring[second] = Some(leds[second]);
        }
        second += 1;
    }
    ring
};

/// Returns true if the LED must never be written by animation logic
///
/// Out-of-range positions are treated as excluded.
pub fn is_excluded(led: usize, num_leds: usize) -> bool {
    if led >= num_leds {
        return true;
    }
    EXCLUDED_LEDS.iter().any(|&excluded| usize::from(excluded) == led)
}

/// Ring LED lit for the given second, if any
pub const fn second_led(second: u8) -> Option<LedIndex> {
    if second as usize >= SECONDS_RING.len() {
        return None;
    }
    SECONDS_RING[second as usize]
}

/// Second whose ring LED is `led`, if `led` belongs to the ring
pub const fn led_second(led: LedIndex) -> Option<u8> {
    let mut second = 1;
    while second < 60 {
        if let Some(ring_led) = SECONDS_RING[second as usize] {
            if ring_led == led {
                return Some(second);
            }
        }
        second += 1;
    }
    None
}

/// Rotation slot (0..58) of a second on the ring, skipping the gap
pub const fn ring_slot(second: u8) -> Option<usize> {
    if second == 0 || second == SECONDS_RING_GAP || second >= 60 {
        return None;
    }
    if second < SECONDS_RING_GAP {
        Some(second as usize - 1)
    } else {
        Some(second as usize - 2)
    }
}
