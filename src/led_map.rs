//! Dense per-LED slot map.
//!
//! Fades and typing entries are keyed by LED position. Storing them in a
//! fixed array keeps lookups O(1) and iteration order deterministic
//! (ascending LED index) without allocating.

/// Fixed-capacity map from LED position to `T`
#[derive(Debug, Clone)]
pub struct LedMap<T: Copy, const N: usize> {
    slots: [Option<T>; N],
    len: usize,
}

impl<T: Copy, const N: usize> Default for LedMap<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize> LedMap<T, N> {
    pub const fn new() -> Self {
        Self {
            slots: [None; N],
            len: 0,
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, led: usize) -> bool {
        self.get(led).is_some()
    }

    pub fn get(&self, led: usize) -> Option<&T> {
        self.slots.get(led).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, led: usize) -> Option<&mut T> {
        self.slots.get_mut(led).and_then(Option::as_mut)
    }

    /// Insert or replace the entry for `led`; out-of-range positions are ignored
    pub fn insert(&mut self, led: usize, value: T) {
        let Some(slot) = self.slots.get_mut(led) else {
            return;
        };
        if slot.is_none() {
            self.len += 1;
        }
        *slot = Some(value);
    }

    pub fn remove(&mut self, led: usize) -> Option<T> {
        let removed = self.slots.get_mut(led).and_then(Option::take);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        self.slots.fill(None);
        self.len = 0;
    }

    /// Occupied entries in ascending LED order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(led, slot)| slot.as_ref().map(|value| (led, value)))
    }
}
