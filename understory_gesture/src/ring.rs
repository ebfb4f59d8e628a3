// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-capacity sample history that iterates newest-first.

/// A fixed-capacity ring of samples, iterated from the most recent entry backward.
///
/// Pushing into a full ring overwrites the oldest entry. The ring never
/// allocates; storage is an inline array of `N` slots.
///
/// ```
/// use understory_gesture::SampleRing;
///
/// let mut ring = SampleRing::<u32, 3>::new();
/// ring.push(1);
/// ring.push(2);
/// ring.push(3);
/// ring.push(4);
///
/// // Newest first; `1` was overwritten.
/// assert!(ring.iter().copied().eq([4, 3, 2]));
/// ```
#[derive(Clone, Debug)]
pub struct SampleRing<T, const N: usize> {
    slots: [T; N],
    /// Slot holding the most recent sample.
    head: usize,
    len: usize,
}

impl<T: Copy + Default, const N: usize> SampleRing<T, N> {
    /// Creates an empty ring.
    #[must_use]
    pub fn new() -> Self {
        const { assert!(N > 0, "SampleRing needs at least one slot") };
        Self {
            slots: [T::default(); N],
            head: 0,
            len: 0,
        }
    }

    /// Maximum number of samples retained.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of samples currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Forgets every retained sample.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Records `sample` as the most recent entry.
    pub fn push(&mut self, sample: T) {
        // The write position walks backward so that a forward walk from
        // `head` visits samples newest-first.
        self.head = if self.head == 0 { N - 1 } else { self.head - 1 };
        self.slots[self.head] = sample;
        if self.len < N {
            self.len += 1;
        }
    }

    /// Returns the most recent sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        (self.len > 0).then(|| &self.slots[self.head])
    }

    /// Iterates retained samples from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).map(move |i| &self.slots[(self.head + i) % N])
    }
}

impl<T: Copy + Default, const N: usize> Default for SampleRing<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::SampleRing;

    #[test]
    fn empty_ring_has_no_samples() {
        let ring = SampleRing::<i32, 4>::new();
        assert!(ring.is_empty());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.latest(), None);
        assert_eq!(ring.iter().count(), 0);
        assert_eq!(ring.capacity(), 4);
    }

    #[test]
    fn iterates_newest_first() {
        let mut ring = SampleRing::<i32, 4>::new();
        ring.push(10);
        ring.push(20);
        ring.push(30);

        assert_eq!(ring.len(), 3);
        assert_eq!(ring.latest(), Some(&30));
        assert!(ring.iter().copied().eq([30, 20, 10]));
    }

    #[test]
    fn full_ring_overwrites_oldest() {
        let mut ring = SampleRing::<i32, 3>::new();
        for v in 1..=7 {
            ring.push(v);
        }

        assert_eq!(ring.len(), 3);
        assert!(ring.iter().copied().eq([7, 6, 5]));
    }

    #[test]
    fn clear_then_reuse() {
        let mut ring = SampleRing::<i32, 2>::new();
        ring.push(1);
        ring.push(2);
        ring.clear();
        assert!(ring.is_empty());

        ring.push(3);
        assert!(ring.iter().copied().eq([3]));
    }

    #[test]
    fn single_slot_ring() {
        let mut ring = SampleRing::<i32, 1>::new();
        ring.push(1);
        ring.push(2);
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.latest(), Some(&2));
    }
}
