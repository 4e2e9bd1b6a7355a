//! Circular index arithmetic shared by every ring operation.
//!
//! `Ring` owns the `front`/`used` pair and derives `rear` from it, so the
//! invariant `rear == (front + used) % capacity` holds by construction. All
//! wraparound goes through [`Ring::wrap`], and all copies go through
//! [`Ring::spans`], which splits a logical run into at most two in-bounds
//! storage ranges.

use core::ops::Range;

/// Snapshot of a ring buffer's cursors.
///
/// `front` is the storage index of the oldest stored byte, `rear` the storage
/// index of the next free slot, `used` the number of stored bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cursors {
    /// Storage index of the oldest stored byte.
    pub front: usize,
    /// Storage index the next write lands on.
    pub rear: usize,
    /// Number of stored bytes.
    pub used: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ring {
    capacity: usize,
    front: usize,
    used: usize,
}

impl Ring {
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "ring capacity must be non-zero");
        Self {
            capacity,
            front: 0,
            used: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn used(&self) -> usize {
        self.used
    }

    pub(crate) fn free(&self) -> usize {
        self.capacity - self.used
    }

    pub(crate) fn rear(&self) -> usize {
        self.wrap(self.front + self.used)
    }

    pub(crate) fn cursors(&self) -> Cursors {
        Cursors {
            front: self.front,
            rear: self.rear(),
            used: self.used,
        }
    }

    /// Reduce any index into `[0, capacity)`.
    #[inline]
    pub(crate) fn wrap(&self, index: usize) -> usize {
        index % self.capacity
    }

    /// Forward distance from `from` to `to`, walking in write direction.
    #[inline]
    pub(crate) fn distance(&self, from: usize, to: usize) -> usize {
        if from <= to {
            to - from
        } else {
            self.capacity - from + to
        }
    }

    /// Storage index of the byte at relative position `index`.
    #[inline]
    pub(crate) fn absolute(&self, index: usize) -> usize {
        self.wrap(self.front + index)
    }

    /// Split a run of `len` slots starting at storage index `start` into the
    /// part before the end of storage and the wrapped remainder.
    pub(crate) fn spans(&self, start: usize, len: usize) -> (Range<usize>, Range<usize>) {
        debug_assert!(start < self.capacity);
        debug_assert!(len <= self.capacity);
        let head = len.min(self.capacity - start);
        (start..start + head, 0..len - head)
    }

    /// Spans of the stored region, oldest byte first.
    pub(crate) fn used_spans(&self) -> (Range<usize>, Range<usize>) {
        self.spans(self.front, self.used)
    }

    /// Spans of `len` stored bytes starting at relative `index`.
    pub(crate) fn relative_spans(&self, index: usize, len: usize) -> (Range<usize>, Range<usize>) {
        debug_assert!(index + len <= self.used);
        self.spans(self.absolute(index), len)
    }

    /// Account for `len` bytes appended at `rear`.
    pub(crate) fn push_back(&mut self, len: usize) {
        debug_assert!(len <= self.free());
        self.used += len;
    }

    /// Forget the `len` oldest bytes.
    pub(crate) fn pop_front(&mut self, len: usize) {
        debug_assert!(len <= self.used);
        self.front = self.wrap(self.front + len);
        self.used -= len;
    }

    /// Forget the `len` newest bytes.
    pub(crate) fn pop_back(&mut self, len: usize) {
        debug_assert!(len <= self.used);
        self.used -= len;
    }

    /// Canonical empty state.
    pub(crate) fn reset(&mut self) {
        self.front = 0;
        self.used = 0;
    }

    /// Check a cursor triple against the ring invariant and adopt it.
    ///
    /// `front` and `rear` are reduced modulo capacity. `used` is not: a full
    /// ring has `front == rear` and `used == capacity`, which a reduction
    /// would turn into an empty one.
    pub(crate) fn try_set(&mut self, front: usize, rear: usize, used: usize) -> Option<Cursors> {
        let front = self.wrap(front);
        let rear = self.wrap(rear);
        let span = self.distance(front, rear);
        let consistent = used <= self.capacity
            && (span == used || (span == 0 && used == self.capacity));
        if !consistent {
            return None;
        }
        self.front = front;
        self.used = used;
        debug_assert_eq!(self.rear(), rear);
        Some(self.cursors())
    }
}
