use alloc::vec::Vec;
use core::{fmt, mem};

use bstr::BString;
use tracing::{debug, trace, warn};

use crate::{
    allocator::{Allocator, Heap},
    cursor::{Cursors, Ring},
    error::RingError,
    options::{ReadPolicy, RingOptions, WritePolicy},
    storage::Storage,
};

/// A fixed-capacity circular byte buffer.
///
/// Bytes are stored between a `front` cursor (oldest byte) and a `rear`
/// cursor (next free slot). Writes append at `rear`, reads consume from
/// `front`, and both wrap around the end of the storage region. Capacity is
/// fixed at construction and lies in `1..=u16::MAX`.
///
/// All relative indices in this API count from `front`: index `0` is the
/// oldest stored byte, whatever storage slot it currently occupies.
///
/// The buffer either borrows caller memory ([`bind`](Self::bind)) or owns
/// memory from an [`Allocator`] ([`create`](Self::create),
/// [`create_in`](Self::create_in)).
pub struct RingBuffer<'a, A: Allocator = Heap> {
    storage: Storage<'a>,
    ring: Ring,
    options: RingOptions,
    allocator: A,
}

fn check_capacity(capacity: usize) -> Result<(), RingError> {
    if capacity == 0 {
        Err(RingError::ZeroCapacity)
    } else if capacity > usize::from(u16::MAX) {
        Err(RingError::CapacityTooLarge { capacity })
    } else {
        Ok(())
    }
}

impl<'a> RingBuffer<'a, Heap> {
    /// Bind a ring buffer to caller-owned storage.
    ///
    /// The whole slice becomes the ring; all cursors start at zero. The
    /// storage is never freed by the ring and can be taken back with
    /// [`unbind`](Self::unbind).
    ///
    /// # Errors
    ///
    /// [`RingError::ZeroCapacity`] for an empty slice and
    /// [`RingError::CapacityTooLarge`] for a slice longer than `u16::MAX`.
    pub fn bind(storage: &'a mut [u8]) -> Result<Self, RingError> {
        Self::bind_with_options(storage, RingOptions::default())
    }

    /// [`bind`](Self::bind) with explicit options.
    ///
    /// # Errors
    ///
    /// Same as [`bind`](Self::bind).
    pub fn bind_with_options(storage: &'a mut [u8], options: RingOptions) -> Result<Self, RingError> {
        check_capacity(storage.len())?;
        let ring = Ring::new(storage.len());
        Ok(Self {
            storage: Storage::Borrowed(storage),
            ring,
            options,
            allocator: Heap,
        })
    }
}

impl RingBuffer<'static, Heap> {
    /// Create a ring buffer whose storage comes from the global heap.
    ///
    /// # Errors
    ///
    /// [`RingError::ZeroCapacity`], [`RingError::CapacityTooLarge`], or
    /// [`RingError::AllocationFailed`] when the heap cannot satisfy the
    /// request.
    pub fn create(capacity: usize) -> Result<Self, RingError> {
        Self::create_in(capacity, Heap)
    }
}

impl<A: Allocator> RingBuffer<'static, A> {
    /// Create a ring buffer whose storage comes from `allocator`.
    ///
    /// The storage is handed back to `allocator` when the ring is dropped.
    /// If the allocator returns a region of the wrong size it is released
    /// again before the error is reported.
    ///
    /// # Errors
    ///
    /// [`RingError::ZeroCapacity`], [`RingError::CapacityTooLarge`], or
    /// [`RingError::AllocationFailed`].
    pub fn create_in(capacity: usize, mut allocator: A) -> Result<Self, RingError> {
        check_capacity(capacity)?;
        let Some(storage) = allocator.allocate(capacity) else {
            warn!(capacity, "ring storage allocation failed");
            return Err(RingError::AllocationFailed { capacity });
        };
        if storage.len() != capacity {
            warn!(
                capacity,
                got = storage.len(),
                "allocator returned a region of the wrong size"
            );
            allocator.release(storage);
            return Err(RingError::AllocationFailed { capacity });
        }
        Ok(Self {
            storage: Storage::Owned(storage),
            ring: Ring::new(capacity),
            options: RingOptions::default(),
            allocator,
        })
    }
}

impl<'a, A: Allocator> RingBuffer<'a, A> {
    /// Replace the options, keeping the stored bytes.
    #[must_use]
    pub fn with_options(mut self, options: RingOptions) -> Self {
        self.options = options;
        self
    }

    /// The options selecting the default write and read policies.
    pub fn options(&self) -> RingOptions {
        self.options
    }

    /// Change the default write and read policies.
    pub fn set_options(&mut self, options: RingOptions) {
        self.options = options;
    }

    /// Detach from caller-owned storage and hand it back.
    ///
    /// Returns `None` for a ring that owns its storage; in that case the
    /// storage is released to the allocator as the ring is dropped.
    pub fn unbind(mut self) -> Option<&'a mut [u8]> {
        match &mut self.storage {
            Storage::Borrowed(slice) => Some(mem::take(slice)),
            Storage::Owned(_) => None,
        }
    }

    /// Drop the ring, returning owned storage to its allocator.
    ///
    /// Equivalent to `drop(ring)`; provided so the teardown reads the same
    /// as the construction.
    pub fn destroy(self) {
        drop(self);
    }

    /// Whether the storage came from the ring's allocator.
    pub fn is_owned(&self) -> bool {
        self.storage.is_owned()
    }

    // ----- capacity & status ---------------------------------------------

    /// Size of the storage region.
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Number of stored bytes.
    pub fn used_length(&self) -> usize {
        self.ring.used()
    }

    /// Alias of [`used_length`](Self::used_length).
    pub fn len(&self) -> usize {
        self.ring.used()
    }

    /// Number of bytes that can be written without evicting anything.
    pub fn free_length(&self) -> usize {
        self.ring.free()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.ring.used() == 0
    }

    /// `true` when every slot holds a stored byte.
    pub fn is_full(&self) -> bool {
        self.ring.used() >= self.ring.capacity()
    }

    /// Current cursors.
    pub fn cursors(&self) -> Cursors {
        self.ring.cursors()
    }

    // ----- write ----------------------------------------------------------

    /// Write `data` according to the configured [`WritePolicy`].
    ///
    /// Returns the number of bytes written.
    pub fn write(&mut self, data: &[u8]) -> usize {
        match self.options.write_policy {
            WritePolicy::Partial => self.write_partial(data),
            WritePolicy::Atomic => self.write_atomic(data),
            WritePolicy::Overwrite => self.write_force(data),
        }
    }

    /// Write as much of `data` as fits in the free space.
    ///
    /// Nothing stored is overwritten; the tail of `data` that does not fit is
    /// dropped. Returns the number of bytes written.
    pub fn write_partial(&mut self, data: &[u8]) -> usize {
        let len = data.len().min(self.ring.free());
        if len < data.len() {
            debug!(requested = data.len(), written = len, "ring write truncated");
        }
        self.append(&data[..len]);
        len
    }

    /// Write all of `data`, or nothing if it does not fit in the free space.
    ///
    /// Returns `data.len()` or `0`.
    pub fn write_atomic(&mut self, data: &[u8]) -> usize {
        if data.len() > self.ring.free() {
            debug!(
                requested = data.len(),
                free = self.ring.free(),
                "ring write rejected"
            );
            return 0;
        }
        self.append(data);
        data.len()
    }

    /// Write `data`, evicting the oldest bytes when it does not fit.
    ///
    /// This is an intentional overwrite, not an error: afterwards the ring
    /// holds the newest `capacity` bytes. A request longer than the capacity
    /// is cut to its first `capacity` bytes. Returns the number of bytes
    /// written.
    pub fn write_force(&mut self, data: &[u8]) -> usize {
        let data = &data[..data.len().min(self.ring.capacity())];
        let evicted = data.len().saturating_sub(self.ring.free());
        if evicted > 0 {
            trace!(evicted, "ring overwrite evicted oldest bytes");
            self.ring.pop_front(evicted);
        }
        self.append(data);
        data.len()
    }

    fn append(&mut self, data: &[u8]) {
        let (head, tail) = self.ring.spans(self.ring.rear(), data.len());
        let (first, rest) = data.split_at(head.len());
        self.storage[head].copy_from_slice(first);
        self.storage[tail].copy_from_slice(rest);
        self.ring.push_back(data.len());
    }

    // ----- read & remove --------------------------------------------------

    /// Move the oldest bytes into `out`, removing them from the ring.
    ///
    /// With [`ReadPolicy::BestEffort`] up to `out.len()` bytes are read; with
    /// [`ReadPolicy::Strict`] nothing is read unless `out.len()` bytes are
    /// stored. Returns the number of bytes read.
    pub fn read(&mut self, out: &mut [u8], policy: ReadPolicy) -> usize {
        if policy == ReadPolicy::Strict && out.len() > self.ring.used() {
            return 0;
        }
        let len = out.len().min(self.ring.used());
        self.copy_out(0, &mut out[..len]);
        self.ring.pop_front(len);
        len
    }

    /// [`read`](Self::read) with the configured [`ReadPolicy`].
    pub fn read_default(&mut self, out: &mut [u8]) -> usize {
        self.read(out, self.options.read_policy)
    }

    /// Discard stored bytes without copying them.
    ///
    /// A positive `len` discards the oldest bytes (FIFO), a negative `len`
    /// discards the newest ones (LIFO), undoing recent writes. Discarding at
    /// least everything stored empties the ring and resets all cursors to
    /// zero. Returns the number of bytes discarded.
    pub fn remove(&mut self, len: isize) -> usize {
        let used = self.ring.used();
        let count = len.unsigned_abs();
        if count == 0 || used == 0 {
            return 0;
        }
        if count >= used {
            self.ring.reset();
            return used;
        }
        if len > 0 {
            self.ring.pop_front(count);
        } else {
            self.ring.pop_back(count);
        }
        count
    }

    /// Discard everything and reset all cursors to zero.
    pub fn clear(&mut self) {
        self.ring.reset();
    }

    // ----- random access --------------------------------------------------

    fn check_range(&self, index: usize, len: usize) -> Result<(), RingError> {
        let used = self.ring.used();
        if index >= used || len > used - index {
            return Err(RingError::OutOfRange { index, len, used });
        }
        Ok(())
    }

    fn copy_out(&self, index: usize, out: &mut [u8]) {
        let (head, tail) = self.ring.relative_spans(index, out.len());
        let (first, rest) = out.split_at_mut(head.len());
        first.copy_from_slice(&self.storage[head]);
        rest.copy_from_slice(&self.storage[tail]);
    }

    /// Copy `out.len()` stored bytes starting at relative `index` without
    /// consuming them.
    ///
    /// # Errors
    ///
    /// [`RingError::OutOfRange`] unless `index < used` and
    /// `index + out.len() <= used`. `out` is untouched on error.
    pub fn peek(&self, index: usize, out: &mut [u8]) -> Result<(), RingError> {
        self.check_range(index, out.len())?;
        self.copy_out(index, out);
        Ok(())
    }

    /// Overwrite stored bytes in place starting at relative `index`.
    ///
    /// Only bytes that are already stored can be edited; this never changes
    /// the stored length.
    ///
    /// # Errors
    ///
    /// [`RingError::OutOfRange`] under the same bounds as
    /// [`peek`](Self::peek). Nothing is written on error.
    pub fn modify(&mut self, index: usize, data: &[u8]) -> Result<(), RingError> {
        self.check_range(index, data.len())?;
        let (head, tail) = self.ring.relative_spans(index, data.len());
        let (first, rest) = data.split_at(head.len());
        self.storage[head].copy_from_slice(first);
        self.storage[tail].copy_from_slice(rest);
        Ok(())
    }

    /// Set up to `len` storage slots to `value`, starting at relative `index`
    /// and wrapping as needed. At most `capacity` slots are filled.
    ///
    /// This is a raw block fill over the storage region: it is bounded by
    /// capacity, not by the stored length, so it also writes free slots, and
    /// it never moves a cursor. Use it to pre-stage storage ahead of a
    /// [`resync`](Self::resync); filling past the stored length does not make
    /// those bytes readable.
    ///
    /// Returns the number of slots filled, `0` when `index >= capacity`.
    pub fn fill(&mut self, index: usize, value: u8, len: usize) -> usize {
        if len == 0 || index >= self.ring.capacity() {
            return 0;
        }
        let len = len.min(self.ring.capacity());
        let (head, tail) = self.ring.spans(self.ring.absolute(index), len);
        self.storage[head].fill(value);
        self.storage[tail].fill(value);
        len
    }

    // ----- external writers -----------------------------------------------

    /// The whole storage region, independent of the cursors.
    pub fn storage(&self) -> &[u8] {
        &self.storage
    }

    /// Mutable access to the whole storage region for an external writer
    /// (for example a DMA engine's target). Follow up with
    /// [`resync`](Self::resync) so the cursors describe what was written.
    pub fn storage_mut(&mut self) -> &mut [u8] {
        &mut self.storage
    }

    /// Adopt cursors produced by an external writer.
    ///
    /// `front` and `rear` are taken modulo capacity. The triple is accepted
    /// when the forward distance from `front` to `rear` equals `used`, or
    /// when that distance is zero and `used == capacity` (a full ring). The
    /// ring cannot check that the bytes at those positions are meaningful;
    /// that is the caller's contract.
    ///
    /// # Errors
    ///
    /// [`RingError::InconsistentCursors`]; the ring keeps its previous
    /// cursors.
    pub fn resync(&mut self, front: usize, rear: usize, used: usize) -> Result<Cursors, RingError> {
        self.ring.try_set(front, rear, used).ok_or_else(|| {
            let front = self.ring.wrap(front);
            let rear = self.ring.wrap(rear);
            debug!(front, rear, used, "ring resync rejected");
            RingError::InconsistentCursors { front, rear, used }
        })
    }

    // ----- views ------------------------------------------------------------

    /// The stored bytes as up to two slices, oldest first.
    ///
    /// The second slice is non-empty only when the stored region wraps
    /// around the end of storage.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        let (head, tail) = self.ring.used_spans();
        (&self.storage[head], &self.storage[tail])
    }

    /// Stored bytes from relative `index` to the end of the stored region,
    /// as up to two slices.
    pub(crate) fn slices_from(&self, index: usize) -> (&[u8], &[u8]) {
        let len = self.ring.used().saturating_sub(index);
        if len == 0 {
            return (&[], &[]);
        }
        let (head, tail) = self.ring.relative_spans(index, len);
        (&self.storage[head], &self.storage[tail])
    }

    /// Byte at relative `index`. The caller checks `index < used`.
    pub(crate) fn byte_at(&self, index: usize) -> u8 {
        self.storage[self.ring.absolute(index)]
    }

    /// Iterate over the stored bytes, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        let (head, tail) = self.as_slices();
        head.iter().chain(tail).copied()
    }

    /// Copy the stored bytes into a new vector without consuming them.
    pub fn to_vec(&self) -> Vec<u8> {
        let (head, tail) = self.as_slices();
        let mut out = Vec::with_capacity(head.len() + tail.len());
        out.extend_from_slice(head);
        out.extend_from_slice(tail);
        out
    }
}

impl<A: Allocator> Drop for RingBuffer<'_, A> {
    fn drop(&mut self) {
        if let Storage::Owned(boxed) = &mut self.storage {
            self.allocator.release(mem::take(boxed));
        }
    }
}

impl<A: Allocator> fmt::Debug for RingBuffer<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Cursors { front, rear, used } = self.ring.cursors();
        f.debug_struct("RingBuffer")
            .field("capacity", &self.ring.capacity())
            .field("front", &front)
            .field("rear", &rear)
            .field("used", &used)
            .field("owned", &self.is_owned())
            .field("data", &BString::from(self.to_vec()))
            .finish()
    }
}

/// Stored length of a possibly absent buffer; `0` for `None`.
pub fn used_length_of<A: Allocator>(buffer: Option<&RingBuffer<'_, A>>) -> usize {
    buffer.map_or(0, RingBuffer::used_length)
}

/// An absent buffer has nothing to read, so `None` counts as empty.
pub fn is_empty_of<A: Allocator>(buffer: Option<&RingBuffer<'_, A>>) -> bool {
    buffer.is_none_or(RingBuffer::is_empty)
}

/// An absent buffer is never full.
pub fn is_full_of<A: Allocator>(buffer: Option<&RingBuffer<'_, A>>) -> bool {
    buffer.is_some_and(RingBuffer::is_full)
}
