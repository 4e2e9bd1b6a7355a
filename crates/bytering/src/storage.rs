use alloc::boxed::Box;
use core::ops::{Deref, DerefMut};

/// Backing region of a ring buffer.
///
/// - `Borrowed`: caller-owned memory (a `static` array, a DMA target). The
///   ring never frees it; [`RingBuffer::unbind`](crate::RingBuffer::unbind)
///   hands it back.
/// - `Owned`: memory obtained from the ring's allocator and returned to it on
///   drop.
pub(crate) enum Storage<'a> {
    /// Storage lent to the ring for its whole lifetime.
    Borrowed(&'a mut [u8]),
    /// Storage the ring obtained from its allocator.
    Owned(Box<[u8]>),
}

impl Storage<'_> {
    /// Whether the ring is responsible for releasing this region.
    pub(crate) fn is_owned(&self) -> bool {
        matches!(self, Storage::Owned(_))
    }
}

impl Deref for Storage<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Storage::Borrowed(slice) => slice,
            Storage::Owned(boxed) => boxed,
        }
    }
}

impl DerefMut for Storage<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        match self {
            Storage::Borrowed(slice) => slice,
            Storage::Owned(boxed) => boxed,
        }
    }
}
