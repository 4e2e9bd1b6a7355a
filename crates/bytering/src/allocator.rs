//! Pluggable backing-store allocation for owned ring buffers.
//!
//! A ring buffer created with [`RingBuffer::create`](crate::RingBuffer::create)
//! asks its allocator for the storage exactly once and hands it back exactly
//! once when dropped. Buffers bound to caller storage never touch the
//! allocator.

use alloc::{boxed::Box, vec::Vec};

/// Source of owned ring storage.
///
/// Implementations return `None` when they cannot satisfy a request; the
/// caller turns that into
/// [`RingError::AllocationFailed`](crate::RingError::AllocationFailed).
pub trait Allocator {
    /// Obtain `len` bytes of storage. The contents are unspecified.
    fn allocate(&mut self, len: usize) -> Option<Box<[u8]>>;

    /// Return storage previously obtained from [`allocate`](Self::allocate).
    ///
    /// The default implementation simply drops the box, which returns it to
    /// the global allocator.
    fn release(&mut self, storage: Box<[u8]>) {
        drop(storage);
    }
}

/// The global heap, with allocation failure reported instead of aborting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heap;

impl Allocator for Heap {
    fn allocate(&mut self, len: usize) -> Option<Box<[u8]>> {
        let mut storage = Vec::new();
        storage.try_reserve_exact(len).ok()?;
        storage.resize(len, 0);
        Some(storage.into_boxed_slice())
    }
}

impl<A: Allocator + ?Sized> Allocator for &mut A {
    fn allocate(&mut self, len: usize) -> Option<Box<[u8]>> {
        (**self).allocate(len)
    }

    fn release(&mut self, storage: Box<[u8]>) {
        (**self).release(storage);
    }
}
