//! `std::io` adapters, enabled by the `std` feature.
//!
//! Reads are best-effort and writes truncate to the free space, matching the
//! short read/write contract of `std::io`. A full ring reports `Ok(0)` for a
//! non-empty write, which `write_all` turns into `ErrorKind::WriteZero`.

use std::io;

use crate::{allocator::Allocator, options::ReadPolicy, ring::RingBuffer};

impl<A: Allocator> io::Read for RingBuffer<'_, A> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(RingBuffer::read(self, buf, ReadPolicy::BestEffort))
    }
}

impl<A: Allocator> io::Write for RingBuffer<'_, A> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_partial(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
