//! A fixed-capacity circular byte buffer for embedded and `no_std` targets.
//!
//! [`RingBuffer`] stores bytes between a `front` and a `rear` cursor inside a
//! storage region whose size never changes. It offers:
//!
//! - writes that truncate, that are all-or-nothing, or that overwrite the
//!   oldest bytes ([`WritePolicy`]);
//! - best-effort or strict reads ([`ReadPolicy`]) and FIFO/LIFO discards;
//! - in-place `peek`/`modify`/`fill` addressed relative to the oldest byte;
//! - `resync` for storage written behind the ring's back (DMA);
//! - `strlen`/`strchr`/`strstr` style scans that follow the wraparound.
//!
//! Storage is either borrowed from the caller ([`RingBuffer::bind`]) or
//! obtained from an [`Allocator`] ([`RingBuffer::create`]).
//!
//! ```rust
//! use bytering::{ReadPolicy, RingBuffer};
//!
//! let mut storage = [0u8; 4];
//! let mut rb = RingBuffer::bind(&mut storage).unwrap();
//!
//! assert_eq!(rb.write_partial(&[1, 2, 3, 4]), 4);
//! assert_eq!(rb.write_partial(&[5]), 0);
//! assert_eq!(rb.write_force(&[5, 6]), 2);
//!
//! let mut out = [0u8; 4];
//! assert_eq!(rb.read(&mut out, ReadPolicy::Strict), 4);
//! assert_eq!(out, [3, 4, 5, 6]);
//! assert!(rb.is_empty());
//! ```
//!
//! Every mutation takes `&mut self`; sharing one ring between threads needs
//! external locking.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod allocator;
mod cursor;
mod error;
#[cfg(feature = "std")]
mod io;
mod options;
mod ring;
mod scan;
mod storage;

#[cfg(test)]
mod tests;

pub use allocator::{Allocator, Heap};
pub use cursor::Cursors;
pub use error::RingError;
pub use options::{ReadPolicy, RingOptions, WritePolicy};
pub use ring::{RingBuffer, is_empty_of, is_full_of, used_length_of};
