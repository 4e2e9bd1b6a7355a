use thiserror::Error;

/// Why a ring buffer operation was refused.
///
/// Operations that report progress as a byte count (writes, reads, removes,
/// fills) never produce this type; a count of `0` already means "nothing
/// happened". `RingError` is reserved for construction and for the
/// all-or-nothing view/edit and cursor operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    /// The storage region is empty or a zero capacity was requested.
    #[error("ring buffer capacity must be non-zero")]
    ZeroCapacity,
    /// The requested capacity does not fit the 16-bit capacity range.
    #[error("ring buffer capacity {capacity} exceeds {max}", max = u16::MAX)]
    CapacityTooLarge {
        /// Requested capacity.
        capacity: usize,
    },
    /// The injected allocator could not provide the backing storage.
    #[error("failed to allocate {capacity} bytes of ring storage")]
    AllocationFailed {
        /// Requested capacity.
        capacity: usize,
    },
    /// A relative range reaches outside the stored bytes.
    #[error("range {index}..{index}+{len} is outside the {used} stored bytes")]
    OutOfRange {
        /// Relative start index.
        index: usize,
        /// Requested length.
        len: usize,
        /// Bytes stored at the time of the call.
        used: usize,
    },
    /// A cursor triple handed to `resync` does not describe a valid ring.
    #[error("inconsistent cursors: front={front} rear={rear} used={used}")]
    InconsistentCursors {
        /// Front cursor after reduction modulo capacity.
        front: usize,
        /// Rear cursor after reduction modulo capacity.
        rear: usize,
        /// Requested stored length.
        used: usize,
    },
}
