/// What a plain [`RingBuffer::write`](crate::RingBuffer::write) does when the
/// request does not fit in the free space.
///
/// Every policy is also available as its own method, so callers that need a
/// specific behaviour can ignore this setting entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WritePolicy {
    /// Write as much as fits and drop the rest of the request.
    #[default]
    Partial,
    /// Write the whole request or nothing at all.
    Atomic,
    /// Evict the oldest bytes to make room. This is the only policy that
    /// loses stored data.
    Overwrite,
}

/// What [`RingBuffer::read_default`](crate::RingBuffer::read_default) does
/// when fewer bytes are stored than requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReadPolicy {
    /// Return whatever is stored, up to the requested length.
    #[default]
    BestEffort,
    /// Read nothing unless the full request can be satisfied.
    Strict,
}

/// Configuration options for a ring buffer.
///
/// These options only select the behaviour of the policy-dispatching entry
/// points ([`write`](crate::RingBuffer::write) and
/// [`read_default`](crate::RingBuffer::read_default)). The storage strategy is
/// chosen separately through the allocator type parameter.
///
/// # Default
///
/// Truncating writes and best-effort reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RingOptions {
    /// Policy applied by `write` when the request exceeds the free space.
    ///
    /// # Default
    ///
    /// [`WritePolicy::Partial`]
    pub write_policy: WritePolicy,

    /// Policy applied by `read_default` when the request exceeds the stored
    /// length.
    ///
    /// # Default
    ///
    /// [`ReadPolicy::BestEffort`]
    pub read_policy: ReadPolicy,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn options_load_from_partial_config() {
        let options: RingOptions = serde_json::from_str(r#"{"write_policy":"overwrite"}"#).unwrap();
        assert_eq!(
            options,
            RingOptions {
                write_policy: WritePolicy::Overwrite,
                read_policy: ReadPolicy::BestEffort,
            }
        );
    }
}
