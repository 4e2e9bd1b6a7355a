//! C-string style scans over the stored bytes.
//!
//! These are the ring counterparts of `strlen`, `strchr` and `strstr`. They
//! take a relative start index, only look at stored bytes (`index..used`),
//! follow the stored region across the end of storage, and never mutate the
//! ring. All of them are byte oriented; no text encoding is assumed.

use bstr::ByteSlice;

use crate::{allocator::Allocator, ring::RingBuffer};

impl<A: Allocator> RingBuffer<'_, A> {
    /// Length of the NUL-terminated string starting at relative `index`.
    ///
    /// Counts bytes until a `0` byte or the end of the stored region,
    /// whichever comes first. Returns `0` when `index >= used`.
    pub fn scan_length(&self, index: usize) -> usize {
        let (head, tail) = self.slices_from(index);
        match head.find_byte(0) {
            Some(pos) => pos,
            None => head.len() + tail.find_byte(0).unwrap_or(tail.len()),
        }
    }

    /// Relative index of the first `target` byte at or after `index`.
    pub fn find_byte(&self, index: usize, target: u8) -> Option<usize> {
        let (head, tail) = self.slices_from(index);
        head.find_byte(target)
            .or_else(|| tail.find_byte(target).map(|pos| head.len() + pos))
            .map(|pos| index + pos)
    }

    /// Relative index of the first occurrence of `pattern` at or after
    /// `index`.
    ///
    /// `pattern` is treated as a C string: it ends at its first `0` byte, if
    /// any. An empty pattern matches at `index`. A match must lie entirely
    /// inside the stored region.
    pub fn find_substring(&self, index: usize, pattern: &[u8]) -> Option<usize> {
        let pattern = match pattern.find_byte(0) {
            Some(end) => &pattern[..end],
            None => pattern,
        };
        let used = self.used_length();
        if index >= used || pattern.len() > used - index {
            return None;
        }

        let (head, tail) = self.slices_from(index);
        if tail.is_empty() {
            return head.find(pattern).map(|pos| index + pos);
        }

        let last_start = used - pattern.len();
        (index..=last_start).find(|&start| {
            pattern
                .iter()
                .enumerate()
                .all(|(offset, &byte)| self.byte_at(start + offset) == byte)
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::RingBuffer;

    /// Capacity 8 with the stored region starting at storage slot 6, so the
    /// contents wrap after two bytes.
    fn wrapped<'a>(storage: &'a mut [u8; 8], contents: &[u8]) -> RingBuffer<'a> {
        let mut rb = RingBuffer::bind(storage).unwrap();
        assert_eq!(rb.write_partial(&[0xEE; 6]), 6);
        assert_eq!(rb.remove(6), 6);
        // Removing everything canonicalises the cursors; move them back.
        rb.resync(6, 6, 0).unwrap();
        assert_eq!(rb.write_partial(contents), contents.len());
        rb
    }

    #[test]
    fn scan_length_stops_at_nul_across_the_wrap() {
        let mut storage = [0u8; 8];
        let rb = wrapped(&mut storage, b"cd\0ab");
        assert_eq!(rb.cursors().front, 6);
        assert_eq!(rb.scan_length(0), 2);
        assert_eq!(rb.scan_length(3), 2);
        assert_eq!(rb.scan_length(2), 0);
    }

    #[test]
    fn scan_length_without_nul_is_bounded_by_used() {
        let mut storage = [0u8; 8];
        let rb = wrapped(&mut storage, b"abcde");
        assert_eq!(rb.scan_length(0), 5);
        assert_eq!(rb.scan_length(4), 1);
        assert_eq!(rb.scan_length(5), 0);
    }

    #[rstest]
    #[case(0, b'c', Some(0))]
    #[case(0, b'b', Some(4))]
    #[case(0, 0, Some(2))]
    #[case(3, b'c', None)]
    #[case(1, b'a', Some(3))]
    #[case(5, b'a', None)]
    fn find_byte_follows_the_wrap(
        #[case] index: usize,
        #[case] target: u8,
        #[case] expected: Option<usize>,
    ) {
        let mut storage = [0u8; 8];
        let rb = wrapped(&mut storage, b"cd\0ab");
        assert_eq!(rb.find_byte(index, target), expected);
    }

    #[test]
    fn find_byte_ignores_free_slots() {
        let mut storage = [0u8; 8];
        let mut rb = RingBuffer::bind(&mut storage).unwrap();
        rb.fill(0, b'z', 8);
        rb.write_partial(b"abc");
        assert_eq!(rb.find_byte(0, b'z'), None);
    }

    #[rstest]
    #[case(0, &b"bcd"[..], Some(1))]
    #[case(0, &b"xyz"[..], None)]
    #[case(2, &b"de"[..], Some(3))]
    #[case(0, &b"abcdef"[..], Some(0))]
    #[case(0, &b"abcdefg"[..], None)]
    #[case(4, &b""[..], Some(4))]
    #[case(0, &b"cd\0zz"[..], Some(2))]
    fn find_substring_across_the_wrap(
        #[case] index: usize,
        #[case] pattern: &[u8],
        #[case] expected: Option<usize>,
    ) {
        let mut storage = [0u8; 8];
        let mut rb = RingBuffer::bind(&mut storage).unwrap();
        rb.write_partial(&[0; 5]);
        rb.remove(4);
        rb.write_partial(b"abcde");
        rb.remove(1);
        rb.write_partial(b"f");
        // Stored: "abcdef" starting at storage slot 5.
        assert_eq!(rb.cursors().front, 5);
        assert_eq!(rb.find_substring(index, pattern), expected);
    }

    #[test]
    fn find_substring_in_contiguous_region() {
        let mut storage = [0u8; 16];
        let mut rb = RingBuffer::bind(&mut storage).unwrap();
        rb.write_partial(b"GET / HTTP/1.1\r\n");
        assert_eq!(rb.find_substring(0, b"HTTP"), Some(6));
        assert_eq!(rb.find_substring(7, b"HTTP"), None);
        assert_eq!(rb.find_substring(0, b"\r\n"), Some(14));
    }

    #[test]
    fn scans_on_empty_ring() {
        let mut storage = [0u8; 4];
        let rb = RingBuffer::bind(&mut storage).unwrap();
        assert_eq!(rb.scan_length(0), 0);
        assert_eq!(rb.find_byte(0, 0), None);
        assert_eq!(rb.find_substring(0, b""), None);
    }
}
