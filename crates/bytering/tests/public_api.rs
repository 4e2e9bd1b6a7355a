#![expect(missing_docs)]

use bytering::{ReadPolicy, RingBuffer, RingError, RingOptions, WritePolicy};

/// A ring used as a line-oriented receive buffer: bytes arrive in bursts,
/// complete lines are located with the scan helpers and consumed.
#[test]
fn line_framing_across_the_wrap() {
    let mut storage = [0u8; 16];
    let mut rb = RingBuffer::bind(&mut storage).unwrap();

    let mut lines = Vec::new();
    // The second and third lines straddle the end of storage.
    for burst in [&b"AT+OK\r\nAT+"[..], b"ERR\r\n+C", b"SQ: 21\r\nO", b"K\r\n"] {
        assert_eq!(rb.write_atomic(burst), burst.len());
        while let Some(end) = rb.find_substring(0, b"\r\n") {
            let mut line = vec![0; end];
            assert_eq!(rb.read(&mut line, ReadPolicy::Strict), end);
            assert_eq!(rb.remove(2), 2);
            lines.push(String::from_utf8(line).unwrap());
        }
    }

    assert_eq!(lines, ["AT+OK", "AT+ERR", "+CSQ: 21", "OK"]);
    assert!(rb.is_empty());
}

#[test]
fn overwrite_ring_keeps_the_latest_samples() {
    let mut rb = RingBuffer::create(5)
        .unwrap()
        .with_options(RingOptions {
            write_policy: WritePolicy::Overwrite,
            ..RingOptions::default()
        });

    for sample in 0u8..12 {
        assert_eq!(rb.write(&[sample]), 1);
        let cursors = rb.cursors();
        assert_eq!(cursors.rear, (cursors.front + cursors.used) % rb.capacity());
    }

    assert_eq!(rb.to_vec(), [7, 8, 9, 10, 11]);
    let (head, tail) = rb.as_slices();
    assert_eq!(head.len() + tail.len(), 5);
}

#[test]
fn nul_terminated_records() {
    let mut rb = RingBuffer::create(12).unwrap();
    rb.write_partial(b"name\0value\0");

    let first = rb.scan_length(0);
    assert_eq!(first, 4);
    let second = rb.scan_length(first + 1);
    assert_eq!(second, 5);
    assert_eq!(rb.find_byte(first + 1, 0), Some(10));

    let mut value = vec![0; second];
    rb.peek(first + 1, &mut value).unwrap();
    assert_eq!(value, b"value");
}

#[test]
fn errors_render_readably() {
    let mut rb = RingBuffer::create(4).unwrap();
    rb.write_partial(b"ab");

    let err = rb.peek(1, &mut [0; 2]).unwrap_err();
    assert_eq!(err.to_string(), "range 1..1+2 is outside the 2 stored bytes");

    let err = rb.resync(0, 1, 2).unwrap_err();
    assert_eq!(
        err,
        RingError::InconsistentCursors {
            front: 0,
            rear: 1,
            used: 2
        }
    );
    assert_eq!(err.to_string(), "inconsistent cursors: front=0 rear=1 used=2");
    assert_eq!(
        RingError::CapacityTooLarge { capacity: 70_000 }.to_string(),
        "ring buffer capacity 70000 exceeds 65535"
    );
}
