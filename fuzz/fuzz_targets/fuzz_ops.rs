#![no_main]
use std::collections::VecDeque;

use arbitrary::Arbitrary;
use bytering::{ReadPolicy, RingBuffer};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    WritePartial(Vec<u8>),
    WriteAtomic(Vec<u8>),
    WriteForce(Vec<u8>),
    Read { len: u8, strict: bool },
    Remove(i8),
    Peek { index: u8, len: u8 },
    Modify { index: u8, data: Vec<u8> },
    FindByte { index: u8, target: u8 },
    FindSubstring { index: u8, pattern: Vec<u8> },
    ScanLength(u8),
}

#[derive(Arbitrary, Debug)]
struct Input {
    capacity: u8,
    offset: u8,
    ops: Vec<Op>,
}

/// Logical contents as a deque; the ring must always agree with it.
fn run(input: Input) {
    let capacity = usize::from(input.capacity.max(1));
    let mut storage = vec![0u8; capacity];
    let mut rb = RingBuffer::bind(&mut storage).unwrap();
    let offset = usize::from(input.offset) % capacity;
    rb.resync(offset, offset, 0).unwrap();
    let mut model: VecDeque<u8> = VecDeque::with_capacity(capacity);

    for op in input.ops {
        match op {
            Op::WritePartial(data) => {
                let n = rb.write_partial(&data);
                assert_eq!(n, data.len().min(capacity - model.len()));
                model.extend(&data[..n]);
            }
            Op::WriteAtomic(data) => {
                let n = rb.write_atomic(&data);
                if data.len() <= capacity - model.len() {
                    assert_eq!(n, data.len());
                    model.extend(&data);
                } else {
                    assert_eq!(n, 0);
                }
            }
            Op::WriteForce(data) => {
                let n = rb.write_force(&data);
                assert_eq!(n, data.len().min(capacity));
                for &byte in &data[..n] {
                    if model.len() == capacity {
                        model.pop_front();
                    }
                    model.push_back(byte);
                }
            }
            Op::Read { len, strict } => {
                let policy = if strict { ReadPolicy::Strict } else { ReadPolicy::BestEffort };
                let mut out = vec![0u8; usize::from(len)];
                let n = rb.read(&mut out, policy);
                let expected: Vec<u8> = if strict && out.len() > model.len() {
                    Vec::new()
                } else {
                    model.drain(..out.len().min(model.len())).collect()
                };
                assert_eq!(&out[..n], &expected[..]);
            }
            Op::Remove(len) => {
                let count = usize::from(len.unsigned_abs()).min(model.len());
                assert_eq!(rb.remove(isize::from(len)), count);
                if len > 0 {
                    model.drain(..count);
                } else {
                    model.truncate(model.len() - count);
                }
            }
            Op::Peek { index, len } => {
                let (index, len) = (usize::from(index), usize::from(len));
                let mut out = vec![0u8; len];
                let ok = index < model.len() && len <= model.len() - index;
                assert_eq!(rb.peek(index, &mut out).is_ok(), ok);
                if ok {
                    assert!(out.iter().eq(model.range(index..index + len)));
                }
            }
            Op::Modify { index, data } => {
                let index = usize::from(index);
                let ok = index < model.len() && data.len() <= model.len() - index;
                assert_eq!(rb.modify(index, &data).is_ok(), ok);
                if ok {
                    for (slot, byte) in model.range_mut(index..index + data.len()).zip(&data) {
                        *slot = *byte;
                    }
                }
            }
            Op::FindByte { index, target } => {
                let index = usize::from(index);
                let expected = (index..model.len()).find(|&i| model[i] == target);
                assert_eq!(rb.find_byte(index, target), expected);
            }
            Op::FindSubstring { index, pattern } => {
                let index = usize::from(index);
                let end = pattern.iter().position(|&b| b == 0).unwrap_or(pattern.len());
                let pattern = &pattern[..end];
                let expected = if index < model.len() && pattern.len() <= model.len() - index {
                    (index..=model.len() - pattern.len())
                        .find(|&s| pattern.iter().enumerate().all(|(i, &b)| model[s + i] == b))
                } else {
                    None
                };
                assert_eq!(rb.find_substring(index, pattern), expected);
            }
            Op::ScanLength(index) => {
                let index = usize::from(index);
                let expected = (index..model.len()).take_while(|&i| model[i] != 0).count();
                assert_eq!(rb.scan_length(index), expected);
            }
        }

        let cursors = rb.cursors();
        assert_eq!(cursors.used, model.len());
        assert_eq!(cursors.rear, (cursors.front + cursors.used) % capacity);
        assert!(rb.iter().eq(model.iter().copied()));
    }
}

fuzz_target!(|input: Input| run(input));
