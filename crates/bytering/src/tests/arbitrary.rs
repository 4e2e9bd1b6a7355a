use alloc::vec::Vec;

use quickcheck::{Arbitrary, Gen};

use crate::{ReadPolicy, WritePolicy};

/// One step of a randomly generated ring workload.
#[derive(Debug, Clone)]
pub(crate) enum Op {
    Write(WritePolicy, Vec<u8>),
    Read(ReadPolicy, usize),
    Remove(isize),
    Peek(usize, usize),
    Modify(usize, Vec<u8>),
    Fill(usize, u8, usize),
    Resync(usize, usize, usize),
    ScanLength(usize),
    FindByte(usize, u8),
    FindSubstring(usize, Vec<u8>),
}

fn small_bytes(g: &mut Gen) -> Vec<u8> {
    let len = usize::arbitrary(g) % 12;
    // A narrow alphabet keeps byte and substring searches hitting.
    (0..len).map(|_| u8::arbitrary(g) % 4).collect()
}

fn small(g: &mut Gen) -> usize {
    usize::arbitrary(g) % 12
}

impl Arbitrary for WritePolicy {
    fn arbitrary(g: &mut Gen) -> Self {
        match usize::arbitrary(g) % 3 {
            0 => WritePolicy::Partial,
            1 => WritePolicy::Atomic,
            _ => WritePolicy::Overwrite,
        }
    }
}

impl Arbitrary for ReadPolicy {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            ReadPolicy::Strict
        } else {
            ReadPolicy::BestEffort
        }
    }
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match usize::arbitrary(g) % 10 {
            0 => Op::Write(WritePolicy::arbitrary(g), small_bytes(g)),
            1 => Op::Read(ReadPolicy::arbitrary(g), small(g)),
            2 => {
                let len = isize::try_from(small(g)).unwrap_or(0);
                Op::Remove(if bool::arbitrary(g) { len } else { -len })
            }
            3 => Op::Peek(small(g), small(g)),
            4 => Op::Modify(small(g), small_bytes(g)),
            5 => Op::Fill(small(g), u8::arbitrary(g) % 4, small(g)),
            6 => Op::Resync(small(g), small(g), small(g)),
            7 => Op::ScanLength(small(g)),
            8 => Op::FindByte(small(g), u8::arbitrary(g) % 4),
            _ => Op::FindSubstring(small(g), small_bytes(g)),
        }
    }
}

/// Ring capacity in `1..=9`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Capacity(pub(crate) usize);

impl Arbitrary for Capacity {
    fn arbitrary(g: &mut Gen) -> Self {
        Capacity(1 + usize::arbitrary(g) % 9)
    }
}
