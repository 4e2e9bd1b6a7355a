//! Simulates a DMA engine filling a statically allocated receive ring and
//! the firmware loop that resynchronises the cursors and consumes frames.
//!
//! Run with `RUST_LOG=bytering=trace cargo run --example dma_resync` to see
//! the ring's refusal and eviction events.
#![allow(missing_docs)]

use bytering::{ReadPolicy, RingBuffer};
use tracing_subscriber::EnvFilter;

const CAPACITY: usize = 32;

/// Stand-in for a circular DMA channel: it writes wherever its own write
/// pointer is and wraps without consulting the ring.
struct Dma {
    position: usize,
}

impl Dma {
    fn transfer(&mut self, target: &mut [u8], bytes: &[u8]) {
        for &byte in bytes {
            target[self.position] = byte;
            self.position = (self.position + 1) % target.len();
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut storage = [0u8; CAPACITY];
    let mut rb = RingBuffer::bind(&mut storage).expect("non-empty storage");
    let mut dma = Dma { position: 0 };

    let bursts: [&[u8]; 4] = [b"$GPGGA,1*4A\n$GP", b"RMC,2*1F\n", b"$GPVTG,3*0C\n$GPZ", b"DA,4*77\n"];
    for burst in bursts {
        dma.transfer(rb.storage_mut(), burst);

        let cursors = rb.cursors();
        let used = cursors.used + burst.len();
        if let Err(err) = rb.resync(cursors.front, dma.position, used) {
            eprintln!("dropping burst: {err}");
            continue;
        }

        while let Some(end) = rb.find_byte(0, b'\n') {
            let mut frame = vec![0u8; end + 1];
            rb.read(&mut frame, ReadPolicy::Strict);
            println!("frame: {}", String::from_utf8_lossy(&frame).trim_end());
        }
    }

    // A burst larger than the free space overruns unread data; the cursor
    // triple no longer adds up and resync refuses it.
    rb.write_partial(b"$partial");
    let cursors = rb.cursors();
    dma.transfer(rb.storage_mut(), &[b'#'; CAPACITY]);
    let refused = rb.resync(cursors.front, dma.position, cursors.used + CAPACITY);
    println!("overrun detected: {}", refused.is_err());
}
