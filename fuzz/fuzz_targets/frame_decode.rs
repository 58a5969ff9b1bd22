#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::{Compression, FrameBuffer, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits::for_testing();

    for compression in [
        Compression::Disabled,
        Compression::Enabled { threshold: 0 },
        Compression::Enabled { threshold: 256 },
    ] {
        // Whole-buffer decode.
        let _ = wire::decode_frame(data, compression, &limits);

        // Chunked reassembly must agree with the whole-buffer result and
        // never panic, whatever the chunk boundaries are.
        let mut frames = FrameBuffer::new();
        for chunk in data.chunks(7) {
            frames.push(chunk);
            loop {
                match frames.next_frame(compression, &limits) {
                    Ok(Some(_)) => {}
                    Ok(None) => break,
                    Err(_) => return,
                }
            }
        }
    }
});
