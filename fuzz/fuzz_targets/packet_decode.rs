#![no_main]

use client::decode_payload;
use libfuzzer_sys::fuzz_target;
use schema::Phase;

fuzz_target!(|data: &[u8]| {
    // Every payload must decode to a known or unknown packet without
    // panicking, in every phase's id namespace.
    for phase in [
        Phase::Handshake,
        Phase::Status,
        Phase::Login,
        Phase::Configuration,
        Phase::Play,
    ] {
        let packet = decode_payload(protocol::registry(), phase, data);
        let _ = packet.id();
    }
});
