use proptest::prelude::*;
use wire::{decode_frame, encode_frame, Compression, FrameBuffer, Limits};

fn compression_strategy() -> impl Strategy<Value = Compression> {
    prop_oneof![
        Just(Compression::Disabled),
        (0i32..2048).prop_map(|threshold| Compression::Enabled { threshold }),
    ]
}

proptest! {
    #[test]
    fn prop_frame_roundtrip(
        payload in prop::collection::vec(any::<u8>(), 0..2048),
        compression in compression_strategy(),
    ) {
        let frame = encode_frame(&payload, compression).unwrap();
        let (decoded, consumed) = decode_frame(&frame, compression, &Limits::default())
            .unwrap()
            .expect("complete frame must decode");
        prop_assert_eq!(decoded, payload);
        prop_assert_eq!(consumed, frame.len());
    }

    #[test]
    fn prop_at_or_below_threshold_marked_inline(
        payload in prop::collection::vec(any::<u8>(), 0..256),
        threshold in 256i32..1024,
    ) {
        let compression = Compression::Enabled { threshold };
        let frame = encode_frame(&payload, compression).unwrap();
        // Skip the packet_len prefix, the next varint must be 0.
        let mut reader = mctype::ByteReader::new(&frame);
        let _ = mctype::read_varint(&mut reader).unwrap();
        prop_assert_eq!(mctype::read_varint(&mut reader).unwrap(), 0);
    }

    #[test]
    fn prop_chunked_reassembly(
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..128), 1..8),
        chunk_size in 1usize..32,
        compression in compression_strategy(),
    ) {
        let mut wire_bytes = Vec::new();
        for payload in &payloads {
            wire_bytes.extend(encode_frame(payload, compression).unwrap());
        }

        let mut buffer = FrameBuffer::new();
        let mut decoded = Vec::new();
        for chunk in wire_bytes.chunks(chunk_size) {
            buffer.push(chunk);
            while let Some(payload) = buffer.next_frame(compression, &Limits::default()).unwrap() {
                decoded.push(payload);
            }
        }
        prop_assert_eq!(decoded, payloads);
        prop_assert!(buffer.is_empty());
    }

    #[test]
    fn prop_decode_arbitrary_bytes_never_panics(
        bytes in prop::collection::vec(any::<u8>(), 0..512),
        compression in compression_strategy(),
    ) {
        let _ = decode_frame(&bytes, compression, &Limits::for_testing());
    }
}
