//! Encoding and decoding of the two-shape outer frame.
//!
//! Uncompressed connections frame a packet as `VarInt(len) ‖ payload`.
//! Once compression is negotiated every frame becomes
//! `VarInt(packet_len) ‖ VarInt(data_len) ‖ body`, where `data_len == 0`
//! marks an inline uncompressed body (the payload was at or below the
//! threshold) and `data_len > 0` is the inflated size of a zlib body.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use mctype::{read_varint, varint_len, write_varint, ByteReader, TypeError};

use crate::error::{FrameError, FrameResult};
use crate::limits::Limits;

/// Per-connection compression state consulted by the frame codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Not negotiated; frames use the plain shape.
    Disabled,
    /// Negotiated with the given threshold; frames use the compressed
    /// shape, with payloads strictly above the threshold deflated.
    Enabled { threshold: i32 },
}

impl Compression {
    /// Returns `true` once compression has been negotiated.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled { .. })
    }
}

/// Wraps a packet payload (`id ‖ fields`) into its outer frame.
///
/// # Errors
///
/// Returns [`FrameError::Decompression`] if zlib fails, which only happens
/// on I/O errors that a `Vec` sink cannot produce in practice.
pub fn encode_frame(payload: &[u8], compression: Compression) -> FrameResult<Vec<u8>> {
    match compression {
        Compression::Disabled => {
            let mut out = Vec::with_capacity(payload.len() + 5);
            write_varint(&mut out, payload.len() as i32);
            out.extend_from_slice(payload);
            Ok(out)
        }
        Compression::Enabled { threshold } => {
            let (data_len, body) = if payload.len() as i64 > i64::from(threshold) {
                (payload.len() as i32, deflate(payload)?)
            } else {
                (0, payload.to_vec())
            };
            let packet_len = varint_len(data_len) + body.len();

            let mut out = Vec::with_capacity(packet_len + 5);
            write_varint(&mut out, packet_len as i32);
            write_varint(&mut out, data_len);
            out.extend_from_slice(&body);
            Ok(out)
        }
    }
}

/// Attempts to decode one frame from the front of `buf`.
///
/// Returns the unwrapped packet payload and the number of bytes consumed,
/// or `Ok(None)` when the buffer does not yet hold a complete frame.
///
/// # Errors
///
/// Returns an error for malformed length prefixes, frames over the limits,
/// and zlib failures. Errors are not recoverable by buffering more bytes.
pub fn decode_frame(
    buf: &[u8],
    compression: Compression,
    limits: &Limits,
) -> FrameResult<Option<(Vec<u8>, usize)>> {
    let mut reader = ByteReader::new(buf);
    let frame_len = match read_varint(&mut reader) {
        Ok(len) => len,
        // The prefix itself may be split across reads.
        Err(TypeError::Underrun { .. }) => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    if frame_len < 0 {
        return Err(FrameError::InvalidLength { length: frame_len });
    }
    let frame_len = frame_len as usize;
    if frame_len > limits.max_frame_bytes {
        return Err(FrameError::FrameTooLarge {
            length: frame_len,
            max: limits.max_frame_bytes,
        });
    }
    if reader.remaining() < frame_len {
        return Ok(None);
    }

    let prefix_len = reader.position();
    let consumed = prefix_len + frame_len;
    let body = &buf[prefix_len..consumed];

    if !compression.is_enabled() {
        return Ok(Some((body.to_vec(), consumed)));
    }

    let mut body_reader = ByteReader::new(body);
    let data_len = read_varint(&mut body_reader)?;
    if data_len < 0 {
        return Err(FrameError::InvalidLength { length: data_len });
    }
    let rest = body_reader.take_rest();

    if data_len == 0 {
        // Below-threshold payload, stored inline.
        return Ok(Some((rest.to_vec(), consumed)));
    }

    let data_len = data_len as usize;
    if data_len > limits.max_inflated_bytes {
        return Err(FrameError::FrameTooLarge {
            length: data_len,
            max: limits.max_inflated_bytes,
        });
    }
    let payload = inflate(rest, data_len)?;
    Ok(Some((payload, consumed)))
}

fn deflate(data: &[u8]) -> FrameResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder
        .write_all(data)
        .and_then(|()| encoder.finish())
        .map_err(|err| FrameError::Decompression {
            detail: err.to_string(),
        })
}

fn inflate(data: &[u8], expected: usize) -> FrameResult<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::with_capacity(expected);
    decoder
        .read_to_end(&mut out)
        .map_err(|err| FrameError::Decompression {
            detail: err.to_string(),
        })?;
    if out.len() != expected {
        return Err(FrameError::LengthMismatch {
            declared: expected,
            actual: out.len(),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncompressed_roundtrip() {
        let payload = b"\x00\xFD\x05hello".to_vec();
        let frame = encode_frame(&payload, Compression::Disabled).unwrap();
        assert_eq!(frame[0] as usize, payload.len());

        let (decoded, consumed) =
            decode_frame(&frame, Compression::Disabled, &Limits::default())
                .unwrap()
                .unwrap();
        assert_eq!(decoded, payload);
        assert_eq!(consumed, frame.len());
    }

    #[test]
    fn below_threshold_stays_inline() {
        let payload = vec![0x42; 64];
        let compression = Compression::Enabled { threshold: 256 };
        let frame = encode_frame(&payload, compression).unwrap();

        // packet_len, then data_len == 0, then the raw payload.
        let mut reader = ByteReader::new(&frame);
        let packet_len = read_varint(&mut reader).unwrap();
        let data_len = read_varint(&mut reader).unwrap();
        assert_eq!(data_len, 0);
        assert_eq!(packet_len as usize, 1 + payload.len());
        assert_eq!(reader.take_rest(), &payload[..]);

        let (decoded, _) = decode_frame(&frame, compression, &Limits::default())
            .unwrap()
            .unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn at_threshold_stays_inline() {
        let payload = vec![0x42; 256];
        let compression = Compression::Enabled { threshold: 256 };
        let frame = encode_frame(&payload, compression).unwrap();

        let mut reader = ByteReader::new(&frame);
        let _ = read_varint(&mut reader).unwrap();
        assert_eq!(read_varint(&mut reader).unwrap(), 0);
    }

    #[test]
    fn above_threshold_compresses() {
        let payload = vec![0x42; 1024];
        let compression = Compression::Enabled { threshold: 256 };
        let frame = encode_frame(&payload, compression).unwrap();

        let mut reader = ByteReader::new(&frame);
        let _ = read_varint(&mut reader).unwrap();
        assert_eq!(read_varint(&mut reader).unwrap(), 1024);
        // Uniform bytes deflate well below their original size.
        assert!(frame.len() < payload.len());

        let (decoded, consumed) = decode_frame(&frame, compression, &Limits::default())
            .unwrap()
            .unwrap();
        assert_eq!(decoded, payload);
        assert_eq!(consumed, frame.len());
    }

    #[test]
    fn zero_threshold_compresses_everything_nonempty() {
        let payload = vec![1, 2, 3];
        let compression = Compression::Enabled { threshold: 0 };
        let frame = encode_frame(&payload, compression).unwrap();

        let mut reader = ByteReader::new(&frame);
        let _ = read_varint(&mut reader).unwrap();
        assert_eq!(read_varint(&mut reader).unwrap(), 3);

        let (decoded, _) = decode_frame(&frame, compression, &Limits::default())
            .unwrap()
            .unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn incomplete_prefix_waits() {
        // 0x80 is an unterminated varint; more bytes could complete it.
        let result = decode_frame(&[0x80], Compression::Disabled, &Limits::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn incomplete_body_waits() {
        let payload = vec![7; 10];
        let frame = encode_frame(&payload, Compression::Disabled).unwrap();
        for cut in 0..frame.len() {
            let result =
                decode_frame(&frame[..cut], Compression::Disabled, &Limits::default()).unwrap();
            assert!(result.is_none(), "prefix of {cut} bytes must be incomplete");
        }
    }

    #[test]
    fn negative_length_rejected() {
        let mut buf = Vec::new();
        write_varint(&mut buf, -1);
        let err = decode_frame(&buf, Compression::Disabled, &Limits::default()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidLength { length: -1 }));
    }

    #[test]
    fn oversize_frame_rejected() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 1_000_000);
        let err = decode_frame(&buf, Compression::Disabled, &Limits::for_testing()).unwrap_err();
        assert!(matches!(err, FrameError::FrameTooLarge { .. }));
    }

    #[test]
    fn corrupt_zlib_rejected() {
        let compression = Compression::Enabled { threshold: 0 };
        let mut frame = Vec::new();
        // packet_len covers data_len (1 byte) + 4 bytes of garbage.
        write_varint(&mut frame, 5);
        write_varint(&mut frame, 16);
        frame.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

        let err = decode_frame(&frame, compression, &Limits::default()).unwrap_err();
        assert!(matches!(err, FrameError::Decompression { .. }));
    }

    #[test]
    fn inflated_size_mismatch_rejected() {
        let payload = vec![0x11; 100];
        let deflated = deflate(&payload).unwrap();

        let mut frame = Vec::new();
        let declared = 99; // lies about the inflated size
        write_varint(&mut frame, (varint_len(declared) + deflated.len()) as i32);
        write_varint(&mut frame, declared);
        frame.extend_from_slice(&deflated);

        let err = decode_frame(
            &frame,
            Compression::Enabled { threshold: 0 },
            &Limits::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FrameError::LengthMismatch {
                declared: 99,
                actual: 100
            }
        ));
    }
}
