//! Wire framing for the Minecraft Java Edition protocol.
//!
//! This crate handles the outermost wire unit: the length-prefixed frame
//! around every packet, in both its uncompressed and threshold-compressed
//! (zlib) shapes, plus the [`FrameBuffer`] accumulator that turns raw TCP
//! read chunks back into whole frames.
//!
//! # Design Principles
//!
//! - **Bounded decoding** - Length prefixes are validated against
//!   [`Limits`] before any allocation.
//! - **Incomplete is not an error** - A partial frame yields `None`;
//!   callers buffer more bytes and retry.
//! - **No packet knowledge** - This crate never looks inside the payload.

mod buffer;
mod error;
mod frame;
mod limits;

pub use buffer::FrameBuffer;
pub use error::{FrameError, FrameResult};
pub use frame::{decode_frame, encode_frame, Compression};
pub use limits::Limits;
