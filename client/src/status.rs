//! Synchronous server list ping.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::{Duration, Instant};

use codec::Packet;
use schema::Phase;
use serde::Deserialize;
use tracing::debug;
use wire::{encode_frame, Compression, FrameBuffer, Limits};

use crate::dispatcher::decode_payload;
use crate::error::{ClientError, ClientResult};

/// The raw outcome of a server list ping.
#[derive(Debug, Clone)]
pub struct ServerStatus {
    /// The status JSON document exactly as the server sent it.
    pub json: String,
    /// Round-trip time measured over the Ping/Pong exchange.
    pub latency: Duration,
}

impl ServerStatus {
    /// Parses the JSON document into its conventional fields.
    ///
    /// # Errors
    ///
    /// Returns the JSON error for documents that do not follow the
    /// conventional layout.
    pub fn info(&self) -> Result<StatusInfo, serde_json::Error> {
        serde_json::from_str(&self.json)
    }
}

/// Conventional fields of the status document.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusInfo {
    pub version: StatusVersion,
    #[serde(default)]
    pub players: Option<StatusPlayers>,
    /// Either a plain string or a chat component object.
    #[serde(default)]
    pub description: serde_json::Value,
}

/// Server version advertisement.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusVersion {
    pub name: String,
    pub protocol: i32,
}

/// Player counts and an optional sample.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusPlayers {
    pub max: i64,
    pub online: i64,
}

/// Performs the status flow against a server: Handshake with
/// `next_state = 1`, Request/Response, then Ping/Pong for latency.
///
/// Runs on the calling thread over its own connection; the status phase
/// never negotiates compression.
///
/// # Errors
///
/// Returns socket errors, frame errors, and
/// [`ClientError::UnexpectedPacket`] if the server answers out of order.
pub fn server_status(address: &str, port: u16, timeout: Duration) -> ClientResult<ServerStatus> {
    let mut stream = TcpStream::connect((address, port))?;
    stream.set_read_timeout(Some(timeout))?;
    debug!(address, port, "status connection open");

    send_packet(&mut stream, protocol::handshake(address, port, protocol::NextState::Status))?;
    send_packet(&mut stream, protocol::status_request())?;

    // One buffer across the whole exchange; the Response and Pong frames
    // may share a read chunk.
    let mut frames = FrameBuffer::new();

    let response = read_status_packet(&mut stream, &mut frames)?;
    let json = match response
        .field("JSON")
        .and_then(|value| value.as_str())
    {
        Some(json) => json.to_owned(),
        None => return Err(ClientError::UnexpectedPacket { id: response.id }),
    };

    let ping_payload = 0x6D63_7374_6174_7573_i64;
    let ping_sent = Instant::now();
    send_packet(&mut stream, protocol::status_ping(ping_payload))?;

    let pong = read_status_packet(&mut stream, &mut frames)?;
    let latency = ping_sent.elapsed();
    if pong.field("Payload").and_then(|value| value.as_i64()) != Some(ping_payload) {
        return Err(ClientError::UnexpectedPacket { id: pong.id });
    }

    Ok(ServerStatus { json, latency })
}

fn send_packet(stream: &mut TcpStream, packet: codec::KnownPacket) -> ClientResult<()> {
    let payload = Packet::Known(packet).encode(protocol::registry())?;
    let frame = encode_frame(&payload, Compression::Disabled)?;
    stream.write_all(&frame)?;
    Ok(())
}

fn read_status_packet(
    stream: &mut TcpStream,
    frames: &mut FrameBuffer,
) -> ClientResult<codec::KnownPacket> {
    let limits = Limits::default();
    let mut chunk = [0u8; 1024];

    loop {
        if let Some(payload) = frames.next_frame(Compression::Disabled, &limits)? {
            return match decode_payload(protocol::registry(), Phase::Status, &payload) {
                Packet::Known(known) => Ok(known),
                Packet::Unknown(unknown) => {
                    Err(ClientError::UnexpectedPacket { id: unknown.id })
                }
            };
        }
        let read = stream.read(&mut chunk)?;
        if read == 0 {
            return Err(ClientError::ConnectionClosed);
        }
        frames.push(&chunk[..read]);
    }
}
