//! Client state machine for the Minecraft Java Edition protocol.
//!
//! Ties the codec stack together into a working connection: a TCP socket
//! with independent receive and send workers, a FIFO send queue with
//! per-message completion callbacks, a handler registry keyed by packet
//! identity, and the phase state machine that answers compression
//! negotiation, the login and configuration handshakes, keep-alives, and
//! teleport confirmations automatically.
//!
//! ```no_run
//! use client::Client;
//!
//! let client = Client::connect("127.0.0.1", 25565)?;
//! client.login("edocsitahw")?;
//! client.wait();
//! # Ok::<(), client::ClientError>(())
//! ```

mod client;
mod connection;
mod dispatcher;
mod error;
mod handler;
mod status;

pub use client::Client;
pub use connection::{Connection, ConnectionHandle, SendEntry};
pub use dispatcher::decode_payload;
pub use error::{ClientError, ClientResult};
pub use handler::{dispatch, Callback, HandlerRegistry, PacketKey, UNLIMITED};
pub use status::{server_status, ServerStatus, StatusInfo, StatusPlayers, StatusVersion};
