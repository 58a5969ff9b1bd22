//! The protocol client: phase state machine and default handlers.

use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use codec::{KnownPacket, Packet};
use mctype::offline_uuid;
use protocol::{id, NextState};
use schema::Phase;
use tracing::{debug, info, warn};
use wire::{encode_frame, Compression, Limits};

use crate::connection::{Connection, ConnectionHandle};
use crate::dispatcher::decode_payload;
use crate::error::ClientResult;
use crate::handler::{self, HandlerRegistry, PacketKey, UNLIMITED};

/// Sends packets through a connection, applying the current compression
/// state at enqueue time.
#[derive(Clone)]
struct Emitter {
    handle: ConnectionHandle,
    compression: Arc<Mutex<Compression>>,
}

impl Emitter {
    fn emit(&self, packet: KnownPacket, on_sent: Option<Box<dyn FnOnce() + Send>>) -> ClientResult<()> {
        let name = packet.name;
        let payload = Packet::Known(packet).encode(protocol::registry())?;
        let mode = *self.compression.lock().unwrap();
        let frame = encode_frame(&payload, mode)?;
        debug!(bytes = frame.len(), "C -> S {name}");
        self.handle.send(frame, on_sent)
    }

    fn emit_logged(&self, packet: KnownPacket, on_sent: Option<Box<dyn FnOnce() + Send>>) {
        let name = packet.name;
        if let Err(err) = self.emit(packet, on_sent) {
            warn!(packet = name, %err, "dropped outgoing packet");
        }
    }
}

/// A connected protocol client.
///
/// Owns the connection workers, the phase and compression state, and the
/// handler registry. Construction connects the socket and installs the
/// default handlers; [`login`](Self::login) runs the handshake script.
pub struct Client {
    address: String,
    port: u16,
    phase: Arc<Mutex<Phase>>,
    compression: Arc<Mutex<Compression>>,
    handlers: Arc<Mutex<HandlerRegistry>>,
    emitter: Emitter,
    connection: Connection,
}

impl Client {
    /// Connects to a server and starts the connection workers.
    ///
    /// The connection begins in the Handshake phase with compression
    /// disabled. Default handlers for compression negotiation, the login
    /// and configuration handshakes, keep-alives, teleport confirmation,
    /// and disconnects are installed before any packet can arrive.
    pub fn connect(address: &str, port: u16) -> ClientResult<Self> {
        let stream = TcpStream::connect((address, port))?;
        info!(address, port, "connected");

        let phase = Arc::new(Mutex::new(Phase::Handshake));
        let compression = Arc::new(Mutex::new(Compression::Disabled));
        let handlers = Arc::new(Mutex::new(HandlerRegistry::new()));
        let stop = Arc::new(AtomicBool::new(false));

        let connection = {
            let phase = phase.clone();
            let handlers = handlers.clone();
            Connection::start(
                stream,
                compression.clone(),
                Limits::default(),
                stop,
                move |payload| {
                    let current = *phase.lock().unwrap();
                    let packet = decode_payload(protocol::registry(), current, &payload);
                    match &packet {
                        Packet::Known(known) => {
                            debug!(bytes = payload.len(), "C <- S {}", known.name);
                        }
                        Packet::Unknown(unknown) => {
                            debug!(
                                id = format_args!("{:#04x}", unknown.id),
                                bytes = payload.len(),
                                "C <- S unknown packet"
                            );
                        }
                    }
                    handler::dispatch(&handlers, &packet);
                },
            )?
        };

        let emitter = Emitter {
            handle: connection.handle(),
            compression: compression.clone(),
        };

        let client = Self {
            address: address.to_owned(),
            port,
            phase,
            compression,
            handlers,
            emitter,
            connection,
        };
        client.install_default_handlers();
        Ok(client)
    }

    /// Emits the Handshake and LoginStart packets.
    ///
    /// The LoginStart completion publishes the Login phase once the bytes
    /// are on the socket, so the server's first response decodes against
    /// the Login tables. The UUID is derived from the name with the
    /// offline-mode scheme.
    pub fn login(&self, name: &str) -> ClientResult<()> {
        info!(name, "starting login");
        self.emitter.emit(
            protocol::handshake(&self.address, self.port, NextState::Login),
            None,
        )?;
        let phase = self.phase.clone();
        self.emitter.emit(
            protocol::login_start(name, offline_uuid(name)),
            Some(Box::new(move || {
                *phase.lock().unwrap() = Phase::Login;
            })),
        )
    }

    /// Registers a handler with an invocation count (`-1` = unlimited).
    pub fn on(
        &self,
        key: PacketKey,
        callback: impl FnMut(&Packet) + Send + 'static,
        times: i32,
    ) {
        self.handlers
            .lock()
            .unwrap()
            .on(key, Box::new(callback), times);
    }

    /// Registers a one-shot handler.
    pub fn once(&self, key: PacketKey, callback: impl FnMut(&Packet) + Send + 'static) {
        self.on(key, callback, 1);
    }

    /// Registers a handler for packets with no matching schema.
    pub fn on_unknown(&self, callback: impl FnMut(&Packet) + Send + 'static) {
        self.on(PacketKey::Unknown, callback, UNLIMITED);
    }

    /// Encodes and queues a packet for delivery.
    pub fn emit(&self, packet: KnownPacket) -> ClientResult<()> {
        self.emitter.emit(packet, None)
    }

    /// Encodes and queues a packet with a completion callback.
    ///
    /// The callback runs on the send worker after the bytes reach the
    /// socket; it must not block.
    pub fn emit_with(
        &self,
        packet: KnownPacket,
        on_sent: impl FnOnce() + Send + 'static,
    ) -> ClientResult<()> {
        self.emitter.emit(packet, Some(Box::new(on_sent)))
    }

    /// Returns the current connection phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        *self.phase.lock().unwrap()
    }

    /// Returns the current compression state.
    #[must_use]
    pub fn compression(&self) -> Compression {
        *self.compression.lock().unwrap()
    }

    /// Returns `true` once the connection has stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.connection.is_stopped()
    }

    /// Blocks until the connection ends, then releases it.
    pub fn wait(self) {
        self.connection.join();
    }

    /// Stops the workers and closes the socket.
    pub fn shutdown(&mut self) {
        self.connection.shutdown();
    }

    fn install_default_handlers(&self) {
        let mut handlers = self.handlers.lock().unwrap();

        // Compression negotiation: applies to every frame after this one.
        {
            let compression = self.compression.clone();
            handlers.on(
                PacketKey::Known(Phase::Login, id::clientbound::login::SET_COMPRESSION),
                Box::new(move |packet| {
                    let Packet::Known(known) = packet else { return };
                    let Some(threshold) = known.field("Threshold").and_then(|v| v.as_i32())
                    else {
                        return;
                    };
                    if threshold >= 0 {
                        *compression.lock().unwrap() = Compression::Enabled { threshold };
                        info!(threshold, "compression enabled");
                    } else {
                        *compression.lock().unwrap() = Compression::Disabled;
                        info!("compression disabled by server");
                    }
                }),
                UNLIMITED,
            );
        }

        // Plugin requests on unknown channels are answered negatively so
        // the login can proceed.
        {
            let emitter = self.emitter.clone();
            handlers.on(
                PacketKey::Known(Phase::Login, id::clientbound::login::LOGIN_PLUGIN_REQUEST),
                Box::new(move |packet| {
                    let Packet::Known(known) = packet else { return };
                    let Some(message_id) = known.field("MessageID").and_then(|v| v.as_i32())
                    else {
                        return;
                    };
                    let channel = known
                        .field("Channel")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default();
                    debug!(channel, message_id, "refusing login plugin request");
                    emitter.emit_logged(
                        protocol::login_plugin_response(message_id, false, &[]),
                        None,
                    );
                }),
                UNLIMITED,
            );
        }

        // Encryption means an online-mode server; the session handshake is
        // not supported, so the connection ends here.
        {
            let handle = self.emitter.handle.clone();
            handlers.on(
                PacketKey::Known(Phase::Login, id::clientbound::login::ENCRYPTION_REQUEST),
                Box::new(move |_| {
                    warn!("server requires encryption (online mode), closing");
                    handle.stop();
                }),
                UNLIMITED,
            );
        }

        // Login success: acknowledge and enter the Configuration phase.
        // The phase changes before this handler returns so the next
        // received frame decodes against the Configuration tables.
        {
            let phase = self.phase.clone();
            let emitter = self.emitter.clone();
            handlers.on(
                PacketKey::Known(Phase::Login, id::clientbound::login::LOGIN_SUCCESS),
                Box::new(move |packet| {
                    let Packet::Known(known) = packet else { return };
                    let username = known
                        .field("Username")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_owned();
                    *phase.lock().unwrap() = Phase::Configuration;
                    info!(%username, "login succeeded, entering configuration");
                    emitter.emit_logged(protocol::login_acknowledged(), None);
                }),
                UNLIMITED,
            );
        }

        // Configuration finished: acknowledge and enter Play.
        {
            let phase = self.phase.clone();
            let emitter = self.emitter.clone();
            handlers.on(
                PacketKey::Known(
                    Phase::Configuration,
                    id::clientbound::configuration::FINISH_CONFIGURATION,
                ),
                Box::new(move |_| {
                    *phase.lock().unwrap() = Phase::Play;
                    info!("configuration finished, entering play");
                    emitter.emit_logged(protocol::finish_configuration(), None);
                }),
                UNLIMITED,
            );
        }

        // Keep-alive echoes, both phases that carry them.
        {
            let emitter = self.emitter.clone();
            handlers.on(
                PacketKey::Known(
                    Phase::Configuration,
                    id::clientbound::configuration::KEEP_ALIVE,
                ),
                Box::new(move |packet| {
                    let Packet::Known(known) = packet else { return };
                    if let Some(keep_alive_id) =
                        known.field("KeepAliveID").and_then(|v| v.as_i64())
                    {
                        emitter.emit_logged(
                            protocol::configuration_keep_alive(keep_alive_id),
                            None,
                        );
                    }
                }),
                UNLIMITED,
            );
        }
        {
            let emitter = self.emitter.clone();
            handlers.on(
                PacketKey::Known(Phase::Play, id::clientbound::play::KEEP_ALIVE),
                Box::new(move |packet| {
                    let Packet::Known(known) = packet else { return };
                    if let Some(keep_alive_id) =
                        known.field("KeepAliveID").and_then(|v| v.as_i64())
                    {
                        emitter.emit_logged(protocol::keep_alive(keep_alive_id), None);
                    }
                }),
                UNLIMITED,
            );
        }

        // Configuration ping → pong.
        {
            let emitter = self.emitter.clone();
            handlers.on(
                PacketKey::Known(Phase::Configuration, id::clientbound::configuration::PING),
                Box::new(move |packet| {
                    let Packet::Known(known) = packet else { return };
                    if let Some(ping_id) = known.field("ID").and_then(|v| v.as_i32()) {
                        emitter.emit_logged(protocol::configuration_pong(ping_id), None);
                    }
                }),
                UNLIMITED,
            );
        }

        // Teleport acknowledgement.
        {
            let emitter = self.emitter.clone();
            handlers.on(
                PacketKey::Known(
                    Phase::Play,
                    id::clientbound::play::SYNCHRONIZE_PLAYER_POSITION,
                ),
                Box::new(move |packet| {
                    let Packet::Known(known) = packet else { return };
                    if let Some(teleport_id) =
                        known.field("TeleportID").and_then(|v| v.as_i32())
                    {
                        emitter.emit_logged(protocol::teleport_confirm(teleport_id), None);
                    }
                }),
                UNLIMITED,
            );
        }

        // Disconnects are terminal in every phase that defines them.
        for key in [
            PacketKey::Known(Phase::Login, id::clientbound::login::DISCONNECT),
            PacketKey::Known(
                Phase::Configuration,
                id::clientbound::configuration::DISCONNECT,
            ),
            PacketKey::Known(Phase::Play, id::clientbound::play::DISCONNECT),
        ] {
            let handle = self.emitter.handle.clone();
            handlers.on(
                key,
                Box::new(move |packet| {
                    let Packet::Known(known) = packet else { return };
                    let reason = known
                        .field("Reason")
                        .and_then(|v| v.as_str())
                        .unwrap_or_default();
                    warn!(reason, "disconnected by server");
                    handle.stop();
                }),
                UNLIMITED,
            );
        }
    }
}
