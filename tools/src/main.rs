use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mcproto_tools::{format_packet, parse_address, parse_hex};
use mctype::{read_varint, ByteReader};
use schema::{Direction, Phase};
use tracing_subscriber::EnvFilter;
use wire::{Compression, FrameBuffer, Limits};

#[derive(Parser)]
#[command(
    name = "mcproto-tools",
    version,
    about = "Minecraft protocol tools: status ping, login flow, frame decoding"
)]
struct Cli {
    /// Log packet traffic and worker activity.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Query a server's status (server list ping).
    Status {
        /// Server address as `host` or `host:port`.
        #[arg(default_value = "127.0.0.1:25565")]
        address: String,
        /// Print the raw status JSON instead of a summary.
        #[arg(long)]
        json: bool,
        /// Give up after this many seconds.
        #[arg(long, default_value_t = 5)]
        timeout: u64,
    },
    /// Log into a server and answer keep-alives until disconnected.
    Login {
        /// Server address as `host` or `host:port`.
        #[arg(default_value = "127.0.0.1:25565")]
        address: String,
        /// Player name; the offline UUID is derived from it.
        #[arg(long, default_value = "edocsitahw")]
        name: String,
    },
    /// Decode a hex-encoded frame against the packet tables.
    Decode {
        /// Frame bytes as hex (`\xNN`, `0xNN`, and whitespace accepted).
        hex: String,
        /// Phase whose id namespace applies.
        #[arg(long, value_enum, default_value_t = PhaseArg::Play)]
        phase: PhaseArg,
        /// Direction the frame traveled.
        #[arg(long, value_enum, default_value_t = DirectionArg::Clientbound)]
        direction: DirectionArg,
        /// Decode with the compressed frame shape, as negotiated with
        /// this threshold.
        #[arg(long)]
        compression_threshold: Option<i32>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PhaseArg {
    Handshake,
    Status,
    Login,
    Configuration,
    Play,
}

impl From<PhaseArg> for Phase {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::Handshake => Self::Handshake,
            PhaseArg::Status => Self::Status,
            PhaseArg::Login => Self::Login,
            PhaseArg::Configuration => Self::Configuration,
            PhaseArg::Play => Self::Play,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionArg {
    Clientbound,
    Serverbound,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Command::Status {
            address,
            json,
            timeout,
        } => {
            let (host, port) = parse_address(&address).map_err(anyhow::Error::msg)?;
            let status = client::server_status(&host, port, Duration::from_secs(timeout))
                .with_context(|| format!("status ping to {host}:{port}"))?;

            if json {
                println!("{}", status.json);
                return Ok(());
            }

            match status.info() {
                Ok(info) => {
                    println!("version: {} (protocol {})", info.version.name, info.version.protocol);
                    if let Some(players) = info.players {
                        println!("players: {}/{}", players.online, players.max);
                    }
                    println!("description: {}", describe(&info.description));
                }
                Err(err) => {
                    println!("unconventional status document ({err})");
                    println!("{}", status.json);
                }
            }
            println!("latency: {:?}", status.latency);
        }
        Command::Login { address, name } => {
            let (host, port) = parse_address(&address).map_err(anyhow::Error::msg)?;
            let mc = client::Client::connect(&host, port)
                .with_context(|| format!("connect to {host}:{port}"))?;
            mc.on_unknown(|packet| {
                tracing::debug!("{}", format_packet(packet).trim_end());
            });
            mc.login(&name).context("login")?;
            mc.wait();
            println!("connection closed");
        }
        Command::Decode {
            hex,
            phase,
            direction,
            compression_threshold,
        } => {
            let bytes = parse_hex(&hex).map_err(anyhow::Error::msg)?;
            let compression = match compression_threshold {
                Some(threshold) => Compression::Enabled { threshold },
                None => Compression::Disabled,
            };

            let mut frames = FrameBuffer::new();
            frames.push(&bytes);
            let mut decoded_any = false;
            while let Some(payload) = frames
                .next_frame(compression, &Limits::default())
                .context("unframe")?
            {
                decoded_any = true;
                let packet = decode_payload_for(direction, phase.into(), &payload);
                print!("{}", format_packet(&packet));
            }
            if !decoded_any {
                bail!("input does not contain a complete frame");
            }
            if !frames.is_empty() {
                println!("({} trailing bytes not part of a frame)", frames.len());
            }
        }
    }
    Ok(())
}

fn decode_payload_for(direction: DirectionArg, phase: Phase, payload: &[u8]) -> codec::Packet {
    match direction {
        DirectionArg::Clientbound => client::decode_payload(protocol::registry(), phase, payload),
        DirectionArg::Serverbound => {
            let mut reader = ByteReader::new(payload);
            let Ok(id) = read_varint(&mut reader) else {
                return codec::Packet::Unknown(codec::UnknownPacket {
                    id: -1,
                    data: payload.to_vec(),
                });
            };
            match protocol::registry()
                .get(Direction::Serverbound, phase, id)
                .map(|schema| codec::decode_packet(schema, payload))
            {
                Some(Ok(decoded)) => codec::Packet::Known(decoded.packet),
                _ => codec::Packet::Unknown(codec::UnknownPacket {
                    id,
                    data: reader.take_rest().to_vec(),
                }),
            }
        }
    }
}

fn describe(description: &serde_json::Value) -> String {
    match description {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Object(map) => map
            .get("text")
            .and_then(|value| value.as_str())
            .unwrap_or_default()
            .to_owned(),
        _ => String::new(),
    }
}
