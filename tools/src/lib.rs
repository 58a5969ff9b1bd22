//! Helpers behind the `mcproto-tools` CLI.

use codec::Packet;

/// Splits `host:port`, defaulting the port.
///
/// # Errors
///
/// Returns a message for an unparseable port.
pub fn parse_address(input: &str) -> Result<(String, u16), String> {
    match input.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| format!("invalid port {port:?}"))?;
            Ok((host.to_owned(), port))
        }
        None => Ok((input.to_owned(), protocol::DEFAULT_PORT)),
    }
}

/// Parses hex input into bytes.
///
/// Accepts plain hex digits with optional whitespace and `\x` or `0x`
/// separators, so captured dumps paste straight in.
///
/// # Errors
///
/// Returns a message for stray characters or an odd digit count.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let cleaned: String = input
        .replace("\\x", "")
        .replace("0x", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    if let Some(bad) = cleaned.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(format!("unexpected character {bad:?}"));
    }
    if cleaned.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", cleaned.len()));
    }
    cleaned
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).unwrap();
            u8::from_str_radix(text, 16).map_err(|_| format!("invalid hex byte {text:?}"))
        })
        .collect()
}

/// Renders a decoded packet for terminal output.
#[must_use]
pub fn format_packet(packet: &Packet) -> String {
    match packet {
        Packet::Known(known) => {
            let mut out = format!(
                "{} ({:?}, id {:#04x})\n",
                known.name, known.phase, known.id
            );
            for (name, value) in &known.fields {
                out.push_str(&format!("  {name}: {value}\n"));
            }
            out
        }
        Packet::Unknown(unknown) => {
            let mut out = format!("unknown packet (id {:#04x})\n  data:", unknown.id);
            for byte in &unknown.data {
                out.push_str(&format!(" {byte:02x}"));
            }
            out.push('\n');
            out
        }
    }
}
