//! Wake-on-LAN magic packets.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::OnceLock;

use regex::Regex;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tracing::info;

use crate::error::WakeError;

/// Discard port conventionally used for magic packets.
pub const WOL_PORT: u16 = 9;

/// 6 sync bytes + 16 repetitions of the 6-byte address.
pub const MAGIC_PACKET_LEN: usize = 6 + 16 * 6;

fn hex_mac_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9A-Fa-f]{12}$").unwrap())
}

/// Parse `AA:BB:CC:DD:EE:FF`, `AA-BB-...` or `AABBCCDDEEFF` into bytes.
pub fn parse_mac(raw: &str) -> Result<[u8; 6], WakeError> {
    let hex: String = raw.trim().chars().filter(|c| *c != ':' && *c != '-').collect();

    if !hex_mac_regex().is_match(&hex) {
        return Err(WakeError::InvalidMac(raw.to_string()));
    }

    let mut mac = [0u8; 6];
    for (i, byte) in mac.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| WakeError::InvalidMac(raw.to_string()))?;
    }
    Ok(mac)
}

/// Encode the magic packet for `mac`.
pub fn magic_packet(mac: &str) -> Result<[u8; MAGIC_PACKET_LEN], WakeError> {
    let mac = parse_mac(mac)?;

    let mut packet = [0xFFu8; MAGIC_PACKET_LEN];
    for chunk in packet[6..].chunks_exact_mut(6) {
        chunk.copy_from_slice(&mac);
    }
    Ok(packet)
}

fn broadcast_socket() -> Result<UdpSocket, std::io::Error> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_broadcast(true)?;
    let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0));
    socket.bind(&addr.into())?;
    socket.set_nonblocking(true)?;

    UdpSocket::from_std(socket.into())
}

/// Limited broadcast on the discard port.
pub fn broadcast_target() -> SocketAddr {
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::BROADCAST, WOL_PORT))
}

/// Send a magic packet for `mac` to an explicit target.
///
/// The address is validated before any socket is opened.
pub async fn send_wake_to(mac: &str, target: SocketAddr) -> Result<(), WakeError> {
    let packet = magic_packet(mac)?;

    let socket = broadcast_socket()?;
    socket.send_to(&packet, target).await?;

    info!("Wake-on-LAN packet for {} sent to {}", mac, target);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_packet_layout() {
        let packet = magic_packet("AA:BB:CC:DD:EE:FF").unwrap();
        assert_eq!(packet.len(), 102);
        assert_eq!(&packet[..6], &[0xFF; 6]);
        for rep in packet[6..].chunks(6) {
            assert_eq!(rep, &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        }
        assert_eq!(packet[6..].chunks(6).count(), 16);
    }

    #[test]
    fn test_separator_styles_are_equivalent() {
        let colon = magic_packet("aa:bb:cc:dd:ee:ff").unwrap();
        let dash = magic_packet("AA-BB-CC-DD-EE-FF").unwrap();
        let bare = magic_packet("aabbccddeeff").unwrap();
        assert_eq!(colon, dash);
        assert_eq!(dash, bare);
    }

    #[test]
    fn test_invalid_macs_rejected() {
        for bad in ["", "AA:BB:CC:DD:EE", "AA:BB:CC:DD:EE:FF:00", "GG:BB:CC:DD:EE:FF", "AA BB CC DD EE FF"] {
            assert!(
                matches!(magic_packet(bad), Err(WakeError::InvalidMac(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[tokio::test]
    async fn test_send_wake_to_delivers_packet() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = receiver.local_addr().unwrap();

        send_wake_to("AA:BB:CC:DD:EE:FF", target).await.unwrap();

        let mut buf = [0u8; 256];
        let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
        assert_eq!(len, MAGIC_PACKET_LEN);
        assert_eq!(&buf[..len], &magic_packet("AA:BB:CC:DD:EE:FF").unwrap()[..]);
    }

    #[tokio::test]
    async fn test_send_wake_rejects_bad_mac_before_io() {
        let result = send_wake_to("not-a-mac", broadcast_target()).await;
        assert!(matches!(result, Err(WakeError::InvalidMac(_))));
    }
}
