//! Local network helpers: outbound address detection, reachability checks
//! and wake-on-LAN.

pub mod wol;

use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::error::DiscoveryError;

/// Public address used only to pick the outbound route; nothing is sent.
const ROUTE_PROBE_ADDR: &str = "8.8.8.8:80";

/// Local IPv4 address of the interface that routes to the internet.
///
/// Connecting a UDP socket sends no packets; it only makes the OS pick a
/// source address.
pub fn local_ipv4() -> Result<Ipv4Addr, DiscoveryError> {
    let socket = UdpSocket::bind("0.0.0.0:0")
        .map_err(|e| DiscoveryError::LocalAddress(e.to_string()))?;
    socket
        .connect(ROUTE_PROBE_ADDR)
        .map_err(|e| DiscoveryError::LocalAddress(e.to_string()))?;

    match socket
        .local_addr()
        .map_err(|e| DiscoveryError::LocalAddress(e.to_string()))?
    {
        SocketAddr::V4(addr) if !addr.ip().is_unspecified() => Ok(*addr.ip()),
        other => Err(DiscoveryError::LocalAddress(format!(
            "no usable IPv4 route (got {})",
            other.ip()
        ))),
    }
}

/// Whether a TCP connection to `ip:port` opens within `limit`.
pub async fn check_reachability(ip: IpAddr, port: u16, limit: Duration) -> bool {
    matches!(
        timeout(limit, TcpStream::connect((ip, port))).await,
        Ok(Ok(_))
    )
}
