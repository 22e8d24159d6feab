//! Combined discovery: SSDP for TVs and a subnet sweep for IR bridges, run
//! side by side.

use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use socket2::{Domain, Protocol, Socket, Type};
use tracing::info;

use super::ssdp::SsdpScanner;
use super::subnet::SubnetScanner;
use crate::config::RemoteConfig;
use crate::error::DeviceError;
use crate::types::DeviceDescriptor;

/// Multicast hop limit for search requests; SSDP never leaves the LAN.
const SEARCH_TTL: u32 = 2;

/// Create the non-blocking UDP socket SSDP searches go out on.
///
/// Bound to an ephemeral port so replies come back unicast to us.
pub fn create_search_socket() -> Result<std::net::UdpSocket, std::io::Error> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;

    socket.set_reuse_address(true)?;
    socket.set_multicast_ttl_v4(SEARCH_TTL)?;

    let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0));
    socket.bind(&addr.into())?;

    socket.set_nonblocking(true)?;

    Ok(socket.into())
}

/// Result of a full discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryReport {
    /// Devices that answered SSDP
    pub tvs: Vec<DeviceDescriptor>,
    /// Bridges that answered a heartbeat
    pub bridges: Vec<DeviceDescriptor>,
}

impl DiscoveryReport {
    /// All devices, one per address. TVs win over bridges on a clash.
    pub fn devices(&self) -> Vec<DeviceDescriptor> {
        let mut seen = HashSet::new();
        self.tvs
            .iter()
            .chain(&self.bridges)
            .filter(|d| seen.insert(d.ip))
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tvs.is_empty() && self.bridges.is_empty()
    }
}

pub struct DiscoveryService {
    ssdp: SsdpScanner,
    subnet: SubnetScanner,
    window: Duration,
}

impl DiscoveryService {
    pub fn new(ssdp: SsdpScanner, subnet: SubnetScanner, window: Duration) -> Self {
        Self {
            ssdp,
            subnet,
            window,
        }
    }

    pub fn from_config(config: &RemoteConfig) -> Result<Self, DeviceError> {
        Ok(Self::new(
            SsdpScanner::new()?,
            SubnetScanner::from_config(config)?,
            config.discovery_timeout(),
        ))
    }

    /// Run both scanners concurrently.
    pub async fn discover_all(&self) -> DiscoveryReport {
        let (tvs, bridges) = tokio::join!(self.ssdp.discover(self.window), self.subnet.discover());
        info!("Discovery found {} TV(s), {} bridge(s)", tvs.len(), bridges.len());
        DiscoveryReport { tvs, bridges }
    }

    pub async fn discover_bridges(&self) -> Vec<DeviceDescriptor> {
        self.subnet.discover().await
    }
}
