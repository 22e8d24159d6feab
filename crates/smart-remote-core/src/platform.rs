//! Host-facing collaborators: user notifications and the network query.

use std::net::IpAddr;

use crate::network::local_ipv4;
use crate::types::{ConnectivityStatus, NetworkStatus};

/// Environment variable naming the current Wi-Fi network.
pub const SSID_ENV: &str = "SMART_REMOTE_SSID";

const UNKNOWN_NETWORK: &str = "Unknown";

/// Surfaces terminal failures to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Reports which network the host is on.
pub trait NetworkInfo: Send + Sync {
    fn status(&self) -> NetworkStatus;
}

/// Network query backed by the routing table.
///
/// The network name can't be read portably, so it comes from
/// `SMART_REMOTE_SSID` when set.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalNetworkInfo;

impl NetworkInfo for LocalNetworkInfo {
    fn status(&self) -> NetworkStatus {
        let network_name =
            std::env::var(SSID_ENV).unwrap_or_else(|_| UNKNOWN_NETWORK.to_string());

        match local_ipv4() {
            Ok(ip) => NetworkStatus {
                network_name,
                local_address: Some(IpAddr::V4(ip)),
                status: ConnectivityStatus::Connected,
            },
            Err(e) => {
                tracing::debug!("No local address: {}", e);
                NetworkStatus {
                    network_name,
                    local_address: None,
                    status: ConnectivityStatus::Disconnected,
                }
            }
        }
    }
}
