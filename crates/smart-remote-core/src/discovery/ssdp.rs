//! SSDP scanner for network TVs and other smart devices.
//!
//! Sends one `M-SEARCH` per search target, then listens until the deadline.
//! Friendly names are fetched concurrently while listening; a fetch that has
//! not finished one poll interval after the deadline is abandoned and the
//! device keeps its generic label.

use std::collections::HashSet;
use std::net::IpAddr;
use std::time::Duration;

use reqwest::Client;
use tokio::net::UdpSocket;
use tokio::task::JoinSet;
use tokio::time::{timeout, Instant};
use tracing::{debug, error, info};

use super::service::create_search_socket;
use crate::device::http::{build_client, get_text};
use crate::error::{DeviceError, DiscoveryError};
use crate::protocol::response::friendly_name;
use crate::protocol::ssdp::{classify, multicast_target, parse_headers, search_request, SEARCH_TARGETS};
use crate::types::DeviceDescriptor;

/// Receive poll; the scan overshoots its timeout by at most this much.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Timeout for the friendly-name fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(1);

const RECV_BUFFER: usize = 2048;

pub struct SsdpScanner {
    client: Client,
}

impl SsdpScanner {
    pub fn new() -> Result<Self, DeviceError> {
        Ok(Self {
            client: build_client()?,
        })
    }

    /// Search and collect replies for `window`.
    ///
    /// Socket failures end the scan early with whatever was collected.
    pub async fn discover(&self, window: Duration) -> Vec<DeviceDescriptor> {
        let socket = match create_search_socket().and_then(UdpSocket::from_std) {
            Ok(socket) => socket,
            Err(e) => {
                error!("{}", DiscoveryError::Socket(e));
                return Vec::new();
            }
        };

        for target in SEARCH_TARGETS {
            let request = search_request(target);
            if let Err(e) = socket.send_to(request.as_bytes(), multicast_target()).await {
                error!("{}", DiscoveryError::Send(e));
                return Vec::new();
            }
        }

        self.collect(&socket, window).await
    }

    /// Listen on `socket` until `window` elapses, classifying each reply.
    pub async fn collect(&self, socket: &UdpSocket, window: Duration) -> Vec<DeviceDescriptor> {
        let deadline = Instant::now() + window;
        let mut devices: Vec<DeviceDescriptor> = Vec::new();
        let mut seen: HashSet<IpAddr> = HashSet::new();
        let mut lookups: JoinSet<(usize, Option<String>)> = JoinSet::new();
        let mut buf = vec![0u8; RECV_BUFFER];

        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let wait = POLL_INTERVAL.min(deadline - now);

            match timeout(wait, socket.recv_from(&mut buf)).await {
                Ok(Ok((len, addr))) => {
                    let ip = addr.ip();
                    if seen.contains(&ip) {
                        continue;
                    }

                    let reply = String::from_utf8_lossy(&buf[..len]);
                    let headers = parse_headers(&reply);
                    let Some(signature) = classify(&headers) else {
                        debug!("Unclassified SSDP reply from {}", ip);
                        continue;
                    };
                    seen.insert(ip);

                    let Some(kind) = signature.kind() else {
                        debug!("Skipping IR bridge SSDP reply from {}", ip);
                        continue;
                    };

                    let index = devices.len();
                    devices.push(DeviceDescriptor::new(
                        ip,
                        signature.fallback_name(&ip.to_string()),
                        kind,
                    ));
                    info!("Discovered {} at {}", kind, ip);

                    if let Some(location) = headers.get("location").cloned() {
                        let client = self.client.clone();
                        let host = ip.to_string();
                        lookups.spawn(async move {
                            (index, fetch_friendly_name(&client, &location, &host).await)
                        });
                    }
                }
                Ok(Err(e)) => {
                    error!("SSDP receive error: {}", e);
                    break;
                }
                Err(_) => {
                    // Poll interval elapsed
                }
            }
        }

        let _ = timeout(POLL_INTERVAL, async {
            while let Some(joined) = lookups.join_next().await {
                if let Ok((index, Some(name))) = joined {
                    devices[index].name = name;
                }
            }
        })
        .await;

        devices
    }
}

/// Fetch a device description and pull a friendly name out of it.
pub async fn fetch_friendly_name(client: &Client, location: &str, ip: &str) -> Option<String> {
    match get_text(client, location, ip, FETCH_TIMEOUT).await {
        Ok(body) => friendly_name(&body),
        Err(e) => {
            debug!("Description fetch from {} failed: {}", location, e);
            None
        }
    }
}
