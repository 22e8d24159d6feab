//! Subnet sweep for IR bridges.
//!
//! Every host `.1`-`.254` of each candidate /24 gets one heartbeat probe.
//! Probes run concurrently up to a configured limit; results are merged by a
//! single consumer so each address appears at most once.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{debug, error, info};

use crate::config::RemoteConfig;
use crate::device::http::{build_client, get_heartbeat};
use crate::error::{DeviceError, DiscoveryError};
use crate::network::local_ipv4;
use crate::protocol::commands::BridgeCommands;
use crate::protocol::response::is_heartbeat;
use crate::types::{DeviceDescriptor, DeviceKind};

/// First three octets of an IPv4 /24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubnetPrefix([u8; 3]);

impl SubnetPrefix {
    pub fn of(ip: Ipv4Addr) -> Self {
        let [a, b, c, _] = ip.octets();
        Self([a, b, c])
    }

    pub fn host(&self, last: u8) -> Ipv4Addr {
        let [a, b, c] = self.0;
        Ipv4Addr::new(a, b, c, last)
    }

    /// Usable host addresses, `.1` through `.254`.
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        (1..=254u8).map(move |last| self.host(last))
    }
}

impl fmt::Display for SubnetPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{}.{}.{}", a, b, c)
    }
}

/// Accepts `192.168.1`, `192.168.1.`, `192.168.1.0` and `192.168.1.0/24`.
impl FromStr for SubnetPrefix {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DiscoveryError::InvalidPrefix(s.to_string());

        let trimmed = s.trim();
        let body = match trimmed.split_once('/') {
            Some((addr, "24")) => addr,
            Some(_) => return Err(invalid()),
            None => trimmed,
        };
        let body = body.strip_suffix('.').unwrap_or(body);

        let octets: Vec<&str> = body.split('.').collect();
        if octets.len() != 3 && octets.len() != 4 {
            return Err(invalid());
        }

        let mut parsed = [0u8; 4];
        for (slot, part) in parsed.iter_mut().zip(&octets) {
            *slot = part.parse().map_err(|_| invalid())?;
        }

        Ok(Self([parsed[0], parsed[1], parsed[2]]))
    }
}

/// One heartbeat check against a candidate address.
#[async_trait]
pub trait HeartbeatProbe: Send + Sync {
    async fn probe(&self, ip: Ipv4Addr) -> bool;
}

/// Probes `GET /ping` and looks for the heartbeat token in the body.
pub struct HttpHeartbeatProbe {
    client: Client,
    port: u16,
    timeout: Duration,
}

impl HttpHeartbeatProbe {
    pub fn new(port: u16, timeout: Duration) -> Result<Self, DeviceError> {
        Ok(Self {
            client: build_client()?,
            port,
            timeout,
        })
    }

    fn addr(&self, ip: Ipv4Addr) -> String {
        if self.port == 80 {
            ip.to_string()
        } else {
            format!("{}:{}", ip, self.port)
        }
    }
}

#[async_trait]
impl HeartbeatProbe for HttpHeartbeatProbe {
    async fn probe(&self, ip: Ipv4Addr) -> bool {
        let addr = self.addr(ip);
        let url = BridgeCommands::ping(&addr);
        match get_heartbeat(&self.client, &url, &addr, self.timeout).await {
            Ok(body) => is_heartbeat(&body),
            Err(_) => false,
        }
    }
}

pub struct SubnetScanner {
    probe: Box<dyn HeartbeatProbe>,
    concurrency: usize,
    fallback_prefixes: Vec<SubnetPrefix>,
}

impl SubnetScanner {
    pub fn new(probe: Box<dyn HeartbeatProbe>, concurrency: usize) -> Self {
        Self {
            probe,
            concurrency: concurrency.max(1),
            fallback_prefixes: Vec::new(),
        }
    }

    /// Scanner using HTTP heartbeats with the configured port, timeout,
    /// concurrency and fallback prefixes.
    pub fn from_config(config: &RemoteConfig) -> Result<Self, DeviceError> {
        let probe = HttpHeartbeatProbe::new(config.heartbeat_port, config.probe_timeout())?;
        Ok(Self::new(Box::new(probe), config.probe_concurrency)
            .with_fallback_prefixes(config.prefixes()))
    }

    pub fn with_fallback_prefixes(mut self, prefixes: Vec<SubnetPrefix>) -> Self {
        self.fallback_prefixes = prefixes;
        self
    }

    /// Scan the local /24 plus the fallback prefixes.
    ///
    /// If the local address can't be determined the error is logged and
    /// nothing is scanned.
    pub async fn discover(&self) -> Vec<DeviceDescriptor> {
        let local = match local_ipv4() {
            Ok(ip) => ip,
            Err(e) => {
                error!("Subnet scan aborted: {}", e);
                return Vec::new();
            }
        };

        let mut prefixes = vec![SubnetPrefix::of(local)];
        prefixes.extend(self.fallback_prefixes.iter().copied());
        self.scan(&prefixes, Some(local)).await
    }

    /// Probe every host of `prefixes`, skipping `exclude`.
    pub async fn scan(
        &self,
        prefixes: &[SubnetPrefix],
        exclude: Option<Ipv4Addr>,
    ) -> Vec<DeviceDescriptor> {
        let unique: BTreeSet<SubnetPrefix> = prefixes.iter().copied().collect();
        let candidates: Vec<Ipv4Addr> = unique
            .iter()
            .flat_map(|prefix| prefix.hosts())
            .filter(|ip| Some(*ip) != exclude)
            .collect();

        info!(
            "Probing {} hosts across {} subnet(s)",
            candidates.len(),
            unique.len()
        );

        let probe = &self.probe;
        let mut results = stream::iter(candidates)
            .map(|ip| async move { (ip, probe.probe(ip).await) })
            .buffer_unordered(self.concurrency);

        let mut found: BTreeMap<Ipv4Addr, DeviceDescriptor> = BTreeMap::new();
        while let Some((ip, alive)) = results.next().await {
            if !alive || found.contains_key(&ip) {
                continue;
            }
            debug!("Heartbeat from {}", ip);
            found.insert(
                ip,
                DeviceDescriptor::new(
                    IpAddr::V4(ip),
                    format!("IR Bridge ({})", ip),
                    DeviceKind::InfraredBridge,
                ),
            );
        }

        found.into_values().collect()
    }
}
