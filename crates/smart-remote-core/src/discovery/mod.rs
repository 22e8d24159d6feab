//! Device discovery.
//!
//! SSDP finds TVs and other smart devices; the subnet sweep finds IR bridges,
//! which don't speak SSDP reliably.

pub mod service;
pub mod ssdp;
pub mod subnet;

pub use service::{DiscoveryReport, DiscoveryService};
pub use ssdp::SsdpScanner;
pub use subnet::{HeartbeatProbe, HttpHeartbeatProbe, SubnetPrefix, SubnetScanner};
