//! CLI argument definitions using clap.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use smart_remote_core::DeviceKind;

/// SmartRemote - control network TVs, with an IR bridge as fallback
#[derive(Parser, Debug)]
#[command(name = "smart-remote")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// SSDP discovery window in milliseconds
    #[arg(long, global = true, env = "SMART_REMOTE_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// IR bridge address (host or host:port)
    #[arg(long, global = true, env = "SMART_REMOTE_BRIDGE")]
    pub bridge: Option<String>,

    /// Extra /24 prefix to sweep for bridges, e.g. 192.168.0 (repeatable)
    #[arg(long = "subnet", global = true)]
    pub subnets: Vec<String>,

    /// Directory holding config.json and the last device
    #[arg(long, global = true, env = "SMART_REMOTE_DATA_DIR", hide = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find TVs and IR bridges on the network
    Discover(DiscoverArgs),

    /// Connect to a device and remember it
    Connect(ConnectArgs),

    /// Send one or more keys to the last connected device
    Key(KeyArgs),

    /// Launch an app by id
    Launch(LaunchArgs),

    /// Turn the TV on (wake-on-LAN and IR)
    PowerOn,

    /// Turn the TV off through the active channel
    PowerOff,

    /// IR bridge tools
    Bridge(BridgeArgs),

    /// List logical keys and their codes
    Keys(KeysArgs),

    /// Show network, device and bridge status
    Status,

    /// Send a key after a delay (sleep timer)
    Schedule(ScheduleArgs),

    /// Local configuration
    Config(ConfigArgs),
}

// ==================== Discover ====================

#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Connect to the first TV found
    #[arg(long)]
    pub connect: bool,
}

// ==================== Connect ====================

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    /// TV with a network control API
    Tv,
    /// Other smart set, driven through the IR bridge
    Generic,
    /// The IR bridge itself
    Bridge,
}

impl From<KindArg> for DeviceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Tv => DeviceKind::NetworkTv,
            KindArg::Generic => DeviceKind::GenericSmartDevice,
            KindArg::Bridge => DeviceKind::InfraredBridge,
        }
    }
}

#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Device IP address
    pub ip: IpAddr,

    /// What kind of device this is
    #[arg(long, value_enum, default_value = "tv")]
    pub kind: KindArg,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,
}

// ==================== Key / Launch ====================

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Logical keys, e.g. power vol_up home
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Pause between keys in milliseconds
    #[arg(long, default_value = "250")]
    pub delay: u64,
}

#[derive(Args, Debug)]
pub struct LaunchArgs {
    /// App id (e.g. 12 for Netflix on ECP)
    pub app_id: String,
}

// ==================== Bridge ====================

#[derive(Args, Debug)]
pub struct BridgeArgs {
    #[command(subcommand)]
    pub command: BridgeCommands,
}

#[derive(Subcommand, Debug)]
pub enum BridgeCommands {
    /// Check the configured bridge, scanning the subnet if it is gone
    Locate {
        /// Save the located address to the config file
        #[arg(long)]
        save: bool,
    },

    /// Send one heartbeat to a bridge address
    Test {
        /// host or host:port (default: configured bridge)
        address: Option<String>,
    },
}

// ==================== Keys ====================

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelArg {
    Network,
    Infrared,
}

#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Only show keys mapped for this channel
    #[arg(long, value_enum)]
    pub channel: Option<ChannelArg>,
}

// ==================== Schedule ====================

/// Longest accepted sleep timer: one day.
pub const MAX_SCHEDULE_MINUTES: u64 = 24 * 60;

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Delay in minutes (1-1440)
    #[arg(value_parser = clap::value_parser!(u64).range(1..=MAX_SCHEDULE_MINUTES))]
    pub minutes: u64,

    /// Key to send when the timer fires
    #[arg(long, default_value = "power")]
    pub key: String,
}

// ==================== Config ====================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Set the IR bridge address
    SetBridge {
        /// host or host:port
        address: String,
    },

    /// Add a fallback /24 prefix for bridge scans
    AddSubnet {
        /// e.g. 192.168.0 or 192.168.0.0/24
        prefix: String,
    },

    /// Remove all fallback prefixes
    ClearSubnets,
}
