//! Command implementations.

pub mod bridge;
pub mod config;
pub mod connect;
pub mod discover;
pub mod keys;
pub mod power;
pub mod remote;
pub mod schedule;
pub mod status;

pub use bridge::run_bridge;
pub use config::run_config;
pub use connect::run_connect;
pub use discover::run_discover;
pub use keys::run_keys;
pub use power::{run_power_off, run_power_on};
pub use remote::{run_key, run_launch};
pub use schedule::run_schedule;
pub use status::run_status;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner on stderr; hidden in JSON mode.
pub(crate) fn spinner(message: impl Into<String>, json: bool) -> ProgressBar {
    if json {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
