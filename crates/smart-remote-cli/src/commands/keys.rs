//! Keys command: print the registries.

use smart_remote_core::protocol::keymap::{infrared_code, network_key, REMOTE_KEYS};

use crate::cli::{ChannelArg, KeysArgs};
use crate::context::Context;
use crate::error::CliError;
use crate::output::{get_formatter, KeyRow};

/// Run the keys command
pub fn run_keys(args: KeysArgs, ctx: &Context) -> Result<(), CliError> {
    let formatter = get_formatter(ctx.json);
    println!("{}", formatter.format_keys(&key_rows(args.channel)));
    Ok(())
}

fn key_rows(channel: Option<ChannelArg>) -> Vec<KeyRow> {
    REMOTE_KEYS
        .iter()
        .map(|&key| KeyRow {
            key,
            network: network_key(key),
            infrared: infrared_code(key),
        })
        .filter(|row| match channel {
            Some(ChannelArg::Network) => row.network.is_some(),
            Some(ChannelArg::Infrared) => row.infrared.is_some(),
            None => true,
        })
        .collect()
}
