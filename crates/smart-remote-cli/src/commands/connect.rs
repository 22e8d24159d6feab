//! Connect command implementation.

use smart_remote_core::{DeviceDescriptor, DeviceKind};

use crate::cli::ConnectArgs;
use crate::context::Context;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the connect command
pub async fn run_connect(args: ConnectArgs, ctx: &Context) -> Result<(), CliError> {
    let formatter = get_formatter(ctx.json);
    let session = ctx.session()?;

    let descriptor = descriptor_for(&args);
    let ok = session.connect(&descriptor).await;

    let name = session
        .current_device()
        .await
        .filter(|_| ok)
        .map(|d| d.name)
        .unwrap_or_else(|| descriptor.name.clone());
    println!("{}", formatter.format_action("connect", &name, ok));

    if ok {
        Ok(())
    } else {
        Err(CliError::CommandFailed(format!("connect to {}", args.ip)))
    }
}

fn descriptor_for(args: &ConnectArgs) -> DeviceDescriptor {
    let kind = DeviceKind::from(args.kind);
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| format!("{} ({})", kind.display_name(), args.ip));
    DeviceDescriptor::new(args.ip, name, kind)
}
