//! Schedule command: send a key after a delay.

use std::time::Duration;

use super::remote::restored_session;
use super::spinner;
use crate::cli::ScheduleArgs;
use crate::context::Context;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the schedule command. Blocks until the timer fires or Ctrl+C.
pub async fn run_schedule(args: ScheduleArgs, ctx: &Context) -> Result<(), CliError> {
    let formatter = get_formatter(ctx.json);
    let (session, target) = restored_session(ctx).await?;

    let seconds = args.minutes.checked_mul(60).ok_or_else(|| {
        CliError::InvalidArgument(format!("delay of {} minutes is too long", args.minutes))
    })?;
    let delay = Duration::from_secs(seconds);
    let handle = session.schedule(delay, args.key.clone());
    let pb = spinner(
        format!(
            "Sending '{}' to {} in {} minute(s), Ctrl+C to cancel",
            args.key, target, args.minutes
        ),
        ctx.json,
    );

    let ok = tokio::select! {
        joined = handle => joined.map_err(|e| CliError::Other(format!("Timer task failed: {}", e)))?,
        _ = tokio::signal::ctrl_c() => {
            pb.finish_and_clear();
            println!("{}", formatter.format_message("Timer cancelled"));
            return Ok(());
        }
    };
    pb.finish_and_clear();

    println!(
        "{}",
        formatter.format_action(&format!("key {}", args.key), &target, ok)
    );
    if ok {
        Ok(())
    } else {
        Err(CliError::CommandFailed(format!("key {}", args.key)))
    }
}
