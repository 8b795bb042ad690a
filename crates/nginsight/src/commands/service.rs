//! Service command handlers.

use owo_colors::OwoColorize;

use nginsight_core::Session;
use nginsight_host::LocalHost;

use crate::cli::{Ctx, ServiceArgs, ServiceCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    session: &Session<LocalHost>,
    args: ServiceArgs,
    ctx: &Ctx,
) -> Result<(), CliError> {
    let service = session.config().service.clone();

    match args.command {
        ServiceCommand::Status => {
            let status = session.service_status().await?;
            let state = if output::should_color(&ctx.color) {
                if status.active {
                    status.state.green().to_string()
                } else {
                    status.state.red().to_string()
                }
            } else {
                status.state
            };
            output::print_output(&format!("{service}: {state}"), ctx.quiet);
            Ok(())
        }

        ServiceCommand::Reload => {
            session.reload_service().await?;
            if !ctx.quiet {
                eprintln!("{service} reloaded");
            }
            Ok(())
        }

        ServiceCommand::Restart => {
            if !util::confirm(
                &format!("Restart {service}? Active connections will be dropped."),
                ctx.yes,
            )? {
                return Ok(());
            }
            session.restart_service().await?;
            if !ctx.quiet {
                eprintln!("{service} restarted");
            }
            Ok(())
        }
    }
}
