mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nginsight_core::Session;
use nginsight_host::LocalHost;

use crate::cli::{Cli, ColorMode, Command, Ctx, GlobalOpts, OutputFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let file_cfg = nginsight_config::load_config_or_default();

    let ctx = Ctx {
        output: cli
            .global
            .output
            .clone()
            .unwrap_or_else(|| OutputFormat::from_config(&file_cfg.defaults.output)),
        color: cli
            .global
            .color
            .clone()
            .unwrap_or_else(|| ColorMode::from_config(&file_cfg.defaults.color)),
        quiet: cli.global.quiet,
        yes: cli.global.yes,
    };

    match cli.command {
        // Config commands don't need a host session
        Command::Config(args) => commands::config_cmd::handle(args, &ctx),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "nginsight", &mut std::io::stdout());
            Ok(())
        }

        // Everything else talks to the host
        Command::Sites(args) => {
            let session = build_session(&cli.global, &file_cfg);
            commands::sites::handle(&session, args, &ctx).await
        }
        Command::Stats => {
            let session = build_session(&cli.global, &file_cfg);
            commands::stats::handle(&session, &ctx).await
        }
        Command::Conf(args) => {
            let session = build_session(&cli.global, &file_cfg);
            commands::conf::handle(&session, args, &ctx).await
        }
        Command::Service(args) => {
            let session = build_session(&cli.global, &file_cfg);
            commands::service::handle(&session, args, &ctx).await
        }
    }
}

/// Build the host session from the file config plus CLI overrides.
fn build_session(global: &GlobalOpts, file_cfg: &nginsight_config::Config) -> Session<LocalHost> {
    let mut config = nginsight_config::session_config(file_cfg);
    if global.no_sudo {
        config.elevate = false;
    }
    tracing::debug!(elevate = config.elevate, "building host session");
    Session::new(LocalHost::new(config.elevate), config)
}
