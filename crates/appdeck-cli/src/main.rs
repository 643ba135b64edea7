//! CLI entry point.
//!
//! Parses arguments, composes the application via bootstrap and
//! dispatches to handlers.

use std::sync::Arc;

use clap::Parser;

use appdeck_cli::presentation::{download_progress, ConsoleNotices};
use appdeck_cli::{bootstrap, browse, handlers, Cli, CliConfig, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::with_defaults(cli.manifest_url.as_deref())?;

    match command {
        Commands::List => {
            let ctx = bootstrap(config, Arc::new(ConsoleNotices), None);
            handlers::list(&ctx).await?;
        }
        Commands::Probe => {
            let ctx = bootstrap(config, Arc::new(ConsoleNotices), None);
            handlers::probe(&ctx).await?;
        }
        Commands::Install { index } => {
            let ctx = bootstrap(config, Arc::new(ConsoleNotices), Some(download_progress()));
            handlers::install(&ctx, index).await?;
        }
        Commands::Browse => {
            // Notices would garble the raw-mode screen; state is shown
            // in the status line instead.
            let ctx = bootstrap(config, Arc::new(appdeck_core::NoopNotices), None);
            browse::run(&ctx).await?;
        }
        Commands::Paths => {
            let ctx = bootstrap(config, Arc::new(ConsoleNotices), None);
            handlers::paths(&ctx)?;
        }
    }

    Ok(())
}
