use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shortreel::app::AppContext;
use shortreel::cli::{commands, Cli, Commands};
use shortreel::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal, so it stays silent unless RUST_LOG asks otherwise
    let default_filter = match command {
        Commands::Tui => "off",
        _ => "warn",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = Config::load()?;
    let ctx = AppContext::new(&config)?;

    match command {
        Commands::Tui => {
            shortreel::tui::run(Arc::new(ctx), Arc::new(config)).await?;
        }
        Commands::Search { query } => {
            commands::search(&ctx, &query).await?;
        }
        Commands::Feed => {
            commands::list_feed(&ctx).await?;
        }
    }

    Ok(())
}
