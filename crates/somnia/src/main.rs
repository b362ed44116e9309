mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Add {
            content,
            lucid,
            emotions,
            symbols,
            theme,
        } => commands::add::run(&content, lucid, &emotions, &symbols, theme.as_deref()).await,
        Commands::List { limit } => commands::list::run(limit).await,
        Commands::Stats => commands::stats::run().await,
        Commands::Insights { force } => commands::insights::run(force).await,
        Commands::Quote { count } => commands::quote::run(count),
        Commands::Status => commands::status::run().await,
        Commands::Version => commands::version::run(),
    }
}
