mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dockside", about = "Build a Go service and run it in a Docker container")]
#[command(version)]
struct Cli {
    /// Path to a dockside.toml (default: ./dockside.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, package and (re)start the container (default)
    Deploy,
    /// Print the deploy steps without running them
    Plan,
    /// Check the toolchain and project files
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Deploy) {
        Commands::Deploy => commands::deploy(config_path).await?,
        Commands::Plan => commands::plan(config_path)?,
        Commands::Doctor => commands::doctor(config_path).await?,
    }

    Ok(())
}
