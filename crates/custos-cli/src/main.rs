//! # custos CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Custos — evidence custody and access admission toolchain.
///
/// Tracks evidence through the investigation lifecycle with an
/// append-only chain of custody, and gates account provisioning behind
/// a reviewed admission workflow.
#[derive(Parser, Debug)]
#[command(name = "custos", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the API server.
    Serve(custos_cli::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => custos_cli::serve::run(args).await,
    }
}
