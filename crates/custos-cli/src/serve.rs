//! # Serve Subcommand
//!
//! Boots the in-process wiring (in-memory record store, buffered
//! timeline sink) and serves the Axum application.

use std::net::SocketAddr;

use clap::Args;

use custos_api::AppState;

/// Arguments for the serve subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the API server on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,
}

/// Run the API server until interrupted.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let state = AppState::in_memory();
    let app = custos_api::router(state);

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!(addr = %args.bind, "custos api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
