use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tidylens_server::config::ServiceConfig;
use tidylens_server::state::AppState;

/// tidylens API — vision analysis and tidy-image generation backend.
#[derive(Parser, Debug)]
#[command(name = "tidylens-server", version, about)]
struct Args {
    /// Address to bind the HTTP listener on.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tidylens_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Secrets are resolved exactly once, here; a missing key is a startup
    // failure, never a per-request one.
    let config = ServiceConfig::from_env().context("service misconfigured")?;
    let state = AppState::new(&config);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;

    tidylens_server::serve(listener, state).await
}
