use anyhow::{Context, Result};
use clap::Parser;
use live_translate::{create_router, AppState, Config};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "live-translate", about = "Real-time voice translation service")]
struct Args {
    /// Path to the config file (without extension)
    #[arg(long, default_value = "config/live-translate")]
    config: String,

    /// Override the configured HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;
    let port = args.port.unwrap_or(cfg.service.http.port);

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let state = AppState::new(&cfg.translation, cfg.adapters.clone());
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
