//! Portico server binary.
//!
//! Serves the registry and gateway API over HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use portico_server::{PorticoConfig, PorticoServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command line arguments for porticod.
#[derive(Debug, Parser)]
#[command(name = "porticod", about = "Portico registry and gateway server")]
struct Args {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "PORTICO_BIND", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// CORS allowed origin (repeatable; none means allow all).
    #[arg(long = "cors-origin")]
    cors_origins: Vec<String>,

    /// Seconds after which an unrefreshed service stops being discoverable.
    #[arg(long, env = "PORTICO_STALE_AFTER_SECS", default_value_t = 300)]
    stale_after_secs: u64,

    /// Filter path-based discovery by health, like every other query.
    #[arg(long, env = "PORTICO_ROUTE_HEALTH_GATE")]
    route_health_gate: bool,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = PorticoConfig::new(args.bind)
        .with_stale_after(Duration::from_secs(args.stale_after_secs))
        .with_route_health_gate(args.route_health_gate);
    for origin in args.cors_origins {
        config = config.with_cors_origin(origin);
    }

    info!("Starting Portico on {}", args.bind);
    info!("  Registry API: http://{}/service", args.bind);
    info!("  Gateway API:  http://{}/gateway", args.bind);

    let server = PorticoServer::new(config);

    if let Err(e) = server.serve(args.bind).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
