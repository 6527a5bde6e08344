//! Fake Cluster Main Entry Point
//!
//! Serves the fake search cluster API until SIGINT or SIGTERM.

use dotenv::dotenv;
use fake_cluster::{
    bind, create_app, serve, shutdown_signal, AppState, LogFormat, NodeIdentity, ServerConfig,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "fake_cluster=info,fake_cluster_bulk=info,fake_cluster_store=info,tower_http=info",
        )
    });

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true),
                )
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
                .init();
        }
    }

    info!(
        service_name = "fake-cluster",
        service_version = env!("CARGO_PKG_VERSION"),
        log_format = ?format,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = ServerConfig::from_env()?;
    init_tracing(config.log_format);

    info!("Starting fake cluster");

    let identity = NodeIdentity::from_seed(config.seed);
    info!(
        node_name = %identity.node_name,
        cluster_name = %identity.cluster_name,
        cluster_uuid = %identity.cluster_uuid,
        "Node identity generated"
    );

    let state = AppState::new(&config, identity);
    let app = create_app(state);

    let listener = match bind(&config).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr = %config.addr, port = config.port, "Failed to bind");
            return Err(e.into());
        }
    };

    if let Err(e) = serve(listener, app, shutdown_signal()).await {
        error!(error = %e, "Server failed");
        return Err(e.into());
    }

    Ok(())
}
