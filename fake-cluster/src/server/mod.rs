// Server module - HTTP server setup and routing
pub mod handlers;
pub mod paths;
pub mod state;

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{error, info, info_span, Level, Span};

use self::state::AppState;
use crate::config::ServerConfig;
use crate::errors::ServerError;

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/_xpack", get(handlers::xpack))
        .route("/_bulk", post(handlers::bulk))
        .fallback(handlers::fallback)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Bind the listener for the configured address
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    let listener = TcpListener::bind((config.addr.as_str(), config.port)).await?;
    Ok(listener)
}

/// Serve `app` on `listener` until `shutdown` completes
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Server listening on {}", addr);
    info!("- Node endpoint: http://{}/", addr);
    info!("- Bulk endpoint: http://{}/_bulk", addr);
    info!("- Template endpoint: http://{}/_template/<id>", addr);
    info!("- Pipeline endpoint: http://{}/_ingest/pipeline/<id>", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves once SIGINT or SIGTERM is received
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Terminating signal received");
}

/// Address of the calling client: `X-Forwarded-For` when present, else the peer IP.
fn client_addr(request: &Request<Body>) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty());
    if let Some(forwarded) = forwarded {
        return forwarded.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn request_span(request: &Request<Body>) -> Span {
    info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        client = %client_addr(request),
    )
}
