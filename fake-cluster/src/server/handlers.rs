// HTTP request handlers
use std::io;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header::CONTENT_TYPE, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use fake_cluster_bulk::OverallStatus;
use fake_cluster_store::ResourceStore;
use futures::TryStreamExt;
use percent_encoding::percent_decode_str;
use tokio_util::io::StreamReader;
use tracing::{error, warn};

use crate::identity::xpack_descriptor;
use crate::server::paths::ResourcePath;
use crate::server::state::AppState;

const APPLICATION_JSON: &str = "application/json";

/// Node descriptor endpoint
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.identity.descriptor())
}

/// Feature availability endpoint
pub async fn xpack() -> impl IntoResponse {
    Json(xpack_descriptor())
}

/// Bulk endpoint without a collection in the path
pub async fn bulk(State(state): State<AppState>, body: Body) -> Response {
    run_bulk(&state, "", body).await
}

/// Routes collection bulk requests and the pipeline and template stores,
/// whose paths are matched by prefix and suffix rather than fixed routes.
///
/// The path is percent-decoded before matching, so collections and ids are
/// reported and stored decoded.
pub async fn fallback(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Body,
) -> Response {
    let path = percent_decode_str(uri.path()).decode_utf8_lossy();
    match ResourcePath::parse(&path) {
        ResourcePath::Bulk(collection) => {
            if method != Method::POST {
                return method_not_allowed(&method);
            }
            match collection {
                Some(collection) => run_bulk(&state, collection, body).await,
                None => {
                    warn!("Invalid collection name");
                    StatusCode::BAD_REQUEST.into_response()
                }
            }
        }
        ResourcePath::Pipeline(id) => {
            store_request(&state, StoreKind::Pipeline, id, method, body).await
        }
        ResourcePath::Template(id) => {
            store_request(&state, StoreKind::Template, id, method, body).await
        }
        ResourcePath::NotFound => {
            warn!("Not found");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn run_bulk(state: &AppState, collection: &str, body: Body) -> Response {
    let stream = body.into_data_stream().map_err(io::Error::other);
    let outcome = state
        .dispatcher
        .dispatch(StreamReader::new(stream), collection)
        .await;

    let status = match outcome.status {
        OverallStatus::Ok => StatusCode::OK,
        OverallStatus::PartialContent => StatusCode::PARTIAL_CONTENT,
    };

    match outcome.render() {
        Ok(body) => (status, [(CONTENT_TYPE, APPLICATION_JSON)], body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render bulk response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreKind {
    Pipeline,
    Template,
}

impl StoreKind {
    fn name(&self) -> &'static str {
        match self {
            StoreKind::Pipeline => "pipeline",
            StoreKind::Template => "template",
        }
    }

    /// Pipelines have no existence check; templates answer HEAD.
    fn allows(&self, method: &Method) -> bool {
        match self {
            StoreKind::Pipeline => method == Method::GET || method == Method::PUT,
            StoreKind::Template => {
                method == Method::GET || method == Method::HEAD || method == Method::PUT
            }
        }
    }

    fn store<'a>(&self, state: &'a AppState) -> &'a dyn ResourceStore {
        match self {
            StoreKind::Pipeline => state.pipelines.as_ref(),
            StoreKind::Template => state.templates.as_ref(),
        }
    }
}

async fn store_request(
    state: &AppState,
    kind: StoreKind,
    id: Option<&str>,
    method: Method,
    body: Body,
) -> Response {
    if !kind.allows(&method) {
        return method_not_allowed(&method);
    }

    let Some(id) = id else {
        warn!(resource = kind.name(), "Invalid {} id", kind.name());
        return StatusCode::BAD_REQUEST.into_response();
    };

    let store = kind.store(state);

    if method == Method::PUT {
        let body = match to_bytes(body, state.max_body_bytes).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Unable to read request");
                return StatusCode::SERVICE_UNAVAILABLE.into_response();
            }
        };
        store.put(id, body).await;
        return StatusCode::ACCEPTED.into_response();
    }

    if method == Method::HEAD {
        return if store.contains(id).await {
            StatusCode::OK.into_response()
        } else {
            StatusCode::NOT_FOUND.into_response()
        };
    }

    match store.get(id).await {
        Some(body) => (StatusCode::OK, [(CONTENT_TYPE, APPLICATION_JSON)], body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn method_not_allowed(method: &Method) -> Response {
    warn!(method = %method, "Unsupported method");
    StatusCode::METHOD_NOT_ALLOWED.into_response()
}
