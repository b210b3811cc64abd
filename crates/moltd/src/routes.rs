//! HTTP routes for the update server.
//!
//! Two read-only endpoints: the latest-build descriptor and raw artifact
//! retrieval. Handlers never touch mutable state.

use crate::server::AppState;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use molt_common::{VersionDescriptor, FILE_ENDPOINT, LATEST_ENDPOINT};
use serde::Deserialize;
use std::io;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tracing::{error, info};

type AppStateArc = Arc<AppState>;

pub fn routes() -> Router<AppStateArc> {
    Router::new()
        .route(LATEST_ENDPOINT, get(latest))
        .route(FILE_ENDPOINT, get(fetch_file))
}

/// Current build descriptor, the same answer for every caller.
async fn latest(State(state): State<AppStateArc>) -> Json<VersionDescriptor> {
    Json(VersionDescriptor {
        version: state.config.latest.clone(),
        path: state.config.artifact.clone(),
    })
}

#[derive(Debug, Deserialize)]
struct FileParams {
    path: Option<String>,
}

/// Stream an artifact back to the caller.
///
/// The identifier is joined to the serving root as-is, with no
/// traversal protection; this server trusts whoever can reach it.
async fn fetch_file(
    State(state): State<AppStateArc>,
    Query(params): Query<FileParams>,
) -> Response {
    let Some(path) = params.path.filter(|p| !p.is_empty()) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let full = state.config.root.join(&path);
    match tokio::fs::File::open(&full).await {
        Ok(file) => {
            info!("Serving {}", full.display());
            (
                [(header::CONTENT_TYPE, "application/octet-stream")],
                Body::from_stream(ReaderStream::new(file)),
            )
                .into_response()
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!("Failed to open {}: {}", full.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
