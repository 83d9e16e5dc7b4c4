pub mod health;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::infrastructure::probes::ProbeFactory;

/// AppState はハンドラ間で共有する状態。
#[derive(Clone)]
pub struct AppState {
    pub probes: Arc<dyn ProbeFactory>,
}

impl AppState {
    pub fn new(probes: Arc<dyn ProbeFactory>) -> Self {
        Self { probes }
    }
}

/// REST API router.
///
/// X-Request-ID が無いリクエストには UUID を採番し、応答ヘッダへも返す。
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/hri/healthcheck", get(health::healthcheck))
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
