use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use hri_health::ErrorDetail;
use tracing::{debug, error};

use super::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /hri/healthcheck
///
/// クライアントの組み立てに失敗した場合は 500、依存先が不健全なら 503 とエラー詳細を返す。
/// 全て健全なら 200 で本文は空。
pub async fn healthcheck(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let request_id = request_id(&headers);
    debug!(request_id = %request_id, "start healthcheck handler");

    let cluster = match state.probes.cluster_health_query() {
        Ok(cluster) => cluster,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "failed to create elasticsearch client");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &request_id, e.to_string());
        }
    };

    let reader = match state.probes.partition_reader() {
        Ok(reader) => reader,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "failed to create kafka partition reader");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &request_id, e.to_string());
        }
    };

    let result = hri_health::evaluate(&request_id, cluster.as_ref(), reader.as_ref()).await;
    reader.close().await;

    match result.into_parts() {
        (status, Some(detail)) => (status, Json(detail)).into_response(),
        (status, None) => status.into_response(),
    }
}

fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string)
}

fn error_response(status: StatusCode, request_id: &str, description: String) -> Response {
    (status, Json(ErrorDetail::new(request_id, description))).into_response()
}
