/*
 * Responsibility
 * - GET /api/v1/me
 * - 下流サービスの代役: gateway が転送した identity をそのまま返す
 */
use axum::{Json, response::IntoResponse};

use crate::api::v1::extractors::CallerExtractor;

pub async fn me(CallerExtractor(caller): CallerExtractor) -> impl IntoResponse {
    tracing::debug!(user_id = %caller.user_id, "identity requested");
    Json(caller)
}
