/*
 * Responsibility
 * - GET /actuator/health (疎通用)
 * - 既定の公開ルートなのでトークン無しで届くことの確認にも使う
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "UP"})))
}
