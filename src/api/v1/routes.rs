/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 認証ゲートは app.rs で Router 全体に掛ける (ここでは route 単位で掛けない)
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::me::me;

pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
