//! 認証ゲートを Router 全体に掛ける middleware
//!
//! - 公開ルート: X-User-* を取り除いて素通し
//! - 保護ルート: `Authorization: Bearer <jwt>` を検証し、X-User-* を付けて次へ
//! - 失敗時: 401 JSON を返してここで打ち切る (下流には絶対に流さない)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::services::auth::AuthOutcome;
use crate::state::AppState;

/// Router 全体 (未定義ルートの fallback も含む) に認証ゲートを適用する。
///
/// 例：
/// ```ignore
/// let router = Router::new().nest("/api/v1", api::v1::routes());
/// let router = middleware::auth::access::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    match state.auth.authenticate(req) {
        AuthOutcome::Allowed(req) => next.run(req).await,
        AuthOutcome::Rejected(rejection) => rejection.into_response(),
    }
}
