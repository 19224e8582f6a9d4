use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, HeaderName, StatusCode, request::Parts};

use crate::services::auth::identity::{X_USER_DEPARTMENT, X_USER_ID, X_USER_ROLE};
use crate::state::AppState;

use super::Caller;

// The gate writes claim values as UTF-8; `to_str` would drop anything non-ASCII.
fn header(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
        .map(str::to_owned)
}

/// Handler で Caller を受け取るための extractor
/// gateway が X-User-Id を付けている前提
/// 無い場合は 401 を返す（公開ルートに置かれた・ゲート未適用）
pub struct CallerExtractor(pub Caller);

impl FromRequestParts<AppState> for CallerExtractor
where
    AppState: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = header(&parts.headers, X_USER_ID).ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(CallerExtractor(Caller {
            user_id,
            role: header(&parts.headers, X_USER_ROLE),
            department: header(&parts.headers, X_USER_DEPARTMENT),
        }))
    }
}
