/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: 認証ゲート (署名鍵・公開ルートは起動時に確定、以後 read-only)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::Authenticate;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn Authenticate>,
}

impl AppState {
    pub fn new(auth: Arc<dyn Authenticate>) -> Self {
        Self { auth }
    }
}
