/*
 * Responsibility
 * - 下流サービスから見える「検証済み呼び出し元」の型
 * - 値はすべて gateway が書いた X-User-* ヘッダ由来
 */
use serde::Serialize;

/// Identity forwarded by the gateway.
///
/// - `user_id` は token の `sub`
/// - `role` / `department` は claim が無ければ None (空文字にはならない)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caller {
    pub user_id: String,
    pub role: Option<String>,
    pub department: Option<String>,
}
