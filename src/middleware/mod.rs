/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: 認証ゲート / http: request-id, trace, timeout など横断的関心
 */
pub mod auth;
pub mod http;
