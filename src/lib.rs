/*
 * Responsibility
 * - gateway の認証フィルタ本体 (services::auth) と、それを載せる axum ホストの公開
 */
pub mod api;
pub mod app;
pub mod config;
pub mod middleware;
pub mod services;
pub mod state;
