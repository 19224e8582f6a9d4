/*
 * Responsibility
 * - Config読み込み → 認証ゲート生成 → Router 組み立て
 * - Middleware の適用 (認証ゲート / request-id / trace / timeout)
 * - axum::serve() で起動
 */
use std::{panic, process, time::Duration};

use anyhow::Result;
use axum::{Router, http::StatusCode, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::build_auth_gate;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG=auth_gateway=debug surfaces per-request accept/reject decisions.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // A panic inside the gate must never look like a served request in dev.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting gateway in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = AppState::new(build_auth_gate(&config));
    let app = build_router(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Every route, including the fallback, sits behind the auth gate.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let router = Router::new()
        .route("/actuator/health", get(health))
        .nest("/api/v1", api::v1::routes())
        .fallback(not_found);

    let router = middleware::auth::access::apply(router, state.clone()).with_state(state);

    middleware::http::apply(router, request_timeout)
}
