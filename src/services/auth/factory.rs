/// Factory: build `AuthGate` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthGate, TokenVerifier};

pub fn build_auth_gate(config: &Config) -> Arc<AuthGate> {
    let verifier = TokenVerifier::new(&config.jwt_signing_key, &config.verifier_policy);

    tracing::info!(
        algorithms = ?verifier.algorithms(),
        public_prefixes = ?config.public_routes.prefixes(),
        "auth gate configured"
    );

    Arc::new(AuthGate::new(config.public_routes.clone(), verifier))
}
