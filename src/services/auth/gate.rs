/*
 * Responsibility
 * - 1 リクエスト 1 判定: classify → extract → verify → propagate
 * - どの経路も Allowed / Rejected のどちらかで必ず終わる (fail-closed)
 */
use axum::{body::Body, http::Request};

use super::access_jwt::TokenVerifier;
use super::bearer;
use super::error::AuthFailure;
use super::identity;
use super::public_routes::{PublicRoutes, RouteClass};
use super::rejection::{Rejection, reject};

/// Result of running a request through the gate.
#[derive(Debug)]
pub enum AuthOutcome {
    Allowed(Request<Body>),
    Rejected(Rejection),
}

impl AuthOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}

/// The capability the host pipeline composes in front of its routes.
pub trait Authenticate: Send + Sync {
    fn authenticate(&self, request: Request<Body>) -> AuthOutcome;
}

#[derive(Debug, Clone)]
pub struct AuthGate {
    public_routes: PublicRoutes,
    verifier: TokenVerifier,
}

impl AuthGate {
    pub fn new(public_routes: PublicRoutes, verifier: TokenVerifier) -> Self {
        Self {
            public_routes,
            verifier,
        }
    }

    pub fn public_routes(&self) -> &PublicRoutes {
        &self.public_routes
    }

    fn authenticate_protected(&self, request: Request<Body>) -> Result<Request<Body>, AuthFailure> {
        let token = bearer::extract(request.headers())?;
        let claims = self.verifier.verify(token)?;

        tracing::debug!(subject = %claims.subject(), "request authenticated");

        identity::propagate(request, &claims)
    }
}

impl Authenticate for AuthGate {
    fn authenticate(&self, mut request: Request<Body>) -> AuthOutcome {
        if self.public_routes.classify(request.uri().path()) == RouteClass::Public {
            // Public routes carry no identity; never forward caller-made X-User-* headers.
            identity::strip(request.headers_mut());
            return AuthOutcome::Allowed(request);
        }

        let path = request.uri().path().to_owned();
        match self.authenticate_protected(request) {
            Ok(request) => AuthOutcome::Allowed(request),
            Err(failure) => {
                tracing::warn!(%path, error = %failure, "request rejected");
                AuthOutcome::Rejected(reject(failure.reason()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::access_jwt::{
        SigningKey, VerifierPolicy,
        tests::{SECRET, mint},
    };
    use crate::services::auth::identity::{X_USER_DEPARTMENT, X_USER_ID, X_USER_ROLE};
    use crate::services::auth::rejection::RejectReason;
    use axum::http::StatusCode;
    use jsonwebtoken::Algorithm;
    use serde_json::json;

    fn gate() -> AuthGate {
        AuthGate::new(
            PublicRoutes::default(),
            TokenVerifier::new(
                &SigningKey::from_secret(SECRET).unwrap(),
                &VerifierPolicy::default(),
            ),
        )
    }

    fn request(path: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path).header("x-user-id", "forged");
        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn token(claims: serde_json::Value) -> String {
        mint(Algorithm::HS256, SECRET.as_bytes(), &claims)
    }

    fn future() -> i64 {
        chrono::Utc::now().timestamp() + 600
    }

    fn rejected_with(outcome: AuthOutcome, reason: RejectReason) {
        match outcome {
            AuthOutcome::Rejected(r) => {
                assert_eq!(r.reason, reason);
                assert_eq!(r.status, StatusCode::UNAUTHORIZED);
            }
            AuthOutcome::Allowed(req) => panic!("unexpectedly allowed: {}", req.uri()),
        }
    }

    #[test]
    fn public_route_passes_without_token() {
        for method in ["GET", "POST", "DELETE"] {
            let req = Request::builder()
                .method(method)
                .uri("/api/auth/login")
                .header("authorization", "garbage")
                .body(Body::empty())
                .unwrap();
            assert!(gate().authenticate(req).is_allowed(), "{method}");
        }
    }

    #[test]
    fn public_route_drops_forged_identity() {
        match gate().authenticate(request("/actuator/health", None)) {
            AuthOutcome::Allowed(req) => assert!(!req.headers().contains_key(X_USER_ID)),
            AuthOutcome::Rejected(r) => panic!("rejected: {r:?}"),
        }
    }

    #[test]
    fn protected_route_without_header() {
        rejected_with(
            gate().authenticate(request("/api/students", None)),
            RejectReason::MissingHeader,
        );
    }

    #[test]
    fn protected_route_with_wrong_scheme() {
        rejected_with(
            gate().authenticate(request("/api/students", Some("Token abc"))),
            RejectReason::InvalidHeaderFormat,
        );
    }

    #[test]
    fn valid_token_is_allowed_and_propagated() {
        let t = token(json!({ "sub": "u1", "role": "admin", "department": "CS", "exp": future() }));
        let outcome = gate().authenticate(request("/api/students", Some(format!("Bearer {t}").as_str())));

        let AuthOutcome::Allowed(req) = outcome else {
            panic!("expected Allowed");
        };
        assert_eq!(req.headers()[X_USER_ID], "u1");
        assert_eq!(req.headers()[X_USER_ROLE], "admin");
        assert_eq!(req.headers()[X_USER_DEPARTMENT], "CS");
    }

    #[test]
    fn token_failures_share_one_reason() {
        let other_key = mint(
            Algorithm::HS256,
            b"ffffffffffffffffffffffffffffffff",
            &json!({ "sub": "u1", "exp": future() }),
        );
        let expired = token(json!({ "sub": "u1", "exp": chrono::Utc::now().timestamp() - 1 }));
        let no_subject = token(json!({ "exp": future() }));

        for t in [other_key, expired, no_subject, "not-a-jwt".to_string(), String::new()] {
            rejected_with(
                gate().authenticate(request("/api/students", Some(format!("Bearer {t}").as_str()))),
                RejectReason::InvalidToken,
            );
        }
    }
}
