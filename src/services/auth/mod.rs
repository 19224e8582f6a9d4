pub mod access_jwt;
pub mod bearer;
pub mod error;
pub mod factory;
pub mod gate;
pub mod identity;
pub mod public_routes;
pub mod rejection;

pub use access_jwt::{SigningKey, TokenClaims, TokenVerifier, VerifierPolicy};
pub use error::AuthFailure;
pub use factory::build_auth_gate;
pub use gate::{AuthGate, AuthOutcome, Authenticate};
pub use public_routes::{PublicRoutes, RouteClass};
pub use rejection::{RejectReason, Rejection, reject};
