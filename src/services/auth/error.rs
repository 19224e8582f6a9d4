/*
 * Responsibility
 * - 認証ゲートの失敗理由 (内部診断用の粒度)
 * - 外部に返すメッセージへの写像は reason() に一本化する
 */
use thiserror::Error;

use super::rejection::RejectReason;

/// Why a request failed authentication.
///
/// The variants are kept distinct for logging only; callers see one of the
/// three [`RejectReason`] messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("missing Authorization header")]
    MissingHeader,
    #[error("Authorization header is not a Bearer credential")]
    MalformedHeader,
    #[error("malformed token: {0}")]
    Malformed(&'static str),
    #[error("token signature or algorithm rejected")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("token not yet valid")]
    NotYetValid,
    #[error("token '{0}' claim does not match configuration")]
    ClaimMismatch(&'static str),
    #[error("token verification fault: {0}")]
    Internal(String),
}

impl AuthFailure {
    pub fn reason(&self) -> RejectReason {
        match self {
            AuthFailure::MissingHeader => RejectReason::MissingHeader,
            AuthFailure::MalformedHeader => RejectReason::InvalidHeaderFormat,
            AuthFailure::Malformed(_)
            | AuthFailure::BadSignature
            | AuthFailure::Expired
            | AuthFailure::NotYetValid
            | AuthFailure::ClaimMismatch(_)
            | AuthFailure::Internal(_) => RejectReason::InvalidToken,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthFailure {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::InvalidToken => AuthFailure::Malformed("structure"),
            ErrorKind::Base64(_) => AuthFailure::Malformed("base64"),
            ErrorKind::Json(_) => AuthFailure::Malformed("json"),
            ErrorKind::Utf8(_) => AuthFailure::Malformed("utf8"),
            ErrorKind::InvalidAlgorithmName => AuthFailure::Malformed("alg"),
            ErrorKind::MissingRequiredClaim(_) => AuthFailure::Malformed("required claim"),
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthFailure::BadSignature,
            ErrorKind::ExpiredSignature => AuthFailure::Expired,
            ErrorKind::ImmatureSignature => AuthFailure::NotYetValid,
            ErrorKind::InvalidIssuer => AuthFailure::ClaimMismatch("iss"),
            ErrorKind::InvalidAudience => AuthFailure::ClaimMismatch("aud"),
            // Anything else is a library or key fault; never let it through.
            _ => AuthFailure::Internal(e.to_string()),
        }
    }
}
