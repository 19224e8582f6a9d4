/*
 * Responsibility
 * - 401 応答の組み立て (失敗経路の唯一の出口)
 * - 返すメッセージは固定語彙のみ (内部エラー文字列は絶対に載せない)
 */
use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

/// Externally visible rejection messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingHeader,
    InvalidHeaderFormat,
    InvalidToken,
}

impl RejectReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::MissingHeader => "Missing Authorization header",
            RejectReason::InvalidHeaderFormat => "Invalid Authorization header format",
            RejectReason::InvalidToken => "Invalid or expired token",
        }
    }
}

/// Terminal outcome of a failed authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    pub reason: RejectReason,
    pub status: StatusCode,
}

/// Build the rejection for `reason`. The status is always 401.
pub fn reject(reason: RejectReason) -> Rejection {
    Rejection {
        reason,
        status: StatusCode::UNAUTHORIZED,
    }
}

impl Rejection {
    /// `{"error": "<message>", "status": 401}`
    ///
    /// Messages come from the fixed vocabulary and contain nothing that needs
    /// JSON escaping, so the body is formatted directly to keep its exact shape.
    pub fn body(&self) -> String {
        format!(
            "{{\"error\": \"{}\", \"status\": {}}}",
            self.reason.message(),
            self.status.as_u16()
        )
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body()));
        *response.status_mut() = self.status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        response
    }
}
