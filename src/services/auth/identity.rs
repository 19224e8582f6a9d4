/*
 * Responsibility
 * - 検証済み claims → 転送用ヘッダ (X-User-*) への写像
 * - 呼び出し元が付けた同名ヘッダは必ず上書き/除去する (gateway が唯一の書き手)
 */
use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Request},
};

use super::access_jwt::TokenClaims;
use super::error::AuthFailure;

pub const X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");
pub const X_USER_ROLE: HeaderName = HeaderName::from_static("x-user-role");
pub const X_USER_DEPARTMENT: HeaderName = HeaderName::from_static("x-user-department");

/// Every header the gateway writes on behalf of a verified caller.
pub const IDENTITY_HEADERS: [HeaderName; 3] = [X_USER_ID, X_USER_ROLE, X_USER_DEPARTMENT];

/// Header values derived from [`TokenClaims`]. `None` means the header is omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedIdentity {
    pub user_id: HeaderValue,
    pub role: Option<HeaderValue>,
    pub department: Option<HeaderValue>,
}

fn header_value(value: &str, claim: &'static str) -> Result<HeaderValue, AuthFailure> {
    HeaderValue::from_str(value).map_err(|_| AuthFailure::Malformed(claim))
}

impl TryFrom<&TokenClaims> for ForwardedIdentity {
    type Error = AuthFailure;

    fn try_from(claims: &TokenClaims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: header_value(claims.subject(), "sub")?,
            role: claims
                .role()
                .map(|v| header_value(v, "role"))
                .transpose()?,
            department: claims
                .department()
                .map(|v| header_value(v, "department"))
                .transpose()?,
        })
    }
}

impl ForwardedIdentity {
    fn write(self, headers: &mut HeaderMap) {
        strip(headers);
        headers.insert(X_USER_ID, self.user_id);
        if let Some(role) = self.role {
            headers.insert(X_USER_ROLE, role);
        }
        if let Some(department) = self.department {
            headers.insert(X_USER_DEPARTMENT, department);
        }
    }
}

/// Remove every identity header, including repeated values.
pub fn strip(headers: &mut HeaderMap) {
    for name in IDENTITY_HEADERS {
        headers.remove(name);
    }
}

/// Attach the verified identity to `request`.
///
/// A claim that cannot be carried in an HTTP header fails closed.
pub fn propagate(
    mut request: Request<Body>,
    claims: &TokenClaims,
) -> Result<Request<Body>, AuthFailure> {
    let identity = ForwardedIdentity::try_from(claims)?;
    identity.write(request.headers_mut());
    Ok(request)
}
