/*
 * Responsibility
 * - Authorization ヘッダから Bearer トークンを取り出す
 * - トークン自体の検証はしない (access_jwt 側の責務)
 */
use axum::http::{HeaderMap, header};

use super::error::AuthFailure;

const BEARER_PREFIX: &[u8] = b"Bearer ";

/// Return the raw token following `Bearer `.
///
/// Only the first `Authorization` value is consulted. Once the scheme matches,
/// anything wrong with the remainder is a token-level failure.
pub fn extract(headers: &HeaderMap) -> Result<&str, AuthFailure> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthFailure::MissingHeader)?;

    let token = value
        .as_bytes()
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthFailure::MalformedHeader)?;

    std::str::from_utf8(token).map_err(|_| AuthFailure::Malformed("token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::rejection::RejectReason;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn missing_header() {
        assert_eq!(extract(&HeaderMap::new()), Err(AuthFailure::MissingHeader));
    }

    #[test]
    fn returns_everything_after_prefix() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn token_is_not_trimmed_or_validated() {
        assert_eq!(extract(&headers_with("Bearer  x ")), Ok(" x "));
        assert_eq!(extract(&headers_with("Bearer ")), Ok(""));
    }

    #[test]
    fn scheme_is_case_sensitive() {
        for value in ["bearer abc", "BEARER abc", "Basic dXNlcjpwdw==", "Bearer", "Bearerabc"] {
            assert_eq!(
                extract(&headers_with(value)),
                Err(AuthFailure::MalformedHeader),
                "{value}"
            );
        }
    }

    #[test]
    fn only_first_value_is_consulted() {
        let mut headers = HeaderMap::new();
        headers.append(header::AUTHORIZATION, HeaderValue::from_static("Basic x"));
        headers.append(header::AUTHORIZATION, HeaderValue::from_static("Bearer y"));
        assert_eq!(extract(&headers), Err(AuthFailure::MalformedHeader));
    }

    #[test]
    fn undecodable_token_is_a_token_failure() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );
        let failure = extract(&headers).unwrap_err();
        assert_eq!(failure, AuthFailure::Malformed("token"));
        assert_eq!(failure.reason(), RejectReason::InvalidToken);
    }

    #[test]
    fn non_ascii_scheme_is_malformed_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"B\xe9arer abc").unwrap(),
        );
        assert_eq!(extract(&headers), Err(AuthFailure::MalformedHeader));
    }
}
