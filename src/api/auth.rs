//! Bearer token check for the versioned API.

use axum::http::{HeaderMap, header};

use super::response::ApiErrorResponse;

/// Checks the `Authorization: Bearer <token>` header against `expected`.
///
/// A missing header, a different scheme and a wrong token all fail the
/// same way.
pub fn check_bearer_token(headers: &HeaderMap, expected: &str) -> Result<(), ApiErrorResponse> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    match token {
        Some(token) if token == expected => Ok(()),
        _ => Err(ApiErrorResponse::unauthorized()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_valid_token() {
        assert!(check_bearer_token(&headers("Bearer demo-token"), "demo-token").is_ok());
        assert!(check_bearer_token(&headers("Bearer  demo-token "), "demo-token").is_ok());
    }

    #[test]
    fn test_rejections() {
        for value in ["Bearer wrong", "Basic demo-token", "demo-token", "bearer demo-token"] {
            let err = check_bearer_token(&headers(value), "demo-token").unwrap_err();
            assert_eq!(err.status, StatusCode::UNAUTHORIZED);
            assert_eq!(err.error.code, "UNAUTHORIZED");
        }
    }

    #[test]
    fn test_missing_header() {
        assert!(check_bearer_token(&HeaderMap::new(), "demo-token").is_err());
    }
}
