//! Bearer Credential Extraction
//!
//! Reads the identity token from the `Authorization` header. Both the
//! standard `Bearer <token>` form and a bare `<token>` value are accepted.

use axum::http::{HeaderMap, header};

const BEARER_PREFIX: &str = "bearer ";

/// Extract the bearer token from request headers
///
/// Returns `None` when the header is absent, not valid ASCII, or empty
/// after stripping the scheme.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();

    let token = match value.get(..BEARER_PREFIX.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER_PREFIX) => {
            value[BEARER_PREFIX.len()..].trim()
        }
        _ if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    };

    if token.is_empty() {
        tracing::debug!("Authorization header present but carries no token");
        return None;
    }

    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_scheme() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(
            extract_bearer_token(&headers),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let headers = headers_with("bEaReR abc.def.ghi");
        assert_eq!(
            extract_bearer_token(&headers),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_bare_token() {
        let headers = headers_with("abc.def.ghi");
        assert_eq!(
            extract_bearer_token(&headers),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(extract_bearer_token(&headers_with("")), None);
        assert_eq!(extract_bearer_token(&headers_with("Bearer")), None);
        assert_eq!(extract_bearer_token(&headers_with("Bearer   ")), None);
    }
}
