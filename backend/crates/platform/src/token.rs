//! Opaque Auth Tokens
//!
//! Session tokens are short random alphanumeric strings carried in the
//! `X-Authorization` header and stored directly on the user row. A token
//! has no claims and no expiry; logging in again replaces it.

use http::HeaderMap;
use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of a generated auth token, in characters
pub const AUTH_TOKEN_LENGTH: usize = 16;

/// Name of the header carrying the token
pub const AUTH_HEADER: &str = "X-Authorization";

/// Generate a fresh random auth token
pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(AUTH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Extract the auth token from request headers, if present and non-empty
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_token_length() {
        assert_eq!(generate_token().chars().count(), AUTH_TOKEN_LENGTH);
    }

    #[test]
    fn test_token_alphabet() {
        let token = generate_token();
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_differ() {
        // Collisions over a few draws would indicate a broken RNG
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_extract_token_present() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, HeaderValue::from_static("abcDEF1234567890"));
        assert_eq!(extract_token(&headers), Some("abcDEF1234567890"));
    }

    #[test]
    fn test_extract_token_missing() {
        let headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn test_extract_token_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, HeaderValue::from_static(""));
        assert_eq!(extract_token(&headers), None);
    }
}
