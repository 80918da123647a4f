//! Opaque session tokens and the session cookie.
//!
//! Session tokens are random strings handed to the client in an HttpOnly
//! cookie; only their SHA-256 hash is stored server-side so a database leak
//! does not compromise active sessions.

use axum::http::HeaderMap;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Generate a cryptographically random session token.
///
/// Returns a tuple of `(plaintext_token, sha256_hex_hash)`. The plaintext is
/// sent to the client; only the hash should be persisted server-side.
pub fn generate_session_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a session token.
///
/// Use this to compare an incoming session cookie against the stored hash.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Build the `Set-Cookie` value that establishes a session.
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// Build the `Set-Cookie` value that clears the session cookie.
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Extract the session token from a request's `Cookie` header, if present.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn test_session_token_hash_matches() {
        let (plaintext, hash) = generate_session_token();

        // Re-hashing the same plaintext must produce the same digest.
        let rehashed = hash_session_token(&plaintext);
        assert_eq!(hash, rehashed, "hash of the same token must be stable");

        // Sanity: the hash should be a 64-char hex string (SHA-256).
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_tokens_are_unique() {
        let (a, _) = generate_session_token();
        let (b, _) = generate_session_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_cookie_round_trip() {
        let cookie = session_cookie("abc-123", 3600);
        assert!(cookie.starts_with("session=abc-123;"));
        assert!(cookie.contains("HttpOnly"));

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "other=1; session=abc-123".parse().unwrap());
        assert_eq!(
            session_token_from_headers(&headers),
            Some("abc-123".to_string())
        );
    }

    #[test]
    fn test_missing_cookie_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(session_token_from_headers(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "other=1".parse().unwrap());
        assert_eq!(session_token_from_headers(&headers), None);
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let cookie = expired_session_cookie();
        assert!(cookie.starts_with("session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
