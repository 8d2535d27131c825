//! Bearer token inspection.
//!
//! The payload of the JWT is decoded without verifying the signature; the
//! backend remains the authority on validity. The only local use is
//! dropping tokens whose `exp` has already passed.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Claims carried by a Buy01 access token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Subject (the account email).
    pub sub: Option<String>,
    /// Account role as issued by the backend.
    pub role: Option<String>,
    /// Issued-at, Unix seconds.
    pub iat: Option<i64>,
    /// Expiry, Unix seconds.
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Decode the payload segment of a JWT.
    ///
    /// Returns `None` for anything that is not three dot-separated segments
    /// with a base64url JSON payload.
    #[must_use]
    pub fn decode(token: &str) -> Option<Self> {
        let mut segments = token.split('.');
        let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
        if segments.next().is_some() {
            return None;
        }

        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Whether `exp` is at or before `now` (Unix seconds).
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }
}

/// Whether a stored token is known to be expired.
///
/// Tokens that cannot be decoded are not considered expired.
#[must_use]
pub fn is_expired(token: &str) -> bool {
    TokenClaims::decode(token).is_some_and(|claims| claims.is_expired())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Unsigned JWT with the given claims.
    pub fn jwt(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn test_decode_claims() {
        let token = jwt(&serde_json::json!({
            "sub": "seller@shop.com",
            "role": "SELLER",
            "iat": 1_700_000_000,
            "exp": 1_700_003_600
        }));
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("seller@shop.com"));
        assert_eq!(claims.role.as_deref(), Some("SELLER"));
        assert!(claims.is_expired_at(1_700_003_600));
        assert!(!claims.is_expired_at(1_700_000_001));
    }

    #[test]
    fn test_malformed_tokens_are_not_expired() {
        assert!(TokenClaims::decode("opaque-token").is_none());
        assert!(TokenClaims::decode("a.b.c.d").is_none());
        assert!(TokenClaims::decode("a.!!!.c").is_none());
        assert!(!is_expired("opaque-token"));
    }

    #[test]
    fn test_is_expired_against_clock() {
        let now = chrono::Utc::now().timestamp();
        assert!(is_expired(&jwt(&serde_json::json!({ "exp": now - 60 }))));
        assert!(!is_expired(&jwt(&serde_json::json!({ "exp": now + 3600 }))));
        assert!(!is_expired(&jwt(&serde_json::json!({ "sub": "no-exp" }))));
    }
}
