use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Claims we read from an ID token. Identity Toolkit puts the uid in both
/// `user_id` and `sub`; emulators sometimes only set `sub`.
#[derive(Deserialize, Debug)]
struct IdTokenClaims {
    user_id: Option<String>,
    sub: Option<String>,
    email: Option<String>,
    exp: i64,
}

/// The signed-in user, with the tokens needed to act on their behalf.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl User {
    /// Build a user from a fresh token pair. The ID token's signature is not
    /// checked here; the backend verifies it on every request.
    pub fn from_tokens(id_token: String, refresh_token: String) -> Result<Self> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let claims = decode::<IdTokenClaims>(&id_token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|e| Error::Decode(format!("Invalid ID token: {}", e)))?
            .claims;

        let uid = claims
            .user_id
            .or(claims.sub)
            .ok_or_else(|| Error::Decode("ID token carries no user id".to_string()))?;
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| Error::Decode(format!("ID token exp out of range: {}", claims.exp)))?;

        Ok(Self {
            uid,
            email: claims.email,
            id_token,
            refresh_token,
            expires_at,
        })
    }

    /// True if the ID token is expired or will be within `margin`.
    /// A deadline past chrono's range counts as expiring.
    pub fn expires_within(&self, margin: Duration) -> bool {
        Utc::now()
            .checked_add_signed(margin)
            .map_or(true, |deadline| deadline >= self.expires_at)
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    /// Mint an unsigned-looking ID token for tests.
    pub(crate) fn id_token(uid: &str, email: &str, expires_in_secs: i64) -> String {
        let claims = json!({
            "iss": "https://securetoken.google.com/demo-project",
            "aud": "demo-project",
            "user_id": uid,
            "sub": uid,
            "email": email,
            "exp": Utc::now().timestamp() + expires_in_secs,
        });
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test")).unwrap()
    }

    #[test]
    fn test_user_from_tokens_reads_claims() {
        let token = id_token("uid-1", "ada@example.com", 3600);
        let user = User::from_tokens(token.clone(), "refresh".to_string()).unwrap();
        assert_eq!(user.uid, "uid-1");
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(user.id_token, token);
        assert!(!user.expires_within(Duration::minutes(5)));
    }

    #[test]
    fn test_expiring_token_is_detected() {
        let token = id_token("uid-1", "ada@example.com", 60);
        let user = User::from_tokens(token, "refresh".to_string()).unwrap();
        assert!(user.expires_within(Duration::minutes(5)));
    }

    fn token_with_exp(exp: i64) -> String {
        let claims = json!({ "user_id": "uid-edge", "exp": exp });
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"x")).unwrap()
    }

    #[test]
    fn test_extreme_expiry_does_not_panic() {
        let oldest = User::from_tokens(
            token_with_exp(DateTime::<Utc>::MIN_UTC.timestamp()),
            String::new(),
        )
        .unwrap();
        assert!(oldest.expires_within(Duration::minutes(5)));

        let newest = User::from_tokens(
            token_with_exp(DateTime::<Utc>::MAX_UTC.timestamp()),
            String::new(),
        )
        .unwrap();
        assert!(!newest.expires_within(Duration::minutes(5)));
        assert!(newest.expires_within(Duration::MAX));
    }

    #[test]
    fn test_sub_is_used_without_user_id() {
        let claims = json!({ "sub": "from-sub", "exp": Utc::now().timestamp() + 10 });
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"x")).unwrap();
        let user = User::from_tokens(token, String::new()).unwrap();
        assert_eq!(user.uid, "from-sub");
        assert_eq!(user.email, None);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let err = User::from_tokens("not-a-jwt".to_string(), String::new()).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_debug_hides_tokens() {
        let token = id_token("uid-1", "ada@example.com", 3600);
        let user = User::from_tokens(token.clone(), "refresh-secret".to_string()).unwrap();
        let printed = format!("{:?}", user);
        assert!(!printed.contains(&token));
        assert!(!printed.contains("refresh-secret"));
    }
}
