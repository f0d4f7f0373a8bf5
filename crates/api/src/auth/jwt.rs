//! JWT access-token issuance and validation.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload whose
//! subject is the username. Nothing about an issued token is stored
//! server-side: validity is decided purely by signature and expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlapp_core::types::Timestamp;
use uuid::Uuid;

use super::error::TokenError;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject -- the username the token was issued to.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit logs.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes.
pub const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                       | Required | Default |
    /// |-------------------------------|----------|---------|
    /// | `JWT_SECRET`                  | **yes**  | --      |
    /// | `ACCESS_TOKEN_EXPIRE_MINUTES` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty, or if the expiry is not
    /// a positive integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("ACCESS_TOKEN_EXPIRE_MINUTES must be a valid i64");
        assert!(
            access_token_expiry_mins > 0,
            "ACCESS_TOKEN_EXPIRE_MINUTES must be positive"
        );

        Self {
            secret,
            access_token_expiry_mins,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry_mins", &self.access_token_expiry_mins)
            .finish()
    }
}

/// Issues and parses access tokens with a process-wide signing secret.
///
/// Built once at startup from [`JwtConfig`] and shared read-only behind an
/// `Arc`; every method takes `&self` and touches no mutable state.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        // Expiry is checked by hand against an explicit clock so that `exp`
        // means exactly "valid strictly before this second", with no leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_token_ttl: Duration::minutes(config.access_token_expiry_mins),
        }
    }

    /// Lifetime given to tokens minted at login.
    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Sign a token for `subject` that expires `ttl` from now.
    pub fn issue_token(
        &self,
        subject: &str,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_token_at(subject, ttl, Utc::now())
    }

    /// Sign a token for `subject` as if the current time were `now`.
    pub fn issue_token_at(
        &self,
        subject: &str,
        ttl: Duration,
        now: Timestamp,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            exp: iat + ttl.num_seconds(),
            iat,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Verify and decode a token against the current time.
    pub fn parse_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.parse_token_at(token, Utc::now())
    }

    /// Verify and decode a token as if the current time were `now`.
    ///
    /// The signature is checked before the expiry, so a tampered token is
    /// reported as [`TokenError::SignatureInvalid`] even if it has also expired.
    pub fn parse_token_at(&self, token: &str, now: Timestamp) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        }
    }

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_round_trip_preserves_subject_and_exact_expiry() {
        let service = TokenService::new(&test_config());
        let token = service
            .issue_token_at("alice", Duration::minutes(60), t0())
            .expect("token generation should succeed");

        let claims = service
            .parse_token_at(&token, t0())
            .expect("token validation should succeed");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iat, t0().timestamp());
        assert_eq!(claims.exp, (t0() + Duration::minutes(60)).timestamp());
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_issue_token_uses_wall_clock() {
        let service = TokenService::new(&test_config());
        let before = Utc::now().timestamp();
        let token = service
            .issue_token("bob", service.access_token_ttl())
            .expect("token generation should succeed");

        let claims = service.parse_token(&token).expect("fresh token must parse");
        assert_eq!(claims.sub, "bob");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
        assert!(claims.iat >= before);
    }

    #[test]
    fn test_expired_token_fails() {
        let service = TokenService::new(&test_config());
        let token = service
            .issue_token_at("alice", Duration::minutes(60), t0())
            .unwrap();

        let later = t0() + Duration::minutes(61);
        assert_matches!(service.parse_token_at(&token, later), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_expires_at_exactly_exp() {
        let service = TokenService::new(&test_config());
        let token = service
            .issue_token_at("alice", Duration::minutes(60), t0())
            .unwrap();

        let last_valid = t0() + Duration::minutes(60) - Duration::seconds(1);
        assert!(service.parse_token_at(&token, last_valid).is_ok());

        let boundary = t0() + Duration::minutes(60);
        assert_matches!(
            service.parse_token_at(&token, boundary),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_token_issued_in_the_past_is_expired_now() {
        let service = TokenService::new(&test_config());
        let token = service
            .issue_token_at("alice", Duration::minutes(60), t0())
            .unwrap();

        assert_matches!(service.parse_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_altered_signature_fails() {
        let service = TokenService::new(&test_config());
        let token = service
            .issue_token_at("alice", Duration::minutes(60), t0())
            .unwrap();

        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        // Flip a character in the middle of the signature segment.
        let idx = sig_start + 10;
        bytes[idx] = if bytes[idx] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_matches!(
            service.parse_token_at(&tampered, t0()),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn test_altered_payload_fails_signature_check() {
        let service = TokenService::new(&test_config());
        let alice = service
            .issue_token_at("alice", Duration::minutes(60), t0())
            .unwrap();
        let mallory = service
            .issue_token_at("mallory", Duration::minutes(60), t0())
            .unwrap();

        // Graft mallory's payload onto alice's header and signature.
        let a: Vec<&str> = alice.split('.').collect();
        let m: Vec<&str> = mallory.split('.').collect();
        let forged = format!("{}.{}.{}", a[0], m[1], a[2]);

        assert_matches!(
            service.parse_token_at(&forged, t0()),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn test_different_secrets_fail() {
        let service_a = TokenService::new(&JwtConfig {
            secret: "secret-alpha".to_string(),
            access_token_expiry_mins: 60,
        });
        let service_b = TokenService::new(&JwtConfig {
            secret: "secret-bravo".to_string(),
            access_token_expiry_mins: 60,
        });

        let token = service_a
            .issue_token_at("alice", Duration::minutes(60), t0())
            .unwrap();

        assert_matches!(
            service_b.parse_token_at(&token, t0()),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let service = TokenService::new(&test_config());
        for garbage in ["", "not-a-token", "a.b", "a.b.c", "....."] {
            assert_matches!(
                service.parse_token_at(garbage, t0()),
                Err(TokenError::Malformed),
                "input {garbage:?}"
            );
        }
    }

    #[test]
    fn test_token_without_subject_is_malformed() {
        #[derive(Serialize)]
        struct NoSubject {
            exp: i64,
        }

        let config = test_config();
        let service = TokenService::new(&config);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoSubject {
                exp: (t0() + Duration::minutes(5)).timestamp(),
            },
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert_matches!(
            service.parse_token_at(&token, t0()),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", test_config());
        assert!(!rendered.contains("test-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
