//! HS256 access token verification

use std::fmt::Debug;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::user::{Actor, UserId, UserRole};
use crate::domain::DomainError;

/// Claims carried by a platform access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Database role of the session, usually `authenticated`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_metadata: Option<AppMetadata>,
}

/// Server-controlled metadata; the application role lives here
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl AccessClaims {
    /// Application role, preferring `app_metadata.role` over the top-level claim
    pub fn app_role(&self) -> UserRole {
        let claim = self
            .app_metadata
            .as_ref()
            .and_then(|m| m.role.as_deref())
            .or(self.role.as_deref());

        UserRole::from_claim(claim)
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Expected audience; `None` disables the check
    pub audience: Option<String>,
    pub leeway_secs: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            audience: None,
            leeway_secs: 30,
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        let audience = audience.into();
        self.audience = (!audience.is_empty()).then_some(audience);
        self
    }

    pub fn with_leeway(mut self, secs: u64) -> Self {
        self.leeway_secs = secs;
        self
    }
}

/// Turns a bearer token into the calling actor
pub trait TokenVerifier: Send + Sync + Debug {
    fn verify(&self, token: &str) -> Result<Actor, DomainError>;
}

#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("decoding_key", &"[hidden]")
            .field("audience", &self.validation.aud)
            .finish()
    }
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Result<Self, DomainError> {
        if config.secret.is_empty() {
            return Err(DomainError::configuration("auth.jwt_secret is not set"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// Decode and validate a token, returning its claims
    pub fn decode(&self, token: &str) -> Result<AccessClaims, DomainError> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| DomainError::unauthorized(format!("Invalid access token: {}", e)))
    }
}

impl TokenVerifier for JwtService {
    fn verify(&self, token: &str) -> Result<Actor, DomainError> {
        let claims = self.decode(token)?;
        let role = claims.app_role();

        let user_id = UserId::new(claims.sub)
            .map_err(|e| DomainError::unauthorized(format!("Invalid token subject: {}", e)))?;

        Ok(Actor::new(user_id, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-key-12345";

    fn claims(sub: &str, app_role: Option<&str>) -> AccessClaims {
        AccessClaims {
            sub: sub.to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            aud: Some("authenticated".to_string()),
            role: Some("authenticated".to_string()),
            app_metadata: app_role.map(|r| AppMetadata {
                role: Some(r.to_string()),
            }),
        }
    }

    fn sign(claims: &AccessClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn service() -> JwtService {
        JwtService::new(&JwtConfig::new(SECRET).with_audience("authenticated")).unwrap()
    }

    #[test]
    fn test_verify_member() {
        let token = sign(&claims("user-1", None), SECRET);

        let actor = service().verify(&token).unwrap();
        assert_eq!(actor.user_id.as_str(), "user-1");
        assert!(!actor.is_admin());
    }

    #[test]
    fn test_verify_admin() {
        let token = sign(&claims("admin-1", Some("admin")), SECRET);

        let actor = service().verify(&token).unwrap();
        assert!(actor.is_admin());
    }

    #[test]
    fn test_wrong_secret() {
        let token = sign(&claims("user-1", None), "another-secret");

        let result = service().verify(&token);
        assert!(matches!(result, Err(DomainError::Unauthorized { .. })));
    }

    #[test]
    fn test_expired_token() {
        let mut expired = claims("user-1", None);
        expired.exp = (Utc::now() - Duration::hours(2)).timestamp();
        let token = sign(&expired, SECRET);

        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn test_wrong_audience() {
        let mut other = claims("user-1", None);
        other.aud = Some("anon".to_string());
        let token = sign(&other, SECRET);

        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn test_audience_check_disabled() {
        let mut other = claims("user-1", None);
        other.aud = None;
        let token = sign(&other, SECRET);

        let service = JwtService::new(&JwtConfig::new(SECRET)).unwrap();
        assert!(service.verify(&token).is_ok());
    }

    #[test]
    fn test_garbage_token() {
        assert!(service().verify("not-a-token").is_err());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(JwtService::new(&JwtConfig::new("")).is_err());
    }

    #[test]
    fn test_top_level_role_fallback() {
        let mut c = claims("user-1", None);
        c.role = Some("admin".to_string());
        assert!(c.app_role().is_admin());
    }
}
