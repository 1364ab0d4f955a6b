//! Password hashing, access tokens and the extractors guarding protected routes.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use model::entities::practice::{self, PracticeRole};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::schemas::AppState;

pub const ADMIN_ONLY_MESSAGE: &str = "Access denied. Master admin only.";

/// Hash a password into an Argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC string. Malformed hashes never match.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash could not be parsed: {}", e);
            false
        }
    }
}

/// Access token claims. The role is fixed when the token is issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Practice id
    pub sub: i32,
    pub email: String,
    pub role: PracticeRole,
    /// Expiry as a unix timestamp
    pub exp: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    ttl: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Issue a token for the given practice.
    pub fn issue(&self, practice: &practice::Model) -> Result<String, ApiError> {
        let claims = Claims {
            sub: practice.id,
            email: practice.email.clone(),
            role: practice.role,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        self.encode(&claims)
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, ApiError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Decode and validate a token, including its expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                ApiError::Forbidden("Invalid token".to_string())
            })
    }
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    const BEARER_PREFIX: &str = "Bearer ";

    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .unwrap_or_default();

    if token.is_empty() {
        return Err(ApiError::Unauthorized("Access token required".to_string()));
    }

    Ok(token)
}

/// Any authenticated account, practice or admin.
#[derive(Debug, Clone)]
pub struct AuthPractice(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthPractice {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(parts)?;
        let claims = state.tokens.verify(token)?;
        Ok(AuthPractice(claims))
    }
}

/// An authenticated master admin.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthPractice(claims) = AuthPractice::from_request_parts(parts, state).await?;
        if !claims.is_admin() {
            warn!("Practice {} attempted an admin-only action", claims.sub);
            return Err(ApiError::Forbidden(ADMIN_ONLY_MESSAGE.to_string()));
        }
        Ok(RequireAdmin(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn sample_practice(role: PracticeRole) -> practice::Model {
        practice::Model {
            id: 7,
            name: "Clear View Optometry".to_string(),
            email: "office@clearview.test".to_string(),
            password_hash: String::new(),
            role,
            created_at: Utc::now(),
        }
    }

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/v1/profile");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_password_round_trip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
        assert!(!verify_password("correct horse", "not-a-phc-string"));
    }

    #[test]
    fn test_token_carries_role() {
        let tokens = TokenService::new("test-secret", 1);
        let token = tokens.issue(&sample_practice(PracticeRole::Admin)).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, PracticeRole::Admin);
        assert!(claims.is_admin());
    }

    #[test]
    fn test_token_rejected_with_other_secret_or_expired() {
        let tokens = TokenService::new("test-secret", 1);
        let other = TokenService::new("other-secret", 1);
        let token = tokens.issue(&sample_practice(PracticeRole::Practice)).unwrap();
        assert!(matches!(other.verify(&token), Err(ApiError::Forbidden(_))));

        let expired = tokens
            .encode(&Claims {
                sub: 7,
                email: "office@clearview.test".to_string(),
                role: PracticeRole::Practice,
                exp: (Utc::now() - Duration::hours(2)).timestamp(),
            })
            .unwrap();
        assert!(matches!(tokens.verify(&expired), Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        let parts = parts_with_header(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&parts).unwrap(), "abc.def.ghi");

        for header in [None, Some("Basic abc"), Some("Bearer ")] {
            let parts = parts_with_header(header);
            assert!(matches!(
                extract_bearer_token(&parts),
                Err(ApiError::Unauthorized(_))
            ));
        }
    }

    #[test]
    fn test_debug_hides_keys() {
        let tokens = TokenService::new("super-secret-value", 1);
        let rendered = format!("{:?}", tokens);
        assert!(!rendered.contains("super-secret-value"));
    }
}
