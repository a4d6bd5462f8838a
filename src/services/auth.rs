//! Authentication service implementation
//! 
//! This service issues and verifies the signed bearer tokens handed out after
//! Google sign-in, and the short-lived signed `state` values that tie an OAuth
//! callback to a login started by this server. No session state is kept.

use std::sync::Arc;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::settings::AuthConfig;
use crate::database::EntityStore;
use crate::models::User;
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::helpers::generate_random_string;
use crate::utils::logging::log_auth_event;

/// Audience of access tokens
pub const ACCESS_TOKEN_AUDIENCE: &str = "eventdesk-api";
/// Audience of OAuth `state` values
pub const OAUTH_STATE_AUDIENCE: &str = "eventdesk-oauth-state";
/// How long a login may take between redirect and callback
pub const OAUTH_STATE_TTL_SECONDS: i64 = 600;

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Internal `user_id`
    pub sub: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateClaims {
    nonce: String,
    aud: String,
    iat: i64,
    exp: i64,
}

/// Authentication service for bearer tokens
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
    store: Arc<dyn EntityStore>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(config: &AuthConfig, store: Arc<dyn EntityStore>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_ttl: Duration::seconds(config.token_ttl_seconds),
            store,
        }
    }

    /// Issue a signed access token for the user
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.user_id.clone(),
            aud: ACCESS_TOKEN_AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        log_auth_event(Some(&user.user_id), "issue_token", true, None);
        Ok(token)
    }

    /// Check signature, audience and expiry of an access token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &Self::validation(ACCESS_TOKEN_AUDIENCE))?;
        Ok(data.claims)
    }

    /// Resolve an `Authorization` header value to the user it names.
    ///
    /// Fails with `Unauthenticated` when the header is missing or malformed,
    /// the token does not verify, or the user no longer exists.
    pub async fn authenticate_bearer(&self, authorization: Option<&str>) -> Result<User> {
        let Some(header) = authorization else {
            log_auth_event(None, "bearer", false, Some("missing authorization header"));
            return Err(EventDeskError::Unauthenticated("Missing bearer token".to_string()));
        };

        let token = parse_bearer(header).ok_or_else(|| {
            log_auth_event(None, "bearer", false, Some("malformed authorization header"));
            EventDeskError::Unauthenticated("Malformed authorization header".to_string())
        })?;

        let claims = self.verify_token(token).map_err(|e| {
            log_auth_event(None, "bearer", false, Some(&e.to_string()));
            EventDeskError::Unauthenticated("Invalid or expired token".to_string())
        })?;

        match self.store.find_user(&claims.sub).await? {
            Some(user) => {
                debug!(user_id = %user.user_id, "Bearer token accepted");
                Ok(user)
            }
            None => {
                log_auth_event(Some(&claims.sub), "bearer", false, Some("user no longer exists"));
                Err(EventDeskError::Unauthenticated("User no longer exists".to_string()))
            }
        }
    }

    /// Issue a signed, short-lived OAuth `state` value
    pub fn issue_oauth_state(&self) -> Result<String> {
        let now = Utc::now();
        let claims = StateClaims {
            nonce: generate_random_string(24),
            aud: OAUTH_STATE_AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(OAUTH_STATE_TTL_SECONDS)).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Reject OAuth callbacks whose `state` was not issued by this server
    pub fn verify_oauth_state(&self, state: &str) -> Result<()> {
        decode::<StateClaims>(state, &self.decoding_key, &Self::validation(OAUTH_STATE_AUDIENCE))
            .map(|_| ())
            .map_err(|e| {
                log_auth_event(None, "oauth_state", false, Some(&e.to_string()));
                EventDeskError::Unauthenticated("Invalid OAuth state".to_string())
            })
    }

    fn validation(audience: &str) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[audience]);
        validation.leeway = 0;
        validation
    }
}

/// Extract the token from `Bearer <token>`
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
