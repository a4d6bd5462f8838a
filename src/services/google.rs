//! Google OAuth 2.0 sign-in
//!
//! Builds the authorization redirect, exchanges the callback `code` for an
//! access token and fetches the signed-in user's profile. Endpoint URLs come
//! from configuration so tests can point them at a mock server.

use std::time::Duration;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use crate::config::settings::GoogleConfig;
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::logging::log_api_error;

const SCOPES: &str = "openid email profile";

/// Identity asserted by the provider for a signed-in user
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityProfile {
    /// Stable provider subject identifier
    pub subject: String,
    pub email: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: String,
    email: String,
    #[serde(default)]
    email_verified: bool,
    name: Option<String>,
}

/// Google OAuth client
#[derive(Clone)]
pub struct GoogleOAuthService {
    config: GoogleConfig,
    http_client: Client,
}

impl GoogleOAuthService {
    /// Create a new GoogleOAuthService instance
    pub fn new(config: GoogleConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { config, http_client })
    }

    /// URL the browser is redirected to when sign-in starts
    pub fn authorization_url(&self, state: &str) -> Result<String> {
        let mut url = url::Url::parse(&self.config.auth_url)?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPES)
            .append_pair("state", state);

        Ok(url.into())
    }

    /// Exchange an authorization code for a verified profile
    pub async fn authenticate(&self, code: &str) -> Result<IdentityProfile> {
        let access_token = self.exchange_code(code).await?;
        self.fetch_profile(&access_token).await
    }

    async fn exchange_code(&self, code: &str) -> Result<String> {
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log_api_error("google_token", &status.to_string(), Some(&body));
            return Err(EventDeskError::IdentityProvider(format!("token exchange returned {}", status)));
        }

        let token: GoogleTokenResponse = response.json().await?;
        debug!("Google token exchange succeeded");
        Ok(token.access_token)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<IdentityProfile> {
        let response = self
            .http_client
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            log_api_error("google_userinfo", &status.to_string(), None);
            return Err(EventDeskError::IdentityProvider(format!("userinfo returned {}", status)));
        }

        let info: GoogleUserInfo = response.json().await?;

        if !info.email_verified {
            warn!(email = %info.email, "Google account email is not verified");
            return Err(EventDeskError::Unauthenticated("Google account email is not verified".to_string()));
        }

        Ok(IdentityProfile {
            subject: info.sub,
            email: info.email,
            display_name: info.name,
        })
    }
}
