//! Google ID token verification via the tokeninfo endpoint.
//!
//! Signature and expiry checks happen at Google's side; this module
//! forwards the token, then validates the claims that matter to us:
//! the audience must be our client id and the email must be verified.

use serde::Deserialize;

use crate::error::ApiError;

/// Google's tokeninfo endpoint for ID tokens.
const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Claims returned by the tokeninfo endpoint.
///
/// Numeric and boolean claims arrive as strings on this endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleClaims {
    /// Stable Google account id.
    pub sub: String,
    /// Client id the token was issued for.
    pub aud: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: String,
    /// Display name; not always present.
    #[serde(default)]
    pub name: Option<String>,
}

impl GoogleClaims {
    /// Username for an account created on first sign-in: the display
    /// name if Google provided one, otherwise the email local part.
    pub fn display_username(&self) -> String {
        if let Some(name) = &self.name
            && !name.trim().is_empty()
        {
            return name.trim().to_string();
        }
        self.email
            .split('@')
            .next()
            .unwrap_or(&self.email)
            .to_string()
    }
}

/// Verifies Google ID tokens for login.
#[derive(Debug, Clone)]
pub struct GoogleVerifier {
    http: reqwest::Client,
    client_id: Option<String>,
}

impl GoogleVerifier {
    /// Create a verifier; Google sign-in is disabled when `client_id` is None.
    pub fn new(client_id: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
        }
    }

    /// Verify an ID token and return its claims.
    pub async fn verify(&self, id_token: &str) -> Result<GoogleClaims, ApiError> {
        let Some(client_id) = &self.client_id else {
            return Err(ApiError::NotImplemented(
                "Google sign-in is not configured".to_string(),
            ));
        };

        let response = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| ApiError::Internal(format!("tokeninfo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::Unauthorized("Invalid Google token".to_string()));
        }

        let claims: GoogleClaims = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(format!("tokeninfo response unreadable: {}", e)))?;

        validate_claims(&claims, client_id)?;
        Ok(claims)
    }
}

/// Check the claims Google does not check for us.
fn validate_claims(claims: &GoogleClaims, client_id: &str) -> Result<(), ApiError> {
    if claims.aud != client_id {
        return Err(ApiError::Unauthorized(
            "Google token issued for a different application".to_string(),
        ));
    }
    if claims.email_verified != "true" {
        return Err(ApiError::Unauthorized(
            "Google account email is not verified".to_string(),
        ));
    }
    Ok(())
}
