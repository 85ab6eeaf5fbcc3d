//! Authentication routes: password login, Google login, current user.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use noteshare_store::{NewUser, UserRow};

use crate::auth::{self, AuthenticatedUser};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
    pub expires_in_hours: u64,
    /// Only set on Google logins: true when the account was just created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new_user: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for UserInfo {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            created_at: row.created,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /auth/login - password login.
///
/// # Response
///
/// - 200 OK: `{ "token": "...", "user": {...}, "expiresInHours": 24 }`
/// - 401 Unauthorized: Unknown email, wrong password, Google-only
///   account, or deactivated account
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let store = state.store();

    let user = store
        .get_user_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    if !user.is_active {
        return Err(ApiError::Unauthorized("Account is deactivated".to_string()));
    }

    // Accounts created through Google sign-in have no password.
    let Some(hash) = &user.password_hash else {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    };

    if !auth::verify_password(&request.password, hash)? {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let config = state.config();
    let token = auth::create_token(
        user.id,
        &user.username,
        &config.jwt_secret,
        config.jwt_expiry_hours,
    )?;

    tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
        expires_in_hours: config.jwt_expiry_hours,
        is_new_user: None,
    }))
}

/// POST /auth/google - login with a Google ID token.
///
/// Verifies the token, then resolves the account: by Google subject,
/// by email (linking the subject to an existing account), or by
/// creating a fresh account on first sign-in.
///
/// # Response
///
/// - 200 OK: `{ "token": "...", "user": {...}, "isNewUser": false }`
/// - 401 Unauthorized: Token invalid, wrong audience, or unverified email
/// - 501 Not Implemented: `GOOGLE_CLIENT_ID` is not configured
async fn google_login(
    State(state): State<AppState>,
    Json(request): Json<GoogleLoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let claims = state.google().verify(&request.id_token).await?;
    let store = state.store();

    let mut is_new_user = false;
    let user = match store.get_user_by_google_sub(&claims.sub).await? {
        Some(user) => user,
        None => match store.get_user_by_email(&claims.email).await? {
            Some(existing) => {
                store.link_google_sub(existing.id, &claims.sub).await?;
                existing
            }
            None => {
                is_new_user = true;
                store
                    .insert_user(&NewUser::from_google(
                        claims.display_username(),
                        claims.email.clone(),
                        claims.sub.clone(),
                    ))
                    .await?
            }
        },
    };

    if !user.is_active {
        return Err(ApiError::Unauthorized("Account is deactivated".to_string()));
    }

    let config = state.config();
    let token = auth::create_token(
        user.id,
        &user.username,
        &config.jwt_secret,
        config.jwt_expiry_hours,
    )?;

    tracing::info!(
        user_id = %user.id,
        is_new_user,
        "User logged in with Google"
    );

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
        expires_in_hours: config.jwt_expiry_hours,
        is_new_user: Some(is_new_user),
    }))
}

/// GET /auth/me - current user info, without the password hash.
async fn me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<UserInfo>> {
    let row = state.store().get_user_by_id(user.user_id).await?;
    Ok(Json(row.into()))
}

/// Build auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/google", post(google_login))
        .route("/auth/me", get(me))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_deserialize() {
        let json = r#"{"email": "a@example.com", "password": "secret"}"#;
        let request: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, "a@example.com");
        assert_eq!(request.password, "secret");
    }

    #[test]
    fn test_google_request_deserialize() {
        let json = r#"{"idToken": "abc.def.ghi"}"#;
        let request: GoogleLoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.id_token, "abc.def.ghi");
    }

    #[test]
    fn test_login_response_serialize() {
        let response = LoginResponse {
            token: "jwt.token.here".to_string(),
            user: UserInfo {
                id: Uuid::nil(),
                username: "alice".to_string(),
                email: "a@example.com".to_string(),
                created_at: Utc::now(),
            },
            expires_in_hours: 24,
            is_new_user: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"token\""));
        assert!(json.contains("\"expiresInHours\":24"));
        assert!(!json.contains("isNewUser"), "omitted on password logins");
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_google_login_response_carries_is_new_user() {
        let response = LoginResponse {
            token: "t".to_string(),
            user: UserInfo {
                id: Uuid::nil(),
                username: "bob".to_string(),
                email: "b@example.com".to_string(),
                created_at: Utc::now(),
            },
            expires_in_hours: 24,
            is_new_user: Some(true),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"isNewUser\":true"));
    }
}
