//! Notification routes.
//!
//! Notifications are rows the client polls; nothing is pushed.
//!
//! - GET /notifications - The caller's notifications, newest first
//! - POST /notifications/{id}/read - Mark one read
//! - POST /notifications/read-all - Mark all read

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use noteshare_store::NotificationRow;

use crate::auth::AuthenticatedUser;
use crate::error::ApiResult;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: Uuid,
    /// "comment" or "vote".
    pub kind: String,
    pub actor_id: Uuid,
    pub post_id: Option<Uuid>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationRow> for NotificationResponse {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            kind: row.kind,
            actor_id: row.actor_id,
            post_id: row.post_id,
            read: row.read,
            created_at: row.created,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadAllResponse {
    /// How many notifications were newly marked read.
    pub updated: u64,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /notifications - The caller's notifications, newest first.
async fn list_notifications(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let rows = state.store().list_notifications(user.user_id).await?;
    Ok(Json(
        rows.into_iter().map(NotificationResponse::from).collect(),
    ))
}

/// POST /notifications/{id}/read - Mark one notification read.
///
/// # Response
///
/// - 204 No Content
/// - 404 Not Found: Not the caller's notification (or it doesn't exist)
async fn mark_read(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .store()
        .mark_notification_read(id, user.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /notifications/read-all - Mark all of the caller's notifications read.
async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ReadAllResponse>> {
    let updated = state
        .store()
        .mark_all_notifications_read(user.user_id)
        .await?;
    Ok(Json(ReadAllResponse { updated }))
}

/// Build notification routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/read", post(mark_read))
        .route("/notifications/read-all", post(mark_all_read))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_response_wire_format() {
        let response = NotificationResponse {
            id: Uuid::nil(),
            kind: "comment".to_string(),
            actor_id: Uuid::nil(),
            post_id: Some(Uuid::nil()),
            read: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"kind\":\"comment\""));
        assert!(json.contains("\"actorId\""));
        assert!(json.contains("\"postId\""));
        assert!(json.contains("\"read\":false"));
    }

    #[test]
    fn test_read_all_response_serialize() {
        let json = serde_json::to_string(&ReadAllResponse { updated: 3 }).unwrap();
        assert_eq!(json, r#"{"updated":3}"#);
    }
}
