//! Comment routes for notes.
//!
//! - POST /post/{id}/comments - Comment on a note
//! - GET /post/{id}/comments - List a note's comments, oldest first

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use noteshare_store::{CommentRow, CommentWithAuthor, NewComment, NewNotification, NotificationKind};

use crate::auth::AuthenticatedUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Upper bound on comment length.
const MAX_COMMENT_CHARS: usize = 5000;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(row: CommentWithAuthor) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            username: row.username,
            text: row.body,
            created_at: row.created,
        }
    }
}

impl CommentResponse {
    fn from_row(row: CommentRow, username: String) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            username,
            text: row.body,
            created_at: row.created,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /post/{id}/comments - Comment on a note.
///
/// # Response
///
/// - 201 Created: the comment
/// - 400 Bad Request: Empty or oversized text
/// - 404 Not Found: `{ "error": "Post not found" }`
async fn create_comment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let text = request.text.trim().to_string();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Comment cannot be empty".to_string()));
    }
    if text.chars().count() > MAX_COMMENT_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Comment too long (max {} characters)",
            MAX_COMMENT_CHARS
        )));
    }

    let comment = NewComment::new(id, user.user_id, text);
    let row = state.store().insert_comment(&comment).await?;

    notify_post_author(&state, id, user.user_id).await;

    tracing::info!(post_id = %id, comment_id = %row.id, "Comment added");

    Ok((
        StatusCode::CREATED,
        Json(CommentResponse::from_row(row, user.username)),
    ))
}

/// GET /post/{id}/comments - List a note's comments, oldest first.
///
/// # Response
///
/// - 200 OK: array of comments
/// - 404 Not Found: `{ "error": "Post not found" }`
async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let rows = state.store().list_comments(id).await?;
    Ok(Json(rows.into_iter().map(CommentResponse::from).collect()))
}

/// Best effort: a failed notification never fails the comment.
async fn notify_post_author(state: &AppState, post_id: Uuid, actor_id: Uuid) {
    let result = async {
        let post = state.store().get_post(post_id).await?;
        state
            .store()
            .insert_notification(&NewNotification {
                recipient_id: post.author_id,
                actor_id,
                kind: NotificationKind::Comment,
                post_id: Some(post_id),
            })
            .await
    }
    .await;

    if let Err(e) = result {
        tracing::warn!(error = %e, post_id = %post_id, "Failed to record comment notification");
    }
}

/// Build comment routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/post/{id}/comments",
        get(list_comments).post(create_comment),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_comment_request_deserialize() {
        let json = r#"{"text": "Great summary, thanks!"}"#;
        let request: CreateCommentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.text, "Great summary, thanks!");
    }

    #[test]
    fn test_comment_response_wire_format() {
        let response = CommentResponse {
            id: Uuid::nil(),
            post_id: Uuid::nil(),
            username: "bob".to_string(),
            text: "nice".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"postId\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"username\":\"bob\""));
    }
}
