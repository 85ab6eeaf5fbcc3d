//! Vote endpoints for notes.
//!
//! - POST /post/{id}/upvote
//! - POST /post/{id}/downvote
//!
//! Both are the same toggle parameterized by polarity; the four-branch
//! transition itself lives in `noteshare_core::vote` and the atomic
//! persistence step in `Store::apply_vote`.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use serde::Serialize;
use uuid::Uuid;

use noteshare_core::Polarity;
use noteshare_store::{NewNotification, NotificationKind};

use crate::auth::AuthenticatedUser;
use crate::error::ApiResult;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

/// Response for both vote endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub up_votes: i32,
    pub down_votes: i32,
    /// The caller's state after the toggle: "up", "down", or null.
    pub user_vote: Option<Polarity>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /post/{id}/upvote
///
/// # Response
///
/// - 200 OK: `{ "upVotes": n, "downVotes": m, "userVote": "up" | "down" | null }`
/// - 401 Unauthorized: Missing or invalid token
/// - 404 Not Found: `{ "error": "Post not found" }`
async fn upvote(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<VoteResponse>> {
    cast_vote(state, user, id, Polarity::Up).await
}

/// POST /post/{id}/downvote
///
/// Same toggle as upvote with the opposite polarity.
async fn downvote(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<VoteResponse>> {
    cast_vote(state, user, id, Polarity::Down).await
}

/// The single vote path behind both endpoints.
async fn cast_vote(
    state: AppState,
    user: AuthenticatedUser,
    post_id: Uuid,
    requested: Polarity,
) -> ApiResult<Json<VoteResponse>> {
    let outcome = state
        .store()
        .apply_vote(post_id, user.user_id, requested)
        .await?;

    // Only a brand-new vote notifies the author; flips and removals
    // stay quiet.
    if outcome.vote_created {
        notify_post_author(&state, post_id, user.user_id).await;
    }

    tracing::info!(
        post_id = %post_id,
        voter = %user.user_id,
        requested = %requested,
        up_votes = outcome.up_votes,
        down_votes = outcome.down_votes,
        "Vote applied"
    );

    Ok(Json(VoteResponse {
        up_votes: outcome.up_votes,
        down_votes: outcome.down_votes,
        user_vote: outcome.user_vote,
    }))
}

/// Best effort: a failed notification never fails the vote.
async fn notify_post_author(state: &AppState, post_id: Uuid, actor_id: Uuid) {
    let result = async {
        let post = state.store().get_post(post_id).await?;
        state
            .store()
            .insert_notification(&NewNotification {
                recipient_id: post.author_id,
                actor_id,
                kind: NotificationKind::Vote,
                post_id: Some(post_id),
            })
            .await
    }
    .await;

    if let Err(e) = result {
        tracing::warn!(error = %e, post_id = %post_id, "Failed to record vote notification");
    }
}

/// Build vote routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/post/{id}/upvote", post(upvote))
        .route("/post/{id}/downvote", post(downvote))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_response_with_vote() {
        let response = VoteResponse {
            up_votes: 1,
            down_votes: 0,
            user_vote: Some(Polarity::Up),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"upVotes":1,"downVotes":0,"userVote":"up"}"#);
    }

    #[test]
    fn test_vote_response_without_vote() {
        let response = VoteResponse {
            up_votes: 0,
            down_votes: 0,
            user_vote: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"upVotes":0,"downVotes":0,"userVote":null}"#);
    }

    #[test]
    fn test_vote_response_down() {
        let response = VoteResponse {
            up_votes: 0,
            down_votes: 1,
            user_vote: Some(Polarity::Down),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"userVote\":\"down\""));
    }
}
