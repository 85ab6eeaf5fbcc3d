//! Bookmark routes.
//!
//! - POST /post/{id}/bookmark - Toggle a bookmark on a note
//! - GET /bookmarks - List the caller's bookmarked notes

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::ApiResult;
use crate::routes::posts::PostResponse;
use crate::state::AppState;

/// Response for the bookmark toggle.
#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    /// Whether the note is bookmarked after the toggle.
    pub bookmarked: bool,
}

/// POST /post/{id}/bookmark - Toggle a bookmark.
///
/// # Response
///
/// - 200 OK: `{ "bookmarked": true | false }`
/// - 404 Not Found: `{ "error": "Post not found" }`
async fn toggle_bookmark(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BookmarkResponse>> {
    let bookmarked = state.store().toggle_bookmark(user.user_id, id).await?;

    tracing::info!(post_id = %id, user_id = %user.user_id, bookmarked, "Bookmark toggled");

    Ok(Json(BookmarkResponse { bookmarked }))
}

/// GET /bookmarks - The caller's bookmarked notes, most recent first.
async fn list_bookmarks(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let rows = state.store().list_bookmarked_posts(user.user_id).await?;
    Ok(Json(rows.into_iter().map(PostResponse::from).collect()))
}

/// Build bookmark routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/post/{id}/bookmark", post(toggle_bookmark))
        .route("/bookmarks", get(list_bookmarks))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_response_serialize() {
        let json = serde_json::to_string(&BookmarkResponse { bookmarked: true }).unwrap();
        assert_eq!(json, r#"{"bookmarked":true}"#);
    }
}
