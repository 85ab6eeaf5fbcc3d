//! Route definitions for the HTTP API.

pub mod auth;
pub mod bookmarks;
pub mod comments;
pub mod health;
pub mod notifications;
pub mod posts;
pub mod quizzes;
pub mod votes;

use axum::Router;

use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(posts::routes())
        .merge(votes::routes())
        .merge(comments::routes())
        .merge(bookmarks::routes())
        .merge(quizzes::routes())
        .merge(notifications::routes())
        .with_state(state)
}
