//! noteshare-server: HTTP API server for the noteshare platform
//!
//! This crate provides:
//! - REST API endpoints for notes, votes, comments, bookmarks, quizzes,
//!   and notifications
//! - Password and Google sign-in with JWT bearer sessions
//! - Multipart note uploads stored on local disk
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - JSON error responses
//!
//! # Usage
//!
//! ```rust,ignore
//! use noteshare_server::{config::ServerConfig, routes, state::AppState};
//!
//! let config = ServerConfig::from_env()?;
//! let store = noteshare_store::Store::connect(store_config).await?;
//! let app = routes::build_router(AppState::new(store, config));
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod google;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use noteshare_core;
pub use noteshare_store;
