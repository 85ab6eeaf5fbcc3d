//! noteshare-store: Storage layer for the noteshare platform
//!
//! This crate provides:
//! - PostgreSQL storage for users, posts, votes, comments, bookmarks,
//!   quizzes, and notifications
//! - Migration management (embedded, idempotent SQL)
//! - Type-safe database operations via sqlx
//! - The transactional vote-toggle operation backing the vote ledger
//!
//! # Usage
//!
//! ```rust,ignore
//! use noteshare_store::{Store, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = Store::connect(config).await?;
//!
//! let outcome = store.apply_vote(post_id, voter_id, Polarity::Up).await?;
//! ```

pub mod error;
pub mod models;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::*;
pub use store::{Store, StoreConfig};

// Re-export noteshare-core for downstream crates
pub use noteshare_core;
