//! Error types for the storage layer.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection error.
    #[error("database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    /// Post not found.
    #[error("post not found: {0}")]
    PostNotFound(Uuid),

    /// User not found.
    #[error("user not found: {0}")]
    UserNotFound(Uuid),

    /// Quiz not found.
    #[error("quiz not found: {0}")]
    QuizNotFound(Uuid),

    /// Notification not found (or not owned by the caller).
    #[error("notification not found: {0}")]
    NotificationNotFound(Uuid),

    /// A user with this email already exists.
    #[error("duplicate email: {0}")]
    DuplicateEmail(String),

    /// A stored vote row failed to parse.
    #[error("corrupt vote row: {0}")]
    CorruptVote(String),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
