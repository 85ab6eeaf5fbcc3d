//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for sqlx
//! queries. Rows that the API serves with an author name attached carry
//! the joined `username` column.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use noteshare_core::Polarity;

// ==================== Users ====================

/// Database row for the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// NULL for accounts created through Google sign-in.
    pub password_hash: Option<String>,
    /// Google subject claim; NULL for password-only accounts.
    pub google_sub: Option<String>,
    pub is_active: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Input for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub google_sub: Option<String>,
}

impl NewUser {
    /// A password account (operator bootstrap).
    pub fn with_password(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash: Some(password_hash),
            google_sub: None,
        }
    }

    /// An account created on first Google sign-in.
    pub fn from_google(username: String, email: String, google_sub: String) -> Self {
        Self {
            username,
            email,
            password_hash: None,
            google_sub: Some(google_sub),
        }
    }
}

// ==================== Posts ====================

/// Database row for the `posts` table.
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub subject: String,
    pub description: Option<String>,
    pub file_paths: Vec<String>,
    pub up_votes: i32,
    pub down_votes: i32,
    pub uploaded_at: DateTime<Utc>,
}

/// A post joined with its author's username for read paths.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub author_id: Uuid,
    pub username: String,
    pub subject: String,
    pub description: Option<String>,
    pub file_paths: Vec<String>,
    pub up_votes: i32,
    pub down_votes: i32,
    pub uploaded_at: DateTime<Utc>,
}

/// Input for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub id: Uuid,
    pub author_id: Uuid,
    pub subject: String,
    pub description: Option<String>,
    pub file_paths: Vec<String>,
}

impl NewPost {
    pub fn new(
        author_id: Uuid,
        subject: String,
        description: Option<String>,
        file_paths: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            subject,
            description,
            file_paths,
        }
    }
}

// ==================== Votes ====================

/// Result of applying one vote toggle to a post.
///
/// Counts are the recomputed aggregates; `user_vote` is the caller's
/// state after the toggle. `vote_created` is true only when a brand-new
/// vote row was inserted (used to decide whether to notify the author).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub up_votes: i32,
    pub down_votes: i32,
    pub user_vote: Option<Polarity>,
    pub vote_created: bool,
}

// ==================== Comments ====================

/// Database row for the `comments` table.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created: DateTime<Utc>,
}

/// A comment joined with its author's username.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub username: String,
    pub body: String,
    pub created: DateTime<Utc>,
}

/// Input for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
}

impl NewComment {
    pub fn new(post_id: Uuid, author_id: Uuid, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            body,
        }
    }
}

// ==================== Quizzes ====================

/// Database row for the `quizzes` table.
///
/// `questions` holds the JSONB array; parse it with [`QuizRow::parse_questions`].
#[derive(Debug, Clone, FromRow)]
pub struct QuizRow {
    pub id: Uuid,
    pub title: String,
    pub creator_id: Uuid,
    pub questions: serde_json::Value,
    pub created: DateTime<Utc>,
}

impl QuizRow {
    /// Parse the questions JSONB field.
    pub fn parse_questions(&self) -> Result<Vec<noteshare_core::Question>, serde_json::Error> {
        serde_json::from_value(self.questions.clone())
    }
}

/// A quiz joined with its creator's username.
#[derive(Debug, Clone, FromRow)]
pub struct QuizWithCreator {
    pub id: Uuid,
    pub title: String,
    pub creator_id: Uuid,
    pub username: String,
    pub questions: serde_json::Value,
    pub created: DateTime<Utc>,
}

impl QuizWithCreator {
    pub fn parse_questions(&self) -> Result<Vec<noteshare_core::Question>, serde_json::Error> {
        serde_json::from_value(self.questions.clone())
    }
}

/// Input for creating a new quiz.
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub id: Uuid,
    pub title: String,
    pub creator_id: Uuid,
    pub questions: Vec<noteshare_core::Question>,
}

impl NewQuiz {
    pub fn new(title: String, creator_id: Uuid, questions: Vec<noteshare_core::Question>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            creator_id,
            questions,
        }
    }
}

/// Database row for the `quiz_attempts` table, joined with the username.
#[derive(Debug, Clone, FromRow)]
pub struct QuizAttemptRow {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub answers: serde_json::Value,
    pub score: i32,
    pub attempted_at: DateTime<Utc>,
}

/// Input for recording a graded attempt.
#[derive(Debug, Clone)]
pub struct NewQuizAttempt {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub user_id: Uuid,
    pub answers: serde_json::Value,
    pub score: i32,
}

// ==================== Notifications ====================

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Comment,
    Vote,
}

impl NotificationKind {
    /// Stable string form used in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Vote => "vote",
        }
    }
}

/// Database row for the `notifications` table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationRow {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub actor_id: Uuid,
    pub kind: String,
    pub post_id: Option<Uuid>,
    pub read: bool,
    pub created: DateTime<Utc>,
}

/// Input for creating a notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: Uuid,
    pub actor_id: Uuid,
    pub kind: NotificationKind,
    pub post_id: Option<Uuid>,
}
