//! Note upload and read routes.
//!
//! - POST /files - Upload a note (multipart: subject, description, files)
//! - GET /files-fetch - List all notes, newest first
//! - GET /post/{id} - One note with the caller's vote state

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use noteshare_core::Polarity;
use noteshare_store::{NewPost, PostRow, PostWithAuthor};

use crate::auth::{AuthenticatedUser, MaybeUser};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Upper bound on files per note, matching the upload form.
const MAX_FILES_PER_POST: usize = 12;

/// Upper bound on one upload request body.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

// ============================================================================
// Response Types
// ============================================================================

/// The note's author as shown on read paths.
#[derive(Debug, Serialize)]
pub struct AuthorInfo {
    pub id: Uuid,
    pub username: String,
}

/// A note as served to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub subject: String,
    pub description: Option<String>,
    pub file_paths: Vec<String>,
    pub up_votes: i32,
    pub down_votes: i32,
    pub uploaded_at: DateTime<Utc>,
    pub author: AuthorInfo,
}

impl From<PostWithAuthor> for PostResponse {
    fn from(row: PostWithAuthor) -> Self {
        Self {
            id: row.id,
            subject: row.subject,
            description: row.description,
            file_paths: row.file_paths,
            up_votes: row.up_votes,
            down_votes: row.down_votes,
            uploaded_at: row.uploaded_at,
            author: AuthorInfo {
                id: row.author_id,
                username: row.username,
            },
        }
    }
}

impl PostResponse {
    fn from_row(row: PostRow, username: String) -> Self {
        Self {
            id: row.id,
            subject: row.subject,
            description: row.description,
            file_paths: row.file_paths,
            up_votes: row.up_votes,
            down_votes: row.down_votes,
            uploaded_at: row.uploaded_at,
            author: AuthorInfo {
                id: row.author_id,
                username,
            },
        }
    }
}

/// Response for POST /files.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub note: PostResponse,
}

/// Response for GET /post/{id}: the note plus the caller's vote state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub user_vote: Option<Polarity>,
}

// ============================================================================
// Upload Helpers
// ============================================================================

/// Strip any path components and unexpected characters from a client
/// supplied filename.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("upload");
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Write one uploaded file under `upload_dir` with a unique prefix.
///
/// Returns the stored path as recorded on the post.
async fn save_upload(upload_dir: &str, original_name: &str, data: &[u8]) -> Result<String, ApiError> {
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to create upload dir: {}", e)))?;

    let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize_filename(original_name));
    let path = std::path::Path::new(upload_dir).join(&stored_name);

    tokio::fs::write(&path, data)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to write upload: {}", e)))?;

    Ok(path.to_string_lossy().into_owned())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /files - Upload a note.
///
/// Multipart fields: `subject` (required), `description` (optional),
/// and up to 12 `files` parts.
///
/// # Response
///
/// - 201 Created: `{ "message": "...", "note": {...} }`
/// - 400 Bad Request: No files, missing subject, or too many files
async fn upload_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    let upload_dir = state.config().upload_dir.clone();

    let mut subject: Option<String> = None;
    let mut description: Option<String> = None;
    let mut file_paths: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("subject") => {
                subject = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Unreadable subject field: {}", e))
                })?);
            }
            Some("description") => {
                description = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Unreadable description field: {}", e))
                })?);
            }
            Some("files") => {
                if file_paths.len() >= MAX_FILES_PER_POST {
                    return Err(ApiError::BadRequest(format!(
                        "At most {} files per note",
                        MAX_FILES_PER_POST
                    )));
                }
                let original_name = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("Unreadable file part: {}", e))
                })?;
                file_paths.push(save_upload(&upload_dir, &original_name, &data).await?);
            }
            _ => {
                // Unknown fields are ignored.
            }
        }
    }

    if file_paths.is_empty() {
        return Err(ApiError::BadRequest("No files uploaded".to_string()));
    }

    let subject = subject
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Subject is required".to_string()))?;

    let description = description
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let new_post = NewPost::new(user.user_id, subject, description, file_paths);
    let row = state.store().insert_post(&new_post).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to save note");
        ApiError::Store(e)
    })?;

    tracing::info!(
        post_id = %row.id,
        author = %user.user_id,
        files = row.file_paths.len(),
        "Note uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Note saved and files stored.".to_string(),
            note: PostResponse::from_row(row, user.username),
        }),
    ))
}

/// GET /files-fetch - List all notes with author usernames, newest first.
async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<PostResponse>>> {
    let rows = state.store().list_posts().await?;
    let posts = rows.into_iter().map(PostResponse::from).collect();
    Ok(Json(posts))
}

/// GET /post/{id} - One note with author username.
///
/// When the caller sends a valid bearer token, `userVote` reflects
/// their vote on this note; otherwise it is null.
///
/// # Response
///
/// - 200 OK: the note
/// - 404 Not Found: `{ "error": "Post not found" }`
async fn get_post(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PostDetailResponse>> {
    let row = state.store().get_post_with_author(id).await?;

    let user_vote = match &user {
        Some(user) => state.store().get_user_vote(id, user.user_id).await?,
        None => None,
    };

    Ok(Json(PostDetailResponse {
        post: row.into(),
        user_vote,
    }))
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            post(upload_post).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/files-fetch", get(list_posts))
        .route("/post/{id}", get(get_post))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> PostResponse {
        PostResponse {
            id: Uuid::nil(),
            subject: "Linear algebra summary".to_string(),
            description: Some("Chapters 1-4".to_string()),
            file_paths: vec!["./uploads/abc-notes.pdf".to_string()],
            up_votes: 3,
            down_votes: 1,
            uploaded_at: Utc::now(),
            author: AuthorInfo {
                id: Uuid::nil(),
                username: "alice".to_string(),
            },
        }
    }

    #[test]
    fn test_sanitize_filename_plain() {
        assert_eq!(sanitize_filename("notes.pdf"), "notes.pdf");
    }

    #[test]
    fn test_sanitize_filename_strips_paths() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\x\\doc.txt"), "doc.txt");
    }

    #[test]
    fn test_sanitize_filename_drops_odd_characters() {
        assert_eq!(sanitize_filename("my notes (v2).pdf"), "mynotesv2.pdf");
    }

    #[test]
    fn test_sanitize_filename_empty_falls_back() {
        assert_eq!(sanitize_filename(""), "upload");
        assert_eq!(sanitize_filename("///"), "upload");
    }

    #[tokio::test]
    async fn test_save_upload_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_string_lossy().into_owned();

        let stored = save_upload(&dir_str, "summary.txt", b"hello").await.unwrap();
        assert!(stored.ends_with("summary.txt"));

        let contents = tokio::fs::read(&stored).await.unwrap();
        assert_eq!(contents, b"hello");
    }

    #[tokio::test]
    async fn test_save_upload_unique_names() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_string_lossy().into_owned();

        let first = save_upload(&dir_str, "same.txt", b"one").await.unwrap();
        let second = save_upload(&dir_str, "same.txt", b"two").await.unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_post_response_wire_format() {
        let json = serde_json::to_string(&sample_post()).unwrap();
        assert!(json.contains("\"filePaths\""));
        assert!(json.contains("\"upVotes\":3"));
        assert!(json.contains("\"downVotes\":1"));
        assert!(json.contains("\"uploadedAt\""));
        assert!(json.contains("\"username\":\"alice\""));
    }

    #[test]
    fn test_post_detail_flattens_and_adds_user_vote() {
        let detail = PostDetailResponse {
            post: sample_post(),
            user_vote: Some(Polarity::Up),
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(json.contains("\"userVote\":\"up\""));
        assert!(json.contains("\"subject\""));

        let detail = PostDetailResponse {
            post: sample_post(),
            user_vote: None,
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(json.contains("\"userVote\":null"));
    }
}
