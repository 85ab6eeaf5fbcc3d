//! Quiz routes: create, browse, take, and review quizzes.
//!
//! - POST /quizzes - Create a quiz
//! - GET /quizzes - List quiz summaries
//! - GET /quizzes/{id} - One quiz (answer key redacted for non-creators)
//! - POST /quizzes/{id}/attempts - Submit answers, graded server-side
//! - GET /quizzes/{id}/attempts - Review attempts

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use noteshare_core::{Choice, Options, Question, max_score, score_attempt};
use noteshare_store::{NewQuiz, NewQuizAttempt, QuizAttemptRow, QuizWithCreator};

use crate::auth::{AuthenticatedUser, MaybeUser};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Upper bound on questions per quiz.
const MAX_QUESTIONS: usize = 100;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateQuizRequest {
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: Uuid,
    pub title: String,
    pub username: String,
    pub question_count: usize,
    pub created_at: DateTime<Utc>,
}

/// A question as shown to quiz takers: no answer key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PublicQuestion<'a> {
    id: Uuid,
    question: &'a str,
    options: &'a Options,
    score: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    /// Full questions for the creator, redacted ones for everyone else.
    pub questions: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct AttemptRequest {
    /// Question id -> chosen option.
    pub answers: HashMap<Uuid, Choice>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResponse {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub max_score: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummary {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub username: String,
    pub score: i32,
    pub attempted_at: DateTime<Utc>,
}

impl From<QuizAttemptRow> for AttemptSummary {
    fn from(row: QuizAttemptRow) -> Self {
        Self {
            id: row.id,
            quiz_id: row.quiz_id,
            username: row.username,
            score: row.score,
            attempted_at: row.attempted_at,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Reject structurally invalid quizzes before they reach the store.
fn validate_quiz(title: &str, questions: &[Question]) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::BadRequest("Quiz title cannot be empty".to_string()));
    }
    if questions.is_empty() {
        return Err(ApiError::BadRequest(
            "A quiz needs at least one question".to_string(),
        ));
    }
    if questions.len() > MAX_QUESTIONS {
        return Err(ApiError::BadRequest(format!(
            "At most {} questions per quiz",
            MAX_QUESTIONS
        )));
    }
    for question in questions {
        if question.question.trim().is_empty() {
            return Err(ApiError::BadRequest(
                "Questions cannot be empty".to_string(),
            ));
        }
        if question.score < 0 {
            return Err(ApiError::BadRequest(
                "Question scores cannot be negative".to_string(),
            ));
        }
    }
    Ok(())
}

/// Serialize questions for a reader: the creator sees the answer key,
/// everyone else gets the redacted form.
fn questions_for_reader(
    quiz: &QuizWithCreator,
    reader: Option<Uuid>,
) -> Result<serde_json::Value, ApiError> {
    let questions = quiz
        .parse_questions()
        .map_err(|e| ApiError::Internal(format!("Stored questions unreadable: {}", e)))?;

    if reader == Some(quiz.creator_id) {
        return serde_json::to_value(&questions)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize questions: {}", e)));
    }

    let public: Vec<PublicQuestion<'_>> = questions
        .iter()
        .map(|q| PublicQuestion {
            id: q.id,
            question: &q.question,
            options: &q.options,
            score: q.score,
        })
        .collect();
    serde_json::to_value(&public)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize questions: {}", e)))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /quizzes - Create a quiz.
///
/// # Response
///
/// - 201 Created: the quiz summary
/// - 400 Bad Request: Empty title, no questions, or malformed questions
async fn create_quiz(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateQuizRequest>,
) -> ApiResult<(StatusCode, Json<QuizSummary>)> {
    validate_quiz(&request.title, &request.questions)?;

    let new_quiz = NewQuiz::new(
        request.title.trim().to_string(),
        user.user_id,
        request.questions,
    );
    let row = state.store().insert_quiz(&new_quiz).await?;

    let question_count = new_quiz.questions.len();

    tracing::info!(
        quiz_id = %row.id,
        creator = %user.user_id,
        questions = question_count,
        "Quiz created"
    );

    Ok((
        StatusCode::CREATED,
        Json(QuizSummary {
            id: row.id,
            title: row.title,
            username: user.username,
            question_count,
            created_at: row.created,
        }),
    ))
}

/// GET /quizzes - List quiz summaries, newest first.
async fn list_quizzes(State(state): State<AppState>) -> ApiResult<Json<Vec<QuizSummary>>> {
    let rows = state.store().list_quizzes().await?;

    let mut summaries = Vec::with_capacity(rows.len());
    for row in rows {
        let question_count = row
            .parse_questions()
            .map(|qs| qs.len())
            .unwrap_or(0);
        summaries.push(QuizSummary {
            id: row.id,
            title: row.title,
            username: row.username,
            question_count,
            created_at: row.created,
        });
    }

    Ok(Json(summaries))
}

/// GET /quizzes/{id} - One quiz.
///
/// The answer key is only included for the quiz's creator.
///
/// # Response
///
/// - 200 OK: the quiz
/// - 404 Not Found: `{ "error": "Quiz not found" }`
async fn get_quiz(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<QuizDetailResponse>> {
    let row = state.store().get_quiz(id).await?;
    let questions = questions_for_reader(&row, user.map(|u| u.user_id))?;

    Ok(Json(QuizDetailResponse {
        id: row.id,
        title: row.title,
        username: row.username,
        created_at: row.created,
        questions,
    }))
}

/// POST /quizzes/{id}/attempts - Submit answers.
///
/// The score is computed here from the stored answer key; clients never
/// submit one.
///
/// # Response
///
/// - 201 Created: `{ "id": "...", "quizId": "...", "score": n, "maxScore": m }`
/// - 404 Not Found: `{ "error": "Quiz not found" }`
async fn submit_attempt(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<AttemptRequest>,
) -> ApiResult<(StatusCode, Json<AttemptResponse>)> {
    let quiz = state.store().get_quiz(id).await?;
    let questions = quiz
        .parse_questions()
        .map_err(|e| ApiError::Internal(format!("Stored questions unreadable: {}", e)))?;

    let score = score_attempt(&questions, &request.answers);

    let attempt = NewQuizAttempt {
        id: Uuid::new_v4(),
        quiz_id: id,
        user_id: user.user_id,
        answers: serde_json::to_value(&request.answers)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize answers: {}", e)))?,
        score,
    };
    let attempt_id = state.store().insert_attempt(&attempt).await?;

    tracing::info!(
        quiz_id = %id,
        user_id = %user.user_id,
        score,
        "Quiz attempt recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(AttemptResponse {
            id: attempt_id,
            quiz_id: id,
            score,
            max_score: max_score(&questions),
        }),
    ))
}

/// GET /quizzes/{id}/attempts - Review attempts, newest first.
///
/// The creator sees every attempt; other callers see only their own.
async fn list_attempts(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<AttemptSummary>>> {
    let quiz = state.store().get_quiz(id).await?;

    let rows = if quiz.creator_id == user.user_id {
        state.store().list_attempts(id).await?
    } else {
        state.store().list_attempts_by_user(id, user.user_id).await?
    };

    Ok(Json(rows.into_iter().map(AttemptSummary::from).collect()))
}

/// Build quiz routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quizzes", get(list_quizzes).post(create_quiz))
        .route("/quizzes/{id}", get(get_quiz))
        .route(
            "/quizzes/{id}/attempts",
            get(list_attempts).post(submit_attempt),
        )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: Choice, score: i32) -> Question {
        Question {
            id: Uuid::new_v4(),
            question: "What is the derivative of x^2?".to_string(),
            options: Options {
                a: "2x".to_string(),
                b: "x".to_string(),
                c: "x^2".to_string(),
                d: "2".to_string(),
            },
            correct_answer: correct,
            score,
        }
    }

    fn quiz_row(creator: Uuid, questions: &[Question]) -> QuizWithCreator {
        QuizWithCreator {
            id: Uuid::new_v4(),
            title: "Calculus basics".to_string(),
            creator_id: creator,
            username: "alice".to_string(),
            questions: serde_json::to_value(questions).unwrap(),
            created: Utc::now(),
        }
    }

    #[test]
    fn test_validate_quiz_accepts_reasonable_input() {
        let questions = vec![question(Choice::A, 5)];
        assert!(validate_quiz("Calculus", &questions).is_ok());
    }

    #[test]
    fn test_validate_quiz_rejects_empty_title() {
        let questions = vec![question(Choice::A, 5)];
        assert!(validate_quiz("  ", &questions).is_err());
    }

    #[test]
    fn test_validate_quiz_rejects_no_questions() {
        assert!(validate_quiz("Calculus", &[]).is_err());
    }

    #[test]
    fn test_validate_quiz_rejects_negative_score() {
        let questions = vec![question(Choice::A, -1)];
        assert!(validate_quiz("Calculus", &questions).is_err());
    }

    #[test]
    fn test_questions_redacted_for_non_creator() {
        let creator = Uuid::new_v4();
        let questions = vec![question(Choice::B, 3)];
        let row = quiz_row(creator, &questions);

        let value = questions_for_reader(&row, Some(Uuid::new_v4())).unwrap();
        let json = value.to_string();
        assert!(!json.contains("correctAnswer"));
        assert!(json.contains("\"options\""));

        let value = questions_for_reader(&row, None).unwrap();
        assert!(!value.to_string().contains("correctAnswer"));
    }

    #[test]
    fn test_questions_full_for_creator() {
        let creator = Uuid::new_v4();
        let questions = vec![question(Choice::B, 3)];
        let row = quiz_row(creator, &questions);

        let value = questions_for_reader(&row, Some(creator)).unwrap();
        assert!(value.to_string().contains("\"correctAnswer\":\"B\""));
    }

    #[test]
    fn test_attempt_request_deserialize() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"answers": {{"{}": "C"}}}}"#, id);
        let request: AttemptRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.answers.get(&id), Some(&Choice::C));
    }

    #[test]
    fn test_attempt_response_wire_format() {
        let response = AttemptResponse {
            id: Uuid::nil(),
            quiz_id: Uuid::nil(),
            score: 7,
            max_score: 10,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"quizId\""));
        assert!(json.contains("\"score\":7"));
        assert!(json.contains("\"maxScore\":10"));
    }
}
