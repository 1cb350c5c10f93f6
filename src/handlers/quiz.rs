//! Quiz API handlers.
//!
//! Thin JSON routes: fetch entries from the dictionary store, hand them to the
//! generator, and store finished quiz scores.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_QUESTION_COUNT, DEFAULT_RESULTS_LIMIT, MAX_QUESTION_COUNT, MIN_QUIZ_ENTRIES,
};
use crate::db::{self, try_lock, EntrySource};
use crate::domain::{QuestionKind, QuizQuestion, QuizResult};
use crate::quiz;
use crate::state::AppState;

use super::error_response;

// ============================================================================
// Generate Quiz
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizQuery {
    /// "vocabulary" (or legacy "vocab") or "sentence"; mixed when absent
    #[serde(rename = "type")]
    pub quiz_type: Option<String>,
    /// Parsed by the handler so bad values get a JSON error
    pub count: Option<String>,
    /// "all" or "learned"
    pub source: Option<String>,
    pub user_id: Option<String>,
    pub lesson_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateQuizResponse {
    pub questions: Vec<QuizQuestion>,
    pub total: usize,
}

fn fetch_failure_message(source: &EntrySource) -> &'static str {
    match source {
        EntrySource::Lesson(_) => "Failed to fetch lesson words",
        EntrySource::Learned(_) => "Failed to fetch learned words",
        EntrySource::All => "Failed to fetch dictionary entries",
    }
}

/// User-facing reason the pool is too small, if it is
fn insufficient_entries_message(source: &EntrySource, available: usize) -> Option<String> {
    if available >= MIN_QUIZ_ENTRIES {
        return None;
    }
    let message = match source {
        EntrySource::Lesson(_) => format!(
            "Not enough words in this lesson to generate quiz (need at least {})",
            MIN_QUIZ_ENTRIES
        ),
        EntrySource::Learned(_) if available == 0 => {
            "No learned words yet. Complete some lessons first!".to_string()
        }
        EntrySource::Learned(_) => format!(
            "Need at least {} learned words to generate a quiz",
            MIN_QUIZ_ENTRIES
        ),
        EntrySource::All => format!(
            "Not enough dictionary entries to generate quiz (need at least {})",
            MIN_QUIZ_ENTRIES
        ),
    };
    Some(message)
}

/// Resolve the requested question count, clamped to `MAX_QUESTION_COUNT`
fn parse_count(raw: Option<&str>) -> Result<usize, String> {
    let raw = match raw.map(str::trim).filter(|c| !c.is_empty()) {
        None => return Ok(DEFAULT_QUESTION_COUNT),
        Some(raw) => raw,
    };
    match raw.parse::<usize>() {
        Ok(0) => Err(quiz::QuizError::InvalidCount.to_string()),
        Ok(n) if n > MAX_QUESTION_COUNT => {
            tracing::debug!("Clamping question count {} to {}", n, MAX_QUESTION_COUNT);
            Ok(MAX_QUESTION_COUNT)
        }
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Invalid count: {}", raw)),
    }
}

/// Generate a multiple-choice quiz.
///
/// GET /api/generate-quiz?type=&count=&source=&userId=&lessonId=
pub async fn generate_quiz(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuizQuery>,
) -> Response {
    let kind = match query.quiz_type.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        None => None,
        Some(t) => match QuestionKind::from_str(t) {
            Some(kind) => Some(kind),
            None => {
                return error_response(StatusCode::BAD_REQUEST, format!("Unsupported quiz type: {}", t))
            }
        },
    };

    let count = match parse_count(query.count.as_deref()) {
        Ok(count) => count,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };

    let source = EntrySource::from_params(
        query.source.as_deref(),
        query.user_id.as_deref(),
        query.lesson_id.as_deref(),
    );

    // Release the lock before generating
    let entries = {
        let conn = match try_lock(&state.db) {
            Ok(conn) => conn,
            Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };
        match db::get_entries(&conn, &source) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Error fetching {} entries: {}", source.as_str(), e);
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, fetch_failure_message(&source));
            }
        }
    };

    let entries: Vec<_> = entries
        .into_iter()
        .filter(|entry| {
            let ok = entry.is_well_formed();
            if !ok {
                tracing::warn!("Skipping malformed dictionary entry {}", entry.id);
            }
            ok
        })
        .collect();

    if let Some(message) = insufficient_entries_message(&source, entries.len()) {
        return error_response(StatusCode::BAD_REQUEST, message);
    }

    match quiz::generate_quiz(&entries, count, kind) {
        Ok(questions) => {
            tracing::info!(
                "Generated {} question quiz from {} {} entries",
                questions.len(),
                entries.len(),
                source.as_str()
            );
            let response = GenerateQuizResponse {
                total: questions.len(),
                questions,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::warn!("Quiz generation failed: {}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
    }
}

// ============================================================================
// Quiz Results
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResultRequest {
    pub user_id: String,
    /// Client-assigned quiz id
    pub quiz_id: Option<String>,
    /// Lesson the quiz covered; used to build the id when `quizId` is absent
    pub lesson_id: Option<String>,
    /// Percentage of correct answers
    pub score: i64,
}

/// Store a finished quiz.
///
/// POST /api/quiz-results
pub async fn submit_quiz_result(
    State(state): State<AppState>,
    Json(request): Json<SubmitQuizResultRequest>,
) -> Response {
    if request.user_id.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "userId is required");
    }
    fn non_blank(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }
    let quiz_id = match (non_blank(request.quiz_id.as_deref()), non_blank(request.lesson_id.as_deref())) {
        (Some(id), _) => id.to_string(),
        (None, Some(lesson)) => db::lesson_quiz_id(lesson, Utc::now()),
        (None, None) => {
            return error_response(StatusCode::BAD_REQUEST, "quizId or lessonId is required")
        }
    };
    let score = match u8::try_from(request.score) {
        Ok(score) if score <= 100 => score,
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Score must be between 0 and 100, got {}", request.score),
            )
        }
    };

    let conn = match try_lock(&state.db) {
        Ok(conn) => conn,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    match db::insert_quiz_result(&conn, &request.user_id, &quiz_id, score) {
        Ok(result) => (StatusCode::CREATED, Json(result)).into_response(),
        Err(e) => {
            tracing::error!("Failed to save quiz result: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save quiz result")
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsQuery {
    pub user_id: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResultsResponse {
    pub results: Vec<QuizResult>,
}

/// Recent quiz results for a user, newest first.
///
/// GET /api/quiz-results?userId=&limit=
pub async fn list_quiz_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(DEFAULT_RESULTS_LIMIT).clamp(1, 100);

    let conn = match try_lock(&state.db) {
        Ok(conn) => conn,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    match db::get_recent_results(&conn, &query.user_id, limit) {
        Ok(results) => (StatusCode::OK, Json(QuizResultsResponse { results })).into_response(),
        Err(e) => {
            tracing::error!("Failed to load quiz results: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load quiz results")
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedLessonsQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedLessonsResponse {
    pub lesson_ids: Vec<String>,
}

/// Lessons the user has finished a quiz for.
///
/// GET /api/quiz-results/completed-lessons?userId=
pub async fn completed_lessons(
    State(state): State<AppState>,
    Query(query): Query<CompletedLessonsQuery>,
) -> Response {
    let conn = match try_lock(&state.db) {
        Ok(conn) => conn,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    match db::get_completed_lesson_quizzes(&conn, &query.user_id) {
        Ok(lesson_ids) => {
            (StatusCode::OK, Json(CompletedLessonsResponse { lesson_ids })).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to load completed lessons: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load completed lessons")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_messages_per_source() {
        let lesson = EntrySource::Lesson("1.0".to_string());
        let learned = EntrySource::Learned("alice".to_string());

        assert!(insufficient_entries_message(&EntrySource::All, 4).is_none());
        assert!(insufficient_entries_message(&lesson, 3).unwrap().contains("lesson"));
        assert_eq!(
            insufficient_entries_message(&learned, 0).unwrap(),
            "No learned words yet. Complete some lessons first!"
        );
        assert_eq!(
            insufficient_entries_message(&learned, 2).unwrap(),
            "Need at least 4 learned words to generate a quiz"
        );
        assert!(insufficient_entries_message(&EntrySource::All, 0)
            .unwrap()
            .contains("dictionary entries"));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(None), Ok(DEFAULT_QUESTION_COUNT));
        assert_eq!(parse_count(Some(" ")), Ok(DEFAULT_QUESTION_COUNT));
        assert_eq!(parse_count(Some("7")), Ok(7));
        assert_eq!(parse_count(Some("500")), Ok(MAX_QUESTION_COUNT));
        assert!(parse_count(Some("0")).is_err());
        assert_eq!(parse_count(Some("abc")), Err("Invalid count: abc".to_string()));
        assert_eq!(parse_count(Some("-1")), Err("Invalid count: -1".to_string()));
    }

    #[test]
    fn test_fetch_failure_messages() {
        assert_eq!(
            fetch_failure_message(&EntrySource::Learned("a".to_string())),
            "Failed to fetch learned words"
        );
        assert_eq!(fetch_failure_message(&EntrySource::All), "Failed to fetch dictionary entries");
    }
}
