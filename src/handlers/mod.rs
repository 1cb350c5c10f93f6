pub mod quiz;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::get,
  Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use quiz::{completed_lessons, generate_quiz, list_quiz_results, submit_quiz_result};

/// Build the application router
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/api/generate-quiz", get(generate_quiz))
    .route("/api/quiz-results", get(list_quiz_results).post(submit_quiz_result))
    .route("/api/quiz-results/completed-lessons", get(completed_lessons))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

pub async fn health() -> &'static str {
  "ok"
}

/// JSON `{ "error": message }` with the given status
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
  (
    status,
    Json(serde_json::json!({
      "error": message.into()
    })),
  )
    .into_response()
}
