use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::{
    extractors::AppJson,
    metrics::record_quiz_scored,
    models::{
        catalog::{self, CatalogResponse},
        LessonRequest, LessonResponse, Quiz, ScoreRequest, Selection,
    },
    services::{lesson_renderer::render_lesson_html, AppState},
    session::{self, Event, SessionState},
};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        let json_response = serde_json::json!({
            "message": message,
            "status": status.as_u16()
        });
        (status, Json(json_response)).into_response()
    }
}

fn validated_selection(req: LessonRequest) -> Result<Selection, ApiError> {
    req.validate()
        .map_err(|e| ApiError::bad_request(format!("Validation error: {}", e)))?;
    Ok(req.into())
}

/// POST /generate_lesson
pub async fn generate_lesson(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LessonRequest>,
) -> Result<Json<LessonResponse>, ApiError> {
    let selection = validated_selection(req)?;
    tracing::info!(
        "Generating lesson: topic={}, level={}, subject={}",
        selection.topic,
        selection.level,
        selection.subject
    );

    let lesson = state.content.generate_lesson(&selection).await;

    Ok(Json(LessonResponse {
        lesson_html: render_lesson_html(&lesson),
    }))
}

/// POST /generate_quiz
pub async fn generate_quiz(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LessonRequest>,
) -> Result<Json<Quiz>, ApiError> {
    let selection = validated_selection(req)?;
    tracing::info!(
        "Generating quiz: topic={}, level={}, subject={}",
        selection.topic,
        selection.level,
        selection.subject
    );

    let quiz = state.content.generate_quiz(&selection).await;
    tracing::info!(
        "Quiz ready for topic={} with {} questions",
        selection.topic,
        quiz.len()
    );

    Ok(Json(quiz))
}

/// GET /subjects
pub async fn list_subjects() -> Json<CatalogResponse> {
    Json(catalog::catalog())
}

/// POST /score - grades a submitted quiz through the same state machine the wizard uses
pub async fn score_quiz(
    AppJson(req): AppJson<ScoreRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let state = SessionState::Taking {
        selection: Selection::new("submitted", "submitted", "submitted"),
        lesson: String::new(),
        quiz: req.quiz,
    };
    let answers = req.answers.into_iter().map(Some).collect();

    match session::transition(&state, Event::Submit { answers }) {
        Ok(SessionState::Results { scorecard, .. }) => {
            record_quiz_scored(scorecard.band.label());
            Ok((StatusCode::OK, Json(scorecard)))
        }
        Ok(other) => Err(ApiError::Internal(format!(
            "unexpected session stage after submit: {}",
            other.stage()
        ))),
        Err(e) => Err(ApiError::bad_request(e.to_string())),
    }
}
