#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use learning_api::{
    config::{Config, ProviderConfig},
    create_router,
    models::Selection,
    services::{
        provider::{ContentProvider, ProviderError},
        AppState,
    },
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tower::ServiceExt;

/// Provider returning canned text (or an error) and counting its calls.
pub struct ScriptedProvider {
    lesson: Result<String, String>,
    quiz: Result<String, String>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(lesson: Result<&str, &str>, quiz: Result<&str, &str>) -> Self {
        Self {
            lesson: lesson.map(str::to_string).map_err(str::to_string),
            quiz: quiz.map(str::to_string).map_err(str::to_string),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentProvider for ScriptedProvider {
    async fn generate_lesson(&self, _: &Selection) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.lesson.clone().map_err(ProviderError::Unavailable)
    }

    async fn generate_quiz_raw(&self, _: &Selection) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.quiz.clone().map_err(ProviderError::Unavailable)
    }
}

pub fn test_config() -> Config {
    Config {
        provider: ProviderConfig {
            api_key: "test-key".to_string(),
            model: "gemini-1.5-flash".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 5,
        },
        bind_addr: "127.0.0.1:0".to_string(),
    }
}

pub fn create_test_app(provider: Arc<ScriptedProvider>) -> Router {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let app_state = Arc::new(AppState::with_provider(test_config(), provider));
    create_router(app_state)
}

pub fn five_question_quiz() -> serde_json::Value {
    let questions: Vec<_> = (1..=5)
        .map(|n| {
            serde_json::json!({
                "question": format!("Question {}?", n),
                "options": ["alpha", "beta", "gamma", "delta"],
                "answer": "beta",
                "explanation": format!("Explanation {}.", n),
            })
        })
        .collect();
    serde_json::json!({ "questions": questions })
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}
