use std::sync::Arc;

use super::content_cache::ContentCache;
use super::provider::ContentProvider;
use super::quiz_parser;
use crate::metrics::{
    record_cache_hit, record_cache_miss, LESSONS_GENERATED_TOTAL, QUIZZES_GENERATED_TOTAL,
};
use crate::models::{Quiz, Selection};

/// Lesson and quiz generation that never fails.
///
/// Provider errors turn into an error string (lesson) or the fallback quiz,
/// so the session state machine always has well-formed data. With a cache,
/// whatever comes back (placeholders included) is memoized per selection and
/// the provider is asked at most once for each.
pub struct ContentService {
    provider: Arc<dyn ContentProvider>,
    cache: Option<ContentCache>,
}

impl ContentService {
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            provider,
            cache: None,
        }
    }

    pub fn with_cache(provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            provider,
            cache: Some(ContentCache::new()),
        }
    }

    pub async fn generate_lesson(&self, selection: &Selection) -> String {
        if let Some(cache) = &self.cache {
            if let Some(lesson) = cache.lesson(selection).await {
                record_cache_hit("lesson");
                tracing::debug!("Lesson served from cache for topic={}", selection.topic);
                return lesson;
            }
            record_cache_miss("lesson");
        }

        let lesson = match self.provider.generate_lesson(selection).await {
            Ok(lesson) => {
                LESSONS_GENERATED_TOTAL.with_label_values(&["ok"]).inc();
                lesson
            }
            Err(e) => {
                LESSONS_GENERATED_TOTAL
                    .with_label_values(&["provider_error"])
                    .inc();
                tracing::error!(
                    "Failed to generate lesson for topic={}: {}",
                    selection.topic,
                    e
                );
                format!("An error occurred while generating the lesson: {}", e)
            }
        };

        if let Some(cache) = &self.cache {
            cache.store_lesson(selection.clone(), lesson.clone()).await;
        }
        lesson
    }

    pub async fn generate_quiz(&self, selection: &Selection) -> Quiz {
        if let Some(cache) = &self.cache {
            if let Some(quiz) = cache.quiz(selection).await {
                record_cache_hit("quiz");
                tracing::debug!("Quiz served from cache for topic={}", selection.topic);
                return quiz;
            }
            record_cache_miss("quiz");
        }

        let quiz = match self.provider.generate_quiz_raw(selection).await {
            Ok(raw) => quiz_parser::parse(&raw, &selection.topic),
            Err(e) => {
                QUIZZES_GENERATED_TOTAL
                    .with_label_values(&["provider_error"])
                    .inc();
                tracing::error!(
                    "Failed to generate quiz for topic={}: {}",
                    selection.topic,
                    e
                );
                Quiz::fallback(&selection.topic)
            }
        };

        if let Some(cache) = &self.cache {
            cache.store_quiz(selection.clone(), quiz.clone()).await;
        }
        quiz
    }
}
