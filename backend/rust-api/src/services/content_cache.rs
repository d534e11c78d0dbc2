use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::models::{Quiz, Selection};

/// Unbounded memo of generated content keyed by (topic, level, subject).
/// Entries live for the whole process; there is no eviction.
#[derive(Default)]
pub struct ContentCache {
    lessons: Mutex<HashMap<Selection, String>>,
    quizzes: Mutex<HashMap<Selection, Quiz>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lesson(&self, key: &Selection) -> Option<String> {
        self.lessons.lock().await.get(key).cloned()
    }

    pub async fn store_lesson(&self, key: Selection, lesson: String) {
        self.lessons.lock().await.insert(key, lesson);
    }

    pub async fn quiz(&self, key: &Selection) -> Option<Quiz> {
        self.quizzes.lock().await.get(key).cloned()
    }

    pub async fn store_quiz(&self, key: Selection, quiz: Quiz) {
        self.quizzes.lock().await.insert(key, quiz);
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.lessons.lock().await.len() + self.quizzes.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keys_are_the_full_selection() {
        let cache = ContentCache::new();
        let algebra = Selection::new("Algebra", "Beginner", "Math");
        cache.store_lesson(algebra.clone(), "x = 2".into()).await;

        assert_eq!(cache.lesson(&algebra).await.as_deref(), Some("x = 2"));
        assert!(cache
            .lesson(&Selection::new("Algebra", "Advanced", "Math"))
            .await
            .is_none());
        assert!(cache.quiz(&algebra).await.is_none());
        assert_eq!(cache.len().await, 1);
    }
}
