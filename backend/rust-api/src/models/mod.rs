use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub mod catalog;
pub mod quiz;

pub use quiz::{Question, Quiz};

/// What the learner asked to study. Also the memoization key for generated content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub topic: String,
    pub level: String,
    pub subject: String,
}

impl Selection {
    pub fn new(
        topic: impl Into<String>,
        level: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            level: level.into(),
            subject: subject.into(),
        }
    }

    /// All three fields must be non-blank before any provider call.
    pub fn is_complete(&self) -> bool {
        !self.topic.trim().is_empty()
            && !self.level.trim().is_empty()
            && !self.subject.trim().is_empty()
    }

    /// Copy with surrounding whitespace removed, so " Algebra" and "Algebra" share a cache slot.
    pub fn normalized(&self) -> Self {
        Self::new(self.topic.trim(), self.level.trim(), self.subject.trim())
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}

/// Body of `POST /generate_lesson` and `POST /generate_quiz`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LessonRequest {
    #[validate(custom(function = "not_blank"))]
    pub topic: String,
    #[validate(custom(function = "not_blank"))]
    pub level: String,
    #[validate(custom(function = "not_blank"))]
    pub subject: String,
}

impl From<LessonRequest> for Selection {
    fn from(req: LessonRequest) -> Self {
        Selection::new(req.topic, req.level, req.subject).normalized()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LessonResponse {
    pub lesson_html: String,
}

/// Body of `POST /score`.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub quiz: Quiz,
    pub answers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_requires_every_field() {
        assert!(Selection::new("Algebra", "Beginner", "Math").is_complete());
        assert!(!Selection::new("", "Beginner", "Math").is_complete());
        assert!(!Selection::new("Algebra", "  ", "Math").is_complete());
        assert!(!Selection::new("Algebra", "Beginner", "").is_complete());
    }

    #[test]
    fn lesson_request_rejects_blank_topic() {
        let req = LessonRequest {
            topic: " ".into(),
            level: "Beginner".into(),
            subject: "Math".into(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("topic"));
    }

    #[test]
    fn lesson_request_converts_to_trimmed_selection() {
        let req = LessonRequest {
            topic: " Algebra ".into(),
            level: "Beginner".into(),
            subject: "Math\n".into(),
        };
        assert!(req.validate().is_ok());
        let selection: Selection = req.into();
        assert_eq!(selection, Selection::new("Algebra", "Beginner", "Math"));
    }
}
