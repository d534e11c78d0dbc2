//! Turns raw model output into a [`Quiz`].
//!
//! The model is asked for `{"questions": [...]}` but often wraps it in a
//! Markdown code fence. Fences are stripped, the rest is decoded strictly, and
//! any failure yields [`Quiz::fallback`] so callers always get a usable quiz.

use crate::metrics::QUIZZES_GENERATED_TOTAL;
use crate::models::quiz::OPTIONS_PER_QUESTION;
use crate::models::Quiz;

#[derive(Debug, thiserror::Error)]
pub enum QuizParseError {
    #[error("quiz payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("quiz payload contains no questions")]
    NoQuestions,
    #[error("question {index} has {count} options, expected {expected}", expected = OPTIONS_PER_QUESTION)]
    OptionCount { index: usize, count: usize },
}

/// Removes surrounding whitespace and every "```json" / "```" marker.
pub fn strip_code_fences(raw: &str) -> String {
    raw.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

pub fn decode(raw: &str) -> Result<Quiz, QuizParseError> {
    let cleaned = strip_code_fences(raw);
    let quiz: Quiz = serde_json::from_str(&cleaned)?;

    if quiz.is_empty() {
        return Err(QuizParseError::NoQuestions);
    }

    if let Some((index, question)) = quiz
        .questions
        .iter()
        .enumerate()
        .find(|(_, q)| q.options.len() != OPTIONS_PER_QUESTION)
    {
        return Err(QuizParseError::OptionCount {
            index,
            count: question.options.len(),
        });
    }

    Ok(quiz)
}

/// Decodes `raw`, substituting the fallback quiz for `topic` on any failure.
/// The outcome is counted in `quizzes_generated_total`.
pub fn parse(raw: &str, topic: &str) -> Quiz {
    match decode(raw) {
        Ok(quiz) => {
            QUIZZES_GENERATED_TOTAL.with_label_values(&["ok"]).inc();
            quiz
        }
        Err(e) => {
            QUIZZES_GENERATED_TOTAL
                .with_label_values(&["parse_error"])
                .inc();
            tracing::warn!("Falling back to placeholder quiz for topic={}: {}", topic, e);
            Quiz::fallback(topic)
        }
    }
}
