use serde::{Deserialize, Serialize};

pub const OPTIONS_PER_QUESTION: usize = 4;
pub const FALLBACK_OPTION: &str = "N/A";
pub const FALLBACK_EXPLANATION: &str =
    "There was an error communicating with the AI model to generate the quiz.";

/// One multiple-choice question as the model emits it.
///
/// `correct_answer` is expected to be one of `options`, but that is not
/// checked: a question that violates it is kept and simply never scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(rename = "answer")]
    pub correct_answer: String,
    pub explanation: String,
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Placeholder used whenever quiz generation or parsing fails.
    pub fn fallback(topic: &str) -> Self {
        Self::new(vec![Question {
            prompt: format!(
                "Could not generate a quiz for {}. Please try again.",
                topic
            ),
            options: vec![FALLBACK_OPTION.to_string(); OPTIONS_PER_QUESTION],
            correct_answer: FALLBACK_OPTION.to_string(),
            explanation: FALLBACK_EXPLANATION.to_string(),
        }])
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_quiz_names_topic() {
        let quiz = Quiz::fallback("Photosynthesis");
        assert_eq!(quiz.len(), 1);

        let question = &quiz.questions[0];
        assert_eq!(
            question.prompt,
            "Could not generate a quiz for Photosynthesis. Please try again."
        );
        assert_eq!(question.options, vec!["N/A"; 4]);
        assert_eq!(question.correct_answer, "N/A");
        assert_eq!(question.explanation, FALLBACK_EXPLANATION);
    }

    #[test]
    fn question_uses_wire_field_names() {
        let question = Question {
            prompt: "2 + 2?".into(),
            options: vec!["3".into(), "4".into(), "5".into(), "22".into()],
            correct_answer: "4".into(),
            explanation: "Basic addition.".into(),
        };
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["question"], "2 + 2?");
        assert_eq!(value["answer"], "4");
        assert!(value.get("prompt").is_none());
    }
}
