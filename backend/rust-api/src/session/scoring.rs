use serde::{Deserialize, Serialize};

use crate::models::Quiz;

pub const MASTERED_PERCENTAGE: f64 = 100.0;
pub const GOOD_WORK_PERCENTAGE: f64 = 60.0;

/// Qualitative feedback tier for a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "mastered")]
    Mastered,
    #[serde(rename = "good work")]
    GoodWork,
    #[serde(rename = "review needed")]
    ReviewNeeded,
}

impl Band {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage == MASTERED_PERCENTAGE {
            Band::Mastered
        } else if percentage >= GOOD_WORK_PERCENTAGE {
            Band::GoodWork
        } else {
            Band::ReviewNeeded
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::Mastered => "mastered",
            Band::GoodWork => "good work",
            Band::ReviewNeeded => "review needed",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Band::Mastered => "Excellent! You've mastered this topic.",
            Band::GoodWork => "Good work! Review the explanations below to improve.",
            Band::ReviewNeeded => {
                "Let's review the material again. Check the explanations for each question."
            }
        }
    }
}

/// Number of answers equal to the correct answer at the same index.
/// Missing trailing answers count as wrong.
pub fn score(quiz: &Quiz, answers: &[String]) -> usize {
    quiz.questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.is_correct(answer))
        .count()
}

/// `100 * score / total`, defined as 0 for an empty quiz.
pub fn percentage(score: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    score as f64 * 100.0 / total as f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerReview {
    pub index: usize,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub band: Band,
    pub reviews: Vec<AnswerReview>,
}

impl Scorecard {
    pub fn grade(quiz: &Quiz, answers: &[String]) -> Self {
        let score = score(quiz, answers);
        let total = quiz.len();
        let percentage = percentage(score, total);

        let reviews = quiz
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let user_answer = answers.get(index).cloned().unwrap_or_default();
                AnswerReview {
                    index,
                    question: question.prompt.clone(),
                    correct: question.is_correct(&user_answer),
                    user_answer,
                    correct_answer: question.correct_answer.clone(),
                    explanation: question.explanation.clone(),
                }
            })
            .collect();

        Self {
            score,
            total,
            percentage,
            band: Band::from_percentage(percentage),
            reviews,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;

    fn quiz_of(n: usize) -> Quiz {
        Quiz::new(
            (0..n)
                .map(|i| Question {
                    prompt: format!("Q{}", i),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_answer: "a".into(),
                    explanation: format!("E{}", i),
                })
                .collect(),
        )
    }

    fn answers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn three_of_five_is_good_work() {
        let quiz = quiz_of(5);
        let card = Scorecard::grade(&quiz, &answers(&["a", "a", "a", "b", "c"]));

        assert_eq!(card.score, 3);
        assert_eq!(card.total, 5);
        assert_eq!(card.percentage, 60.0);
        assert_eq!(card.band, Band::GoodWork);
        assert!(card.reviews[2].correct);
        assert!(!card.reviews[3].correct);
        assert_eq!(card.reviews[4].user_answer, "c");
        assert_eq!(card.reviews[4].correct_answer, "a");
    }

    #[test]
    fn empty_quiz_is_zero_percent() {
        assert_eq!(percentage(0, 0), 0.0);
        let card = Scorecard::grade(&Quiz::default(), &[]);
        assert_eq!(card.percentage, 0.0);
        assert_eq!(card.band, Band::ReviewNeeded);
    }

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(Band::from_percentage(100.0), Band::Mastered);
        assert_eq!(Band::from_percentage(80.0), Band::GoodWork);
        assert_eq!(Band::from_percentage(60.0), Band::GoodWork);
        assert_eq!(Band::from_percentage(59.9), Band::ReviewNeeded);
        assert_eq!(Band::from_percentage(0.0), Band::ReviewNeeded);
    }

    #[test]
    fn scoring_is_repeatable() {
        let quiz = quiz_of(5);
        let given = answers(&["a", "b", "a", "b", "a"]);
        assert_eq!(score(&quiz, &given), score(&quiz, &given));
        assert_eq!(
            Scorecard::grade(&quiz, &given),
            Scorecard::grade(&quiz, &given)
        );
    }

    #[test]
    fn answer_outside_options_never_matches() {
        let mut quiz = quiz_of(1);
        quiz.questions[0].correct_answer = "z".into();
        assert_eq!(score(&quiz, &answers(&["a"])), 0);
    }

    #[test]
    fn band_serializes_as_label() {
        assert_eq!(
            serde_json::to_value(Band::ReviewNeeded).unwrap(),
            "review needed"
        );
        assert_eq!(Band::GoodWork.label(), "good work");
    }
}
