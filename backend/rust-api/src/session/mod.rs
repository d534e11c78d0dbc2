//! Quiz lifecycle for one learner.
//!
//! ```text
//! Selecting ──ContentReady──▶ Lesson ──StartQuiz──▶ Taking ──Submit──▶ Results
//!     ▲                         │                     │                  │
//!     └────────NewTopic─────────┴──────GoBack─────────┴─────NewTopic─────┘
//! ```
//!
//! [`transition`] is pure; [`QuizSession`] owns the current state and only
//! replaces it when a transition is accepted. The score is computed once, on
//! `Taking → Results`, and kept on the `Results` state.

use std::fmt;

use crate::metrics::record_quiz_scored;
use crate::models::{Quiz, Selection};

pub mod scoring;

pub use scoring::{AnswerReview, Band, Scorecard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Selecting,
    Lesson,
    Taking,
    Results,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Selecting => "selecting",
            Stage::Lesson => "lesson",
            Stage::Taking => "taking",
            Stage::Results => "results",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Selecting,
    Lesson {
        selection: Selection,
        lesson: String,
        quiz: Quiz,
    },
    Taking {
        selection: Selection,
        lesson: String,
        quiz: Quiz,
    },
    Results {
        selection: Selection,
        lesson: String,
        quiz: Quiz,
        answers: Vec<String>,
        scorecard: Scorecard,
    },
}

impl SessionState {
    pub fn stage(&self) -> Stage {
        match self {
            SessionState::Selecting => Stage::Selecting,
            SessionState::Lesson { .. } => Stage::Lesson,
            SessionState::Taking { .. } => Stage::Taking,
            SessionState::Results { .. } => Stage::Results,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    /// Lesson and quiz were generated for a selection.
    ContentReady {
        selection: Selection,
        lesson: String,
        quiz: Quiz,
    },
    StartQuiz,
    /// One slot per question; `None` is an unanswered question.
    Submit { answers: Vec<Option<String>> },
    /// Leave a quiz that could not be loaded.
    GoBack,
    NewTopic,
}

impl Event {
    fn name(&self) -> &'static str {
        match self {
            Event::ContentReady { .. } => "content_ready",
            Event::StartQuiz => "start_quiz",
            Event::Submit { .. } => "submit",
            Event::GoBack => "go_back",
            Event::NewTopic => "new_topic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Please fill in all fields before generating a lesson.")]
    IncompleteSelection,
    #[error("Please answer every question before submitting ({answered} of {total} answered).")]
    IncompleteAnswers { answered: usize, total: usize },
    #[error("The quiz is available; submit your answers instead of going back.")]
    QuizAvailable,
    #[error("cannot {event} while in the {stage} stage")]
    NotAllowed { stage: Stage, event: &'static str },
}

/// Next state for `event`, or the reason the guard rejected it.
pub fn transition(state: &SessionState, event: Event) -> Result<SessionState, TransitionError> {
    match (state, event) {
        (
            SessionState::Selecting,
            Event::ContentReady {
                selection,
                lesson,
                quiz,
            },
        ) => {
            if !selection.is_complete() {
                return Err(TransitionError::IncompleteSelection);
            }
            Ok(SessionState::Lesson {
                selection,
                lesson,
                quiz,
            })
        }

        (
            SessionState::Lesson {
                selection,
                lesson,
                quiz,
            },
            Event::StartQuiz,
        ) => Ok(SessionState::Taking {
            selection: selection.clone(),
            lesson: lesson.clone(),
            quiz: quiz.clone(),
        }),

        (
            SessionState::Taking {
                selection,
                lesson,
                quiz,
            },
            Event::Submit { answers },
        ) => {
            let answered = answers.iter().filter(|a| a.is_some()).count();
            if quiz.is_empty() || answers.len() != quiz.len() || answered != quiz.len() {
                return Err(TransitionError::IncompleteAnswers {
                    answered,
                    total: quiz.len(),
                });
            }

            let answers: Vec<String> = answers.into_iter().flatten().collect();
            let scorecard = Scorecard::grade(quiz, &answers);

            Ok(SessionState::Results {
                selection: selection.clone(),
                lesson: lesson.clone(),
                quiz: quiz.clone(),
                answers,
                scorecard,
            })
        }

        (SessionState::Taking { quiz, .. }, Event::GoBack) => {
            if !quiz.is_empty() {
                return Err(TransitionError::QuizAvailable);
            }
            Ok(SessionState::Selecting)
        }

        (SessionState::Lesson { .. } | SessionState::Results { .. }, Event::NewTopic) => {
            Ok(SessionState::Selecting)
        }

        (state, event) => Err(TransitionError::NotAllowed {
            stage: state.stage(),
            event: event.name(),
        }),
    }
}

/// Explicit per-learner session, passed by `&mut` to each UI step.
#[derive(Debug, Default)]
pub struct QuizSession {
    state: SessionState,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: Event) -> Result<Stage, TransitionError> {
        let from = self.state.stage();
        let event_name = event.name();
        match transition(&self.state, event) {
            Ok(next) => {
                self.state = next;
                if let SessionState::Results { scorecard, .. } = &self.state {
                    if from == Stage::Taking {
                        record_quiz_scored(scorecard.band.label());
                    }
                }
                tracing::debug!(
                    "Session transition: {} --{}--> {}",
                    from,
                    event_name,
                    self.state.stage()
                );
                Ok(self.state.stage())
            }
            Err(e) => {
                tracing::debug!("Session rejected {} in {}: {}", event_name, from, e);
                Err(e)
            }
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn stage(&self) -> Stage {
        self.state.stage()
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.state {
            SessionState::Selecting => None,
            SessionState::Lesson { selection, .. }
            | SessionState::Taking { selection, .. }
            | SessionState::Results { selection, .. } => Some(selection),
        }
    }

    pub fn lesson(&self) -> Option<&str> {
        match &self.state {
            SessionState::Selecting => None,
            SessionState::Lesson { lesson, .. }
            | SessionState::Taking { lesson, .. }
            | SessionState::Results { lesson, .. } => Some(lesson),
        }
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        match &self.state {
            SessionState::Selecting => None,
            SessionState::Lesson { quiz, .. }
            | SessionState::Taking { quiz, .. }
            | SessionState::Results { quiz, .. } => Some(quiz),
        }
    }

    pub fn answers(&self) -> Option<&[String]> {
        match &self.state {
            SessionState::Results { answers, .. } => Some(answers),
            _ => None,
        }
    }

    pub fn scorecard(&self) -> Option<&Scorecard> {
        match &self.state {
            SessionState::Results { scorecard, .. } => Some(scorecard),
            _ => None,
        }
    }

    pub fn score(&self) -> Option<usize> {
        self.scorecard().map(|card| card.score)
    }
}
