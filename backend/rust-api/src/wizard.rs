//! Terminal front-end: the selection → lesson → quiz → results flow on top of
//! [`QuizSession`], with lessons and quizzes memoized per selection.

use anyhow::Result;
use dialoguer::console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::models::catalog::{subject_names, topics_for, LEVELS};
use crate::models::Selection;
use crate::services::content_service::ContentService;
use crate::session::{Band, Event, QuizSession, Scorecard, Stage};

const START_QUIZ: &str = "Start Quiz";
const NEW_TOPIC: &str = "Choose a New Topic";
const LEARN_ANOTHER: &str = "Learn Another Topic";
const GO_BACK: &str = "Go Back";
const QUIT: &str = "Quit";

pub struct Wizard {
    content: ContentService,
    session: QuizSession,
    theme: ColorfulTheme,
}

impl Wizard {
    pub fn new(content: ContentService) -> Self {
        Self {
            content,
            session: QuizSession::new(),
            theme: ColorfulTheme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("{}", style("Interactive Learning Assistant").bold().cyan());
        println!("Your personal AI tutor. Choose a subject and topic to get started!\n");

        loop {
            let keep_going = match self.session.stage() {
                Stage::Selecting => self.select_topic().await?,
                Stage::Lesson => self.show_lesson()?,
                Stage::Taking => self.take_quiz()?,
                Stage::Results => self.show_results()?,
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    async fn select_topic(&mut self) -> Result<bool> {
        println!("{}", style("1. Choose Your Topic").bold());

        let mut subjects = subject_names();
        subjects.push(QUIT);
        let subject_idx = Select::with_theme(&self.theme)
            .with_prompt("Choose a subject")
            .items(&subjects[..])
            .default(0)
            .interact()?;
        if subjects[subject_idx] == QUIT {
            return Ok(false);
        }
        let subject = subjects[subject_idx];

        let level_idx = Select::with_theme(&self.theme)
            .with_prompt("Enter your level")
            .items(&LEVELS[..])
            .default(0)
            .interact()?;

        let example = topics_for(subject)
            .and_then(|topics| topics.first())
            .copied()
            .unwrap_or("");
        let topic: String = Input::with_theme(&self.theme)
            .with_prompt(format!("What specific topic? (e.g., {})", example))
            .allow_empty(true)
            .interact_text()?;

        let selection = Selection::new(topic, LEVELS[level_idx], subject).normalized();
        if !selection.is_complete() {
            println!(
                "{}",
                style("Please fill in all fields before generating a lesson.").yellow()
            );
            return Ok(true);
        }

        println!("{}", style("Generating your lesson...").dim());
        let lesson = self.content.generate_lesson(&selection).await;
        println!("{}", style("Creating your quiz...").dim());
        let quiz = self.content.generate_quiz(&selection).await;

        if let Err(e) = self.session.apply(Event::ContentReady {
            selection,
            lesson,
            quiz,
        }) {
            println!("{}", style(e).yellow());
        }
        Ok(true)
    }

    fn show_lesson(&mut self) -> Result<bool> {
        let topic = self
            .session
            .selection()
            .map(|s| s.topic.clone())
            .unwrap_or_default();
        println!("\n{}", style(format!("Lesson: {}", topic)).bold());
        println!("{}\n", self.session.lesson().unwrap_or_default());
        println!(
            "{}",
            style("Read through the lesson. When you're ready, start the quiz to test your knowledge!")
                .cyan()
        );

        let choices = [START_QUIZ, NEW_TOPIC, QUIT];
        let choice = Select::with_theme(&self.theme)
            .items(&choices)
            .default(0)
            .interact()?;

        let event = match choices[choice] {
            START_QUIZ => Event::StartQuiz,
            NEW_TOPIC => Event::NewTopic,
            _ => return Ok(false),
        };
        self.session.apply(event)?;
        Ok(true)
    }

    fn take_quiz(&mut self) -> Result<bool> {
        let quiz = match self.session.quiz() {
            Some(quiz) => quiz.clone(),
            None => return Ok(true),
        };
        let topic = self
            .session
            .selection()
            .map(|s| s.topic.clone())
            .unwrap_or_default();
        println!("\n{}", style(format!("Quiz: {}", topic)).bold());

        if quiz.is_empty() {
            println!(
                "{}",
                style("Sorry, we couldn't load the quiz. Please go back and try generating the lesson again.")
                    .red()
            );
            Select::with_theme(&self.theme)
                .items(&[GO_BACK])
                .default(0)
                .interact()?;
            self.session.apply(Event::GoBack)?;
            return Ok(true);
        }

        // Esc leaves a slot empty; only empty slots are asked again
        let mut answers: Vec<Option<String>> = vec![None; quiz.len()];
        loop {
            for i in unanswered(&answers) {
                let question = &quiz.questions[i];
                let picked = Select::with_theme(&self.theme)
                    .with_prompt(format!("Question {}: {}", i + 1, question.prompt))
                    .items(&question.options[..])
                    .interact_opt()?;
                answers[i] = picked.map(|idx| question.options[idx].clone());
            }

            match self.session.apply(Event::Submit {
                answers: answers.clone(),
            }) {
                Ok(_) => return Ok(true),
                Err(e) => println!("{}", style(e).yellow()),
            }
        }
    }

    fn show_results(&mut self) -> Result<bool> {
        if let Some(card) = self.session.scorecard() {
            println!("\n{}", style("Quiz Results").bold());
            for line in results_report(card) {
                println!("{}", line);
            }
        }

        let choices = [LEARN_ANOTHER, QUIT];
        let choice = Select::with_theme(&self.theme)
            .items(&choices)
            .default(0)
            .interact()?;
        if choices[choice] == QUIT {
            return Ok(false);
        }
        self.session.apply(Event::NewTopic)?;
        Ok(true)
    }
}

/// Indices of questions that still have no answer.
fn unanswered(answers: &[Option<String>]) -> Vec<usize> {
    answers
        .iter()
        .enumerate()
        .filter(|(_, answer)| answer.is_none())
        .map(|(i, _)| i)
        .collect()
}

fn band_line(band: Band) -> String {
    let styled = match band {
        Band::Mastered => style(band.message()).green(),
        Band::GoodWork => style(band.message()).cyan(),
        Band::ReviewNeeded => style(band.message()).yellow(),
    };
    styled.to_string()
}

/// Lines of the results screen: score, feedback, then a review of every question.
pub fn results_report(card: &Scorecard) -> Vec<String> {
    let mut lines = vec![
        format!(
            "You scored: {}/{} ({:.2}%)",
            card.score, card.total, card.percentage
        ),
        band_line(card.band),
        String::new(),
        "Review Your Answers".to_string(),
    ];

    for review in &card.reviews {
        if review.correct {
            lines.push(format!(
                "Question {}: {} - Correct!",
                review.index + 1,
                review.question
            ));
        } else {
            lines.push(format!(
                "Question {}: {} - Incorrect",
                review.index + 1,
                review.question
            ));
            lines.push(format!("   Your answer: {}", review.user_answer));
            lines.push(format!("   Correct answer: {}", review.correct_answer));
        }
        lines.push(format!("   Explanation: {}", review.explanation));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, Quiz};

    #[test]
    fn only_skipped_questions_are_asked_again() {
        let answers = vec![
            Some("4".to_string()),
            None,
            Some("9".to_string()),
            None,
            Some("b".to_string()),
        ];
        assert_eq!(unanswered(&answers), vec![1, 3]);
        assert!(unanswered(&[Some("a".to_string())]).is_empty());
    }

    #[test]
    fn report_lists_wrong_answers_with_correction() {
        let quiz = Quiz::new(vec![
            Question {
                prompt: "2 + 2?".into(),
                options: vec!["3".into(), "4".into(), "5".into(), "6".into()],
                correct_answer: "4".into(),
                explanation: "Add them.".into(),
            },
            Question {
                prompt: "3 * 3?".into(),
                options: vec!["6".into(), "9".into(), "12".into(), "33".into()],
                correct_answer: "9".into(),
                explanation: "Multiply them.".into(),
            },
        ]);
        let card = Scorecard::grade(&quiz, &["4".to_string(), "6".to_string()]);
        let report = results_report(&card);

        assert_eq!(report[0], "You scored: 1/2 (50.00%)");
        assert!(report.contains(&"Question 1: 2 + 2? - Correct!".to_string()));
        assert!(report.contains(&"Question 2: 3 * 3? - Incorrect".to_string()));
        assert!(report.contains(&"   Your answer: 6".to_string()));
        assert!(report.contains(&"   Correct answer: 9".to_string()));
        assert!(report.contains(&"   Explanation: Multiply them.".to_string()));
    }
}
