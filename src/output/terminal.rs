use itertools::Itertools;

use crate::game::quiz::AnswerRecord;
use crate::output::{GameOutput, Message};

const NO_ANSWER: &str = "(no answer)";

#[derive(Clone, Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        TerminalOutput
    }

    fn interpret_message(&self, message: &Message) -> String {
        use Message::*;
        match message {
            SetupGreeting => "Welcome to Quickfire! Type `play [easy|medium|hard] [amount]` to start a quiz, or `help` for the full command list.".into(),
            LoadingStarted => "📡 Fetching questions...".into(),
            FallbackNotice => "⚠️ Could not reach the trivia service, playing with the built-in question bank instead.".into(),
            NoQuestionsAvailable => "No questions are available right now. Back to setup.".into(),
            QuestionBegins { number, total, question } => {
                let options = question
                    .options
                    .iter()
                    .enumerate()
                    .map(|(index, text)| format!("  {}) {}", option_label(index), text))
                    .join("\n");
                format!(
                    "❓ Question {}/{} [{} · {}]\n{}\n{}",
                    number, total, question.category, question.difficulty, question.text, options
                )
            }
            QuestionReview { number, total, record } => {
                format!(
                    "🔒 Question {}/{} (answered)\n{}\n{}",
                    number,
                    total,
                    record.question.text,
                    review_line(record)
                )
            }
            SelectionMade { index } => format!("Selected option {}.", option_label(*index)),
            AnswerLocked { record } => {
                if record.is_correct {
                    "✅ Correct!".into()
                } else {
                    format!("❌ Wrong! The answer was {}.", record.question.correct_text())
                }
            }
            TimeRemaining(duration) => format!("🕒 {} seconds left!", duration.as_secs()),
            TimeUp => "⏰ Time's up!".into(),
            SessionResults { score, total, best, is_new_best } => {
                let best_line = if *is_new_best {
                    format!("🏆 New best score: {}!", best)
                } else {
                    format!("Best score so far: {}.", best)
                };
                format!("🎊 Quiz complete! You scored {}/{}.\n{}", score, total, best_line)
            }
            AnswerReview { number, record } => {
                format!("{}. {}\n{}", number, record.question.text, review_line(record))
            }
            BackToSetup => "There are no results to show. Back to setup.".into(),
        }
    }
}

fn option_label(index: usize) -> char {
    (b'A' + index as u8) as char
}

fn review_line(record: &AnswerRecord) -> String {
    let chosen = match record.selected {
        Some(index) => record.question.options[index].as_str(),
        None => NO_ANSWER,
    };
    let verdict = if record.is_correct { "correct" } else { "incorrect" };
    format!(
        "   Your answer: {} ({}, correct answer: {})",
        chosen,
        verdict,
        record.question.correct_text()
    )
}

impl GameOutput for TerminalOutput {
    fn say(&self, message: &Message) {
        println!("{}", self.interpret_message(message));
    }
}
