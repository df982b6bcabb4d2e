use std::time::Duration;

use crate::game::quiz::definition::Question;
use crate::game::quiz::AnswerRecord;

pub mod terminal;

#[cfg(test)]
pub mod mock;

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    SetupGreeting,
    LoadingStarted,
    FallbackNotice,
    NoQuestionsAvailable,
    QuestionBegins {
        number: usize,
        total: usize,
        question: Question,
    },
    QuestionReview {
        number: usize,
        total: usize,
        record: AnswerRecord,
    },
    SelectionMade {
        index: usize,
    },
    AnswerLocked {
        record: AnswerRecord,
    },
    TimeRemaining(Duration),
    TimeUp,
    SessionResults {
        score: u32,
        total: usize,
        best: u32,
        is_new_best: bool,
    },
    AnswerReview {
        number: usize,
        record: AnswerRecord,
    },
    BackToSetup,
}

pub trait GameOutput {
    fn say(&self, message: &Message);
}
