use std::time::Duration;

use crate::game::settings::Settings;
use crate::output::{GameOutput, Message};

pub mod definition;
mod timer;

#[cfg(test)]
mod tests;

use self::definition::Question;
use self::timer::{CountdownTimer, TimerTick};

/// Snapshot of a question taken the moment its answer was locked. Immutable
/// from then on.
#[derive(Clone, Debug, PartialEq)]
pub struct AnswerRecord {
    pub question: Question,
    pub selected: Option<usize>,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
    pub records: Vec<AnswerRecord>,
}

impl SessionSummary {
    pub fn score(&self) -> u32 {
        self.records.iter().filter(|record| record.is_correct).count() as u32
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }
}

/// One quiz attempt: a cursor over the question list, the in-progress
/// selection for the frontier question, and the per-question answer log.
/// A question is locked once its entry in `answers` exists; locked questions
/// can be revisited but never re-answered.
pub struct Quiz<O> {
    questions: Vec<Question>,
    cursor: usize,
    selected: Option<usize>,
    answers: Vec<Option<AnswerRecord>>,
    timer: CountdownTimer,
    reveal_delay: Option<Duration>,
    complete: bool,
    settings: Settings,
    output: O,
}

impl<O: GameOutput> Quiz<O> {
    pub fn new(questions: Vec<Question>, settings: Settings, output: O) -> Quiz<O> {
        debug_assert!(!questions.is_empty());
        let answers = vec![None; questions.len()];
        let mut quiz = Quiz {
            questions,
            cursor: 0,
            selected: None,
            answers,
            timer: CountdownTimer::default(),
            reveal_delay: None,
            complete: false,
            settings,
            output,
        };
        quiz.begin_question();
        quiz
    }

    pub fn is_over(&self) -> bool {
        self.complete
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            records: self.answers.iter().cloned().flatten().collect(),
        }
    }

    pub fn select(&mut self, index: usize) {
        if self.is_locked() {
            log::debug!("Ignoring selection, the current answer is locked");
            return;
        }
        if index >= self.questions[self.cursor].options.len() {
            log::debug!("Ignoring selection, option {} is out of range", index);
            return;
        }
        self.selected = Some(index);
        self.output.say(&Message::SelectionMade { index });
    }

    pub fn lock(&mut self) {
        if self.is_locked() {
            log::debug!("Ignoring lock, the current answer is already locked");
            return;
        }
        self.timer.cancel();
        let question = self.questions[self.cursor].clone();
        let is_correct = self.selected == Some(question.correct_index);
        let record = AnswerRecord {
            question,
            selected: self.selected,
            is_correct,
        };
        self.output.say(&Message::AnswerLocked {
            record: record.clone(),
        });
        self.answers[self.cursor] = Some(record);
    }

    pub fn advance(&mut self) {
        if !self.is_locked() {
            log::debug!("Ignoring advance, the current answer is not locked");
            return;
        }
        self.reveal_delay = None;
        if self.cursor + 1 < self.questions.len() {
            self.cursor += 1;
            self.show_current();
        } else {
            self.timer.cancel();
            self.complete = true;
        }
    }

    pub fn retreat(&mut self) {
        if self.cursor == 0 {
            log::debug!("Ignoring retreat, already at the first question");
            return;
        }
        self.timer.cancel();
        self.selected = None;
        self.reveal_delay = None;
        self.cursor -= 1;
        self.show_current();
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.complete {
            return;
        }

        // Brief pause after a timeout so the locked answer stays visible
        // before moving on.
        if let Some(remaining) = self.reveal_delay {
            match remaining.checked_sub(dt) {
                Some(remaining) if remaining > Duration::default() => {
                    self.reveal_delay = Some(remaining);
                }
                _ => {
                    self.reveal_delay = None;
                    self.advance();
                }
            }
            return;
        }

        match self.timer.tick(dt) {
            TimerTick::Idle | TimerTick::Running => (),
            TimerTick::SecondElapsed(seconds) => {
                if seconds > 0 && seconds <= self.settings.countdown_announcement.as_secs() {
                    self.output
                        .say(&Message::TimeRemaining(Duration::from_secs(seconds)));
                }
            }
            TimerTick::Expired => {
                self.output.say(&Message::TimeUp);
                self.lock();
                self.reveal_delay = Some(self.settings.reveal_delay);
            }
        }
    }

    fn is_locked(&self) -> bool {
        self.answers[self.cursor].is_some()
    }

    fn begin_question(&mut self) {
        self.selected = None;
        self.output.say(&Message::QuestionBegins {
            number: self.cursor + 1,
            total: self.questions.len(),
            question: self.questions[self.cursor].clone(),
        });
        self.timer.start(self.settings.question_duration);
    }

    fn show_current(&mut self) {
        match &self.answers[self.cursor] {
            Some(record) => {
                self.output.say(&Message::QuestionReview {
                    number: self.cursor + 1,
                    total: self.questions.len(),
                    record: record.clone(),
                });
            }
            None => self.begin_question(),
        }
    }

    #[cfg(test)]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.cursor]
    }

    #[cfg(test)]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}
