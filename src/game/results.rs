use crate::game::quiz::SessionSummary;
use crate::output::{GameOutput, Message};

/// Presents a completed session: final score, persisted best score, and one
/// review line per answered question.
pub struct ResultsState<O> {
    summary: SessionSummary,
    best: u32,
    is_new_best: bool,
    output: O,
}

impl<O: GameOutput> ResultsState<O> {
    pub fn new(summary: SessionSummary, best: u32, is_new_best: bool, output: O) -> Self {
        ResultsState {
            summary,
            best,
            is_new_best,
            output,
        }
    }

    pub fn announce(&self) {
        self.output.say(&Message::SessionResults {
            score: self.summary.score(),
            total: self.summary.total(),
            best: self.best,
            is_new_best: self.is_new_best,
        });
        for (index, record) in self.summary.records.iter().enumerate() {
            self.output.say(&Message::AnswerReview {
                number: index + 1,
                record: record.clone(),
            });
        }
    }
}
