use std::time::Duration;

use super::*;
use crate::output::mock::MockGameOutput;

fn make_question(number: usize) -> Question {
    Question {
        text: format!("Question {}", number),
        options: vec![
            "Option A".to_owned(),
            "Option B".to_owned(),
            "Option C".to_owned(),
            "Option D".to_owned(),
        ],
        correct_index: number % 4,
        category: "General Knowledge".to_owned(),
        difficulty: "easy".to_owned(),
    }
}

struct ContextBuilder {
    question_count: usize,
    settings: Settings,
}

impl ContextBuilder {
    fn new() -> Self {
        ContextBuilder {
            question_count: 3,
            settings: Settings {
                question_duration: Duration::from_secs(10),
                reveal_delay: Duration::from_millis(600),
                countdown_announcement: Duration::from_secs(5),
            },
        }
    }

    fn question_count(mut self, count: usize) -> Self {
        self.question_count = count;
        self
    }

    fn build(self) -> Context {
        let output = MockGameOutput::new();
        let questions = (1..=self.question_count).map(make_question).collect();
        let quiz = Quiz::new(questions, self.settings, output.clone());
        Context { quiz, output }
    }
}

struct Context {
    quiz: Quiz<MockGameOutput>,
    output: MockGameOutput,
}

impl Context {
    fn correct_index(&self) -> usize {
        self.quiz.current_question().correct_index
    }

    fn wrong_index(&self) -> usize {
        (self.correct_index() + 1) % 4
    }

    fn recorded_answers(&self) -> usize {
        self.quiz.answers.iter().flatten().count()
    }
}

#[test]
fn announces_first_question() {
    let ctx = ContextBuilder::new().build();
    let announced = ctx.output.flush().iter().any(|m| {
        matches!(m, Message::QuestionBegins { number: 1, total: 3, .. })
    });
    assert!(announced);
    assert!(ctx.quiz.timer.is_running());
}

#[test]
fn selection_can_be_overwritten_before_lock() {
    let mut ctx = ContextBuilder::new().build();
    ctx.quiz.select(0);
    ctx.quiz.select(2);
    assert_eq!(ctx.quiz.selected, Some(2));
}

#[test]
fn out_of_range_selection_is_ignored() {
    let mut ctx = ContextBuilder::new().build();
    ctx.quiz.select(7);
    assert_eq!(ctx.quiz.selected, None);
}

#[test]
fn lock_records_the_current_selection() {
    let mut ctx = ContextBuilder::new().build();
    let correct = ctx.correct_index();
    ctx.quiz.select(correct);
    ctx.quiz.lock();

    assert_eq!(ctx.recorded_answers(), 1);
    let record = ctx.quiz.answers[0].as_ref().unwrap();
    assert_eq!(record.selected, Some(correct));
    assert!(record.is_correct);
    assert!(!ctx.quiz.timer.is_running());
}

#[test]
fn lock_is_idempotent() {
    let mut ctx = ContextBuilder::new().build();
    ctx.quiz.select(0);
    ctx.quiz.lock();
    let record = ctx.quiz.answers[0].clone();
    ctx.output.flush();

    ctx.quiz.lock();
    assert_eq!(ctx.recorded_answers(), 1);
    assert_eq!(ctx.quiz.answers[0], record);
    assert!(!ctx
        .output
        .flush()
        .iter()
        .any(|m| matches!(m, Message::AnswerLocked { .. })));
}

#[test]
fn lock_without_selection_is_an_incorrect_answer() {
    let mut ctx = ContextBuilder::new().build();
    ctx.quiz.lock();
    let record = ctx.quiz.answers[0].as_ref().unwrap();
    assert_eq!(record.selected, None);
    assert!(!record.is_correct);
}

#[test]
fn advance_without_lock_is_ignored() {
    let mut ctx = ContextBuilder::new().build();
    ctx.quiz.advance();
    assert_eq!(ctx.quiz.cursor, 0);
    assert!(!ctx.quiz.is_over());
}

#[test]
fn advance_moves_to_a_fresh_question() {
    let mut ctx = ContextBuilder::new().build();
    ctx.quiz.select(ctx.wrong_index());
    ctx.quiz.lock();
    ctx.output.flush();
    ctx.quiz.advance();

    assert_eq!(ctx.quiz.cursor, 1);
    assert_eq!(ctx.quiz.selected, None);
    assert!(ctx.quiz.timer.is_running());
    assert_eq!(ctx.quiz.timer.seconds_remaining(), 10);
    assert!(ctx.output.flush().iter().any(|m| {
        matches!(m, Message::QuestionBegins { number: 2, .. })
    }));
}

#[test]
fn retreat_shows_a_read_only_review() {
    let mut ctx = ContextBuilder::new().build();
    let first_answer = ctx.wrong_index();
    ctx.quiz.select(first_answer);
    ctx.quiz.lock();
    ctx.quiz.advance();
    ctx.output.flush();

    ctx.quiz.retreat();
    assert_eq!(ctx.quiz.cursor, 0);
    assert!(!ctx.quiz.timer.is_running());
    assert!(ctx.output.flush().iter().any(|m| {
        matches!(m, Message::QuestionReview { number: 1, .. })
    }));

    // Locked questions cannot be re-answered.
    ctx.quiz.select(ctx.correct_index());
    ctx.quiz.lock();
    let record = ctx.quiz.answers[0].as_ref().unwrap();
    assert_eq!(record.selected, Some(first_answer));
    assert_eq!(ctx.recorded_answers(), 1);
}

#[test]
fn advance_from_review_returns_to_the_frontier() {
    let mut ctx = ContextBuilder::new().build();
    ctx.quiz.select(0);
    ctx.quiz.lock();
    ctx.quiz.advance();
    ctx.quiz.retreat();
    ctx.output.flush();

    ctx.quiz.advance();
    assert_eq!(ctx.quiz.cursor, 1);
    assert_eq!(ctx.quiz.selected, None);
    assert!(ctx.quiz.timer.is_running());
    assert!(ctx.output.flush().iter().any(|m| {
        matches!(m, Message::QuestionBegins { number: 2, .. })
    }));
}

#[test]
fn retreat_from_first_question_is_ignored() {
    let mut ctx = ContextBuilder::new().build();
    ctx.quiz.retreat();
    assert_eq!(ctx.quiz.cursor, 0);
}

#[test]
fn timeout_locks_with_no_selection() {
    let mut ctx = ContextBuilder::new().build();
    ctx.quiz.select(1);
    ctx.quiz.lock();
    ctx.quiz.advance();
    ctx.output.flush();

    // Let the second question time out without a selection.
    for _ in 0..25 {
        ctx.quiz.tick(Duration::from_millis(500));
    }

    let record = ctx.quiz.answers[1].as_ref().unwrap();
    assert_eq!(record.selected, None);
    assert!(!record.is_correct);
    let messages = ctx.output.flush();
    assert!(messages.contains(&Message::TimeUp));
    assert!(messages
        .iter()
        .any(|m| matches!(m, Message::AnswerLocked { .. })));
}

#[test]
fn timeout_auto_advances_after_the_reveal_delay() {
    let mut ctx = ContextBuilder::new().build();
    ctx.quiz.tick(Duration::from_secs(10));
    assert!(ctx.quiz.answers[0].is_some());
    assert_eq!(ctx.quiz.cursor, 0);

    ctx.quiz.tick(Duration::from_millis(300));
    assert_eq!(ctx.quiz.cursor, 0);

    ctx.quiz.tick(Duration::from_millis(400));
    assert_eq!(ctx.quiz.cursor, 1);
    assert!(ctx.quiz.timer.is_running());
}

#[test]
fn retreat_cancels_a_pending_auto_advance() {
    let mut ctx = ContextBuilder::new().build();
    ctx.quiz.select(0);
    ctx.quiz.lock();
    ctx.quiz.advance();

    ctx.quiz.tick(Duration::from_secs(10));
    assert_eq!(ctx.quiz.cursor, 1);

    ctx.quiz.retreat();
    ctx.quiz.tick(Duration::from_secs(5));
    assert_eq!(ctx.quiz.cursor, 0);
}

#[test]
fn announces_final_countdown_seconds() {
    let mut ctx = ContextBuilder::new().build();
    for _ in 0..19 {
        ctx.quiz.tick(Duration::from_millis(500));
    }
    let messages = ctx.output.flush();
    for seconds in 1..=5 {
        assert!(messages.contains(&Message::TimeRemaining(Duration::from_secs(seconds))));
    }
    assert!(!messages.contains(&Message::TimeRemaining(Duration::from_secs(8))));
}

#[test]
fn completes_after_the_last_question() {
    let mut ctx = ContextBuilder::new().question_count(2).build();
    ctx.quiz.select(ctx.correct_index());
    ctx.quiz.lock();
    ctx.quiz.advance();
    assert!(!ctx.quiz.is_over());

    ctx.quiz.select(ctx.wrong_index());
    ctx.quiz.lock();
    ctx.quiz.advance();
    assert!(ctx.quiz.is_over());
    assert!(!ctx.quiz.timer.is_running());

    let summary = ctx.quiz.summary();
    assert_eq!(summary.total(), 2);
    assert_eq!(summary.score(), 1);
}

#[test]
fn score_counts_only_correct_records() {
    let mut ctx = ContextBuilder::new().question_count(4).build();
    for index in 0..4 {
        let choice = if index % 2 == 0 {
            ctx.correct_index()
        } else {
            ctx.wrong_index()
        };
        ctx.quiz.select(choice);
        ctx.quiz.lock();
        ctx.quiz.advance();
    }
    assert!(ctx.quiz.is_over());
    assert_eq!(ctx.quiz.summary().score(), 2);
}
