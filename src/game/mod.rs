use anyhow::{anyhow, Result};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::output::{GameOutput, Message};
use crate::score::ScoreStore;
use crate::source::{self, Difficulty, Fetch, LoadOutcome, LoadRequest};

pub mod quiz;
pub mod results;
pub mod settings;


use self::quiz::definition::QuestionBank;
use self::quiz::{Quiz, SessionSummary};
use self::results::ResultsState;
use self::settings::Settings;

enum Phase<O> {
    Setup,
    Loading(LoadingState),
    Quiz(Quiz<O>),
    Results(ResultsState<O>),
}

impl<O> Phase<O> {
    fn name(&self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Loading(_) => "loading",
            Phase::Quiz(_) => "quiz",
            Phase::Results(_) => "results",
        }
    }
}

/// Receiving end of an in-flight question load. Dropping it (restart,
/// navigation away) discards a late result instead of applying it to a stale
/// session.
struct LoadingState {
    receiver: Receiver<LoadOutcome>,
}

impl LoadingState {
    fn try_receive(&self) -> Option<LoadOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(LoadOutcome {
                questions: Vec::new(),
                used_fallback: false,
            }),
        }
    }
}

/// Navigation surface over the three views: setup, active quiz, results.
/// All state transitions happen here, driven by user commands and a
/// wall-clock tick.
pub struct Game<O: GameOutput, S: ScoreStore> {
    current_phase: Phase<O>,
    difficulty: Option<Difficulty>,
    amount: u32,
    bank: QuestionBank,
    settings: Settings,
    output: O,
    store: S,
}

impl<O: GameOutput + Clone, S: ScoreStore> Game<O, S> {
    pub fn new(bank: QuestionBank, settings: Settings, output: O, store: S) -> Game<O, S> {
        let game = Game {
            current_phase: Phase::Setup,
            difficulty: None,
            amount: source::MAX_QUESTIONS,
            bank,
            settings,
            output,
            store,
        };
        game.output.say(&Message::SetupGreeting);
        game
    }

    /// Starts loading questions for a new session. Legal from the setup and
    /// results views only.
    pub fn begin(
        &mut self,
        fetcher: impl Fetch + Send + 'static,
        difficulty: Option<Difficulty>,
        amount: Option<u32>,
    ) -> Result<()> {
        match self.current_phase {
            Phase::Setup | Phase::Results(_) => (),
            _ => return Err(anyhow!("A quiz is already in progress")),
        }

        self.difficulty = difficulty;
        if let Some(amount) = amount {
            self.amount = amount;
        }

        let request = LoadRequest::new(self.amount, self.difficulty);
        let bank = self.bank.clone();
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let outcome = source::load(&fetcher, &bank, &request);
            // The receiver may be gone if the game was restarted meanwhile.
            sender.send(outcome).ok();
        });

        self.output.say(&Message::LoadingStarted);
        self.set_current_phase(Phase::Loading(LoadingState { receiver }));
        Ok(())
    }

    pub fn tick(&mut self, dt: Duration) {
        if let Phase::Loading(state) = &self.current_phase {
            if let Some(outcome) = state.try_receive() {
                self.apply_load_outcome(outcome);
            }
            return;
        }

        let summary = match &mut self.current_phase {
            Phase::Quiz(quiz) => {
                quiz.tick(dt);
                if quiz.is_over() {
                    Some(quiz.summary())
                } else {
                    None
                }
            }
            _ => None,
        };
        if let Some(summary) = summary {
            self.finish_quiz(summary);
        }
    }

    pub fn select(&mut self, index: usize) {
        match &mut self.current_phase {
            Phase::Quiz(quiz) => quiz.select(index),
            _ => log::debug!("Ignoring selection outside of an active quiz"),
        }
    }

    pub fn lock_answer(&mut self) {
        match &mut self.current_phase {
            Phase::Quiz(quiz) => quiz.lock(),
            _ => log::debug!("Ignoring lock outside of an active quiz"),
        }
    }

    pub fn advance(&mut self) {
        match &mut self.current_phase {
            Phase::Quiz(quiz) => quiz.advance(),
            _ => log::debug!("Ignoring advance outside of an active quiz"),
        }
    }

    pub fn retreat(&mut self) {
        match &mut self.current_phase {
            Phase::Quiz(quiz) => quiz.retreat(),
            _ => log::debug!("Ignoring retreat outside of an active quiz"),
        }
    }

    /// Shows the results view. With no completed session to show, redirects
    /// to setup instead of rendering. Navigating here mid-quiz abandons the
    /// session.
    pub fn show_results(&mut self) {
        if let Phase::Results(results) = &self.current_phase {
            results.announce();
            return;
        }
        self.output.say(&Message::BackToSetup);
        self.set_current_phase(Phase::Setup);
    }

    /// Returns to setup, abandoning any in-flight load or active session.
    /// The previously chosen difficulty and amount are kept.
    pub fn restart(&mut self) {
        self.set_current_phase(Phase::Setup);
        self.output.say(&Message::SetupGreeting);
    }

    fn apply_load_outcome(&mut self, outcome: LoadOutcome) {
        if outcome.used_fallback && !outcome.questions.is_empty() {
            self.output.say(&Message::FallbackNotice);
        }
        if outcome.questions.is_empty() {
            self.output.say(&Message::NoQuestionsAvailable);
            self.set_current_phase(Phase::Setup);
            return;
        }
        let quiz = Quiz::new(outcome.questions, self.settings.clone(), self.output.clone());
        self.set_current_phase(Phase::Quiz(quiz));
    }

    fn finish_quiz(&mut self, summary: SessionSummary) {
        let score = summary.score();
        let previous_best = self.store.read().unwrap_or_else(|e| {
            log::error!("Could not read best score: {:#}", e);
            0
        });
        let is_new_best = match self.store.write_if_greater(score) {
            Ok(updated) => updated,
            Err(e) => {
                log::error!("Could not persist best score: {:#}", e);
                false
            }
        };
        let best = if is_new_best { score } else { previous_best };

        let results = ResultsState::new(summary, best, is_new_best, self.output.clone());
        results.announce();
        self.set_current_phase(Phase::Results(results));
    }

    fn set_current_phase(&mut self, phase: Phase<O>) {
        log::debug!("Entering game phase: {}", phase.name());
        self.current_phase = phase;
    }
}
