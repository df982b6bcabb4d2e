use anyhow::{anyhow, Error, Result};
use rand::thread_rng;
use std::fmt;
use std::str::FromStr;

use crate::game::quiz::definition::{Question, QuestionBank, RawQuestion};

mod remote;

pub use self::remote::OpenTriviaClient;

pub const MIN_QUESTIONS: u32 = 5;
pub const MAX_QUESTIONS: u32 = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        match text.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(anyhow!("Unknown difficulty: {}", other)),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LoadRequest {
    pub amount: u32,
    pub difficulty: Option<Difficulty>,
}

impl LoadRequest {
    pub fn new(amount: u32, difficulty: Option<Difficulty>) -> Self {
        LoadRequest { amount, difficulty }
    }

    pub fn clamped_amount(&self) -> u32 {
        self.amount.max(MIN_QUESTIONS).min(MAX_QUESTIONS)
    }
}

pub trait Fetch {
    fn fetch(&self, request: &LoadRequest) -> Result<Vec<RawQuestion>>;
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub questions: Vec<Question>,
    pub used_fallback: bool,
}

/// Produces the question list for a session. Remote first; any failure or an
/// undersized result falls back to a sample of the local bank. Never errors:
/// an empty question list is the signal that both sources are exhausted.
pub fn load(fetcher: &dyn Fetch, bank: &QuestionBank, request: &LoadRequest) -> LoadOutcome {
    let amount = request.clamped_amount();
    match fetch_remote(fetcher, request) {
        Ok(questions) => LoadOutcome {
            questions,
            used_fallback: false,
        },
        Err(e) => {
            log::warn!("Falling back to the local question bank: {:#}", e);
            LoadOutcome {
                questions: sample_bank(bank, amount as usize),
                used_fallback: true,
            }
        }
    }
}

fn fetch_remote(fetcher: &dyn Fetch, request: &LoadRequest) -> Result<Vec<Question>> {
    let raw_questions = fetcher.fetch(request)?;
    let mut rng = thread_rng();
    let mut questions = Vec::with_capacity(raw_questions.len());
    for raw in raw_questions {
        match Question::normalize(raw, &mut rng) {
            Ok(question) => questions.push(question),
            Err(e) => log::debug!("Discarding malformed question: {:#}", e),
        }
    }
    if (questions.len() as u32) < MIN_QUESTIONS {
        return Err(anyhow!(
            "Expected at least {} questions, service returned {}",
            MIN_QUESTIONS,
            questions.len()
        ));
    }
    Ok(questions)
}

fn sample_bank(bank: &QuestionBank, amount: usize) -> Vec<Question> {
    let mut rng = thread_rng();
    bank.sample(amount, &mut rng)
        .into_iter()
        .filter_map(|raw| Question::normalize(raw, &mut rng).ok())
        .collect()
}
