use anyhow::{Context, Result};
use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub mod question;

pub use question::{Question, RawQuestion};

const BUILTIN_BANK_CSV: &str = include_str!("../../../../assets/question_bank.csv");

lazy_static! {
    static ref BUILTIN_BANK: QuestionBank = QuestionBank::from_reader(BUILTIN_BANK_CSV.as_bytes())
        .expect("Bundled question bank is valid");
}

// CSV rows keep the incorrect answers in a single |-separated column.
#[derive(Debug, Deserialize)]
struct BankRecord {
    question: String,
    correct_answer: String,
    incorrect_answers: String,
    category: String,
    difficulty: String,
}

impl From<BankRecord> for RawQuestion {
    fn from(record: BankRecord) -> Self {
        RawQuestion {
            question: record.question,
            correct_answer: record.correct_answer,
            incorrect_answers: record
                .incorrect_answers
                .split('|')
                .map(str::to_owned)
                .collect(),
            category: record.category,
            difficulty: record.difficulty,
        }
    }
}

/// Local source of questions, used when the trivia service is unreachable.
#[derive(Clone, Debug)]
pub struct QuestionBank {
    questions: Vec<RawQuestion>,
}

impl QuestionBank {
    pub fn builtin() -> &'static QuestionBank {
        &BUILTIN_BANK
    }

    pub fn open(source: &Path) -> Result<QuestionBank> {
        let file = File::open(source)
            .with_context(|| format!("Could not open question bank {}", source.display()))?;
        Self::from_reader(file)
    }

    fn from_reader(reader: impl Read) -> Result<QuestionBank> {
        let mut questions = Vec::new();
        let mut csv_reader = csv::Reader::from_reader(reader);
        for record in csv_reader.deserialize() {
            let record: BankRecord = record?;
            questions.push(record.into());
        }
        Ok(QuestionBank { questions })
    }

    pub fn sample(&self, amount: usize, rng: &mut impl Rng) -> Vec<RawQuestion> {
        let amount = amount.min(self.questions.len());
        self.questions
            .choose_multiple(rng, amount)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[cfg(test)]
    pub fn empty() -> QuestionBank {
        QuestionBank {
            questions: Vec::new(),
        }
    }
}
