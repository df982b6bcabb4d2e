use anyhow::{anyhow, Context, Result};
use html_escape::decode_html_entities;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

pub const OPTION_COUNT: usize = 4;

/// Question shape shared by the remote trivia service and the local bank.
/// All text fields may still contain HTML entities at this point.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RawQuestion {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub category: String,
    pub difficulty: String,
}

impl Question {
    /// Turns a raw question into a displayable one: decodes HTML entities and
    /// shuffles the correct answer in with the incorrect ones.
    pub fn normalize(raw: RawQuestion, rng: &mut impl Rng) -> Result<Question> {
        if raw.incorrect_answers.len() != OPTION_COUNT - 1 {
            return Err(anyhow!(
                "Expected {} incorrect answers, found {}",
                OPTION_COUNT - 1,
                raw.incorrect_answers.len()
            ));
        }

        // The correct option is tracked by provenance, not by comparing
        // strings, so duplicate option text cannot misplace it.
        let mut options: Vec<(String, bool)> = Vec::with_capacity(OPTION_COUNT);
        options.push((decode(&raw.correct_answer), true));
        for answer in &raw.incorrect_answers {
            options.push((decode(answer), false));
        }
        options.shuffle(rng);

        let correct_index = options
            .iter()
            .position(|(_text, is_correct)| *is_correct)
            .context("Correct answer missing after shuffle")?;

        Ok(Question {
            text: decode(&raw.question),
            options: options.into_iter().map(|(text, _is_correct)| text).collect(),
            correct_index,
            category: decode(&raw.category),
            difficulty: decode(&raw.difficulty),
        })
    }

    pub fn correct_text(&self) -> &str {
        &self.options[self.correct_index]
    }
}

fn decode(text: &str) -> String {
    decode_html_entities(text).into_owned()
}
