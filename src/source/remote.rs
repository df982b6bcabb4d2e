use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::game::quiz::definition::RawQuestion;
use crate::source::{Fetch, LoadRequest};

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    response_code: u32,
    results: Vec<RawQuestion>,
}

pub struct OpenTriviaClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl OpenTriviaClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Could not build HTTP client")?;
        Ok(OpenTriviaClient {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }
}

impl Fetch for OpenTriviaClient {
    fn fetch(&self, request: &LoadRequest) -> Result<Vec<RawQuestion>> {
        let url = format!("{}/api.php", self.base_url);
        let mut query: Vec<(&str, String)> = vec![
            ("amount", request.clamped_amount().to_string()),
            ("type", "multiple".to_owned()),
        ];
        if let Some(difficulty) = request.difficulty {
            query.push(("difficulty", difficulty.as_str().to_owned()));
        }

        let response: TriviaResponse = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .with_context(|| format!("Could not reach {}", url))?
            .error_for_status()?
            .json()
            .context("Malformed trivia service response")?;

        if response.response_code != 0 {
            return Err(anyhow!(
                "Trivia service returned error code {}",
                response.response_code
            ));
        }
        Ok(response.results)
    }
}
