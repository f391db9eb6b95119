//! Open Trivia Database client.

use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::models::{Difficulty, Question};

use super::decode::decode_html_entities;
use super::{QuestionSource, SourceError};

const API_URL: &str = "https://opentdb.com/api.php";

/// A fetch that takes longer than this degrades to a retryable error
/// instead of stalling the game.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ApiResponse {
    results: Vec<ApiQuestion>,
}

#[derive(Debug, Deserialize)]
struct ApiQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

/// Fetches multiple-choice questions from opentdb.com.
pub struct OpenTriviaSource {
    client: reqwest::Client,
}

impl OpenTriviaSource {
    pub fn new() -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl QuestionSource for OpenTriviaSource {
    async fn fetch(&self, difficulty: Difficulty) -> Result<Question, SourceError> {
        let response = self
            .client
            .get(API_URL)
            .query(&[
                ("amount", "1"),
                ("difficulty", difficulty.api_value()),
                ("type", "multiple"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("trivia API returned status {}", status);
            return Err(SourceError::Status(status.as_u16()));
        }

        let payload: ApiResponse = response.json().await?;
        let raw = payload
            .results
            .into_iter()
            .next()
            .ok_or(SourceError::Empty)?;

        build_question(raw, &mut rand::thread_rng())
    }
}

/// Decode the escaped API text and shuffle the correct answer in among
/// the distractors.
fn build_question(raw: ApiQuestion, rng: &mut impl Rng) -> Result<Question, SourceError> {
    if raw.incorrect_answers.len() != 3 {
        return Err(SourceError::Malformed(format!(
            "expected 3 incorrect answers, got {}",
            raw.incorrect_answers.len()
        )));
    }

    let correct_answer = decode_html_entities(&raw.correct_answer);
    let mut choices: Vec<String> = raw
        .incorrect_answers
        .iter()
        .map(|a| decode_html_entities(a))
        .collect();
    choices.push(correct_answer.clone());

    for i in 0..choices.len() {
        for j in i + 1..choices.len() {
            if choices[i] == choices[j] {
                return Err(SourceError::Malformed(format!(
                    "duplicate choice {:?}",
                    choices[i]
                )));
            }
        }
    }

    choices.shuffle(rng);
    let choices: [String; 4] = choices
        .try_into()
        .map_err(|_| SourceError::Malformed("expected exactly 4 choices".to_string()))?;

    Ok(Question {
        prompt: decode_html_entities(&raw.question),
        choices,
        correct_answer,
    })
}
