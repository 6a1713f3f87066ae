//! Share tokens: a whole puzzle packed into one URL-safe string.
//!
//! The token is base64 over a small JSON record:
//!
//! ```json
//! {"words":["CRANE","SLATE"],"letters":"RCNAELTS","wordLength":5,
//!  "difficulties":[["CRANE","easy"],["SLATE","medium"]],"gameDifficulty":"normal"}
//! ```
//!
//! Tokens are emitted with the URL-safe alphabet and no padding. Decoding also
//! takes the standard alphabet, padded or not, which is what browsers produce
//! with `btoa`.

use std::collections::HashMap;
use std::fmt::Write as _;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::DecodeError;
use crate::models::{GameDifficulty, WordDifficulty, WordSet};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeedRecord<'a> {
    words: &'a [String],
    letters: String,
    word_length: usize,
    difficulties: Vec<(&'a str, WordDifficulty)>,
    game_difficulty: GameDifficulty,
}

/// Incoming record. Only `words` and `letters` are required; everything else
/// is read leniently and defaulted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedPayload {
    words: Option<Value>,
    letters: Option<Value>,
    #[serde(default)]
    word_length: Option<Value>,
    #[serde(default)]
    difficulties: Option<Value>,
    #[serde(default)]
    game_difficulty: Option<Value>,
}

pub fn encode(word_set: &WordSet) -> String {
    let mut difficulties: Vec<(&str, WordDifficulty)> = word_set
        .word_difficulties()
        .iter()
        .map(|(word, difficulty)| (word.as_str(), *difficulty))
        .collect();
    difficulties.sort_unstable();

    let record = SeedRecord {
        words: word_set.words(),
        letters: word_set.letters_string(),
        word_length: word_set.word_length(),
        difficulties,
        game_difficulty: word_set.game_difficulty(),
    };
    // Serialising plain strings and enums cannot fail.
    let json = serde_json::to_string(&record).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

pub fn decode(token: &str) -> Result<WordSet, DecodeError> {
    let normalized: String = token
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let bytes = URL_SAFE_NO_PAD.decode(normalized.as_bytes())?;
    let json = String::from_utf8(bytes)?;
    let payload: SeedPayload = serde_json::from_str(&json)?;
    payload.into_word_set()
}

impl SeedPayload {
    fn into_word_set(self) -> Result<WordSet, DecodeError> {
        let words = match self.words {
            Some(Value::Array(items)) if !items.is_empty() => items
                .into_iter()
                .map(|item| match item {
                    Value::String(word) => Ok(word),
                    _ => Err(DecodeError::Invalid("words must be strings")),
                })
                .collect::<Result<Vec<String>, DecodeError>>()?,
            _ => return Err(DecodeError::Invalid("missing words array")),
        };

        let letters: Vec<char> = match self.letters {
            Some(Value::String(letters)) if !letters.is_empty() => letters.chars().collect(),
            _ => return Err(DecodeError::Invalid("missing letters")),
        };

        let first_length = words[0].chars().count();
        let word_length = self
            .word_length
            .as_ref()
            .and_then(Value::as_u64)
            .filter(|&n| n > 0)
            .map(|n| n as usize)
            .unwrap_or(first_length);
        if word_length != first_length {
            return Err(DecodeError::Invalid("wordLength does not match the words"));
        }

        let mut word_difficulties = HashMap::new();
        if let Some(Value::Array(pairs)) = self.difficulties {
            for pair in pairs {
                if let Some((word, difficulty)) = difficulty_pair(&pair) {
                    word_difficulties.insert(word, difficulty);
                }
            }
        }

        let game_difficulty = self
            .game_difficulty
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Ok(WordSet::new(
            words,
            letters,
            word_difficulties,
            game_difficulty,
        )?)
    }
}

fn difficulty_pair(pair: &Value) -> Option<(String, WordDifficulty)> {
    match pair.as_array()?.as_slice() {
        [Value::String(word), Value::String(difficulty)] => {
            Some((word.to_uppercase(), difficulty.parse().ok()?))
        }
        _ => None,
    }
}

/// Query string of a shareable link: `seed=<token>[&challenge=true[&time=<epoch ms>]]`.
///
/// The start time is carried for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeLink {
    pub token: String,
    pub challenge: bool,
    pub start_time: Option<i64>,
}

impl ChallengeLink {
    pub fn new(word_set: &WordSet) -> Self {
        Self {
            token: encode(word_set),
            challenge: false,
            start_time: None,
        }
    }

    pub fn challenge(word_set: &WordSet, start_time: i64) -> Self {
        Self {
            token: encode(word_set),
            challenge: true,
            start_time: Some(start_time),
        }
    }

    pub fn to_query(&self) -> String {
        let mut query = format!("seed={}", self.token);
        if self.challenge {
            query.push_str("&challenge=true");
            if let Some(time) = self.start_time {
                let _ = write!(query, "&time={}", time);
            }
        }
        query
    }

    /// Parse a query string, with or without its leading `?` or a URL in
    /// front. `None` when there is no `seed`.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.rsplit_once('?').map_or(query, |(_, q)| q);
        let mut token = None;
        let mut challenge = false;
        let mut start_time = None;
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "seed" => token = Some(unescape(value)),
                "challenge" => challenge = value == "true",
                "time" => start_time = value.parse().ok(),
                _ => {}
            }
        }
        Some(Self {
            token: token.filter(|t| !t.is_empty())?,
            challenge,
            start_time,
        })
    }

    pub fn word_set(&self) -> Result<WordSet, DecodeError> {
        decode(&self.token)
    }
}

// Standard-alphabet tokens get these three escaped by `encodeURIComponent`.
fn unescape(value: &str) -> String {
    value
        .replace("%2B", "+")
        .replace("%2b", "+")
        .replace("%2F", "/")
        .replace("%2f", "/")
        .replace("%3D", "=")
        .replace("%3d", "=")
}
