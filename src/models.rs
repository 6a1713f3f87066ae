use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::errors::{UnknownDifficulty, WordSetError};

/// Application state shared across all handlers
pub struct AppState {
    /// Candidate words, already restricted to `config.word_length`.
    pub words: Vec<String>,
    pub config: GameConfig,
}

/// How hard a single target word is to find.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl WordDifficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            WordDifficulty::Easy => "easy",
            WordDifficulty::Medium => "medium",
            WordDifficulty::Hard => "hard",
        }
    }
}

impl FromStr for WordDifficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(WordDifficulty::Easy),
            "medium" => Ok(WordDifficulty::Medium),
            "hard" => Ok(WordDifficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for WordDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection difficulty used when the puzzle's words were drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameDifficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl GameDifficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            GameDifficulty::Easy => "easy",
            GameDifficulty::Normal => "normal",
            GameDifficulty::Hard => "hard",
        }
    }
}

impl FromStr for GameDifficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(GameDifficulty::Easy),
            "normal" => Ok(GameDifficulty::Normal),
            "hard" => Ok(GameDifficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for GameDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One puzzle: the target words and the letter pool they are spelled from.
///
/// A `WordSet` is only built through [`WordSet::new`], which normalises the
/// input to uppercase and checks that every word has the same length, that no
/// word repeats, and that the pool holds exactly the letters the words use
/// (one instance per distinct letter). It is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct WordSet {
    letters: Vec<char>,
    words: Vec<String>,
    word_length: usize,
    word_difficulties: HashMap<String, WordDifficulty>,
    game_difficulty: GameDifficulty,
}

impl WordSet {
    pub fn new(
        words: Vec<String>,
        letters: Vec<char>,
        word_difficulties: HashMap<String, WordDifficulty>,
        game_difficulty: GameDifficulty,
    ) -> Result<Self, WordSetError> {
        let words: Vec<String> = words.iter().map(|w| w.trim().to_uppercase()).collect();
        let first = words.first().ok_or(WordSetError::NoWords)?;
        let word_length = first.chars().count();
        if word_length == 0 {
            return Err(WordSetError::NoWords);
        }

        let mut seen = HashSet::new();
        for word in &words {
            let len = word.chars().count();
            if len != word_length {
                return Err(WordSetError::MixedLengths {
                    word: word.clone(),
                    expected: word_length,
                    found: len,
                });
            }
            if !seen.insert(word.as_str()) {
                return Err(WordSetError::DuplicateWord(word.clone()));
            }
        }

        let mut pool = HashSet::new();
        let letters: Vec<char> = letters
            .into_iter()
            .flat_map(char::to_uppercase)
            .filter(|c| pool.insert(*c))
            .collect();
        if letters.is_empty() {
            return Err(WordSetError::NoLetters);
        }

        let mut used = HashSet::new();
        for word in &words {
            for letter in word.chars() {
                if !pool.contains(&letter) {
                    return Err(WordSetError::MissingLetter {
                        word: word.clone(),
                        letter,
                    });
                }
                used.insert(letter);
            }
        }
        if let Some(&stray) = letters.iter().find(|c| !used.contains(c)) {
            return Err(WordSetError::StrayLetter(stray));
        }

        let word_difficulties = word_difficulties
            .into_iter()
            .map(|(word, difficulty)| (word.to_uppercase(), difficulty))
            .filter(|(word, _)| seen.contains(word.as_str()))
            .collect();

        Ok(Self {
            letters,
            words,
            word_length,
            word_difficulties,
            game_difficulty,
        })
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn letters_string(&self) -> String {
        self.letters.iter().collect()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn word_difficulties(&self) -> &HashMap<String, WordDifficulty> {
        &self.word_difficulties
    }

    /// Difficulty of `word`, `Medium` when the set carries no rating for it.
    pub fn difficulty_of(&self, word: &str) -> WordDifficulty {
        self.word_difficulties
            .get(&word.to_uppercase())
            .copied()
            .unwrap_or_default()
    }

    pub fn game_difficulty(&self) -> GameDifficulty {
        self.game_difficulty
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn contains_letter(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }
}

impl PartialEq for WordSet {
    fn eq(&self, other: &Self) -> bool {
        let ours: HashSet<char> = self.letters.iter().copied().collect();
        let theirs: HashSet<char> = other.letters.iter().copied().collect();
        self.words == other.words
            && ours == theirs
            && self.word_length == other.word_length
            && self.word_difficulties == other.word_difficulties
            && self.game_difficulty == other.game_difficulty
    }
}

impl Eq for WordSet {}

/// JSON view of a `WordSet` for HTTP responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleBody {
    pub words: Vec<String>,
    pub letters: String,
    pub word_length: usize,
    pub word_difficulties: BTreeMap<String, WordDifficulty>,
    pub game_difficulty: GameDifficulty,
}

impl From<&WordSet> for PuzzleBody {
    fn from(set: &WordSet) -> Self {
        Self {
            words: set.words().to_vec(),
            letters: set.letters_string(),
            word_length: set.word_length(),
            word_difficulties: set
                .words()
                .iter()
                .map(|w| (w.clone(), set.difficulty_of(w)))
                .collect(),
            game_difficulty: set.game_difficulty(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResponse {
    #[serde(flatten)]
    pub puzzle: PuzzleBody,
    pub date: String,
    pub day_number: i64,
    pub seed: String,
    pub token: String,
    pub is_daily: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleResponse {
    #[serde(flatten)]
    pub puzzle: PuzzleBody,
    pub token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordsResponse {
    pub words: Vec<String>,
    pub total_words_available: usize,
    pub difficulty: GameDifficulty,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResponse {
    #[serde(flatten)]
    pub puzzle: PuzzleBody,
    pub challenge: bool,
    /// Advisory start time (epoch milliseconds) carried by a challenge link.
    pub start_time: Option<i64>,
}

#[derive(Serialize)]
pub struct ClassifyResponse {
    pub word: String,
    pub difficulty: WordDifficulty,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub word_length: usize,
    pub puzzle_size: usize,
    pub daily_size: usize,
    pub duration: u32,
    pub hints: u32,
    pub word_count: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
pub struct PuzzleQuery {
    pub difficulty: Option<String>,
    pub count: Option<usize>,
}

#[derive(Deserialize)]
pub struct DailyQuery {
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct ChallengeQuery {
    pub challenge: Option<bool>,
    pub time: Option<i64>,
}
