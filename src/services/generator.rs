use std::collections::HashSet;

use chrono::NaiveDate;
use log::debug;

use crate::config::GameConfig;
use crate::errors::PuzzleError;
use crate::models::{GameDifficulty, WordSet};
use crate::services::daily::daily_seed;
use crate::services::difficulty::classify_all;
use crate::services::letter_classifier::matches_game_difficulty;
use crate::services::rng::{PuzzleRng, SeededRandom};
use crate::services::word_loader::{normalize_word, WordSource, FALLBACK_WORDS};
use crate::utils::unique_letters;

/// What to draw and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub word_length: usize,
    pub puzzle_size: usize,
    pub difficulty: Option<GameDifficulty>,
    /// Below this many survivors the difficulty filter is dropped.
    pub min_candidates: usize,
}

impl BuildOptions {
    pub fn new(config: &GameConfig, puzzle_size: usize, difficulty: Option<GameDifficulty>) -> Self {
        Self {
            word_length: config.word_length,
            puzzle_size,
            difficulty,
            min_candidates: config.min_candidates,
        }
    }
}

/// Normalised, de-duplicated candidates of the right length, narrowed to the
/// requested difficulty unless that would leave fewer than `min_candidates`.
pub fn candidate_pool(words: &[String], options: &BuildOptions) -> Vec<String> {
    let mut seen = HashSet::new();
    let pool: Vec<String> = words
        .iter()
        .filter_map(|w| normalize_word(w, options.word_length))
        .filter(|w| seen.insert(w.clone()))
        .collect();

    let difficulty = match options.difficulty {
        Some(d) if d != GameDifficulty::Normal => d,
        _ => return pool,
    };

    let filtered: Vec<String> = pool
        .iter()
        .filter(|w| matches_game_difficulty(w, difficulty))
        .cloned()
        .collect();

    if filtered.len() < options.min_candidates {
        debug!(
            "Only {} {} candidates out of {}; ignoring the difficulty filter",
            filtered.len(),
            difficulty,
            pool.len()
        );
        pool
    } else {
        filtered
    }
}

/// Shuffled candidates for a word-list request.
pub fn random_words<R: PuzzleRng>(
    candidates: &[String],
    options: &BuildOptions,
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, PuzzleError> {
    let pool = candidate_pool(candidates, options);
    if pool.is_empty() {
        return Err(PuzzleError::EmptySource(options.word_length));
    }
    Ok(rng.shuffle(&pool).into_iter().take(count).collect())
}

/// Draw a puzzle from `candidates`.
///
/// The pool is shuffled with `rng`, the first `puzzle_size` words become the
/// targets, and their distinct letters are shuffled with the same `rng`. With
/// a `SeededRandom` the result depends only on the seed and the candidates.
pub fn build_word_set<R: PuzzleRng>(
    candidates: &[String],
    options: &BuildOptions,
    rng: &mut R,
) -> Result<WordSet, PuzzleError> {
    let pool = candidate_pool(candidates, options);
    if pool.is_empty() {
        return Err(PuzzleError::EmptySource(options.word_length));
    }

    let words: Vec<String> = rng
        .shuffle(&pool)
        .into_iter()
        .take(options.puzzle_size.max(1))
        .collect();
    let letters = rng.shuffle(&unique_letters(&words));
    let difficulties = classify_all(&words);
    let game_difficulty = options.difficulty.unwrap_or_default();

    let word_set = WordSet::new(words, letters, difficulties, game_difficulty)?;
    debug!(
        "Built {} puzzle with {} words over {} letters",
        game_difficulty,
        word_set.words().len(),
        word_set.letters().len()
    );
    Ok(word_set)
}

/// Fetch candidates from `source` and build a puzzle from them.
pub fn generate<S, R>(source: &S, options: &BuildOptions, rng: &mut R) -> Result<WordSet, PuzzleError>
where
    S: WordSource + ?Sized,
    R: PuzzleRng,
{
    let candidates = source.fetch_words(options.word_length)?;
    build_word_set(&candidates, options, rng)
}

/// The daily puzzle for `date`, together with the seed string that drew it.
pub fn daily_word_set(
    candidates: &[String],
    config: &GameConfig,
    date: NaiveDate,
) -> Result<(String, WordSet), PuzzleError> {
    let seed = daily_seed(date);
    let mut rng = SeededRandom::new(&seed);
    let options = BuildOptions::new(config, config.daily_size, None);
    let word_set = build_word_set(candidates, &options, &mut rng)?;
    Ok((seed, word_set))
}

/// The fixed puzzle callers may fall back to when their source is unusable.
pub fn fallback_word_set<R: PuzzleRng>(
    difficulty: Option<GameDifficulty>,
    rng: &mut R,
) -> Result<WordSet, PuzzleError> {
    let candidates: Vec<String> = FALLBACK_WORDS.iter().map(|w| w.to_string()).collect();
    let options = BuildOptions {
        word_length: FALLBACK_WORDS[0].len(),
        puzzle_size: FALLBACK_WORDS.len(),
        difficulty,
        min_candidates: usize::MAX,
    };
    build_word_set(&candidates, &options, rng)
}
