use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::errors::PuzzleError;

/// Curated everyday words compiled into the binary.
const EMBEDDED_WORDS: &str = include_str!("../data/common_words.txt");

/// Puzzle used by callers that choose to recover from an unusable source.
pub const FALLBACK_WORDS: [&str; 8] = [
    "ABOUT", "ABOVE", "ABUSE", "ACTOR", "ADAPT", "ADMIT", "ADOPT", "ADULT",
];

/// Anything that can supply candidate words of one length.
pub trait WordSource {
    fn fetch_words(&self, word_length: usize) -> Result<Vec<String>, PuzzleError>;
}

/// Accept a line only if it is exactly `word_length` ASCII letters.
pub fn normalize_word(line: &str, word_length: usize) -> Option<String> {
    let word = line.trim();
    if word.len() == word_length && word.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(word.to_ascii_uppercase())
    } else {
        None
    }
}

fn collect_words<'a>(lines: impl Iterator<Item = &'a str>, word_length: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .filter_map(|line| normalize_word(line, word_length))
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedWordSource;

impl WordSource for EmbeddedWordSource {
    fn fetch_words(&self, word_length: usize) -> Result<Vec<String>, PuzzleError> {
        Ok(collect_words(EMBEDDED_WORDS.lines(), word_length))
    }
}

impl WordSource for Vec<String> {
    fn fetch_words(&self, word_length: usize) -> Result<Vec<String>, PuzzleError> {
        Ok(collect_words(self.iter().map(String::as_str), word_length))
    }
}

/// Load words from a plain text file (one word per line)
pub fn load_words(file_path: &Path, word_length: usize) -> io::Result<Vec<String>> {
    let file = File::open(file_path)?;
    let reader = io::BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }

    Ok(collect_words(lines.iter().map(String::as_str), word_length))
}

/// Lexicon for one language under a share directory:
/// `<share>/words/<lang>/lexicon.txt`, plus `insertions.txt`, minus
/// `deletions.txt`. Only the lexicon is required.
#[derive(Debug, Clone)]
pub struct FileWordSource {
    lang_dir: PathBuf,
    lang: String,
}

impl FileWordSource {
    pub fn new(share_dir: impl AsRef<Path>, lang: &str) -> Self {
        Self {
            lang_dir: share_dir.as_ref().join("words").join(lang),
            lang: lang.to_string(),
        }
    }

    pub fn lexicon_path(&self) -> PathBuf {
        self.lang_dir.join("lexicon.txt")
    }
}

impl WordSource for FileWordSource {
    fn fetch_words(&self, word_length: usize) -> Result<Vec<String>, PuzzleError> {
        let mut words = load_words(&self.lexicon_path(), word_length)?;

        if let Ok(custom) = load_words(&self.lang_dir.join("insertions.txt"), word_length) {
            info!("Inserted {} words into {} lexicon.", custom.len(), self.lang);
            let known: HashSet<String> = words.iter().cloned().collect();
            words.extend(custom.into_iter().filter(|w| !known.contains(w)));
        }

        if let Ok(censored) = load_words(&self.lang_dir.join("deletions.txt"), word_length) {
            info!("Deleted {} words from {} lexicon.", censored.len(), self.lang);
            let censored: HashSet<String> = censored.into_iter().collect();
            words.retain(|w| !censored.contains(w));
        }

        info!(
            "Total valid words for {} (length {}): {}",
            self.lang,
            word_length,
            words.len()
        );
        Ok(words)
    }
}

/// Words from the share directory, or the embedded list when the lexicon is
/// missing or holds no words of the requested length.
pub fn load_candidates(share_dir: &Path, lang: &str, word_length: usize) -> Vec<String> {
    let source = FileWordSource::new(share_dir, lang);
    match source.fetch_words(word_length) {
        Ok(words) if !words.is_empty() => words,
        Ok(_) => {
            warn!(
                "Lexicon at {} has no {}-letter words; using the embedded list.",
                source.lexicon_path().display(),
                word_length
            );
            EmbeddedWordSource.fetch_words(word_length).unwrap_or_default()
        }
        Err(e) => {
            warn!(
                "Failed to load main lexicon for {} at {}: {}. Using the embedded list.",
                lang,
                source.lexicon_path().display(),
                e
            );
            EmbeddedWordSource.fetch_words(word_length).unwrap_or_default()
        }
    }
}
