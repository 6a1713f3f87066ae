use std::io;
use thiserror::Error;

/// Invariant violations detected while assembling a `WordSet`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordSetError {
    #[error("word set has no words")]
    NoWords,
    #[error("word set has no letters")]
    NoLetters,
    #[error("word {word} has length {found}, expected {expected}")]
    MixedLengths {
        word: String,
        expected: usize,
        found: usize,
    },
    #[error("word {0} appears more than once")]
    DuplicateWord(String),
    #[error("word {word} uses letter {letter} which is missing from the pool")]
    MissingLetter { word: String, letter: char },
    #[error("letter {0} is in the pool but in none of the words")]
    StrayLetter(char),
}

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("word source yielded no usable words of length {0}")]
    EmptySource(usize),
    #[error("malformed word set: {0}")]
    MalformedWordSet(#[from] WordSetError),
    #[error("failed to read word source: {0}")]
    Io(#[from] io::Error),
}

/// Reasons a share token could not be turned back into a puzzle.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("seed is not valid base64: {0}")]
    Transport(#[from] base64::DecodeError),
    #[error("seed payload is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("seed payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid seed: {0}")]
    Invalid(&'static str),
    #[error("seed describes a malformed puzzle: {0}")]
    Malformed(#[from] WordSetError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty: {0}")]
pub struct UnknownDifficulty(pub String);

/// Failures of a terminal play session.
#[derive(Debug, Error)]
pub enum PlayError {
    #[error("could not load the shared puzzle: {0}")]
    Seed(#[from] DecodeError),
    #[error("could not build a puzzle: {0}")]
    Puzzle(#[from] PuzzleError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
