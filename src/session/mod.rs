//! A single play-through of one puzzle.
//!
//! `GameSession` is a plain state machine driven by discrete events: start,
//! guess, hint, tick, give up, reset. It owns no timer; [`timer::TimedSession`]
//! pairs it with a countdown task.

pub mod timer;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::DEFAULT_HINTS;
use crate::models::WordSet;
use crate::services::daily::format_date;
use crate::services::rng::PuzzleRng;
use crate::services::stats::DailyResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    TimedOut,
    GaveUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Completed(Outcome),
}

/// Result of submitting a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    Accepted,
    /// Accepted, and it was the last word.
    Solved,
    NotActive,
    WrongLength,
    AlreadyFound,
    NotInPuzzle,
}

impl Guess {
    pub fn is_accepted(self) -> bool {
        matches!(self, Guess::Accepted | Guess::Solved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintToggle {
    On,
    Off,
}

/// Where a hinted letter sits: which target word, which index in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HintPosition {
    pub word: usize,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    word_set: Option<WordSet>,
    display_letters: Vec<char>,
    found_words: Vec<String>,
    remaining_time: u32,
    hint_allowance: u32,
    hints_remaining: u32,
    active_hints: BTreeMap<char, Vec<HintPosition>>,
    state: SessionState,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(DEFAULT_HINTS)
    }
}

impl GameSession {
    pub fn new(hint_allowance: u32) -> Self {
        Self {
            word_set: None,
            display_letters: Vec::new(),
            found_words: Vec::new(),
            remaining_time: 0,
            hint_allowance,
            hints_remaining: hint_allowance,
            active_hints: BTreeMap::new(),
            state: SessionState::Idle,
        }
    }

    /// Begin playing `word_set`, replacing whatever was in progress.
    ///
    /// `rng` only orders the letters for display; it should be ambient
    /// randomness, not the generator that drew the puzzle.
    pub fn start<R: PuzzleRng>(&mut self, word_set: WordSet, duration: u32, rng: &mut R) {
        self.display_letters = rng.shuffle(word_set.letters());
        self.word_set = Some(word_set);
        self.found_words.clear();
        self.remaining_time = duration;
        self.hints_remaining = self.hint_allowance;
        self.active_hints.clear();
        self.state = if duration == 0 {
            SessionState::Completed(Outcome::TimedOut)
        } else {
            SessionState::Active
        };
    }

    pub fn submit_word(&mut self, raw: &str) -> Guess {
        if !self.is_active() {
            return Guess::NotActive;
        }
        let word_set = match &self.word_set {
            Some(set) => set,
            None => return Guess::NotActive,
        };

        let word = raw.trim().to_uppercase();
        if word.chars().count() != word_set.word_length() {
            return Guess::WrongLength;
        }
        if self.found_words.contains(&word) {
            return Guess::AlreadyFound;
        }
        if !word_set.contains_word(&word) {
            return Guess::NotInPuzzle;
        }

        let total = word_set.words().len();
        self.found_words.push(word);
        if self.found_words.len() == total {
            self.state = SessionState::Completed(Outcome::Won);
            Guess::Solved
        } else {
            Guess::Accepted
        }
    }

    /// Toggle a hint for `letter`. Turning a hint off is free and always
    /// allowed; turning one on costs a hint. `None` when rejected.
    pub fn use_hint(&mut self, letter: char) -> Option<HintToggle> {
        if !self.is_active() {
            return None;
        }
        let letter = letter.to_uppercase().next()?;
        if self.active_hints.remove(&letter).is_some() {
            return Some(HintToggle::Off);
        }
        if self.hints_remaining == 0 {
            return None;
        }
        let word_set = self.word_set.as_ref()?;
        if !word_set.contains_letter(letter) {
            return None;
        }

        let positions = word_set
            .words()
            .iter()
            .enumerate()
            .flat_map(|(word, text)| {
                text.chars()
                    .enumerate()
                    .filter(move |(_, c)| *c == letter)
                    .map(move |(index, _)| HintPosition { word, index })
            })
            .collect();
        self.active_hints.insert(letter, positions);
        self.hints_remaining -= 1;
        Some(HintToggle::On)
    }

    /// One second passes. Returns whether the session is still active.
    pub fn tick(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining_time = self.remaining_time.saturating_sub(1);
        if self.remaining_time == 0 {
            self.state = SessionState::Completed(Outcome::TimedOut);
        }
        self.is_active()
    }

    pub fn give_up(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = SessionState::Completed(Outcome::GaveUp);
        true
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.hint_allowance);
    }

    /// Reorder the displayed letters. Does not touch the puzzle.
    pub fn shuffle_letters<R: PuzzleRng>(&mut self, rng: &mut R) {
        if self.is_active() {
            self.display_letters = rng.shuffle(&self.display_letters);
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, SessionState::Completed(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            SessionState::Completed(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn word_set(&self) -> Option<&WordSet> {
        self.word_set.as_ref()
    }

    pub fn display_letters(&self) -> &[char] {
        &self.display_letters
    }

    pub fn found_words(&self) -> &[String] {
        &self.found_words
    }

    pub fn remaining_time(&self) -> u32 {
        self.remaining_time
    }

    pub fn hints_remaining(&self) -> u32 {
        self.hints_remaining
    }

    pub fn hints_used(&self) -> u32 {
        self.hint_allowance - self.hints_remaining
    }

    pub fn hint_allowance(&self) -> u32 {
        self.hint_allowance
    }

    pub fn active_hints(&self) -> &BTreeMap<char, Vec<HintPosition>> {
        &self.active_hints
    }

    /// Result record for a finished session.
    pub fn result(&self, date: NaiveDate) -> Option<DailyResult> {
        let outcome = self.outcome()?;
        let word_set = self.word_set.as_ref()?;
        Some(DailyResult {
            date: format_date(date),
            words_found: self.found_words.len(),
            total_words: word_set.words().len(),
            time_remaining: self.remaining_time,
            hints_used: self.hints_used(),
            completed: outcome == Outcome::Won,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    use crate::models::GameDifficulty;
    use crate::services::rng::AmbientRng;

    fn hello_world() -> WordSet {
        WordSet::new(
            vec!["HELLO".to_string(), "WORLD".to_string()],
            "HELOWRD".chars().collect(),
            HashMap::new(),
            GameDifficulty::Normal,
        )
        .unwrap()
    }

    fn started(duration: u32) -> GameSession {
        let mut session = GameSession::default();
        session.start(hello_world(), duration, &mut AmbientRng::from_seed(11));
        session
    }

    #[test]
    fn test_start_initialises_session() {
        let session = started(300);
        assert_eq!(session.state(), SessionState::Active);
        assert!(session.found_words().is_empty());
        assert_eq!(session.remaining_time(), 300);
        assert_eq!(session.hints_remaining(), DEFAULT_HINTS);
        assert!(session.active_hints().is_empty());

        let shown: HashSet<char> = session.display_letters().iter().copied().collect();
        let pool: HashSet<char> = "HELOWRD".chars().collect();
        assert_eq!(shown, pool);
        // The puzzle itself keeps its own letter order.
        assert_eq!(session.word_set().unwrap().letters_string(), "HELOWRD");
    }

    #[test]
    fn test_submit_first_word_does_not_complete() {
        let mut session = started(300);
        assert_eq!(session.submit_word("HELLO"), Guess::Accepted);
        assert_eq!(session.found_words(), &["HELLO".to_string()]);
        assert!(session.is_active());
        assert!(!session.is_completed());
    }

    #[test]
    fn test_duplicate_submission_is_rejected() {
        let mut session = started(300);
        assert!(session.submit_word("hello").is_accepted());
        assert_eq!(session.submit_word("HELLO"), Guess::AlreadyFound);
        assert_eq!(session.found_words().len(), 1);
    }

    #[test]
    fn test_invalid_submissions_leave_state_alone() {
        let mut session = started(300);
        assert_eq!(session.submit_word("HI"), Guess::WrongLength);
        assert_eq!(session.submit_word("HOUSE"), Guess::NotInPuzzle);
        assert_eq!(session.submit_word("HELLOS"), Guess::WrongLength);
        assert!(session.found_words().is_empty());
        assert!(session.is_active());
    }

    #[test]
    fn test_finding_every_word_wins() {
        let mut session = started(300);
        session.submit_word("world");
        assert_eq!(session.submit_word(" Hello "), Guess::Solved);
        assert_eq!(session.state(), SessionState::Completed(Outcome::Won));
        assert!(!session.is_active());
        assert_eq!(session.submit_word("HELLO"), Guess::NotActive);
    }

    #[test]
    fn test_submit_while_idle_is_a_noop() {
        let mut session = GameSession::default();
        assert_eq!(session.submit_word("HELLO"), Guess::NotActive);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.found_words().is_empty());
    }

    #[test]
    fn test_tick_times_out() {
        let mut session = started(2);
        assert!(session.tick());
        assert_eq!(session.remaining_time(), 1);
        assert!(!session.tick());
        assert_eq!(session.state(), SessionState::Completed(Outcome::TimedOut));
        assert!(!session.tick());
        assert_eq!(session.remaining_time(), 0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let session = started(0);
        assert_eq!(session.outcome(), Some(Outcome::TimedOut));
    }

    #[test]
    fn test_give_up() {
        let mut session = started(300);
        assert!(session.give_up());
        assert_eq!(session.outcome(), Some(Outcome::GaveUp));
        assert!(!session.give_up());
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = started(300);
        session.submit_word("HELLO");
        session.use_hint('L');
        session.reset();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.word_set().is_none());
        assert!(session.found_words().is_empty());
        assert!(session.active_hints().is_empty());
        assert_eq!(session.hints_remaining(), DEFAULT_HINTS);
    }

    #[test]
    fn test_hint_positions() {
        let mut session = started(300);
        assert_eq!(session.use_hint('l'), Some(HintToggle::On));
        let positions = &session.active_hints()[&'L'];
        assert_eq!(
            positions,
            &vec![
                HintPosition { word: 0, index: 2 },
                HintPosition { word: 0, index: 3 },
                HintPosition { word: 1, index: 3 },
            ]
        );
    }

    #[test]
    fn test_hint_accounting() {
        let mut session = GameSession::new(2);
        session.start(hello_world(), 300, &mut AmbientRng::from_seed(5));

        assert_eq!(session.use_hint('H'), Some(HintToggle::On));
        assert_eq!(session.hints_remaining(), 1);
        assert_eq!(session.use_hint('H'), Some(HintToggle::Off));
        assert_eq!(session.hints_remaining(), 1);
        assert_eq!(session.use_hint('O'), Some(HintToggle::On));
        assert_eq!(session.hints_remaining(), 0);

        // Out of hints: new letters are refused, toggling off still works.
        assert_eq!(session.use_hint('W'), None);
        assert_eq!(session.use_hint('O'), Some(HintToggle::Off));
        assert_eq!(session.hints_remaining(), 0);
        assert_eq!(session.hints_used(), 2);
    }

    #[test]
    fn test_hint_for_unknown_letter_is_free() {
        let mut session = started(300);
        assert_eq!(session.use_hint('Z'), None);
        assert_eq!(session.hints_remaining(), DEFAULT_HINTS);
    }

    #[test]
    fn test_hints_need_an_active_session() {
        let mut session = GameSession::default();
        assert_eq!(session.use_hint('H'), None);
        let mut session = started(300);
        session.give_up();
        assert_eq!(session.use_hint('H'), None);
    }

    #[test]
    fn test_result_record() {
        let mut session = started(300);
        let date = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
        assert!(session.result(date).is_none());

        session.use_hint('W');
        session.tick();
        session.submit_word("HELLO");
        session.submit_word("WORLD");
        let result = session.result(date).unwrap();
        assert_eq!(
            result,
            DailyResult {
                date: "2024-05-04".to_string(),
                words_found: 2,
                total_words: 2,
                time_remaining: 299,
                hints_used: 1,
                completed: true,
            }
        );

        let mut session = started(300);
        session.submit_word("HELLO");
        session.give_up();
        let result = session.result(date).unwrap();
        assert!(!result.completed);
        assert_eq!(result.words_found, 1);
    }

    #[test]
    fn test_found_words_stay_within_targets() {
        let mut session = started(300);
        for guess in ["HELLO", "hello", "WORLD", "WORDS", "H", "", "WORLD"] {
            session.submit_word(guess);
        }
        let found: HashSet<&String> = session.found_words().iter().collect();
        assert_eq!(found.len(), session.found_words().len());
        assert!(session
            .found_words()
            .iter()
            .all(|w| session.word_set().unwrap().contains_word(w)));
        assert!(session.is_completed());
    }
}
