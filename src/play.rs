//! Terminal play: one timed session read from stdin.
//!
//! Input lines are a guess, `?X` to toggle a hint on letter X, `!shuffle`,
//! or `!quit`. End of input gives up.

use std::io;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::GameConfig;
use crate::errors::PlayError;
use crate::models::{GameDifficulty, WordSet};
use crate::services::daily::{time_until_next_daily, today};
use crate::services::generator::{build_word_set, daily_word_set, fallback_word_set, BuildOptions};
use crate::services::rng::AmbientRng;
use crate::services::seed_codec::{decode, ChallengeLink};
use crate::services::stats::{record_daily_result, share_text, JsonFileStatsStore};
use crate::session::timer::TimedSession;
use crate::session::{GameSession, Guess, HintToggle, Outcome, SessionState};
use crate::utils::format_clock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleSource {
    Daily(NaiveDate),
    /// A share token, or a link or query string carrying one.
    Seed(String),
    Random(Option<GameDifficulty>),
}

#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub source: PuzzleSource,
    pub stats_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Guess(String),
    Hint(char),
    Shuffle,
    Quit,
    Status,
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Status;
    }
    if let Some(rest) = line.strip_prefix('?') {
        return match rest.trim().chars().next() {
            Some(letter) => Command::Hint(letter),
            None => Command::Status,
        };
    }
    match line.to_lowercase().as_str() {
        "!shuffle" | "!s" => Command::Shuffle,
        "!quit" | "!q" => Command::Quit,
        _ => Command::Guess(line.to_string()),
    }
}

pub fn resolve_puzzle(
    source: &PuzzleSource,
    candidates: &[String],
    config: &GameConfig,
) -> Result<WordSet, PlayError> {
    match source {
        PuzzleSource::Daily(date) => {
            let (seed, word_set) = daily_word_set(candidates, config, *date)?;
            info!("Playing daily puzzle {}", seed);
            Ok(word_set)
        }
        PuzzleSource::Seed(raw) => {
            let word_set = match ChallengeLink::from_query(raw) {
                Some(link) => link.word_set()?,
                None => decode(raw)?,
            };
            Ok(word_set)
        }
        PuzzleSource::Random(difficulty) => {
            let options = BuildOptions::new(config, config.puzzle_size, *difficulty);
            let mut rng = AmbientRng::new();
            match build_word_set(candidates, &options, &mut rng) {
                Ok(set) => Ok(set),
                Err(e) => {
                    warn!("Playing the fallback puzzle: {}", e);
                    Ok(fallback_word_set(*difficulty, &mut rng)?)
                }
            }
        }
    }
}

/// Drive `timed` from `input` until the session leaves `Active`.
pub async fn play_session<R, W>(timed: &mut TimedSession, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    enum Event {
        Line(Option<String>),
        Tick(Option<SessionState>),
    }

    let mut lines = input.lines();
    write_board(timed.session(), out).await?;

    while timed.session().is_active() {
        let event = tokio::select! {
            line = lines.next_line() => Event::Line(line?),
            state = timed.next_tick() => Event::Tick(state),
        };

        match event {
            Event::Line(None) => {
                timed.give_up();
            }
            Event::Line(Some(line)) => match parse_command(&line) {
                Command::Guess(word) => {
                    let reply = match timed.submit_word(&word) {
                        Guess::Accepted | Guess::Solved => {
                            let found = timed.session().found_words().len();
                            let total = timed.session().word_set().map_or(0, |s| s.words().len());
                            format!("Found {} ({}/{})", word.trim().to_uppercase(), found, total)
                        }
                        Guess::WrongLength => {
                            let length = timed.session().word_set().map_or(0, |s| s.word_length());
                            format!("Words have {} letters", length)
                        }
                        Guess::AlreadyFound => "Already found".to_string(),
                        Guess::NotInPuzzle => "Not in this puzzle".to_string(),
                        Guess::NotActive => "The game is over".to_string(),
                    };
                    say(out, &reply).await?;
                }
                Command::Hint(letter) => {
                    match timed.use_hint(letter) {
                        Some(HintToggle::On) => {
                            let left = timed.session().hints_remaining();
                            say(out, &format!("Hint on {} ({} left)", letter.to_ascii_uppercase(), left)).await?;
                        }
                        Some(HintToggle::Off) => {
                            say(out, &format!("Hint off {}", letter.to_ascii_uppercase())).await?;
                        }
                        None => say(out, "No hint available").await?,
                    }
                    write_board(timed.session(), out).await?;
                }
                Command::Shuffle => {
                    timed.shuffle_letters(&mut AmbientRng::new());
                    write_board(timed.session(), out).await?;
                }
                Command::Quit => {
                    timed.give_up();
                }
                Command::Status => write_board(timed.session(), out).await?,
            },
            Event::Tick(None) => break,
            Event::Tick(Some(_)) => {
                let left = timed.session().remaining_time();
                if left > 0 && (left % 60 == 0 || left == 30 || left <= 10) {
                    say(out, &format!("{} left", format_clock(left))).await?;
                }
            }
        }
    }

    write_summary(timed.session(), out).await
}

/// Play one session on the terminal and report the result.
pub async fn run(options: PlayOptions, candidates: Vec<String>, config: GameConfig) -> Result<(), PlayError> {
    let word_set = resolve_puzzle(&options.source, &candidates, &config)?;
    let mut timed = TimedSession::new(config.hints);
    timed.start(word_set.clone(), config.duration, &mut AmbientRng::new());

    let mut stdout = tokio::io::stdout();
    play_session(&mut timed, BufReader::new(tokio::io::stdin()), &mut stdout).await?;

    let daily = match options.source {
        PuzzleSource::Daily(date) => Some(date),
        _ => None,
    };
    let Some(result) = timed.session().result(daily.unwrap_or_else(today)) else {
        return Ok(());
    };

    say(&mut stdout, "").await?;
    say(&mut stdout, &share_text(&result, config.hints, daily)).await?;

    match (daily, options.stats_file) {
        (Some(date), Some(path)) => {
            let stats = record_daily_result(&JsonFileStatsStore::new(path), result, date)?;
            say(
                &mut stdout,
                &format!(
                    "Streak {} (best {}), {} played, {}% won",
                    stats.current_streak,
                    stats.max_streak,
                    stats.games_played,
                    stats.win_rate()
                ),
            )
            .await?;
        }
        (None, _) => {
            let link = ChallengeLink::challenge(&word_set, Utc::now().timestamp_millis());
            say(&mut stdout, &format!("Challenge a friend: ?{}", link.to_query())).await?;
        }
        _ => {}
    }
    if daily.is_some() {
        say(&mut stdout, &next_daily_line(Utc::now())).await?;
    }
    Ok(())
}

pub fn next_daily_line(now: DateTime<Utc>) -> String {
    let left = time_until_next_daily(now);
    format!(
        "Next puzzle in {}:{:02}:{:02}",
        left.num_hours(),
        left.num_minutes() % 60,
        left.num_seconds() % 60
    )
}

async fn say<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}

/// One row per target word: found words in full, others as blanks with any
/// hinted letters filled in.
pub fn board_rows(session: &GameSession) -> Vec<String> {
    let Some(word_set) = session.word_set() else {
        return Vec::new();
    };
    let mut rows: Vec<Vec<char>> = word_set
        .words()
        .iter()
        .map(|w| {
            if session.found_words().contains(w) {
                w.chars().collect()
            } else {
                vec!['_'; w.chars().count()]
            }
        })
        .collect();
    for (letter, positions) in session.active_hints() {
        for pos in positions {
            if let Some(slot) = rows.get_mut(pos.word).and_then(|row| row.get_mut(pos.index)) {
                *slot = *letter;
            }
        }
    }
    rows.into_iter()
        .map(|row| row.iter().map(char::to_string).collect::<Vec<_>>().join(" "))
        .collect()
}

async fn write_board<W: AsyncWrite + Unpin>(session: &GameSession, out: &mut W) -> io::Result<()> {
    let letters: String = session
        .display_letters()
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    say(
        out,
        &format!(
            "Letters: {}   Time: {}   Hints: {}",
            letters,
            format_clock(session.remaining_time()),
            session.hints_remaining()
        ),
    )
    .await?;
    for row in board_rows(session) {
        say(out, &format!("  {}", row)).await?;
    }
    Ok(())
}

async fn write_summary<W: AsyncWrite + Unpin>(session: &GameSession, out: &mut W) -> io::Result<()> {
    let headline = match session.outcome() {
        Some(Outcome::Won) => "You found every word!",
        Some(Outcome::TimedOut) => "Time's up!",
        Some(Outcome::GaveUp) => "Game over.",
        None => return Ok(()),
    };
    say(out, headline).await?;
    if let Some(word_set) = session.word_set() {
        for word in word_set.words() {
            let mark = if session.found_words().contains(word) { "+" } else { "-" };
            say(out, &format!("  {} {} ({})", mark, word, word_set.difficulty_of(word))).await?;
        }
    }
    Ok(())
}
