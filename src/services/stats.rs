//! Daily results and the stats they roll up into.
//!
//! The session only produces a [`DailyResult`]; where stats live is up to
//! the [`StatsStore`] the caller hands in.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::services::daily::{day_number, format_date};
use crate::utils::format_clock;

/// How many daily results are kept in the history.
pub const HISTORY_LIMIT: usize = 30;

/// Outcome of one finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResult {
    pub date: String,
    pub words_found: usize,
    pub total_words: usize,
    pub time_remaining: u32,
    pub hints_used: u32,
    /// All words were found.
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub last_played_date: String,
    pub current_streak: u32,
    pub max_streak: u32,
    pub games_played: u32,
    pub games_won: u32,
    pub total_words_found: usize,
    pub average_words_found: f64,
    pub daily_history: Vec<DailyResult>,
}

impl DailyStats {
    pub fn win_rate(&self) -> u32 {
        if self.games_played == 0 {
            0
        } else {
            ((f64::from(self.games_won) / f64::from(self.games_played)) * 100.0).round() as u32
        }
    }
}

/// Persistence for stats. Loading never fails; a broken store reads as empty.
pub trait StatsStore {
    fn load_stats(&self) -> DailyStats;
    fn save_stats(&self, stats: &DailyStats) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStatsStore {
    stats: Mutex<DailyStats>,
}

impl StatsStore for MemoryStatsStore {
    fn load_stats(&self) -> DailyStats {
        self.stats.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn save_stats(&self, stats: &DailyStats) -> io::Result<()> {
        let mut guard = self
            .stats
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "stats lock poisoned"))?;
        *guard = stats.clone();
        Ok(())
    }
}

/// Stats kept as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStatsStore {
    path: PathBuf,
}

impl JsonFileStatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatsStore for JsonFileStatsStore {
    fn load_stats(&self) -> DailyStats {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return DailyStats::default(),
            Err(e) => {
                warn!("Error reading stats from {}: {}", self.path.display(), e);
                return DailyStats::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring unreadable stats in {}: {}", self.path.display(), e);
            DailyStats::default()
        })
    }

    fn save_stats(&self, stats: &DailyStats) -> io::Result<()> {
        let json = serde_json::to_string_pretty(stats)?;
        fs::write(&self.path, json)
    }
}

/// Fold one result into the stored stats for `today`.
///
/// A second result on the same date is ignored. The streak continues when
/// the previous play was yesterday and restarts at one otherwise.
pub fn record_daily_result<S: StatsStore + ?Sized>(
    store: &S,
    mut result: DailyResult,
    today: NaiveDate,
) -> io::Result<DailyStats> {
    let stats = store.load_stats();
    let today_str = format_date(today);
    if stats.last_played_date == today_str {
        info!("Daily result for {} already recorded", today_str);
        return Ok(stats);
    }

    let yesterday = today.pred_opt().map(format_date).unwrap_or_default();
    let streak = if stats.last_played_date == yesterday {
        stats.current_streak + 1
    } else {
        1
    };

    result.date = today_str.clone();
    let games_played = stats.games_played + 1;
    let total_words_found = stats.total_words_found + result.words_found;
    let average = (total_words_found as f64 / f64::from(games_played) * 10.0).round() / 10.0;

    let mut history = stats.daily_history;
    history.push(result.clone());
    if history.len() > HISTORY_LIMIT {
        history.drain(..history.len() - HISTORY_LIMIT);
    }

    let updated = DailyStats {
        last_played_date: today_str,
        current_streak: streak,
        max_streak: stats.max_streak.max(streak),
        games_played,
        games_won: stats.games_won + u32::from(result.completed),
        total_words_found,
        average_words_found: average,
        daily_history: history,
    };
    store.save_stats(&updated)?;
    Ok(updated)
}

/// Spoiler-free summary to paste into a chat.
pub fn share_text(result: &DailyResult, hint_allowance: u32, daily: Option<NaiveDate>) -> String {
    let header = match daily {
        Some(date) => format!("JUMBL #{}", day_number(date)),
        None => "JUMBL".to_string(),
    };

    let found = result.words_found.min(result.total_words);
    let empty = result.total_words - found;
    let square = if result.words_found == result.total_words || found >= 6 {
        "🟩"
    } else if found >= 4 {
        "🟨"
    } else {
        "🟧"
    };
    let squares = format!("{}{}", square.repeat(found), "⬜".repeat(empty));

    let mut lines = vec![
        format!("🔤 {}", header),
        String::new(),
        squares,
        format!(
            "{}/{} words | {}/{} hints",
            result.words_found, result.total_words, result.hints_used, hint_allowance
        ),
    ];
    if result.words_found == result.total_words {
        let time = if result.time_remaining > 0 {
            format!("{} left", format_clock(result.time_remaining))
        } else {
            "Time up!".to_string()
        };
        lines.push(format!("⏱️ {}", time));
    }
    lines.push(String::new());
    lines.push("Play at: jumbl.game".to_string());
    lines.join("\n")
}
