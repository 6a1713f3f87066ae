use clap::ArgMatches;

pub const DEFAULT_WORD_LENGTH: usize = 5;
pub const DEFAULT_PUZZLE_SIZE: usize = 8;
pub const DEFAULT_DAILY_SIZE: usize = 5;
/// Seconds on the clock for a fresh session.
pub const DEFAULT_GAME_DURATION: u32 = 300;
pub const DEFAULT_HINTS: u32 = 5;
/// Below this many survivors the difficulty filter is ignored.
pub const DEFAULT_MIN_CANDIDATES: usize = 10;

/// Game policy shared by the server routes and terminal play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub word_length: usize,
    pub puzzle_size: usize,
    pub daily_size: usize,
    pub duration: u32,
    pub hints: u32,
    pub min_candidates: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            word_length: DEFAULT_WORD_LENGTH,
            puzzle_size: DEFAULT_PUZZLE_SIZE,
            daily_size: DEFAULT_DAILY_SIZE,
            duration: DEFAULT_GAME_DURATION,
            hints: DEFAULT_HINTS,
            min_candidates: DEFAULT_MIN_CANDIDATES,
        }
    }
}

impl GameConfig {
    /// Read the policy arguments registered on the top-level command.
    /// Anything missing keeps its default.
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let defaults = Self::default();
        Self {
            word_length: arg_or(matches, "word-length", defaults.word_length),
            puzzle_size: arg_or(matches, "puzzle-size", defaults.puzzle_size),
            daily_size: arg_or(matches, "daily-size", defaults.daily_size),
            duration: arg_or(matches, "duration", defaults.duration),
            hints: arg_or(matches, "hints", defaults.hints),
            min_candidates: arg_or(matches, "min-candidates", defaults.min_candidates),
        }
    }
}

// `try_get_one` so that commands registering only some of the flags still work.
fn arg_or<T>(matches: &ArgMatches, id: &str, default: T) -> T
where
    T: Clone + Send + Sync + 'static,
{
    matches
        .try_get_one::<T>(id)
        .ok()
        .flatten()
        .cloned()
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{value_parser, Arg, Command};

    fn command() -> Command {
        Command::new("test")
            .arg(
                Arg::new("word-length")
                    .long("word-length")
                    .value_parser(value_parser!(usize)),
            )
            .arg(
                Arg::new("duration")
                    .long("duration")
                    .value_parser(value_parser!(u32)),
            )
    }

    #[test]
    fn test_missing_arguments_keep_defaults() {
        let matches = command().get_matches_from(["test"]);
        assert_eq!(GameConfig::from_matches(&matches), GameConfig::default());
    }

    #[test]
    fn test_arguments_override_defaults() {
        let matches =
            command().get_matches_from(["test", "--word-length", "6", "--duration", "90"]);
        let config = GameConfig::from_matches(&matches);
        assert_eq!(config.word_length, 6);
        assert_eq!(config.duration, 90);
        assert_eq!(config.hints, DEFAULT_HINTS);
    }
}
