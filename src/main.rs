use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use actix_web::{web, App, HttpServer};
use clap::builder::ValueParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::info;

use jumbld::config::{
    GameConfig, DEFAULT_DAILY_SIZE, DEFAULT_GAME_DURATION, DEFAULT_HINTS, DEFAULT_MIN_CANDIDATES,
    DEFAULT_PUZZLE_SIZE, DEFAULT_WORD_LENGTH,
};
use jumbld::handlers::config::get_config;
use jumbld::handlers::daily::get_daily;
use jumbld::handlers::random::{rand_words, random_puzzle};
use jumbld::handlers::validation::{classify_word, load_seed};
use jumbld::models::AppState;
use jumbld::play::{self, PlayOptions, PuzzleSource};
use jumbld::services::daily::{parse_date, today};
use jumbld::services::word_loader::load_candidates;

fn init_logging(log_file: Option<&String>) -> io::Result<()> {
    if let Some(file) = log_file {
        let log_output = OpenOptions::new().create(true).append(true).open(file)?;

        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(log_output)))
            .init();
    } else {
        env_logger::init();
    }
    Ok(())
}

fn cli() -> Command {
    Command::new("jumbld")
        .version("0.1")
        .about("Daily and shareable word-jumble puzzle service")
        .arg(
            Arg::new("listen-host")
                .long("listen-host")
                .num_args(1)
                .default_value("0.0.0.0:2345")
                .help("Specify the listen address (e.g., 0.0.0.0:2345)"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .num_args(1)
                .global(true)
                .help("Specify a log file path (if omitted, logs to stderr)"),
        )
        .arg(
            Arg::new("share-dir")
                .long("share-dir")
                .num_args(1)
                .global(true)
                .default_value("./share")
                .help("Directory containing the word files"),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .num_args(1)
                .global(true)
                .default_value("en")
                .help("Language of the word list"),
        )
        .arg(policy_arg("word-length", value_parser!(usize), DEFAULT_WORD_LENGTH, "Letters per word"))
        .arg(policy_arg("puzzle-size", value_parser!(usize), DEFAULT_PUZZLE_SIZE, "Words in a random puzzle"))
        .arg(policy_arg("daily-size", value_parser!(usize), DEFAULT_DAILY_SIZE, "Words in the daily puzzle"))
        .arg(policy_arg("duration", value_parser!(u32), DEFAULT_GAME_DURATION, "Seconds on the clock"))
        .arg(policy_arg("hints", value_parser!(u32), DEFAULT_HINTS, "Hints per game"))
        .arg(policy_arg(
            "min-candidates",
            value_parser!(usize),
            DEFAULT_MIN_CANDIDATES,
            "Fewest words a difficulty filter may leave before it is ignored",
        ))
        .subcommand(
            Command::new("play")
                .about("Play one game in the terminal")
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .num_args(1)
                        .conflicts_with("daily")
                        .help("Share token or link of the puzzle to play"),
                )
                .arg(
                    Arg::new("daily")
                        .long("daily")
                        .action(ArgAction::SetTrue)
                        .help("Play the daily puzzle"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .num_args(1)
                        .requires("daily")
                        .help("Date of the daily puzzle (YYYY-MM-DD, default today)"),
                )
                .arg(
                    Arg::new("difficulty")
                        .long("difficulty")
                        .num_args(1)
                        .value_parser(["easy", "normal", "hard"])
                        .help("Difficulty of a random puzzle"),
                )
                .arg(
                    Arg::new("stats-file")
                        .long("stats-file")
                        .num_args(1)
                        .help("JSON file where daily results are recorded"),
                ),
        )
}

// Unset policy flags fall back to `GameConfig::default()`.
fn policy_arg(id: &'static str, parser: impl Into<ValueParser>, default: impl ToString, help: &str) -> Arg {
    Arg::new(id)
        .long(id)
        .num_args(1)
        .global(true)
        .value_parser(parser.into())
        .help(format!("{} [default: {}]", help, default.to_string()))
}

fn play_options(matches: &ArgMatches) -> io::Result<PlayOptions> {
    let source = if let Some(seed) = matches.get_one::<String>("seed") {
        PuzzleSource::Seed(seed.clone())
    } else if matches.get_flag("daily") {
        let date = match matches.get_one::<String>("date") {
            Some(raw) => parse_date(raw).ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, format!("invalid date '{}'", raw))
            })?,
            None => today(),
        };
        PuzzleSource::Daily(date)
    } else {
        let difficulty = matches
            .get_one::<String>("difficulty")
            .and_then(|d| d.parse().ok());
        PuzzleSource::Random(difficulty)
    };

    Ok(PlayOptions {
        source,
        stats_file: matches.get_one::<String>("stats-file").map(PathBuf::from),
    })
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let matches = cli().get_matches();

    let log_file = matches.get_one::<String>("log-file");
    init_logging(log_file)?;

    if let Some(("play", sub)) = matches.subcommand() {
        let config = GameConfig::from_matches(sub);
        let share_dir = sub.get_one::<String>("share-dir").map_or("./share", String::as_str);
        let lang = sub.get_one::<String>("lang").map_or("en", String::as_str);
        let candidates = load_candidates(Path::new(share_dir), lang, config.word_length);
        let options = play_options(sub)?;
        return play::run(options, candidates, config)
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
    }

    let listen_host = matches
        .get_one::<String>("listen-host")
        .map_or("0.0.0.0:2345", String::as_str)
        .to_string();
    let share_dir = matches.get_one::<String>("share-dir").map_or("./share", String::as_str);
    let lang = matches.get_one::<String>("lang").map_or("en", String::as_str);
    let config = GameConfig::from_matches(&matches);

    info!("Loading {}-letter word list for language: {}", config.word_length, lang);
    let words = load_candidates(Path::new(share_dir), lang, config.word_length);

    let state = AppState { words, config };
    let shared_state = web::Data::new(state);

    info!("Listening on {}", listen_host);
    HttpServer::new(move || {
        App::new()
            .app_data(shared_state.clone())
            .service(get_daily)
            .service(random_puzzle)
            .service(rand_words)
            .service(load_seed)
            .service(classify_word)
            .service(get_config)
    })
    .bind(&listen_host)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use jumbld::models::GameDifficulty;

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_play_options() {
        let matches = cli()
            .try_get_matches_from(["jumbld", "play", "--daily", "--date", "2024-02-29", "--duration", "90"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let options = play_options(sub).unwrap();
        assert_eq!(
            options.source,
            PuzzleSource::Daily(parse_date("2024-02-29").unwrap())
        );
        assert_eq!(GameConfig::from_matches(sub).duration, 90);
        assert_eq!(GameConfig::from_matches(sub).hints, DEFAULT_HINTS);

        let matches = cli()
            .try_get_matches_from(["jumbld", "play", "--difficulty", "hard", "--stats-file", "stats.json"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let options = play_options(sub).unwrap();
        assert_eq!(options.source, PuzzleSource::Random(Some(GameDifficulty::Hard)));
        assert_eq!(options.stats_file, Some(PathBuf::from("stats.json")));

        let matches = cli()
            .try_get_matches_from(["jumbld", "play", "--daily", "--date", "someday"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert!(play_options(sub).is_err());

        assert!(cli()
            .try_get_matches_from(["jumbld", "play", "--daily", "--seed", "abc"])
            .is_err());
    }
}
