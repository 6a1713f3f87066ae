use actix_web::{get, web, HttpResponse, Responder};
use log::{info, warn};

use crate::handlers::{error_response, parse_difficulty};
use crate::models::{AppState, PuzzleBody, PuzzleQuery, PuzzleResponse, WordsResponse};
use crate::services::generator::{build_word_set, fallback_word_set, random_words, BuildOptions};
use crate::services::rng::AmbientRng;
use crate::services::seed_codec::encode;

/// Upper bound for `count` on either route.
const MAX_COUNT: usize = 50;
const DEFAULT_WORD_COUNT: usize = 10;

/// A fresh random puzzle. Falls back to the built-in puzzle when the loaded
/// words cannot produce one.
#[get("/puzzle")]
pub async fn random_puzzle(
    data: web::Data<AppState>,
    query: web::Query<PuzzleQuery>,
) -> impl Responder {
    let difficulty = match parse_difficulty(query.difficulty.as_deref()) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    let size = query.count.unwrap_or(data.config.puzzle_size).clamp(1, MAX_COUNT);
    let options = BuildOptions::new(&data.config, size, difficulty);
    let mut rng = AmbientRng::new();

    let word_set = match build_word_set(&data.words, &options, &mut rng) {
        Ok(set) => set,
        Err(e) => {
            warn!("Serving fallback puzzle: {}", e);
            match fallback_word_set(difficulty, &mut rng) {
                Ok(set) => set,
                Err(e) => {
                    warn!("Fallback puzzle failed too: {}", e);
                    return error_response(HttpResponse::InternalServerError(), "no valid words found");
                }
            }
        }
    };

    info!(
        "Generated {} puzzle with {} words",
        word_set.game_difficulty(),
        word_set.words().len()
    );
    HttpResponse::Ok().json(PuzzleResponse {
        puzzle: PuzzleBody::from(&word_set),
        token: encode(&word_set),
    })
}

/// Random candidate words, optionally narrowed by game difficulty.
#[get("/words")]
pub async fn rand_words(
    data: web::Data<AppState>,
    query: web::Query<PuzzleQuery>,
) -> impl Responder {
    let difficulty = match parse_difficulty(query.difficulty.as_deref()) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    let count = query.count.unwrap_or(DEFAULT_WORD_COUNT).clamp(1, MAX_COUNT);
    let options = BuildOptions::new(&data.config, count, difficulty);

    let words = match random_words(&data.words, &options, count, &mut AmbientRng::new()) {
        Ok(words) => words,
        Err(e) => {
            warn!("No words to serve: {}", e);
            return error_response(HttpResponse::InternalServerError(), "no valid words found");
        }
    };

    HttpResponse::Ok().json(WordsResponse {
        words,
        total_words_available: data.words.len(),
        difficulty: difficulty.unwrap_or_default(),
    })
}
