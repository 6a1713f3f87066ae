use actix_web::{get, web, HttpResponse, Responder};
use log::info;

use crate::handlers::error_response;
use crate::models::{ChallengeQuery, ClassifyResponse, PuzzleBody, SeedResponse};
use crate::services::difficulty::classify;
use crate::services::seed_codec::decode;

/// Rebuild a shared puzzle from its token. Challenge parameters are echoed
/// back untouched.
#[get("/seed/{token}")]
pub async fn load_seed(
    path: web::Path<String>,
    query: web::Query<ChallengeQuery>,
) -> impl Responder {
    let token = path.into_inner();
    let word_set = match decode(&token) {
        Ok(set) => set,
        Err(e) => {
            info!("Rejected puzzle code: {}", e);
            return error_response(HttpResponse::BadRequest(), "invalid or corrupted puzzle code");
        }
    };

    let challenge = query.challenge.unwrap_or(false);
    info!(
        "Loaded shared puzzle with {} words (challenge: {})",
        word_set.words().len(),
        challenge
    );
    HttpResponse::Ok().json(SeedResponse {
        puzzle: PuzzleBody::from(&word_set),
        challenge,
        start_time: query.time,
    })
}

#[get("/classify/{word}")]
pub async fn classify_word(word: web::Path<String>) -> impl Responder {
    let word = word.into_inner().trim().to_uppercase();
    if word.is_empty() {
        return error_response(HttpResponse::BadRequest(), "empty word");
    }
    let difficulty = classify(&word);
    HttpResponse::Ok().json(ClassifyResponse { word, difficulty })
}
