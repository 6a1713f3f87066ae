use actix_web::{get, web, HttpResponse, Responder};

use crate::models::{AppState, ConfigResponse};

#[get("/config")]
pub async fn get_config(data: web::Data<AppState>) -> impl Responder {
    let config = &data.config;
    HttpResponse::Ok().json(ConfigResponse {
        word_length: config.word_length,
        puzzle_size: config.puzzle_size,
        daily_size: config.daily_size,
        duration: config.duration,
        hints: config.hints,
        word_count: data.words.len(),
    })
}
