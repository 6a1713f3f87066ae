use actix_web::{get, web, HttpResponse, Responder};
use log::{info, warn};

use crate::handlers::error_response;
use crate::models::{AppState, DailyQuery, DailyResponse, PuzzleBody};
use crate::services::daily::{day_number, format_date, parse_date, today};
use crate::services::generator::daily_word_set;
use crate::services::seed_codec::encode;

/// Today's puzzle, or the one for `?date=YYYY-MM-DD`.
#[get("/daily")]
pub async fn get_daily(
    data: web::Data<AppState>,
    query: web::Query<DailyQuery>,
) -> impl Responder {
    let date = match query.date.as_deref() {
        None => today(),
        Some(raw) => match parse_date(raw) {
            Some(date) => date,
            None => {
                info!("Rejected daily request for bad date: {}", raw);
                return error_response(HttpResponse::BadRequest(), format!("invalid date '{}'", raw));
            }
        },
    };

    let (seed, word_set) = match daily_word_set(&data.words, &data.config, date) {
        Ok(daily) => daily,
        Err(e) => {
            warn!("Failed to build daily puzzle for {}: {}", format_date(date), e);
            return error_response(HttpResponse::InternalServerError(), "no valid words found");
        }
    };

    info!("Served daily puzzle #{} ({})", day_number(date), seed);
    HttpResponse::Ok().json(DailyResponse {
        puzzle: PuzzleBody::from(&word_set),
        date: format_date(date),
        day_number: day_number(date),
        token: encode(&word_set),
        seed,
        is_daily: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    use crate::handlers::test_support::{empty_state, state};
    use crate::services::seed_codec::decode;

    #[actix_web::test]
    async fn test_daily_for_date() {
        let app = test::init_service(App::new().app_data(state()).service(get_daily)).await;
        let req = test::TestRequest::get().uri("/daily?date=2024-01-01").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["date"], "2024-01-01");
        assert_eq!(body["dayNumber"], 1);
        assert_eq!(body["isDaily"], true);
        assert!(body["seed"].as_str().unwrap().starts_with("daily-"));
        assert_eq!(body["words"].as_array().unwrap().len(), 5);
        assert_eq!(body["wordLength"], 5);

        let set = decode(body["token"].as_str().unwrap()).unwrap();
        assert_eq!(body["letters"], set.letters_string());
    }

    #[actix_web::test]
    async fn test_daily_is_stable_across_requests() {
        let app = test::init_service(App::new().app_data(state()).service(get_daily)).await;
        let first: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/daily?date=2024-06-15").to_request(),
        )
        .await;
        let second: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/daily?date=2024-06-15").to_request(),
        )
        .await;
        assert_eq!(first, second);
    }

    #[actix_web::test]
    async fn test_daily_without_date_is_today() {
        let app = test::init_service(App::new().app_data(state()).service(get_daily)).await;
        let req = test::TestRequest::get().uri("/daily").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["date"], format_date(today()));
    }

    #[actix_web::test]
    async fn test_daily_rejects_bad_date() {
        let app = test::init_service(App::new().app_data(state()).service(get_daily)).await;
        let req = test::TestRequest::get().uri("/daily?date=yesterday").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_daily_without_words_is_a_server_error() {
        let app = test::init_service(App::new().app_data(empty_state()).service(get_daily)).await;
        let req = test::TestRequest::get().uri("/daily?date=2024-01-01").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "no valid words found");
    }
}
