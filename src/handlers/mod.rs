pub mod config;
pub mod daily;
pub mod random;
pub mod validation;

use actix_web::{HttpResponse, HttpResponseBuilder};

use crate::errors::UnknownDifficulty;
use crate::models::{ErrorResponse, GameDifficulty};

pub(crate) fn error_response(mut builder: HttpResponseBuilder, message: impl Into<String>) -> HttpResponse {
    builder.json(ErrorResponse {
        error: message.into(),
    })
}

/// `None` for a missing parameter, a 400 for one we don't recognise.
pub(crate) fn parse_difficulty(value: Option<&str>) -> Result<Option<GameDifficulty>, HttpResponse> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e: UnknownDifficulty| error_response(HttpResponse::BadRequest(), e.to_string())),
    }
}
