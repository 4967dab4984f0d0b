pub mod beds;
pub mod grid;
pub mod placement;
pub mod plants;

use std::fmt::Display;

use actix_web::HttpResponse;

use crate::models::request::ErrorResponse;

pub(crate) fn bad_request(error: impl Display) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
    })
}

pub(crate) fn not_found(error: impl Display) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: error.to_string(),
    })
}
