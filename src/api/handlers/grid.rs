use actix_web::{http::Method, post, web, HttpResponse, Responder};

use crate::{
    logic::coordinates::validate_label,
    models::request::{links, ApiResponse, LabelValidationApiResponse, LabelValidationRequest},
};

/// POST /api/grid/labels/validate
/// Parses a cell label such as `B3` and checks it against a bed's grid.
#[utoipa::path(
    post,
    path = "/api/grid/labels/validate",
    tag = "grid",
    request_body = LabelValidationRequest,
    responses((status = 200, description = "Validation result", body = LabelValidationApiResponse))
)]
#[post("/grid/labels/validate")]
pub async fn post_validate_label(body: web::Json<LabelValidationRequest>) -> impl Responder {
    let request = body.into_inner();
    let validation = validate_label(&request.label, request.grid_width, request.grid_height);
    HttpResponse::Ok().json(ApiResponse::new(
        validation,
        links([("self", "/api/grid/labels/validate".into(), Method::POST)]),
    ))
}
