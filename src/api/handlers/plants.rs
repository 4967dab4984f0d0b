use actix_web::{get, http::Method, web, HttpResponse, Responder};

use crate::{
    api::handlers::not_found,
    data::plants::{get_all_plants, get_plant_by_id},
    models::request::{
        links, ApiResponse, ErrorResponse, Pagination, PaginatedResponse, PlantApiResponse,
        PlantListResponse,
    },
};

/// GET /api/plants
/// Returns the read-only reference catalog.
#[utoipa::path(
    get,
    path = "/api/plants",
    tag = "plants",
    responses((status = 200, description = "Plant catalog", body = PlantListResponse))
)]
#[get("/plants")]
pub async fn list_plants() -> impl Responder {
    let plants = get_all_plants();
    let total = plants.len();
    HttpResponse::Ok().json(PaginatedResponse::new(
        plants,
        links([("self", "/api/plants".into(), Method::GET)]),
        Pagination {
            page: 1,
            per_page: total,
            total,
            total_pages: 1,
        },
    ))
}

/// GET /api/plants/{id}
#[utoipa::path(
    get,
    path = "/api/plants/{id}",
    tag = "plants",
    params(("id" = String, Path, description = "Plant id, e.g. `tomato`")),
    responses(
        (status = 200, description = "Plant", body = PlantApiResponse),
        (status = 404, description = "Unknown plant", body = ErrorResponse),
    )
)]
#[get("/plants/{id}")]
pub async fn get_plant(path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match get_plant_by_id(&id) {
        None => not_found(format!("Plant '{id}' not found.")),
        Some(plant) => HttpResponse::Ok().json(ApiResponse::new(
            plant,
            links([
                ("self", format!("/api/plants/{id}"), Method::GET),
                ("collection", "/api/plants".into(), Method::GET),
                ("autoPlace", "/api/placements/auto".into(), Method::POST),
            ]),
        )),
    }
}
