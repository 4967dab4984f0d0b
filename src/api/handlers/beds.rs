use actix_web::{http::Method, post, web, HttpResponse, Responder};

use crate::{
    api::handlers::bad_request,
    error::Result,
    logic::availability::{available_cells, contiguous_regions, find_contiguous_spaces, occupied_cells},
    models::request::{
        links, ApiResponse, AvailabilityApiResponse, AvailabilityRequest, AvailabilityResponse,
        ErrorResponse,
    },
};

fn bed_availability(request: AvailabilityRequest) -> Result<AvailabilityResponse> {
    let bed = &request.bed;
    let dims = bed.grid_dimensions()?;
    let occupied = occupied_cells(
        &bed.id,
        (request.start_date, request.end_date),
        &request.plantings,
        bed,
    )?;
    let available = available_cells(bed, &occupied)?;
    let min_cells_needed = request.min_cells_needed.unwrap_or(1);

    Ok(AvailabilityResponse {
        grid_width: dims.width,
        grid_height: dims.height,
        contiguous: find_contiguous_spaces(&available, min_cells_needed),
        regions: contiguous_regions(&available, min_cells_needed),
        occupied,
        available,
    })
}

/// POST /api/beds/availability
/// Occupied and free cells of a bed over a date range, plus the free regions
/// large enough for `minCellsNeeded` cells.
#[utoipa::path(
    post,
    path = "/api/beds/availability",
    tag = "beds",
    request_body = AvailabilityRequest,
    responses(
        (status = 200, description = "Bed occupancy", body = AvailabilityApiResponse),
        (status = 400, description = "Invalid bed", body = ErrorResponse),
    )
)]
#[post("/beds/availability")]
pub async fn post_availability(body: web::Json<AvailabilityRequest>) -> impl Responder {
    let request = body.into_inner();
    let bed_id = request.bed.id.clone();
    match bed_availability(request) {
        Ok(response) => HttpResponse::Ok().json(ApiResponse::new(
            response,
            links([
                ("self", "/api/beds/availability".into(), Method::POST),
                ("autoPlace", "/api/placements/auto".into(), Method::POST),
            ]),
        )),
        Err(e) => {
            log::debug!("availability for bed {bed_id} rejected: {e}");
            bad_request(e)
        }
    }
}
