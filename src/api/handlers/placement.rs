use actix_web::{http::Method, post, web, HttpResponse, Responder};

use crate::{
    api::handlers::{bad_request, not_found},
    data::plants::get_plant_by_id,
    error::Result,
    logic::{
        conflict::{validate_placement, PlacementCandidate},
        coordinates::from_label,
        footprint::SpacingInfo,
        placement::{auto_place, AutoPlaceRequest},
        row_group::{describe_row, determine_continuity},
        spacing::cells_required,
    },
    models::{
        plant::PlantRef,
        request::{
            links, ApiResponse, AutoPlaceApiResponse, AutoPlaceRequestBody, AutoPlaceResponse,
            ConflictCheckApiResponse, ConflictCheckRequest, ConflictCheckResponse, ErrorResponse,
            RowContinuityApiResponse, RowContinuityRequest, RowContinuityResponse,
        },
    },
};

fn auto_place_batch(plant: PlantRef, request: AutoPlaceRequestBody) -> Result<AutoPlaceResponse> {
    let start_position = request
        .start_position
        .as_deref()
        .map(from_label)
        .transpose()?;
    let placement = AutoPlaceRequest {
        bed_id: request.bed.id.clone(),
        start_position,
        plant,
        quantity: request.quantity,
        bed: request.bed.grid_dimensions()?,
        grid_size: request.bed.grid_size,
        existing_plantings: request.existing_plantings,
        planning_method: request.bed.planning_method,
        fill_direction: request.fill_direction,
    };
    let result = auto_place(&placement)?;
    Ok(AutoPlaceResponse::new(placement.plant.id, result))
}

/// POST /api/placements/auto
/// Finds positions for a batch of plants in a bed snapshot.
#[utoipa::path(
    post,
    path = "/api/placements/auto",
    tag = "placement",
    request_body = AutoPlaceRequestBody,
    responses(
        (status = 200, description = "Positions found (possibly fewer than requested)", body = AutoPlaceApiResponse),
        (status = 400, description = "Invalid bed, plant or start position", body = ErrorResponse),
        (status = 404, description = "Unknown plant id", body = ErrorResponse),
    )
)]
#[post("/placements/auto")]
pub async fn post_auto_place(body: web::Json<AutoPlaceRequestBody>) -> impl Responder {
    let mut request = body.into_inner();

    let plant = match (request.plant.take(), request.plant_id.as_deref()) {
        (Some(plant), _) => plant,
        (None, Some(id)) => match get_plant_by_id(id) {
            Some(plant) => PlantRef::from(&plant),
            None => return not_found(format!("Plant '{id}' not found.")),
        },
        (None, None) => return bad_request("Either 'plant' or 'plantId' is required."),
    };

    let plant_id = plant.id.clone();
    let result = auto_place_batch(plant, request);

    match result {
        Ok(response) => HttpResponse::Ok().json(ApiResponse::new(
            response,
            links([
                ("self", "/api/placements/auto".into(), Method::POST),
                ("check", "/api/placements/check".into(), Method::POST),
                ("plant", format!("/api/plants/{plant_id}"), Method::GET),
            ]),
        )),
        Err(e) => bad_request(e),
    }
}

fn check_placement(request: ConflictCheckRequest) -> Result<ConflictCheckResponse> {
    let ConflictCheckRequest {
        bed,
        candidate,
        existing_plantings,
    } = request;
    let method = bed.planning_method;
    let space_required = match candidate.space_required {
        Some(cells) => cells.max(1),
        None => cells_required(&candidate.plant, bed.grid_size, method)?,
    };
    let placement = PlacementCandidate {
        bed_id: bed.id.clone(),
        origin: candidate.origin,
        space_required,
        method,
        start_date: candidate.start_date,
        end_date: candidate.end_date,
        spacing: SpacingInfo::from(&candidate.plant),
    };

    let report = validate_placement(&placement, &bed, &existing_plantings)?;
    let footprint = placement.footprint(bed.grid_size);
    let accepted = !report.has_blocking() || candidate.conflict_override;
    if !accepted {
        log::info!(
            "{} at {} blocked by {} conflict(s)",
            candidate.plant.id,
            candidate.origin,
            report.blocking().count()
        );
    }
    Ok(ConflictCheckResponse {
        footprint: footprint.cells.into_iter().collect(),
        shape: footprint.shape,
        report,
        accepted,
    })
}

/// POST /api/placements/check
/// Validates a manual placement: rejects footprints past the bed edge and
/// reports spatial and temporal overlaps.
#[utoipa::path(
    post,
    path = "/api/placements/check",
    tag = "placement",
    request_body = ConflictCheckRequest,
    responses(
        (status = 200, description = "Conflict report", body = ConflictCheckApiResponse),
        (status = 400, description = "Footprint out of bounds or invalid bed", body = ErrorResponse),
    )
)]
#[post("/placements/check")]
pub async fn post_check_placement(body: web::Json<ConflictCheckRequest>) -> impl Responder {
    match check_placement(body.into_inner()) {
        Ok(response) => HttpResponse::Ok().json(ApiResponse::new(
            response,
            links([("self", "/api/placements/check".into(), Method::POST)]),
        )),
        Err(e) => bad_request(e),
    }
}

/// POST /api/placements/row-continuity
/// Tells whether a single-cell planting extends a continuous row.
#[utoipa::path(
    post,
    path = "/api/placements/row-continuity",
    tag = "placement",
    request_body = RowContinuityRequest,
    responses(
        (status = 200, description = "Row membership", body = RowContinuityApiResponse),
        (status = 400, description = "Invalid grid size", body = ErrorResponse),
    )
)]
#[post("/placements/row-continuity")]
pub async fn post_row_continuity(body: web::Json<RowContinuityRequest>) -> impl Responder {
    let request = body.into_inner();
    if let Err(e) = crate::error::ensure_grid_size(request.grid_size) {
        return bad_request(e);
    }

    let continuity = determine_continuity(
        request.position,
        &request.plant_id,
        &request.bed_id,
        &request.existing_plantings,
    );
    let total_length_inches = f64::from(continuity.total_segments) * request.grid_size;
    let display_label = describe_row(total_length_inches, continuity.total_segments);
    HttpResponse::Ok().json(ApiResponse::new(
        RowContinuityResponse {
            continuity,
            total_length_inches,
            display_label,
        },
        links([("self", "/api/placements/row-continuity".into(), Method::POST)]),
    ))
}
