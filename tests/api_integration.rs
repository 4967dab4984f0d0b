use actix_web::{test, web, App};
use garden_grid::api::routes::configure;
use serde_json::json;

fn build_app() -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .configure(configure)
        .app_data(
            web::JsonConfig::default().error_handler(|err, _req| {
                let message = format!("{err}");
                actix_web::error::InternalError::from_response(
                    err,
                    actix_web::HttpResponse::BadRequest()
                        .json(serde_json::json!({ "error": message })),
                )
                .into()
            }),
        )
}

fn bed(method: &str) -> serde_json::Value {
    json!({
        "id": "bed-1",
        "name": "North bed",
        "width": 4.0,
        "length": 4.0,
        "gridSize": 12.0,
        "planningMethod": method
    })
}

fn lettuce_planting(id: &str, x: u32, y: u32, start: &str, end: &str) -> serde_json::Value {
    json!({
        "id": id,
        "plant": { "id": "lettuce", "name": "Lettuce", "spacingInches": 12.0 },
        "bedId": "bed-1",
        "origin": { "x": x, "y": y },
        "spaceRequired": 1,
        "planningMethod": "SquareFoot",
        "startDate": start,
        "endDate": end
    })
}

// ---------------------------------------------------------------------------
// GET /api/plants
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_get_plants_returns_200() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::get().uri("/api/plants").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_get_plants_items_have_spacing_fields() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::get().uri("/api/plants").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let plants = body["payload"].as_array().expect("payload must be an array");
    assert!(!plants.is_empty(), "Catalog must not be empty");
    for item in plants {
        assert!(item.get("id").is_some(), "Each plant must have an 'id' field");
        assert!(item.get("spacingInches").is_some(), "Each plant must have 'spacingInches'");
    }
    assert_eq!(body["pagination"]["total"].as_u64(), Some(plants.len() as u64));
    assert_eq!(body["_links"]["self"]["href"], "/api/plants");
}

#[actix_web::test]
async fn test_get_plant_known_id() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::get().uri("/api/plants/tomato").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["id"], "tomato");
    assert_eq!(body["payload"]["spacingInches"], 24.0);
    assert_eq!(body["_links"]["self"]["method"], "GET");
}

#[actix_web::test]
async fn test_get_plant_unknown_id_returns_404() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::get().uri("/api/plants/mandrake").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Plant 'mandrake' not found.");
}

// ---------------------------------------------------------------------------
// POST /api/grid/labels/validate
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_validate_label_in_range() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/grid/labels/validate")
        .set_json(json!({ "label": "b3", "gridWidth": 4, "gridHeight": 4 }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["valid"], true);
    assert_eq!(body["payload"]["cell"], json!({ "x": 1, "y": 2 }));
    assert!(body["payload"].get("error").is_none());
}

#[actix_web::test]
async fn test_validate_label_column_out_of_range() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/grid/labels/validate")
        .set_json(json!({ "label": "E1", "gridWidth": 4, "gridHeight": 4 }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["valid"], false);
    assert_eq!(body["payload"]["error"], "Column E is out of range (valid columns: A-D)");
}

// ---------------------------------------------------------------------------
// POST /api/placements/auto
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_auto_place_by_catalog_id() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/placements/auto")
        .set_json(json!({ "bed": bed("SquareFoot"), "plantId": "lettuce", "quantity": 4 }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["placed"], 4);
    assert_eq!(body["payload"]["failed"], 0);
    assert_eq!(body["payload"]["outcome"], "Complete");
    assert_eq!(body["payload"]["positions"][0]["label"], "A1");
    assert_eq!(body["payload"]["positions"][3]["label"], "D1");
    assert_eq!(body["_links"]["plant"]["href"], "/api/plants/lettuce");
}

#[actix_web::test]
async fn test_auto_place_reports_partial_fill() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/placements/auto")
        .set_json(json!({ "bed": bed("SquareFoot"), "plantId": "lettuce", "quantity": 20 }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["placed"], 16);
    assert_eq!(body["payload"]["failed"], 4);
    assert_eq!(body["payload"]["outcome"], "Partial");
    assert_eq!(body["payload"]["summary"], "Placed 16 of 20; 4 could not fit.");
}

#[actix_web::test]
async fn test_auto_place_inline_plant_and_start_label() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/placements/auto")
        .set_json(json!({
            "bed": bed("SquareFoot"),
            "plant": { "id": "lettuce", "spacingInches": 12.0 },
            "quantity": 2,
            "startPosition": "C4"
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let labels: Vec<&str> = body["payload"]["positions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["C4", "D4"]);
}

#[actix_web::test]
async fn test_auto_place_skips_existing_plantings() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/placements/auto")
        .set_json(json!({
            "bed": bed("SquareFoot"),
            "plantId": "lettuce",
            "quantity": 1,
            "existingPlantings": [lettuce_planting("p1", 0, 0, "2024-04-01", "2024-06-01")]
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["positions"][0]["label"], "B1");
}

#[actix_web::test]
async fn test_auto_place_ignores_plantings_of_other_beds() {
    let app = test::init_service(build_app()).await;
    let mut narrow = bed("SquareFoot");
    narrow["width"] = json!(2.0);
    narrow["length"] = json!(1.0);
    let mut elsewhere = lettuce_planting("p1", 0, 0, "2024-04-01", "2024-06-01");
    elsewhere["bedId"] = json!("bed-2");
    let req = test::TestRequest::post()
        .uri("/api/placements/auto")
        .set_json(json!({
            "bed": narrow,
            "plantId": "lettuce",
            "quantity": 2,
            "existingPlantings": [elsewhere]
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["placed"], 2);
    assert_eq!(body["payload"]["failed"], 0);
    assert_eq!(body["payload"]["positions"][0]["label"], "A1");
}

#[actix_web::test]
async fn test_auto_place_with_oversized_existing_planting() {
    let app = test::init_service(build_app()).await;
    let mut giant = lettuce_planting("giant", 0, 0, "2024-04-01", "2024-06-01");
    giant["spaceRequired"] = json!(u32::MAX);
    let req = test::TestRequest::post()
        .uri("/api/placements/auto")
        .set_json(json!({
            "bed": bed("SquareFoot"),
            "plantId": "lettuce",
            "quantity": 1,
            "existingPlantings": [giant]
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["placed"], 0);
    assert_eq!(body["payload"]["outcome"], "NothingPlaced");
}

#[actix_web::test]
async fn test_auto_place_unknown_plant_returns_404() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/placements/auto")
        .set_json(json!({ "bed": bed("SquareFoot"), "plantId": "mandrake", "quantity": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_auto_place_without_plant_returns_400() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/placements/auto")
        .set_json(json!({ "bed": bed("SquareFoot"), "quantity": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_auto_place_invalid_start_label_returns_400() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/placements/auto")
        .set_json(json!({
            "bed": bed("SquareFoot"),
            "plantId": "lettuce",
            "quantity": 1,
            "startPosition": "3B"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(!body["error"].as_str().unwrap_or("").is_empty());
}

#[actix_web::test]
async fn test_auto_place_zero_grid_size_returns_400() {
    let app = test::init_service(build_app()).await;
    let mut zero_grid = bed("SquareFoot");
    zero_grid["gridSize"] = json!(0.0);
    let req = test::TestRequest::post()
        .uri("/api/placements/auto")
        .set_json(json!({ "bed": zero_grid, "plantId": "lettuce", "quantity": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

// ---------------------------------------------------------------------------
// POST /api/placements/check
// ---------------------------------------------------------------------------

fn check_payload(x: u32, y: u32, start: &str, end: &str, conflict_override: bool) -> serde_json::Value {
    json!({
        "bed": bed("SquareFoot"),
        "candidate": {
            "origin": { "x": x, "y": y },
            "plant": { "id": "lettuce", "spacingInches": 12.0 },
            "startDate": start,
            "endDate": end,
            "conflictOverride": conflict_override
        },
        "existingPlantings": [lettuce_planting("p1", 0, 0, "2024-04-01", "2024-06-01")]
    })
}

#[actix_web::test]
async fn test_check_same_cell_same_season_is_blocking() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/placements/check")
        .set_json(check_payload(0, 0, "2024-04-15", "2024-07-01", false))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let conflicts = body["payload"]["report"]["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["kind"], "Both");
    assert_eq!(conflicts[0]["otherPlantingId"], "p1");
    assert_eq!(body["payload"]["accepted"], false);
}

#[actix_web::test]
async fn test_check_override_accepts_blocking_conflict() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/placements/check")
        .set_json(check_payload(0, 0, "2024-04-15", "2024-07-01", true))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["report"]["conflicts"][0]["kind"], "Both");
    assert_eq!(body["payload"]["accepted"], true);
}

#[actix_web::test]
async fn test_check_succession_planting_is_spatial_only() {
    let app = test::init_service(build_app()).await;
    // Starts the day the existing planting ends: half-open ranges do not touch.
    let req = test::TestRequest::post()
        .uri("/api/placements/check")
        .set_json(check_payload(0, 0, "2024-06-01", "2024-08-01", false))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["report"]["conflicts"][0]["kind"], "Spatial");
    assert_eq!(body["payload"]["accepted"], true);
}

#[actix_web::test]
async fn test_check_missing_dates_flags_incomplete_range() {
    let app = test::init_service(build_app()).await;
    let mut payload = check_payload(0, 0, "2024-04-15", "2024-07-01", false);
    payload["candidate"]["endDate"] = serde_json::Value::Null;
    let req = test::TestRequest::post()
        .uri("/api/placements/check")
        .set_json(payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["report"]["incompleteDateRange"], true);
    assert!(body["payload"]["report"]["conflicts"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_check_out_of_bounds_footprint_returns_400() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/placements/check")
        .set_json(json!({
            "bed": bed("SquareFoot"),
            "candidate": {
                "origin": { "x": 3, "y": 3 },
                "plant": { "id": "watermelon", "spacingInches": 36.0, "rowSpacingInches": 72.0 },
                "startDate": "2024-05-01",
                "endDate": "2024-09-01"
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap_or("")
        .contains("extends past the bed edge"));
}

// ---------------------------------------------------------------------------
// POST /api/placements/row-continuity
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_row_continuity_joins_adjacent_group() {
    let app = test::init_service(build_app()).await;
    let existing = json!([{
        "id": "r1",
        "plant": { "id": "radish", "spacingInches": 2.0 },
        "bedId": "bed-1",
        "origin": { "x": 0, "y": 0 },
        "spaceRequired": 1,
        "planningMethod": "SquareFoot",
        "rowGroupId": "row-radish-0-0",
        "rowSegmentIndex": 0
    }]);
    let req = test::TestRequest::post()
        .uri("/api/placements/row-continuity")
        .set_json(json!({
            "position": { "x": 1, "y": 0 },
            "plantId": "radish",
            "bedId": "bed-1",
            "gridSize": 12.0,
            "existingPlantings": existing
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["continuity"]["rowGroupId"], "row-radish-0-0");
    assert_eq!(body["payload"]["continuity"]["segmentIndex"], 1);
    assert_eq!(body["payload"]["continuity"]["isPartOfRow"], true);
    assert_eq!(body["payload"]["totalLengthInches"], 24.0);
    assert_eq!(body["payload"]["displayLabel"], "Part of 24″ continuous row (2 segments)");
}

#[actix_web::test]
async fn test_row_continuity_ignores_other_beds_and_blocks() {
    let app = test::init_service(build_app()).await;
    let existing = json!([
        {
            "id": "other-bed",
            "plant": { "id": "radish", "spacingInches": 2.0 },
            "bedId": "bed-2",
            "origin": { "x": 0, "y": 0 },
            "spaceRequired": 1,
            "planningMethod": "SquareFoot",
            "rowGroupId": "row-radish-0-0",
            "rowSegmentIndex": 0
        },
        {
            "id": "block",
            "plant": { "id": "radish", "spacingInches": 2.0 },
            "bedId": "bed-1",
            "origin": { "x": 1, "y": 1 },
            "spaceRequired": 4,
            "planningMethod": "SquareFoot"
        }
    ]);
    let req = test::TestRequest::post()
        .uri("/api/placements/row-continuity")
        .set_json(json!({
            "position": { "x": 1, "y": 0 },
            "plantId": "radish",
            "bedId": "bed-1",
            "gridSize": 12.0,
            "existingPlantings": existing
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["continuity"]["isPartOfRow"], false);
    assert_eq!(body["payload"]["continuity"]["rowGroupId"], "row-radish-1-0");
    assert_eq!(body["payload"]["displayLabel"], "Part of 12″ continuous row (1 segment)");
}

#[actix_web::test]
async fn test_row_continuity_zero_grid_size_returns_400() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/placements/row-continuity")
        .set_json(json!({
            "position": { "x": 0, "y": 0 },
            "plantId": "radish",
            "bedId": "bed-1",
            "gridSize": 0.0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

// ---------------------------------------------------------------------------
// POST /api/beds/availability
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_availability_splits_occupied_and_free() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/beds/availability")
        .set_json(json!({
            "bed": bed("SquareFoot"),
            "startDate": "2024-05-01",
            "endDate": "2024-05-15",
            "plantings": [
                lettuce_planting("p1", 0, 0, "2024-04-01", "2024-06-01"),
                lettuce_planting("p2", 1, 0, "2024-07-01", "2024-09-01")
            ]
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["gridWidth"], 4);
    assert_eq!(body["payload"]["gridHeight"], 4);
    let occupied = body["payload"]["occupied"].as_array().unwrap();
    assert_eq!(occupied.len(), 1);
    assert_eq!(occupied[0]["plantingId"], "p1");
    assert_eq!(body["payload"]["available"].as_array().unwrap().len(), 15);
    assert_eq!(body["payload"]["available"][0]["label"], "B1");
    assert_eq!(body["payload"]["regions"][0]["cells"].as_array().unwrap().len(), 15);
}

#[actix_web::test]
async fn test_availability_invalid_bed_returns_400() {
    let app = test::init_service(build_app()).await;
    let mut broken = bed("SquareFoot");
    broken["width"] = json!(-1.0);
    let req = test::TestRequest::post()
        .uri("/api/beds/availability")
        .set_json(json!({ "bed": broken, "startDate": "2024-05-01", "endDate": "2024-05-15" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_availability_oversized_bed_returns_400() {
    let app = test::init_service(build_app()).await;
    let mut huge = bed("SquareFoot");
    huge["width"] = json!(1e7);
    let req = test::TestRequest::post()
        .uri("/api/beds/availability")
        .set_json(json!({ "bed": huge, "startDate": "2024-05-01", "endDate": "2024-05-15" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap_or("").contains("cell limit"));
}

#[actix_web::test]
async fn test_check_with_oversized_existing_planting() {
    let app = test::init_service(build_app()).await;
    let mut payload = check_payload(3, 3, "2024-04-15", "2024-07-01", false);
    payload["existingPlantings"][0]["spaceRequired"] = json!(u32::MAX);
    let req = test::TestRequest::post()
        .uri("/api/placements/check")
        .set_json(payload)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"]["report"]["conflicts"][0]["kind"], "Both");
    assert_eq!(body["payload"]["report"]["conflicts"][0]["overlapCells"], json!([{ "x": 3, "y": 3 }]));
    assert_eq!(body["payload"]["accepted"], false);
}

#[actix_web::test]
async fn test_malformed_json_returns_400() {
    let app = test::init_service(build_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/placements/auto")
        .insert_header(("content-type", "application/json"))
        .set_payload("{invalid json}")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
