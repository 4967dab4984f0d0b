use std::collections::HashMap;

use actix_web::http::Method;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::logic::{
    availability::{AvailableCell, ContiguousRegion, OccupiedCell},
    conflict::ConflictReport,
    coordinates::LabelValidation,
    footprint::FootprintShape,
    placement::{AutoPlaceResult, FillDirection, FillStrategy, PlacementOutcome},
    row_group::RowContinuity,
};
use crate::models::{
    garden::{GardenBed, Planting},
    plant::{Plant, PlantRef},
    GridCell,
};

/// Serde adapter for `actix_web::http::Method` (serialises as its uppercase string).
mod method_serde {
    use actix_web::http::Method;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Method, D::Error> {
        let s = String::deserialize(d)?;
        Method::from_bytes(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// A single HAL-style hyperlink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub href: String,
    #[serde(with = "method_serde")]
    #[schema(value_type = String, example = "GET")]
    pub method: Method,
}

/// Map of relation name → link, serialised as the `_links` field in responses.
pub type Links = HashMap<String, Link>;

/// Helper to build a `Link` from an href and an HTTP method.
pub fn link(href: impl Into<String>, method: Method) -> Link {
    Link {
        href: href.into(),
        method,
    }
}

/// Builds a `Links` map from `(relation, href, method)` triples.
pub fn links<const N: usize>(entries: [(&str, String, Method); N]) -> Links {
    entries
        .into_iter()
        .map(|(rel, href, method)| (rel.to_string(), link(href, method)))
        .collect()
}

/// Pagination metadata included in responses that return lists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Generic single-item response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    PlantApiResponse = ApiResponse<Plant>,
    LabelValidationApiResponse = ApiResponse<LabelValidation>,
    AutoPlaceApiResponse = ApiResponse<AutoPlaceResponse>,
    ConflictCheckApiResponse = ApiResponse<ConflictCheckResponse>,
    RowContinuityApiResponse = ApiResponse<RowContinuityResponse>,
    AvailabilityApiResponse = ApiResponse<AvailabilityResponse>,
)]
pub struct ApiResponse<T> {
    pub payload: T,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> ApiResponse<T> {
    pub fn new(payload: T, links: Links) -> Self {
        Self {
            payload,
            errors: vec![],
            links,
        }
    }
}

/// Generic paginated list response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(PlantListResponse = PaginatedResponse<Plant>)]
pub struct PaginatedResponse<T> {
    pub payload: Vec<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    pub links: Links,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    pub fn new(payload: Vec<T>, links: Links, pagination: Pagination) -> Self {
        Self {
            payload,
            errors: vec![],
            links,
            pagination,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Grid labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelValidationRequest {
    pub label: String,
    pub grid_width: u32,
    pub grid_height: u32,
}

// ---------------------------------------------------------------------------
// Auto-placement
// ---------------------------------------------------------------------------

/// Either a catalog id or an inline plant record; the inline record wins.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoPlaceRequestBody {
    pub bed: GardenBed,
    pub plant_id: Option<String>,
    pub plant: Option<PlantRef>,
    pub quantity: u32,
    /// Cell label such as `"B3"`.
    pub start_position: Option<String>,
    pub fill_direction: Option<FillDirection>,
    #[serde(default)]
    pub existing_plantings: Vec<Planting>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlacedPosition {
    pub cell: GridCell,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoPlaceResponse {
    pub plant_id: String,
    pub positions: Vec<PlacedPosition>,
    pub placed: u32,
    pub failed: u32,
    pub space_required: u32,
    pub strategy: FillStrategy,
    pub outcome: PlacementOutcome,
    pub summary: String,
}

impl AutoPlaceResponse {
    pub fn new(plant_id: String, result: AutoPlaceResult) -> Self {
        Self {
            plant_id,
            outcome: result.outcome(),
            summary: result.summary(),
            positions: result
                .positions
                .iter()
                .map(|&cell| PlacedPosition {
                    cell,
                    label: cell.label(),
                })
                .collect(),
            placed: result.placed,
            failed: result.failed,
            space_required: result.space_required,
            strategy: result.strategy,
        }
    }
}

// ---------------------------------------------------------------------------
// Conflict check
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateBody {
    pub origin: GridCell,
    pub plant: PlantRef,
    /// Computed from the plant and the bed's method when omitted.
    pub space_required: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// The user accepts reported conflicts.
    #[serde(default)]
    pub conflict_override: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConflictCheckRequest {
    pub bed: GardenBed,
    pub candidate: CandidateBody,
    #[serde(default)]
    pub existing_plantings: Vec<Planting>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConflictCheckResponse {
    pub footprint: Vec<GridCell>,
    pub shape: FootprintShape,
    pub report: ConflictReport,
    /// No blocking conflict, or the user overrode it.
    pub accepted: bool,
}

// ---------------------------------------------------------------------------
// Row continuity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowContinuityRequest {
    pub position: GridCell,
    pub plant_id: String,
    pub bed_id: String,
    pub grid_size: f64,
    #[serde(default)]
    pub existing_plantings: Vec<Planting>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowContinuityResponse {
    pub continuity: RowContinuity,
    pub total_length_inches: f64,
    pub display_label: String,
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub bed: GardenBed,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub plantings: Vec<Planting>,
    /// Smallest free region worth reporting. Defaults to 1.
    pub min_cells_needed: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub grid_width: u32,
    pub grid_height: u32,
    pub occupied: Vec<OccupiedCell>,
    pub available: Vec<AvailableCell>,
    pub contiguous: Vec<AvailableCell>,
    pub regions: Vec<ContiguousRegion>,
}
