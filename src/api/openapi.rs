use utoipa::OpenApi;

use crate::{
    logic::{
        availability::{AvailableCell, ContiguousRegion, OccupiedCell},
        conflict::{Conflict, ConflictKind, ConflictReport},
        coordinates::LabelValidation,
        footprint::{FallbackReason, FootprintShape},
        placement::{FillDirection, FillStrategy, PlacementOutcome},
        row_group::{AdoptedSegment, RowContinuity},
    },
    models::{
        garden::{GardenBed, LengthUnit, PlanningMethod, Planting},
        plant::{Category, Plant, PlantRef},
        request::{
            AutoPlaceApiResponse, AutoPlaceRequestBody, AutoPlaceResponse, AvailabilityApiResponse,
            AvailabilityRequest, AvailabilityResponse, CandidateBody, ConflictCheckApiResponse,
            ConflictCheckRequest, ConflictCheckResponse, ErrorResponse, LabelValidationApiResponse,
            LabelValidationRequest, Link, Pagination, PlacedPosition, PlantApiResponse,
            PlantListResponse, RowContinuityApiResponse, RowContinuityRequest,
            RowContinuityResponse,
        },
        GridCell,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Garden Grid API",
        description = "Grid placement for garden beds: cell labels, plant footprints, auto-placement, spatial and temporal conflict checks, continuous rows and free-space queries.",
        version = "1.0.0",
        license(name = "MIT"),
    ),
    paths(
        crate::api::handlers::plants::list_plants,
        crate::api::handlers::plants::get_plant,
        crate::api::handlers::grid::post_validate_label,
        crate::api::handlers::placement::post_auto_place,
        crate::api::handlers::placement::post_check_placement,
        crate::api::handlers::placement::post_row_continuity,
        crate::api::handlers::beds::post_availability,
    ),
    components(
        schemas(
            // Enums
            Category, PlanningMethod, LengthUnit, FillDirection, FillStrategy, PlacementOutcome,
            FootprintShape, FallbackReason, ConflictKind,
            // Grid and garden
            GridCell, GardenBed, Planting, Plant, PlantRef,
            // Labels
            LabelValidationRequest, LabelValidation,
            // Placement
            AutoPlaceRequestBody, AutoPlaceResponse, PlacedPosition,
            CandidateBody, ConflictCheckRequest, ConflictCheckResponse, Conflict, ConflictReport,
            RowContinuityRequest, RowContinuityResponse, RowContinuity, AdoptedSegment,
            // Availability
            AvailabilityRequest, AvailabilityResponse, OccupiedCell, AvailableCell, ContiguousRegion,
            // Shared
            Link, Pagination, ErrorResponse,
            // Concrete response envelopes (via #[aliases])
            PlantApiResponse,
            PlantListResponse,
            LabelValidationApiResponse,
            AutoPlaceApiResponse,
            ConflictCheckApiResponse,
            RowContinuityApiResponse,
            AvailabilityApiResponse,
        )
    ),
    tags(
        (name = "plants",    description = "Plant catalog with spacing data"),
        (name = "grid",      description = "Cell labels such as A1 or AA12"),
        (name = "placement", description = "Auto-placement, conflict checks and row continuity"),
        (name = "beds",      description = "Occupied and free cells of a bed over time"),
    )
)]
pub struct ApiDoc;
