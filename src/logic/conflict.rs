use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Result;
use crate::logic::footprint::{footprint, footprint_within, Footprint, SpacingInfo};
use crate::models::{
    garden::{DateRange, GardenBed, PlanningMethod, Planting},
    GridCell, GridDimensions,
};

/// A placement that has not been committed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementCandidate {
    pub bed_id: String,
    pub origin: GridCell,
    pub space_required: u32,
    pub method: PlanningMethod,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub spacing: SpacingInfo,
}

impl PlacementCandidate {
    pub fn footprint(&self, grid_size: f64) -> Footprint {
        footprint(self.origin, self.space_required, self.method, grid_size, self.spacing)
    }

    pub fn footprint_within(&self, grid_size: f64, bounds: GridDimensions) -> Footprint {
        footprint_within(
            self.origin,
            self.space_required,
            self.method,
            grid_size,
            self.spacing,
            bounds,
        )
    }
}

impl From<&Planting> for PlacementCandidate {
    fn from(planting: &Planting) -> Self {
        Self {
            bed_id: planting.bed_id.clone(),
            origin: planting.origin,
            space_required: planting.space_required,
            method: planting.planning_method,
            start_date: planting.start_date,
            end_date: planting.end_date,
            spacing: planting.spacing(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ConflictKind {
    /// Same cells, different seasons. Succession planting, not a clash.
    Spatial,
    /// Same season, different cells. Advisory only.
    Temporal,
    /// Same cells at the same time.
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub other_planting_id: String,
    pub overlap_cells: Vec<GridCell>,
    pub kind: ConflictKind,
}

/// Valid only for the snapshot it was computed against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub conflicts: Vec<Conflict>,
    /// The candidate lacked a start or end date, so nothing was compared.
    pub incomplete_date_range: bool,
}

impl ConflictReport {
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Conflicts that share cells and time.
    pub fn blocking(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter().filter(|c| c.kind == ConflictKind::Both)
    }

    pub fn has_blocking(&self) -> bool {
        self.blocking().next().is_some()
    }
}

/// Every overlap between `candidate` and the plantings of its bed.
pub fn check_conflict(
    candidate: &PlacementCandidate,
    existing: &[Planting],
    grid_size: f64,
) -> ConflictReport {
    let Some(range) = DateRange::from_bounds(candidate.start_date, candidate.end_date) else {
        log::debug!(
            "candidate at {} has an incomplete date range, skipping conflict check",
            candidate.origin
        );
        return ConflictReport {
            conflicts: vec![],
            incomplete_date_range: true,
        };
    };

    let candidate_fp = candidate.footprint(grid_size);
    // Other footprints only matter where they can meet the candidate's block.
    let reach = candidate_fp.extent();
    let conflicts = existing
        .iter()
        .filter(|p| p.bed_id == candidate.bed_id)
        .filter_map(|planting| {
            let overlap_cells = candidate_fp.intersection(&planting.footprint_within(grid_size, reach));
            let temporal = planting
                .date_range()
                .is_some_and(|other| range.overlaps(&other));
            let kind = match (!overlap_cells.is_empty(), temporal) {
                (true, true) => ConflictKind::Both,
                (true, false) => ConflictKind::Spatial,
                (false, true) => ConflictKind::Temporal,
                (false, false) => return None,
            };
            Some(Conflict {
                other_planting_id: planting.id.clone(),
                overlap_cells,
                kind,
            })
        })
        .collect();

    ConflictReport {
        conflicts,
        incomplete_date_range: false,
    }
}

/// Bounds check, then conflict check. Out-of-bed footprints are rejected.
pub fn validate_placement(
    candidate: &PlacementCandidate,
    bed: &GardenBed,
    existing: &[Planting],
) -> Result<ConflictReport> {
    let dims = bed.grid_dimensions()?;
    candidate
        .footprint_within(bed.grid_size, dims)
        .ensure_within(dims)?;
    Ok(check_conflict(candidate, existing, bed.grid_size))
}
