use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ensure_grid_size, PlacementError, Result};
use crate::logic::footprint::{footprint, footprint_dimensions, Footprint, SpacingInfo};
use crate::logic::spacing::{cells_for, cells_required, on_center_spacing, HEX_ROW_COMPRESSION};
use crate::models::{
    garden::{PlanningMethod, Planting, MAX_BED_CELLS},
    plant::PlantRef,
    GridCell, GridDimensions,
};

/// Scan order of the generic fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FillDirection {
    /// Left to right, then the next row.
    #[default]
    Across,
    /// Top to bottom, then the next column.
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FillStrategy {
    Generic(FillDirection),
    RowBased,
    Hexagonal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutoPlaceRequest {
    /// Only `existing_plantings` of this bed take up room.
    pub bed_id: String,
    pub start_position: Option<GridCell>,
    pub plant: PlantRef,
    pub quantity: u32,
    pub bed: GridDimensions,
    pub grid_size: f64,
    pub existing_plantings: Vec<Planting>,
    pub planning_method: PlanningMethod,
    pub fill_direction: Option<FillDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PlacementOutcome {
    Complete,
    Partial,
    NothingPlaced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutoPlaceResult {
    pub positions: Vec<GridCell>,
    pub placed: u32,
    pub failed: u32,
    /// Cells each placed plant occupies.
    pub space_required: u32,
    pub strategy: FillStrategy,
}

impl AutoPlaceResult {
    pub fn requested(&self) -> u32 {
        self.placed + self.failed
    }

    pub fn outcome(&self) -> PlacementOutcome {
        if self.failed == 0 {
            PlacementOutcome::Complete
        } else if self.placed == 0 {
            PlacementOutcome::NothingPlaced
        } else {
            PlacementOutcome::Partial
        }
    }

    /// User-facing one-liner, e.g. `Placed 6 of 10; 4 could not fit.`
    pub fn summary(&self) -> String {
        match self.outcome() {
            PlacementOutcome::Complete => format!("Placed {} of {}.", self.placed, self.requested()),
            PlacementOutcome::Partial => format!(
                "Placed {} of {}; {} could not fit.",
                self.placed,
                self.requested(),
                self.failed
            ),
            PlacementOutcome::NothingPlaced => {
                format!("No room for any of the {} requested plants.", self.requested())
            }
        }
    }
}

/// Candidate order follows the bed's planting method.
pub fn fill_strategy(
    method: PlanningMethod,
    plant: &PlantRef,
    direction: Option<FillDirection>,
) -> FillStrategy {
    let has_rows = plant.row_spacing_inches.is_some_and(|r| r.is_finite() && r > 0.0);
    match method {
        PlanningMethod::Intensive => FillStrategy::Hexagonal,
        PlanningMethod::MiGardenerRow | PlanningMethod::Row if has_rows => FillStrategy::RowBased,
        PlanningMethod::SquareFoot
        | PlanningMethod::MiGardenerIntensive
        | PlanningMethod::MiGardenerRow
        | PlanningMethod::Row => FillStrategy::Generic(direction.unwrap_or_default()),
    }
}

/// Minimum Chebyshev distance, in cells, a plant keeps from its neighbours.
/// Square-foot beds use the curated footprint rather than raw spacing.
pub fn required_distance(
    plant: &PlantRef,
    method: PlanningMethod,
    space_required: u32,
    grid_size: f64,
) -> u32 {
    match method {
        PlanningMethod::SquareFoot => {
            let (cols, rows, _) =
                footprint_dimensions(space_required, method, grid_size, SpacingInfo::from(plant));
            cols.max(rows)
        }
        PlanningMethod::MiGardenerRow
        | PlanningMethod::MiGardenerIntensive
        | PlanningMethod::Intensive
        | PlanningMethod::Row => cells_for(plant.spacing_inches, grid_size),
    }
}

fn step_rows(
    start: GridCell,
    bed: GridDimensions,
    row_step: u32,
    col_step: u32,
    row_offset: impl Fn(usize) -> u32,
) -> Vec<GridCell> {
    (start.y..bed.height)
        .step_by(row_step.max(1) as usize)
        .enumerate()
        .flat_map(|(i, y)| {
            let first_x = if i == 0 { start.x } else { row_offset(i) };
            (first_x..bed.width)
                .step_by(col_step.max(1) as usize)
                .map(move |x| GridCell::new(x, y))
        })
        .collect()
}

/// Every position the engine will try, in the order it tries them.
pub fn candidate_cells(
    strategy: FillStrategy,
    plant: &PlantRef,
    start: GridCell,
    bed: GridDimensions,
    grid_size: f64,
) -> Vec<GridCell> {
    match strategy {
        FillStrategy::Generic(FillDirection::Across) => (start.y..bed.height)
            .flat_map(|y| {
                let first_x = if y == start.y { start.x } else { 0 };
                (first_x..bed.width).map(move |x| GridCell::new(x, y))
            })
            .collect(),
        FillStrategy::Generic(FillDirection::Down) => (start.x..bed.width)
            .flat_map(|x| {
                let first_y = if x == start.x { start.y } else { 0 };
                (first_y..bed.height).map(move |y| GridCell::new(x, y))
            })
            .collect(),
        FillStrategy::RowBased => {
            let row_step = cells_for(plant.row_spacing_inches.unwrap_or(grid_size), grid_size);
            let col_step = cells_for(plant.spacing_inches, grid_size);
            step_rows(start, bed, row_step, col_step, |_| 0)
        }
        FillStrategy::Hexagonal => {
            let on_center = on_center_spacing(plant);
            let col_step = cells_for(on_center, grid_size);
            let row_step = cells_for(on_center * HEX_ROW_COMPRESSION, grid_size);
            step_rows(start, bed, row_step, col_step, |i| {
                if i % 2 == 1 {
                    col_step / 2
                } else {
                    0
                }
            })
        }
    }
}

/// A plant already in the bed or accepted earlier in the batch.
struct Neighbor {
    origin: GridCell,
    distance: u32,
    dense: bool,
    footprint: Footprint,
}

impl Neighbor {
    fn too_close(&self, origin: GridCell, distance: u32, dense: bool) -> bool {
        let required = if dense && self.dense {
            0
        } else {
            distance.max(self.distance)
        };
        origin.chebyshev_distance(self.origin) < required
    }
}

/// Finds up to `quantity` valid positions. Same inputs, same positions.
pub fn auto_place(request: &AutoPlaceRequest) -> Result<AutoPlaceResult> {
    let grid_size = ensure_grid_size(request.grid_size)?;
    if request.bed.cell_count() as u64 > MAX_BED_CELLS {
        return Err(PlacementError::BedTooLarge {
            width: f64::from(request.bed.width),
            height: f64::from(request.bed.height),
            limit: MAX_BED_CELLS,
        });
    }
    let method = request.planning_method;
    let plant = &request.plant;
    let space_required = cells_required(plant, grid_size, method)?;
    let strategy = fill_strategy(method, plant, request.fill_direction);

    let start = match request.start_position {
        Some(cell) if request.bed.contains(cell) => cell,
        Some(cell) => {
            log::debug!("start position {cell} is outside the bed, starting at A1");
            GridCell::ORIGIN
        }
        None => GridCell::ORIGIN,
    };

    let existing: Vec<Neighbor> = request
        .existing_plantings
        .iter()
        .filter(|p| p.bed_id == request.bed_id)
        .map(|p| Neighbor {
            origin: p.origin,
            distance: required_distance(&p.plant, p.planning_method, p.space_required, grid_size),
            dense: p.plant.is_dense(grid_size),
            footprint: p.footprint_within(grid_size, request.bed),
        })
        .collect();
    let occupied: HashSet<GridCell> = existing
        .iter()
        .flat_map(|n| n.footprint.cells.iter().copied())
        .collect();

    let spacing = SpacingInfo::from(plant);
    let distance = required_distance(plant, method, space_required, grid_size);
    let dense = plant.is_dense(grid_size);
    let (cols, rows, _) = footprint_dimensions(space_required, method, grid_size, spacing);
    let mut accepted: Vec<Neighbor> = Vec::new();

    for candidate in candidate_cells(strategy, plant, start, request.bed, grid_size) {
        if accepted.len() as u32 >= request.quantity {
            break;
        }
        if !request.bed.fits_block(candidate, cols, rows) {
            continue;
        }
        let fp = footprint(candidate, space_required, method, grid_size, spacing);
        if fp.cells.iter().any(|c| occupied.contains(c)) {
            continue;
        }
        if existing.iter().any(|n| n.too_close(candidate, distance, dense)) {
            continue;
        }
        if accepted
            .iter()
            .any(|n| n.footprint.overlaps(&fp) || n.too_close(candidate, distance, dense))
        {
            continue;
        }
        accepted.push(Neighbor {
            origin: candidate,
            distance,
            dense,
            footprint: fp,
        });
    }

    let positions: Vec<GridCell> = accepted.into_iter().map(|n| n.origin).collect();
    let placed = positions.len() as u32;
    let result = AutoPlaceResult {
        positions,
        placed,
        failed: request.quantity - placed,
        space_required,
        strategy,
    };

    match result.outcome() {
        PlacementOutcome::Complete => log::info!("{}: {}", plant.id, result.summary()),
        PlacementOutcome::Partial | PlacementOutcome::NothingPlaced => {
            log::warn!("{}: {}", plant.id, result.summary())
        }
    }
    Ok(result)
}
