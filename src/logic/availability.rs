use std::collections::{HashSet, VecDeque};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::error::Result;
use crate::models::{
    garden::{DateRange, GardenBed, Planting},
    GridCell,
};

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupiedCell {
    pub cell: GridCell,
    pub planting_id: String,
    pub plant_name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AvailableCell {
    pub cell: GridCell,
    pub label: String,
}

impl From<GridCell> for AvailableCell {
    fn from(cell: GridCell) -> Self {
        Self {
            cell,
            label: cell.label(),
        }
    }
}

/// Cells taken during `[start, end)` by plantings of `bed_id`.
/// One entry per cell; the first planting listed wins. An open-ended range
/// reports nothing occupied.
pub fn occupied_cells(
    bed_id: &str,
    range: (Option<NaiveDate>, Option<NaiveDate>),
    plantings: &[Planting],
    bed: &GardenBed,
) -> Result<Vec<OccupiedCell>> {
    let dims = bed.grid_dimensions()?;
    let Some(range) = DateRange::from_bounds(range.0, range.1) else {
        log::debug!("availability query for bed {bed_id} has an incomplete date range");
        return Ok(vec![]);
    };

    let mut seen = HashSet::new();
    let mut occupied = Vec::new();
    for planting in plantings.iter().filter(|p| p.bed_id == bed_id) {
        let active = planting
            .date_range()
            .is_some_and(|dates| dates.overlaps(&range));
        if !active {
            continue;
        }
        for cell in planting.footprint_within(bed.grid_size, dims).cells {
            if seen.insert(cell) {
                occupied.push(OccupiedCell {
                    cell,
                    planting_id: planting.id.clone(),
                    plant_name: planting.plant.display_name().to_string(),
                    start_date: planting.start_date,
                    end_date: planting.end_date,
                });
            }
        }
    }
    Ok(occupied)
}

/// Row-major bed cells not listed in `occupied`.
pub fn available_cells(bed: &GardenBed, occupied: &[OccupiedCell]) -> Result<Vec<AvailableCell>> {
    let dims = bed.grid_dimensions()?;
    let taken: HashSet<GridCell> = occupied.iter().map(|o| o.cell).collect();
    Ok(dims
        .cells()
        .filter(|c| !taken.contains(c))
        .map(AvailableCell::from)
        .collect())
}

/// A 4-connected group of free cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContiguousRegion {
    pub cells: Vec<GridCell>,
    pub top_left: GridCell,
    pub bottom_right: GridCell,
}

impl ContiguousRegion {
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

/// Connected components of `available` holding at least `min_cells_needed`
/// cells, largest first. Ties keep discovery order.
pub fn contiguous_regions(available: &[AvailableCell], min_cells_needed: usize) -> Vec<ContiguousRegion> {
    let free: HashSet<GridCell> = available.iter().map(|a| a.cell).collect();
    let mut visited: HashSet<GridCell> = HashSet::with_capacity(free.len());
    let mut regions = Vec::new();

    for seed in available.iter().map(|a| a.cell) {
        if !visited.insert(seed) {
            continue;
        }
        let mut component = vec![seed];
        let mut queue = VecDeque::from([seed]);
        while let Some(cell) = queue.pop_front() {
            for next in cell.edge_neighbors() {
                if free.contains(&next) && visited.insert(next) {
                    component.push(next);
                    queue.push_back(next);
                }
            }
        }
        if component.len() < min_cells_needed {
            continue;
        }
        component.sort_by_key(|c| (c.y, c.x));
        let top_left = GridCell::new(
            component.iter().map(|c| c.x).min().unwrap_or(seed.x),
            component.iter().map(|c| c.y).min().unwrap_or(seed.y),
        );
        let bottom_right = GridCell::new(
            component.iter().map(|c| c.x).max().unwrap_or(seed.x),
            component.iter().map(|c| c.y).max().unwrap_or(seed.y),
        );
        regions.push(ContiguousRegion {
            cells: component,
            top_left,
            bottom_right,
        });
    }

    regions.sort_by(|a, b| b.size().cmp(&a.size()));
    regions
}

/// Every available cell that belongs to a large enough free region, in input
/// order. Reserving cells once chosen is the caller's job.
pub fn find_contiguous_spaces(available: &[AvailableCell], min_cells_needed: usize) -> Vec<AvailableCell> {
    let keep: HashSet<GridCell> = contiguous_regions(available, min_cells_needed)
        .into_iter()
        .flat_map(|r| r.cells)
        .collect();
    available
        .iter()
        .filter(|a| keep.contains(&a.cell))
        .cloned()
        .collect()
}
