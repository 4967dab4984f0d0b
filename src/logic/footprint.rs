//! Which cells a planting occupies.
//!
//! Every footprint is an axis-aligned block anchored at its origin and
//! growing toward increasing x and y, so the origin is always a member and
//! membership can be answered without building the cell set.
//!
//! - Square packing (`SquareFoot`, `Intensive`): a `k×k` block with
//!   `k = ceil(sqrt(space_required))`.
//! - Row packing (`MIGardenerRow`, `MIGardenerIntensive`, `Row`): a `cols×rows`
//!   rectangle following the row-to-plant spacing ratio.
//!
//! Row packing without the spacing it needs degrades to square packing through
//! a named [`FallbackReason`], logged at debug level.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{PlacementError, Result};
use crate::logic::spacing::cells_for;
use crate::models::{garden::PlanningMethod, plant::PlantRef, GridCell, GridDimensions};

/// Physical spacing a row-based footprint is shaped from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpacingInfo {
    pub plant_spacing_inches: Option<f64>,
    pub row_spacing_inches: Option<f64>,
}

impl From<&PlantRef> for SpacingInfo {
    fn from(plant: &PlantRef) -> Self {
        Self {
            plant_spacing_inches: Some(plant.spacing_inches),
            row_spacing_inches: plant.row_spacing_inches,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FallbackReason {
    /// MIGardener crop without row spacing: planted intensively, packed square.
    IntensiveCrop,
    /// A row-based method lacks the spacing needed to shape a rectangle.
    MissingSpacingData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FootprintShape {
    Square,
    Rectangle,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    pub origin: GridCell,
    pub cols: u32,
    pub rows: u32,
    pub shape: FootprintShape,
    pub cells: BTreeSet<GridCell>,
}

impl Footprint {
    pub fn contains(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.shape, FootprintShape::Fallback(_))
    }

    /// True when the whole block lies inside the bed.
    pub fn fits_within(&self, dims: GridDimensions) -> bool {
        dims.fits_block(self.origin, self.cols, self.rows)
    }

    /// Smallest grid, anchored at A1, that holds the whole block.
    pub fn extent(&self) -> GridDimensions {
        GridDimensions::new(
            self.origin.x.saturating_add(self.cols),
            self.origin.y.saturating_add(self.rows),
        )
    }

    /// Footprints past the bed edge are rejected, never clamped.
    pub fn ensure_within(&self, dims: GridDimensions) -> Result<()> {
        if self.fits_within(dims) {
            Ok(())
        } else {
            Err(PlacementError::OutOfBoundsFootprint {
                origin: self.origin,
                width: dims.width,
                height: dims.height,
            })
        }
    }

    /// Shared cells in ascending order.
    pub fn intersection(&self, other: &Footprint) -> Vec<GridCell> {
        self.cells.intersection(&other.cells).copied().collect()
    }

    pub fn overlaps(&self, other: &Footprint) -> bool {
        !self.cells.is_disjoint(&other.cells)
    }
}

fn ceil_sqrt(n: u64) -> u64 {
    let k = n.isqrt();
    if k * k < n {
        k + 1
    } else {
        k
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// `(cols, rows)` of a row-packed rectangle approximating `n` cells.
fn rectangle(n: u32, grid_size: f64, plant_spacing: f64, row_spacing: f64) -> (u32, u32) {
    let row_cells = f64::from(cells_for(row_spacing, grid_size));
    let plant_cells = f64::from(cells_for(plant_spacing, grid_size));
    let ratio = row_cells / plant_cells;
    let n = f64::from(n);

    if ratio >= 1.0 {
        let cols = (n / ratio).sqrt().ceil().max(1.0);
        let rows = (n / cols).ceil().max(1.0);
        (cols as u32, rows as u32)
    } else {
        let rows = (n * ratio).sqrt().ceil().max(1.0);
        let cols = (n / rows).ceil().max(1.0);
        (cols as u32, rows as u32)
    }
}

/// Block size and shape for a planting, without materialising the cells.
pub fn footprint_dimensions(
    space_required: u32,
    method: PlanningMethod,
    grid_size: f64,
    spacing: SpacingInfo,
) -> (u32, u32, FootprintShape) {
    let n = space_required.max(1);
    let square = |shape| {
        let k = ceil_sqrt(u64::from(n)) as u32;
        (k, k, shape)
    };

    match method {
        PlanningMethod::SquareFoot | PlanningMethod::Intensive => square(FootprintShape::Square),
        PlanningMethod::MiGardenerRow | PlanningMethod::MiGardenerIntensive | PlanningMethod::Row => {
            let grid = positive(Some(grid_size));
            let row_spacing = positive(spacing.row_spacing_inches);
            let plant_spacing = positive(spacing.plant_spacing_inches);
            match (grid, row_spacing, plant_spacing) {
                (Some(g), Some(r), Some(p)) => {
                    let (cols, rows) = rectangle(n, g, p, r);
                    (cols, rows, FootprintShape::Rectangle)
                }
                (_, None, _) if method != PlanningMethod::Row => {
                    log::debug!("{method:?} crop without row spacing, packing square");
                    square(FootprintShape::Fallback(FallbackReason::IntensiveCrop))
                }
                _ => {
                    log::debug!("{method:?} footprint lacks spacing data, packing square");
                    square(FootprintShape::Fallback(FallbackReason::MissingSpacingData))
                }
            }
        }
    }
}

fn block_cells(origin: GridCell, cols: u32, rows: u32, clip: Option<GridDimensions>) -> BTreeSet<GridCell> {
    let end = |start: u32, len: u32, limit: Option<u32>| {
        let end = (u64::from(start) + u64::from(len)).min(u64::from(u32::MAX) + 1);
        limit.map_or(end, |limit| end.min(u64::from(limit)))
    };
    let x_range = u64::from(origin.x)..end(origin.x, cols, clip.map(|d| d.width));
    let y_range = u64::from(origin.y)..end(origin.y, rows, clip.map(|d| d.height));
    y_range
        .flat_map(|y| x_range.clone().map(move |x| GridCell::new(x as u32, y as u32)))
        .collect()
}

/// The exact cells a planting occupies. Pure and deterministic.
pub fn footprint(
    origin: GridCell,
    space_required: u32,
    method: PlanningMethod,
    grid_size: f64,
    spacing: SpacingInfo,
) -> Footprint {
    let (cols, rows, shape) = footprint_dimensions(space_required, method, grid_size, spacing);
    Footprint {
        origin,
        cols,
        rows,
        shape,
        cells: block_cells(origin, cols, rows, None),
    }
}

/// Like [`footprint`], but only the cells inside `bounds` are built.
/// `cols` and `rows` keep the full block size, so `fits_within` still rejects
/// a block that spills over the edge.
pub fn footprint_within(
    origin: GridCell,
    space_required: u32,
    method: PlanningMethod,
    grid_size: f64,
    spacing: SpacingInfo,
    bounds: GridDimensions,
) -> Footprint {
    let (cols, rows, shape) = footprint_dimensions(space_required, method, grid_size, spacing);
    Footprint {
        origin,
        cols,
        rows,
        shape,
        cells: block_cells(origin, cols, rows, Some(bounds)),
    }
}

pub fn is_in_footprint(
    target: GridCell,
    origin: GridCell,
    space_required: u32,
    method: PlanningMethod,
    grid_size: f64,
    spacing: SpacingInfo,
) -> bool {
    let (cols, rows, _) = footprint_dimensions(space_required, method, grid_size, spacing);
    let within = |t: u32, o: u32, len: u32| t >= o && u64::from(t) < u64::from(o) + u64::from(len);
    within(target.x, origin.x, cols) && within(target.y, origin.y, rows)
}
