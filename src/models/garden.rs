use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::error::{ensure_grid_size, PlacementError, Result};
use crate::logic::footprint::{footprint, footprint_within, Footprint, SpacingInfo};
use crate::models::{plant::PlantRef, GridCell, GridDimensions};

/// Largest bed, in cells, the engine will lay out. A 4×8 ft bed on a 3" grid
/// is 512 cells.
pub const MAX_BED_CELLS: u64 = 40_000;

/// How a bed is planted. Drives both cell sizing and footprint shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum PlanningMethod {
    SquareFoot,
    #[serde(rename = "MIGardenerRow")]
    MiGardenerRow,
    #[serde(rename = "MIGardenerIntensive")]
    MiGardenerIntensive,
    /// Hexagonal packing approximated on the square grid.
    Intensive,
    /// Traditional rectangular rows.
    #[serde(alias = "Traditional")]
    Row,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum LengthUnit {
    #[default]
    Feet,
    Inches,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GardenBed {
    pub id: String,
    pub name: Option<String>,
    pub width: f64,
    pub length: f64,
    #[serde(default)]
    pub unit: LengthUnit,
    /// Inches per grid cell.
    pub grid_size: f64,
    pub planning_method: PlanningMethod,
}

impl GardenBed {
    fn to_inches(&self, value: f64) -> f64 {
        match self.unit {
            LengthUnit::Feet => value * 12.0,
            LengthUnit::Inches => value,
        }
    }

    /// Whole cells across (width) and down (length) the bed.
    pub fn grid_dimensions(&self) -> Result<GridDimensions> {
        let grid_size = ensure_grid_size(self.grid_size)?;
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.length) {
            return Err(PlacementError::InvalidBedDimensions {
                width: self.width,
                length: self.length,
            });
        }
        let cells = |v: f64| (self.to_inches(v) / grid_size).floor();
        let (width, height) = (cells(self.width), cells(self.length));
        if width * height > MAX_BED_CELLS as f64 {
            return Err(PlacementError::BedTooLarge {
                width,
                height,
                limit: MAX_BED_CELLS,
            });
        }
        Ok(GridDimensions::new(width as u32, height as u32))
    }
}

/// Half-open `[start, end)` date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Both bounds are needed to reason about time; otherwise `None`.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Self> {
        Some(Self::new(start?, end?))
    }

    /// Touching ranges (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The calendar events of a planting.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantingSchedule {
    pub seed_start_date: Option<NaiveDate>,
    pub transplant_date: Option<NaiveDate>,
    pub direct_seed_date: Option<NaiveDate>,
    pub expected_harvest_date: Option<NaiveDate>,
}

impl PlantingSchedule {
    /// Earliest of seed start, transplant and direct seeding.
    pub fn start_date(&self) -> Option<NaiveDate> {
        [self.seed_start_date, self.transplant_date, self.direct_seed_date]
            .into_iter()
            .flatten()
            .min()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.expected_harvest_date
    }
}

/// One placed crop instance.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Planting {
    pub id: String,
    pub plant: PlantRef,
    pub bed_id: String,
    pub origin: GridCell,
    /// Cell count, already sized for the bed's planning method.
    pub space_required: u32,
    pub planning_method: PlanningMethod,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub row_group_id: Option<String>,
    pub row_segment_index: Option<u32>,
    /// Set by the caller when the user knowingly accepted a reported conflict.
    #[serde(default)]
    pub conflict_override: bool,
}

impl Planting {
    /// Takes its start and end dates from a schedule of calendar events.
    pub fn with_schedule(mut self, schedule: &PlantingSchedule) -> Self {
        self.start_date = schedule.start_date();
        self.end_date = schedule.end_date();
        self
    }

    pub fn date_range(&self) -> Option<DateRange> {
        DateRange::from_bounds(self.start_date, self.end_date)
    }

    pub fn spacing(&self) -> SpacingInfo {
        SpacingInfo::from(&self.plant)
    }

    pub fn footprint(&self, grid_size: f64) -> Footprint {
        footprint(
            self.origin,
            self.space_required,
            self.planning_method,
            grid_size,
            self.spacing(),
        )
    }

    /// The part of the footprint that lies inside `bounds`.
    pub fn footprint_within(&self, grid_size: f64, bounds: GridDimensions) -> Footprint {
        footprint_within(
            self.origin,
            self.space_required,
            self.planning_method,
            grid_size,
            self.spacing(),
            bounds,
        )
    }
}
