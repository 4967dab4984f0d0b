use crate::models::GridCell;

/// Hard failures of the placement engine.
///
/// Expected outcomes such as "no free position" or "missing spacing data" are
/// not errors: they surface as `placed = 0` or as a named footprint fallback.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    #[error("Invalid coordinate '{label}': {reason}")]
    InvalidCoordinate { label: String, reason: String },

    #[error("Footprint anchored at {origin} extends past the bed edge ({width}x{height} cells)")]
    OutOfBoundsFootprint {
        origin: GridCell,
        width: u32,
        height: u32,
    },

    #[error("Grid size must be a positive number of inches (got {0})")]
    InvalidGridSize(f64),

    #[error("Plant spacing must be a finite, non-negative number of inches (got {0})")]
    InvalidSpacing(f64),

    #[error("Bed dimensions must be positive (got {width} x {length})")]
    InvalidBedDimensions { width: f64, length: f64 },

    #[error("Bed of {width}x{height} cells exceeds the {limit}-cell limit")]
    BedTooLarge { width: f64, height: f64, limit: u64 },
}

pub type Result<T> = std::result::Result<T, PlacementError>;

/// Rejects zero, negative and non-finite grid sizes.
pub fn ensure_grid_size(grid_size: f64) -> Result<f64> {
    if grid_size.is_finite() && grid_size > 0.0 {
        Ok(grid_size)
    } else {
        Err(PlacementError::InvalidGridSize(grid_size))
    }
}

/// Rejects negative and non-finite spacings. Zero is allowed and sizes to one cell.
pub fn ensure_spacing(spacing: f64) -> Result<f64> {
    if spacing.is_finite() && spacing >= 0.0 {
        Ok(spacing)
    } else {
        Err(PlacementError::InvalidSpacing(spacing))
    }
}
