use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::logic::coordinates::to_label;

pub mod garden;
pub mod plant;
pub mod request;

/// A zero-based (x, y) position within a bed grid; x is the column, y the row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
}

impl GridCell {
    pub const ORIGIN: GridCell = GridCell { x: 0, y: 0 };

    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The cell `dx` columns right and `dy` rows down, if it is representable.
    pub fn offset(self, dx: u32, dy: u32) -> Option<GridCell> {
        Some(GridCell {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// `max(|dx|, |dy|)`: diagonal neighbours are as close as axis neighbours.
    pub fn chebyshev_distance(self, other: GridCell) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn manhattan_distance(self, other: GridCell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Horizontal or vertical neighbour, never diagonal.
    pub fn is_edge_adjacent(self, other: GridCell) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// The up to four edge neighbours, without leaving the non-negative quadrant.
    pub fn edge_neighbors(self) -> impl Iterator<Item = GridCell> {
        [
            self.x.checked_sub(1).map(|x| GridCell::new(x, self.y)),
            self.offset(1, 0),
            self.y.checked_sub(1).map(|y| GridCell::new(self.x, y)),
            self.offset(0, 1),
        ]
        .into_iter()
        .flatten()
    }

    pub fn label(self) -> String {
        to_label(self.x, self.y)
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Size of a bed grid in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// True when a `cols×rows` block anchored at `origin` lies inside the grid.
    pub fn fits_block(&self, origin: GridCell, cols: u32, rows: u32) -> bool {
        u64::from(origin.x) + u64::from(cols) <= u64::from(self.width)
            && u64::from(origin.y) + u64::from(rows) <= u64::from(self.height)
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Every cell of the bed in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| GridCell::new(x, y)))
    }
}
