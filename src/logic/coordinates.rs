//! Spreadsheet-style cell labels: column letters followed by a 1-based row.
//! `(0, 0)` is `A1`, `(26, 4)` is `AA5`.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::error::{PlacementError, Result};
use crate::models::GridCell;

/// Column letters for a zero-based column index (`0 → A`, `25 → Z`, `26 → AA`).
pub fn column_letters(x: u32) -> String {
    let mut n = u64::from(x) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

pub fn to_label(x: u32, y: u32) -> String {
    format!("{}{}", column_letters(x), u64::from(y) + 1)
}

fn invalid(label: &str, reason: impl Into<String>) -> PlacementError {
    PlacementError::InvalidCoordinate {
        label: label.to_string(),
        reason: reason.into(),
    }
}

/// Parses `^[A-Z]+\d+$` (trimmed, case-insensitive) into a cell.
pub fn from_label(label: &str) -> Result<GridCell> {
    let trimmed = label.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(trimmed.len());
    let (letters, digits) = trimmed.split_at(split);

    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(label, "expected column letters followed by a row number"));
    }

    // Both parts are 1-based, so the largest index needs one more than u32.
    let column = letters
        .bytes()
        .map(|b| u64::from(b.to_ascii_uppercase() - b'A') + 1)
        .try_fold(0u64, |acc, v| acc.checked_mul(26)?.checked_add(v))
        .and_then(|c| u32::try_from(c - 1).ok())
        .ok_or_else(|| invalid(label, "column is too large"))?;
    let row: u64 = digits
        .parse()
        .map_err(|_| invalid(label, "row number is too large"))?;
    if row == 0 {
        return Err(invalid(label, "row numbers start at 1"));
    }
    let row = u32::try_from(row - 1).map_err(|_| invalid(label, "row number is too large"))?;

    Ok(GridCell::new(column, row))
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LabelValidation {
    pub valid: bool,
    pub cell: Option<GridCell>,
    pub error: Option<String>,
}

/// Parses a label and checks it against the bed size, naming which axis is off.
pub fn validate_label(label: &str, grid_width: u32, grid_height: u32) -> LabelValidation {
    let cell = match from_label(label) {
        Ok(cell) => cell,
        Err(e) => {
            return LabelValidation {
                valid: false,
                cell: None,
                error: Some(e.to_string()),
            }
        }
    };

    let error = if cell.x >= grid_width {
        Some(if grid_width == 0 {
            format!("Column {} is out of range: the bed has no columns", column_letters(cell.x))
        } else {
            format!(
                "Column {} is out of range (valid columns: A-{})",
                column_letters(cell.x),
                column_letters(grid_width - 1)
            )
        })
    } else if cell.y >= grid_height {
        Some(format!(
            "Row {} is out of range (valid rows: 1-{})",
            u64::from(cell.y) + 1,
            grid_height
        ))
    } else {
        None
    };

    LabelValidation {
        valid: error.is_none(),
        cell: Some(cell),
        error,
    }
}
