use crate::error::{ensure_grid_size, ensure_spacing, Result};
use crate::models::{garden::PlanningMethod, plant::PlantRef};

/// Row compression of hexagonal packing relative to square packing
/// (`sin 60°`). A tunable approximation: packing 13.4% more plants per area
/// holds for mid-sized crops but is coarse at the extremes.
pub const HEX_ROW_COMPRESSION: f64 = 0.866;

/// Cells one plant occupies in square-foot gardening.
/// Curated counts, not derived from spacing: a tomato takes one square however
/// wide its catalog spacing is.
pub fn square_foot_cells(plant_id: &str) -> Option<u32> {
    match plant_id {
        "tomato" | "pepper" | "eggplant" | "broccoli" | "cabbage" | "cauliflower" | "kale" => {
            Some(1)
        }
        "lettuce" | "spinach" | "chard" | "celery" | "leek" | "parsley" | "basil" => Some(1),
        "carrot" | "radish" | "onion" | "garlic" | "beet" | "turnip" | "chive" => Some(1),
        "green-bean" | "pea" | "strawberry" | "potato" | "corn" | "cucumber" => Some(1),
        "melon" | "zucchini" => Some(2),
        "watermelon" | "winter-squash" => Some(4),
        "pumpkin" => Some(9),
        _ => None,
    }
}

/// Preferred on-center distance for hexagonal beds, where it differs from the
/// catalog spacing.
pub fn hex_on_center_inches(plant_id: &str) -> Option<f64> {
    match plant_id {
        "tomato" => Some(18.0),
        "pepper" | "eggplant" => Some(15.0),
        "broccoli" | "cabbage" | "cauliflower" => Some(15.0),
        "lettuce" => Some(9.0),
        "kale" => Some(15.0),
        _ => None,
    }
}

/// On-center spacing used by hexagonal packing.
pub fn on_center_spacing(plant: &PlantRef) -> f64 {
    hex_on_center_inches(&plant.id).unwrap_or(plant.spacing_inches)
}

/// Whole cells needed to cover `inches`, never less than one.
pub fn cells_for(inches: f64, grid_size: f64) -> u32 {
    ((inches / grid_size).ceil().max(1.0)).min(u32::MAX as f64) as u32
}

fn squared(side: u32) -> u32 {
    side.saturating_mul(side)
}

/// Integer cell count a single plant needs under `method`. Always at least 1.
pub fn cells_required(plant: &PlantRef, grid_size: f64, method: PlanningMethod) -> Result<u32> {
    let grid_size = ensure_grid_size(grid_size)?;
    let spacing = ensure_spacing(plant.spacing_inches)?;
    let row_spacing = plant.row_spacing_inches.map(ensure_spacing).transpose()?;

    let cells = match method {
        PlanningMethod::SquareFoot => match square_foot_cells(&plant.id) {
            Some(cells) => cells,
            None => {
                log::debug!(
                    "no square-foot count for '{}', sizing from its {spacing}\" spacing",
                    plant.id
                );
                squared(cells_for(spacing, grid_size))
            }
        },
        PlanningMethod::MiGardenerRow | PlanningMethod::MiGardenerIntensive => match row_spacing {
            Some(rows) => cells_for(spacing, grid_size).saturating_mul(cells_for(rows, grid_size)),
            None => squared(cells_for(spacing, grid_size)),
        },
        PlanningMethod::Intensive => {
            let ratio = on_center_spacing(plant) / grid_size;
            (ratio * ratio * HEX_ROW_COMPRESSION).ceil().min(u32::MAX as f64) as u32
        }
        PlanningMethod::Row => squared(cells_for(spacing, grid_size)),
    };

    Ok(cells.max(1))
}
