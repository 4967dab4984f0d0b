use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum Category {
    Fruit,
    Produce,
    Herb,
    Root,
    Bulb,
    Leafy,
    Pod,
}

/// Read-only catalog record.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    pub name: String,
    /// In-row (on-center) spacing between two plants, in inches.
    pub spacing_inches: f64,
    /// Distance between rows, in inches. Absent for intensively planted crops.
    pub row_spacing_inches: Option<f64>,
    pub category: Category,
}

/// The part of a plant record a planting carries along.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantRef {
    pub id: String,
    pub name: Option<String>,
    pub spacing_inches: f64,
    pub row_spacing_inches: Option<f64>,
}

impl PlantRef {
    /// A plant that fits within a single grid cell.
    pub fn is_dense(&self, grid_size: f64) -> bool {
        self.spacing_inches <= grid_size
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl From<&Plant> for PlantRef {
    fn from(plant: &Plant) -> Self {
        Self {
            id: plant.id.clone(),
            name: Some(plant.name.clone()),
            spacing_inches: plant.spacing_inches,
            row_spacing_inches: plant.row_spacing_inches,
        }
    }
}
