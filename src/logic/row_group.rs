//! Continuous rows built from edge-adjacent single-cell plantings of the same
//! plant. Groups only ever extend: removing a member does not split a group,
//! callers recompute from scratch when they need exact groups after deletions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{garden::Planting, GridCell};

/// Where a new single-cell planting sits relative to existing rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowContinuity {
    pub row_group_id: String,
    pub segment_index: u32,
    pub total_segments: u32,
    pub is_part_of_row: bool,
    /// Ungrouped neighbours pulled into a newly founded group, with their
    /// segment indices. The caller stores these alongside the new planting.
    pub adopted: Vec<AdoptedSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdoptedSegment {
    pub planting_id: String,
    pub segment_index: u32,
}

fn new_group_id(plant_id: &str, founder: GridCell) -> String {
    format!("row-{plant_id}-{}-{}", founder.x, founder.y)
}

/// Rows are made of single-cell plantings of one plant in one bed.
fn is_row_segment(planting: &Planting, plant_id: &str, bed_id: &str) -> bool {
    planting.space_required == 1 && planting.plant.id == plant_id && planting.bed_id == bed_id
}

pub fn determine_continuity(
    new_position: GridCell,
    plant_id: &str,
    bed_id: &str,
    existing: &[Planting],
) -> RowContinuity {
    let neighbors: Vec<&Planting> = existing
        .iter()
        .filter(|p| is_row_segment(p, plant_id, bed_id) && p.origin.is_edge_adjacent(new_position))
        .collect();

    if neighbors.is_empty() {
        return RowContinuity {
            row_group_id: new_group_id(plant_id, new_position),
            segment_index: 0,
            total_segments: 1,
            is_part_of_row: false,
            adopted: vec![],
        };
    }

    if let Some(group_id) = neighbors.iter().find_map(|p| p.row_group_id.as_deref()) {
        let members: Vec<&Planting> = existing
            .iter()
            .filter(|p| p.bed_id == bed_id && p.row_group_id.as_deref() == Some(group_id))
            .collect();
        let segment_index = members
            .iter()
            .enumerate()
            .map(|(i, p)| p.row_segment_index.unwrap_or(i as u32))
            .max()
            .map_or(0, |max| max + 1);
        log::debug!("{plant_id} at {new_position} extends row {group_id}");
        return RowContinuity {
            row_group_id: group_id.to_string(),
            segment_index,
            total_segments: members.len() as u32 + 1,
            is_part_of_row: true,
            adopted: vec![],
        };
    }

    let founder = neighbors
        .iter()
        .map(|p| p.origin)
        .chain(std::iter::once(new_position))
        .min_by_key(|c| (c.y, c.x))
        .unwrap_or(new_position);
    let adopted: Vec<AdoptedSegment> = neighbors
        .iter()
        .enumerate()
        .map(|(i, p)| AdoptedSegment {
            planting_id: p.id.clone(),
            segment_index: i as u32,
        })
        .collect();
    RowContinuity {
        row_group_id: new_group_id(plant_id, founder),
        segment_index: adopted.len() as u32,
        total_segments: adopted.len() as u32 + 1,
        is_part_of_row: true,
        adopted,
    }
}

/// Display metadata for a group, rebuilt from its plantings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowGroup {
    pub id: String,
    pub bed_id: String,
    pub plant_id: String,
    /// Planting ids ordered by segment index.
    pub members: Vec<String>,
    pub segment_count: u32,
    pub total_length_inches: f64,
}

impl RowGroup {
    /// e.g. `Part of 48″ continuous row (4 segments)`.
    pub fn display_label(&self) -> String {
        describe_row(self.total_length_inches, self.segment_count)
    }
}

pub fn describe_row(total_length_inches: f64, segment_count: u32) -> String {
    let segments = if segment_count == 1 { "segment" } else { "segments" };
    format!("Part of {total_length_inches}″ continuous row ({segment_count} {segments})")
}

/// Groups plantings by bed and `row_group_id`; each cell spans `grid_size` inches.
pub fn row_groups(plantings: &[Planting], grid_size: f64) -> Vec<RowGroup> {
    let mut by_id: BTreeMap<(&str, &str), Vec<&Planting>> = BTreeMap::new();
    for planting in plantings {
        if let Some(id) = planting.row_group_id.as_deref() {
            by_id.entry((planting.bed_id.as_str(), id)).or_default().push(planting);
        }
    }

    by_id
        .into_iter()
        .map(|((bed_id, id), mut members)| {
            members.sort_by_key(|p| p.row_segment_index.unwrap_or(u32::MAX));
            let segment_count = members.len() as u32;
            RowGroup {
                id: id.to_string(),
                bed_id: bed_id.to_string(),
                plant_id: members[0].plant.id.clone(),
                members: members.iter().map(|p| p.id.clone()).collect(),
                segment_count,
                total_length_inches: f64::from(segment_count) * grid_size,
            }
        })
        .collect()
}
