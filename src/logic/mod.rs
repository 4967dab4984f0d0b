pub mod availability;
pub mod conflict;
pub mod coordinates;
pub mod footprint;
pub mod placement;
pub mod row_group;
pub mod spacing;
