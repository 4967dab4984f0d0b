use actix_web::web;

use crate::api::handlers::{
    beds::post_availability,
    grid::post_validate_label,
    placement::{post_auto_place, post_check_placement, post_row_continuity},
    plants::{get_plant, list_plants},
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(list_plants)
            .service(get_plant)
            .service(post_validate_label)
            .service(post_auto_place)
            .service(post_check_placement)
            .service(post_row_continuity)
            .service(post_availability),
    );
}
