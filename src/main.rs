use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use garden_grid::{
    api::{openapi::ApiDoc, routes},
    config::AppConfig,
    models::request::ErrorResponse,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env();
    env_logger::Builder::from_env(Env::default().default_filter_or(&config.log_filter)).init();

    let bind_addr = config.bind_addr.clone();
    let json_limit = config.json_limit_bytes;
    log::info!("Garden grid API started at http://{bind_addr}");
    log::info!("  GET  /api/plants");
    log::info!("  GET  /api/plants/{{id}}");
    log::info!("  POST /api/grid/labels/validate");
    log::info!("  POST /api/placements/auto");
    log::info!("  POST /api/placements/check");
    log::info!("  POST /api/placements/row-continuity");
    log::info!("  POST /api/beds/availability");
    log::info!("  Swagger UI → http://{bind_addr}/swagger-ui/");
    log::info!("  OpenAPI spec → http://{bind_addr}/api-docs/openapi.json");

    let openapi = ApiDoc::openapi();
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()))
            .app_data(web::JsonConfig::default().limit(json_limit).error_handler(|err, _req| {
                let message = format!("JSON deserialization error: {err}");
                log::debug!("{message}");
                actix_web::error::InternalError::from_response(
                    err,
                    actix_web::HttpResponse::BadRequest().json(ErrorResponse { error: message }),
                )
                .into()
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
