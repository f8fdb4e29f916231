use actix_web::web;

use crate::handlers::{catalog, system::admin_health_check};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(admin_health_check)
        .service(
            web::scope("/types")
                .service(
                    web::resource("")
                        .route(web::get().to(catalog::list_types))
                        .route(web::post().to(catalog::store_type))
                )
                .service(
                    web::resource("/{type_id}")
                        .route(web::get().to(catalog::show_type))
                        .route(web::put().to(catalog::update_type))
                        .route(web::patch().to(catalog::update_type))
                        .route(web::delete().to(catalog::destroy_type))
                )
        )
        .service(
            web::scope("/technologies")
                .service(
                    web::resource("")
                        .route(web::get().to(catalog::list_technologies))
                        .route(web::post().to(catalog::store_technology))
                )
                .service(
                    web::resource("/{technology_id}")
                        .route(web::get().to(catalog::show_technology))
                        .route(web::put().to(catalog::update_technology))
                        .route(web::patch().to(catalog::update_technology))
                        .route(web::delete().to(catalog::destroy_technology))
                )
        );
}
