use actix_web::web;

use crate::handlers::projects;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::get().to(projects::list_projects))
                    .route(web::post().to(projects::store_project))
            )
            // must precede "/{project_id}"
            .service(
                web::resource("/create")
                    .route(web::get().to(projects::create_project_form))
            )
            .service(
                web::resource("/{project_id}")
                    .route(web::get().to(projects::show_project))
                    .route(web::put().to(projects::update_project))
                    .route(web::patch().to(projects::update_project))
                    .route(web::delete().to(projects::destroy_project))
            )
            .service(
                web::resource("/{project_id}/edit")
                    .route(web::get().to(projects::edit_project_form))
            )
            .service(
                web::resource("/{project_id}/restore")
                    .route(web::patch().to(projects::restore_project))
            )
    );
}
