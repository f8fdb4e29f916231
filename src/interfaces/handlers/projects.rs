use actix_web::{http::header, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::project::ProjectRequest,
    errors::AppError,
    use_cases::extractors::RequestContext,
    utils::valid_id::valid_id,
    AppState,
};

#[instrument(skip(ctx, state), fields(actor = %ctx.subject))]
pub async fn list_projects(
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list(&ctx).await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(ctx, state), fields(actor = %ctx.subject))]
pub async fn create_project_form(
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let form = state.project_handler.create_form(&ctx).await?;
    Ok(HttpResponse::Ok().json(form))
}

#[instrument(skip(ctx, state, data), fields(actor = %ctx.subject))]
pub async fn store_project(
    ctx: RequestContext,
    state: web::Data<AppState>,
    data: web::Json<ProjectRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.project_handler.store(&ctx, data.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, response.redirect_to.clone()))
        .json(response))
}

#[instrument(skip(ctx, state), fields(actor = %ctx.subject))]
pub async fn show_project(
    ctx: RequestContext,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_id(&project_id, "Project")?;
    let project = state.project_handler.show(&ctx, id).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(ctx, state), fields(actor = %ctx.subject))]
pub async fn edit_project_form(
    ctx: RequestContext,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_id(&project_id, "Project")?;
    let form = state.project_handler.edit_form(&ctx, id).await?;
    Ok(HttpResponse::Ok().json(form))
}

#[instrument(skip(ctx, state, data), fields(actor = %ctx.subject))]
pub async fn update_project(
    ctx: RequestContext,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ProjectRequest>,
) -> Result<impl Responder, AppError> {
    let id = valid_id(&project_id, "Project")?;
    let response = state.project_handler.update(&ctx, id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(ctx, state), fields(actor = %ctx.subject))]
pub async fn destroy_project(
    ctx: RequestContext,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_id(&project_id, "Project")?;
    let response = state.project_handler.destroy(&ctx, id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(ctx, state), fields(actor = %ctx.subject))]
pub async fn restore_project(
    ctx: RequestContext,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_id(&project_id, "Project")?;
    let response = state.project_handler.restore(&ctx, id).await?;
    Ok(HttpResponse::Ok().json(response))
}
