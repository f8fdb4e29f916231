use actix_web::{http::header, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::catalog::CatalogItemRequest,
    errors::AppError,
    use_cases::extractors::RequestContext,
    utils::valid_id::valid_id,
    AppState,
};

// ───── Types ────────────────────────────────────────────────────────────

#[instrument(skip(ctx, state), fields(actor = %ctx.subject))]
pub async fn list_types(
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let types = state.catalog_handler.list_types(&ctx).await?;
    Ok(HttpResponse::Ok().json(types))
}

#[instrument(skip(ctx, state, data), fields(actor = %ctx.subject))]
pub async fn store_type(
    ctx: RequestContext,
    state: web::Data<AppState>,
    data: web::Json<CatalogItemRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.catalog_handler.store_type(&ctx, data.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, response.redirect_to.clone()))
        .json(response))
}

#[instrument(skip(ctx, state), fields(actor = %ctx.subject))]
pub async fn show_type(
    ctx: RequestContext,
    type_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_id(&type_id, "Type")?;
    let project_type = state.catalog_handler.show_type(&ctx, id).await?;
    Ok(HttpResponse::Ok().json(project_type))
}

#[instrument(skip(ctx, state, data), fields(actor = %ctx.subject))]
pub async fn update_type(
    ctx: RequestContext,
    type_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<CatalogItemRequest>,
) -> Result<impl Responder, AppError> {
    let id = valid_id(&type_id, "Type")?;
    let response = state.catalog_handler.update_type(&ctx, id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(ctx, state), fields(actor = %ctx.subject))]
pub async fn destroy_type(
    ctx: RequestContext,
    type_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_id(&type_id, "Type")?;
    let response = state.catalog_handler.destroy_type(&ctx, id).await?;
    Ok(HttpResponse::Ok().json(response))
}

// ───── Technologies ─────────────────────────────────────────────────────

#[instrument(skip(ctx, state), fields(actor = %ctx.subject))]
pub async fn list_technologies(
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let technologies = state.catalog_handler.list_technologies(&ctx).await?;
    Ok(HttpResponse::Ok().json(technologies))
}

#[instrument(skip(ctx, state, data), fields(actor = %ctx.subject))]
pub async fn store_technology(
    ctx: RequestContext,
    state: web::Data<AppState>,
    data: web::Json<CatalogItemRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.catalog_handler.store_technology(&ctx, data.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, response.redirect_to.clone()))
        .json(response))
}

#[instrument(skip(ctx, state), fields(actor = %ctx.subject))]
pub async fn show_technology(
    ctx: RequestContext,
    technology_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_id(&technology_id, "Technology")?;
    let technology = state.catalog_handler.show_technology(&ctx, id).await?;
    Ok(HttpResponse::Ok().json(technology))
}

#[instrument(skip(ctx, state, data), fields(actor = %ctx.subject))]
pub async fn update_technology(
    ctx: RequestContext,
    technology_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<CatalogItemRequest>,
) -> Result<impl Responder, AppError> {
    let id = valid_id(&technology_id, "Technology")?;
    let response = state.catalog_handler.update_technology(&ctx, id, data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(ctx, state), fields(actor = %ctx.subject))]
pub async fn destroy_technology(
    ctx: RequestContext,
    technology_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_id(&technology_id, "Technology")?;
    let response = state.catalog_handler.destroy_technology(&ctx, id).await?;
    Ok(HttpResponse::Ok().json(response))
}
