use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{entities::token::Claims, errors::AuthError, AppState};

const ADMIN_PREFIX: &str = "/admin";

/// Requires a valid admin bearer token on every `/admin` path and stores the
/// decoded [`Claims`] in the request extensions.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path(), req.method().as_str()) {
                return service.call(req).await;
            }

            let claims = match get_valid_claims(&req) {
                Ok(claims) => claims,
                Err(AuthError::MissingCredentials) => {
                    tracing::warn!(path = %req.path(), "Missing or malformed Authorization header");
                    return Ok(custom_error_response(req, HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "Missing or invalid credentials"
                    }))));
                }
                Err(AuthError::MissingJwtService) => {
                    tracing::error!("AppState missing in middleware");
                    return Ok(custom_error_response(req, HttpResponse::InternalServerError().json(serde_json::json!({
                        "error": "Internal server error"
                    }))));
                }
                Err(e) => {
                    tracing::warn!(path = %req.path(), "Rejected bearer token: {}", e);
                    return Ok(custom_error_response(req, HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": e.to_string()
                    }))));
                }
            };

            if !claims.admin {
                tracing::warn!(subject = %claims.sub, path = %req.path(), "Admin access required");
                return Ok(custom_error_response(req, HttpResponse::Forbidden().json(serde_json::json!({
                    "error": "Admin access required"
                }))));
            }

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    path != ADMIN_PREFIX && !path.starts_with("/admin/")
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn get_valid_claims(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let state = req.app_data::<web::Data<AppState>>()
        .ok_or(AuthError::MissingJwtService)?;

    let token = extract_token(req).ok_or(AuthError::MissingCredentials)?;
    let decoded = state.token_service.decode_jwt(&token)?;
    Ok(decoded.claims)
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}
