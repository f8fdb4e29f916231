use actix_web::{FromRequest, HttpRequest, HttpMessage};
use futures_util::future::{ready, Ready};
use crate::{entities::token::Claims, errors::AuthError};

/// Identity of the caller, handed explicitly to every project operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub subject: String,
    pub email: String,
}

impl RequestContext {
    pub fn new(subject: impl Into<String>, email: impl Into<String>) -> Self {
        RequestContext {
            subject: subject.into(),
            email: email.into(),
        }
    }
}

impl From<&Claims> for RequestContext {
    fn from(claims: &Claims) -> Self {
        RequestContext::new(claims.sub.clone(), claims.email.clone())
    }
}

/// Builds a [`RequestContext`] from admin claims left by the auth middleware.
/// Returns 403 for non-admin claims and 401 when no claims are present.
impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) if claims.admin => {
                ready(Ok(RequestContext::from(claims)))
            }
            Some(_) => {
                ready(Err(AuthError::Forbidden("Admin access required".into()).into()))
            }
            None => {
                ready(Err(AuthError::MissingCredentials.into()))
            }
        }
    }
}
