use actix_web::{
    web,
    http::StatusCode,
    ResponseError,
    HttpResponse,
    error::JsonPayloadError,
};
use serde_json::json;

const MAX_JSON_PAYLOAD_BYTES: usize = 64 * 1024;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(MAX_JSON_PAYLOAD_BYTES)
            .error_handler(|err, req| {
                tracing::warn!(path = %req.path(), "Rejected JSON payload: {}", err);
                JsonError::from(err).into()
            })
    );
}

/// Body that never reached validation: wrong content type, oversized or malformed JSON.
#[derive(Debug)]
pub struct JsonError {
    message: String,
    status: StatusCode
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status).json(json!({ "error": self.message }))
    }
}

impl From<JsonPayloadError> for JsonError {
    fn from(err: JsonPayloadError) -> Self {
        let status = match &err {
            JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };

        JsonError {
            message: format!("JSON payload error: {}", err),
            status,
        }
    }
}
