use actix_web::{web, get, HttpResponse, Responder};
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;

use crate::{constants::START_TIME, repositories::project::ProjectRepository, AppState};

#[derive(Serialize)]
struct HealthCheckResponse {
    status: &'static str,
    uptime: String,
    timestamp: String,
    start_at: String,
    database: &'static str,
    version: &'static str,
}

#[get("/health")]
pub async fn admin_health_check(state: web::Data<AppState>) -> impl Responder {
    let now_utc = chrono::Utc::now();
    let uptime = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    let database = match state.project_handler.project_repo.check_connection().await {
        Ok(_) => "OK",
        Err(e) => {
            tracing::warn!("Health check database query failed: {}", e);
            "Unavailable"
        }
    };

    let response = HealthCheckResponse {
        status: if database == "OK" { "healthy" } else { "degraded" },
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        start_at: START_TIME.to_rfc3339(),
        database,
        version: env!("CARGO_PKG_VERSION"),
    };

    if database == "OK" {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
