use crate::api::server::AppState;
use crate::VERSION;
use actix_web::{
    web::{self, get, Data},
    HttpResponse, Scope,
};
use chrono::Utc;
use shared::models::api::HealthResponse;
use std::time::Duration;

/// Renders an uptime such as `1h2m3s`, dropping leading zero units.
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

async fn health(app_state: Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
        projects_loaded: app_state.service.catalog().len(),
        uptime: format_uptime(app_state.uptime()),
        timestamp: Utc::now(),
    })
}

pub fn health_routes() -> Scope {
    web::scope("/health").route("", get().to(health))
}
