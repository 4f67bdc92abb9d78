use crate::api::server::AppState;
use crate::VERSION;
use actix_web::{
    web::{self, get, Data},
    HttpResponse, Scope,
};
use chrono::Utc;
use serde_json::json;

async fn get_metrics(app_state: Data<AppState>) -> HttpResponse {
    let catalog = app_state.service.catalog();
    let summary = catalog.summary();
    HttpResponse::Ok().json(json!({
        "service_info": {
            "name": "depin_compatibility_api",
            "version": VERSION,
            "uptime_seconds": app_state.uptime().as_secs_f64()
        },
        "projects_loaded_total": catalog.len(),
        "projects_by_type": summary.by_type,
        "projects_by_cost": summary.by_cost_category,
        "projects_home_friendly": summary.home_friendly,
        "projects_gpu_required": summary.gpu_required,
        "predictions_served_total": app_state.metrics.predictions_served(),
        "invalid_requests_total": app_state.metrics.invalid_requests(),
        "timestamp": Utc::now().timestamp()
    }))
}

async fn get_prometheus_metrics(app_state: Data<AppState>) -> HttpResponse {
    match app_state.metrics.export_metrics() {
        Ok(metrics) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(metrics),
        Err(e) => HttpResponse::InternalServerError().json(json!({
            "error": format!("Failed to export metrics: {e}")
        })),
    }
}

pub fn metrics_routes() -> Scope {
    web::scope("/metrics")
        .route("", get().to(get_metrics))
        .route("/prometheus", get().to(get_prometheus_metrics))
}
