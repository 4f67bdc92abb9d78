use crate::api::routes::docs::docs_routes;
use crate::api::routes::health::health_routes;
use crate::api::routes::index::index_resource;
use crate::api::routes::metrics::metrics_routes;
use crate::api::routes::predict::predict_routes;
use crate::api::routes::projects::projects_routes;
use crate::compatibility::CompatibilityService;
use crate::metrics::MetricsContext;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::middleware::{Compress, DefaultHeaders, NormalizePath, TrailingSlash};
use actix_web::{guard, middleware, web, web::Data, App, HttpRequest, HttpResponse, HttpServer};
use actix_web::{Resource, Scope};
use anyhow::Error;
use chrono::{DateTime, Utc};
use log::info;
use shared::models::api::ErrorResponse;
use shared::security::rate_limit_middleware::{RateLimitMiddleware, RateLimiter};
use std::sync::Arc;
use std::time::Duration;

pub const PAYLOAD_LIMIT: usize = 2_097_152;

pub struct AppState {
    pub service: Arc<CompatibilityService>,
    pub metrics: Arc<MetricsContext>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: Arc<CompatibilityService>, metrics: Arc<MetricsContext>) -> Self {
        Self {
            service,
            metrics,
            started_at: Utc::now(),
        }
    }

    pub fn uptime(&self) -> Duration {
        (Utc::now() - self.started_at).to_std().unwrap_or_default()
    }
}

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rate_limit_requests: u32,
    pub rate_limit_window: Duration,
    pub shutdown_timeout: Duration,
}

/// Malformed or mistyped JSON bodies are answered with an `ErrorResponse`
/// instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(PAYLOAD_LIMIT)
        .error_handler(|err, req: &HttpRequest| {
            if let Some(app_state) = req.app_data::<Data<AppState>>() {
                app_state.metrics.record_invalid_request();
            }
            let response: HttpResponse = ErrorResponse::new(
                StatusCode::BAD_REQUEST,
                "Invalid request format",
                Some(err.to_string()),
            )
            .into();
            InternalError::from_response(err, response).into()
        })
}

pub fn api_routes() -> Scope {
    web::scope("/api/v1")
        .app_data(json_config())
        .service(predict_routes())
        .service(health_routes())
        .service(projects_routes())
        .service(docs_routes())
        .service(metrics_routes())
}

pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
}

// Guarded at resource level so non-OPTIONS requests fall through to later services.
pub fn preflight_resource() -> Resource {
    web::resource("/{tail:.*}")
        .guard(guard::Options())
        .to(|| async { HttpResponse::NoContent().finish() })
}

pub async fn not_found() -> HttpResponse {
    ErrorResponse::new(StatusCode::NOT_FOUND, "Resource not found", None).into()
}

pub async fn start_server(
    config: ServerConfig,
    service: Arc<CompatibilityService>,
    metrics: Arc<MetricsContext>,
) -> Result<(), Error> {
    info!("Starting server at http://{}:{}", config.host, config.port);
    let app_state = Data::new(AppState::new(service, metrics));

    let rate_limiter = RateLimiter::new(config.rate_limit_requests, config.rate_limit_window);
    let purge_limiter = rate_limiter.clone();
    let purge_interval = config.rate_limit_window.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(purge_interval);
        loop {
            interval.tick().await;
            purge_limiter.purge_expired();
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(RateLimitMiddleware::new(rate_limiter.clone()))
            .wrap(cors_headers())
            .wrap(middleware::Logger::default())
            .wrap(Compress::default())
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .app_data(web::PayloadConfig::default().limit(PAYLOAD_LIMIT))
            .service(preflight_resource())
            .service(index_resource())
            .service(api_routes())
            .default_service(web::route().to(not_found))
    })
    .shutdown_timeout(config.shutdown_timeout.as_secs())
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::helper::create_test_app_state;
    use actix_web::http::header::ContentType;
    use actix_web::http::Method;
    use actix_web::test::{call_service, init_service, read_body_json, TestRequest};
    use serde_json::json;

    macro_rules! test_app {
        ($app_state:expr) => {
            init_service(
                App::new()
                    .app_data($app_state.clone())
                    .wrap(cors_headers())
                    .wrap(NormalizePath::new(TrailingSlash::Trim))
                    .service(preflight_resource())
                    .service(index_resource())
                    .service(api_routes())
                    .default_service(web::route().to(not_found)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_unknown_route_returns_json_404() {
        let app_state = create_test_app_state();
        let app = test_app!(app_state);

        let req = TestRequest::get().uri("/api/v2/predict").to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = read_body_json(resp).await;
        assert_eq!(body["error"], "Resource not found");
        assert_eq!(body["code"], 404);
    }

    #[actix_web::test]
    async fn test_preflight_returns_no_content_with_cors() {
        let app_state = create_test_app_state();
        let app = test_app!(app_state);

        let req = TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/v1/predict")
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Methods").unwrap(),
            "GET, POST, OPTIONS"
        );
    }

    #[actix_web::test]
    async fn test_get_falls_through_preflight_and_trailing_slash_is_trimmed() {
        let app_state = create_test_app_state();
        let app = test_app!(app_state);

        let req = TestRequest::get().uri("/api/v1/health/").to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("Access-Control-Allow-Headers"));
    }

    #[actix_web::test]
    async fn test_predict_through_full_api() {
        let app_state = create_test_app_state();
        let app = test_app!(app_state);

        let req = TestRequest::post()
            .uri("/api/v1/predict")
            .set_json(json!({
                "system": {
                    "cpu_cores": 4,
                    "ram_gb": 8,
                    "storage_gb": 1000,
                    "network_mbps": 100,
                    "os": "macOS"
                }
            }))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = read_body_json(resp).await;
        assert_eq!(body["summary"]["total_projects"], 3);
        assert_eq!(body["summary"]["compatible_count"], 2);
    }

    #[actix_web::test]
    async fn test_malformed_json_is_rejected_with_error_body() {
        let app_state = create_test_app_state();
        let app = test_app!(app_state);

        let req = TestRequest::post()
            .uri("/api/v1/predict")
            .insert_header(ContentType::json())
            .set_payload("{\"system\": ")
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid request format");
        assert_eq!(body["code"], 400);
        assert_eq!(app_state.metrics.invalid_requests(), 1);
    }

    #[actix_web::test]
    async fn test_rate_limited_response_keeps_cors_and_json_body() {
        let app_state = create_test_app_state();
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let app = init_service(
            App::new()
                .app_data(app_state.clone())
                .wrap(RateLimitMiddleware::new(limiter))
                .wrap(cors_headers())
                .wrap(NormalizePath::new(TrailingSlash::Trim))
                .service(preflight_resource())
                .service(api_routes())
                .default_service(web::route().to(not_found)),
        )
        .await;

        let req = TestRequest::get()
            .uri("/api/v1/health")
            .peer_addr("10.1.1.1:50000".parse().unwrap())
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = TestRequest::get()
            .uri("/api/v1/health")
            .peer_addr("10.1.1.1:50001".parse().unwrap())
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );

        let body: serde_json::Value = read_body_json(resp).await;
        assert_eq!(body["error"], "Rate limit exceeded");
        assert_eq!(body["code"], 429);
    }

    #[test]
    fn test_uptime_is_non_negative() {
        let app_state = create_test_app_state();
        assert!(app_state.uptime() < Duration::from_secs(60));
    }
}
