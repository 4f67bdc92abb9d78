use crate::{SERVICE_NAME, VERSION};
use actix_web::{web, HttpResponse, Resource};
use serde_json::json;

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": SERVICE_NAME,
        "version": VERSION,
        "docs": "/api/v1/docs",
        "health": "/api/v1/health"
    }))
}

pub fn index_resource() -> Resource {
    web::resource("/").route(web::get().to(index))
}
