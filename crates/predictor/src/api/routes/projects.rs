use crate::api::server::AppState;
use actix_web::{
    web::{self, get, Data},
    HttpResponse, Scope,
};
use shared::models::api::ProjectsResponse;

async fn list_projects(app_state: Data<AppState>) -> HttpResponse {
    let catalog = app_state.service.catalog();
    HttpResponse::Ok().json(ProjectsResponse {
        projects: catalog.projects().to_vec(),
        total: catalog.len(),
        summary: catalog.summary(),
    })
}

pub fn projects_routes() -> Scope {
    web::scope("/projects").route("", get().to(list_projects))
}
