use crate::api::server::AppState;
use actix_web::{
    http::StatusCode,
    web::{self, post, Data},
    HttpResponse, Scope,
};
use log::debug;
use shared::models::api::ErrorResponse;
use shared::models::prediction::PredictionRequest;
use validator::Validate;

async fn predict(app_state: Data<AppState>, request: web::Json<PredictionRequest>) -> HttpResponse {
    let request = request.into_inner();
    if let Err(e) = request.validate() {
        debug!("Rejected system spec: {e}");
        app_state.metrics.record_invalid_request();
        return ErrorResponse::new(
            StatusCode::BAD_REQUEST,
            "Invalid system specifications",
            Some(e.to_string()),
        )
        .into();
    }

    let response = app_state.service.predict(&request.system);
    app_state.metrics.record_prediction(&response);
    HttpResponse::Ok().json(response)
}

pub fn predict_routes() -> Scope {
    web::scope("/predict").route("", post().to(predict))
}
