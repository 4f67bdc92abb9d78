use crate::models::project::{ProjectRequirement, ProjectSummary};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub code: u16,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: impl Into<String>, message: Option<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            message,
            code: status.as_u16(),
            timestamp: Utc::now(),
        }
    }
}

impl From<ErrorResponse> for HttpResponse {
    fn from(response: ErrorResponse) -> Self {
        let status =
            StatusCode::from_u16(response.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(response)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub projects_loaded: usize,
    pub uptime: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProjectsResponse {
    pub projects: Vec<ProjectRequirement>,
    pub total: usize,
    pub summary: ProjectSummary,
}
