use crate::{SERVICE_NAME, VERSION};
use actix_web::{
    web::{self, get},
    HttpResponse, Scope,
};
use serde_json::json;

async fn docs() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": SERVICE_NAME,
        "version": VERSION,
        "description": "Predicts DePIN compatibility based on consumer system specifications",
        "endpoints": {
            "POST /api/v1/predict": {
                "description": "Predict DePIN compatibility for a system",
                "example_request": {
                    "system": {
                        "cpu_cores": 8,
                        "ram_gb": 16,
                        "storage_gb": 512,
                        "has_ssd": true,
                        "has_gpu": true,
                        "gpu_vram_gb": 8,
                        "network_mbps": 100,
                        "os": "Windows"
                    }
                }
            },
            "GET /api/v1/health": { "description": "Service health check" },
            "GET /api/v1/projects": { "description": "List all DePIN projects" },
            "GET /api/v1/metrics": { "description": "Service metrics" },
            "GET /api/v1/metrics/prometheus": { "description": "Service metrics in Prometheus text format" }
        },
        "system_requirements": {
            "cpu_cores": "Number of CPU cores (1-64)",
            "ram_gb": "RAM in GB (1-128)",
            "storage_gb": "Storage in GB (32-8192)",
            "has_ssd": "Boolean - SSD storage",
            "has_gpu": "Boolean - Dedicated GPU",
            "gpu_vram_gb": "GPU VRAM in GB (0-48)",
            "network_mbps": "Network speed in Mbps (1-10000)",
            "os": "Operating system (Windows/Linux/macOS)"
        },
        "compatibility_scores": {
            "excellent": "0.9 - 1.0",
            "good": "0.7 - 0.89",
            "fair": "0.5 - 0.69",
            "poor": "0.0 - 0.49"
        }
    }))
}

pub fn docs_routes() -> Scope {
    web::scope("/docs").route("", get().to(docs))
}
