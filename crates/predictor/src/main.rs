use anyhow::Result;
use clap::Parser;
use log::{debug, error, info, LevelFilter};
use predictor::api::server::{start_server, ServerConfig};
use predictor::catalog;
use predictor::compatibility::CompatibilityService;
use predictor::metrics::MetricsContext;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(version, about = "Predicts which DePIN projects a machine can run")]
struct Args {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(short = 'p', long, env = "PORT", default_value = "8080")]
    port: u16,

    /// CSV catalog of project requirements
    #[arg(short = 'd', long, env = "DATA_PATH", default_value = "./data/depin_specs.csv")]
    data_path: String,

    #[arg(short = 'l', long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Requests allowed per client within one rate limit window
    #[arg(long, env = "RATE_LIMIT_REQUESTS", default_value = "100")]
    rate_limit_requests: u32,

    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value = "60")]
    rate_limit_window_secs: u64,

    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value = "30")]
    shutdown_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = match args.log_level.as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    debug!("Log level: {log_level}");
    debug!("Data path: {}", args.data_path);

    let catalog = catalog::load_from_path(&args.data_path).unwrap_or_else(|err| {
        error!("Failed to load project catalog: {err}");
        std::process::exit(1);
    });

    let summary = catalog.summary();
    info!(
        "Catalog ready: {} projects, {} home friendly, {} requiring a GPU",
        catalog.len(),
        summary.home_friendly,
        summary.gpu_required
    );
    for (project_type, count) in &summary.by_type {
        debug!("  {project_type}: {count}");
    }

    let metrics = Arc::new(MetricsContext::new()?);
    metrics.set_projects_loaded(catalog.len());
    let service = Arc::new(CompatibilityService::new(catalog));

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        rate_limit_requests: args.rate_limit_requests,
        rate_limit_window: Duration::from_secs(args.rate_limit_window_secs),
        shutdown_timeout: Duration::from_secs(args.shutdown_timeout_secs),
    };

    start_server(config, service, metrics).await?;
    info!("Server stopped");
    Ok(())
}
