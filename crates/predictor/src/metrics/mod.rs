use prometheus::{GaugeVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use shared::models::prediction::PredictionResponse;

const OUTCOME_OK: &str = "ok";
const OUTCOME_INVALID: &str = "invalid";

pub struct MetricsContext {
    pub requests_total: IntCounterVec,
    pub projects_loaded: IntGauge,
    pub compatibility_rate: GaugeVec,
    pub registry: Registry,
}

impl MetricsContext {
    pub fn new() -> Result<Self, prometheus::Error> {
        let requests_total = IntCounterVec::new(
            Opts::new("predictor_requests_total", "Prediction requests by outcome"),
            &["outcome"],
        )?;
        let projects_loaded =
            IntGauge::new("predictor_projects_loaded", "Projects in the loaded catalog")?;
        // Last observed rate per system tier
        let compatibility_rate = GaugeVec::new(
            Opts::new(
                "predictor_compatibility_rate",
                "Compatibility rate of the latest prediction per system rating",
            ),
            &["system_rating"],
        )?;

        let registry = Registry::new();
        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(projects_loaded.clone()))?;
        registry.register(Box::new(compatibility_rate.clone()))?;

        Ok(Self {
            requests_total,
            projects_loaded,
            compatibility_rate,
            registry,
        })
    }

    pub fn set_projects_loaded(&self, count: usize) {
        self.projects_loaded
            .set(i64::try_from(count).unwrap_or(i64::MAX));
    }

    pub fn record_prediction(&self, response: &PredictionResponse) {
        self.requests_total.with_label_values(&[OUTCOME_OK]).inc();
        self.compatibility_rate
            .with_label_values(&[response.summary.system_rating.as_str()])
            .set(response.summary.compatibility_rate);
    }

    pub fn record_invalid_request(&self) {
        self.requests_total.with_label_values(&[OUTCOME_INVALID]).inc();
    }

    pub fn predictions_served(&self) -> u64 {
        self.requests_total.with_label_values(&[OUTCOME_OK]).get()
    }

    pub fn invalid_requests(&self) -> u64 {
        self.requests_total
            .with_label_values(&[OUTCOME_INVALID])
            .get()
    }

    pub fn export_metrics(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode_to_string(&metric_families)
    }
}
