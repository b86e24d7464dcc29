use localisation::calculations::{
    AccessibilityRoutingGateway, CarCategory, CarEngine, ResultsCalculator,
};
use localisation::config::RoutingConfig;
use localisation::error::AppError;
use localisation::interview::Interview;
use localisation::routing::{HttpRoutingService, RoutingService};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) calculator: ResultsCalculator,
}

pub(crate) fn results_calculator(config: &RoutingConfig) -> ResultsCalculator {
    let service: Arc<dyn RoutingService> = Arc::new(HttpRoutingService::new(
        reqwest::Client::new(),
        config.service_url.clone(),
    ));
    ResultsCalculator::new(AccessibilityRoutingGateway::new(
        service,
        config.transit_scenario.clone(),
    ))
}

pub(crate) fn load_interview(path: &Path) -> Result<Interview, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn parse_survey_choice<T: DeserializeOwned>(raw: &str, kind: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_string()))
        .map_err(|_| format!("'{raw}' is not a known {kind}"))
}

pub(crate) fn parse_car_category(raw: &str) -> Result<CarCategory, String> {
    parse_survey_choice(raw, "car category (passengerCar, luxuryCar, pickup, suv)")
}

pub(crate) fn parse_car_engine(raw: &str) -> Result<CarEngine, String> {
    parse_survey_choice(raw, "engine (electric, pluginHybrid, hybrid, gas)")
}
