use crate::infra::AppState;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use localisation::calculations::{
    average_annual_car_cost, monthly_cost, mortgage_monthly_payment, CarCategory, CarEngine,
    MonthlyCostResult,
};
use localisation::error::AppError;
use localisation::interview::{Address, Interview};
use localisation::server_update::{
    handles_field, results_field_updates, FieldUpdates, SECTION_ACTIONS_FIELD,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

/// Field change forwarded by the survey host.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServerUpdateRequest {
    pub(crate) interview: Interview,
    /// Response path that changed.
    #[serde(default = "section_actions_field")]
    pub(crate) field: String,
    /// New value of `field`.
    #[serde(default)]
    pub(crate) value: Value,
    /// Set when the host is running on validated data.
    #[serde(default)]
    pub(crate) validated_data: bool,
}

fn section_actions_field() -> String {
    SECTION_ACTIONS_FIELD.to_string()
}

#[derive(Debug, Deserialize)]
pub(crate) struct HousingCostRequest {
    pub(crate) address: Address,
    #[serde(default)]
    pub(crate) interview: Interview,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MortgageRequest {
    pub(crate) principal: f64,
    /// Annual rate as a fraction, 0.05 for 5%.
    pub(crate) annual_rate: f64,
    pub(crate) amortization_months: u32,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MortgageResponse {
    pub(crate) monthly_payment: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CarCostQuery {
    pub(crate) category: CarCategory,
    pub(crate) engine: CarEngine,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CarCostResponse {
    pub(crate) category: CarCategory,
    pub(crate) engine: CarEngine,
    pub(crate) annual_cost: f64,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/server-update", post(server_update_endpoint))
        .route("/api/v1/costs/housing", post(housing_cost_endpoint))
        .route("/api/v1/costs/mortgage", post(mortgage_endpoint))
        .route("/api/v1/costs/car", get(car_cost_endpoint))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn server_update_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<ServerUpdateRequest>,
) -> Json<FieldUpdates> {
    if !handles_field(&payload.field, payload.validated_data) {
        debug!(field = %payload.field, validated = payload.validated_data, "field change ignored");
        return Json(FieldUpdates::new());
    }
    debug!(interview = ?payload.interview.uuid, "server update requested");
    Json(results_field_updates(&state.calculator, &payload.interview, &payload.value).await)
}

pub(crate) async fn housing_cost_endpoint(
    Json(payload): Json<HousingCostRequest>,
) -> Json<MonthlyCostResult> {
    Json(monthly_cost(&payload.address, &payload.interview))
}

pub(crate) async fn mortgage_endpoint(
    Json(payload): Json<MortgageRequest>,
) -> Result<Json<MortgageResponse>, AppError> {
    let monthly_payment = mortgage_monthly_payment(
        payload.principal,
        payload.annual_rate,
        payload.amortization_months,
    )?;
    Ok(Json(MortgageResponse { monthly_payment }))
}

pub(crate) async fn car_cost_endpoint(
    Query(query): Query<CarCostQuery>,
) -> Result<Json<CarCostResponse>, AppError> {
    let annual_cost = average_annual_car_cost(query.category, query.engine)?;
    Ok(Json(CarCostResponse {
        category: query.category,
        engine: query.engine,
        annual_cost,
    }))
}
