//! Contract of the external transit routing and accessibility service.
//!
//! The service is owned by another system. Calculations only depend on the
//! [`RoutingService`] trait so they can run against the HTTP client in production
//! and against in-memory stubs in tests.

pub mod client;

pub use client::HttpRoutingService;

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use geojson::{Feature, FeatureCollection};
use serde::{Deserialize, Serialize};

/// Travel mode understood by the time and distance endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    Transit,
    Walking,
    Cycling,
    Driving,
}

impl RoutingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RoutingMode::Transit => "transit",
            RoutingMode::Walking => "walking",
            RoutingMode::Cycling => "cycling",
            RoutingMode::Driving => "driving",
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a transit accessibility map request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityMapQuery {
    pub point: Feature,
    pub number_of_polygons: u32,
    pub max_total_travel_time_minutes: u32,
    pub departure_seconds_since_midnight: u32,
    pub transit_scenario: String,
    pub calculate_pois: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccessibilityMapResponse {
    Success {
        polygons: FeatureCollection,
    },
    Error {
        #[serde(default)]
        error: Option<String>,
    },
}

/// Parameters of a time and distance request between two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeDistanceQuery {
    pub origin: Feature,
    pub destination: Feature,
    pub departure_seconds_since_midnight: u32,
    /// Departure date formatted as `YYYY-MM-DD`.
    pub departure_date_string: String,
    pub transit_scenario: String,
}

/// Per-mode outcome reported by the time and distance endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModeRoutingResponse {
    Success {
        #[serde(rename = "distanceM")]
        distance_m: f64,
        #[serde(rename = "travelTimeS")]
        travel_time_s: f64,
    },
    NoRoutingFound,
    Error {
        #[serde(default)]
        error: Option<String>,
    },
}

pub type TimeDistanceByMode = BTreeMap<RoutingMode, ModeRoutingResponse>;

#[async_trait]
pub trait RoutingService: Send + Sync {
    async fn transit_accessibility_map(
        &self,
        query: &AccessibilityMapQuery,
    ) -> Result<AccessibilityMapResponse, RoutingServiceError>;

    /// Travel time and distance for every requested mode.
    async fn time_distance_by_mode(
        &self,
        modes: &[RoutingMode],
        query: &TimeDistanceQuery,
    ) -> Result<TimeDistanceByMode, RoutingServiceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RoutingServiceError {
    #[error("routing service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("routing service answered with status {status}")]
    Status { status: u16 },
    #[error("routing service unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mode_responses_parse_by_status() {
        let body = json!({
            "transit": { "status": "success", "distanceM": 5400.0, "travelTimeS": 1260 },
            "walking": { "status": "no_routing_found" },
            "driving": { "status": "error", "error": "timeout" }
        });

        let parsed: TimeDistanceByMode = serde_json::from_value(body).expect("response parses");
        assert_eq!(
            parsed.get(&RoutingMode::Transit),
            Some(&ModeRoutingResponse::Success {
                distance_m: 5400.0,
                travel_time_s: 1260.0,
            })
        );
        assert_eq!(
            parsed.get(&RoutingMode::Walking),
            Some(&ModeRoutingResponse::NoRoutingFound)
        );
        assert!(matches!(
            parsed.get(&RoutingMode::Driving),
            Some(ModeRoutingResponse::Error { error: Some(_) })
        ));
        assert!(!parsed.contains_key(&RoutingMode::Cycling));
    }

    #[test]
    fn accessibility_error_status_parses_without_message() {
        let parsed: AccessibilityMapResponse =
            serde_json::from_value(json!({ "status": "error" })).expect("response parses");
        assert_eq!(parsed, AccessibilityMapResponse::Error { error: None });
    }
}
