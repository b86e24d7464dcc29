use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use crate::calculations::{AccessibilityRoutingGateway, ResultsCalculator};
use crate::interview::{Address, Destination, Interview, Ownership};
use crate::routing::{
    AccessibilityMapQuery, AccessibilityMapResponse, ModeRoutingResponse, RoutingMode,
    RoutingService, RoutingServiceError, TimeDistanceByMode, TimeDistanceQuery,
};

pub(super) const SCENARIO: &str = "6fff51a9-b6d9-464e-bf2b-eeae574ac75e";

pub(super) fn point(x: f64, y: f64, label: &str) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("label".to_string(), json!(label));
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![x, y]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub(super) fn polygons() -> FeatureCollection {
    let square = Geometry::new(Value::MultiPolygon(vec![vec![vec![
        vec![-73.51, 45.51],
        vec![-73.49, 45.51],
        vec![-73.49, 45.49],
        vec![-73.51, 45.49],
        vec![-73.51, 45.51],
    ]]]));
    FeatureCollection {
        bbox: None,
        features: vec![Feature {
            bbox: None,
            geometry: Some(square),
            id: None,
            properties: None,
            foreign_members: None,
        }],
        foreign_members: None,
    }
}

pub(super) fn rent_address(uuid: &str, sequence: i64, rent: f64) -> Address {
    Address {
        sequence,
        uuid: uuid.to_string(),
        geography: Some(point(-73.5, 45.5, uuid)),
        ownership: Some(Ownership::Rent),
        rent: Some(rent),
        are_utilities_included: Some(true),
        ..Address::default()
    }
}

pub(super) fn buy_address(uuid: &str, sequence: i64) -> Address {
    Address {
        sequence,
        uuid: uuid.to_string(),
        geography: Some(point(-73.6, 45.52, uuid)),
        ownership: Some(Ownership::Buy),
        mortgage: Some(300_000.0),
        interest_rate: Some(5.0),
        amortization_period: Some("25".to_string()),
        taxes: Some(3_600.0),
        utilities: Some(200.0),
        ..Address::default()
    }
}

pub(super) fn destination(uuid: &str, sequence: i64) -> Destination {
    Destination {
        sequence,
        uuid: uuid.to_string(),
        name: Some(format!("Place {uuid}")),
        geography: Some(point(-73.56, 45.50, uuid)),
        frequency: Some("daily".to_string()),
    }
}

pub(super) fn interview(addresses: &[Address], destinations: &[Destination]) -> Interview {
    let addresses: serde_json::Map<String, serde_json::Value> = addresses
        .iter()
        .map(|address| {
            (
                address.uuid.clone(),
                serde_json::to_value(address).expect("address serializes"),
            )
        })
        .collect();
    let destinations: serde_json::Map<String, serde_json::Value> = destinations
        .iter()
        .map(|destination| {
            (
                destination.uuid.clone(),
                serde_json::to_value(destination).expect("destination serializes"),
            )
        })
        .collect();

    Interview::from_response(json!({
        "household": { "income": 60000 },
        "addresses": addresses,
        "destinations": destinations,
    }))
}

pub(super) fn all_modes_succeed() -> TimeDistanceByMode {
    [
        (RoutingMode::Driving, 6_100.0, 720.0),
        (RoutingMode::Cycling, 5_600.0, 1_260.0),
        (RoutingMode::Walking, 5_200.0, 3_900.0),
        (RoutingMode::Transit, 5_900.0, 1_500.0),
    ]
    .into_iter()
    .map(|(mode, distance_m, travel_time_s)| {
        (
            mode,
            ModeRoutingResponse::Success {
                distance_m,
                travel_time_s,
            },
        )
    })
    .collect()
}

#[derive(Debug, Clone)]
pub(super) enum AccessibilityBehavior {
    Polygons,
    ErrorStatus,
    Unavailable,
    Panic,
}

#[derive(Debug, Clone)]
pub(super) enum RouteBehavior {
    Modes(TimeDistanceByMode),
    Unavailable,
    Panic,
}

/// In-memory routing service keyed on the `label` property of destination points.
#[derive(Debug)]
pub(super) struct StubRoutingService {
    accessibility: AccessibilityBehavior,
    routes: HashMap<String, RouteBehavior>,
    accessibility_queries: Mutex<Vec<AccessibilityMapQuery>>,
    time_distance_queries: Mutex<Vec<(Vec<RoutingMode>, TimeDistanceQuery)>>,
}

impl StubRoutingService {
    pub(super) fn new(accessibility: AccessibilityBehavior) -> Self {
        Self {
            accessibility,
            routes: HashMap::new(),
            accessibility_queries: Mutex::new(Vec::new()),
            time_distance_queries: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn with_route(mut self, label: &str, behavior: RouteBehavior) -> Self {
        self.routes.insert(label.to_string(), behavior);
        self
    }

    pub(super) fn accessibility_queries(&self) -> Vec<AccessibilityMapQuery> {
        self.accessibility_queries
            .lock()
            .expect("query mutex poisoned")
            .clone()
    }

    pub(super) fn time_distance_queries(&self) -> Vec<(Vec<RoutingMode>, TimeDistanceQuery)> {
        self.time_distance_queries
            .lock()
            .expect("query mutex poisoned")
            .clone()
    }

    pub(super) fn call_count(&self) -> usize {
        self.accessibility_queries().len() + self.time_distance_queries().len()
    }
}

fn label(feature: &Feature) -> String {
    feature
        .properties
        .as_ref()
        .and_then(|properties| properties.get("label"))
        .and_then(|label| label.as_str())
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl RoutingService for StubRoutingService {
    async fn transit_accessibility_map(
        &self,
        query: &AccessibilityMapQuery,
    ) -> Result<AccessibilityMapResponse, RoutingServiceError> {
        self.accessibility_queries
            .lock()
            .expect("query mutex poisoned")
            .push(query.clone());

        match self.accessibility {
            AccessibilityBehavior::Polygons => Ok(AccessibilityMapResponse::Success {
                polygons: polygons(),
            }),
            AccessibilityBehavior::ErrorStatus => Ok(AccessibilityMapResponse::Error {
                error: Some("no transit nodes nearby".to_string()),
            }),
            AccessibilityBehavior::Unavailable => Err(RoutingServiceError::Unavailable(
                "connection refused".to_string(),
            )),
            AccessibilityBehavior::Panic => panic!("accessibility backend crashed"),
        }
    }

    async fn time_distance_by_mode(
        &self,
        modes: &[RoutingMode],
        query: &TimeDistanceQuery,
    ) -> Result<TimeDistanceByMode, RoutingServiceError> {
        self.time_distance_queries
            .lock()
            .expect("query mutex poisoned")
            .push((modes.to_vec(), query.clone()));

        match self.routes.get(&label(&query.destination)) {
            None => Ok(all_modes_succeed()),
            Some(RouteBehavior::Modes(by_mode)) => Ok(by_mode.clone()),
            Some(RouteBehavior::Unavailable) => Err(RoutingServiceError::Status { status: 503 }),
            Some(RouteBehavior::Panic) => panic!("routing backend crashed"),
        }
    }
}

pub(super) fn gateway(service: &Arc<StubRoutingService>) -> AccessibilityRoutingGateway {
    let service: Arc<dyn RoutingService> = service.clone();
    AccessibilityRoutingGateway::new(service, Some(SCENARIO.to_string()))
}

pub(super) fn calculator(service: &Arc<StubRoutingService>) -> ResultsCalculator {
    ResultsCalculator::new(gateway(service))
}
