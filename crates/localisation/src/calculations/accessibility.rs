use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::interview::{Address, Destination};
use crate::routing::{
    AccessibilityMapQuery, AccessibilityMapResponse, ModeRoutingResponse, RoutingMode,
    RoutingService, TimeDistanceQuery,
};

pub const ACCESSIBILITY_POLYGON_COUNT: u32 = 1;
pub const MAX_TRAVEL_TIME_MINUTES: u32 = 30;
/// 8 AM.
pub const DEPARTURE_SECONDS_SINCE_MIDNIGHT: u32 = 8 * 3600;

/// Modes requested for every destination. The position of a mode in this list is
/// the `_sequence` of its result.
pub const CALCULATION_MODES: [RoutingMode; 4] = [
    RoutingMode::Transit,
    RoutingMode::Walking,
    RoutingMode::Cycling,
    RoutingMode::Driving,
];

/// Travel estimate for a single mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeTimeDistance {
    #[serde(rename = "_uuid")]
    pub mode: RoutingMode,
    #[serde(rename = "_sequence")]
    pub sequence: u32,
    pub distance_meters: f64,
    pub travel_time_seconds: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsByMode {
    pub walking: Option<ModeTimeDistance>,
    pub cycling: Option<ModeTimeDistance>,
    pub driving: Option<ModeTimeDistance>,
    pub transit: Option<ModeTimeDistance>,
}

impl ResultsByMode {
    pub fn get(&self, mode: RoutingMode) -> Option<&ModeTimeDistance> {
        match mode {
            RoutingMode::Walking => self.walking.as_ref(),
            RoutingMode::Cycling => self.cycling.as_ref(),
            RoutingMode::Driving => self.driving.as_ref(),
            RoutingMode::Transit => self.transit.as_ref(),
        }
    }

    fn slot_mut(&mut self, mode: RoutingMode) -> &mut Option<ModeTimeDistance> {
        match mode {
            RoutingMode::Walking => &mut self.walking,
            RoutingMode::Cycling => &mut self.cycling,
            RoutingMode::Driving => &mut self.driving,
            RoutingMode::Transit => &mut self.transit,
        }
    }
}

/// Travel estimates from one address to one destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingResult {
    #[serde(rename = "_uuid")]
    pub destination_uuid: String,
    #[serde(rename = "_sequence")]
    pub destination_sequence: i64,
    pub results_by_mode: ResultsByMode,
}

/// Entry point to the routing service for accessibility maps and per-mode travel
/// estimates. Every failure is logged and reported as `None`.
#[derive(Clone)]
pub struct AccessibilityRoutingGateway {
    service: Arc<dyn RoutingService>,
    scenario: Option<String>,
}

impl AccessibilityRoutingGateway {
    /// `scenario` is the weekday transit scenario. Without it no request is sent.
    pub fn new(service: Arc<dyn RoutingService>, scenario: Option<String>) -> Self {
        Self { service, scenario }
    }

    pub fn scenario(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    /// Area reachable by transit from the address within the travel time budget.
    pub async fn accessibility_polygons(&self, address: &Address) -> Option<FeatureCollection> {
        let Some(point) = address.geography.clone() else {
            warn!(address = %address.uuid, "no geography for accessibility map");
            return None;
        };
        let Some(scenario) = self.scenario.clone() else {
            error!("no transit scenario configured for accessibility map");
            return None;
        };

        let query = AccessibilityMapQuery {
            point,
            number_of_polygons: ACCESSIBILITY_POLYGON_COUNT,
            max_total_travel_time_minutes: MAX_TRAVEL_TIME_MINUTES,
            departure_seconds_since_midnight: DEPARTURE_SECONDS_SINCE_MIDNIGHT,
            transit_scenario: scenario,
            calculate_pois: true,
        };

        match self.service.transit_accessibility_map(&query).await {
            Ok(AccessibilityMapResponse::Success { polygons }) => Some(polygons),
            Ok(AccessibilityMapResponse::Error { error }) => {
                info!(address = %address.uuid, ?error, "accessibility map not available");
                None
            }
            Err(err) => {
                error!(address = %address.uuid, %err, "accessibility map request failed");
                None
            }
        }
    }

    /// Per-mode travel estimates departing on the current UTC date.
    pub async fn route_to_destination(
        &self,
        address: &Address,
        destination: &Destination,
    ) -> Option<RoutingResult> {
        let today = Utc::now().date_naive();
        self.route_to_destination_on(address, destination, today)
            .await
    }

    pub async fn route_to_destination_on(
        &self,
        address: &Address,
        destination: &Destination,
        departure_date: NaiveDate,
    ) -> Option<RoutingResult> {
        let Some(origin) = address.geography.clone() else {
            warn!(address = %address.uuid, "no geography for address when routing");
            return None;
        };
        let Some(target) = destination.geography.clone() else {
            warn!(destination = %destination.uuid, "no geography for destination when routing");
            return None;
        };
        let Some(scenario) = self.scenario.clone() else {
            error!("no transit scenario configured for routing");
            return None;
        };

        let query = TimeDistanceQuery {
            origin,
            destination: target,
            departure_seconds_since_midnight: DEPARTURE_SECONDS_SINCE_MIDNIGHT,
            departure_date_string: departure_date.format("%Y-%m-%d").to_string(),
            transit_scenario: scenario,
        };

        let by_mode = match self
            .service
            .time_distance_by_mode(&CALCULATION_MODES, &query)
            .await
        {
            Ok(by_mode) => by_mode,
            Err(err) => {
                error!(
                    address = %address.uuid,
                    destination = %destination.uuid,
                    %err,
                    "time and distance request failed"
                );
                return None;
            }
        };

        let mut results_by_mode = ResultsByMode::default();
        for (sequence, mode) in (0u32..).zip(CALCULATION_MODES) {
            match by_mode.get(&mode) {
                Some(ModeRoutingResponse::Success {
                    distance_m,
                    travel_time_s,
                }) => {
                    *results_by_mode.slot_mut(mode) = Some(ModeTimeDistance {
                        mode,
                        sequence,
                        distance_meters: *distance_m,
                        travel_time_seconds: *travel_time_s,
                    });
                }
                other => {
                    debug!(destination = %destination.uuid, %mode, ?other, "no routing for mode");
                }
            }
        }

        Some(RoutingResult {
            destination_uuid: destination.uuid.clone(),
            destination_sequence: destination.sequence,
            results_by_mode,
        })
    }
}

impl fmt::Debug for AccessibilityRoutingGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessibilityRoutingGateway")
            .field("scenario", &self.scenario)
            .finish_non_exhaustive()
    }
}
