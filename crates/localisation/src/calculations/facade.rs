use std::collections::BTreeMap;

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::accessibility::{AccessibilityRoutingGateway, RoutingResult};
use crate::interview::{Address, Interview, InterviewError};

/// Accessibility map and routing estimates computed for one address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityAndRouting {
    pub accessibility_map: Option<FeatureCollection>,
    /// Routing result per destination `_uuid`.
    pub routing_time_distances: Option<BTreeMap<String, Option<RoutingResult>>>,
}

#[derive(Debug, thiserror::Error)]
pub enum CalculationError {
    #[error(transparent)]
    Interview(#[from] InterviewError),
    #[error("accessibility map task for address {address} failed: {source}")]
    AccessibilityTask {
        address: String,
        #[source]
        source: tokio::task::JoinError,
    },
}

/// Composes the routing gateway over the destinations of an interview.
#[derive(Debug, Clone)]
pub struct ResultsCalculator {
    gateway: AccessibilityRoutingGateway,
}

impl ResultsCalculator {
    pub fn new(gateway: AccessibilityRoutingGateway) -> Self {
        Self { gateway }
    }

    /// Accessibility map of `address` and routing from it to every destination.
    ///
    /// The accessibility request and all routing requests are spawned before any is
    /// awaited. A failed routing task leaves `null` for its destination only; a
    /// failed accessibility task fails the whole call.
    pub async fn accessibility_and_routing(
        &self,
        address: &Address,
        interview: &Interview,
    ) -> Result<AccessibilityAndRouting, CalculationError> {
        if self.gateway.scenario().is_none() {
            warn!("no transit scenario configured, skipping accessibility and routing");
            return Ok(AccessibilityAndRouting::default());
        }

        let destinations = interview.destinations()?;

        let accessibility_task = {
            let gateway = self.gateway.clone();
            let address = address.clone();
            tokio::spawn(async move { gateway.accessibility_polygons(&address).await })
        };

        let routing_tasks: Vec<_> = destinations
            .into_iter()
            .map(|destination| {
                let gateway = self.gateway.clone();
                let address = address.clone();
                let uuid = destination.uuid.clone();
                let task = tokio::spawn(async move {
                    gateway.route_to_destination(&address, &destination).await
                });
                (uuid, task)
            })
            .collect();

        let accessibility_map =
            accessibility_task
                .await
                .map_err(|source| CalculationError::AccessibilityTask {
                    address: address.uuid.clone(),
                    source,
                })?;

        let mut routing_time_distances = BTreeMap::new();
        for (uuid, task) in routing_tasks {
            let routing = match task.await {
                Ok(routing) => routing,
                Err(err) => {
                    error!(
                        address = %address.uuid,
                        destination = %uuid,
                        %err,
                        "routing task failed"
                    );
                    None
                }
            };
            routing_time_distances.insert(uuid, routing);
        }

        Ok(AccessibilityAndRouting {
            accessibility_map,
            routing_time_distances: Some(routing_time_distances),
        })
    }
}
