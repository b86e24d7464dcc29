//! Server-side field update run by the survey host on section navigation.
//!
//! When the respondent enters the results section, every address of the interview
//! gets its monthly cost, accessibility map, and routing estimates. The returned
//! map is keyed by dotted response paths and merged into the interview by the host.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::{error, info};

use crate::calculations::{monthly_cost, AccessibilityAndRouting, ResultsCalculator};
use crate::interview::{Interview, InterviewError};

/// Response field whose changes trigger the update.
pub const SECTION_ACTIONS_FIELD: &str = "_sections._actions";
/// The update writes computed values and must not run while the host validates data.
pub const RUN_ON_VALIDATED_DATA: bool = false;
pub const RESULTS_SECTION: &str = "results";

pub type FieldUpdates = BTreeMap<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum ServerUpdateError {
    #[error(transparent)]
    Interview(#[from] InterviewError),
    #[error("unable to serialize computed value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Whether the latest section action in `section_actions` enters the results section.
pub fn enters_results_section(section_actions: &Value) -> bool {
    section_actions
        .as_array()
        .and_then(|actions| actions.last())
        .and_then(|action| action.get("section"))
        .and_then(Value::as_str)
        == Some(RESULTS_SECTION)
}

/// Whether a change of `field` reaches the update. Changes made while the host
/// validates data are skipped.
pub fn handles_field(field: &str, on_validated_data: bool) -> bool {
    field == SECTION_ACTIONS_FIELD && (RUN_ON_VALIDATED_DATA || !on_validated_data)
}

pub fn field_path(address_uuid: &str, field: &str) -> String {
    format!("addresses.{address_uuid}.{field}")
}

/// Field updates for a change of `_sections._actions`.
///
/// Returns an empty map when the navigation does not enter the results section or
/// when the interview cannot be read.
pub async fn results_field_updates(
    calculator: &ResultsCalculator,
    interview: &Interview,
    section_actions: &Value,
) -> FieldUpdates {
    if !enters_results_section(section_actions) {
        return FieldUpdates::new();
    }

    match compute_results(calculator, interview).await {
        Ok(updates) => updates,
        Err(err) => {
            error!(%err, "error calculating results for interview");
            FieldUpdates::new()
        }
    }
}

async fn compute_results(
    calculator: &ResultsCalculator,
    interview: &Interview,
) -> Result<FieldUpdates, ServerUpdateError> {
    let addresses = interview.addresses()?;
    let shared = Arc::new(interview.clone());
    let mut updates = FieldUpdates::new();
    let mut uuids = Vec::with_capacity(addresses.len());
    let mut tasks = Vec::with_capacity(addresses.len());

    for address in addresses {
        let cost = monthly_cost(&address, interview);
        updates.insert(
            field_path(&address.uuid, "monthlyCost"),
            serde_json::to_value(cost)?,
        );

        let calculator = calculator.clone();
        let snapshot = Arc::clone(&shared);
        uuids.push(address.uuid.clone());
        tasks.push(tokio::spawn(async move {
            calculator
                .accessibility_and_routing(&address, &snapshot)
                .await
        }));
    }

    info!(addresses = uuids.len(), "computing accessibility and routing");

    let outcomes = join_all(tasks).await;
    for (uuid, outcome) in uuids.into_iter().zip(outcomes) {
        let computed = match outcome {
            Ok(Ok(computed)) => Some(computed),
            Ok(Err(err)) => {
                error!(address = %uuid, %err, "error calculating accessibility and routing");
                None
            }
            Err(err) => {
                error!(address = %uuid, %err, "accessibility and routing task failed");
                None
            }
        };

        let (accessibility_map, routing_time_distances) = match computed {
            Some(AccessibilityAndRouting {
                accessibility_map,
                routing_time_distances,
            }) => (
                serde_json::to_value(accessibility_map)?,
                serde_json::to_value(routing_time_distances)?,
            ),
            None => (Value::Null, Value::Null),
        };
        updates.insert(field_path(&uuid, "accessibilityMap"), accessibility_map);
        updates.insert(
            field_path(&uuid, "routingTimeDistances"),
            routing_time_distances,
        );
    }

    Ok(updates)
}
