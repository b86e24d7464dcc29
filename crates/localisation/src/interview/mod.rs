//! Read-only view over the survey host's interview state.
//!
//! The host persists responses as a nested JSON document. Grouped objects such as
//! addresses and destinations are stored as maps keyed by their `_uuid`; this module
//! turns them into typed records ordered by `_sequence`.

pub mod domain;

pub use domain::{Address, Destination, Ownership};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Interview snapshot handed over by the survey host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default)]
    pub response: Value,
}

impl Interview {
    pub fn from_response(response: Value) -> Self {
        Self {
            id: None,
            uuid: None,
            response,
        }
    }

    /// Value stored at a dotted response path such as `household.income`.
    pub fn get_response(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.response, |value, segment| value.get(segment))
            .filter(|value| !value.is_null())
    }

    /// Candidate residences, ascending by sequence.
    pub fn addresses(&self) -> Result<Vec<Address>, InterviewError> {
        let mut addresses: Vec<Address> = self.grouped_objects("addresses")?;
        addresses.sort_by_key(|address| address.sequence);
        Ok(addresses)
    }

    /// Frequently visited places, ascending by sequence.
    pub fn destinations(&self) -> Result<Vec<Destination>, InterviewError> {
        let mut destinations: Vec<Destination> = self.grouped_objects("destinations")?;
        destinations.sort_by_key(|destination| destination.sequence);
        Ok(destinations)
    }

    pub fn household_income(&self) -> Option<f64> {
        self.get_response("household.income")
            .and_then(Value::as_f64)
    }

    fn grouped_objects<T>(&self, path: &'static str) -> Result<Vec<T>, InterviewError>
    where
        T: DeserializeOwned + GroupedObject,
    {
        let response = self
            .response
            .as_object()
            .ok_or(InterviewError::MissingResponse)?;

        let objects = match response.get(path) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Object(objects)) => objects,
            Some(_) => return Err(InterviewError::NotAGroup { path }),
        };

        objects
            .iter()
            .map(|(key, value)| {
                let mut object: T = serde_json::from_value(value.clone()).map_err(|source| {
                    InterviewError::MalformedObject {
                        path,
                        key: key.clone(),
                        source,
                    }
                })?;
                object.ensure_uuid(key);
                Ok(object)
            })
            .collect()
    }
}

trait GroupedObject {
    fn ensure_uuid(&mut self, key: &str);
}

impl GroupedObject for Address {
    fn ensure_uuid(&mut self, key: &str) {
        if self.uuid.is_empty() {
            self.uuid = key.to_string();
        }
    }
}

impl GroupedObject for Destination {
    fn ensure_uuid(&mut self, key: &str) {
        if self.uuid.is_empty() {
            self.uuid = key.to_string();
        }
    }
}

/// Structural problem with the interview document.
#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    #[error("interview has no response object")]
    MissingResponse,
    #[error("response field '{path}' is not a group of objects")]
    NotAGroup { path: &'static str },
    #[error("object '{key}' in '{path}' is malformed: {source}")]
    MalformedObject {
        path: &'static str,
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
