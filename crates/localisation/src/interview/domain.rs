use geojson::Feature;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Tenure of a candidate residence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    Rent,
    Buy,
    /// Any value the survey stored that is neither `rent` nor `buy`.
    #[serde(other)]
    Unknown,
}

/// Candidate residence compared by the respondent.
///
/// Tenure-specific fields are raw widget answers. A field holding a value of the
/// wrong JSON type deserializes as `None` so that calculators treat it as missing
/// instead of rejecting the whole interview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "_sequence", default)]
    pub sequence: i64,
    #[serde(rename = "_uuid", default)]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub geography: Option<Feature>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub ownership: Option<Ownership>,
    /// Monthly rent.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub rent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub are_utilities_included: Option<bool>,
    /// Outstanding mortgage principal.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub mortgage: Option<f64>,
    /// Nominal yearly interest rate, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub interest_rate: Option<f64>,
    /// Amortization period in whole years, as chosen from the survey choice list.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub amortization_period: Option<String>,
    /// Yearly property taxes.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub taxes: Option<f64>,
    /// Monthly utilities.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub utilities: Option<f64>,
}

/// Frequently visited place declared by the respondent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(rename = "_sequence", default)]
    pub sequence: i64,
    #[serde(rename = "_uuid", default)]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub geography: Option<Feature>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub frequency: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}
