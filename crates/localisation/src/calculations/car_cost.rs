use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CarCategory {
    PassengerCar,
    LuxuryCar,
    Pickup,
    Suv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CarEngine {
    Electric,
    PluginHybrid,
    Hybrid,
    Gas,
}

impl CarCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            CarCategory::PassengerCar => "passengerCar",
            CarCategory::LuxuryCar => "luxuryCar",
            CarCategory::Pickup => "pickup",
            CarCategory::Suv => "suv",
        }
    }
}

impl CarEngine {
    pub fn as_str(self) -> &'static str {
        match self {
            CarEngine::Electric => "electric",
            CarEngine::PluginHybrid => "pluginHybrid",
            CarEngine::Hybrid => "hybrid",
            CarEngine::Gas => "gas",
        }
    }
}

impl fmt::Display for CarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CarEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No data available for {category} + {engine}")]
pub struct CarCostError {
    pub category: CarCategory,
    pub engine: CarEngine,
}

/// Average annual cost of owning a vehicle, in dollars.
///
/// Figures are averages of CAA driving-cost estimates for 2019 to 2022 models.
/// Pickups have no plug-in hybrid entry.
pub fn average_annual_car_cost(category: CarCategory, engine: CarEngine) -> Result<f64, CarCostError> {
    use CarCategory::*;
    use CarEngine::*;

    let cost = match (category, engine) {
        (PassengerCar, Electric) => 5947.69,
        (PassengerCar, PluginHybrid) => 7484.73,
        (PassengerCar, Hybrid) => 7539.17,
        (PassengerCar, Gas) => 9399.17,
        (LuxuryCar, Electric) => 13060.87,
        (LuxuryCar, PluginHybrid) => 15433.43,
        (LuxuryCar, Hybrid) => 11478.78,
        (LuxuryCar, Gas) => 16252.59,
        (Pickup, Electric) => 10440.29,
        (Pickup, Hybrid) => 13034.54,
        (Pickup, Gas) => 11915.5,
        (Suv, Electric) => 6432.82,
        (Suv, PluginHybrid) => 7175.75,
        (Suv, Hybrid) => 7831.03,
        (Suv, Gas) => 9907.93,
        (Pickup, PluginHybrid) => return Err(CarCostError { category, engine }),
    };

    Ok(cost)
}
