use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::mortgage::mortgage_monthly_payment;
use crate::interview::{Address, Interview, Ownership};

/// Monthly cost figures stored back on an address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCostResult {
    pub housing_cost_monthly: Option<f64>,
    pub housing_cost_percentage_of_income: Option<f64>,
}

/// Monthly cost of living at `address`, or `None` when the answers needed for
/// its tenure are missing.
pub fn monthly_housing_cost(address: &Address) -> Option<f64> {
    match address.ownership {
        Some(Ownership::Rent) => rent_cost(address),
        Some(Ownership::Buy) => ownership_cost(address),
        Some(Ownership::Unknown) | None => {
            warn!(address = %address.uuid, "unknown ownership type, skipping housing cost");
            None
        }
    }
}

fn rent_cost(address: &Address) -> Option<f64> {
    let Some(rent) = address.rent else {
        warn!(address = %address.uuid, "incomplete rent information");
        return None;
    };

    if address.are_utilities_included == Some(false) {
        let Some(utilities) = address.utilities else {
            warn!(address = %address.uuid, "utilities excluded from rent but amount missing");
            return None;
        };
        return Some(rent + utilities);
    }

    Some(rent)
}

fn ownership_cost(address: &Address) -> Option<f64> {
    let (Some(mortgage), Some(interest_rate), Some(amortization)) = (
        address.mortgage,
        address.interest_rate,
        address.amortization_period.as_deref(),
    ) else {
        warn!(address = %address.uuid, "incomplete mortgage information");
        return None;
    };

    let Some(months) = parse_whole_years(amortization).and_then(|years| years.checked_mul(12))
    else {
        warn!(address = %address.uuid, amortization, "invalid amortization period");
        return None;
    };

    let mortgage_monthly = if mortgage == 0.0 {
        0.0
    } else {
        match mortgage_monthly_payment(mortgage, interest_rate / 100.0, months) {
            Ok(payment) => payment,
            Err(err) => {
                error!(address = %address.uuid, %err, "unable to compute mortgage payment");
                return None;
            }
        }
    };
    let taxes_monthly = address.taxes.map_or(0.0, |taxes| taxes / 12.0);
    let utilities_monthly = address.utilities.unwrap_or(0.0);

    Some(mortgage_monthly + taxes_monthly + utilities_monthly)
}

/// Reads an amortization answer the way the survey stores it: optional leading
/// whitespace followed by the number of years.
fn parse_whole_years(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Share of household income spent on housing.
///
/// Household income is collected as a bracket, so no share is derived from it yet.
pub fn percentage_of_income(monthly_cost: f64, interview: &Interview) -> Option<f64> {
    let income = interview.household_income();
    debug!(monthly_cost, ?income, "housing share of income not computed");
    None
}

/// Monthly cost summary for one address of the interview.
pub fn monthly_cost(address: &Address, interview: &Interview) -> MonthlyCostResult {
    let housing_cost_monthly = monthly_housing_cost(address);
    let housing_cost_percentage_of_income =
        housing_cost_monthly.and_then(|cost| percentage_of_income(cost, interview));

    MonthlyCostResult {
        housing_cost_monthly,
        housing_cost_percentage_of_income,
    }
}
