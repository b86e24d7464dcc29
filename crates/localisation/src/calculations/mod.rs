//! Cost and accessibility calculations run when a respondent reaches the results.
//!
//! Housing and car costs are pure functions of the interview answers. Accessibility
//! maps and routing estimates go through the external routing service and degrade
//! to `None` when it cannot answer.

pub mod accessibility;
pub mod car_cost;
pub mod facade;
pub mod housing;
pub mod mortgage;
pub mod report;

#[cfg(test)]
mod tests;

pub use accessibility::{
    AccessibilityRoutingGateway, ModeTimeDistance, ResultsByMode, RoutingResult,
    CALCULATION_MODES,
};
pub use car_cost::{average_annual_car_cost, CarCategory, CarCostError, CarEngine};
pub use facade::{AccessibilityAndRouting, CalculationError, ResultsCalculator};
pub use housing::{monthly_cost, monthly_housing_cost, percentage_of_income, MonthlyCostResult};
pub use mortgage::{mortgage_monthly_payment, MortgageError};
pub use report::{cost_report_rows, write_cost_report, CostReportRow};
