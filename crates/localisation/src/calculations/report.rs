use std::io::Write;

use serde::Serialize;

use super::housing::monthly_cost;
use crate::interview::{Interview, Ownership};

/// One line of the monthly cost comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReportRow {
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Sequence")]
    pub sequence: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Ownership")]
    pub ownership: &'static str,
    #[serde(rename = "Monthly Housing Cost")]
    pub housing_cost_monthly: Option<String>,
}

/// Monthly housing cost of every address of the interview, in sequence order.
pub fn cost_report_rows(
    interview: &Interview,
) -> Result<Vec<CostReportRow>, crate::interview::InterviewError> {
    let rows = interview
        .addresses()?
        .into_iter()
        .map(|address| {
            let cost = monthly_cost(&address, interview);
            CostReportRow {
                ownership: match address.ownership {
                    Some(Ownership::Rent) => "rent",
                    Some(Ownership::Buy) => "buy",
                    Some(Ownership::Unknown) => "unknown",
                    None => "",
                },
                name: address.name.unwrap_or_default(),
                sequence: address.sequence,
                address: address.uuid,
                housing_cost_monthly: cost.housing_cost_monthly.map(|value| format!("{value:.2}")),
            }
        })
        .collect();

    Ok(rows)
}

pub fn write_cost_report<W: Write>(rows: &[CostReportRow], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
