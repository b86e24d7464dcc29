use crate::infra::{load_interview, parse_car_category, parse_car_engine, results_calculator};
use clap::Args;
use localisation::calculations::{
    average_annual_car_cost, cost_report_rows, mortgage_monthly_payment, write_cost_report,
    CarCategory, CarEngine,
};
use localisation::config::AppConfig;
use localisation::error::AppError;
use localisation::server_update::{results_field_updates, RESULTS_SECTION};
use localisation::telemetry;
use serde_json::json;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CostReportArgs {
    /// Interview JSON file (`{"response": {...}}`)
    #[arg(long)]
    pub(crate) interview: PathBuf,
    /// Write the CSV here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct MortgageArgs {
    /// Amount borrowed
    #[arg(long)]
    pub(crate) principal: f64,
    /// Annual interest rate in percent, e.g. 5 for 5%
    #[arg(long)]
    pub(crate) rate: f64,
    /// Amortization period in years
    #[arg(long)]
    pub(crate) years: u32,
}

#[derive(Args, Debug)]
pub(crate) struct CarCostArgs {
    /// passengerCar, luxuryCar, pickup or suv
    #[arg(long, value_parser = parse_car_category)]
    pub(crate) category: CarCategory,
    /// electric, pluginHybrid, hybrid or gas
    #[arg(long, value_parser = parse_car_engine)]
    pub(crate) engine: CarEngine,
}

#[derive(Args, Debug)]
pub(crate) struct ResultsArgs {
    /// Interview JSON file (`{"response": {...}}`)
    #[arg(long)]
    pub(crate) interview: PathBuf,
}

pub(crate) fn run_cost_report(args: CostReportArgs) -> Result<(), AppError> {
    let interview = load_interview(&args.interview)?;
    let rows = cost_report_rows(&interview)?;

    match args.output {
        Some(path) => {
            write_cost_report(&rows, File::create(&path)?)?;
            println!(
                "Wrote monthly costs for {} addresses to {}",
                rows.len(),
                path.display()
            );
        }
        None => write_cost_report(&rows, io::stdout().lock())?,
    }
    Ok(())
}

pub(crate) fn run_mortgage(args: MortgageArgs) -> Result<(), AppError> {
    let months = args.years.saturating_mul(12);
    let payment = mortgage_monthly_payment(args.principal, args.rate / 100.0, months)?;
    println!(
        "{:.2} / month ({} payments at {}% compounded semi-annually)",
        payment, months, args.rate
    );
    Ok(())
}

pub(crate) fn run_car_cost(args: CarCostArgs) -> Result<(), AppError> {
    let annual = average_annual_car_cost(args.category, args.engine)?;
    println!(
        "{} {}: {:.2} / year ({:.2} / month)",
        args.category,
        args.engine,
        annual,
        annual / 12.0
    );
    Ok(())
}

pub(crate) async fn run_results(args: ResultsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let interview = load_interview(&args.interview)?;
    let calculator = results_calculator(&config.routing);
    let updates = results_field_updates(
        &calculator,
        &interview,
        &json!([{ "section": RESULTS_SECTION }]),
    )
    .await;

    println!("{}", serde_json::to_string_pretty(&updates)?);
    Ok(())
}
