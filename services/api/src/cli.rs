use crate::commands::{
    run_car_cost, run_cost_report, run_mortgage, run_results, CarCostArgs, CostReportArgs,
    MortgageArgs, ResultsArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use localisation::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "localisation",
    about = "Housing cost, accessibility, and routing calculations for the localisation survey",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute housing, mortgage, and car costs offline
    Costs {
        #[command(subcommand)]
        command: CostsCommand,
    },
    /// Run the results-section field update for an interview file
    Results(ResultsArgs),
}

#[derive(Subcommand, Debug)]
enum CostsCommand {
    /// Write a CSV comparing the monthly housing cost of every address
    Report(CostReportArgs),
    /// Monthly payment of a mortgage with semi-annual compounding
    Mortgage(MortgageArgs),
    /// Average annual cost of owning a car
    Car(CarCostArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Costs {
            command: CostsCommand::Report(args),
        } => run_cost_report(args),
        Command::Costs {
            command: CostsCommand::Mortgage(args),
        } => run_mortgage(args),
        Command::Costs {
            command: CostsCommand::Car(args),
        } => run_car_cost(args),
        Command::Results(args) => run_results(args).await,
    }
}
