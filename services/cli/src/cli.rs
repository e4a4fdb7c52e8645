use crate::demo::{run_demo, run_report, DemoArgs, ReportArgs};
use clap::{Parser, Subcommand};
use sales_insights::config::AppConfig;
use sales_insights::error::AppError;
use sales_insights::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Sales Insights",
    about = "Compute sales performance metrics and seller bonus awards from a purchase batch",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate a batch file and print stats plus bonus awards
    Report(ReportArgs),
    /// Run the engine over a built-in synthetic batch (default command)
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Demo(DemoArgs::default()));

    match command {
        Command::Report(args) => run_report(args, &config),
        Command::Demo(args) => run_demo(args, &config),
    }
}
