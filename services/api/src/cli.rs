use crate::demo::{run_demo, run_market_predictions, DemoArgs, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use propsight::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "PropSight Market Engine",
    about = "Score housing markets and rank property appreciation forecasts from the command line",
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
    /// Market-level commands
    Markets {
        #[command(subcommand)]
        command: MarketsCommand,
    },
    /// Run an end-to-end CLI demo covering predictions and market scoring
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum MarketsCommand {
    /// Rank property appreciation forecasts for one market
    Predict(PredictArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Listing feed CSV served ahead of synthetic generation
    /// (overrides APP_LISTING_FEED)
    #[arg(long)]
    pub(crate) listing_feed: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Markets {
            command: MarketsCommand::Predict(args),
        } => run_market_predictions(args),
        Command::Demo(args) => run_demo(args),
    }
}
