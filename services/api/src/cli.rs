use crate::commands::{run_criteria, run_report, run_score, ReportArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fieldops::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Field Coaching Service",
    about = "Score double-visit coaching evaluations and serve them over HTTP",
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
    /// Score a JSON file of criterion ratings
    Score(ScoreArgs),
    /// Build a team coaching report from a CSV export
    Report(ReportArgs),
    /// Print the coaching rubric
    Criteria,
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
        Command::Score(args) => run_score(args),
        Command::Report(args) => run_report(args),
        Command::Criteria => {
            run_criteria();
            Ok(())
        }
    }
}
