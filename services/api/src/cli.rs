use crate::batch::{run_stress_batch, StressBatchArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use devwell::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Developer Wellness Service",
    about = "Run and demonstrate the developer wellness analytics service",
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
    /// Offline stress scoring utilities
    Stress {
        #[command(subcommand)]
        command: StressCommand,
    },
    /// Print rule-based results for built-in sample payloads
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum StressCommand {
    /// Score a CSV file of developer metrics without calling the model
    Batch(StressBatchArgs),
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
        Command::Stress {
            command: StressCommand::Batch(args),
        } => run_stress_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}
