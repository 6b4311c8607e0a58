use crate::commands::{run_recommend, run_roster_list, RecommendArgs, RosterListArgs};
use crate::server;
use careconnect::config::AppConfig;
use careconnect::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "CareConnect",
    about = "Serve and exercise the CareConnect caregiver matching service",
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
    /// Run one recommendation against the roster and print the shortlist
    Recommend(RecommendArgs),
    /// Inspect the caregiver roster
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RosterCommand {
    /// Print every caregiver on the roster
    List(RosterListArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Load the roster from this CSV export instead of the configured source
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
}

impl ServeArgs {
    pub(crate) fn apply(self, config: &mut AppConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(path) = self.roster_csv {
            config.roster.seed_csv = Some(path);
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Roster {
            command: RosterCommand::List(args),
        } => run_roster_list(args),
    }
}
