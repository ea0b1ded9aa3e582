use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use starroute_cli::commands::reach::{handle_reach_command, ReachArgs};
use starroute_cli::commands::route::{handle_route_command, RouteArgs};
use starroute_cli::commands::Workspace;
use starroute_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Route planning across a galaxy of star systems")]
struct Cli {
    /// Galaxy description (JSON).
    #[arg(long, global = true, env = "STARROUTE_GALAXY")]
    galaxy: Option<PathBuf>,

    /// Ship catalog (CSV) used by `--ship`.
    #[arg(long, global = true, env = "STARROUTE_SHIPS")]
    ships: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every system reachable from an origin, cheapest first.
    Reach(ReachArgs),
    /// Plan the cheapest route between two systems.
    Route(RouteArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let workspace = Workspace::load(cli.galaxy.as_deref(), cli.ships.as_deref())?;
    match &cli.command {
        Command::Reach(args) => handle_reach_command(&workspace, args, cli.format),
        Command::Route(args) => handle_route_command(&workspace, args, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
