//! Route command handler for planning a trip between two systems.

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::info;

use starroute_lib::{RoutePlan, RouteSearch, RouteSummary, SearchConfig};

use crate::commands::profile::ProfileArgs;
use crate::commands::Workspace;
use crate::output::{emit, OutputFormat};

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Starting system name.
    #[arg(long = "from")]
    pub from: String,
    /// Destination system name.
    #[arg(long = "to")]
    pub to: String,
    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Handle the `route` subcommand.
///
/// The summary is printed even when the destination is unreachable; the
/// command then exits with an error.
pub fn handle_route_command(
    workspace: &Workspace,
    args: &RouteArgs,
    format: OutputFormat,
) -> Result<()> {
    let galaxy = &workspace.galaxy;
    let origin = galaxy.resolve_system(&args.from)?;
    let destination = galaxy.resolve_system(&args.to)?;
    let resolved = args.profile.resolve(workspace)?;

    let mut config = SearchConfig::new(origin)
        .with_destination(destination)
        .with_profile(resolved.profile);
    if let Some(knowledge) = resolved.knowledge.as_ref() {
        config = config.with_knowledge(knowledge);
    }

    let search = RouteSearch::run(galaxy, &config)
        .with_context(|| format!("failed to plan route from {}", args.from))?;
    let plan = RoutePlan::from_search(&search, destination);
    info!(
        from = %args.from,
        to = %args.to,
        found = plan.has_route(),
        hops = plan.hop_count(),
        "route search finished"
    );

    let summary = RouteSummary::from_plan(galaxy, &plan);
    emit(format, &summary, RouteSummary::render_plain)?;

    if !plan.has_route() {
        bail!("no route found between {} and {}", args.from, args.to);
    }
    Ok(())
}
