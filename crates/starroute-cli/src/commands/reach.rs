//! Reach command handler: every system reachable from an origin.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use starroute_lib::{ReachabilitySummary, RouteSearch, SearchConfig, SearchLimits};

use crate::commands::profile::ProfileArgs;
use crate::commands::Workspace;
use crate::output::{emit, OutputFormat};

/// Arguments for the reach command.
#[derive(Args, Debug, Clone)]
pub struct ReachArgs {
    /// Origin system name.
    #[arg(long = "from")]
    pub from: String,
    /// Stop after this many systems have been reached (origin included).
    #[arg(long)]
    pub max_systems: Option<usize>,
    /// Ignore systems that take longer than this many days to reach.
    #[arg(long)]
    pub max_days: Option<u32>,
    #[command(flatten)]
    pub profile: ProfileArgs,
}

impl ReachArgs {
    fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_systems: self.max_systems,
            max_days: self.max_days,
        }
    }
}

/// Handle the `reach` subcommand.
pub fn handle_reach_command(
    workspace: &Workspace,
    args: &ReachArgs,
    format: OutputFormat,
) -> Result<()> {
    let galaxy = &workspace.galaxy;
    let origin = galaxy.resolve_system(&args.from)?;
    let resolved = args.profile.resolve(workspace)?;

    let mut config = SearchConfig::new(origin)
        .with_limits(args.limits())
        .with_profile(resolved.profile);
    if let Some(knowledge) = resolved.knowledge.as_ref() {
        config = config.with_knowledge(knowledge);
    }

    let search = RouteSearch::run(galaxy, &config)
        .with_context(|| format!("failed to search from {}", args.from))?;
    info!(
        origin = %args.from,
        reached = search.len(),
        stop = %search.stop_reason(),
        "reachability search finished"
    );

    let summary = ReachabilitySummary::from_search(galaxy, &search);
    emit(format, &summary, ReachabilitySummary::render_plain)
}
