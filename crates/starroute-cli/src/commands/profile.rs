//! Travel profile options shared by the `reach` and `route` subcommands.

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::debug;

use starroute_lib::{ActorKnowledge, TravelProfile, WormholeStrategy};

use crate::commands::Workspace;

/// Drive and knowledge options.
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// Use the drives of a ship from the ship catalog.
    #[arg(long)]
    pub ship: Option<String>,
    /// Fuel per hyperlane hop (0 disables hyperlane travel).
    #[arg(long)]
    pub hyperlane_fuel: Option<u32>,
    /// Fuel per jump drive hop (0 disables the jump drive).
    #[arg(long)]
    pub jump_fuel: Option<u32>,
    /// Jump drive range.
    #[arg(long)]
    pub jump_range: Option<f64>,
    /// Which wormholes to use: none, some (free ones only), or all.
    #[arg(long)]
    pub wormholes: Option<WormholeStrategy>,
    /// Systems already visited; when given, only hyperlanes touching a
    /// visited system are used.
    #[arg(long, value_delimiter = ',')]
    pub visited: Vec<String>,
}

/// Profile and optional knowledge resolved against the loaded data.
#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    pub profile: TravelProfile,
    pub knowledge: Option<ActorKnowledge>,
}

impl ProfileArgs {
    pub fn resolve(&self, workspace: &Workspace) -> Result<ResolvedProfile> {
        let mut profile = match &self.ship {
            Some(name) => {
                let Some(catalog) = workspace.ships.as_ref() else {
                    bail!("--ship requires a ship catalog; pass --ships or set STARROUTE_SHIPS");
                };
                let ship = catalog.get(name).with_context(|| {
                    format!(
                        "unknown ship '{name}'; available: {}",
                        catalog.ship_names().join(", ")
                    )
                })?;
                ship.profile
            }
            None => TravelProfile::default(),
        };

        if let Some(fuel) = self.hyperlane_fuel {
            profile.hyperlane_fuel = fuel;
        }
        if let Some(fuel) = self.jump_fuel {
            profile.jump_fuel = fuel;
        }
        if let Some(range) = self.jump_range {
            if !range.is_finite() || range < 0.0 {
                bail!("--jump-range must be a finite non-negative number");
            }
            profile.jump_range = range;
        }
        if let Some(strategy) = self.wormholes {
            profile.wormholes = strategy;
        }

        let knowledge = if self.visited.is_empty() {
            None
        } else {
            let mut knowledge = ActorKnowledge::new();
            for name in &self.visited {
                knowledge.visit(workspace.galaxy.resolve_system(name)?);
            }
            Some(knowledge)
        };

        if !profile.can_travel() {
            debug!("travel profile has no drives; only the origin is reachable");
        }
        debug!(
            ?profile,
            visited = ?knowledge.as_ref().map(ActorKnowledge::visited_count),
            "resolved travel profile"
        );

        Ok(ResolvedProfile { profile, knowledge })
    }
}
