// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs dispatches to these
// handlers, keeping the entry point focused on parsing and coordination.

pub mod profile;
pub mod reach;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use starroute_lib::{load_galaxy, Galaxy, ShipCatalog};

/// Data files shared by every subcommand.
#[derive(Debug)]
pub struct Workspace {
    pub galaxy: Galaxy,
    pub ships: Option<ShipCatalog>,
}

impl Workspace {
    /// Load the galaxy and, when given, the ship catalog.
    pub fn load(galaxy_path: Option<&Path>, ships_path: Option<&Path>) -> Result<Self> {
        let galaxy_path = galaxy_path
            .context("no galaxy file given; pass --galaxy or set STARROUTE_GALAXY")?;
        let galaxy = load_galaxy(galaxy_path)
            .with_context(|| format!("failed to load galaxy from {}", galaxy_path.display()))?;

        let ships = ships_path
            .map(|path| {
                ShipCatalog::from_path(path).with_context(|| {
                    format!("failed to load ship catalog from {}", path.display())
                })
            })
            .transpose()?;

        Ok(Self { galaxy, ships })
    }
}
