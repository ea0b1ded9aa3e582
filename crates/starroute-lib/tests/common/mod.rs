//! Common test utilities and fixture helpers.
//!
//! This module provides shared test infrastructure for integration tests:
//! the checked-in fixture galaxy and ship catalog, plus small hand-built
//! galaxies for the worked examples.

use std::path::PathBuf;

use starroute_lib::{
    load_galaxy, Galaxy, GalaxyDocument, ShipCatalog, System, SystemId,
};

pub const A: SystemId = 1;
pub const B: SystemId = 2;
pub const C: SystemId = 3;

/// Path to fixtures directory used by tests (galaxy, ship data).
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// The seven-system fixture galaxy.
#[allow(dead_code)]
pub fn fixture_galaxy() -> Galaxy {
    load_galaxy(&fixtures_dir().join("galaxy.json")).expect("fixture galaxy loads")
}

#[allow(dead_code)]
pub fn fixture_ships() -> ShipCatalog {
    ShipCatalog::from_path(&fixtures_dir().join("ship_data.csv")).expect("fixture ships load")
}

/// Resolve a fixture system name.
#[allow(dead_code)]
pub fn id(galaxy: &Galaxy, name: &str) -> SystemId {
    galaxy
        .system_id_by_name(name)
        .unwrap_or_else(|| panic!("{name} present in fixture"))
}

/// Three systems A - B - C joined by hyperlanes, with an optional
/// wormhole A -> C of the given fuel and day cost.
#[allow(dead_code)]
pub fn chain_galaxy(wormhole: Option<(u32, u32)>) -> Galaxy {
    let system = |id: SystemId, name: &str| System {
        id,
        name: name.to_string(),
        position: None,
        danger: 0.0,
        jump_range: None,
    };
    let mut document = GalaxyDocument {
        systems: vec![system(A, "A"), system(B, "B"), system(C, "C")],
        hyperlanes: vec![(A, B), (B, C)],
        wormholes: Vec::new(),
    };
    if let Some((fuel, days)) = wormhole {
        document.wormholes.push(starroute_lib::galaxy::WormholeDefinition {
            from: A,
            to: C,
            fuel,
            days,
        });
    }
    Galaxy::from_document(document).expect("chain galaxy is valid")
}
