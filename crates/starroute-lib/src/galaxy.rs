use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{RouteGraph, WormholeLink};
use crate::spatial::SpatialIndex;

/// Numeric identifier for a star system.
pub type SystemId = i64;

/// Cartesian coordinates for a star system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SystemPosition {
    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// A star system and the attributes route planning cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub id: SystemId,
    pub name: String,
    #[serde(default)]
    pub position: Option<SystemPosition>,
    #[serde(default)]
    pub danger: f64,
    /// Local jump range that replaces a ship's own range when departing here.
    /// Zero means no local range.
    #[serde(default)]
    pub jump_range: Option<f64>,
}

/// Wormhole entry as written in a galaxy description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WormholeDefinition {
    pub from: SystemId,
    pub to: SystemId,
    #[serde(default)]
    pub fuel: u32,
    #[serde(default)]
    pub days: u32,
}

/// On-disk galaxy description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalaxyDocument {
    pub systems: Vec<System>,
    #[serde(default)]
    pub hyperlanes: Vec<(SystemId, SystemId)>,
    #[serde(default)]
    pub wormholes: Vec<WormholeDefinition>,
}

/// In-memory star map: systems, bidirectional hyperlanes, directional wormholes.
#[derive(Debug, Clone, Default)]
pub struct Galaxy {
    pub systems: HashMap<SystemId, System>,
    pub name_to_id: HashMap<String, SystemId>,
    pub hyperlanes: Arc<HashMap<SystemId, Vec<SystemId>>>,
    pub wormholes: Arc<HashMap<SystemId, Vec<WormholeLink>>>,
    pub spatial: Arc<SpatialIndex>,
}

impl Galaxy {
    /// Validate a galaxy description and build the lookup tables.
    ///
    /// Every hyperlane and wormhole endpoint must reference a declared system,
    /// ids and names must be unique, and danger and jump ranges must be
    /// finite and non-negative. Hyperlanes are stored in both directions and
    /// duplicate lanes are collapsed. A declared jump range of zero is treated
    /// as not declared.
    pub fn from_document(document: GalaxyDocument) -> Result<Self> {
        let mut systems = HashMap::with_capacity(document.systems.len());
        let mut name_to_id = HashMap::with_capacity(document.systems.len());

        for mut system in document.systems {
            validate_system(&system)?;
            if system.jump_range == Some(0.0) {
                system.jump_range = None;
            }
            if name_to_id.insert(system.name.clone(), system.id).is_some() {
                return Err(Error::GalaxyValidation {
                    message: format!("duplicate system name '{}'", system.name),
                });
            }
            let id = system.id;
            if systems.insert(id, system).is_some() {
                return Err(Error::GalaxyValidation {
                    message: format!("duplicate system id {id}"),
                });
            }
        }

        let mut hyperlanes: HashMap<SystemId, Vec<SystemId>> = HashMap::new();
        let mut seen_lanes = HashSet::new();
        for (from, to) in document.hyperlanes {
            ensure_known(&systems, from, "hyperlane")?;
            ensure_known(&systems, to, "hyperlane")?;
            if from == to {
                warn!(system = from, "ignoring hyperlane that loops back to its own system");
                continue;
            }
            if !seen_lanes.insert((from.min(to), from.max(to))) {
                continue;
            }
            hyperlanes.entry(from).or_default().push(to);
            hyperlanes.entry(to).or_default().push(from);
        }
        for neighbours in hyperlanes.values_mut() {
            neighbours.sort_unstable();
        }

        let mut wormholes: HashMap<SystemId, Vec<WormholeLink>> = HashMap::new();
        for wormhole in document.wormholes {
            ensure_known(&systems, wormhole.from, "wormhole")?;
            ensure_known(&systems, wormhole.to, "wormhole")?;
            wormholes.entry(wormhole.from).or_default().push(WormholeLink {
                target: wormhole.to,
                fuel: wormhole.fuel,
                days: wormhole.days,
            });
        }

        let spatial = SpatialIndex::build(
            systems
                .values()
                .filter_map(|system| system.position.map(|position| (system.id, position))),
        );

        debug!(
            systems = systems.len(),
            hyperlanes = seen_lanes.len(),
            wormholes = wormholes.values().map(Vec::len).sum::<usize>(),
            "built galaxy"
        );

        Ok(Self {
            systems,
            name_to_id,
            hyperlanes: Arc::new(hyperlanes),
            wormholes: Arc::new(wormholes),
            spatial: Arc::new(spatial),
        })
    }

    /// Parse and validate a JSON galaxy description.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: GalaxyDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    /// Lookup a system identifier by its case-sensitive name.
    pub fn system_id_by_name(&self, name: &str) -> Option<SystemId> {
        self.name_to_id.get(name).copied()
    }

    /// Lookup a system name by identifier.
    pub fn system_name(&self, id: SystemId) -> Option<&str> {
        self.systems.get(&id).map(|sys| sys.name.as_str())
    }

    /// Resolve a system name, suggesting close matches when it is unknown.
    pub fn resolve_system(&self, name: &str) -> Result<SystemId> {
        self.system_id_by_name(name)
            .ok_or_else(|| Error::UnknownSystem {
                name: name.to_string(),
                suggestions: self.fuzzy_system_matches(name, 3),
            })
    }

    /// Names most similar to `name`, best match first.
    pub fn fuzzy_system_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .name_to_id
            .keys()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate.as_str())
            })
            .filter(|(score, _)| *score >= 0.75)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

impl RouteGraph for Galaxy {
    fn contains(&self, system: SystemId) -> bool {
        self.systems.contains_key(&system)
    }

    fn hyperlane_neighbours(&self, system: SystemId) -> &[SystemId] {
        self.hyperlanes
            .get(&system)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn jump_neighbours(&self, system: SystemId, range: f64) -> Vec<SystemId> {
        let Some(origin) = self.systems.get(&system).and_then(|s| s.position) else {
            return Vec::new();
        };
        let mut neighbours = self.spatial.within_radius(&origin, range);
        neighbours.retain(|&id| id != system);
        neighbours
    }

    fn wormhole_links(&self, system: SystemId) -> &[WormholeLink] {
        self.wormholes
            .get(&system)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn distance(&self, from: SystemId, to: SystemId) -> Option<f64> {
        let from = self.systems.get(&from)?.position?;
        let to = self.systems.get(&to)?.position?;
        Some(from.distance_to(&to))
    }

    fn danger(&self, system: SystemId) -> f64 {
        self.systems.get(&system).map_or(0.0, |s| s.danger)
    }

    fn jump_range_override(&self, system: SystemId) -> Option<f64> {
        self.systems.get(&system).and_then(|s| s.jump_range)
    }
}

/// Load and validate a galaxy description from a JSON file.
pub fn load_galaxy(path: &Path) -> Result<Galaxy> {
    debug!(path = %path.display(), "loading galaxy");
    let file = fs::File::open(path)?;
    Galaxy::from_reader(file)
}

fn validate_system(system: &System) -> Result<()> {
    if system.name.trim().is_empty() {
        return Err(Error::GalaxyValidation {
            message: format!("system {} has an empty name", system.id),
        });
    }
    if !system.danger.is_finite() || system.danger < 0.0 {
        return Err(Error::GalaxyValidation {
            message: format!(
                "system '{}' danger must be a finite non-negative number",
                system.name
            ),
        });
    }
    if let Some(range) = system.jump_range {
        if !range.is_finite() || range < 0.0 {
            return Err(Error::GalaxyValidation {
                message: format!(
                    "system '{}' jump_range must be a finite non-negative number",
                    system.name
                ),
            });
        }
    }
    Ok(())
}

fn ensure_known(systems: &HashMap<SystemId, System>, id: SystemId, what: &str) -> Result<()> {
    if systems.contains_key(&id) {
        Ok(())
    } else {
        Err(Error::GalaxyValidation {
            message: format!("{what} references unknown system {id}"),
        })
    }
}
