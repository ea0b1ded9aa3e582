//! Travel capabilities and map knowledge of whoever is planning a route.
//!
//! - [`TravelProfile`] - which drives an actor has and what each hop costs
//! - [`WormholeStrategy`] - which wormholes an actor is willing to use
//! - [`KnowledgeOracle`] - which hyperlanes an actor has discovered
//! - [`Ship`] / [`Pilot`] - concrete actors implementing [`Traveller`]

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::galaxy::SystemId;
use crate::graph::WormholeLink;

/// Fuel spent per hyperlane hop when no actor is supplied.
pub const DEFAULT_HYPERLANE_FUEL: u32 = 100;

/// Which wormhole passages a search may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WormholeStrategy {
    /// Ignore wormholes entirely.
    #[default]
    None,
    /// Only wormholes that cost neither fuel nor days.
    Some,
    /// Every wormhole, whatever it costs.
    All,
}

impl WormholeStrategy {
    /// Whether a wormhole passage may be taken under this strategy.
    pub fn permits(self, link: &WormholeLink) -> bool {
        match self {
            WormholeStrategy::None => false,
            WormholeStrategy::Some => link.is_free(),
            WormholeStrategy::All => true,
        }
    }
}

impl fmt::Display for WormholeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            WormholeStrategy::None => "none",
            WormholeStrategy::Some => "some",
            WormholeStrategy::All => "all",
        };
        f.write_str(value)
    }
}

impl FromStr for WormholeStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(WormholeStrategy::None),
            "some" => Ok(WormholeStrategy::Some),
            "all" => Ok(WormholeStrategy::All),
            other => Err(format!(
                "unknown wormhole strategy '{other}' (expected none, some, or all)"
            )),
        }
    }
}

/// Drive capabilities and per-hop costs of a travelling actor.
///
/// A zero fuel cost means the actor lacks that drive. A jump drive also
/// needs a positive range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelProfile {
    pub hyperlane_fuel: u32,
    pub jump_fuel: u32,
    pub jump_range: f64,
    pub wormholes: WormholeStrategy,
}

impl TravelProfile {
    /// Profile with hyperlane travel only.
    pub fn hyperlane_only(fuel: u32) -> Self {
        Self {
            hyperlane_fuel: fuel,
            jump_fuel: 0,
            jump_range: 0.0,
            wormholes: WormholeStrategy::None,
        }
    }

    /// Profile with no way of leaving the current system.
    pub fn stranded() -> Self {
        Self::hyperlane_only(0)
    }

    pub fn with_jump_drive(mut self, fuel: u32, range: f64) -> Self {
        self.jump_fuel = fuel;
        self.jump_range = range;
        self
    }

    pub fn with_wormholes(mut self, strategy: WormholeStrategy) -> Self {
        self.wormholes = strategy;
        self
    }

    pub fn has_hyperdrive(&self) -> bool {
        self.hyperlane_fuel > 0
    }

    pub fn has_jump_drive(&self) -> bool {
        self.jump_fuel > 0 && self.jump_range > 0.0
    }

    /// Whether any hop at all can leave a system with this profile.
    pub fn can_travel(&self) -> bool {
        self.has_hyperdrive() || self.has_jump_drive() || self.wormholes != WormholeStrategy::None
    }
}

impl Default for TravelProfile {
    fn default() -> Self {
        Self::hyperlane_only(DEFAULT_HYPERLANE_FUEL)
    }
}

/// Answers whether an actor knows about a hyperlane.
pub trait KnowledgeOracle {
    /// Whether the actor may plot a course along the hyperlane `from -> to`.
    fn can_traverse(&self, from: SystemId, to: SystemId) -> bool;
}

impl<F> KnowledgeOracle for F
where
    F: Fn(SystemId, SystemId) -> bool,
{
    fn can_traverse(&self, from: SystemId, to: SystemId) -> bool {
        self(from, to)
    }
}

/// What an actor has discovered: visited systems plus individually known lanes.
///
/// Visiting either end of a hyperlane reveals it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorKnowledge {
    visited: HashSet<SystemId>,
    known_links: HashSet<(SystemId, SystemId)>,
}

impl ActorKnowledge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Knowledge consisting of the given visited systems.
    pub fn from_visited(systems: impl IntoIterator<Item = SystemId>) -> Self {
        Self {
            visited: systems.into_iter().collect(),
            known_links: HashSet::new(),
        }
    }

    pub fn visit(&mut self, system: SystemId) {
        self.visited.insert(system);
    }

    /// Mark a single hyperlane as known without visiting either end.
    pub fn learn_link(&mut self, a: SystemId, b: SystemId) {
        self.known_links.insert(link_key(a, b));
    }

    pub fn has_visited(&self, system: SystemId) -> bool {
        self.visited.contains(&system)
    }

    pub fn knows_link(&self, a: SystemId, b: SystemId) -> bool {
        self.known_links.contains(&link_key(a, b))
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

impl KnowledgeOracle for ActorKnowledge {
    fn can_traverse(&self, from: SystemId, to: SystemId) -> bool {
        self.has_visited(to) || self.has_visited(from) || self.knows_link(from, to)
    }
}

fn link_key(a: SystemId, b: SystemId) -> (SystemId, SystemId) {
    (a.min(b), a.max(b))
}

/// Something that can plan routes for itself: it is somewhere, it has drives,
/// and it may only know part of the map.
pub trait Traveller {
    /// System searches start from, if the traveller is in one.
    fn current_system(&self) -> Option<SystemId>;

    fn travel_profile(&self) -> TravelProfile;

    /// Restriction on usable hyperlanes; `None` means every lane is usable.
    fn knowledge(&self) -> Option<&dyn KnowledgeOracle> {
        None
    }
}

/// A ship with its drives and location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub name: String,
    pub system: Option<SystemId>,
    /// Destination of a hyperspace jump that is already under way.
    #[serde(default)]
    pub hyperspace_target: Option<SystemId>,
    pub profile: TravelProfile,
}

impl Ship {
    pub fn new(name: impl Into<String>, profile: TravelProfile) -> Self {
        Self {
            name: name.into(),
            system: None,
            hyperspace_target: None,
            profile,
        }
    }

    pub fn in_system(mut self, system: SystemId) -> Self {
        self.system = Some(system);
        self
    }

    pub fn entering_hyperspace(mut self, target: SystemId) -> Self {
        self.hyperspace_target = Some(target);
        self
    }
}

impl Traveller for Ship {
    fn current_system(&self) -> Option<SystemId> {
        self.hyperspace_target.or(self.system)
    }

    fn travel_profile(&self) -> TravelProfile {
        self.profile
    }
}

/// A pilot flying a flagship, limited to the hyperlanes they have discovered.
#[derive(Debug, Clone, Default)]
pub struct Pilot {
    pub flagship: Option<Ship>,
    pub knowledge: ActorKnowledge,
}

impl Pilot {
    pub fn new(flagship: Ship, knowledge: ActorKnowledge) -> Self {
        Self {
            flagship: Some(flagship),
            knowledge,
        }
    }
}

impl Traveller for Pilot {
    fn current_system(&self) -> Option<SystemId> {
        self.flagship.as_ref().and_then(|ship| ship.current_system())
    }

    fn travel_profile(&self) -> TravelProfile {
        self.flagship
            .as_ref()
            .map_or_else(TravelProfile::stranded, |ship| ship.profile)
    }

    fn knowledge(&self) -> Option<&dyn KnowledgeOracle> {
        Some(&self.knowledge)
    }
}
