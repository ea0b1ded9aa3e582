use serde::Serialize;

use crate::galaxy::SystemId;

/// Kind of link used to move between two systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HopKind {
    /// Fixed hyperlane between two systems.
    Hyperlane,
    /// Range-limited jump drive hop to any nearby system.
    Jump,
    /// Wormhole passage, which carries its own cost.
    Wormhole,
}

/// Outgoing wormhole passage from a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WormholeLink {
    pub target: SystemId,
    pub fuel: u32,
    pub days: u32,
}

impl WormholeLink {
    /// `true` when travelling through this wormhole costs neither fuel nor time.
    pub fn is_free(&self) -> bool {
        self.fuel == 0 && self.days == 0
    }
}

/// Read-only accessors the route search needs from a star map.
///
/// Implementations must stay unchanged for the duration of a search; the
/// search borrows the graph immutably while it runs.
pub trait RouteGraph {
    /// Whether the given identifier names a system of this graph.
    fn contains(&self, system: SystemId) -> bool;

    /// Systems connected to `system` by a hyperlane.
    fn hyperlane_neighbours(&self, system: SystemId) -> &[SystemId];

    /// Systems other than `system` within `range` of it.
    ///
    /// May include systems marginally beyond `range`; the search confirms
    /// every candidate with [`RouteGraph::distance`].
    fn jump_neighbours(&self, system: SystemId, range: f64) -> Vec<SystemId>;

    /// Wormhole passages leaving `system`.
    fn wormhole_links(&self, system: SystemId) -> &[WormholeLink];

    /// Straight-line distance between two systems, when both have positions.
    fn distance(&self, from: SystemId, to: SystemId) -> Option<f64>;

    /// Risk incurred by passing through `system`.
    fn danger(&self, system: SystemId) -> f64;

    /// Jump range that replaces the ship's own range when leaving `system`.
    fn jump_range_override(&self, _system: SystemId) -> Option<f64> {
        None
    }
}
