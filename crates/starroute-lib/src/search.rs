//! Label-setting route search from a single origin.
//!
//! The search settles systems in the order defined by
//! [`RouteEdge::cmp_priority`]: fewest days, then least danger, then least
//! fuel. The frontier is a binary heap that may hold several stale entries
//! for one system; they are discarded when popped instead of being updated
//! in place.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::actor::{KnowledgeOracle, TravelProfile, Traveller};
use crate::edge::RouteEdge;
use crate::error::{Error, Result};
use crate::galaxy::SystemId;
use crate::graph::{HopKind, RouteGraph};

/// Optional caps that bound how far a search explores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop once this many systems are settled. The origin always counts, so
    /// zero behaves like one.
    pub max_systems: Option<usize>,
    /// Never settle a system that takes more than this many days to reach.
    pub max_days: Option<u32>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_systems(mut self, max: usize) -> Self {
        self.max_systems = Some(max);
        self
    }

    pub fn with_max_days(mut self, max: u32) -> Self {
        self.max_days = Some(max);
        self
    }
}

/// Everything a search needs to know before it starts.
#[derive(Clone, Copy)]
pub struct SearchConfig<'a> {
    pub origin: SystemId,
    /// Stop as soon as this system is settled.
    pub destination: Option<SystemId>,
    pub limits: SearchLimits,
    pub profile: TravelProfile,
    /// Restricts usable hyperlanes; jump and wormhole hops ignore it.
    pub knowledge: Option<&'a dyn KnowledgeOracle>,
}

impl<'a> SearchConfig<'a> {
    /// Full reachability search with the default hyperlane-only profile.
    pub fn new(origin: SystemId) -> Self {
        Self {
            origin,
            destination: None,
            limits: SearchLimits::default(),
            profile: TravelProfile::default(),
            knowledge: None,
        }
    }

    /// Search configured from a traveller's location, drives, and knowledge.
    pub fn for_traveller<T>(traveller: &'a T) -> Result<Self>
    where
        T: Traveller + ?Sized,
    {
        let origin = traveller.current_system().ok_or(Error::NoCurrentSystem)?;
        Ok(Self {
            origin,
            destination: None,
            limits: SearchLimits::default(),
            profile: traveller.travel_profile(),
            knowledge: traveller.knowledge(),
        })
    }

    pub fn with_origin(mut self, origin: SystemId) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_destination(mut self, destination: SystemId) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_profile(mut self, profile: TravelProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_knowledge(mut self, knowledge: &'a dyn KnowledgeOracle) -> Self {
        self.knowledge = Some(knowledge);
        self
    }
}

impl fmt::Debug for SearchConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("origin", &self.origin)
            .field("destination", &self.destination)
            .field("limits", &self.limits)
            .field("profile", &self.profile)
            .field("knowledge", &self.knowledge.is_some())
            .finish()
    }
}

/// Why a search stopped expanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStop {
    /// Every reachable system within the caps was settled.
    Exhausted,
    /// The destination was settled.
    ReachedDestination,
    /// The settled-system cap was hit.
    SystemLimit,
}

impl fmt::Display for SearchStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchStop::Exhausted => "exhausted",
            SearchStop::ReachedDestination => "reached_destination",
            SearchStop::SystemLimit => "system_limit",
        };
        f.write_str(value)
    }
}

/// Result of a route search: the best edge into every settled system.
///
/// A system missing from the result is unreachable under the search's
/// constraints.
#[derive(Debug, Clone)]
pub struct RouteSearch {
    origin: SystemId,
    destination: Option<SystemId>,
    stop: SearchStop,
    edges: HashMap<SystemId, RouteEdge>,
}

impl RouteSearch {
    /// Run a search with the given configuration.
    ///
    /// Fails only when the origin is not part of the graph.
    pub fn run<G>(graph: &G, config: &SearchConfig<'_>) -> Result<Self>
    where
        G: RouteGraph + ?Sized,
    {
        if !graph.contains(config.origin) {
            return Err(Error::InvalidOrigin { id: config.origin });
        }

        let mut state = SearchState::new(graph, config);
        let stop = state.explore();
        debug!(
            origin = config.origin,
            destination = ?config.destination,
            settled = state.visited_system_count,
            %stop,
            "route search finished"
        );

        Ok(Self {
            origin: config.origin,
            destination: config.destination,
            stop,
            edges: state.settled,
        })
    }

    /// Reachability from `origin` using hyperlanes at the default fuel cost.
    pub fn from_origin<G>(graph: &G, origin: SystemId, limits: SearchLimits) -> Result<Self>
    where
        G: RouteGraph + ?Sized,
    {
        Self::run(graph, &SearchConfig::new(origin).with_limits(limits))
    }

    /// Reachability from `origin` with explicit drives and wormhole strategy.
    pub fn with_profile<G>(
        graph: &G,
        origin: SystemId,
        profile: TravelProfile,
        limits: SearchLimits,
    ) -> Result<Self>
    where
        G: RouteGraph + ?Sized,
    {
        let config = SearchConfig::new(origin)
            .with_profile(profile)
            .with_limits(limits);
        Self::run(graph, &config)
    }

    /// Reachability from wherever `traveller` is, restricted to what it knows.
    pub fn for_traveller<G, T>(graph: &G, traveller: &T, limits: SearchLimits) -> Result<Self>
    where
        G: RouteGraph + ?Sized,
        T: Traveller + ?Sized,
    {
        let config = SearchConfig::for_traveller(traveller)?.with_limits(limits);
        Self::run(graph, &config)
    }

    pub fn origin(&self) -> SystemId {
        self.origin
    }

    pub fn destination(&self) -> Option<SystemId> {
        self.destination
    }

    pub fn stop_reason(&self) -> SearchStop {
        self.stop
    }

    pub fn has_route(&self, system: SystemId) -> bool {
        self.edges.contains_key(&system)
    }

    /// Best edge into `system`, if it was reached.
    pub fn edge(&self, system: SystemId) -> Option<&RouteEdge> {
        self.edges.get(&system)
    }

    /// Days needed to reach `system`, or `None` when unreachable.
    pub fn days(&self, system: SystemId) -> Option<u32> {
        self.edge(system).map(|edge| edge.days_used)
    }

    /// Fuel needed to reach `system`, or `None` when unreachable.
    pub fn fuel(&self, system: SystemId) -> Option<u32> {
        self.edge(system).map(|edge| edge.fuel_used)
    }

    /// Every settled system with its best edge.
    pub fn edges(&self) -> &HashMap<SystemId, RouteEdge> {
        &self.edges
    }

    pub fn systems(&self) -> BTreeSet<SystemId> {
        self.edges.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Settled systems ordered from best to worst edge.
    pub fn ranked(&self) -> Vec<(SystemId, RouteEdge)> {
        let mut ranked: Vec<(SystemId, RouteEdge)> =
            self.edges.iter().map(|(id, edge)| (*id, *edge)).collect();
        ranked.sort_by(|a, b| a.1.cmp_priority(&b.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }

    /// Walk back-pointers from `system` towards the origin.
    ///
    /// Returns the `(system, edge)` pairs from `system` back to, but not
    /// including, the origin; `None` when `system` was not reached.
    pub fn backtrack(&self, system: SystemId) -> Option<Vec<(SystemId, RouteEdge)>> {
        let mut current = *self.edges.get(&system)?;
        let mut trail = Vec::new();
        let mut at = system;
        while let Some(previous) = current.previous {
            trail.push((at, current));
            at = previous;
            current = *self.edges.get(&previous)?;
        }
        Some(trail)
    }

    /// Systems visited after the origin on the best route to `system`, in
    /// travel order. Empty when `system` is unreachable or is the origin.
    pub fn path_to(&self, system: SystemId) -> Vec<SystemId> {
        let mut path: Vec<SystemId> = self
            .backtrack(system)
            .unwrap_or_default()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        path.reverse();
        path
    }
}

/// Frontier entry. Ordered so that `BinaryHeap` pops the best edge first.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    system: SystemId,
    edge: RouteEdge,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by priority.
        other
            .edge
            .cmp_priority(&self.edge)
            .then_with(|| other.system.cmp(&self.system))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Working state of one search; dropped once the result is extracted.
struct SearchState<'g, 'c, 'k, G: ?Sized> {
    graph: &'g G,
    config: &'c SearchConfig<'k>,
    settled: HashMap<SystemId, RouteEdge>,
    frontier: BinaryHeap<Candidate>,
    visited_system_count: usize,
}

impl<'g, 'c, 'k, G> SearchState<'g, 'c, 'k, G>
where
    G: RouteGraph + ?Sized,
{
    fn new(graph: &'g G, config: &'c SearchConfig<'k>) -> Self {
        Self {
            graph,
            config,
            settled: HashMap::new(),
            frontier: BinaryHeap::new(),
            visited_system_count: 0,
        }
    }

    fn explore(&mut self) -> SearchStop {
        let origin = self.config.origin;
        let max_systems = self.config.limits.max_systems.map(|max| max.max(1));
        let max_days = self.config.limits.max_days;

        self.frontier.push(Candidate {
            system: origin,
            edge: RouteEdge::origin(self.graph.danger(origin)),
        });

        while let Some(Candidate { system, edge }) = self.frontier.pop() {
            if self.has_better(system, &edge) {
                continue;
            }
            if max_days.is_some_and(|max| edge.days_used > max) {
                continue;
            }

            if self.settled.insert(system, edge).is_none() {
                self.visited_system_count += 1;
            }
            trace!(
                system,
                days = edge.days_used,
                fuel = edge.fuel_used,
                danger = edge.danger,
                "settled system"
            );

            if self.config.destination == Some(system) {
                return SearchStop::ReachedDestination;
            }
            if max_systems.is_some_and(|max| self.visited_system_count >= max) {
                return SearchStop::SystemLimit;
            }

            self.expand(system, &edge);
        }

        SearchStop::Exhausted
    }

    /// Push a candidate for every hop the profile allows out of `from`.
    fn expand(&mut self, from: SystemId, edge: &RouteEdge) {
        let graph = self.graph;
        let profile = self.config.profile;
        let danger = edge.departure_danger(graph.danger(from));

        if profile.has_hyperdrive() {
            for &to in graph.hyperlane_neighbours(from) {
                if !self.knows_hyperlane(from, to) {
                    continue;
                }
                let next = edge.extend(from, danger, HopKind::Hyperlane, profile.hyperlane_fuel, 1);
                self.offer(to, next);
            }
        }

        // Without a drive of its own, a ship cannot use a system's local range either.
        if profile.has_jump_drive() {
            let range = graph
                .jump_range_override(from)
                .unwrap_or(profile.jump_range);
            for to in graph.jump_neighbours(from, range) {
                if !graph.distance(from, to).is_some_and(|distance| distance <= range) {
                    continue;
                }
                let next = edge.extend(from, danger, HopKind::Jump, profile.jump_fuel, 1);
                self.offer(to, next);
            }
        }

        for link in graph.wormhole_links(from) {
            if !profile.wormholes.permits(link) {
                continue;
            }
            let next = edge.extend(from, danger, HopKind::Wormhole, link.fuel, link.days);
            self.offer(link.target, next);
        }
    }

    fn offer(&mut self, system: SystemId, edge: RouteEdge) {
        if !self.has_better(system, &edge) {
            self.frontier.push(Candidate { system, edge });
        }
    }

    /// Whether `system` is already settled with an edge at least as good.
    fn has_better(&self, system: SystemId, edge: &RouteEdge) -> bool {
        self.settled
            .get(&system)
            .is_some_and(|best| best.is_no_worse_than(edge))
    }

    fn knows_hyperlane(&self, from: SystemId, to: SystemId) -> bool {
        self.config
            .knowledge
            .map_or(true, |knowledge| knowledge.can_traverse(from, to))
    }
}
