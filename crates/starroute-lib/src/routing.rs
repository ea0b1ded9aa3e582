//! Route planning towards a single destination.
//!
//! A [`RoutePlan`] is built from the public result of a [`RouteSearch`]: it
//! follows back-pointers from the destination to the origin and keeps the
//! hops in travel order. Once built it no longer depends on the search.
//!
//! # Example
//!
//! ```ignore
//! use starroute_lib::{load_galaxy, RoutePlan};
//!
//! let galaxy = load_galaxy("galaxy.json".as_ref())?;
//! let sol = galaxy.resolve_system("Sol")?;
//! let sirius = galaxy.resolve_system("Sirius")?;
//! let plan = RoutePlan::new(&galaxy, sol, sirius)?;
//! println!("{:?} days, {:?} fuel", plan.days(), plan.required_fuel());
//! ```

use serde::Serialize;

use crate::actor::{TravelProfile, Traveller};
use crate::edge::RouteEdge;
use crate::error::Result;
use crate::galaxy::SystemId;
use crate::graph::{HopKind, RouteGraph};
use crate::search::{RouteSearch, SearchConfig};

/// One hop of a planned route: the system arrived at and how.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanStep {
    pub system: SystemId,
    pub edge: RouteEdge,
}

impl PlanStep {
    pub fn via(&self) -> Option<HopKind> {
        self.edge.via
    }
}

/// Best route from an origin to one destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    origin: SystemId,
    destination: SystemId,
    /// Edge into the destination; `None` when it is unreachable.
    arrival: Option<RouteEdge>,
    /// Hops in travel order, excluding the origin.
    steps: Vec<PlanStep>,
}

impl RoutePlan {
    /// Plan from `origin` using hyperlanes at the default fuel cost.
    pub fn new<G>(graph: &G, origin: SystemId, destination: SystemId) -> Result<Self>
    where
        G: RouteGraph + ?Sized,
    {
        let config = SearchConfig::new(origin).with_destination(destination);
        Self::search(graph, &config)
    }

    /// Plan from `origin` with explicit drives and wormhole strategy.
    pub fn with_profile<G>(
        graph: &G,
        origin: SystemId,
        destination: SystemId,
        profile: TravelProfile,
    ) -> Result<Self>
    where
        G: RouteGraph + ?Sized,
    {
        let config = SearchConfig::new(origin)
            .with_destination(destination)
            .with_profile(profile);
        Self::search(graph, &config)
    }

    /// Plan from wherever `traveller` is, using its drives and knowledge.
    pub fn for_traveller<G, T>(graph: &G, traveller: &T, destination: SystemId) -> Result<Self>
    where
        G: RouteGraph + ?Sized,
        T: Traveller + ?Sized,
    {
        let config = SearchConfig::for_traveller(traveller)?.with_destination(destination);
        Self::search(graph, &config)
    }

    /// Plan for `traveller` starting at `origin` instead of its location, e.g.
    /// when extending a route that is already planned.
    pub fn for_traveller_from<G, T>(
        graph: &G,
        traveller: &T,
        origin: SystemId,
        destination: SystemId,
    ) -> Result<Self>
    where
        G: RouteGraph + ?Sized,
        T: Traveller + ?Sized,
    {
        let config = SearchConfig::new(origin)
            .with_profile(traveller.travel_profile())
            .with_destination(destination);
        let config = match traveller.knowledge() {
            Some(knowledge) => config.with_knowledge(knowledge),
            None => config,
        };
        Self::search(graph, &config)
    }

    fn search<G>(graph: &G, config: &SearchConfig<'_>) -> Result<Self>
    where
        G: RouteGraph + ?Sized,
    {
        let search = RouteSearch::run(graph, config)?;
        let destination = config.destination.unwrap_or(config.origin);
        Ok(Self::from_search(&search, destination))
    }

    /// Extract the route to `destination` from a finished search.
    ///
    /// Any search that settled `destination` works, whether or not it was
    /// bounded to it.
    pub fn from_search(search: &RouteSearch, destination: SystemId) -> Self {
        let mut trail = search.backtrack(destination).unwrap_or_default();
        trail.reverse();
        Self {
            origin: search.origin(),
            destination,
            arrival: search.edge(destination).copied(),
            steps: trail
                .into_iter()
                .map(|(system, edge)| PlanStep { system, edge })
                .collect(),
        }
    }

    pub fn origin(&self) -> SystemId {
        self.origin
    }

    pub fn destination(&self) -> SystemId {
        self.destination
    }

    /// Whether the destination is reachable.
    pub fn has_route(&self) -> bool {
        self.arrival.is_some()
    }

    /// First system to travel to from the origin.
    pub fn first_step(&self) -> Option<SystemId> {
        self.steps.first().map(|step| step.system)
    }

    /// Days needed to reach the destination.
    pub fn days(&self) -> Option<u32> {
        self.arrival.map(|edge| edge.days_used)
    }

    /// Fuel needed to reach the destination.
    pub fn required_fuel(&self) -> Option<u32> {
        self.arrival.map(|edge| edge.fuel_used)
    }

    /// Accumulated danger of the route, excluding the destination itself.
    pub fn danger(&self) -> Option<f64> {
        self.arrival.map(|edge| edge.danger)
    }

    /// Systems to travel through after the origin, ending at the destination.
    pub fn plan(&self) -> Vec<SystemId> {
        self.steps.iter().map(|step| step.system).collect()
    }

    /// The complete route including the origin; empty when there is no route.
    pub fn full_path(&self) -> Vec<SystemId> {
        if !self.has_route() {
            return Vec::new();
        }
        std::iter::once(self.origin).chain(self.plan()).collect()
    }

    /// Fuel spent on each individual hop, paired with the system it reaches.
    pub fn fuel_costs(&self) -> Vec<(SystemId, u32)> {
        let mut spent = 0;
        self.steps
            .iter()
            .map(|step| {
                let hop = step.edge.fuel_used.saturating_sub(spent);
                spent = step.edge.fuel_used;
                (step.system, hop)
            })
            .collect()
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len()
    }

    /// Number of hops made with each kind of link.
    pub fn hops_via(&self, kind: HopKind) -> usize {
        self.steps
            .iter()
            .filter(|step| step.via() == Some(kind))
            .count()
    }
}
