//! starroute library entry points.
//!
//! This crate models a galaxy of star systems linked by hyperlanes, jump
//! drive range, and wormholes, and runs single-origin route searches over it.
//! A [`RouteSearch`] produces the best known edge into every reachable
//! system; a [`RoutePlan`] turns that result into an ordered route towards
//! one destination. Higher-level consumers (the CLI) should only depend on
//! the items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod actor;
pub mod edge;
pub mod error;
pub mod galaxy;
pub mod graph;
pub mod output;
pub mod routing;
pub mod search;
pub mod ship;
pub mod spatial;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use actor::{
    ActorKnowledge, KnowledgeOracle, Pilot, Ship, TravelProfile, Traveller, WormholeStrategy,
};
pub use edge::RouteEdge;
pub use error::{Error, Result};
pub use galaxy::{load_galaxy, Galaxy, GalaxyDocument, System, SystemId, SystemPosition};
pub use graph::{HopKind, RouteGraph, WormholeLink};
pub use output::{ReachabilitySummary, RouteSummary};
pub use routing::{PlanStep, RoutePlan};
pub use search::{RouteSearch, SearchConfig, SearchLimits, SearchStop};
pub use ship::ShipCatalog;
pub use spatial::SpatialIndex;
