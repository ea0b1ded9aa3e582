use std::fmt::Write;

use serde::Serialize;

use crate::galaxy::{Galaxy, SystemId};
use crate::graph::HopKind;
use crate::routing::RoutePlan;
use crate::search::{RouteSearch, SearchStop};

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: SystemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteEndpoint {
    fn resolve(galaxy: &Galaxy, id: SystemId) -> Self {
        Self {
            id,
            name: galaxy.system_name(id).map(str::to_string),
        }
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Hop taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: SystemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<HopKind>,
    /// Fuel spent on this hop alone.
    pub fuel: u32,
    pub days: u32,
}

impl RouteStep {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Structured representation of a route plan that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub found: bool,
    pub hops: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<f64>,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a structured summary with resolved system names.
    pub fn from_plan(galaxy: &Galaxy, plan: &RoutePlan) -> Self {
        let steps = plan
            .steps()
            .iter()
            .zip(plan.fuel_costs())
            .enumerate()
            .map(|(index, (step, (_, fuel)))| RouteStep {
                index: index + 1,
                id: step.system,
                name: galaxy.system_name(step.system).map(str::to_string),
                method: step.via(),
                fuel,
                days: step.edge.days_used,
            })
            .collect();

        Self {
            start: RouteEndpoint::resolve(galaxy, plan.origin()),
            goal: RouteEndpoint::resolve(galaxy, plan.destination()),
            found: plan.has_route(),
            hops: plan.hop_count(),
            days: plan.days(),
            fuel: plan.required_fuel(),
            danger: plan.danger(),
            steps,
        }
    }

    /// Render the summary as plain text.
    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        if !self.found {
            let _ = writeln!(
                buffer,
                "No route: {} -> {} is unreachable",
                self.start.display_name(),
                self.goal.display_name()
            );
            return buffer;
        }

        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, {} days, {} fuel)",
            self.start.display_name(),
            self.goal.display_name(),
            self.hops,
            self.days.unwrap_or_default(),
            self.fuel.unwrap_or_default()
        );
        let _ = writeln!(
            buffer,
            "{:>3}: {} ({})",
            0,
            self.start.display_name(),
            self.start.id
        );
        for step in &self.steps {
            let method = step.method.map_or("-", hop_label);
            let _ = writeln!(
                buffer,
                "{:>3}: {} ({}) via {}, {} fuel",
                step.index,
                step.display_name(),
                step.id,
                method,
                step.fuel
            );
        }
        buffer
    }
}

/// One row of a reachability table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReachableSystem {
    pub id: SystemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub days: u32,
    pub fuel: u32,
    pub danger: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<SystemId>,
}

/// Reachability table from one origin, ordered best first.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReachabilitySummary {
    pub origin: RouteEndpoint,
    pub stop: SearchStop,
    pub systems: Vec<ReachableSystem>,
}

impl ReachabilitySummary {
    pub fn from_search(galaxy: &Galaxy, search: &RouteSearch) -> Self {
        let systems = search
            .ranked()
            .into_iter()
            .map(|(id, edge)| ReachableSystem {
                id,
                name: galaxy.system_name(id).map(str::to_string),
                days: edge.days_used,
                fuel: edge.fuel_used,
                danger: edge.danger,
                previous: edge.previous,
            })
            .collect();

        Self {
            origin: RouteEndpoint::resolve(galaxy, search.origin()),
            stop: search.stop_reason(),
            systems,
        }
    }

    /// Render the table as plain text.
    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Reachable from {}: {} systems ({})",
            self.origin.display_name(),
            self.systems.len(),
            self.stop
        );
        for system in &self.systems {
            let _ = writeln!(
                buffer,
                "{:>5} days {:>7} fuel  {} ({})",
                system.days,
                system.fuel,
                system.name.as_deref().unwrap_or("<unknown>"),
                system.id
            );
        }
        buffer
    }
}

fn hop_label(kind: HopKind) -> &'static str {
    match kind {
        HopKind::Hyperlane => "hyperlane",
        HopKind::Jump => "jump",
        HopKind::Wormhole => "wormhole",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::GalaxyBuilder;

    #[test]
    fn route_summary_lists_each_hop() {
        let galaxy = GalaxyBuilder::new().chain(&[1, 2, 3]).build();
        let plan = RoutePlan::new(&galaxy, 1, 3).expect("origin exists");
        let summary = RouteSummary::from_plan(&galaxy, &plan);

        assert!(summary.found);
        assert_eq!(summary.hops, 2);
        assert_eq!(summary.steps[1].name.as_deref(), Some("S3"));
        assert_eq!(summary.steps[1].fuel, 100);

        let text = summary.render_plain();
        assert!(text.starts_with("Route: S1 -> S3 (2 hops, 2 days, 200 fuel)"));
        assert!(text.contains("  2: S3 (3) via hyperlane, 100 fuel"));
    }

    #[test]
    fn missing_route_renders_a_notice() {
        let galaxy = GalaxyBuilder::new().system(1).system(2).build();
        let plan = RoutePlan::new(&galaxy, 1, 2).expect("origin exists");
        let summary = RouteSummary::from_plan(&galaxy, &plan);

        assert!(!summary.found);
        assert!(summary.render_plain().contains("unreachable"));
        let json = serde_json::to_value(&summary).expect("serialises");
        assert!(json.get("days").is_none());
    }
}
