use std::cmp::Ordering;

use serde::Serialize;

use crate::galaxy::SystemId;
use crate::graph::HopKind;

/// Best known way of arriving at a system.
///
/// `fuel_used` and `days_used` accumulate over the whole route. `danger`
/// covers every system the route has left behind, but not the system this
/// edge arrives at: every route through that system pays its danger anyway,
/// so it is charged when the route moves on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteEdge {
    /// System this edge backtracks to; `None` for the origin.
    pub previous: Option<SystemId>,
    pub fuel_used: u32,
    pub days_used: u32,
    pub danger: f64,
    /// Kind of the final hop; `None` for the origin.
    pub via: Option<HopKind>,
}

impl RouteEdge {
    /// Edge for the origin of a search. The origin is never left by a hop
    /// from elsewhere, so its own danger is seeded here directly.
    pub fn origin(danger: f64) -> Self {
        Self {
            previous: None,
            fuel_used: 0,
            days_used: 0,
            danger,
            via: None,
        }
    }

    pub fn is_origin(&self) -> bool {
        self.previous.is_none()
    }

    /// Danger carried by any route that leaves `system` after arriving by this
    /// edge. `system_danger` is the danger of `system` itself.
    pub fn departure_danger(&self, system_danger: f64) -> f64 {
        if self.is_origin() {
            self.danger
        } else {
            self.danger + system_danger
        }
    }

    /// Extend a route leaving `from` (reached by `self`) by one hop.
    pub fn extend(
        &self,
        from: SystemId,
        departure_danger: f64,
        via: HopKind,
        fuel: u32,
        days: u32,
    ) -> Self {
        Self {
            previous: Some(from),
            fuel_used: self.fuel_used.saturating_add(fuel),
            days_used: self.days_used.saturating_add(days),
            danger: departure_danger,
            via: Some(via),
        }
    }

    /// Total order deciding which of two edges is better; `Less` means `self`
    /// is explored first.
    ///
    /// Days dominate, then danger, then fuel. Changing the key order changes
    /// which of several equally long routes gets reported.
    pub fn cmp_priority(&self, other: &Self) -> Ordering {
        self.days_used
            .cmp(&other.days_used)
            .then_with(|| self.danger.total_cmp(&other.danger))
            .then_with(|| self.fuel_used.cmp(&other.fuel_used))
    }

    /// `true` when `self` is at least as good as `other`.
    pub fn is_no_worse_than(&self, other: &Self) -> bool {
        self.cmp_priority(other) != Ordering::Greater
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(days: u32, danger: f64, fuel: u32) -> RouteEdge {
        RouteEdge {
            previous: Some(1),
            fuel_used: fuel,
            days_used: days,
            danger,
            via: Some(HopKind::Hyperlane),
        }
    }

    #[test]
    fn days_dominate_danger_and_fuel() {
        let quick = edge(1, 9.0, 900);
        let slow = edge(2, 0.0, 0);
        assert_eq!(quick.cmp_priority(&slow), Ordering::Less);
    }

    #[test]
    fn danger_breaks_day_ties_before_fuel() {
        let safe = edge(3, 0.5, 400);
        let risky = edge(3, 1.5, 100);
        assert_eq!(safe.cmp_priority(&risky), Ordering::Less);
    }

    #[test]
    fn fuel_breaks_remaining_ties() {
        let cheap = edge(3, 1.0, 100);
        let costly = edge(3, 1.0, 200);
        assert_eq!(cheap.cmp_priority(&costly), Ordering::Less);
        assert_eq!(cheap.cmp_priority(&cheap), Ordering::Equal);
        assert!(cheap.is_no_worse_than(&cheap));
        assert!(!costly.is_no_worse_than(&cheap));
    }

    #[test]
    fn origin_danger_is_not_charged_twice() {
        let origin = RouteEdge::origin(2.0);
        assert_eq!(origin.departure_danger(2.0), 2.0);

        let next = origin.extend(1, origin.departure_danger(2.0), HopKind::Hyperlane, 100, 1);
        assert_eq!(next.danger, 2.0);
        assert_eq!(next.departure_danger(0.5), 2.5);
    }

    #[test]
    fn extend_accumulates_costs() {
        let origin = RouteEdge::origin(0.0);
        let hop = origin.extend(7, 0.0, HopKind::Wormhole, 30, 2);
        assert_eq!(hop.previous, Some(7));
        assert_eq!(hop.fuel_used, 30);
        assert_eq!(hop.days_used, 2);
        assert_eq!(hop.via, Some(HopKind::Wormhole));

        let saturated = RouteEdge {
            fuel_used: u32::MAX,
            ..hop
        }
        .extend(8, 0.0, HopKind::Jump, 10, 1);
        assert_eq!(saturated.fuel_used, u32::MAX);
    }
}
