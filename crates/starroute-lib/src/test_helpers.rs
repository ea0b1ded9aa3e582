// Test-only helpers for `starroute-lib` tests
#![allow(dead_code)]

use std::collections::BTreeMap;

use crate::galaxy::{Galaxy, GalaxyDocument, System, SystemId, SystemPosition, WormholeDefinition};

/// Builder to create small `Galaxy` instances in tests with sensible defaults.
///
/// Systems are created on first mention and named `S<id>`.
pub struct GalaxyBuilder {
    systems: BTreeMap<SystemId, System>,
    hyperlanes: Vec<(SystemId, SystemId)>,
    wormholes: Vec<WormholeDefinition>,
}

impl GalaxyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            systems: BTreeMap::new(),
            hyperlanes: Vec::new(),
            wormholes: Vec::new(),
        }
    }

    fn entry(&mut self, id: SystemId) -> &mut System {
        self.systems.entry(id).or_insert_with(|| System {
            id,
            name: format!("S{id}"),
            position: None,
            danger: 0.0,
            jump_range: None,
        })
    }

    pub fn system(mut self, id: SystemId) -> Self {
        self.entry(id);
        self
    }

    /// Place a system on the x axis.
    pub fn at(mut self, id: SystemId, x: f64) -> Self {
        self.entry(id).position = Some(SystemPosition { x, y: 0.0, z: 0.0 });
        self
    }

    pub fn danger(mut self, id: SystemId, danger: f64) -> Self {
        self.entry(id).danger = danger;
        self
    }

    pub fn jump_range(mut self, id: SystemId, range: f64) -> Self {
        self.entry(id).jump_range = Some(range);
        self
    }

    pub fn lane(mut self, a: SystemId, b: SystemId) -> Self {
        self.entry(a);
        self.entry(b);
        self.hyperlanes.push((a, b));
        self
    }

    /// Connect the given systems one after another with hyperlanes.
    pub fn chain(mut self, ids: &[SystemId]) -> Self {
        for &id in ids {
            self.entry(id);
        }
        for pair in ids.windows(2) {
            self = self.lane(pair[0], pair[1]);
        }
        self
    }

    pub fn wormhole(mut self, from: SystemId, to: SystemId, fuel: u32, days: u32) -> Self {
        self.entry(from);
        self.entry(to);
        self.wormholes.push(WormholeDefinition {
            from,
            to,
            fuel,
            days,
        });
        self
    }

    pub fn build(self) -> Galaxy {
        Galaxy::from_document(GalaxyDocument {
            systems: self.systems.into_values().collect(),
            hyperlanes: self.hyperlanes,
            wormholes: self.wormholes,
        })
        .expect("test galaxy is valid")
    }
}

impl Default for GalaxyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
