//! KD-tree index over system positions for jump drive range queries.
//!
//! Positions are rotated by a fixed orthonormal matrix before they are
//! indexed. The tree splits buckets along one axis at a time and cannot split
//! a bucket whose items all share that axis value, which flat or grid-aligned
//! galaxies would otherwise produce. Rotation leaves distances unchanged.

use std::fmt;

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::debug;

use crate::galaxy::{SystemId, SystemPosition};

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Relative widening of query radii so rounding in the rotation never drops a
/// system that lies exactly on the boundary. Callers filter by exact distance.
const RADIUS_SLACK: f64 = 1e-9;

/// Spatial index of every positioned system.
pub struct SpatialIndex {
    /// Items are indices into `ids`.
    tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32>,
    ids: Vec<SystemId>,
    rotation: [[f64; 3]; 3],
}

impl SpatialIndex {
    /// Index the given systems. Systems without a position are skipped by the
    /// caller.
    pub fn build<I>(systems: I) -> Self
    where
        I: IntoIterator<Item = (SystemId, SystemPosition)>,
    {
        let rotation = rotation_matrix();
        let mut tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32> = KdTree::new();
        let mut ids = Vec::new();

        for (id, position) in systems {
            tree.add(&rotate(&rotation, &position), ids.len());
            ids.push(id);
        }

        debug!(node_count = ids.len(), "built spatial index");

        Self {
            tree,
            ids,
            rotation,
        }
    }

    /// Number of indexed systems.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Systems within roughly `radius` of `point`, sorted by id.
    ///
    /// The result may include systems a hair beyond `radius`; it never misses
    /// one inside it.
    pub fn within_radius(&self, point: &SystemPosition, radius: f64) -> Vec<SystemId> {
        if radius.is_nan() || radius <= 0.0 || self.ids.is_empty() {
            return Vec::new();
        }

        let padded = radius * (1.0 + RADIUS_SLACK) + RADIUS_SLACK;
        let query = rotate(&self.rotation, point);
        let mut found: Vec<SystemId> = self
            .tree
            .within::<SquaredEuclidean>(&query, padded * padded)
            .into_iter()
            .map(|neighbour| self.ids[neighbour.item])
            .collect();
        found.sort_unstable();
        found
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::build(std::iter::empty())
    }
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.ids.len())
            .finish()
    }
}

/// Rotation about z, then y, then x by fixed irrational-looking angles.
fn rotation_matrix() -> [[f64; 3]; 3] {
    let (sa, ca) = 0.61_f64.sin_cos();
    let (sb, cb) = 0.93_f64.sin_cos();
    let (sc, cc) = 1.27_f64.sin_cos();
    let rz = [[ca, -sa, 0.0], [sa, ca, 0.0], [0.0, 0.0, 1.0]];
    let ry = [[cb, 0.0, sb], [0.0, 1.0, 0.0], [-sb, 0.0, cb]];
    let rx = [[1.0, 0.0, 0.0], [0.0, cc, -sc], [0.0, sc, cc]];
    multiply(&rx, &multiply(&ry, &rz))
}

fn multiply(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (row, out_row) in out.iter_mut().enumerate() {
        for (col, cell) in out_row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[row][k] * b[k][col]).sum();
        }
    }
    out
}

fn rotate(rotation: &[[f64; 3]; 3], position: &SystemPosition) -> [f64; 3] {
    let v = [position.x, position.y, position.z];
    let mut out = [0.0; 3];
    for (row, cell) in out.iter_mut().enumerate() {
        *cell = (0..3).map(|k| rotation[row][k] * v[k]).sum();
    }
    out
}
