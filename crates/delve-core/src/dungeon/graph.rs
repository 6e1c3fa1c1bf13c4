//! Dense distance matrix over the sampled nodes
//!
//! Only axis-aligned pairs are connected so that corridors stay orthogonal.
//! Weights are squared distances: the MST only compares them, and squaring
//! preserves their order. Memory is O(n²), which is fine for grid-sampled
//! node counts.

use super::sampler::Point;

/// Marker for "no edge" in the matrix
pub const NO_EDGE: i64 = -1;

/// Symmetric matrix of squared distances, `NO_EDGE` where not connected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceGraph {
    size: usize,
    weights: Vec<i64>,
}

impl DistanceGraph {
    /// Build the matrix for `points`, in point index order
    pub fn build(points: &[Point]) -> Self {
        let size = points.len();
        let mut weights = Vec::with_capacity(size * size);

        for (f, from) in points.iter().enumerate() {
            for (t, to) in points.iter().enumerate() {
                let weight = if f == t || !from.is_aligned_with(to) {
                    NO_EDGE
                } else {
                    from.distance_squared(to)
                };
                weights.push(weight);
            }
        }

        Self { size, weights }
    }

    /// Build straight from a weight matrix; negative entries mean no edge
    pub fn from_matrix(rows: &[Vec<i64>]) -> Self {
        let size = rows.len();
        let weights = rows
            .iter()
            .flat_map(|row| {
                (0..size).map(|t| row.get(t).copied().unwrap_or(NO_EDGE).max(NO_EDGE))
            })
            .collect();
        Self { size, weights }
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Raw matrix entry, `NO_EDGE` if absent
    #[inline]
    pub fn raw(&self, from: usize, to: usize) -> i64 {
        self.weights[from * self.size + to]
    }

    /// Edge weight, if the nodes are connected
    pub fn weight(&self, from: usize, to: usize) -> Option<i64> {
        if from >= self.size || to >= self.size {
            return None;
        }
        let w = self.raw(from, to);
        (w >= 0).then_some(w)
    }
}
