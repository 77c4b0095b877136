//! Arc-indexed views of a sparsified graph.
//!
//! Solvers address arcs by a dense position `a` in `[0, num_arcs)` rather
//! than by matrix cell. [`ArcIndex`] fixes that numbering (row-major over
//! surviving arcs) and precomputes per-vertex incidence lists.

use crate::distance::DistanceMatrix;

/// Factor applied to the total arc length to get the big-M constant.
pub const UPPER_BOUND_FACTOR: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ArcIndex {
    /// Surviving arcs as `[tail, head]`, row-major.
    arcs: Vec<[usize; 2]>,
    /// Distance of `arcs[a]`.
    distances: Vec<f64>,
    /// `arcs_in[v]`: ascending positions of arcs whose head is `v`.
    arcs_in: Vec<Vec<usize>>,
    /// `arcs_out[v]`: ascending positions of arcs whose tail is `v`.
    arcs_out: Vec<Vec<usize>>,
}

impl ArcIndex {
    pub fn build(matrix: &DistanceMatrix) -> Self {
        let n = matrix.n();
        let mut arcs = Vec::new();
        let mut distances = Vec::new();
        let mut arcs_in = vec![Vec::new(); n];
        let mut arcs_out = vec![Vec::new(); n];

        for (a, (i, j, d)) in matrix.iter_arcs().enumerate() {
            arcs.push([i, j]);
            distances.push(d);
            arcs_in[j].push(a);
            arcs_out[i].push(a);
        }

        log::debug!("indexed {} arcs over {} vertices", arcs.len(), n);

        Self {
            arcs,
            distances,
            arcs_in,
            arcs_out,
        }
    }

    #[inline]
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Number of vertices the index was built over.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.arcs_in.len()
    }

    #[inline]
    pub fn arcs(&self) -> &[[usize; 2]] {
        &self.arcs
    }

    #[inline]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    #[inline]
    pub fn arcs_in(&self, v: usize) -> &[usize] {
        &self.arcs_in[v]
    }

    #[inline]
    pub fn arcs_out(&self, v: usize) -> &[usize] {
        &self.arcs_out[v]
    }

    /// Position of arc `i -> j`, if it survived.
    pub fn position(&self, i: usize, j: usize) -> Option<usize> {
        self.arcs.binary_search(&[i, j]).ok()
    }

    pub fn total_distance(&self) -> f64 {
        self.distances.iter().sum()
    }

    /// Finite stand-in for infinity: three times the total arc length.
    pub fn upper_bound(&self) -> f64 {
        UPPER_BOUND_FACTOR * self.total_distance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_matrix() -> DistanceMatrix {
        // 0 -> 1, 0 -> 2, 2 -> 1
        DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![0.0, 0.0, 0.0],
            vec![0.0, 0.5, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_row_major_numbering() {
        let index = ArcIndex::build(&small_matrix());
        assert_eq!(index.num_arcs(), 3);
        assert_eq!(index.arcs(), &[[0, 1], [0, 2], [2, 1]]);
        assert_eq!(index.distances(), &[1.0, 2.0, 0.5]);
    }

    #[test]
    fn test_incidence_lists() {
        let index = ArcIndex::build(&small_matrix());
        assert_eq!(index.arcs_out(0), &[0, 1]);
        assert!(index.arcs_out(1).is_empty());
        assert_eq!(index.arcs_out(2), &[2]);
        assert!(index.arcs_in(0).is_empty());
        assert_eq!(index.arcs_in(1), &[0, 2]);
        assert_eq!(index.arcs_in(2), &[1]);
    }

    #[test]
    fn test_upper_bound() {
        let index = ArcIndex::build(&small_matrix());
        assert_eq!(index.total_distance(), 3.5);
        assert_eq!(index.upper_bound(), 10.5);
    }

    #[test]
    fn test_position_lookup() {
        let index = ArcIndex::build(&small_matrix());
        assert_eq!(index.position(0, 2), Some(1));
        assert_eq!(index.position(2, 1), Some(2));
        assert_eq!(index.position(1, 0), None);
    }

    #[test]
    fn test_empty_graph() {
        let index = ArcIndex::build(&DistanceMatrix::zeros(4));
        assert!(index.is_empty());
        assert_eq!(index.num_vertices(), 4);
        assert_eq!(index.upper_bound(), 0.0);
    }
}
