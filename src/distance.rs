//! Dense arc-distance matrix and the candidate arc builder.

use crate::{GraphError, UnitVec3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Distances at or below this are treated as "no arc".
pub const ARC_EPS: f64 = 1e-5;

/// Conditionally parallel iterator over a mutable slice in fixed chunks.
macro_rules! maybe_par_chunks_mut {
    ($slice:expr, $size:expr) => {{
        #[cfg(feature = "parallel")]
        {
            $slice.par_chunks_mut($size)
        }
        #[cfg(not(feature = "parallel"))]
        {
            $slice.chunks_mut($size)
        }
    }};
}

/// Great-circle distance between two points on the unit sphere.
///
/// Uses the chord-to-arc conversion `2 * asin(|a - b| / 2)`. The asin
/// argument is clamped so antipodal points that overshoot 2 by rounding
/// still map to pi.
#[inline]
pub fn spherical_distance(a: UnitVec3, b: UnitVec3) -> f64 {
    let half_chord = (a.chord(b) / 2.0).clamp(-1.0, 1.0);
    2.0 * half_chord.asin()
}

/// Square arc-distance matrix, stored row-major.
///
/// Entry `(i, j)` holds the cost of arc `i -> j`; an entry at or below
/// [`ARC_EPS`] means the arc is absent. The diagonal is always zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDistanceMatrix"))]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

/// Wire form of [`DistanceMatrix`]; checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDistanceMatrix> for DistanceMatrix {
    type Error = GraphError;

    fn try_from(raw: RawDistanceMatrix) -> Result<Self, GraphError> {
        let matrix = Self {
            n: raw.n,
            data: raw.data,
        };
        matrix.check()?;
        Ok(matrix)
    }
}

impl DistanceMatrix {
    /// An `n x n` matrix with no arcs.
    ///
    /// Panics if `n * n` overflows `usize`; [`crate::GraphConfig::validate`]
    /// rejects such sizes first.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Build from nested rows, checking shape and entries.
    ///
    /// Rejects non-square input, negative or non-finite entries, and
    /// non-zero diagonal entries (self-loops).
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, GraphError> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(GraphError::DimensionMismatch {
                    expected: n,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        let matrix = Self { n, data };
        matrix.check()?;
        Ok(matrix)
    }

    /// Reject a buffer that is not `n * n` long, negative or non-finite
    /// entries, and diagonal arcs.
    pub fn check(&self) -> Result<(), GraphError> {
        let expected = self
            .n
            .checked_mul(self.n)
            .ok_or(GraphError::TooManyVertices(self.n))?;
        if self.data.len() != expected {
            return Err(GraphError::DimensionMismatch {
                expected,
                actual: self.data.len(),
            });
        }
        for (k, &value) in self.data.iter().enumerate() {
            let (i, j) = (k / self.n, k % self.n);
            let bad_entry = !value.is_finite() || value < 0.0;
            let self_loop = i == j && value > ARC_EPS;
            if bad_entry || self_loop {
                return Err(GraphError::InvalidDistance { i, j, value });
            }
        }
        Ok(())
    }

    /// Number of vertices (matrix side length).
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, distance: f64) {
        self.data[i * self.n + j] = distance;
    }

    /// Remove arc `i -> j`.
    #[inline]
    pub fn delete(&mut self, i: usize, j: usize) {
        self.set(i, j, 0.0);
    }

    /// Whether arc `i -> j` is present.
    #[inline]
    pub fn is_arc(&self, i: usize, j: usize) -> bool {
        self.get(i, j) > ARC_EPS
    }

    /// Row `i`: distances of arcs leaving vertex `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Iterate present arcs as `(i, j, distance)` in row-major order.
    pub fn iter_arcs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.n;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d > ARC_EPS)
            .map(move |(k, &d)| (k / n, k % n, d))
    }

    pub fn num_arcs(&self) -> usize {
        self.data.iter().filter(|&&d| d > ARC_EPS).count()
    }

    pub fn out_degree(&self, v: usize) -> usize {
        self.row(v).iter().filter(|&&d| d > ARC_EPS).count()
    }

    pub fn in_degree(&self, v: usize) -> usize {
        (0..self.n).filter(|&i| self.is_arc(i, v)).count()
    }

    /// Per-vertex `(in_degrees, out_degrees)` in a single pass.
    pub fn degrees(&self) -> (Vec<usize>, Vec<usize>) {
        let mut in_deg = vec![0usize; self.n];
        let mut out_deg = vec![0usize; self.n];
        for (i, j, _) in self.iter_arcs() {
            out_deg[i] += 1;
            in_deg[j] += 1;
        }
        (in_deg, out_deg)
    }

    /// Sum of all present arc distances.
    pub fn total_distance(&self) -> f64 {
        self.iter_arcs().map(|(_, _, d)| d).sum()
    }

    /// Boolean arc-presence matrix.
    pub fn presence(&self) -> Vec<Vec<bool>> {
        (0..self.n)
            .map(|i| self.row(i).iter().map(|&d| d > ARC_EPS).collect())
            .collect()
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }
}

/// Build the complete directed candidate graph on `vertices`.
///
/// Every ordered pair `(i, j)` with `i != j` gets its spherical distance;
/// the diagonal stays zero. Two distinct vertices that coincide produce a
/// zero-length arc, which reads as absent.
pub fn build_candidate_matrix(vertices: &[UnitVec3]) -> DistanceMatrix {
    let n = vertices.len();
    let mut matrix = DistanceMatrix::zeros(n);
    if n == 0 {
        return matrix;
    }

    maybe_par_chunks_mut!(matrix.data, n)
        .enumerate()
        .for_each(|(i, row)| {
            let vi = vertices[i];
            for (j, slot) in row.iter_mut().enumerate() {
                if i != j {
                    *slot = spherical_distance(vi, vertices[j]);
                }
            }
        });

    log::debug!(
        "built candidate graph: {} vertices, {} candidate arcs",
        n,
        n * (n - 1)
    );
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn axis_points() -> Vec<UnitVec3> {
        vec![
            UnitVec3::new(1.0, 0.0, 0.0),
            UnitVec3::new(0.0, 1.0, 0.0),
            UnitVec3::new(0.0, 0.0, 1.0),
            UnitVec3::new(-1.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_spherical_distance_known_angles() {
        let x = UnitVec3::new(1.0, 0.0, 0.0);
        let y = UnitVec3::new(0.0, 1.0, 0.0);
        let nx = UnitVec3::new(-1.0, 0.0, 0.0);
        assert!((spherical_distance(x, y) - FRAC_PI_2).abs() < 1e-12);
        assert!((spherical_distance(x, nx) - PI).abs() < 1e-12);
        assert_eq!(spherical_distance(x, x), 0.0);
    }

    #[test]
    fn test_spherical_distance_clamps_overshoot() {
        // Slightly longer than unit: chord exceeds 2 without clamping.
        let a = UnitVec3::new(1.0 + 1e-12, 0.0, 0.0);
        let b = UnitVec3::new(-1.0 - 1e-12, 0.0, 0.0);
        let d = spherical_distance(a, b);
        assert!(d.is_finite());
        assert!((d - PI).abs() < 1e-9);
    }

    #[test]
    fn test_candidate_matrix_is_complete() {
        let m = build_candidate_matrix(&axis_points());
        assert_eq!(m.n(), 4);
        assert_eq!(m.num_arcs(), 12);
        for i in 0..4 {
            assert_eq!(m.get(i, i), 0.0);
            assert_eq!(m.in_degree(i), 3);
            assert_eq!(m.out_degree(i), 3);
        }
        assert!((m.get(0, 3) - PI).abs() < 1e-12);
        assert!((m.get(1, 2) - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_candidate_matrix_symmetric() {
        let m = build_candidate_matrix(&axis_points());
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn test_iter_arcs_row_major() {
        let m = build_candidate_matrix(&axis_points());
        let pairs: Vec<(usize, usize)> = m.iter_arcs().map(|(i, j, _)| (i, j)).collect();
        let mut sorted = pairs.clone();
        sorted.sort();
        assert_eq!(pairs, sorted);
        assert_eq!(pairs.first(), Some(&(0, 1)));
        assert_eq!(pairs.last(), Some(&(3, 2)));
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]),
            Err(GraphError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]),
            Err(GraphError::InvalidDistance { i: 0, j: 1, .. })
        ));
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![0.5, 1.0], vec![1.0, 0.0]]),
            Err(GraphError::InvalidDistance { i: 0, j: 0, .. })
        ));
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![0.0, f64::NAN], vec![1.0, 0.0]]),
            Err(GraphError::InvalidDistance { .. })
        ));
    }

    #[test]
    fn test_threshold_not_exact_zero() {
        let mut m = DistanceMatrix::zeros(2);
        m.set(0, 1, ARC_EPS / 2.0);
        m.set(1, 0, 0.5);
        assert!(!m.is_arc(0, 1));
        assert!(m.is_arc(1, 0));
        assert_eq!(m.num_arcs(), 1);
        assert_eq!(m.presence(), vec![vec![false, false], vec![true, false]]);
    }

    #[test]
    fn test_rows_round_trip() {
        let m = build_candidate_matrix(&axis_points());
        let back = DistanceMatrix::from_rows(m.to_rows()).unwrap();
        assert_eq!(m, back);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_checks_shape_and_entries() {
        let m = build_candidate_matrix(&axis_points());
        let json = serde_json::to_string(&m).unwrap();
        let back: DistanceMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        let long = r#"{"n":2,"data":[0.0,1.0,1.0,0.0,5.0]}"#;
        let err = serde_json::from_str::<DistanceMatrix>(long).unwrap_err();
        assert!(err.to_string().contains("dimension mismatch"), "{err}");

        let negative = r#"{"n":2,"data":[0.0,-1.0,1.0,0.0]}"#;
        assert!(serde_json::from_str::<DistanceMatrix>(negative).is_err());

        let huge = format!(r#"{{"n":{},"data":[]}}"#, usize::MAX);
        assert!(serde_json::from_str::<DistanceMatrix>(&huge).is_err());
    }
}
