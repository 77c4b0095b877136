//! Greedy long-arc deletion under per-vertex degree floors.
//!
//! The sparsifier walks candidate arcs from longest to shortest and deletes
//! an arc only when both its head's in-degree and its tail's out-degree are
//! strictly above the floor. Every visited arc consumes one unit of the
//! budget `floor(candidates * throw_away_perc)`, whether or not it was
//! deleted, so the budget bounds arcs *considered*, not arcs *removed*.
//! [`SparsifyStats`] reports both so callers can spot under-sparsification.

use crate::distance::DistanceMatrix;
use crate::GraphError;

/// Bookkeeping from one sparsification pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparsifyStats {
    /// Present arcs in the input matrix.
    pub candidates: usize,
    /// `floor(candidates * throw_away_perc)`.
    pub budget: usize,
    /// Arcs visited by the walk (never exceeds `budget`).
    pub considered: usize,
    /// Arcs actually removed.
    pub deleted: usize,
    /// Visits skipped because the head was at its in-degree floor.
    pub skipped_in_floor: usize,
    /// Visits skipped because the tail was at its out-degree floor.
    pub skipped_out_floor: usize,
}

impl SparsifyStats {
    /// Budget slots spent on arcs that were kept.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped_in_floor + self.skipped_out_floor
    }
}

/// Output of [`sparsify`]: the reduced matrix and the chosen endpoints.
#[derive(Debug, Clone)]
pub struct Sparsified {
    pub distances: DistanceMatrix,
    /// Tail of the longest candidate arc.
    pub source: usize,
    /// Head of the longest candidate arc.
    pub sink: usize,
    pub stats: SparsifyStats,
}

/// Candidate arcs ordered by descending distance.
///
/// Ties keep row-major order (stable sort), so the ordering, and with it
/// the source/sink choice, is fully deterministic.
pub fn descending_order(matrix: &DistanceMatrix) -> Vec<(usize, usize, f64)> {
    let mut order: Vec<(usize, usize, f64)> = matrix.iter_arcs().collect();
    order.sort_by(|a, b| b.2.total_cmp(&a.2));
    order
}

/// Run the greedy deletion pass on `full`, returning a new matrix.
///
/// `full` is left untouched. Callers are expected to have validated
/// `degree` and `throw_away_perc` (see [`crate::GraphConfig::validate`]);
/// the only error here is an input with no arcs, which leaves no source or
/// sink to choose.
pub fn sparsify(
    full: &DistanceMatrix,
    degree: usize,
    throw_away_perc: f64,
) -> Result<Sparsified, GraphError> {
    let order = descending_order(full);
    let &(source, sink, longest) = order.first().ok_or(GraphError::NoCandidateArcs)?;

    let candidates = order.len();
    let budget = (candidates as f64 * throw_away_perc).floor() as usize;

    let (mut in_deg, mut out_deg) = full.degrees();
    let mut distances = full.clone();
    let mut stats = SparsifyStats {
        candidates,
        budget,
        ..SparsifyStats::default()
    };

    // `take` stops at the budget or at the end of the order, whichever is first.
    for &(i, j, _) in order.iter().take(budget) {
        stats.considered += 1;
        if in_deg[j] <= degree {
            stats.skipped_in_floor += 1;
            continue;
        }
        if out_deg[i] <= degree {
            stats.skipped_out_floor += 1;
            continue;
        }
        distances.delete(i, j);
        in_deg[j] -= 1;
        out_deg[i] -= 1;
        stats.deleted += 1;
    }

    log::debug!(
        "sparsified: source={} sink={} (longest arc {:.6}), {:?}",
        source,
        sink,
        longest,
        stats
    );
    if stats.deleted < stats.budget {
        log::warn!(
            "sparsifier removed {} of {} budgeted arcs ({} kept by degree floor {})",
            stats.deleted,
            stats.budget,
            stats.skipped(),
            degree
        );
    }

    Ok(Sparsified {
        distances,
        source,
        sink,
        stats,
    })
}
