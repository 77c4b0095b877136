//! Structural validation for generated instances.
//!
//! Checks the invariants a solver relies on: vertices on the sphere, no
//! self-loops, arc costs matching the geodesic between endpoints (when both
//! come from the same generation run), degree floors, and a valid
//! source/sink pair. Reachability of the sink is
//! reported but does not affect validity, since sparsification makes no
//! connectivity guarantee.

use crate::distance::spherical_distance;
use crate::SphereGraph;
use std::collections::VecDeque;

/// Tolerance for unit length and geodesic cost checks.
pub const VALIDATION_EPS: f64 = 1e-9;

/// Detailed validation report for a sphere graph.
#[derive(Debug, Clone)]
pub struct InstanceReport {
    pub num_vertices: usize,
    pub num_arcs: usize,
    /// Degree floor the report was computed against.
    pub degree: usize,

    /// Diagonal entries that read as arcs.
    pub self_loops: usize,
    /// Vertices with |v| outside [1 - eps, 1 + eps].
    pub vertices_off_sphere: usize,
    /// Whether arc costs were compared with vertex geodesics at all. False
    /// when the costs were reused from a different vertex set.
    pub geodesics_checked: bool,
    /// Arcs whose cost differs from the geodesic between their endpoints.
    pub distance_mismatches: usize,
    /// Largest absolute cost error seen.
    pub max_distance_error: f64,

    /// Vertices with in-degree below the floor.
    pub below_in_floor: usize,
    /// Vertices with out-degree below the floor.
    pub below_out_floor: usize,
    /// Vertices with no incoming arcs.
    pub no_incoming: usize,
    /// Vertices with no outgoing arcs.
    pub no_outgoing: usize,

    pub source_equals_sink: bool,
    /// Whether a directed path from source to sink exists.
    pub sink_reachable: bool,
}

impl InstanceReport {
    /// Hard invariants only. Reachability is informational.
    pub fn is_valid(&self) -> bool {
        self.self_loops == 0
            && self.vertices_off_sphere == 0
            && self.distance_mismatches == 0
            && self.below_in_floor == 0
            && self.below_out_floor == 0
            && !self.source_equals_sink
    }

    /// Valid and the sink can be reached.
    pub fn is_perfect(&self) -> bool {
        self.is_valid() && self.sink_reachable
    }

    /// Format a summary of any issues found.
    pub fn summary(&self) -> String {
        if self.is_perfect() {
            return "Perfect".to_string();
        }

        let mut issues = Vec::new();

        if self.self_loops > 0 {
            issues.push(format!("{} self-loops", self.self_loops));
        }
        if self.vertices_off_sphere > 0 {
            issues.push(format!("{} vertices off sphere", self.vertices_off_sphere));
        }
        if self.distance_mismatches > 0 {
            issues.push(format!(
                "{} arc costs off geodesic (max err {:.3e})",
                self.distance_mismatches, self.max_distance_error
            ));
        }
        if self.below_in_floor > 0 || self.below_out_floor > 0 {
            issues.push(format!(
                "below degree floor {}: in:{} out:{}",
                self.degree, self.below_in_floor, self.below_out_floor
            ));
        }
        if self.source_equals_sink {
            issues.push("source == sink".to_string());
        }
        if !self.sink_reachable {
            issues.push("sink unreachable from source".to_string());
        }

        issues.join(", ")
    }
}

impl std::fmt::Display for InstanceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "InstanceReport {{ V={}, A={}, degree={}, {} }}",
            self.num_vertices,
            self.num_arcs,
            self.degree,
            self.summary()
        )
    }
}

/// Validate a sphere graph against a degree floor.
///
/// Pass the `degree` the instance was generated with. Graphs rebuilt from
/// hand-made distances can be checked with `degree = 0` to skip the floor.
pub fn validate(graph: &SphereGraph, degree: usize) -> InstanceReport {
    let n = graph.n();
    let vertices = graph.vertices();
    let distances = graph.distances();

    let vertices_off_sphere = vertices
        .iter()
        .filter(|v| (v.length() - 1.0).abs() > VALIDATION_EPS)
        .count();

    let self_loops = (0..n).filter(|&i| distances.is_arc(i, i)).count();

    let geodesics_checked = graph.costs_match_vertices();
    let mut distance_mismatches = 0usize;
    let mut max_distance_error = 0.0f64;
    if geodesics_checked {
        for &[i, j] in graph.arcs_array() {
            let err = (distances.get(i, j) - spherical_distance(vertices[i], vertices[j])).abs();
            max_distance_error = max_distance_error.max(err);
            if err > VALIDATION_EPS {
                distance_mismatches += 1;
            }
        }
    }

    let mut below_in_floor = 0usize;
    let mut below_out_floor = 0usize;
    let mut no_incoming = 0usize;
    let mut no_outgoing = 0usize;
    for v in 0..n {
        let d_in = graph.arcs_in(v).len();
        let d_out = graph.arcs_out(v).len();
        if d_in < degree {
            below_in_floor += 1;
        }
        if d_out < degree {
            below_out_floor += 1;
        }
        if d_in == 0 {
            no_incoming += 1;
        }
        if d_out == 0 {
            no_outgoing += 1;
        }
    }

    InstanceReport {
        num_vertices: n,
        num_arcs: graph.num_arcs(),
        degree,
        self_loops,
        vertices_off_sphere,
        geodesics_checked,
        distance_mismatches,
        max_distance_error,
        below_in_floor,
        below_out_floor,
        no_incoming,
        no_outgoing,
        source_equals_sink: graph.source() == graph.sink(),
        sink_reachable: sink_reachable(graph),
    }
}

/// Breadth-first search over outgoing arcs from the source.
fn sink_reachable(graph: &SphereGraph) -> bool {
    let (source, sink) = (graph.source(), graph.sink());
    let arcs = graph.arcs_array();
    let mut seen = vec![false; graph.n()];
    let mut queue = VecDeque::from([source]);
    seen[source] = true;

    while let Some(v) = queue.pop_front() {
        if v == sink {
            return true;
        }
        for &a in graph.arcs_out(v) {
            let head = arcs[a][1];
            if !seen[head] {
                seen[head] = true;
                queue.push_back(head);
            }
        }
    }
    false
}
