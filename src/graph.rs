//! Sphere-embedded shortest-path instance.

use crate::config::{
    check_endpoints, check_unit_vertices, collect_vertices, GraphConfig, Precomputed,
};
use crate::distance::{build_candidate_matrix, DistanceMatrix};
use crate::index::ArcIndex;
use crate::sampler::sample_unit_sphere;
use crate::sparsify::{sparsify, SparsifyStats};
use crate::{GraphError, UnitVec3, UnitVec3Like};
use rand::Rng;

/// A directed graph on the unit sphere with a designated source and sink.
///
/// Vertices are sampled uniformly on the sphere, arc costs are geodesic
/// distances, and the complete candidate graph is thinned by the greedy
/// sparsifier. Everything a solver reads (arc numbering, incidence lists,
/// big-M) is derived once at construction.
#[derive(Debug, Clone)]
pub struct SphereGraph {
    vertices: Vec<UnitVec3>,
    distances: DistanceMatrix,
    index: ArcIndex,
    source: usize,
    sink: usize,
    big_m: f64,
    gamma: Option<f64>,
    instance: u32,
    init_uncertainty: Vec<f64>,
    sparsify_stats: Option<SparsifyStats>,
    costs_match_vertices: bool,
}

/// Sizes of the decision/uncertainty vectors of a robust path model.
///
/// All three equal the arc count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub xi_dim: usize,
    pub x_dim: usize,
    pub y_dim: usize,
}

impl SphereGraph {
    /// Generate an instance, reusing any precomputed state in `config`.
    ///
    /// `rng` is only drawn from when vertices have to be sampled.
    pub fn generate<R: Rng + ?Sized>(
        config: &GraphConfig,
        rng: &mut R,
    ) -> Result<Self, GraphError> {
        config.validate()?;
        let pre = &config.precomputed;

        let vertices = match &pre.vertices {
            Some(v) => v.clone(),
            None => sample_unit_sphere(config.n, rng),
        };
        log::debug!(
            "instance {}: {} vertices ({})",
            config.instance,
            vertices.len(),
            if pre.vertices.is_some() { "precomputed" } else { "sampled" }
        );

        let (distances, source, sink, stats) = match &pre.distances {
            Some(d) => {
                // validate() guarantees both endpoints are present
                let source = pre.source.ok_or(GraphError::IncompleteOverride("source"))?;
                let sink = pre.sink.ok_or(GraphError::IncompleteOverride("sink"))?;
                (d.clone(), source, sink, None)
            }
            None => {
                let full = build_candidate_matrix(&vertices);
                let out = sparsify(&full, config.degree, config.throw_away_perc)?;
                (out.distances, out.source, out.sink, Some(out.stats))
            }
        };

        let mut graph = Self::assemble(vertices, distances, source, sink, config)?;
        graph.sparsify_stats = stats;
        // Reused distances paired with freshly sampled vertices.
        graph.costs_match_vertices = pre.distances.is_none() || pre.vertices.is_some();
        Ok(graph)
    }

    /// Generate, then hand the result to `renderer` if `config.plot` is set.
    ///
    /// A renderer failure is returned alongside the finished graph rather
    /// than discarding it.
    pub fn generate_and_render<R, P>(
        config: &GraphConfig,
        rng: &mut R,
        renderer: &mut P,
        target: Option<&str>,
    ) -> Result<(Self, Result<(), P::Error>), GraphError>
    where
        R: Rng + ?Sized,
        P: Renderer,
    {
        let graph = Self::generate(config, rng)?;
        let rendered = if config.plot {
            graph.render_with(renderer, target)
        } else {
            Ok(())
        };
        Ok((graph, rendered))
    }

    /// Rebuild an instance from previously derived state.
    ///
    /// Produces the same arc numbering and incidence lists as the graph the
    /// state came from. `vertices` may be any point type, e.g. `[f64; 3]` or
    /// `glam::DVec3`, and must lie on the unit sphere.
    pub fn from_parts<I>(
        config: &GraphConfig,
        vertices: I,
        distances: DistanceMatrix,
        source: usize,
        sink: usize,
    ) -> Result<Self, GraphError>
    where
        I: IntoIterator,
        I::Item: UnitVec3Like,
    {
        let vertices = collect_vertices(vertices);
        check_unit_vertices(&vertices)?;
        let config = GraphConfig {
            n: vertices.len(),
            precomputed: Precomputed::default(),
            ..config.clone()
        };
        config.validate()?;
        Self::assemble(vertices, distances, source, sink, &config)
    }

    fn assemble(
        vertices: Vec<UnitVec3>,
        distances: DistanceMatrix,
        source: usize,
        sink: usize,
        config: &GraphConfig,
    ) -> Result<Self, GraphError> {
        let n = vertices.len();
        if distances.n() != n {
            return Err(GraphError::DimensionMismatch {
                expected: n,
                actual: distances.n(),
            });
        }
        distances.check()?;
        check_endpoints(source, sink, n)?;

        let index = ArcIndex::build(&distances);
        let big_m = index.upper_bound();
        let num_arcs = index.num_arcs();

        let (in_deg, out_deg) = distances.degrees();
        let no_in = in_deg.iter().filter(|&&d| d == 0).count();
        let no_out = out_deg.iter().filter(|&&d| d == 0).count();
        if no_in > 0 || no_out > 0 {
            log::warn!(
                "instance {}: {} vertices without incoming arcs, {} without outgoing arcs",
                config.instance,
                no_in,
                no_out
            );
        }

        Ok(Self {
            vertices,
            distances,
            index,
            source,
            sink,
            big_m,
            gamma: config.gamma,
            instance: config.instance,
            init_uncertainty: vec![0.0; num_arcs],
            sparsify_stats: None,
            costs_match_vertices: true,
        })
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn vertices(&self) -> &[UnitVec3] {
        &self.vertices
    }

    #[inline]
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Boolean arc-presence matrix.
    pub fn arcs(&self) -> Vec<Vec<bool>> {
        self.distances.presence()
    }

    #[inline]
    pub fn num_arcs(&self) -> usize {
        self.index.num_arcs()
    }

    #[inline]
    pub fn arc_index(&self) -> &ArcIndex {
        &self.index
    }

    /// Distance of each arc, by arc position.
    #[inline]
    pub fn distances_array(&self) -> &[f64] {
        self.index.distances()
    }

    /// `[tail, head]` of each arc, by arc position.
    #[inline]
    pub fn arcs_array(&self) -> &[[usize; 2]] {
        self.index.arcs()
    }

    #[inline]
    pub fn arcs_in(&self, v: usize) -> &[usize] {
        self.index.arcs_in(v)
    }

    #[inline]
    pub fn arcs_out(&self, v: usize) -> &[usize] {
        self.index.arcs_out(v)
    }

    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    #[inline]
    pub fn sink(&self) -> usize {
        self.sink
    }

    /// Big-M constant: three times the total surviving arc length.
    #[inline]
    pub fn big_m(&self) -> f64 {
        self.big_m
    }

    /// Same value as [`Self::big_m`], under the name bound-based solvers use.
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        self.big_m
    }

    #[inline]
    pub fn gamma(&self) -> Option<f64> {
        self.gamma
    }

    pub fn set_gamma(&mut self, gamma: f64) {
        self.gamma = Some(gamma);
    }

    #[inline]
    pub fn instance(&self) -> u32 {
        self.instance
    }

    /// Starting per-arc uncertainty (all zeros).
    #[inline]
    pub fn init_uncertainty(&self) -> &[f64] {
        &self.init_uncertainty
    }

    pub fn dimensions(&self) -> Dimensions {
        let m = self.num_arcs();
        Dimensions {
            xi_dim: m,
            x_dim: m,
            y_dim: m,
        }
    }

    /// Sparsifier bookkeeping, or `None` if distances were precomputed.
    #[inline]
    pub fn sparsify_stats(&self) -> Option<SparsifyStats> {
        self.sparsify_stats
    }

    /// Whether arc costs are the geodesics between the stored vertices.
    ///
    /// False only when precomputed distances were combined with freshly
    /// sampled vertices; the costs then belong to some other vertex set.
    #[inline]
    pub fn costs_match_vertices(&self) -> bool {
        self.costs_match_vertices
    }

    /// Export the state needed to rebuild this instance later.
    pub fn precomputed(&self) -> Precomputed {
        Precomputed {
            vertices: Some(self.vertices.clone()),
            distances: Some(self.distances.clone()),
            source: Some(self.source),
            sink: Some(self.sink),
        }
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self) -> GraphSnapshot<'_> {
        GraphSnapshot {
            vertices: &self.vertices,
            arcs: self.index.arcs(),
            source: self.source,
            sink: self.sink,
            instance: self.instance,
        }
    }

    /// Hand a snapshot to `renderer`. The graph is only borrowed shared, so
    /// a failing renderer cannot leave it modified.
    pub fn render_with<P: Renderer>(
        &self,
        renderer: &mut P,
        target: Option<&str>,
    ) -> Result<(), P::Error> {
        renderer.render(&self.snapshot(), target)
    }
}

/// Borrowed view of everything needed to draw an instance.
#[derive(Debug, Clone, Copy)]
pub struct GraphSnapshot<'a> {
    pub vertices: &'a [UnitVec3],
    pub arcs: &'a [[usize; 2]],
    pub source: usize,
    pub sink: usize,
    pub instance: u32,
}

impl GraphSnapshot<'_> {
    /// Vertex coordinates as a flat `[x0, y0, z0, x1, ...]` buffer, without copying.
    pub fn flat_coordinates(&self) -> &[f64] {
        bytemuck::cast_slice(self.vertices)
    }

    /// Vertices other than the source and sink.
    pub fn inner_vertices(&self) -> impl Iterator<Item = (usize, UnitVec3)> + '_ {
        self.vertices
            .iter()
            .copied()
            .enumerate()
            .filter(move |&(i, _)| i != self.source && i != self.sink)
    }

    /// Arc endpoints as coordinate pairs.
    pub fn segments(&self) -> impl Iterator<Item = (UnitVec3, UnitVec3)> + '_ {
        self.arcs
            .iter()
            .map(move |&[i, j]| (self.vertices[i], self.vertices[j]))
    }
}

/// Consumer of finished instances (plotting, export).
pub trait Renderer {
    type Error;

    /// Render `snapshot`, optionally to a named target.
    fn render(&mut self, snapshot: &GraphSnapshot<'_>, target: Option<&str>)
        -> Result<(), Self::Error>;
}
