//! Instance configuration and precomputed overrides.

use crate::distance::DistanceMatrix;
use crate::{GraphError, UnitVec3, UnitVec3Like};

/// Precomputed vertices may deviate from unit length by at most this much.
pub const UNIT_LENGTH_TOLERANCE: f64 = 1e-6;

/// Previously generated state to reuse instead of regenerating.
///
/// Any subset may be given. Supplying `distances` skips candidate
/// construction and sparsification, and then requires `source` and `sink`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Precomputed {
    pub vertices: Option<Vec<UnitVec3>>,
    pub distances: Option<DistanceMatrix>,
    pub source: Option<usize>,
    pub sink: Option<usize>,
}

impl Precomputed {
    /// Overrides with vertex coordinates only, from any point type.
    pub fn with_vertices<I>(vertices: I) -> Self
    where
        I: IntoIterator,
        I::Item: UnitVec3Like,
    {
        Self {
            vertices: Some(collect_vertices(vertices)),
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_none()
            && self.distances.is_none()
            && self.source.is_none()
            && self.sink.is_none()
    }
}

/// Configuration for instance generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphConfig {
    /// Number of vertices.
    pub n: usize,

    /// Uncertainty budget for downstream robust solvers. Stored only.
    pub gamma: Option<f64>,

    /// Instance identifier, passed through to renderers.
    pub instance: u32,

    /// Minimum in-degree and out-degree kept by the sparsifier.
    pub degree: usize,

    /// Fraction of candidate arcs the sparsifier walks, longest first.
    pub throw_away_perc: f64,

    pub precomputed: Precomputed,

    /// If true, [`crate::SphereGraph::generate_and_render`] hands the
    /// finished graph to its renderer.
    pub plot: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            n: 0,
            gamma: Some(7.0),
            instance: 0,
            degree: 5,
            throw_away_perc: 0.9,
            precomputed: Precomputed::default(),
            plot: false,
        }
    }
}

impl GraphConfig {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            ..Self::default()
        }
    }

    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    pub fn with_throw_away_perc(mut self, throw_away_perc: f64) -> Self {
        self.throw_away_perc = throw_away_perc;
        self
    }

    pub fn with_gamma(mut self, gamma: Option<f64>) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_instance(mut self, instance: u32) -> Self {
        self.instance = instance;
        self
    }

    pub fn with_precomputed(mut self, precomputed: Precomputed) -> Self {
        self.precomputed = precomputed;
        self
    }

    pub fn with_plot(mut self, plot: bool) -> Self {
        self.plot = plot;
        self
    }

    /// Check parameters and override shapes before any work is done.
    pub fn validate(&self) -> Result<(), GraphError> {
        let n = self.n;
        if n < 2 {
            return Err(GraphError::InvalidVertexCount(n));
        }
        if n.checked_mul(n).is_none() {
            return Err(GraphError::TooManyVertices(n));
        }
        if self.degree >= n {
            return Err(GraphError::InvalidDegree {
                degree: self.degree,
                n,
            });
        }
        let p = self.throw_away_perc;
        if !p.is_finite() || !(0.0..1.0).contains(&p) {
            return Err(GraphError::InvalidThrowAwayFraction(p));
        }

        let pre = &self.precomputed;
        if let Some(vertices) = &pre.vertices {
            if vertices.len() != n {
                return Err(GraphError::DimensionMismatch {
                    expected: n,
                    actual: vertices.len(),
                });
            }
            check_unit_vertices(vertices)?;
        }
        if let Some(distances) = &pre.distances {
            if distances.n() != n {
                return Err(GraphError::DimensionMismatch {
                    expected: n,
                    actual: distances.n(),
                });
            }
            let source = pre.source.ok_or(GraphError::IncompleteOverride("source"))?;
            let sink = pre.sink.ok_or(GraphError::IncompleteOverride("sink"))?;
            check_endpoints(source, sink, n)?;
        }
        Ok(())
    }
}

pub(crate) fn collect_vertices<I>(vertices: I) -> Vec<UnitVec3>
where
    I: IntoIterator,
    I::Item: UnitVec3Like,
{
    vertices
        .into_iter()
        .map(|p| UnitVec3::from_like(&p))
        .collect()
}

/// Every vertex must have unit length within [`UNIT_LENGTH_TOLERANCE`].
pub(crate) fn check_unit_vertices(vertices: &[UnitVec3]) -> Result<(), GraphError> {
    for (index, v) in vertices.iter().enumerate() {
        let length = v.length();
        if length.is_nan() || (length - 1.0).abs() > UNIT_LENGTH_TOLERANCE {
            return Err(GraphError::VertexOffSphere { index, length });
        }
    }
    Ok(())
}

/// Source and sink must be distinct vertices in `[0, n)`.
pub(crate) fn check_endpoints(source: usize, sink: usize, n: usize) -> Result<(), GraphError> {
    for index in [source, sink] {
        if index >= n {
            return Err(GraphError::InvalidEndpoint { index, n });
        }
    }
    if source == sink {
        return Err(GraphError::SourceEqualsSink(source));
    }
    Ok(())
}
