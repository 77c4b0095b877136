//! Synthetic shortest-path instances on the unit sphere (S2).
//!
//! Vertices are sampled uniformly on the sphere, every ordered pair of
//! distinct vertices becomes a candidate arc with its great-circle length as
//! cost, and a greedy pass deletes the longest arcs while keeping every
//! vertex's in- and out-degree at or above a floor. The endpoints of the
//! longest candidate arc become the source and sink.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use s2_sp_instance::{GraphConfig, SphereGraph};
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let config = GraphConfig::new(50).with_degree(3).with_throw_away_perc(0.8);
//! let graph = SphereGraph::generate(&config, &mut rng).expect("valid config");
//!
//! assert_ne!(graph.source(), graph.sink());
//! for v in 0..graph.n() {
//!     assert!(graph.arcs_in(v).len() >= 3);
//!     assert!(graph.arcs_out(v).len() >= 3);
//! }
//! ```

mod config;
mod error;
mod graph;
mod types;

pub mod distance;
pub mod index;
pub mod sampler;
pub mod sparsify;
pub mod validation;

pub use config::{GraphConfig, Precomputed};
pub use distance::{spherical_distance, DistanceMatrix, ARC_EPS};
pub use error::GraphError;
pub use graph::{Dimensions, GraphSnapshot, Renderer, SphereGraph};
pub use index::ArcIndex;
pub use sparsify::SparsifyStats;
pub use types::{UnitVec3, UnitVec3Like};

/// Generate an instance with `n` vertices and otherwise default settings.
pub fn generate<R: rand::Rng + ?Sized>(n: usize, rng: &mut R) -> Result<SphereGraph, GraphError> {
    SphereGraph::generate(&GraphConfig::new(n), rng)
}
