//! Core point type for sphere-embedded instances.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;

/// A point on the unit sphere, represented as a 3D unit vector.
///
/// Components are `f64` so that geodesic arc costs match instances generated
/// with double precision elsewhere. The type does not normalize on
/// construction; the sampler and validation take care of that.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitVec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl UnitVec3 {
    /// Create a new unit vector.
    ///
    /// Note: This does NOT normalize the input. The caller is responsible
    /// for ensuring the vector is on the unit sphere.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create from any type implementing `UnitVec3Like`.
    #[inline]
    pub fn from_like<P: UnitVec3Like>(p: &P) -> Self {
        Self::new(p.x(), p.y(), p.z())
    }

    #[inline]
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn from_dvec3(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Compute the dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.to_dvec3().dot(other.to_dvec3())
    }

    /// Compute the length.
    #[inline]
    pub fn length(self) -> f64 {
        self.to_dvec3().length()
    }

    /// Straight-line (chord) distance to another point.
    #[inline]
    pub fn chord(self, other: Self) -> f64 {
        self.to_dvec3().distance(other.to_dvec3())
    }

    /// Normalize the vector. Zero vectors are returned unchanged.
    #[inline]
    pub fn normalize(self) -> Self {
        Self::from_dvec3(self.to_dvec3().normalize_or_zero())
    }
}

impl From<[f64; 3]> for UnitVec3 {
    #[inline]
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<UnitVec3> for [f64; 3] {
    #[inline]
    fn from(v: UnitVec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl From<DVec3> for UnitVec3 {
    #[inline]
    fn from(v: DVec3) -> Self {
        Self::from_dvec3(v)
    }
}

impl From<UnitVec3> for DVec3 {
    #[inline]
    fn from(v: UnitVec3) -> DVec3 {
        v.to_dvec3()
    }
}

/// Trait for types that can be used as precomputed vertex coordinates.
///
/// Lets callers pass `[f64; 3]`, tuples or `glam::DVec3` to
/// [`crate::Precomputed::with_vertices`] and [`crate::SphereGraph::from_parts`]
/// without converting first.
pub trait UnitVec3Like {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn z(&self) -> f64;
}

impl<T: UnitVec3Like + ?Sized> UnitVec3Like for &T {
    #[inline]
    fn x(&self) -> f64 {
        (**self).x()
    }
    #[inline]
    fn y(&self) -> f64 {
        (**self).y()
    }
    #[inline]
    fn z(&self) -> f64 {
        (**self).z()
    }
}

impl UnitVec3Like for UnitVec3 {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }
    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
    #[inline]
    fn z(&self) -> f64 {
        self.z
    }
}

impl UnitVec3Like for [f64; 3] {
    #[inline]
    fn x(&self) -> f64 {
        self[0]
    }
    #[inline]
    fn y(&self) -> f64 {
        self[1]
    }
    #[inline]
    fn z(&self) -> f64 {
        self[2]
    }
}

impl UnitVec3Like for (f64, f64, f64) {
    #[inline]
    fn x(&self) -> f64 {
        self.0
    }
    #[inline]
    fn y(&self) -> f64 {
        self.1
    }
    #[inline]
    fn z(&self) -> f64 {
        self.2
    }
}

impl UnitVec3Like for DVec3 {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }
    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
    #[inline]
    fn z(&self) -> f64 {
        self.z
    }
}
