//! Reference meshes for shaped bursts.
//!
//! A [`ReferenceMesh`] is an immutable list of vertex positions. A burst with
//! the `ReferenceMesh` shape places one particle on every vertex, verbatim and
//! order-preserving, so the burst pops into the mesh's silhouette. The mesh
//! is loaded once and borrowed by every burst that uses it; geometry
//! generation never re-samples or reorders it.
//!
//! # Example
//!
//! ```ignore
//! let heart = ReferenceMesh::heart(600, 0.5);
//! Fireworks::new()
//!     .with_reference_mesh(heart)
//!     .run()?;
//! ```

use crate::error::MeshError;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// An immutable set of vertex positions that shaped bursts borrow.
#[derive(Debug, Clone)]
pub struct ReferenceMesh {
    vertices: Vec<Vec3>,
}

impl ReferenceMesh {
    /// Build a mesh from explicit vertex positions.
    ///
    /// Rejects an empty vertex list: a burst shaped by this mesh would have
    /// zero particles, which the generator treats as unrepresentable rather
    /// than defensively clamping.
    pub fn custom(vertices: Vec<Vec3>) -> Result<Self, MeshError> {
        if vertices.is_empty() {
            return Err(MeshError::Empty);
        }
        Ok(Self { vertices })
    }

    /// UV sphere with `rings * segments` vertices.
    ///
    /// Poles are included once per segment, which keeps the iteration simple;
    /// for a burst silhouette the duplicated pole particles are invisible.
    pub fn uv_sphere(rings: u32, segments: u32, radius: f32) -> Self {
        let rings = rings.max(2);
        let segments = segments.max(3);
        let mut vertices = Vec::with_capacity((rings * segments) as usize);
        for ring in 0..rings {
            let phi = PI * (ring as f32 + 0.5) / rings as f32;
            for segment in 0..segments {
                let theta = TAU * segment as f32 / segments as f32;
                vertices.push(Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.cos(),
                    radius * phi.sin() * theta.sin(),
                ));
            }
        }
        Self { vertices }
    }

    /// Classic parametric heart curve in the XY plane.
    ///
    /// `count` particles are placed evenly along the curve, scaled so the
    /// heart fits in a box roughly `scale` units tall.
    pub fn heart(count: u32, scale: f32) -> Self {
        let count = count.max(3);
        let mut vertices = Vec::with_capacity(count as usize);
        for i in 0..count {
            let t = TAU * i as f32 / count as f32;
            // x = 16 sin^3 t, y = 13 cos t - 5 cos 2t - 2 cos 3t - cos 4t
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos()
                - 5.0 * (2.0 * t).cos()
                - 2.0 * (3.0 * t).cos()
                - (4.0 * t).cos();
            vertices.push(Vec3::new(x, y, 0.0) * (scale / 17.0));
        }
        Self { vertices }
    }

    /// Number of vertices, which is also the particle count of any burst
    /// shaped by this mesh.
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Borrow the vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }
}
