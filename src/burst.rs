//! Burst generation: per-particle attribute buffers for one firework.
//!
//! A burst is a static point cloud. All motion and fading is computed in the
//! shader from a single progress uniform (see [`crate::shading`]), so the
//! generator's only job is to synthesize the immutable per-particle
//! attributes: local offset, size factor, and time multiplier.
//!
//! Randomness is injected as a seeded [`SmallRng`] so generation is
//! reproducible under test.

use crate::mesh::ReferenceMesh;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Smallest particle count a spherical burst may roll.
pub const MIN_PARTICLES: u32 = 400;
/// Largest particle count a spherical burst may roll (inclusive).
pub const MAX_PARTICLES: u32 = 1400;

/// Shell thickness: offsets land between `SHELL_INNER * radius` and `radius`.
pub const SHELL_INNER: f32 = 0.75;

/// How a burst arranges its particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstShape {
    /// Random shell of points near the burst radius. Denser toward the outer
    /// radius with slight inward variance, not a volumetric fill.
    Spherical,
    /// One particle per vertex of the pre-loaded reference mesh, verbatim.
    ReferenceMesh,
}

/// A spawn request for the generator.
#[derive(Debug, Clone)]
pub struct BurstSpec {
    /// World-space origin of the burst.
    pub origin: Vec3,
    /// Outer shell radius for the `Spherical` shape.
    pub radius: f32,
    /// Base particle size, scaled per particle by the size factor.
    pub base_size: f32,
    /// Base color of every particle in the burst (RGB, 0-1).
    pub color: Vec3,
    /// Name of the sprite texture in the registry.
    pub texture: String,
    /// Particle arrangement.
    pub shape: BurstShape,
    /// Fixed particle count for the `Spherical` shape. `None` rolls a random
    /// count in [`MIN_PARTICLES`]..=[`MAX_PARTICLES`].
    pub count: Option<u32>,
}

impl BurstSpec {
    /// A spherical burst at `origin` with sensible defaults.
    pub fn spherical(origin: Vec3, radius: f32, color: Vec3) -> Self {
        Self {
            origin,
            radius,
            base_size: 0.15,
            color,
            texture: String::new(),
            shape: BurstShape::Spherical,
            count: None,
        }
    }
}

/// One particle's static attributes, interleaved for the GPU vertex buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    /// Local offset from the burst origin.
    pub offset: [f32; 3],
    /// Per-particle size scalar in [0, 1).
    pub size_factor: f32,
    /// Per-particle animation speed-up in [1, 2).
    pub time_multiplier: f32,
}

/// Immutable per-particle attribute buffer set for one burst.
#[derive(Debug, Clone)]
pub struct BurstGeometry {
    vertices: Vec<ParticleVertex>,
}

impl BurstGeometry {
    /// Number of particles. Fixed at creation.
    #[inline]
    pub fn particle_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// The interleaved vertex data.
    #[inline]
    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }

    /// Raw bytes for GPU upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Shading configuration carried alongside the geometry.
#[derive(Debug, Clone)]
pub struct BurstStyle {
    /// Base particle size before per-particle scaling.
    pub base_size: f32,
    /// Base color (RGB, 0-1).
    pub color: Vec3,
    /// Sprite texture name.
    pub texture: String,
}

/// Synthesize the attribute buffers and shading configuration for a spawn
/// request.
///
/// Pure with respect to the scene: allocates buffers and nothing else.
/// Parameters that originate from internal random generation are clamped
/// rather than rejected. A `ReferenceMesh` request without an available mesh
/// falls back to `Spherical` so one failed spawn never escapes to the frame
/// loop.
pub fn generate(
    spec: &BurstSpec,
    mesh: Option<&ReferenceMesh>,
    rng: &mut SmallRng,
) -> (BurstGeometry, BurstStyle) {
    let radius = spec.radius.max(1e-3);

    let vertices = match spec.shape {
        BurstShape::Spherical => spherical_vertices(radius, spec.count, rng),
        BurstShape::ReferenceMesh => match mesh {
            Some(mesh) => mesh_vertices(mesh, rng),
            None => {
                log::warn!("reference mesh not loaded yet; falling back to spherical burst");
                spherical_vertices(radius, spec.count, rng)
            }
        },
    };

    let style = BurstStyle {
        base_size: spec.base_size.max(0.0),
        color: spec.color.clamp(Vec3::ZERO, Vec3::ONE),
        texture: spec.texture.clone(),
    };

    (BurstGeometry { vertices }, style)
}

/// Shell sampling in spherical coordinates: radius scaled by a random factor
/// in [0.75, 1.0], polar angle uniform in [0, pi], azimuth uniform in
/// [0, 2pi).
fn spherical_vertices(radius: f32, count: Option<u32>, rng: &mut SmallRng) -> Vec<ParticleVertex> {
    let count = count.unwrap_or_else(|| rng.gen_range(MIN_PARTICLES..=MAX_PARTICLES));
    (0..count)
        .map(|_| {
            let r = radius * rng.gen_range(SHELL_INNER..=1.0);
            let phi = rng.gen_range(0.0..=PI);
            let theta = rng.gen_range(0.0..TAU);
            let offset = Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.cos(),
                r * phi.sin() * theta.sin(),
            );
            particle(offset, rng)
        })
        .collect()
}

/// Borrowed mesh positions, order-preserving. Only the size factor and time
/// multiplier are randomized.
fn mesh_vertices(mesh: &ReferenceMesh, rng: &mut SmallRng) -> Vec<ParticleVertex> {
    mesh.vertices()
        .iter()
        .map(|&offset| particle(offset, rng))
        .collect()
}

fn particle(offset: Vec3, rng: &mut SmallRng) -> ParticleVertex {
    ParticleVertex {
        offset: offset.to_array(),
        size_factor: rng.gen_range(0.0..1.0),
        // >= 1 so individual animations only ever run ahead of the burst.
        time_multiplier: rng.gen_range(1.0..2.0),
    }
}

/// Random vivid burst color: random hue at full saturation, bright value.
pub fn random_burst_color(rng: &mut SmallRng) -> Vec3 {
    hsv_to_rgb(rng.gen::<f32>(), 1.0, 0.9)
}

/// Convert HSV to RGB.
fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    fn spec(shape: BurstShape) -> BurstSpec {
        BurstSpec {
            origin: Vec3::ZERO,
            radius: 1.0,
            base_size: 0.15,
            color: Vec3::new(1.0, 0.5, 0.2),
            texture: "disc".into(),
            shape,
            count: None,
        }
    }

    #[test]
    fn test_spherical_count_in_range() {
        let mut rng = rng();
        for _ in 0..16 {
            let (geo, _) = generate(&spec(BurstShape::Spherical), None, &mut rng);
            assert!(geo.particle_count() >= MIN_PARTICLES);
            assert!(geo.particle_count() <= MAX_PARTICLES);
        }
    }

    #[test]
    fn test_spherical_offsets_in_shell() {
        let mut rng = rng();
        let (geo, _) = generate(&spec(BurstShape::Spherical), None, &mut rng);
        for v in geo.vertices() {
            let mag = Vec3::from(v.offset).length();
            assert!(mag >= SHELL_INNER - 1e-4, "offset magnitude {} too small", mag);
            assert!(mag <= 1.0 + 1e-4, "offset magnitude {} too large", mag);
        }
    }

    #[test]
    fn test_per_particle_scalars_in_range() {
        let mut rng = rng();
        let (geo, _) = generate(&spec(BurstShape::Spherical), None, &mut rng);
        for v in geo.vertices() {
            assert!(v.size_factor >= 0.0 && v.size_factor < 1.0);
            assert!(v.time_multiplier >= 1.0 && v.time_multiplier < 2.0);
        }
    }

    #[test]
    fn test_fixed_count_respected() {
        let mut rng = rng();
        let mut s = spec(BurstShape::Spherical);
        s.count = Some(500);
        let (geo, _) = generate(&s, None, &mut rng);
        assert_eq!(geo.particle_count(), 500);
    }

    #[test]
    fn test_mesh_burst_borrows_positions_verbatim() {
        let mesh = ReferenceMesh::custom(vec![Vec3::X, Vec3::Y, Vec3::new(0.1, 0.2, 0.3)]).unwrap();
        let mut rng = rng();
        let (geo, _) = generate(&spec(BurstShape::ReferenceMesh), Some(&mesh), &mut rng);
        assert_eq!(geo.particle_count(), mesh.vertex_count());
        for (v, expected) in geo.vertices().iter().zip(mesh.vertices()) {
            assert_eq!(Vec3::from(v.offset), *expected);
        }
    }

    #[test]
    fn test_missing_mesh_falls_back_to_spherical() {
        let mut rng = rng();
        let (geo, _) = generate(&spec(BurstShape::ReferenceMesh), None, &mut rng);
        assert!(geo.particle_count() >= MIN_PARTICLES);
        for v in geo.vertices() {
            let mag = Vec3::from(v.offset).length();
            assert!(mag >= SHELL_INNER - 1e-4 && mag <= 1.0 + 1e-4);
        }
    }

    #[test]
    fn test_degenerate_inputs_clamped() {
        let mut rng = rng();
        let mut s = spec(BurstShape::Spherical);
        s.radius = -2.0;
        s.base_size = -1.0;
        s.color = Vec3::new(2.0, -1.0, 0.5);
        let (geo, style) = generate(&s, None, &mut rng);
        for v in geo.vertices() {
            assert!(Vec3::from(v.offset).length() <= 1e-3 + 1e-6);
        }
        assert_eq!(style.base_size, 0.0);
        assert_eq!(style.color, Vec3::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let (a, _) = generate(&spec(BurstShape::Spherical), None, &mut rng());
        let (b, _) = generate(&spec(BurstShape::Spherical), None, &mut rng());
        assert_eq!(a.vertices(), b.vertices());
    }

    #[test]
    fn test_hsv_to_rgb_red() {
        let red = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((red.x - 1.0).abs() < 1e-3);
        assert!(red.y < 1e-3);
        assert!(red.z < 1e-3);
    }
}
