//! # skyburst
//!
//! Click-to-launch GPU fireworks: point-cloud bursts under a procedural sky.
//!
//! Every burst is a static point cloud generated once at spawn. All motion,
//! twinkling, and fading happens in the vertex shader, driven by a single
//! 3-second progress tween per burst. Behind the bursts sits an analytic
//! Rayleigh/Mie sky.
//!
//! ## Quick Start
//!
//! ```ignore
//! use skyburst::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     env_logger::init();
//!     Fireworks::new()
//!         .with_reference_mesh(ReferenceMesh::heart(600, 1.0))
//!         .with_radius_range(0.5, 1.5)
//!         .run()
//! }
//! ```
//!
//! Left click launches a burst at the cursor, right drag orbits the camera,
//! the scroll wheel zooms, Escape quits.
//!
//! ## Core Concepts
//!
//! ### Bursts
//!
//! A [`BurstSpec`] describes a spawn request: origin, radius, color, sprite,
//! and shape. [`burst::generate`] turns it into an immutable per-particle
//! attribute buffer ([`BurstGeometry`]) plus shading settings
//! ([`BurstStyle`]). Spherical bursts sample a random shell of 400-1400
//! points; mesh bursts borrow the vertices of a [`ReferenceMesh`] verbatim.
//!
//! ### Lifecycle
//!
//! [`Scene::spawn`] starts a burst's [`Tween`]; [`Scene::update`] advances
//! all tweens and drains completed bursts exactly once so their GPU buffers
//! can be released the same frame.
//!
//! ### Shading
//!
//! The [`shading`] module is the CPU mirror of `shaders/burst.wgsl`: the
//! size envelope (peak near progress 0.125), the twinkle, and the alpha
//! fade that reaches exactly zero at completion. The tests pin the curves;
//! the shader implements them.
//!
//! ### Determinism
//!
//! All randomness flows through an injectable seeded [`rand::rngs::SmallRng`]:
//! seed the show with [`Fireworks::with_seed`] and every burst is
//! reproducible.

pub mod burst;
pub mod camera;
mod error;
mod gpu;
pub mod input;
pub mod lifecycle;
pub mod mesh;
pub mod scene;
pub mod shading;
pub mod sky;
pub mod textures;
pub mod time;
mod viewer;

pub use burst::{BurstGeometry, BurstShape, BurstSpec, BurstStyle, ParticleVertex};
pub use bytemuck;
pub use camera::Camera;
pub use error::{AppError, GpuError, MeshError, TextureError};
pub use glam::{Vec2, Vec3, Vec4};
pub use lifecycle::Tween;
pub use mesh::ReferenceMesh;
pub use scene::{BurstEntity, BurstId, Scene};
pub use sky::{SkyParams, SkyUniforms};
pub use textures::{FilterMode, SpriteRegistry, SpriteTexture};
pub use viewer::Fireworks;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use skyburst::prelude::*;
/// ```
pub mod prelude {
    pub use crate::burst::{self, BurstGeometry, BurstShape, BurstSpec, BurstStyle};
    pub use crate::camera::Camera;
    pub use crate::error::{AppError, GpuError, MeshError, TextureError};
    pub use crate::input::{Input, MouseButton};
    pub use crate::lifecycle::Tween;
    pub use crate::mesh::ReferenceMesh;
    pub use crate::scene::{BurstEntity, BurstId, Scene};
    pub use crate::shading;
    pub use crate::sky::SkyParams;
    pub use crate::textures::{FilterMode, SpriteRegistry, SpriteTexture};
    pub use crate::time::Time;
    pub use crate::viewer::Fireworks;
    pub use crate::{Vec2, Vec3, Vec4};
    #[cfg(feature = "egui")]
    pub use egui;
}
