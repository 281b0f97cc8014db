//! Mesh-shaped bursts: half of the launches take the shape of a heart.
//!
//! Run with: cargo run --example mesh_burst
//!
//! The show is seeded, so every run spawns the same sequence of bursts.

use skyburst::prelude::*;

fn main() {
    env_logger::init();

    let result = Fireworks::new()
        .with_reference_mesh(ReferenceMesh::heart(800, 1.2))
        .with_sprite("disc", SpriteTexture::soft_disc(64))
        .with_sprite("star", SpriteTexture::star4(64))
        .with_base_size(0.12)
        .with_radius_range(0.6, 1.2)
        .with_seed(42)
        .run();

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
