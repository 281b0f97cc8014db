//! End-to-end burst scenarios: generation through lifecycle to shading.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use skyburst::burst::{self, BurstShape, BurstSpec, SHELL_INNER};
use skyburst::prelude::*;

fn seeded() -> SmallRng {
    SmallRng::seed_from_u64(0xF1EE)
}

/// A seeded 500-particle burst of radius 1: every offset in the shell,
/// every scalar in range, and the whole thing reproducible.
#[test]
fn test_fixed_scenario_500_particles() {
    let spec = BurstSpec {
        count: Some(500),
        ..BurstSpec::spherical(Vec3::new(0.0, 1.0, 0.0), 1.0, Vec3::new(1.0, 0.3, 0.1))
    };

    let (geometry, style) = burst::generate(&spec, None, &mut seeded());

    assert_eq!(geometry.particle_count(), 500);
    assert_eq!(style.color, Vec3::new(1.0, 0.3, 0.1));
    for v in geometry.vertices() {
        let mag = Vec3::from(v.offset).length();
        assert!(mag >= SHELL_INNER - 1e-4 && mag <= 1.0 + 1e-4);
        assert!(v.size_factor >= 0.0 && v.size_factor < 1.0);
        assert!(v.time_multiplier >= 1.0 && v.time_multiplier < 2.0);
    }

    let (again, _) = burst::generate(&spec, None, &mut seeded());
    assert_eq!(geometry.vertices(), again.vertices());
}

/// A burst lives exactly 3 seconds of scene time, is reported retired once,
/// and its particles are fully transparent at the end regardless of their
/// time multiplier.
#[test]
fn test_burst_retires_after_three_seconds() {
    let mut scene = Scene::new();
    let mut rng = seeded();
    let spec = BurstSpec::spherical(Vec3::ZERO, 1.0, Vec3::ONE);
    let (geometry, style) = burst::generate(&spec, None, &mut rng);
    let id = scene.spawn(Vec3::ZERO, Vec3::ZERO, geometry, style);

    let mut retired = Vec::new();
    let mut elapsed = 0.0_f32;
    for _ in 0..40 {
        elapsed += 0.1;
        retired.extend(scene.update(0.1));
        if !retired.is_empty() {
            break;
        }
    }

    assert_eq!(retired, vec![id]);
    assert!((elapsed - 3.0).abs() < 0.101, "retired at {}s", elapsed);
    assert!(scene.is_empty());

    // Alpha has hit exactly zero for every per-particle speed-up.
    for multiplier in [1.0, 1.25, 1.5, 1.99] {
        assert_eq!(shading::alpha(1.0, multiplier), 0.0);
    }
}

/// Bursts spawned at different times retire independently and in order.
#[test]
fn test_staggered_bursts_retire_in_order() {
    let mut scene = Scene::new();
    let mut rng = seeded();
    let spec = BurstSpec::spherical(Vec3::ZERO, 1.0, Vec3::ONE);

    let (geometry, style) = burst::generate(&spec, None, &mut rng);
    let first = scene.spawn(Vec3::ZERO, Vec3::ZERO, geometry, style);

    scene.update(1.0);

    let (geometry, style) = burst::generate(&spec, None, &mut rng);
    let second = scene.spawn(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, geometry, style);

    // First crosses 3.0 seconds; second is at 2.0 and still visible at its
    // own clock: progress 2/3, inside the fade window but nonzero alpha for
    // the slowest particles.
    let retired = scene.update(2.0);
    assert_eq!(retired, vec![first]);
    let p = scene.get(second).expect("second still live").progress();
    assert!((p - 2.0 / 3.0).abs() < 1e-5);
    assert!(shading::alpha(p, 1.0) > 0.0);

    let retired = scene.update(1.0);
    assert_eq!(retired, vec![second]);
    assert!(scene.is_empty());
}

/// A mesh-shaped burst spawned through the scene keeps the mesh vertex
/// order end to end.
#[test]
fn test_mesh_burst_through_scene() {
    let mesh = ReferenceMesh::heart(64, 1.0);
    let mut rng = seeded();
    let spec = BurstSpec {
        shape: BurstShape::ReferenceMesh,
        ..BurstSpec::spherical(Vec3::ZERO, 1.0, Vec3::ONE)
    };
    let (geometry, style) = burst::generate(&spec, Some(&mesh), &mut rng);

    let mut scene = Scene::new();
    let id = scene.spawn(Vec3::ZERO, Vec3::ZERO, geometry, style);
    let entity = scene.get(id).expect("just spawned");

    assert_eq!(entity.geometry.particle_count(), mesh.vertex_count());
    for (v, expected) in entity.geometry.vertices().iter().zip(mesh.vertices()) {
        assert_eq!(Vec3::from(v.offset), *expected);
    }
}
