//! Scene bookkeeping for in-flight bursts.
//!
//! The [`Scene`] is the render graph's CPU side: an explicit object owned by
//! the app and passed by reference, never module-level state. Spawn inserts an
//! entity and starts its tween; `update` advances every tween and drains
//! completed bursts exactly once, returning their ids so the renderer can
//! release the matching GPU buffers in the same frame.
//!
//! Bursts are independent: each carries its own tween, and any number may be
//! in flight at once.

use crate::burst::{BurstGeometry, BurstStyle};
use crate::lifecycle::Tween;
use glam::Vec3;

/// Identity of a spawned burst, unique for the lifetime of a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BurstId(u64);

impl std::fmt::Display for BurstId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "burst#{}", self.0)
    }
}

/// One live firework in the scene.
#[derive(Debug, Clone)]
pub struct BurstEntity {
    id: BurstId,
    /// World-space origin.
    pub origin: Vec3,
    /// Random per-axis rotation in radians. Visual variety only.
    pub rotation: Vec3,
    /// Static per-particle attributes.
    pub geometry: BurstGeometry,
    /// Shading configuration.
    pub style: BurstStyle,
    tween: Tween,
}

impl BurstEntity {
    /// This burst's identity.
    #[inline]
    pub fn id(&self) -> BurstId {
        self.id
    }

    /// Current tween progress in [0, 1].
    #[inline]
    pub fn progress(&self) -> f32 {
        self.tween.progress()
    }
}

/// All in-flight bursts, updated once per frame on the render thread.
#[derive(Debug, Default)]
pub struct Scene {
    entities: Vec<BurstEntity>,
    next_id: u64,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a burst and start its 3-second tween. Returns the new id.
    pub fn spawn(
        &mut self,
        origin: Vec3,
        rotation: Vec3,
        geometry: BurstGeometry,
        style: BurstStyle,
    ) -> BurstId {
        let id = BurstId(self.next_id);
        self.next_id += 1;
        self.entities.push(BurstEntity {
            id,
            origin,
            rotation,
            geometry,
            style,
            tween: Tween::burst(),
        });
        log::debug!(
            "{} spawned: {} particles at {:?}",
            id,
            self.entities.last().map(|e| e.geometry.particle_count()).unwrap_or(0),
            origin
        );
        id
    }

    /// Advance every live tween by `dt` seconds and drain completed bursts.
    ///
    /// A completed burst is removed as it is reported, so each id is returned
    /// exactly once no matter how often `update` is polled afterward.
    pub fn update(&mut self, dt: f32) -> Vec<BurstId> {
        let mut finished = Vec::new();
        self.entities.retain_mut(|entity| {
            entity.tween.advance(dt);
            if entity.tween.is_complete() {
                finished.push(entity.id);
                false
            } else {
                true
            }
        });
        for id in &finished {
            log::debug!("{} retired", id);
        }
        finished
    }

    /// Iterate over live bursts.
    pub fn iter(&self) -> impl Iterator<Item = &BurstEntity> {
        self.entities.iter()
    }

    /// Whether `id` is still live.
    pub fn contains(&self, id: BurstId) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }

    /// Look up a live burst by id.
    pub fn get(&self, id: BurstId) -> Option<&BurstEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Number of live bursts.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when no bursts are in flight.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::burst::{generate, BurstShape, BurstSpec};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn spawn_one(scene: &mut Scene, rng: &mut SmallRng) -> BurstId {
        let spec = BurstSpec::spherical(Vec3::ZERO, 1.0, Vec3::ONE);
        let (geometry, style) = generate(&spec, None, rng);
        scene.spawn(Vec3::ZERO, Vec3::ZERO, geometry, style)
    }

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut scene = Scene::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let a = spawn_one(&mut scene, &mut rng);
        let b = spawn_one(&mut scene, &mut rng);
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_update_retires_exactly_once() {
        let mut scene = Scene::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let id = spawn_one(&mut scene, &mut rng);

        assert!(scene.update(2.9).is_empty());
        assert!(scene.contains(id));

        let finished = scene.update(0.2);
        assert_eq!(finished, vec![id]);
        assert!(!scene.contains(id));
        assert!(scene.is_empty());

        // No double delivery.
        assert!(scene.update(1.0).is_empty());
    }

    #[test]
    fn test_bursts_are_independent() {
        let mut scene = Scene::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let first = spawn_one(&mut scene, &mut rng);
        scene.update(1.0);
        let second = spawn_one(&mut scene, &mut rng);

        // First retires at its own 3 seconds; second is still mid-flight.
        let finished = scene.update(2.0);
        assert_eq!(finished, vec![first]);
        assert!(scene.contains(second));
        let p = scene.get(second).unwrap().progress();
        assert!(p > 0.0 && p < 1.0);
    }
}
