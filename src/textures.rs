//! Point-sprite textures for burst particles.
//!
//! Each particle is drawn as a textured sprite; the texture's red channel is
//! used as its alpha mask, so sprites are grayscale-on-black. Sprites can be
//! loaded from PNG/JPEG files or generated procedurally so the demos run
//! without asset files on disk.
//!
//! # Example
//!
//! ```ignore
//! Fireworks::new()
//!     .with_sprite("disc", SpriteTexture::soft_disc(128))
//!     .with_sprite("star", SpriteTexture::from_file("assets/star.png")?)
//!     .run()?;
//! ```

use crate::error::TextureError;
use std::path::Path;

/// Filter mode for sprite sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default).
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering.
    Nearest,
}

/// A decoded sprite texture ready for GPU upload.
#[derive(Debug, Clone)]
pub struct SpriteTexture {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Filter mode for sampling.
    pub filter: FilterMode,
}

impl SpriteTexture {
    /// Build a sprite from raw RGBA data.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        Self {
            data,
            width,
            height,
            filter: FilterMode::Linear,
        }
    }

    /// Load a sprite from a PNG or JPEG file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path.as_ref())?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
            filter: FilterMode::Linear,
        })
    }

    /// Procedural soft disc: bright center falling off smoothly to the edge.
    pub fn soft_disc(size: u32) -> Self {
        let size = size.max(2);
        Self::from_luma(size, |x, y| {
            let d = center_distance(x, y, size);
            smoothstep(1.0, 0.0, d).powf(1.5)
        })
    }

    /// Procedural four-point star: a sharp core with thin horizontal and
    /// vertical flares.
    pub fn star4(size: u32) -> Self {
        let size = size.max(2);
        Self::from_luma(size, |x, y| {
            let half = size as f32 / 2.0;
            let dx = (x as f32 + 0.5 - half) / half;
            let dy = (y as f32 + 0.5 - half) / half;
            let core = smoothstep(0.35, 0.0, (dx * dx + dy * dy).sqrt());
            let flare_h = smoothstep(0.05, 0.0, dy.abs()) * smoothstep(1.0, 0.0, dx.abs());
            let flare_v = smoothstep(0.05, 0.0, dx.abs()) * smoothstep(1.0, 0.0, dy.abs());
            (core + 0.8 * (flare_h + flare_v)).min(1.0)
        })
    }

    /// Set the filter mode.
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Build a square grayscale sprite from a per-pixel luminance function.
    fn from_luma(size: u32, luma: impl Fn(u32, u32) -> f32) -> Self {
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let v = (luma(x, y).clamp(0.0, 1.0) * 255.0).round() as u8;
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Self::from_rgba(data, size, size)
    }
}

fn center_distance(x: u32, y: u32, size: u32) -> f32 {
    let half = size as f32 / 2.0;
    let dx = (x as f32 + 0.5 - half) / half;
    let dy = (y as f32 + 0.5 - half) / half;
    (dx * dx + dy * dy).sqrt()
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Named sprite textures available to bursts.
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    sprites: Vec<(String, SpriteTexture)>,
}

impl SpriteRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sprite under `name`. A repeated name replaces the old sprite.
    pub fn add(&mut self, name: impl Into<String>, sprite: SpriteTexture) {
        let name = name.into();
        if let Some(slot) = self.sprites.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = sprite;
        } else {
            self.sprites.push((name, sprite));
        }
    }

    /// Look up a sprite by name.
    pub fn get(&self, name: &str) -> Option<&SpriteTexture> {
        self.sprites.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// All registered names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sprites.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate over all sprites.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SpriteTexture)> {
        self.sprites.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Number of sprites.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// True when no sprites are registered.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_disc_dimensions() {
        let sprite = SpriteTexture::soft_disc(64);
        assert_eq!(sprite.width, 64);
        assert_eq!(sprite.height, 64);
        assert_eq!(sprite.data.len(), 64 * 64 * 4);
    }

    #[test]
    fn test_soft_disc_bright_center_dark_corner() {
        let sprite = SpriteTexture::soft_disc(64);
        let center = sprite.data[(32 * 64 + 32) * 4] as u32;
        let corner = sprite.data[0] as u32;
        assert!(center > 200);
        assert!(corner < 10);
    }

    #[test]
    fn test_star4_flares_brighter_than_diagonal() {
        let sprite = SpriteTexture::star4(64);
        let on_flare = sprite.data[(32 * 64 + 8) * 4] as u32;
        let diagonal = sprite.data[(8 * 64 + 8) * 4] as u32;
        assert!(on_flare > diagonal);
    }

    #[test]
    fn test_registry_replaces_on_same_name() {
        let mut registry = SpriteRegistry::new();
        registry.add("disc", SpriteTexture::soft_disc(16));
        registry.add("disc", SpriteTexture::soft_disc(32));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("disc").unwrap().width, 32);
    }

    #[test]
    fn test_registry_preserves_insertion_order() {
        let mut registry = SpriteRegistry::new();
        registry.add("a", SpriteTexture::soft_disc(8));
        registry.add("b", SpriteTexture::star4(8));
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
