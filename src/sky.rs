//! Procedural atmospheric sky backdrop.
//!
//! A Preetham-style analytic sky drawn as a fullscreen background pass:
//! Rayleigh scattering tinted by turbidity, a Mie forward-scattering lobe
//! around the sun, and an exponential exposure tonemap. The parameters are
//! the classic sky-panel set: turbidity, Rayleigh factor, Mie coefficient and
//! directivity, sun elevation/azimuth, exposure.
//!
//! The shader lives in `shaders/sky.wgsl`; this module owns the tunable
//! parameters and their GPU-ready uniform block.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Tunable sky parameters, as exposed in the debug panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyParams {
    /// Haziness of the atmosphere. Higher values redden the horizon.
    pub turbidity: f32,
    /// Rayleigh scattering multiplier (blue sky intensity).
    pub rayleigh: f32,
    /// Mie scattering coefficient (haze around the sun).
    pub mie_coefficient: f32,
    /// Mie phase directivity g in [0, 1): how tight the sun halo is.
    pub mie_directional_g: f32,
    /// Sun elevation above the horizon, in degrees. Negative for dusk.
    pub elevation: f32,
    /// Sun azimuth, in degrees.
    pub azimuth: f32,
    /// Exposure for the tonemap.
    pub exposure: f32,
}

impl Default for SkyParams {
    /// A just-below-the-horizon dusk that silhouettes fireworks well.
    fn default() -> Self {
        Self {
            turbidity: 10.0,
            rayleigh: 3.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.95,
            elevation: -2.2,
            azimuth: 180.0,
            exposure: 0.25,
        }
    }
}

impl SkyParams {
    /// Unit sun direction from elevation/azimuth.
    pub fn sun_direction(&self) -> Vec3 {
        let phi = (90.0 - self.elevation).to_radians();
        let theta = self.azimuth.to_radians();
        Vec3::new(
            phi.sin() * theta.sin(),
            phi.cos(),
            phi.sin() * theta.cos(),
        )
    }

    /// Build the uniform block for the sky pass. `inv_view_proj` turns each
    /// fragment's NDC position back into a world-space view ray.
    pub fn to_uniforms(&self, inv_view_proj: Mat4) -> SkyUniforms {
        SkyUniforms {
            inv_view_proj: inv_view_proj.to_cols_array_2d(),
            sun_direction: self.sun_direction().to_array(),
            turbidity: self.turbidity.max(1.0),
            rayleigh: self.rayleigh.max(0.0),
            mie_coefficient: self.mie_coefficient.max(0.0),
            mie_directional_g: self.mie_directional_g.clamp(0.0, 0.999),
            exposure: self.exposure.max(0.0),
        }
    }
}

/// GPU uniform block for the sky pass. Matches `Sky` in `shaders/sky.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct SkyUniforms {
    pub inv_view_proj: [[f32; 4]; 4],
    pub sun_direction: [f32; 3],
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub exposure: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_direction_is_unit() {
        let params = SkyParams::default();
        assert!((params.sun_direction().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sun_at_zenith() {
        let params = SkyParams {
            elevation: 90.0,
            ..Default::default()
        };
        let dir = params.sun_direction();
        assert!((dir.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sun_below_horizon_has_negative_y() {
        let params = SkyParams {
            elevation: -10.0,
            ..Default::default()
        };
        assert!(params.sun_direction().y < 0.0);
    }

    #[test]
    fn test_uniforms_clamp_degenerate_params() {
        let params = SkyParams {
            turbidity: 0.0,
            rayleigh: -1.0,
            mie_coefficient: -0.5,
            mie_directional_g: 1.5,
            exposure: -2.0,
            ..Default::default()
        };
        let u = params.to_uniforms(Mat4::IDENTITY);
        assert_eq!(u.turbidity, 1.0);
        assert_eq!(u.rayleigh, 0.0);
        assert_eq!(u.mie_coefficient, 0.0);
        assert!(u.mie_directional_g < 1.0);
        assert_eq!(u.exposure, 0.0);
    }

    #[test]
    fn test_uniform_block_size_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<SkyUniforms>() % 16, 0);
    }
}
