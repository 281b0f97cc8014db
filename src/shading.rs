//! CPU mirror of the particle shading curve.
//!
//! The burst shader (`shaders/burst.wgsl`) maps a single progress uniform to
//! each particle's appearance. The functions here compute the same numbers on
//! the CPU; they are the testable contract for the shader and the reference
//! for anyone tuning the curve.
//!
//! Per particle, with `t = min(progress * time_multiplier, 1)`:
//!
//! - radial expansion: fast ease-out over t in [0, 0.1], so the shell snaps
//!   outward and then drifts;
//! - fall: the same ease-out over t in [0.1, 1], pulling particles down;
//! - size envelope: rises over [0, 0.125], peaks, then shrinks to zero at
//!   t = 1 (the twinkle shape is non-monotonic by design);
//! - twinkle: a 30 rad/unit flicker masked in over t in [0.2, 0.8];
//! - alpha: a remapped falloff from t = 0.7 that reaches exactly zero at
//!   t = 1, so a burst fades rather than pops.

/// Linear remap of `value` from `[from_min, from_max]` to `[to_min, to_max]`,
/// unclamped.
#[inline]
pub fn remap(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    to_min + (value - from_min) * (to_max - to_min) / (from_max - from_min)
}

/// A particle's local progress: the burst progress sped up by its own time
/// multiplier, saturating at 1.
#[inline]
pub fn effective_progress(progress: f32, time_multiplier: f32) -> f32 {
    (progress * time_multiplier).min(1.0)
}

/// Radial expansion factor in [0, 1]: cubic ease-out over t in [0, 0.1].
pub fn radial_expansion(t: f32) -> f32 {
    let x = remap(t, 0.0, 0.1, 0.0, 1.0).clamp(0.0, 1.0);
    1.0 - (1.0 - x).powi(3)
}

/// Downward drift in world units: eased over t in [0.1, 1], up to 0.2.
pub fn fall_offset(t: f32) -> f32 {
    let x = remap(t, 0.1, 1.0, 0.0, 1.0).clamp(0.0, 1.0);
    (1.0 - (1.0 - x).powi(3)) * 0.2
}

/// Size envelope in [0, 1]: opens over [0, 0.125], closes over [0.125, 1].
pub fn size_envelope(t: f32) -> f32 {
    let opening = remap(t, 0.0, 0.125, 0.0, 1.0);
    let closing = remap(t, 0.125, 1.0, 1.0, 0.0);
    opening.min(closing).clamp(0.0, 1.0)
}

/// Twinkle multiplier in (0, 1]: a sine flicker faded in over t in
/// [0.2, 0.8]. Outside the mask the multiplier is 1 (no flicker).
pub fn twinkle(t: f32) -> f32 {
    let mask = remap(t, 0.2, 0.8, 0.0, 1.0).clamp(0.0, 1.0);
    let flicker = (t * 30.0).sin() * 0.5 + 0.5;
    1.0 - flicker * mask
}

/// Output alpha in [0, 1]: full until t = 0.7, then a linear falloff hitting
/// exactly zero at t = 1.
pub fn alpha(progress: f32, time_multiplier: f32) -> f32 {
    let t = effective_progress(progress, time_multiplier);
    remap(t, 0.7, 1.0, 1.0, 0.0).clamp(0.0, 1.0)
}

/// Final screen-space point size in pixels.
///
/// `view_depth` is the positive view-space distance to the particle; dividing
/// by it gives the perspective compensation, and scaling by the framebuffer
/// height keeps the size display-density independent.
pub fn point_size(
    base_size: f32,
    size_factor: f32,
    t: f32,
    resolution_height: f32,
    view_depth: f32,
) -> f32 {
    let envelope = size_envelope(t) * twinkle(t);
    base_size * size_factor * envelope * resolution_height / view_depth.max(1e-4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_progress_saturates() {
        assert_eq!(effective_progress(0.5, 1.0), 0.5);
        assert_eq!(effective_progress(0.8, 1.9), 1.0);
        assert_eq!(effective_progress(1.0, 1.0), 1.0);
    }

    #[test]
    fn test_alpha_zero_at_completion_for_all_multipliers() {
        for mult in [1.0, 1.25, 1.5, 1.999] {
            assert_eq!(alpha(1.0, mult), 0.0);
        }
    }

    #[test]
    fn test_alpha_full_before_falloff() {
        assert_eq!(alpha(0.0, 1.0), 1.0);
        assert_eq!(alpha(0.5, 1.0), 1.0);
    }

    #[test]
    fn test_alpha_fades_not_pops() {
        // Strictly between 0 and 1 inside the falloff window.
        let a = alpha(0.85, 1.0);
        assert!(a > 0.0 && a < 1.0);
        // Monotonically non-increasing through the window.
        let mut last = 1.0;
        for i in 0..=20 {
            let a = alpha(0.7 + 0.015 * i as f32, 1.0);
            assert!(a <= last + 1e-6);
            last = a;
        }
    }

    #[test]
    fn test_size_envelope_peaks_near_open() {
        assert_eq!(size_envelope(0.0), 0.0);
        assert!((size_envelope(0.125) - 1.0).abs() < 1e-5);
        assert_eq!(size_envelope(1.0), 0.0);
        // Non-monotonic: rises then falls.
        assert!(size_envelope(0.06) < size_envelope(0.125));
        assert!(size_envelope(0.5) < size_envelope(0.125));
        assert!(size_envelope(0.5) > size_envelope(0.9));
    }

    #[test]
    fn test_radial_expansion_saturates_early() {
        assert_eq!(radial_expansion(0.0), 0.0);
        assert!((radial_expansion(0.1) - 1.0).abs() < 1e-5);
        assert_eq!(radial_expansion(1.0), 1.0);
    }

    #[test]
    fn test_fall_offset_bounds() {
        assert_eq!(fall_offset(0.0), 0.0);
        assert_eq!(fall_offset(0.1), 0.0);
        assert!((fall_offset(1.0) - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_twinkle_inactive_outside_mask() {
        assert_eq!(twinkle(0.0), 1.0);
        assert_eq!(twinkle(0.1), 1.0);
        let t = twinkle(0.5);
        assert!(t > 0.0 && t <= 1.0);
    }

    #[test]
    fn test_point_size_perspective_and_resolution() {
        let near = point_size(0.15, 0.5, 0.125, 1080.0, 2.0);
        let far = point_size(0.15, 0.5, 0.125, 1080.0, 4.0);
        assert!((near / far - 2.0).abs() < 1e-4);

        let hidpi = point_size(0.15, 0.5, 0.125, 2160.0, 2.0);
        assert!((hidpi / near - 2.0).abs() < 1e-4);
    }
}
