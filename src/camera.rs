//! Orbit camera.

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

const FOV_Y_DEGREES: f32 = 25.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

/// Orbit camera for viewing the fireworks scene.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl Camera {
    /// Default framing: slightly above the horizon, backed off far enough
    /// that a radius-1 burst fills a pleasant fraction of the view.
    pub fn new() -> Self {
        Self {
            yaw: 0.24,
            pitch: 0.0,
            distance: 6.2,
            target: Vec3::ZERO,
        }
    }

    /// The camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// View matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Combined view-projection matrix for the given aspect ratio.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect.max(1e-3), Z_NEAR, Z_FAR);
        proj * self.view_matrix()
    }

    /// Apply an orbit drag, in physical pixels.
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * 0.005;
        self.pitch = (self.pitch + delta.y * 0.005).clamp(-1.5, 1.5);
    }

    /// Apply scroll zoom, in lines.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * 0.4).clamp(1.0, 30.0);
    }

    /// Unproject a cursor position in NDC onto the plane through the orbit
    /// target, facing the camera. This is where a click spawns a burst.
    pub fn spawn_point(&self, ndc: Vec2, aspect: f32) -> Vec3 {
        let inv = self.view_proj(aspect).inverse();
        let near = inv * glam::Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inv * glam::Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let near = near.xyz() / near.w;
        let far = far.xyz() / far.w;
        let dir = (far - near).normalize_or_zero();
        self.position() + dir * self.distance
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_respects_distance() {
        let camera = Camera::new();
        assert!((camera.position().distance(camera.target) - camera.distance).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut camera = Camera::new();
        camera.zoom(1000.0);
        assert_eq!(camera.distance, 1.0);
        camera.zoom(-1000.0);
        assert_eq!(camera.distance, 30.0);
    }

    #[test]
    fn test_center_click_spawns_near_target() {
        let camera = Camera::new();
        let point = camera.spawn_point(Vec2::ZERO, 16.0 / 9.0);
        assert!(point.distance(camera.target) < 1e-3);
    }

    #[test]
    fn test_offcenter_click_spawns_at_camera_distance() {
        let camera = Camera::new();
        let point = camera.spawn_point(Vec2::new(0.5, 0.3), 16.0 / 9.0);
        assert!((point.distance(camera.position()) - camera.distance).abs() < 1e-3);
        assert!(point.distance(camera.target) > 0.1);
    }
}
