//! Orbit camera: a position looking at a target, with reverse-Z projection
//! and the screen/NDC/world conversions used for picking and overlays.

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use starfield_config::CameraConfig;

use crate::frustum::Frustum;

/// Closest the camera may orbit to its target.
const MIN_ORBIT_DISTANCE: f32 = 1e-3;

/// Keeps the camera off the poles where `look_at` degenerates.
const MAX_PITCH: f32 = 1.55;

/// A world-space ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Perspective camera orbiting a target point.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Eye position.
    pub position: Vec3,
    /// Point the camera looks at and orbits around.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    viewport: Vec2,
}

impl OrbitCamera {
    /// Camera on the +Z axis at `initial_distance`, looking at the origin.
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, config.initial_distance),
            target: Vec3::ZERO,
            fov_y: config.fov_deg.to_radians(),
            near: config.near,
            far: config.far,
            viewport: Vec2::new(
                config.viewport_width.max(1) as f32,
                config.viewport_height.max(1) as f32,
            ),
        }
    }

    /// Viewport size in pixels.
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Resize the viewport. Zero dimensions are clamped to one pixel.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
    }

    /// Width / height.
    pub fn aspect_ratio(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// Unit view direction. Falls back to -Z when position equals target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// Unit right vector.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X)
    }

    /// Unit up vector, orthogonal to forward and right.
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Distance between eye and target.
    pub fn distance_to_target(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// View matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up())
    }

    /// Projection with reverse-Z: near maps to depth 1, far to depth 0.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio(), self.far, self.near)
    }

    /// Combined view-projection matrix.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// View frustum for this frame.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection())
    }

    /// `true` when every field that feeds the matrices is finite and usable.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.target.is_finite()
            && self.fov_y.is_finite()
            && self.fov_y > 0.0
            && self.near > 0.0
            && self.far > self.near
            && self.position != self.target
    }

    /// Convert window pixels (origin top-left, y down) to NDC in `[-1, 1]`.
    pub fn screen_to_ndc(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            pixel.x / self.viewport.x * 2.0 - 1.0,
            1.0 - pixel.y / self.viewport.y * 2.0,
        )
    }

    /// Ray from the eye through a point given in NDC.
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.aspect_ratio();
        let direction = self.forward()
            + self.right() * (ndc.x * half_width)
            + self.up() * (ndc.y * half_height);
        Ray {
            origin: self.position,
            direction: direction.normalize_or(self.forward()),
        }
    }

    /// Project a world point to window pixels.
    ///
    /// Returns `None` for points at or behind the eye plane.
    pub fn project_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 || !clip.is_finite() {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * self.viewport.x,
            (-ndc.y * 0.5 + 0.5) * self.viewport.y,
        ))
    }

    /// Rotate the eye around the target by yaw (about world Y) and pitch.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.position - self.target;
        let radius = offset.length().max(MIN_ORBIT_DISTANCE);
        let current_pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
        let current_yaw = offset.x.atan2(offset.z);
        let new_pitch = (current_pitch + pitch).clamp(-MAX_PITCH, MAX_PITCH);
        let new_yaw = current_yaw + yaw;
        self.position = self.target
            + Vec3::new(
                radius * new_pitch.cos() * new_yaw.sin(),
                radius * new_pitch.sin(),
                radius * new_pitch.cos() * new_yaw.cos(),
            );
    }

    /// Slide eye and target together in the view plane.
    pub fn pan(&mut self, delta: Vec2) {
        let shift = self.right() * delta.x + self.up() * delta.y;
        self.position += shift;
        self.target += shift;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::from_config(&CameraConfig::default())
    }

    #[test]
    fn test_default_camera_looks_at_origin() {
        let cam = camera();
        assert_eq!(cam.target, Vec3::ZERO);
        assert!((cam.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!(cam.is_finite());
    }

    #[test]
    fn test_center_ray_hits_target() {
        let cam = camera();
        let ray = cam.ray_through(Vec2::ZERO);
        assert_eq!(ray.origin, cam.position);
        let at_target = ray.at(cam.distance_to_target());
        assert!(at_target.length() < 1e-4);
    }

    #[test]
    fn test_screen_center_is_ndc_origin() {
        let cam = camera();
        let center = cam.viewport() * 0.5;
        assert!(cam.screen_to_ndc(center).length() < 1e-6);
        assert_eq!(cam.screen_to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_project_round_trips_through_ray() {
        let cam = camera();
        let point = Vec3::new(1.5, -0.7, -3.0);
        let pixel = cam.project_to_screen(point).unwrap();
        let ray = cam.ray_through(cam.screen_to_ndc(pixel));
        let to_point = (point - ray.origin).normalize();
        assert!(to_point.dot(ray.direction) > 0.99999, "{to_point:?} vs {:?}", ray.direction);
    }

    #[test]
    fn test_points_behind_do_not_project() {
        let cam = camera();
        assert!(cam.project_to_screen(Vec3::new(0.0, 0.0, 50.0)).is_none());
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut cam = camera();
        let before = cam.distance_to_target();
        cam.orbit(0.8, 0.3);
        assert!((cam.distance_to_target() - before).abs() < 1e-4);
        assert_ne!(cam.position, Vec3::new(0.0, 0.0, before));
    }

    #[test]
    fn test_pan_moves_target_with_eye() {
        let mut cam = camera();
        let offset = cam.position - cam.target;
        cam.pan(Vec2::new(2.0, 1.0));
        assert!(((cam.position - cam.target) - offset).length() < 1e-5);
        assert!(cam.target.length() > 2.0);
    }

    #[test]
    fn test_degenerate_camera_not_finite() {
        let mut cam = camera();
        cam.position = cam.target;
        assert!(!cam.is_finite());
        cam.position = Vec3::new(f32::NAN, 0.0, 0.0);
        assert!(!cam.is_finite());
    }
}
