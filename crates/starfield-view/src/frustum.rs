//! View frustum extracted from a reverse-Z view-projection matrix, with
//! point and sphere membership tests.

use glam::{Mat4, Vec3, Vec4};

/// Plane indices into the frustum planes array.
const LEFT: usize = 0;
const RIGHT: usize = 1;
const BOTTOM: usize = 2;
const TOP: usize = 3;
const NEAR: usize = 4;
const FAR: usize = 5;

/// A view frustum defined by six inward-pointing planes extracted from
/// the view-projection matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Frustum {
    /// Six planes: left, right, bottom, top, near, far.
    /// Each `Vec4(a, b, c, d)` where `(a,b,c)` is the normalized inward
    /// normal and `d` is the signed distance term.
    planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a combined view-projection matrix
    /// using the Griggs-Hartmann method.
    ///
    /// Expects reverse-Z depth: near maps to z=1, far to z=0, so the clip
    /// volume is `0 <= z <= w`.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let rows = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];

        let mut planes = [Vec4::ZERO; 6];
        planes[LEFT] = rows[3] + rows[0];
        planes[RIGHT] = rows[3] - rows[0];
        planes[BOTTOM] = rows[3] + rows[1];
        planes[TOP] = rows[3] - rows[1];
        // z <= w bounds the near side, z >= 0 the far side.
        planes[NEAR] = rows[3] - rows[2];
        planes[FAR] = rows[2];

        for plane in &mut planes {
            let len = plane.truncate().length();
            if len > 0.0 {
                *plane /= len;
            }
        }

        Self { planes }
    }

    fn signed_distance(plane: Vec4, point: Vec3) -> f32 {
        plane.truncate().dot(point) + plane.w
    }

    /// `true` if the point lies inside or on every plane.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|&plane| Self::signed_distance(plane, point) >= 0.0)
    }

    /// `true` if any part of the sphere may be inside the frustum.
    pub fn contains_sphere(&self, center: Vec3, radius: f32) -> bool {
        let radius = radius.abs();
        self.planes
            .iter()
            .all(|&plane| Self::signed_distance(plane, center) >= -radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_camera_vp() -> Mat4 {
        let view = Mat4::look_to_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        let proj = Mat4::perspective_rh(
            std::f32::consts::FRAC_PI_4,
            16.0 / 9.0,
            1000.0, // reverse-Z: far as near param
            0.1,    // reverse-Z: near as far param
        );
        proj * view
    }

    #[test]
    fn test_point_in_front_is_inside() {
        let frustum = Frustum::from_view_projection(&default_camera_vp());
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -5.0)));
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -999.0)));
    }

    #[test]
    fn test_near_and_far_clip() {
        let frustum = Frustum::from_view_projection(&default_camera_vp());
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -0.05)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -1500.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_sphere_straddling_side_plane() {
        let frustum = Frustum::from_view_projection(&default_camera_vp());
        // Just outside the right edge at z=-10: half-width is ~7.4.
        let center = Vec3::new(8.0, 0.0, -10.0);
        assert!(!frustum.contains_point(center));
        assert!(frustum.contains_sphere(center, 2.0));
        assert!(!frustum.contains_sphere(center, 0.1));
    }

    #[test]
    fn test_spheres_outside_each_plane() {
        let frustum = Frustum::from_view_projection(&default_camera_vp());
        assert!(!frustum.contains_sphere(Vec3::splat(15.0), 5.0), "behind the eye");
        assert!(!frustum.contains_sphere(Vec3::new(-1000.0, 0.0, -5.0), 1.0));
        assert!(!frustum.contains_sphere(Vec3::new(0.0, 1000.0, -5.0), 1.0));
        assert!(!frustum.contains_sphere(Vec3::new(0.0, 0.0, -1600.0), 50.0));
        // Straddling the far plane still counts.
        assert!(frustum.contains_sphere(Vec3::new(0.0, 0.0, -1020.0), 50.0));
    }

    #[test]
    fn test_planes_normalized() {
        let frustum = Frustum::from_view_projection(&default_camera_vp());
        for plane in &frustum.planes {
            let normal_len = plane.truncate().length();
            assert!(
                (normal_len - 1.0).abs() < 1e-4,
                "plane normal not normalized: {normal_len}"
            );
        }
    }
}
