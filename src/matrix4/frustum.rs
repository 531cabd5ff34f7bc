//! Frustum geometry recovered from projection and view-projection matrices.

use super::Matrix4;
use crate::{
    angle::Radians,
    frustum::{FrustumCorner, FrustumIntersection, FrustumPlane},
    vector::{Vector3, Vector4},
};

impl Matrix4 {
    /// Extracts the given frustum plane as `(a, b, c, d)`, where `(a, b, c)`
    /// is the unit normal pointing into the frustum and `a x + b y + c z + d`
    /// is the signed distance of a point from the plane.
    ///
    /// The planes are those of the `[-1, 1]` clip volume. For a matrix with
    /// the `[0, 1]` depth range the near plane lies behind the true one, so
    /// the enclosed volume is larger than the real frustum.
    pub fn frustum_plane(&self, plane: FrustumPlane) -> Vector4 {
        let unnormalized = self.unnormalized_frustum_plane(plane);
        unnormalized * unnormalized.xyz().norm().recip()
    }

    /// All six frustum planes in the order of [`FrustumPlane::ALL`].
    pub fn frustum_planes(&self) -> [Vector4; 6] {
        FrustumPlane::ALL.map(|plane| self.frustum_plane(plane))
    }

    /// Computes the given corner of the frustum as the intersection of the
    /// three planes meeting there.
    pub fn frustum_corner(&self, corner: FrustumCorner) -> Vector3 {
        let [a, b, c] = corner
            .planes()
            .map(|plane| self.unnormalized_frustum_plane(plane));
        intersection_of_planes(&a, &b, &c)
    }

    /// All eight frustum corners in the order of [`FrustumCorner::ALL`].
    pub fn frustum_corners(&self) -> [Vector3; 8] {
        FrustumCorner::ALL.map(|corner| self.frustum_corner(corner))
    }

    /// Computes the direction of the ray from the near to the far plane at
    /// the given position on the near plane, where `(0, 0)` is the
    /// bottom-left and `(1, 1)` the top-right corner. The direction is the
    /// bilinear interpolation of the four corner edges of the frustum and
    /// is not normalized.
    pub fn frustum_ray_dir(&self, x: f64, y: f64) -> Vector3 {
        let edge = |near, far| self.frustum_corner(far) - self.frustum_corner(near);
        let bottom_left = edge(FrustumCorner::NearBottomLeft, FrustumCorner::FarBottomLeft);
        let bottom_right = edge(FrustumCorner::NearBottomRight, FrustumCorner::FarBottomRight);
        let top_left = edge(FrustumCorner::NearTopLeft, FrustumCorner::FarTopLeft);
        let top_right = edge(FrustumCorner::NearTopRight, FrustumCorner::FarTopRight);

        let bottom = bottom_left.lerp(&bottom_right, x);
        let top = top_left.lerp(&top_right, x);
        bottom.lerp(&top, y)
    }

    /// Computes the position of the camera of a perspective projection or
    /// view-projection matrix, where the side planes meet. The result is not
    /// finite for an orthographic projection.
    pub fn perspective_origin(&self) -> Vector3 {
        intersection_of_planes(
            &self.unnormalized_frustum_plane(FrustumPlane::NegativeX),
            &self.unnormalized_frustum_plane(FrustumPlane::PositiveX),
            &self.unnormalized_frustum_plane(FrustumPlane::NegativeY),
        )
    }

    /// Computes the vertical field of view of a perspective projection or
    /// view-projection matrix from the angle between its bottom and top
    /// planes.
    pub fn perspective_fov(&self) -> Radians {
        let bottom = self.unnormalized_frustum_plane(FrustumPlane::NegativeY).xyz();
        let flipped_top = -self.unnormalized_frustum_plane(FrustumPlane::PositiveY).xyz();
        let cos_angle = bottom.dot(&flipped_top) / (bottom.norm() * flipped_top.norm());
        Radians(cos_angle.clamp(-1.0, 1.0).acos())
    }

    /// Computes the distance from the camera to the near plane of a
    /// perspective projection or view-projection matrix with the `[-1, 1]`
    /// depth range.
    pub fn perspective_near(&self) -> f64 {
        -self.distance_from_perspective_origin(FrustumPlane::NegativeZ)
    }

    /// Computes the distance from the camera to the far plane of a
    /// perspective projection or view-projection matrix. The result is
    /// infinite or very large for an infinite far plane.
    pub fn perspective_far(&self) -> f64 {
        self.distance_from_perspective_origin(FrustumPlane::PositiveZ)
    }

    /// Computes the axis-aligned box enclosing the frustum, returned as its
    /// minimum and maximum corners.
    pub fn frustum_aabb(&self) -> (Vector3, Vector3) {
        let corners = self.frustum_corners();
        corners[1..]
            .iter()
            .fold((corners[0], corners[0]), |(min, max), corner| {
                (min.component_min(corner), max.component_max(corner))
            })
    }

    /// Whether the point lies inside the frustum or on its boundary.
    pub fn test_point(&self, point: &Vector3) -> bool {
        FrustumIntersection::new(self).test_point(point)
    }

    /// Whether any part of the given sphere could be inside the frustum.
    /// See [`FrustumIntersection::test_sphere`].
    pub fn test_sphere(&self, center: &Vector3, radius: f64) -> bool {
        FrustumIntersection::new(self).test_sphere(center, radius)
    }

    /// Whether any part of the given axis-aligned box could be inside the
    /// frustum. See [`FrustumIntersection::test_aab`].
    pub fn test_aab(&self, min: &Vector3, max: &Vector3) -> bool {
        FrustumIntersection::new(self).test_aab(min, max)
    }

    fn unnormalized_frustum_plane(&self, plane: FrustumPlane) -> Vector4 {
        let (row, sign) = plane.row_and_sign();
        self.row(3) + self.row(row) * sign
    }

    fn distance_from_perspective_origin(&self, plane: FrustumPlane) -> f64 {
        let plane = self.frustum_plane(plane);
        plane.xyz().dot(&self.perspective_origin()) + plane.w()
    }
}

/// Finds the point shared by three planes given as `(a, b, c, d)` with
/// `a x + b y + c z + d = 0`.
fn intersection_of_planes(a: &Vector4, b: &Vector4, c: &Vector4) -> Vector3 {
    let (na, nb, nc) = (a.xyz(), b.xyz(), c.xyz());
    let b_cross_c = nb.cross(&nc);
    let c_cross_a = nc.cross(&na);
    let a_cross_b = na.cross(&nb);
    let denominator = na.dot(&b_cross_c);
    -(b_cross_c * a.w() + c_cross_a * b.w() + a_cross_b * c.w()) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        angle::{Angle, Degrees},
        matrix4::tests::EPSILON,
        DepthRange, Handedness,
    };
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn perspective(handedness: Handedness) -> Matrix4 {
        Matrix4::perspective(
            Degrees(60.0),
            4.0 / 3.0,
            0.5,
            40.0,
            handedness,
            DepthRange::NegativeOneToOne,
        )
    }

    #[test]
    fn unit_ortho_planes_are_unit_cube_faces() {
        let m = Matrix4::ortho(
            -1.0,
            1.0,
            -1.0,
            1.0,
            -1.0,
            1.0,
            Handedness::Left,
            DepthRange::NegativeOneToOne,
        );
        assert_eq!(m, Matrix4::identity());
        let expected = [
            Vector4::new(1.0, 0.0, 0.0, 1.0),
            Vector4::new(-1.0, 0.0, 0.0, 1.0),
            Vector4::new(0.0, 1.0, 0.0, 1.0),
            Vector4::new(0.0, -1.0, 0.0, 1.0),
            Vector4::new(0.0, 0.0, 1.0, 1.0),
            Vector4::new(0.0, 0.0, -1.0, 1.0),
        ];
        assert_eq!(m.frustum_planes(), expected);
    }

    #[test]
    fn right_handed_unit_ortho_planes_are_unit_cube_faces() {
        let m = Matrix4::ortho(
            -1.0,
            1.0,
            -1.0,
            1.0,
            -1.0,
            1.0,
            Handedness::Right,
            DepthRange::NegativeOneToOne,
        );
        assert_eq!(m, Matrix4::scaling(&Vector3::new(1.0, 1.0, -1.0)));
        // Depth runs along -z, so the near face is z = 1
        let expected = [
            Vector4::new(1.0, 0.0, 0.0, 1.0),
            Vector4::new(-1.0, 0.0, 0.0, 1.0),
            Vector4::new(0.0, 1.0, 0.0, 1.0),
            Vector4::new(0.0, -1.0, 0.0, 1.0),
            Vector4::new(0.0, 0.0, -1.0, 1.0),
            Vector4::new(0.0, 0.0, 1.0, 1.0),
        ];
        let planes = m.frustum_planes();
        assert_eq!(planes, expected);
        for plane in planes {
            assert_eq!(plane.xyz().norm(), 1.0);
            assert_eq!(plane.w(), 1.0);
        }
    }

    #[test]
    fn unit_ortho_corners_are_unit_cube_corners() {
        let m = Matrix4::identity();
        assert_eq!(
            m.frustum_corner(FrustumCorner::NearBottomLeft),
            Vector3::same(-1.0)
        );
        assert_eq!(
            m.frustum_corner(FrustumCorner::FarTopRight),
            Vector3::same(1.0)
        );
        assert_eq!(
            m.frustum_corner(FrustumCorner::FarBottomRight),
            Vector3::new(1.0, -1.0, 1.0)
        );
        assert_eq!(m.frustum_aabb(), (Vector3::same(-1.0), Vector3::same(1.0)));
    }

    #[test]
    fn plane_normals_have_unit_length_and_point_inward() {
        let m = perspective(Handedness::Right);
        let inside = Vector3::new(0.0, 0.0, -10.0);
        for plane in m.frustum_planes() {
            assert_abs_diff_eq!(plane.xyz().norm(), 1.0, epsilon = EPSILON);
            assert!(plane.xyz().dot(&inside) + plane.w() > 0.0);
        }
    }

    #[test]
    fn corners_are_projected_to_clip_volume_corners() {
        let m = perspective(Handedness::Right);
        for corner in FrustumCorner::ALL {
            let ndc = m.transform_project(&m.frustum_corner(corner));
            for value in <[f64; 3]>::from(ndc) {
                assert_abs_diff_eq!(value.abs(), 1.0, epsilon = 1e-9);
            }
        }
        let near_bottom_left = m.frustum_corner(FrustumCorner::NearBottomLeft);
        assert_abs_diff_eq!(near_bottom_left.z(), -0.5, epsilon = EPSILON);
        let far_top_right = m.frustum_corner(FrustumCorner::FarTopRight);
        assert_abs_diff_eq!(far_top_right.z(), -40.0, epsilon = 1e-9);
    }

    #[test]
    fn point_just_beyond_near_plane_is_inside() {
        let epsilon = 1e-6;
        for handedness in [Handedness::Right, Handedness::Left] {
            let m = perspective(handedness);
            let direction = if handedness == Handedness::Right { -1.0 } else { 1.0 };
            assert!(m.test_point(&Vector3::new(0.0, 0.0, direction * (0.5 + epsilon))));
            assert!(!m.test_point(&Vector3::new(0.0, 0.0, direction * (0.5 - epsilon))));
            assert!(m.test_point(&Vector3::new(0.0, 0.0, direction * (40.0 - epsilon))));
            assert!(!m.test_point(&Vector3::new(0.0, 0.0, direction * (40.0 + epsilon))));
        }
    }

    #[test]
    fn box_matching_frustum_bounds_passes_tests() {
        let m = perspective(Handedness::Right);
        let (min, max) = m.frustum_aabb();
        assert!(m.test_aab(&min, &max));
        let center = (min + max) * 0.5;
        assert!(m.test_sphere(&center, (max - center).norm()));
        for corner in m.frustum_corners() {
            assert!(m.test_sphere(&corner, 1e-9));
        }
    }

    #[test]
    fn boxes_and_spheres_outside_are_rejected() {
        let m = perspective(Handedness::Right);
        assert!(!m.test_aab(&Vector3::new(-1.0, -1.0, 1.0), &Vector3::new(1.0, 1.0, 2.0)));
        assert!(!m.test_sphere(&Vector3::new(0.0, 100.0, -10.0), 5.0));
        assert!(m.test_sphere(&Vector3::new(0.0, 0.0, 1.0), 2.0));
    }

    #[test]
    fn perspective_parameters_are_recovered_from_view_projection() {
        let eye = Vector3::new(3.0, -1.0, 5.0);
        let view = Matrix4::look_at(&eye, &Vector3::zeros(), &Vector3::unit_y(), Handedness::Right);
        let view_projection = perspective(Handedness::Right) * view;
        assert_abs_diff_eq!(view_projection.perspective_origin(), eye, epsilon = 1e-9);
        assert_relative_eq!(
            view_projection.perspective_fov().radians(),
            Degrees(60.0).radians(),
            epsilon = 1e-9
        );
        assert_relative_eq!(view_projection.perspective_near(), 0.5, epsilon = 1e-9);
        assert_relative_eq!(view_projection.perspective_far(), 40.0, max_relative = 1e-9);
    }

    #[test]
    fn ray_directions_interpolate_corner_edges() {
        let m = perspective(Handedness::Right);
        let center_ray = m.frustum_ray_dir(0.5, 0.5);
        assert_abs_diff_eq!(center_ray.normalized(), -Vector3::unit_z(), epsilon = EPSILON);

        let corner_ray = m.frustum_ray_dir(1.0, 1.0);
        let expected = m.frustum_corner(FrustumCorner::FarTopRight)
            - m.frustum_corner(FrustumCorner::NearTopRight);
        assert_abs_diff_eq!(corner_ray, expected, epsilon = 1e-9);
    }
}
