//! Transformation of points, vectors and boxes, and viewport mapping.

use super::{Matrix4, MatrixProperties};
use crate::vector::{Vector2, Vector3, Vector4};

/// A window region that normalized device coordinates in `[-1, 1]` are
/// mapped onto.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn window_to_ndc(&self, window_x: f64, window_y: f64) -> (f64, f64) {
        (
            (window_x - self.x) / self.width * 2.0 - 1.0,
            (window_y - self.y) / self.height * 2.0 - 1.0,
        )
    }
}

impl Matrix4 {
    /// Computes `self * v` for the full homogeneous vector.
    pub fn transform(&self, vector: &Vector4) -> Vector4 {
        let c = &self.cols;
        let v = vector.to_array();
        Vector4::from(std::array::from_fn(|row| {
            c[0][row] * v[0] + c[1][row] * v[1] + c[2][row] * v[2] + c[3][row] * v[3]
        }))
    }

    /// Like [`Self::transform`] for an affine matrix, leaving `w` unchanged.
    pub fn transform_affine(&self, vector: &Vector4) -> Vector4 {
        debug_assert!(self.has_structure(MatrixProperties::AFFINE));
        let c = &self.cols;
        let v = vector.to_array();
        Vector4::new(
            c[0][0] * v[0] + c[1][0] * v[1] + c[2][0] * v[2] + c[3][0] * v[3],
            c[0][1] * v[0] + c[1][1] * v[1] + c[2][1] * v[2] + c[3][1] * v[3],
            c[0][2] * v[0] + c[1][2] * v[1] + c[2][2] * v[2] + c[3][2] * v[3],
            v[3],
        )
    }

    /// Transforms the point `(x, y, z, 1)`, ignoring the last row.
    pub fn transform_point(&self, point: &Vector3) -> Vector3 {
        self.transform_vector(point) + self.translation()
    }

    /// Transforms the direction `(x, y, z, 0)`, ignoring the last row.
    pub fn transform_vector(&self, vector: &Vector3) -> Vector3 {
        self.column(0).xyz() * vector.x()
            + self.column(1).xyz() * vector.y()
            + self.column(2).xyz() * vector.z()
    }

    /// Transforms the point `(x, y, z, 1)` and divides by the resulting `w`.
    pub fn transform_project(&self, point: &Vector3) -> Vector3 {
        self.transform(&point.extended(1.0)).perspective_divided()
    }

    /// Computes the axis-aligned box enclosing the given box after it has
    /// been transformed by this affine matrix. Returns the new minimum and
    /// maximum corners.
    pub fn transform_aab(&self, min: &Vector3, max: &Vector3) -> (Vector3, Vector3) {
        debug_assert!(self.has_structure(MatrixProperties::AFFINE));
        let mut new_min = self.translation();
        let mut new_max = new_min;
        for (axis, (lower, upper)) in [(min.x(), max.x()), (min.y(), max.y()), (min.z(), max.z())]
            .into_iter()
            .enumerate()
        {
            let column = self.column(axis).xyz();
            let a = column * lower;
            let b = column * upper;
            new_min += a.component_min(&b);
            new_max += a.component_max(&b);
        }
        (new_min, new_max)
    }

    /// Maps a point to window coordinates: the x- and y-coordinates lie in
    /// the viewport and the z-coordinate is depth in `[0, 1]` for a
    /// projection with the `[-1, 1]` depth range.
    pub fn project(&self, point: &Vector3, viewport: &Viewport) -> Vector3 {
        let ndc = self.transform_project(point);
        Vector3::new(
            (ndc.x() * 0.5 + 0.5) * viewport.width + viewport.x,
            (ndc.y() * 0.5 + 0.5) * viewport.height + viewport.y,
            (1.0 + ndc.z()) * 0.5,
        )
    }

    /// Maps window coordinates produced by [`Self::project`] back to the
    /// point they came from.
    pub fn unproject(&self, window: &Vector3, viewport: &Viewport) -> Vector3 {
        let (ndc_x, ndc_y) = viewport.window_to_ndc(window.x(), window.y());
        let ndc_z = window.z() * 2.0 - 1.0;
        self.inverse_general()
            .transform_project(&Vector3::new(ndc_x, ndc_y, ndc_z))
    }

    /// Computes the ray through the given window position. The ray starts
    /// on the near plane and its direction reaches the far plane, so it is
    /// not normalized.
    pub fn unproject_ray(&self, window: &Vector2, viewport: &Viewport) -> (Vector3, Vector3) {
        let (ndc_x, ndc_y) = viewport.window_to_ndc(window.x(), window.y());
        let inverse = self.inverse_general();
        let near = inverse.transform_project(&Vector3::new(ndc_x, ndc_y, -1.0));
        let far = inverse.transform_project(&Vector3::new(ndc_x, ndc_y, 1.0));
        (near, far - near)
    }
}

impl_binop!(Mul, mul, Matrix4, Vector4, Vector4, |a, b| { a.transform(b) });

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        angle::Degrees,
        matrix4::tests::EPSILON,
        DepthRange, Handedness,
    };
    use approx::assert_abs_diff_eq;

    fn camera() -> Matrix4 {
        Matrix4::perspective(
            Degrees(60.0),
            16.0 / 9.0,
            0.5,
            200.0,
            Handedness::Right,
            DepthRange::NegativeOneToOne,
        ) * Matrix4::look_at(
            &Vector3::new(2.0, 3.0, 10.0),
            &Vector3::zeros(),
            &Vector3::unit_y(),
            Handedness::Right,
        )
    }

    #[test]
    fn transforming_points_and_vectors_treats_translation_differently() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0)).rotated_z(Degrees(90.0));
        assert_abs_diff_eq!(
            m.transform_point(&Vector3::unit_x()),
            Vector3::new(1.0, 3.0, 3.0),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            m.transform_vector(&Vector3::unit_x()),
            Vector3::unit_y(),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            m.transform_affine(&Vector4::new(1.0, 0.0, 0.0, 1.0)),
            m * Vector4::new(1.0, 0.0, 0.0, 1.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn transformed_box_encloses_transformed_corners() {
        let m = Matrix4::from_translation(&Vector3::new(-1.0, 0.5, 2.0))
            .rotated_y(Degrees(35.0))
            .scaled(&Vector3::new(1.0, 2.0, 0.5));
        let (min, max) = (Vector3::new(-1.0, -2.0, 0.0), Vector3::new(3.0, 1.0, 4.0));
        let (new_min, new_max) = m.transform_aab(&min, &max);
        for i in 0..8 {
            let corner = Vector3::new(
                if i & 1 == 0 { min.x() } else { max.x() },
                if i & 2 == 0 { min.y() } else { max.y() },
                if i & 4 == 0 { min.z() } else { max.z() },
            );
            let p = m.transform_point(&corner);
            for axis in 0..3 {
                assert!(p[axis] >= new_min[axis] - EPSILON);
                assert!(p[axis] <= new_max[axis] + EPSILON);
            }
        }
    }

    #[test]
    fn projecting_then_unprojecting_returns_point() {
        let viewport = Viewport::new(10.0, 20.0, 1920.0, 1080.0);
        let point = Vector3::new(0.5, -0.25, 1.0);
        let m = camera();
        let window = m.project(&point, &viewport);
        assert!(window.z() > 0.0 && window.z() < 1.0);
        assert_abs_diff_eq!(m.unproject(&window, &viewport), point, epsilon = 1e-8);
    }

    #[test]
    fn unprojected_ray_passes_through_projected_point() {
        let viewport = Viewport::new(0.0, 0.0, 800.0, 600.0);
        let point = Vector3::new(-1.0, 0.5, 2.0);
        let m = camera();
        let window = m.project(&point, &viewport);
        let (origin, direction) = m.unproject_ray(&window.xy(), &viewport);
        let to_point = point - origin;
        assert_abs_diff_eq!(
            to_point.cross(&direction).norm() / direction.norm(),
            0.0,
            epsilon = 1e-8
        );
    }
}
