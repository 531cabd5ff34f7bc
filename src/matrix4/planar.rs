//! Reflections in planes and planar shadow projections.

use super::{Matrix4, MatrixProperties};
use crate::{
    quaternion::Quaternion,
    vector::{Vector3, Vector4},
};

impl Matrix4 {
    /// Creates the reflection in the plane `a x + b y + c z + d = 0` given as
    /// `(a, b, c, d)`. The normal `(a, b, c)` is assumed to have unit length.
    pub fn reflection_in_plane(plane: &Vector4) -> Self {
        let [a, b, c, d] = plane.to_array();
        let (da, db, dc, dd) = (a + a, b + b, c + c, d + d);
        Self::with_properties(
            [
                [1.0 - da * a, -da * b, -da * c, 0.0],
                [-db * a, 1.0 - db * b, -db * c, 0.0],
                [-dc * a, -dc * b, 1.0 - dc * c, 0.0],
                [-dd * a, -dd * b, -dd * c, 1.0],
            ],
            MatrixProperties::AFFINE,
        )
    }

    /// Creates the reflection in the plane through `point` with the given
    /// (not necessarily unit) normal.
    pub fn reflection(normal: &Vector3, point: &Vector3) -> Self {
        Self::reflection_in_plane(&plane_through(normal, point))
    }

    /// Creates the reflection in the plane through `point` whose normal is
    /// the z-axis rotated by the given unit quaternion.
    pub fn reflection_oriented(orientation: &Quaternion, point: &Vector3) -> Self {
        Self::reflection(&orientation.rotate_vector(&Vector3::unit_z()), point)
    }

    /// Computes `self * R`, where `R` is [`Self::reflection_in_plane`].
    pub fn reflected_in_plane(&self, plane: &Vector4) -> Self {
        self.product(&Self::reflection_in_plane(plane))
    }

    /// Computes `self * R`, where `R` is [`Self::reflection`].
    pub fn reflected(&self, normal: &Vector3, point: &Vector3) -> Self {
        self.product(&Self::reflection(normal, point))
    }

    pub fn reflect_in_plane(&mut self, plane: &Vector4) {
        *self = self.reflected_in_plane(plane);
    }

    pub fn reflect(&mut self, normal: &Vector3, point: &Vector3) {
        *self = self.reflected(normal, point);
    }

    /// Creates the matrix projecting points onto the plane `(a, b, c, d)`
    /// along rays from the given homogeneous light position. A light with
    /// `w = 0` is directional. The plane does not need a unit normal.
    ///
    /// The result is `dot * I - light * plane^T` with `dot` the product of
    /// the normalized plane and the light, so every projected point
    /// satisfies the plane equation after division by `w`.
    pub fn shadow_projection(light: &Vector4, plane: &Vector4) -> Self {
        let plane = *plane * plane.xyz().norm().recip();
        let dot = plane.dot(light);
        let l = light.to_array();
        let p = plane.to_array();
        let mut cols = [[0.0; 4]; 4];
        for (col, col_values) in cols.iter_mut().enumerate() {
            for (row, value) in col_values.iter_mut().enumerate() {
                let diagonal = if row == col { dot } else { 0.0 };
                *value = diagonal - p[col] * l[row];
            }
        }
        Self::with_properties(cols, MatrixProperties::empty())
    }

    /// Computes `self * S`, where `S` is [`Self::shadow_projection`].
    pub fn shadowed(&self, light: &Vector4, plane: &Vector4) -> Self {
        self.product(&Self::shadow_projection(light, plane))
    }

    pub fn shadow(&mut self, light: &Vector4, plane: &Vector4) {
        *self = self.shadowed(light, plane);
    }
}

/// The plane `(a, b, c, d)` with unit normal through the given point.
fn plane_through(normal: &Vector3, point: &Vector3) -> Vector4 {
    let normal = normal.normalized();
    normal.extended(-normal.dot(point))
}
