//! Extraction of translation, scale, rotation and derived matrices.

use super::{Matrix4, MatrixProperties};
use crate::{
    matrix3::Matrix3,
    quaternion::{AxisAngle, Quaternion},
    vector::Vector3,
};

impl Matrix4 {
    /// The translation part `(m30, m31, m32)`.
    #[inline]
    pub fn translation(&self) -> Vector3 {
        let [x, y, z, _] = self.cols[3];
        Vector3::new(x, y, z)
    }

    /// Returns a copy with the translation part replaced.
    pub fn with_translation(&self, translation: &Vector3) -> Self {
        let mut result = *self;
        result.set_translation(translation);
        result
    }

    /// Overwrites `(m30, m31, m32)` with the given translation.
    pub fn set_translation(&mut self, translation: &Vector3) {
        self.cols[3][..3].copy_from_slice(&<[f64; 3]>::from(*translation));
        self.properties -= MatrixProperties::IDENTITY | MatrixProperties::PERSPECTIVE;
    }

    /// The lengths of the first three columns, which are the scale factors
    /// of a matrix composed as `T * R * S`.
    pub fn scale_factors(&self) -> Vector3 {
        Vector3::new(
            self.column(0).xyz().norm(),
            self.column(1).xyz().norm(),
            self.column(2).xyz().norm(),
        )
    }

    /// Extracts the rotation of the 3x3 block, assuming that its columns
    /// have unit length.
    pub fn rotation_normalized(&self) -> Quaternion {
        Quaternion::from_normalized_rotation_elements(&self.matrix3().to_cols_array_2d())
    }

    /// Extracts the rotation of the 3x3 block, dividing out any scaling of
    /// the columns first.
    pub fn rotation_unnormalized(&self) -> Quaternion {
        Quaternion::from_unnormalized_rotation_elements(&self.matrix3().to_cols_array_2d())
    }

    /// Extracts the rotation of the 3x3 block as an axis and angle, dividing
    /// out any scaling of the columns first.
    pub fn axis_angle_unnormalized(&self) -> AxisAngle {
        AxisAngle::from(self.rotation_unnormalized())
    }

    /// Extracts the angles `(x, y, z)` in radians of the rotation
    /// `Rz(z) * Ry(y) * Rx(x)` from a 3x3 block with unit-length columns.
    ///
    /// When `|m02|` is close to one the rotation is in gimbal lock and only
    /// one of the many valid angle triples is returned.
    pub fn euler_angles_zyx(&self) -> Vector3 {
        let c = &self.cols;
        let (m00, m01, m02, m12, m22) = (c[0][0], c[0][1], c[0][2], c[1][2], c[2][2]);
        Vector3::new(
            m12.atan2(m22),
            (-m02).atan2(m12.hypot(m22)),
            m01.atan2(m00),
        )
    }

    /// Computes the matrix for transforming normal vectors: the transpose of
    /// the inverse of the 3x3 block, with no translation.
    pub fn normal(&self) -> Self {
        Self::from_matrix3(&self.normal_matrix3())
    }

    /// Like [`Self::normal`], but returns only the 3x3 block.
    pub fn normal_matrix3(&self) -> Matrix3 {
        self.matrix3().inverted().transposed()
    }

    /// Like [`Self::normal`] for a matrix whose 3x3 block is orthonormal, in
    /// which case the normal matrix is the block itself.
    pub fn normal_orthogonal(&self) -> Self {
        debug_assert!(self.has_orthonormal_3x3(1e-6));
        Self::from_matrix3(&self.matrix3())
    }

    /// Returns a copy with each of the first three columns scaled to unit
    /// length, which strips the scaling from a `T * R * S` matrix.
    pub fn normalized_3x3(&self) -> Self {
        let mut result = *self;
        for col in result.cols.iter_mut().take(3) {
            let inv_norm = (col[0] * col[0] + col[1] * col[1] + col[2] * col[2])
                .sqrt()
                .recip();
            for value in col.iter_mut().take(3) {
                *value *= inv_norm;
            }
        }
        result.properties &= MatrixProperties::AFFINE;
        result
    }

    pub fn normalize_3x3(&mut self) {
        *self = self.normalized_3x3();
    }

    /// The unit direction that the 3x3 block maps onto `+x`.
    pub fn positive_x(&self) -> Vector3 {
        self.matrix3().inverted().column(0).normalized()
    }

    /// The unit direction that the 3x3 block maps onto `+y`.
    pub fn positive_y(&self) -> Vector3 {
        self.matrix3().inverted().column(1).normalized()
    }

    /// The unit direction that the 3x3 block maps onto `+z`.
    pub fn positive_z(&self) -> Vector3 {
        self.matrix3().inverted().column(2).normalized()
    }

    /// Like [`Self::positive_x`] for an orthogonal 3x3 block, where the
    /// inverse is the transpose. The result is the first row.
    pub fn normalized_positive_x(&self) -> Vector3 {
        self.row(0).xyz()
    }

    /// Like [`Self::positive_y`] for an orthogonal 3x3 block.
    pub fn normalized_positive_y(&self) -> Vector3 {
        self.row(1).xyz()
    }

    /// Like [`Self::positive_z`] for an orthogonal 3x3 block.
    pub fn normalized_positive_z(&self) -> Vector3 {
        self.row(2).xyz()
    }

    /// The point that the matrix maps to the homogeneous origin
    /// `(0, 0, 0, 1)`.
    pub fn origin(&self) -> Vector3 {
        self.inverse_general().column(3).perspective_divided()
    }

    /// Like [`Self::origin`] for an affine matrix.
    pub fn origin_affine(&self) -> Vector3 {
        debug_assert!(self.has_structure(MatrixProperties::AFFINE));
        -(self.matrix3().inverted() * self.translation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        angle::{Degrees, Radians},
        matrix4::tests::EPSILON,
        DepthRange, Handedness,
    };
    use approx::assert_abs_diff_eq;

    #[test]
    fn decomposing_translation_rotation_scale_recovers_factors_exactly() {
        let m = Matrix4::translation_rotation_scale(
            &Vector3::new(1.0, 2.0, 3.0),
            &Quaternion::new(0.0, 0.0, 0.0, 1.0),
            &Vector3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(m.translation(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m.scale_factors(), Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(m.rotation_unnormalized(), Quaternion::identity());
        assert_eq!(m.normalized_3x3().rotation_normalized(), Quaternion::identity());
    }

    #[test]
    fn extracted_rotation_reproduces_rotation_block() {
        let q = Quaternion::from_axis_angle(&Vector3::new(-1.0, 2.0, 0.5).normalized(), Degrees(160.0));
        let s = Vector3::new(1.5, 0.5, 3.0);
        let m = Matrix4::translation_rotation_scale(&Vector3::zeros(), &q, &s);
        let extracted = m.rotation_unnormalized();
        let rebuilt = Matrix4::from_quaternion(&extracted).scaled(&s);
        assert_abs_diff_eq!(rebuilt.matrix3(), m.matrix3(), epsilon = EPSILON);
        assert_abs_diff_eq!(m.scale_factors(), s, epsilon = EPSILON);
    }

    #[test]
    fn extracting_axis_angle_gives_rotation_axis() {
        let axis = Vector3::new(0.0, 0.6, 0.8);
        let m = Matrix4::rotation(&axis, Degrees(70.0)).scaled(&Vector3::same(4.0));
        let axis_angle = m.axis_angle_unnormalized();
        assert_abs_diff_eq!(*axis_angle.axis(), axis, epsilon = 1e-9);
        assert_abs_diff_eq!(axis_angle.angle(), Radians::from(Degrees(70.0)), epsilon = 1e-9);
    }

    #[test]
    fn extracting_euler_angles_inverts_zyx_rotation() {
        let (x, y, z) = (0.3, -0.7, 1.9);
        let m = Matrix4::rotation_zyx(Radians(z), Radians(y), Radians(x));
        assert_abs_diff_eq!(m.euler_angles_zyx(), Vector3::new(x, y, z), epsilon = EPSILON);
    }

    #[test]
    fn extracting_euler_angles_in_gimbal_lock_gives_equivalent_rotation() {
        let m = Matrix4::rotation_zyx(Radians(0.4), Degrees(90.0).into(), Radians(0.1));
        let angles = m.euler_angles_zyx();
        let rebuilt = Matrix4::rotation_zyx(Radians(angles.z()), Radians(angles.y()), Radians(angles.x()));
        assert_abs_diff_eq!(rebuilt, m, epsilon = 1e-7);
    }

    #[test]
    fn normal_matrix_keeps_normals_perpendicular_under_non_uniform_scaling() {
        let m = Matrix4::scaling(&Vector3::new(1.0, 4.0, 1.0)) * Matrix4::rotation_z(Degrees(30.0));
        let tangent = Vector3::new(1.0, 1.0, 0.0);
        let normal = Vector3::new(1.0, -1.0, 0.0);
        let transformed_tangent = m.transform_vector(&tangent);
        let transformed_normal = m.normal().transform_vector(&normal);
        assert_abs_diff_eq!(transformed_tangent.dot(&transformed_normal), 0.0, epsilon = EPSILON);
        assert_eq!(m.normal().properties(), MatrixProperties::AFFINE);
        assert_abs_diff_eq!(m.normal().matrix3(), m.normal_matrix3(), epsilon = EPSILON);
    }

    #[test]
    fn orthogonal_normal_matrix_agrees_with_general_normal_matrix() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0)).rotated_y(Degrees(25.0));
        assert_abs_diff_eq!(m.normal_orthogonal(), m.normal(), epsilon = EPSILON);
    }

    #[test]
    fn positive_axes_of_rotation_agree_with_normalized_variants() {
        let m = Matrix4::rotation_xyz(Degrees(10.0), Degrees(-50.0), Degrees(80.0));
        assert_abs_diff_eq!(m.positive_x(), m.normalized_positive_x(), epsilon = EPSILON);
        assert_abs_diff_eq!(m.positive_y(), m.normalized_positive_y(), epsilon = EPSILON);
        assert_abs_diff_eq!(m.positive_z(), m.normalized_positive_z(), epsilon = EPSILON);
        assert_abs_diff_eq!(
            m.transform_vector(&m.positive_z()),
            Vector3::unit_z(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn origin_is_mapped_to_origin() {
        let eye = Vector3::new(4.0, -2.0, 7.0);
        let view = Matrix4::look_at(&eye, &Vector3::zeros(), &Vector3::unit_y(), Handedness::Right);
        assert_abs_diff_eq!(view.origin_affine(), eye, epsilon = EPSILON);

        let projection = Matrix4::perspective(
            Degrees(70.0),
            1.3,
            0.1,
            100.0,
            Handedness::Right,
            DepthRange::ZeroToOne,
        );
        let view_projection = projection * view;
        assert_abs_diff_eq!(
            view_projection.transform_project(&view_projection.origin()),
            Vector3::zeros(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn setting_translation_keeps_translation_property() {
        let mut m = Matrix4::identity();
        m.set_translation(&Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(
            m.properties(),
            MatrixProperties::AFFINE | MatrixProperties::TRANSLATION
        );
        assert_eq!(m, Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0)));
    }
}
