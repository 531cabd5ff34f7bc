//! Rotations that aim an axis at a direction or target, and rotations
//! around a pivot.

use super::{Matrix4, MatrixProperties};
use crate::{quaternion::Quaternion, vector::Vector3};

impl Matrix4 {
    /// Creates the rotation that maps the z-axis onto `direction` and keeps
    /// the rotated y-axis as close to `up` as possible. Unlike
    /// [`Self::look_along`] this is a model transform, not a view transform.
    pub fn rotation_towards(direction: &Vector3, up: &Vector3) -> Self {
        let [x_axis, y_axis, z_axis] = towards_basis(direction, up);
        Self::from_basis(&x_axis, &y_axis, &z_axis, &Vector3::zeros())
    }

    /// Computes `self * R`, where `R` is [`Self::rotation_towards`].
    pub fn rotated_towards(&self, direction: &Vector3, up: &Vector3) -> Self {
        self.product(&Self::rotation_towards(direction, up))
    }

    pub fn rotate_towards(&mut self, direction: &Vector3, up: &Vector3) {
        *self = self.rotated_towards(direction, up);
    }

    /// Creates the rotation by the given unit quaternion around `pivot`
    /// instead of the origin, `T(pivot) * R * T(-pivot)`.
    pub fn rotation_around(rotation: &Quaternion, pivot: &Vector3) -> Self {
        Self::from_translation(pivot)
            .rotated_quaternion(rotation)
            .translated(&-pivot)
    }

    /// Computes `self * T(pivot) * R * T(-pivot)`.
    pub fn rotated_around(&self, rotation: &Quaternion, pivot: &Vector3) -> Self {
        self.translated(pivot)
            .rotated_quaternion(rotation)
            .translated(&-pivot)
    }

    pub fn rotate_around(&mut self, rotation: &Quaternion, pivot: &Vector3) {
        *self = self.rotated_around(rotation, pivot);
    }

    /// Creates the model transform of a billboard at `object` whose z-axis
    /// points at `target`. The y-axis is tilted from `up` as needed to stay
    /// perpendicular.
    pub fn billboard_spherical(object: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let [x_axis, y_axis, z_axis] = towards_basis(&(target - object), up);
        Self::from_basis(&x_axis, &y_axis, &z_axis, object)
    }

    /// Creates the model transform of a billboard at `object` that only
    /// rotates around the unit `up` axis to face `target` as closely as
    /// possible.
    pub fn billboard_cylindrical(object: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let x_axis = up.cross(&(target - object)).normalized();
        let z_axis = x_axis.cross(up).normalized();
        Self::from_basis(&x_axis, up, &z_axis, object)
    }

    fn from_basis(x_axis: &Vector3, y_axis: &Vector3, z_axis: &Vector3, origin: &Vector3) -> Self {
        Self::with_properties(
            [
                x_axis.extended(0.0).to_array(),
                y_axis.extended(0.0).to_array(),
                z_axis.extended(0.0).to_array(),
                origin.extended(1.0).to_array(),
            ],
            MatrixProperties::AFFINE,
        )
    }
}

/// The orthonormal basis whose z-axis is `direction` and whose y-axis lies
/// in the plane spanned by `direction` and `up`.
fn towards_basis(direction: &Vector3, up: &Vector3) -> [Vector3; 3] {
    let z_axis = direction.normalized();
    let x_axis = up.cross(&z_axis).normalized();
    let y_axis = z_axis.cross(&x_axis);
    [x_axis, y_axis, z_axis]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        angle::Degrees,
        matrix4::tests::{EPSILON, affine_matrix_strategy, general_matrix_strategy},
    };
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn rotation_towards_maps_z_axis_onto_direction() {
        let direction = Vector3::new(1.0, 2.0, -2.0);
        let r = Matrix4::rotation_towards(&direction, &Vector3::unit_y());
        assert_eq!(r.properties(), MatrixProperties::AFFINE);
        assert_abs_diff_eq!(
            r.transform_vector(&Vector3::unit_z()),
            direction / 3.0,
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(r.determinant(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(
            r.transform_vector(&Vector3::unit_y()).dot(&Vector3::unit_y()),
            (1.0 - (2.0_f64 / 3.0).powi(2)).sqrt(),
            epsilon = EPSILON
        );
    }

    #[test]
    fn rotation_towards_is_inverse_of_left_handed_look_along() {
        let direction = Vector3::new(-0.5, 0.3, 2.0);
        let up = Vector3::unit_y();
        assert_abs_diff_eq!(
            Matrix4::rotation_towards(&direction, &up).inverse(),
            Matrix4::look_along(&direction, &up, crate::Handedness::Left),
            epsilon = EPSILON
        );
    }

    #[test]
    fn rotation_around_pivot_keeps_pivot_fixed() {
        let pivot = Vector3::new(1.0, 2.0, 3.0);
        let rotation = Quaternion::from_axis_angle(&Vector3::unit_z(), Degrees(90.0));
        let m = Matrix4::rotation_around(&rotation, &pivot);
        assert_eq!(m.properties(), MatrixProperties::AFFINE);
        assert_abs_diff_eq!(m.transform_point(&pivot), pivot, epsilon = EPSILON);
        assert_abs_diff_eq!(
            m.transform_point(&Vector3::new(2.0, 2.0, 3.0)),
            Vector3::new(1.0, 3.0, 3.0),
            epsilon = EPSILON
        );

        let mut from_identity = Matrix4::identity();
        from_identity.rotate_around(&rotation, &pivot);
        assert_abs_diff_eq!(from_identity, m, epsilon = EPSILON);
    }

    #[test]
    fn spherical_billboard_faces_target() {
        let object = Vector3::new(1.0, 0.0, 0.0);
        let target = Vector3::new(1.0, 3.0, 4.0);
        let b = Matrix4::billboard_spherical(&object, &target, &Vector3::unit_y());
        assert_eq!(b.translation(), object);
        assert_abs_diff_eq!(
            b.transform_vector(&Vector3::unit_z()),
            Vector3::new(0.0, 0.6, 0.8),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            b,
            Matrix4::from_translation(&object)
                .mul_general(&Matrix4::rotation_towards(&(target - object), &Vector3::unit_y())),
            epsilon = EPSILON
        );
    }

    #[test]
    fn cylindrical_billboard_keeps_up_axis() {
        let object = Vector3::new(0.0, 1.0, 0.0);
        let target = Vector3::new(3.0, 10.0, 4.0);
        let b = Matrix4::billboard_cylindrical(&object, &target, &Vector3::unit_y());
        assert_eq!(b.transform_vector(&Vector3::unit_y()), Vector3::unit_y());
        assert_abs_diff_eq!(
            b.transform_vector(&Vector3::unit_z()),
            Vector3::new(0.6, 0.0, 0.8),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(b.determinant(), 1.0, epsilon = EPSILON);
    }

    proptest! {
        #[test]
        fn rotating_towards_agrees_with_general_product(
            m in general_matrix_strategy(),
            direction in prop::array::uniform3(0.1..2.0_f64),
        ) {
            let direction = Vector3::from(direction);
            let up = Vector3::unit_y();
            let mut rotated = m;
            rotated.rotate_towards(&direction, &up);
            prop_assert!(approx::relative_eq!(
                rotated,
                m.mul_general(&Matrix4::rotation_towards(&direction, &up)),
                epsilon = EPSILON,
                max_relative = EPSILON
            ));
        }

        #[test]
        fn rotating_around_pivot_agrees_with_general_product(
            m in affine_matrix_strategy(),
            g in general_matrix_strategy(),
            pivot in prop::array::uniform3(-5.0..5.0_f64),
            angle in -3.0..3.0_f64,
        ) {
            let pivot = Vector3::from(pivot);
            let rotation = Quaternion::from_axis_angle(&Vector3::new(1.0, -1.0, 2.0).normalized(), crate::Radians(angle));
            let around = Matrix4::from_translation(&pivot)
                .mul_general(&Matrix4::from_quaternion(&rotation))
                .mul_general(&Matrix4::from_translation(&-pivot));
            for matrix in [m, g] {
                prop_assert!(approx::relative_eq!(
                    matrix.rotated_around(&rotation, &pivot),
                    matrix.mul_general(&around),
                    epsilon = EPSILON,
                    max_relative = EPSILON
                ));
            }
        }
    }
}
