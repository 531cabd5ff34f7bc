//! Double-precision 4x4 matrices.

mod buffer;
mod compose;
mod decompose;
mod frustum;
mod invert;
mod orient;
mod planar;
mod projection;
pub mod properties;
mod transform;

pub use projection::{DepthRange, Handedness};
pub use properties::MatrixProperties;
pub use transform::Viewport;

use crate::{
    angle::Angle,
    matrix3::Matrix3,
    matrix3x2::Matrix3x2,
    quaternion::{AxisAngle, Quaternion},
    vector::{Vector3, Vector4},
};
use std::fmt;

/// A 4x4 matrix of `f64` elements stored in column-major order, together
/// with a cached classification of its structure.
///
/// Element `mCR` lives in column `C` and row `R`, so `m30`, `m31` and `m32`
/// hold the translation and `m03`, `m13`, `m23`, `m33` form the last row.
/// Vectors are treated as columns and transformed as `M * v`.
///
/// The [`MatrixProperties`] are maintained by every operation. Builders set
/// them exactly, while element writes and general compositions clear them
/// conservatively. They are only ever forced by the unsafe
/// [`Self::assume_properties`].
#[derive(Clone, Copy)]
pub struct Matrix4 {
    cols: [[f64; 4]; 4],
    properties: MatrixProperties,
}

const IDENTITY_COLS: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

impl Matrix4 {
    /// Creates the identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::with_properties(IDENTITY_COLS, MatrixProperties::IDENTITY_MATRIX)
    }

    /// Creates a matrix with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::with_properties([[0.0; 4]; 4], MatrixProperties::empty())
    }

    /// Creates a matrix from the given elements, listed column by column.
    /// The properties are determined from the element values.
    pub fn new(
        m00: f64,
        m01: f64,
        m02: f64,
        m03: f64,
        m10: f64,
        m11: f64,
        m12: f64,
        m13: f64,
        m20: f64,
        m21: f64,
        m22: f64,
        m23: f64,
        m30: f64,
        m31: f64,
        m32: f64,
        m33: f64,
    ) -> Self {
        Self::from_cols_array_2d([
            [m00, m01, m02, m03],
            [m10, m11, m12, m13],
            [m20, m21, m22, m23],
            [m30, m31, m32, m33],
        ])
    }

    /// Creates a matrix with the given columns.
    pub fn from_columns(
        column_0: &Vector4,
        column_1: &Vector4,
        column_2: &Vector4,
        column_3: &Vector4,
    ) -> Self {
        Self::from_cols_array_2d([
            column_0.to_array(),
            column_1.to_array(),
            column_2.to_array(),
            column_3.to_array(),
        ])
    }

    /// Creates a matrix from its columns, determining the properties from the
    /// element values.
    pub fn from_cols_array_2d(cols: [[f64; 4]; 4]) -> Self {
        Self::with_properties(cols, MatrixProperties::determine(&cols))
    }

    /// Creates a matrix from 16 elements in column-major order.
    pub fn from_cols_array(elements: &[f64; 16]) -> Self {
        Self::from_cols_array_2d(bytemuck::cast(*elements))
    }

    /// Creates an affine matrix whose upper-left 3x3 block is the given
    /// matrix.
    pub fn from_matrix3(matrix: &Matrix3) -> Self {
        let [c0, c1, c2] = matrix.to_cols_array_2d();
        Self::with_properties(
            [
                [c0[0], c0[1], c0[2], 0.0],
                [c1[0], c1[1], c1[2], 0.0],
                [c2[0], c2[1], c2[2], 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            MatrixProperties::AFFINE,
        )
    }

    /// Embeds the given 2D affine transform in the xy-plane.
    pub fn from_matrix3x2(matrix: &Matrix3x2) -> Self {
        let [[m00, m01], [m10, m11], [m20, m21]] = matrix.to_cols_array_2d();
        Self::with_properties(
            [
                [m00, m01, 0.0, 0.0],
                [m10, m11, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [m20, m21, 0.0, 1.0],
            ],
            MatrixProperties::AFFINE,
        )
    }

    /// Creates a translation matrix.
    pub const fn from_translation(translation: &Vector3) -> Self {
        Self::with_properties(
            [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [translation.x(), translation.y(), translation.z(), 1.0],
            ],
            MatrixProperties::AFFINE.union(MatrixProperties::TRANSLATION),
        )
    }

    /// Creates a matrix scaling each axis by the corresponding component.
    pub const fn scaling(scaling: &Vector3) -> Self {
        Self::with_properties(
            [
                [scaling.x(), 0.0, 0.0, 0.0],
                [0.0, scaling.y(), 0.0, 0.0],
                [0.0, 0.0, scaling.z(), 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            MatrixProperties::AFFINE,
        )
    }

    /// Creates a matrix scaling all axes by the same factor.
    pub const fn uniform_scaling(scaling: f64) -> Self {
        Self::scaling(&Vector3::same(scaling))
    }

    /// Creates the rotation matrix of the given unit quaternion.
    pub fn from_quaternion(rotation: &Quaternion) -> Self {
        Self::from_matrix3(&Matrix3::from_quaternion(rotation))
    }

    /// Creates a rotation by the given angle around the given unit axis.
    pub fn rotation<A: Angle>(axis: &Vector3, angle: A) -> Self {
        Self::from_matrix3(&rotation_matrix3(axis, angle.radians()))
    }

    /// Creates the rotation described by the given axis-angle.
    pub fn from_axis_angle(axis_angle: &AxisAngle) -> Self {
        Self::rotation(axis_angle.axis(), axis_angle.angle())
    }

    /// Creates a rotation around the x-axis.
    pub fn rotation_x<A: Angle>(angle: A) -> Self {
        let (sin, cos) = angle.radians().sin_cos();
        Self::with_properties(
            [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, cos, sin, 0.0],
                [0.0, -sin, cos, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            MatrixProperties::AFFINE,
        )
    }

    /// Creates a rotation around the y-axis.
    pub fn rotation_y<A: Angle>(angle: A) -> Self {
        let (sin, cos) = angle.radians().sin_cos();
        Self::with_properties(
            [
                [cos, 0.0, -sin, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [sin, 0.0, cos, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            MatrixProperties::AFFINE,
        )
    }

    /// Creates a rotation around the z-axis.
    pub fn rotation_z<A: Angle>(angle: A) -> Self {
        let (sin, cos) = angle.radians().sin_cos();
        Self::with_properties(
            [
                [cos, sin, 0.0, 0.0],
                [-sin, cos, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            MatrixProperties::AFFINE,
        )
    }

    /// Creates the rotation `Rx(angle_x) * Ry(angle_y) * Rz(angle_z)`.
    pub fn rotation_xyz<A: Angle>(angle_x: A, angle_y: A, angle_z: A) -> Self {
        Self::rotation_x(angle_x)
            .rotated_y(angle_y)
            .rotated_z(angle_z)
    }

    /// Creates the rotation `Rz(angle_z) * Ry(angle_y) * Rx(angle_x)`.
    pub fn rotation_zyx<A: Angle>(angle_z: A, angle_y: A, angle_x: A) -> Self {
        Self::rotation_z(angle_z)
            .rotated_y(angle_y)
            .rotated_x(angle_x)
    }

    /// Creates the rotation `Ry(angle_y) * Rx(angle_x) * Rz(angle_z)`.
    pub fn rotation_yxz<A: Angle>(angle_y: A, angle_x: A, angle_z: A) -> Self {
        Self::rotation_y(angle_y)
            .rotated_x(angle_x)
            .rotated_z(angle_z)
    }

    /// Creates the matrix `T * R * S` for the given translation, unit
    /// quaternion rotation and per-axis scaling.
    pub fn translation_rotation_scale(
        translation: &Vector3,
        rotation: &Quaternion,
        scaling: &Vector3,
    ) -> Self {
        let r = Matrix3::from_quaternion(rotation).to_cols_array_2d();
        let s = [scaling.x(), scaling.y(), scaling.z()];
        let mut cols = IDENTITY_COLS;
        for col in 0..3 {
            for row in 0..3 {
                cols[col][row] = r[col][row] * s[col];
            }
        }
        cols[3] = [translation.x(), translation.y(), translation.z(), 1.0];
        Self::with_properties(cols, MatrixProperties::AFFINE)
    }

    /// Creates the matrix `T * R` for the given translation and unit
    /// quaternion rotation.
    pub fn translation_rotation(translation: &Vector3, rotation: &Quaternion) -> Self {
        Self::translation_rotation_scale(translation, rotation, &Vector3::same(1.0))
    }

    /// The cached structural properties of the matrix.
    #[inline]
    pub const fn properties(&self) -> MatrixProperties {
        self.properties
    }

    /// Replaces the cached properties with the given ones without checking
    /// them.
    ///
    /// # Safety
    /// Every flag in `properties` must truly describe the current elements.
    /// Operations select specialized algorithms from the flags, so a false
    /// flag makes them return silently wrong results (debug builds assert on
    /// the structure in most fast paths).
    #[inline]
    pub unsafe fn assume_properties(&mut self, properties: MatrixProperties) {
        self.properties = properties;
    }

    /// Recomputes the cached properties from the element values. This can
    /// recover flags that were conservatively dropped.
    pub fn determine_properties(&mut self) {
        self.properties = MatrixProperties::determine(&self.cols);
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.properties.contains(MatrixProperties::IDENTITY)
    }

    #[inline]
    pub fn is_affine(&self) -> bool {
        self.properties.contains(MatrixProperties::AFFINE)
    }

    /// Returns the element in column `col` and row `row`.
    ///
    /// # Panics
    /// If either index is larger than 3.
    #[inline]
    pub const fn element(&self, col: usize, row: usize) -> f64 {
        self.cols[col][row]
    }

    /// Sets the element in column `col` and row `row`, dropping the
    /// properties the new value could invalidate.
    ///
    /// # Panics
    /// If either index is larger than 3.
    pub fn set_element(&mut self, col: usize, row: usize, value: f64) {
        self.properties = self.properties.after_setting_element(col, row, value);
        self.cols[col][row] = value;
    }

    /// Returns the column with the given index.
    ///
    /// # Panics
    /// If `index` is larger than 3.
    #[inline]
    pub fn column(&self, index: usize) -> Vector4 {
        Vector4::from(self.cols[index])
    }

    /// Returns the row with the given index.
    ///
    /// # Panics
    /// If `index` is larger than 3.
    #[inline]
    pub fn row(&self, index: usize) -> Vector4 {
        Vector4::new(
            self.cols[0][index],
            self.cols[1][index],
            self.cols[2][index],
            self.cols[3][index],
        )
    }

    /// Replaces the column with the given index.
    ///
    /// # Panics
    /// If `index` is larger than 3.
    pub fn set_column(&mut self, index: usize, column: &Vector4) {
        for (row, value) in column.to_array().into_iter().enumerate() {
            self.set_element(index, row, value);
        }
    }

    /// Replaces the row with the given index.
    ///
    /// # Panics
    /// If `index` is larger than 3.
    pub fn set_row(&mut self, index: usize, row: &Vector4) {
        for (col, value) in row.to_array().into_iter().enumerate() {
            self.set_element(col, index, value);
        }
    }

    /// The columns as arrays.
    #[inline]
    pub const fn to_cols_array_2d(&self) -> [[f64; 4]; 4] {
        self.cols
    }

    /// The 16 elements in column-major order.
    #[inline]
    pub fn to_cols_array(&self) -> [f64; 16] {
        bytemuck::cast(self.cols)
    }

    /// The upper-left 3x3 block.
    pub fn matrix3(&self) -> Matrix3 {
        let [c0, c1, c2, _] = self.cols;
        Matrix3::from_cols_array_2d([
            [c0[0], c0[1], c0[2]],
            [c1[0], c1[1], c1[2]],
            [c2[0], c2[1], c2[2]],
        ])
    }

    /// Overwrites the upper-left 3x3 block.
    pub fn set_matrix3(&mut self, matrix: &Matrix3) {
        let block = matrix.to_cols_array_2d();
        for (col, block_col) in block.iter().enumerate() {
            self.cols[col][..3].copy_from_slice(block_col);
        }
        self.properties &= MatrixProperties::AFFINE;
    }

    /// The 2D affine transform in the xy-plane: the upper-left 2x2 block and
    /// the x- and y-translation.
    pub fn matrix3x2(&self) -> Matrix3x2 {
        let [c0, c1, _, c3] = self.cols;
        Matrix3x2::from_cols_array_2d([[c0[0], c0[1]], [c1[0], c1[1]], [c3[0], c3[1]]])
    }

    pub fn transposed(&self) -> Self {
        let c = &self.cols;
        let mut cols = [[0.0; 4]; 4];
        for (i, col) in cols.iter_mut().enumerate() {
            *col = [c[0][i], c[1][i], c[2][i], c[3][i]];
        }
        let properties = self.properties & MatrixProperties::IDENTITY;
        Self::with_properties(
            cols,
            if properties.is_empty() {
                properties
            } else {
                MatrixProperties::IDENTITY_MATRIX
            },
        )
    }

    pub fn transpose(&mut self) {
        *self = self.transposed();
    }

    /// Transposes only the upper-left 3x3 block, keeping the fourth row and
    /// column in place.
    pub fn transposed_3x3(&self) -> Self {
        let mut result = *self;
        for col in 0..3 {
            for row in 0..3 {
                result.cols[col][row] = self.cols[row][col];
            }
        }
        result.properties = self.properties & MatrixProperties::IDENTITY_MATRIX;
        result
    }

    /// Applies `f` to every element. The result has no properties.
    pub fn mapped(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        let mut cols = self.cols;
        for value in cols.as_flattened_mut() {
            *value = f(*value);
        }
        Self::with_properties(cols, MatrixProperties::empty())
    }

    #[inline]
    pub(crate) const fn with_properties(
        cols: [[f64; 4]; 4],
        properties: MatrixProperties,
    ) -> Self {
        Self { cols, properties }
    }

    /// Whether the element values provably have all the given properties.
    /// Used for debug assertions in the fast paths.
    pub(crate) fn has_structure(&self, properties: MatrixProperties) -> bool {
        MatrixProperties::determine(&self.cols).contains(properties)
    }
}

/// Builds the rotation by `angle` radians around the unit `axis`.
fn rotation_matrix3(axis: &Vector3, angle: f64) -> Matrix3 {
    let (sin, cos) = angle.sin_cos();
    let c = 1.0 - cos;
    let (x, y, z) = (axis.x(), axis.y(), axis.z());
    let (xy, xz, yz) = (x * y, x * z, y * z);
    Matrix3::new(
        x * x * c + cos,
        xy * c + z * sin,
        xz * c - y * sin,
        xy * c - z * sin,
        y * y * c + cos,
        yz * c + x * sin,
        xz * c + y * sin,
        yz * c - x * sin,
        z * z * c + cos,
    )
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Matrix4 {
    fn eq(&self, other: &Self) -> bool {
        self.cols == other.cols
    }
}

impl fmt::Debug for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix4")
            .field("cols", &self.cols)
            .field("properties", &self.properties)
            .finish()
    }
}

impl From<[[f64; 4]; 4]> for Matrix4 {
    fn from(cols: [[f64; 4]; 4]) -> Self {
        Self::from_cols_array_2d(cols)
    }
}

impl From<Matrix4> for [[f64; 4]; 4] {
    fn from(matrix: Matrix4) -> Self {
        matrix.cols
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Matrix4 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cols.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Matrix4 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <[[f64; 4]; 4]>::deserialize(deserializer).map(Self::from_cols_array_2d)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Matrix4 {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::from_cols_array_2d(u.arbitrary()?))
    }
}

impl_approx_eq_for_components!(Matrix4, |m| m.to_cols_array());

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::angle::Degrees;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    pub(crate) const EPSILON: f64 = 1e-9;

    prop_compose! {
        pub(crate) fn element_strategy()(value in -10.0..10.0_f64) -> f64 {
            value
        }
    }

    prop_compose! {
        pub(crate) fn general_matrix_strategy()(
            elements in prop::array::uniform16(element_strategy())
        ) -> Matrix4 {
            Matrix4::from_cols_array(&elements)
        }
    }

    prop_compose! {
        /// Affine matrices with a well-conditioned linear part.
        pub(crate) fn affine_matrix_strategy()(
            translation in prop::array::uniform3(element_strategy()),
            axis in prop::array::uniform3(0.1..1.0_f64),
            angle in -3.0..3.0_f64,
            scaling in prop::array::uniform3(0.2..5.0_f64),
        ) -> Matrix4 {
            Matrix4::translation_rotation_scale(
                &Vector3::from(translation),
                &Quaternion::from_axis_angle(&Vector3::from(axis).normalized(), crate::Radians(angle)),
                &Vector3::from(scaling),
            )
        }
    }

    prop_compose! {
        /// Rigid transforms (rotation followed by translation).
        pub(crate) fn rigid_matrix_strategy()(
            translation in prop::array::uniform3(element_strategy()),
            axis in prop::array::uniform3(0.1..1.0_f64),
            angle in -3.0..3.0_f64,
        ) -> Matrix4 {
            Matrix4::translation_rotation(
                &Vector3::from(translation),
                &Quaternion::from_axis_angle(&Vector3::from(axis).normalized(), crate::Radians(angle)),
            )
        }
    }

    #[test]
    fn creating_matrix4_identity_gives_identity_matrix() {
        let identity = Matrix4::identity();
        for col in 0..4 {
            for row in 0..4 {
                let expected = if col == row { 1.0 } else { 0.0 };
                assert_eq!(identity.element(col, row), expected);
            }
        }
        assert_eq!(identity.properties(), MatrixProperties::IDENTITY_MATRIX);
    }

    #[test]
    fn creating_matrix4_from_elements_is_column_major() {
        let m = Matrix4::new(
            0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
        );
        assert_eq!(m.element(3, 0), 12.0);
        assert_eq!(m.element(0, 3), 3.0);
        assert_eq!(m.column(1), Vector4::new(4.0, 5.0, 6.0, 7.0));
        assert_eq!(m.row(1), Vector4::new(1.0, 5.0, 9.0, 13.0));
        assert_eq!(
            m.to_cols_array(),
            std::array::from_fn::<f64, 16, _>(|i| i as f64)
        );
    }

    #[test]
    fn bulk_constructors_classify_elements() {
        assert!(Matrix4::from_cols_array_2d(IDENTITY_COLS).is_identity());

        let translation = Matrix4::from_columns(
            &Vector4::unit_x(),
            &Vector4::unit_y(),
            &Vector4::unit_z(),
            &Vector4::new(1.0, 2.0, 3.0, 1.0),
        );
        assert_eq!(
            translation.properties(),
            MatrixProperties::AFFINE | MatrixProperties::TRANSLATION
        );
    }

    #[test]
    fn builders_set_exact_properties() {
        let translation = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(
            translation.properties(),
            MatrixProperties::AFFINE | MatrixProperties::TRANSLATION
        );
        assert_eq!(
            Matrix4::rotation_x(Degrees(30.0)).properties(),
            MatrixProperties::AFFINE
        );
        assert_eq!(
            Matrix4::scaling(&Vector3::new(1.0, 2.0, 3.0)).properties(),
            MatrixProperties::AFFINE
        );
    }

    #[test]
    fn setting_elements_clears_invalidated_properties() {
        let mut m = Matrix4::identity();
        m.set_element(3, 0, 5.0);
        assert_eq!(
            m.properties(),
            MatrixProperties::AFFINE | MatrixProperties::TRANSLATION
        );
        m.set_element(1, 1, 2.0);
        assert_eq!(m.properties(), MatrixProperties::AFFINE);
        m.set_element(0, 3, 0.5);
        assert!(m.properties().is_empty());
    }

    #[test]
    fn determining_properties_recovers_dropped_flags() {
        let mut m = Matrix4::identity();
        m.set_element(3, 3, 1.0);
        assert!(m.properties().is_empty());
        m.determine_properties();
        assert_eq!(m.properties(), MatrixProperties::IDENTITY_MATRIX);
    }

    #[test]
    fn axis_rotations_match_general_axis_rotation() {
        let angle = Degrees(47.0);
        assert_abs_diff_eq!(
            Matrix4::rotation_x(angle),
            Matrix4::rotation(&Vector3::unit_x(), angle),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            Matrix4::rotation_y(angle),
            Matrix4::rotation(&Vector3::unit_y(), angle),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            Matrix4::rotation_z(angle),
            Matrix4::rotation(&Vector3::unit_z(), angle),
            epsilon = EPSILON
        );
    }

    #[test]
    fn quaternion_and_axis_angle_rotations_agree() {
        let axis = Vector3::new(1.0, -2.0, 0.5).normalized();
        let angle = Degrees(110.0);
        let from_axis_angle = Matrix4::from_axis_angle(&AxisAngle::new(&axis, angle));
        let from_quaternion = Matrix4::from_quaternion(&Quaternion::from_axis_angle(&axis, angle));
        assert_abs_diff_eq!(from_axis_angle, from_quaternion, epsilon = EPSILON);
    }

    #[test]
    fn euler_rotation_builders_compose_axis_rotations_in_order() {
        let (x, y, z) = (Degrees(10.0), Degrees(20.0), Degrees(30.0));
        let rx = Matrix4::rotation_x(x);
        let ry = Matrix4::rotation_y(y);
        let rz = Matrix4::rotation_z(z);
        assert_abs_diff_eq!(Matrix4::rotation_xyz(x, y, z), rx * ry * rz, epsilon = EPSILON);
        assert_abs_diff_eq!(Matrix4::rotation_zyx(z, y, x), rz * ry * rx, epsilon = EPSILON);
        assert_abs_diff_eq!(Matrix4::rotation_yxz(y, x, z), ry * rx * rz, epsilon = EPSILON);
    }

    #[test]
    fn translation_rotation_scale_equals_product_of_factors() {
        let t = Vector3::new(1.0, -2.0, 3.0);
        let q = Quaternion::from_axis_angle(&Vector3::unit_y(), Degrees(60.0));
        let s = Vector3::new(2.0, 3.0, 4.0);
        let expected =
            Matrix4::from_translation(&t) * Matrix4::from_quaternion(&q) * Matrix4::scaling(&s);
        assert_abs_diff_eq!(
            Matrix4::translation_rotation_scale(&t, &q, &s),
            expected,
            epsilon = EPSILON
        );
    }

    #[test]
    fn transposing_matrix4_is_involutive() {
        let m = Matrix4::new(
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
        );
        let t = m.transposed();
        assert_eq!(t.element(0, 1), m.element(1, 0));
        assert_eq!(t.transposed(), m);
        assert!(t.properties().is_empty());
    }

    #[test]
    fn transposing_3x3_block_keeps_translation() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0)) * Matrix4::rotation_z(Degrees(30.0));
        let t = m.transposed_3x3();
        assert_eq!(t.column(3), m.column(3));
        assert_abs_diff_eq!(
            t.matrix3(),
            m.matrix3().transposed(),
            epsilon = EPSILON
        );
        assert!(t.is_affine());
    }

    #[test]
    fn matrix3_and_matrix3x2_submatrices_round_trip() {
        let m3 = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let mut m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0));
        m.set_matrix3(&m3);
        assert_eq!(m.matrix3(), m3);
        assert_eq!(m.properties(), MatrixProperties::AFFINE);

        let m3x2 = Matrix3x2::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(Matrix4::from_matrix3x2(&m3x2).matrix3x2(), m3x2);
    }

    #[test]
    fn equality_ignores_cached_properties() {
        let mut a = Matrix4::identity();
        a.set_element(0, 0, 1.0);
        assert_eq!(a, Matrix4::identity());
        assert_ne!(a.properties(), Matrix4::identity().properties());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializing_matrix4_reclassifies_columns() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0));
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[1.0,0.0,0.0,0.0],[0.0,1.0,0.0,0.0],[0.0,0.0,1.0,0.0],[1.0,2.0,3.0,1.0]]");
        let deserialized: Matrix4 = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, m);
        assert_eq!(deserialized.properties(), m.properties());
    }
}
