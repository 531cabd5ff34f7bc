//! 2D affine matrices.

use crate::{angle::Angle, vector::Vector2};
use std::fmt;

/// A 3x2 matrix representing a 2D affine transform, stored as three columns
/// of two elements. The third column holds the translation; the implied last
/// row is `(0, 0, 1)`.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, PartialEq)]
pub struct Matrix3x2 {
    inner: glam::DAffine2,
}

impl Matrix3x2 {
    /// Creates the identity transform.
    #[inline]
    pub const fn identity() -> Self {
        Self::wrap(glam::DAffine2::IDENTITY)
    }

    /// Creates a matrix from the given elements, listed column by column.
    #[inline]
    pub const fn new(m00: f64, m01: f64, m10: f64, m11: f64, m20: f64, m21: f64) -> Self {
        Self::from_cols_array_2d([[m00, m01], [m10, m11], [m20, m21]])
    }

    #[inline]
    pub const fn from_cols_array_2d(cols: [[f64; 2]; 3]) -> Self {
        Self::wrap(glam::DAffine2::from_cols(
            glam::DVec2::new(cols[0][0], cols[0][1]),
            glam::DVec2::new(cols[1][0], cols[1][1]),
            glam::DVec2::new(cols[2][0], cols[2][1]),
        ))
    }

    #[inline]
    pub const fn translation(translation: &Vector2) -> Self {
        Self::wrap(glam::DAffine2::from_cols(
            glam::DVec2::X,
            glam::DVec2::Y,
            translation.unwrap(),
        ))
    }

    /// Creates a counter-clockwise rotation by the given angle.
    #[inline]
    pub fn rotation<A: Angle>(angle: A) -> Self {
        Self::wrap(glam::DAffine2::from_angle(angle.radians()))
    }

    #[inline]
    pub const fn scaling(scaling: &Vector2) -> Self {
        Self::new(scaling.x(), 0.0, 0.0, scaling.y(), 0.0, 0.0)
    }

    /// Returns the element in column `col` and row `row`.
    ///
    /// # Panics
    /// If `col > 2` or `row > 1`.
    #[inline]
    pub fn element(&self, col: usize, row: usize) -> f64 {
        self.to_cols_array_2d()[col][row]
    }

    #[inline]
    pub fn to_cols_array_2d(&self) -> [[f64; 2]; 3] {
        self.inner.to_cols_array_2d()
    }

    /// The six elements in column-major order.
    #[inline]
    pub fn to_cols_array(&self) -> [f64; 6] {
        self.inner.to_cols_array()
    }

    #[inline]
    pub const fn translation_part(&self) -> Vector2 {
        Vector2::wrap(self.inner.translation)
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.inner.matrix2.determinant()
    }

    /// Computes the inverse transform. A singular linear part gives
    /// non-finite elements.
    #[inline]
    pub fn inverted(&self) -> Self {
        Self::wrap(self.inner.inverse())
    }

    /// Computes `left * self`, so that `self` acts first.
    pub fn mul_local(&self, left: &Self) -> Self {
        left * self
    }

    #[inline]
    pub fn transform_point(&self, point: &Vector2) -> Vector2 {
        Vector2::wrap(self.inner.transform_point2(point.unwrap()))
    }

    #[inline]
    pub fn transform_vector(&self, vector: &Vector2) -> Vector2 {
        Vector2::wrap(self.inner.transform_vector2(vector.unwrap()))
    }

    #[inline]
    const fn wrap(inner: glam::DAffine2) -> Self {
        Self { inner }
    }
}

impl Default for Matrix3x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Matrix3x2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix3x2")
            .field("cols", &self.to_cols_array_2d())
            .finish()
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Matrix3x2 {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::from_cols_array_2d(u.arbitrary()?))
    }
}

impl_binop!(Mul, mul, Matrix3x2, Matrix3x2, Matrix3x2, |a, b| {
    Matrix3x2::wrap(a.inner * b.inner)
});

impl_approx_eq_for_components!(Matrix3x2, |m| m.to_cols_array());
