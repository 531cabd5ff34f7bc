//! 3x3 matrices.

use crate::{quaternion::Quaternion, vector::Vector3};
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// A 3x3 matrix stored in column-major order.
///
/// Used for the linear (rotation/scale) part of a
/// [`Matrix4`](crate::Matrix4) and for normal matrices.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, PartialEq, Zeroable, Pod)]
pub struct Matrix3 {
    inner: glam::DMat3,
}

impl Matrix3 {
    /// Creates the identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::wrap(glam::DMat3::IDENTITY)
    }

    /// Creates a matrix with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::wrap(glam::DMat3::ZERO)
    }

    /// Creates a matrix from the given elements, listed column by column.
    #[inline]
    pub const fn new(
        m00: f64,
        m01: f64,
        m02: f64,
        m10: f64,
        m11: f64,
        m12: f64,
        m20: f64,
        m21: f64,
        m22: f64,
    ) -> Self {
        Self::from_cols_array_2d([[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]])
    }

    /// Creates a matrix with the given columns.
    #[inline]
    pub const fn from_columns(column_0: Vector3, column_1: Vector3, column_2: Vector3) -> Self {
        Self::wrap(glam::DMat3::from_cols(
            column_0.unwrap(),
            column_1.unwrap(),
            column_2.unwrap(),
        ))
    }

    #[inline]
    pub const fn from_cols_array_2d(cols: [[f64; 3]; 3]) -> Self {
        Self::wrap(glam::DMat3::from_cols_array_2d(&cols))
    }

    /// Creates a diagonal matrix with the given vector as the diagonal.
    #[inline]
    pub const fn from_diagonal(diagonal: &Vector3) -> Self {
        Self::wrap(glam::DMat3::from_diagonal(diagonal.unwrap()))
    }

    /// Creates the rotation matrix of the given unit quaternion.
    #[inline]
    pub fn from_quaternion(rotation: &Quaternion) -> Self {
        Self::wrap(glam::DMat3::from_quat(rotation.unwrap()))
    }

    /// Returns the column with the given index.
    ///
    /// # Panics
    /// If `index` is larger than 2.
    #[inline]
    pub fn column(&self, index: usize) -> Vector3 {
        Vector3::wrap(self.inner.col(index))
    }

    /// Returns the element in column `col` and row `row`.
    ///
    /// # Panics
    /// If either index is larger than 2.
    #[inline]
    pub fn element(&self, col: usize, row: usize) -> f64 {
        self.inner.col(col)[row]
    }

    #[inline]
    pub fn element_mut(&mut self, col: usize, row: usize) -> &mut f64 {
        &mut self.inner.col_mut(col)[row]
    }

    /// The elements as column arrays.
    #[inline]
    pub fn to_cols_array_2d(&self) -> [[f64; 3]; 3] {
        self.inner.to_cols_array_2d()
    }

    /// The elements in column-major order.
    #[inline]
    pub fn to_cols_array(&self) -> [f64; 9] {
        self.inner.to_cols_array()
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.inner.determinant()
    }

    /// Computes the inverse through the cofactor matrix. A singular matrix
    /// gives non-finite elements.
    #[inline]
    pub fn inverted(&self) -> Self {
        Self::wrap(self.inner.inverse())
    }

    #[inline]
    pub fn transposed(&self) -> Self {
        Self::wrap(self.inner.transpose())
    }

    #[inline]
    pub(crate) const fn wrap(inner: glam::DMat3) -> Self {
        Self { inner }
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix3")
            .field("cols", &self.inner.to_cols_array_2d())
            .finish()
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Matrix3 {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::from_cols_array_2d(u.arbitrary()?))
    }
}

impl_binop!(Mul, mul, Matrix3, Matrix3, Matrix3, |a, b| {
    Matrix3::wrap(a.inner * b.inner)
});

impl_binop!(Mul, mul, Matrix3, Vector3, Vector3, |a, b| {
    Vector3::wrap(a.inner * b.unwrap())
});

impl_abs_diff_eq!(Matrix3, |a, b, epsilon| {
    a.inner.abs_diff_eq(b.inner, epsilon)
});

impl_relative_eq!(Matrix3, |a, b, epsilon, max_relative| {
    ::approx::RelativeEq::relative_eq(&a.inner, &b.inner, epsilon, max_relative)
});
