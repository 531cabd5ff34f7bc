//! Matrix products and the translate, rotate and scale operations.

use super::{Matrix4, MatrixProperties};
use crate::{angle::Angle, matrix3::Matrix3, quaternion::Quaternion, vector::Vector3};

impl Matrix4 {
    /// Computes `self * rhs`, so that `rhs` is applied first, picking the
    /// cheapest algorithm the cached properties of the operands allow. This
    /// is what the `*` operator does.
    pub fn product(&self, rhs: &Self) -> Self {
        let (a, b) = (self.properties, rhs.properties);
        if a.contains(MatrixProperties::IDENTITY) {
            *rhs
        } else if b.contains(MatrixProperties::IDENTITY) {
            *self
        } else if a.contains(MatrixProperties::TRANSLATION) && b.contains(MatrixProperties::AFFINE)
        {
            self.mul_translation_affine(rhs)
        } else if a.contains(MatrixProperties::AFFINE) && b.contains(MatrixProperties::AFFINE) {
            self.mul_affine(rhs)
        } else if a.contains(MatrixProperties::PERSPECTIVE)
            && b.contains(MatrixProperties::AFFINE)
        {
            self.mul_perspective_affine(rhs)
        } else if b.contains(MatrixProperties::AFFINE) {
            self.mul_affine_r(rhs)
        } else {
            self.mul_general(rhs)
        }
    }

    /// Computes `left * self`, so that `self` is applied first.
    pub fn mul_local(&self, left: &Self) -> Self {
        left.product(self)
    }

    /// Computes the full 4x4 product without looking at the properties. The
    /// result has no properties.
    pub fn mul_general(&self, rhs: &Self) -> Self {
        let a = &self.cols;
        let mut cols = [[0.0; 4]; 4];
        for (col, b) in cols.iter_mut().zip(rhs.cols.iter()) {
            for (row, value) in col.iter_mut().enumerate() {
                *value = a[0][row] * b[0] + a[1][row] * b[1] + a[2][row] * b[2] + a[3][row] * b[3];
            }
        }
        Self::with_properties(cols, MatrixProperties::empty())
    }

    /// Computes `self * rhs` assuming that `rhs` is affine. The last row of
    /// `self` is still respected.
    pub fn mul_affine_r(&self, rhs: &Self) -> Self {
        debug_assert!(rhs.has_structure(MatrixProperties::AFFINE));
        let a = &self.cols;
        let mut cols = [[0.0; 4]; 4];
        for (col, b) in cols.iter_mut().zip(rhs.cols.iter()) {
            for (row, value) in col.iter_mut().enumerate() {
                *value = a[0][row] * b[0] + a[1][row] * b[1] + a[2][row] * b[2];
            }
        }
        for (row, value) in cols[3].iter_mut().enumerate() {
            *value += a[3][row];
        }
        let properties = if self.properties.contains(MatrixProperties::AFFINE) {
            MatrixProperties::AFFINE
        } else {
            MatrixProperties::empty()
        };
        Self::with_properties(cols, properties)
    }

    /// Computes `self * rhs` assuming that both matrices are affine.
    pub fn mul_affine(&self, rhs: &Self) -> Self {
        debug_assert!(self.has_structure(MatrixProperties::AFFINE));
        debug_assert!(rhs.has_structure(MatrixProperties::AFFINE));
        let a = &self.cols;
        let mut cols = [[0.0; 4]; 4];
        for (col, b) in cols.iter_mut().zip(rhs.cols.iter()) {
            for (row, value) in col.iter_mut().take(3).enumerate() {
                *value = a[0][row] * b[0] + a[1][row] * b[1] + a[2][row] * b[2];
            }
        }
        for row in 0..3 {
            cols[3][row] += a[3][row];
        }
        cols[3][3] = 1.0;
        Self::with_properties(
            cols,
            MatrixProperties::AFFINE
                | (self.properties & rhs.properties & MatrixProperties::TRANSLATION),
        )
    }

    /// Computes `self * rhs` assuming that `self` is a pure translation and
    /// `rhs` is affine.
    pub fn mul_translation_affine(&self, rhs: &Self) -> Self {
        debug_assert!(self.has_structure(MatrixProperties::TRANSLATION));
        debug_assert!(rhs.has_structure(MatrixProperties::AFFINE));
        let mut cols = rhs.cols;
        for row in 0..3 {
            cols[3][row] += self.cols[3][row];
        }
        cols[3][3] = 1.0;
        Self::with_properties(
            cols,
            MatrixProperties::AFFINE | (rhs.properties & MatrixProperties::TRANSLATION),
        )
    }

    /// Computes `self * rhs` assuming that `self` has the symmetric
    /// perspective pattern and `rhs` is affine. The result has no
    /// properties.
    pub fn mul_perspective_affine(&self, rhs: &Self) -> Self {
        debug_assert!(self.has_structure(MatrixProperties::PERSPECTIVE));
        debug_assert!(rhs.has_structure(MatrixProperties::AFFINE));
        let a = &self.cols;
        let (m00, m11, m22, m23, m32) = (a[0][0], a[1][1], a[2][2], a[2][3], a[3][2]);
        let mut cols = [[0.0; 4]; 4];
        for (col, b) in cols.iter_mut().zip(rhs.cols.iter()) {
            *col = [m00 * b[0], m11 * b[1], m22 * b[2], m23 * b[2]];
        }
        cols[3][2] += m32;
        Self::with_properties(cols, MatrixProperties::empty())
    }

    /// Computes `self * rhs` assuming that `self` is an orthographic
    /// projection (an affine matrix with a diagonal 3x3 block) and `rhs` is
    /// affine.
    pub fn mul_ortho_affine(&self, rhs: &Self) -> Self {
        debug_assert!(self.has_structure(MatrixProperties::AFFINE));
        debug_assert!(rhs.has_structure(MatrixProperties::AFFINE));
        debug_assert!(
            (0..3).all(|col| (0..3).all(|row| col == row || self.cols[col][row] == 0.0))
        );
        let a = &self.cols;
        let diagonal = [a[0][0], a[1][1], a[2][2]];
        let mut cols = [[0.0; 4]; 4];
        for (col, b) in cols.iter_mut().zip(rhs.cols.iter()) {
            for row in 0..3 {
                col[row] = diagonal[row] * b[row];
            }
        }
        for row in 0..3 {
            cols[3][row] += a[3][row];
        }
        cols[3][3] = 1.0;
        Self::with_properties(cols, MatrixProperties::AFFINE)
    }

    /// Multiplies the elements of the two matrices pairwise.
    pub fn mul_component_wise(&self, other: &Self) -> Self {
        self.zip_with(other, 4, |a, b| a * b)
    }

    /// Adds the upper 4x3 part (the first three rows) of `other`, keeping
    /// the last row of `self`.
    pub fn add_4x3(&self, other: &Self) -> Self {
        self.zip_with(other, 3, |a, b| a + b)
    }

    /// Subtracts the upper 4x3 part of `other`, keeping the last row of
    /// `self`.
    pub fn sub_4x3(&self, other: &Self) -> Self {
        self.zip_with(other, 3, |a, b| a - b)
    }

    /// Multiplies the upper 4x3 parts pairwise, keeping the last row of
    /// `self`.
    pub fn mul_component_wise_4x3(&self, other: &Self) -> Self {
        self.zip_with(other, 3, |a, b| a * b)
    }

    /// Computes `self + other * factor` on the upper 4x3 part, keeping the
    /// last row of `self`.
    pub fn fma_4x3(&self, other: &Self, factor: f64) -> Self {
        self.zip_with(other, 3, |a, b| b.mul_add(factor, a))
    }

    /// Interpolates linearly between the elements of `self` (at `t = 0`) and
    /// `other` (at `t = 1`).
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        self.zip_with(other, 4, |a, b| (b - a).mul_add(t, a))
    }

    /// Computes `self * T(translation)`, so that the translation is applied
    /// before `self`.
    pub fn translated(&self, translation: &Vector3) -> Self {
        let (x, y, z) = (translation.x(), translation.y(), translation.z());
        let mut result = *self;
        let c = &self.cols;
        for row in 0..self.computed_rows() {
            result.cols[3][row] = c[0][row] * x + c[1][row] * y + c[2][row] * z + c[3][row];
        }
        result.properties -= MatrixProperties::PERSPECTIVE | MatrixProperties::IDENTITY;
        result
    }

    pub fn translate(&mut self, translation: &Vector3) {
        *self = self.translated(translation);
    }

    /// Computes `T(translation) * self`, so that the translation is applied
    /// after `self`.
    pub fn translated_local(&self, translation: &Vector3) -> Self {
        let offset = [translation.x(), translation.y(), translation.z()];
        let mut result = *self;
        // Affine columns other than the last have w = 0
        let first_col = if self.properties.contains(MatrixProperties::AFFINE) {
            3
        } else {
            0
        };
        for col in &mut result.cols[first_col..] {
            let w = col[3];
            for (value, offset) in col.iter_mut().zip(offset) {
                *value += offset * w;
            }
        }
        result.properties -= MatrixProperties::PERSPECTIVE | MatrixProperties::IDENTITY;
        result
    }

    pub fn translate_local(&mut self, translation: &Vector3) {
        *self = self.translated_local(translation);
    }

    /// Computes `self * R`, where `R` rotates by `angle` around the unit
    /// `axis`.
    pub fn rotated<A: Angle>(&self, axis: &Vector3, angle: A) -> Self {
        self.rotated_by(&super::rotation_matrix3(axis, angle.radians()))
    }

    pub fn rotate<A: Angle>(&mut self, axis: &Vector3, angle: A) {
        *self = self.rotated(axis, angle);
    }

    /// Computes `self * R`, where `R` is the rotation of the given unit
    /// quaternion.
    pub fn rotated_quaternion(&self, rotation: &Quaternion) -> Self {
        self.rotated_by(&Matrix3::from_quaternion(rotation))
    }

    pub fn rotate_quaternion(&mut self, rotation: &Quaternion) {
        *self = self.rotated_quaternion(rotation);
    }

    /// Computes `R * self`, where `R` rotates by `angle` around the unit
    /// `axis`.
    pub fn rotated_local<A: Angle>(&self, axis: &Vector3, angle: A) -> Self {
        self.rotated_local_by(&super::rotation_matrix3(axis, angle.radians()))
    }

    pub fn rotate_local<A: Angle>(&mut self, axis: &Vector3, angle: A) {
        *self = self.rotated_local(axis, angle);
    }

    /// Computes `R * self`, where `R` is the rotation of the given unit
    /// quaternion.
    pub fn rotated_local_quaternion(&self, rotation: &Quaternion) -> Self {
        self.rotated_local_by(&Matrix3::from_quaternion(rotation))
    }

    pub fn rotate_local_quaternion(&mut self, rotation: &Quaternion) {
        *self = self.rotated_local_quaternion(rotation);
    }

    /// Computes `self * Rx(angle)`.
    pub fn rotated_x<A: Angle>(&self, angle: A) -> Self {
        let (sin, cos) = angle.radians().sin_cos();
        let mut result = *self;
        let c = &self.cols;
        for row in 0..self.computed_rows() {
            result.cols[1][row] = c[1][row] * cos + c[2][row] * sin;
            result.cols[2][row] = c[2][row] * cos - c[1][row] * sin;
        }
        result.properties &= MatrixProperties::AFFINE;
        result
    }

    /// Computes `self * Ry(angle)`.
    pub fn rotated_y<A: Angle>(&self, angle: A) -> Self {
        let (sin, cos) = angle.radians().sin_cos();
        let mut result = *self;
        let c = &self.cols;
        for row in 0..self.computed_rows() {
            result.cols[0][row] = c[0][row] * cos - c[2][row] * sin;
            result.cols[2][row] = c[0][row] * sin + c[2][row] * cos;
        }
        result.properties &= MatrixProperties::AFFINE;
        result
    }

    /// Computes `self * Rz(angle)`.
    pub fn rotated_z<A: Angle>(&self, angle: A) -> Self {
        let (sin, cos) = angle.radians().sin_cos();
        let mut result = *self;
        let c = &self.cols;
        for row in 0..self.computed_rows() {
            result.cols[0][row] = c[0][row] * cos + c[1][row] * sin;
            result.cols[1][row] = c[1][row] * cos - c[0][row] * sin;
        }
        result.properties &= MatrixProperties::AFFINE;
        result
    }

    pub fn rotate_x<A: Angle>(&mut self, angle: A) {
        *self = self.rotated_x(angle);
    }

    pub fn rotate_y<A: Angle>(&mut self, angle: A) {
        *self = self.rotated_y(angle);
    }

    pub fn rotate_z<A: Angle>(&mut self, angle: A) {
        *self = self.rotated_z(angle);
    }

    /// Computes `Rx(angle) * self`.
    pub fn rotated_local_x<A: Angle>(&self, angle: A) -> Self {
        let (sin, cos) = angle.radians().sin_cos();
        let mut result = *self;
        for col in &mut result.cols {
            let (y, z) = (col[1], col[2]);
            col[1] = cos * y - sin * z;
            col[2] = sin * y + cos * z;
        }
        result.properties &= MatrixProperties::AFFINE;
        result
    }

    /// Computes `Ry(angle) * self`.
    pub fn rotated_local_y<A: Angle>(&self, angle: A) -> Self {
        let (sin, cos) = angle.radians().sin_cos();
        let mut result = *self;
        for col in &mut result.cols {
            let (x, z) = (col[0], col[2]);
            col[0] = cos * x + sin * z;
            col[2] = cos * z - sin * x;
        }
        result.properties &= MatrixProperties::AFFINE;
        result
    }

    /// Computes `Rz(angle) * self`.
    pub fn rotated_local_z<A: Angle>(&self, angle: A) -> Self {
        let (sin, cos) = angle.radians().sin_cos();
        let mut result = *self;
        for col in &mut result.cols {
            let (x, y) = (col[0], col[1]);
            col[0] = cos * x - sin * y;
            col[1] = sin * x + cos * y;
        }
        result.properties &= MatrixProperties::AFFINE;
        result
    }

    pub fn rotate_local_x<A: Angle>(&mut self, angle: A) {
        *self = self.rotated_local_x(angle);
    }

    pub fn rotate_local_y<A: Angle>(&mut self, angle: A) {
        *self = self.rotated_local_y(angle);
    }

    pub fn rotate_local_z<A: Angle>(&mut self, angle: A) {
        *self = self.rotated_local_z(angle);
    }

    /// Computes `self * Rx(angle_x) * Ry(angle_y) * Rz(angle_z)`.
    pub fn rotated_xyz<A: Angle>(&self, angle_x: A, angle_y: A, angle_z: A) -> Self {
        self.rotated_x(angle_x).rotated_y(angle_y).rotated_z(angle_z)
    }

    /// Computes `self * Rz(angle_z) * Ry(angle_y) * Rx(angle_x)`.
    pub fn rotated_zyx<A: Angle>(&self, angle_z: A, angle_y: A, angle_x: A) -> Self {
        self.rotated_z(angle_z).rotated_y(angle_y).rotated_x(angle_x)
    }

    /// Computes `self * Ry(angle_y) * Rx(angle_x) * Rz(angle_z)`.
    pub fn rotated_yxz<A: Angle>(&self, angle_y: A, angle_x: A, angle_z: A) -> Self {
        self.rotated_y(angle_y).rotated_x(angle_x).rotated_z(angle_z)
    }

    pub fn rotate_xyz<A: Angle>(&mut self, angle_x: A, angle_y: A, angle_z: A) {
        *self = self.rotated_xyz(angle_x, angle_y, angle_z);
    }

    pub fn rotate_zyx<A: Angle>(&mut self, angle_z: A, angle_y: A, angle_x: A) {
        *self = self.rotated_zyx(angle_z, angle_y, angle_x);
    }

    pub fn rotate_yxz<A: Angle>(&mut self, angle_y: A, angle_x: A, angle_z: A) {
        *self = self.rotated_yxz(angle_y, angle_x, angle_z);
    }

    /// Computes `self * S(scaling)`, scaling the first three columns.
    pub fn scaled(&self, scaling: &Vector3) -> Self {
        let factors = [scaling.x(), scaling.y(), scaling.z()];
        let rows = self.computed_rows();
        let mut result = *self;
        for (col, factor) in result.cols.iter_mut().zip(factors) {
            for value in &mut col[..rows] {
                *value *= factor;
            }
        }
        result.properties &= MatrixProperties::AFFINE;
        result
    }

    pub fn scale(&mut self, scaling: &Vector3) {
        *self = self.scaled(scaling);
    }

    /// Computes `S(scaling) * self`, scaling the first three rows.
    pub fn scaled_local(&self, scaling: &Vector3) -> Self {
        let factors = [scaling.x(), scaling.y(), scaling.z()];
        let mut result = *self;
        for col in &mut result.cols {
            for (value, factor) in col.iter_mut().zip(factors) {
                *value *= factor;
            }
        }
        result.properties &= MatrixProperties::AFFINE;
        result
    }

    pub fn scale_local(&mut self, scaling: &Vector3) {
        *self = self.scaled_local(scaling);
    }

    /// Computes `self * T(origin) * S(scaling) * T(-origin)`, scaling around
    /// the given point instead of the origin.
    pub fn scaled_around(&self, scaling: &Vector3, origin: &Vector3) -> Self {
        self.translated(origin)
            .scaled(scaling)
            .translated(&-origin)
    }

    pub fn scale_around(&mut self, scaling: &Vector3, origin: &Vector3) {
        *self = self.scaled_around(scaling, origin);
    }

    /// Computes `self * R` for a 3x3 linear map `R`. The last row stays
    /// `(0, 0, 0, 1)` for affine `self`.
    fn rotated_by(&self, rotation: &Matrix3) -> Self {
        let r = rotation.to_cols_array_2d();
        let c = &self.cols;
        let rows = self.computed_rows();
        let mut result = *self;
        for (col, r_col) in result.cols.iter_mut().zip(r).take(3) {
            for (row, value) in col[..rows].iter_mut().enumerate() {
                *value = c[0][row] * r_col[0] + c[1][row] * r_col[1] + c[2][row] * r_col[2];
            }
        }
        result.properties &= MatrixProperties::AFFINE;
        result
    }

    /// Computes `R * self` for a 3x3 linear map `R`, leaving the last row
    /// untouched.
    fn rotated_local_by(&self, rotation: &Matrix3) -> Self {
        let mut result = *self;
        for col in &mut result.cols {
            let rotated = rotation * Vector3::new(col[0], col[1], col[2]);
            col[..3].copy_from_slice(&<[f64; 3]>::from(rotated));
        }
        result.properties &= MatrixProperties::AFFINE;
        result
    }

    /// The number of leading rows that right-multiplication can change. The
    /// last row of an affine matrix stays `(0, 0, 0, 1)`.
    fn computed_rows(&self) -> usize {
        if self.properties.contains(MatrixProperties::AFFINE) {
            3
        } else {
            4
        }
    }

    /// Combines the first `rows` rows of both matrices element by element
    /// with `f`, keeping the remaining rows of `self`. Only a kept last row
    /// preserves the affine property.
    fn zip_with(&self, other: &Self, rows: usize, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut cols = self.cols;
        for (col, other_col) in cols.iter_mut().zip(other.cols.iter()) {
            for (value, &other_value) in col.iter_mut().zip(other_col).take(rows) {
                *value = f(*value, other_value);
            }
        }
        let properties = if rows < 4 {
            self.properties & MatrixProperties::AFFINE
        } else {
            MatrixProperties::empty()
        };
        Self::with_properties(cols, properties)
    }
}

impl_binop!(Mul, mul, Matrix4, Matrix4, Matrix4, |a, b| { a.product(b) });

impl_binop_assign!(MulAssign, mul_assign, Matrix4, Matrix4, |a, b| {
    *a = a.product(b);
});

impl_binop!(Add, add, Matrix4, Matrix4, Matrix4, |a, b| {
    a.zip_with(b, 4, |x, y| x + y)
});

impl_binop!(Sub, sub, Matrix4, Matrix4, Matrix4, |a, b| {
    a.zip_with(b, 4, |x, y| x - y)
});

impl_binop!(Mul, mul, Matrix4, f64, Matrix4, |a, b| { a.mapped(|x| x * b) });

impl_binop!(Mul, mul, f64, Matrix4, Matrix4, |a, b| { b.mapped(|x| a * x) });

impl_binop_assign!(AddAssign, add_assign, Matrix4, Matrix4, |a, b| {
    *a = &*a + b;
});

impl_binop_assign!(SubAssign, sub_assign, Matrix4, Matrix4, |a, b| {
    *a = &*a - b;
});

impl_unary_op!(Neg, neg, Matrix4, Matrix4, |val| { val.mapped(|x| -x) });
