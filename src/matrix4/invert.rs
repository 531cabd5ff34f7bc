//! Determinants and inverses.

use super::{Matrix4, MatrixProperties};

/// The 2x2 sub-determinants shared by the determinant and the adjugate.
struct Minors {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
    g: f64,
    h: f64,
    i: f64,
    j: f64,
    k: f64,
    l: f64,
}

impl Minors {
    fn of(cols: &[[f64; 4]; 4]) -> Self {
        let [
            [m00, m01, m02, m03],
            [m10, m11, m12, m13],
            [m20, m21, m22, m23],
            [m30, m31, m32, m33],
        ] = *cols;
        Self {
            a: m00 * m11 - m01 * m10,
            b: m00 * m12 - m02 * m10,
            c: m00 * m13 - m03 * m10,
            d: m01 * m12 - m02 * m11,
            e: m01 * m13 - m03 * m11,
            f: m02 * m13 - m03 * m12,
            g: m20 * m31 - m21 * m30,
            h: m20 * m32 - m22 * m30,
            i: m20 * m33 - m23 * m30,
            j: m21 * m32 - m22 * m31,
            k: m21 * m33 - m23 * m31,
            l: m22 * m33 - m23 * m32,
        }
    }

    fn determinant(&self) -> f64 {
        self.a * self.l - self.b * self.k + self.c * self.j + self.d * self.i - self.e * self.h
            + self.f * self.g
    }
}

impl Matrix4 {
    /// Computes the determinant of the full matrix.
    pub fn determinant(&self) -> f64 {
        Minors::of(&self.cols).determinant()
    }

    /// Computes the determinant of the upper-left 3x3 block.
    pub fn determinant_3x3(&self) -> f64 {
        self.matrix3().determinant()
    }

    /// Computes the determinant of an affine matrix, which equals that of its
    /// 3x3 block.
    pub fn determinant_affine(&self) -> f64 {
        debug_assert!(self.has_structure(MatrixProperties::AFFINE));
        self.determinant_3x3()
    }

    /// Computes the inverse with the cheapest algorithm the cached
    /// properties allow.
    pub fn inverse(&self) -> Self {
        let properties = self.properties;
        if properties.contains(MatrixProperties::IDENTITY) {
            Self::identity()
        } else if properties.contains(MatrixProperties::TRANSLATION) {
            Self::from_translation(&-self.translation())
        } else if properties.contains(MatrixProperties::AFFINE) {
            self.inverse_affine()
        } else if properties.contains(MatrixProperties::PERSPECTIVE) {
            self.inverse_perspective()
        } else {
            self.inverse_general()
        }
    }

    pub fn invert(&mut self) {
        *self = self.inverse();
    }

    /// Computes the inverse as the adjugate divided by the determinant. A
    /// singular matrix gives non-finite elements.
    pub fn inverse_general(&self) -> Self {
        let [
            [m00, m01, m02, m03],
            [m10, m11, m12, m13],
            [m20, m21, m22, m23],
            [m30, m31, m32, m33],
        ] = self.cols;
        let Minors {
            a,
            b,
            c,
            d,
            e,
            f,
            g,
            h,
            i,
            j,
            k,
            l,
        } = Minors::of(&self.cols);
        let s = (a * l - b * k + c * j + d * i - e * h + f * g).recip();

        Self::with_properties(
            [
                [
                    (m11 * l - m12 * k + m13 * j) * s,
                    (-m01 * l + m02 * k - m03 * j) * s,
                    (m31 * f - m32 * e + m33 * d) * s,
                    (-m21 * f + m22 * e - m23 * d) * s,
                ],
                [
                    (-m10 * l + m12 * i - m13 * h) * s,
                    (m00 * l - m02 * i + m03 * h) * s,
                    (-m30 * f + m32 * c - m33 * b) * s,
                    (m20 * f - m22 * c + m23 * b) * s,
                ],
                [
                    (m10 * k - m11 * i + m13 * g) * s,
                    (-m00 * k + m01 * i - m03 * g) * s,
                    (m30 * e - m31 * c + m33 * a) * s,
                    (-m20 * e + m21 * c - m23 * a) * s,
                ],
                [
                    (-m10 * j + m11 * h - m12 * g) * s,
                    (m00 * j - m01 * h + m02 * g) * s,
                    (-m30 * d + m31 * b - m32 * a) * s,
                    (m20 * d - m21 * b + m22 * a) * s,
                ],
            ],
            MatrixProperties::empty(),
        )
    }

    /// Computes the inverse of an affine matrix by inverting the 3x3 block
    /// and mapping the translation through it.
    pub fn inverse_affine(&self) -> Self {
        debug_assert!(self.has_structure(MatrixProperties::AFFINE));
        let linear_inverse = self.matrix3().inverted();
        let translation = -(linear_inverse * self.translation());
        Self::from_matrix3(&linear_inverse).with_translation(&translation)
    }

    /// Computes the inverse of an affine matrix whose 3x3 block is
    /// orthonormal, such as a view matrix from [`Self::look_at`], by
    /// transposing the block.
    pub fn inverse_affine_unit_scale(&self) -> Self {
        debug_assert!(self.has_structure(MatrixProperties::AFFINE));
        debug_assert!(self.has_orthonormal_3x3(1e-6));
        let linear_inverse = self.matrix3().transposed();
        let translation = -(linear_inverse * self.translation());
        Self::from_matrix3(&linear_inverse).with_translation(&translation)
    }

    /// Same as [`Self::inverse_affine_unit_scale`].
    pub fn inverse_look_at(&self) -> Self {
        self.inverse_affine_unit_scale()
    }

    /// Computes the inverse of a matrix with the symmetric perspective
    /// pattern from [`Self::perspective`].
    pub fn inverse_perspective(&self) -> Self {
        debug_assert!(self.has_structure(MatrixProperties::PERSPECTIVE));
        let c = &self.cols;
        let (m00, m11, m22, m23, m32) = (c[0][0], c[1][1], c[2][2], c[2][3], c[3][2]);
        let inv_m23 = m23.recip();
        let inv_m32 = m32.recip();
        Self::with_properties(
            [
                [m00.recip(), 0.0, 0.0, 0.0],
                [0.0, m11.recip(), 0.0, 0.0],
                [0.0, 0.0, 0.0, inv_m32],
                [0.0, 0.0, inv_m23, -m22 * inv_m23 * inv_m32],
            ],
            MatrixProperties::empty(),
        )
    }

    /// Computes the inverse of a matrix with the general frustum pattern from
    /// [`Self::frustum`], which may have the off-center terms `m20` and `m21`.
    pub fn inverse_frustum(&self) -> Self {
        let c = &self.cols;
        debug_assert!(
            c[0][1] == 0.0
                && c[0][2] == 0.0
                && c[0][3] == 0.0
                && c[1][0] == 0.0
                && c[1][2] == 0.0
                && c[1][3] == 0.0
                && c[3][0] == 0.0
                && c[3][1] == 0.0
                && c[3][3] == 0.0
        );
        let (m00, m11, m20, m21, m22, m23, m32) =
            (c[0][0], c[1][1], c[2][0], c[2][1], c[2][2], c[2][3], c[3][2]);
        let inv_m00 = m00.recip();
        let inv_m11 = m11.recip();
        let inv_m23 = m23.recip();
        let inv_m32 = m32.recip();
        Self::with_properties(
            [
                [inv_m00, 0.0, 0.0, 0.0],
                [0.0, inv_m11, 0.0, 0.0],
                [0.0, 0.0, 0.0, inv_m32],
                [
                    -m20 * inv_m00 * inv_m23,
                    -m21 * inv_m11 * inv_m23,
                    inv_m23,
                    -m22 * inv_m23 * inv_m32,
                ],
            ],
            MatrixProperties::empty(),
        )
    }

    /// Computes the inverse of an orthographic projection (an affine matrix
    /// with a diagonal 3x3 block).
    pub fn inverse_ortho(&self) -> Self {
        debug_assert!(self.has_structure(MatrixProperties::AFFINE));
        let c = &self.cols;
        let inv_diagonal = [c[0][0].recip(), c[1][1].recip(), c[2][2].recip()];
        let mut cols = [[0.0; 4]; 4];
        for (axis, &inv_scale) in inv_diagonal.iter().enumerate() {
            cols[axis][axis] = inv_scale;
            cols[3][axis] = -c[3][axis] * inv_scale;
        }
        cols[3][3] = 1.0;
        Self::with_properties(cols, MatrixProperties::AFFINE)
    }

    /// Computes `(self * view)^-1` for a projection `self` with the symmetric
    /// perspective pattern and an affine `view`, without forming the
    /// product.
    pub fn inverse_perspective_view(&self, view: &Self) -> Self {
        debug_assert!(self.has_structure(MatrixProperties::PERSPECTIVE));
        let c = &self.cols;
        let (m00, m11, m22, m23, m32) = (c[0][0], c[1][1], c[2][2], c[2][3], c[3][2]);
        let inv_m23 = m23.recip();
        let inv_m32 = m32.recip();
        let view_inverse = view.inverse_affine().cols;
        let mut cols = [[0.0; 4]; 4];
        for row in 0..4 {
            cols[0][row] = view_inverse[0][row] / m00;
            cols[1][row] = view_inverse[1][row] / m11;
            cols[2][row] = view_inverse[3][row] * inv_m32;
            cols[3][row] = view_inverse[2][row] * inv_m23
                - view_inverse[3][row] * m22 * inv_m23 * inv_m32;
        }
        Self::with_properties(cols, MatrixProperties::empty())
    }

    pub(crate) fn has_orthonormal_3x3(&self, tolerance: f64) -> bool {
        let m = self.matrix3();
        let product = m.transposed() * m;
        (0..3).all(|col| {
            (0..3).all(|row| {
                let expected = if col == row { 1.0 } else { 0.0 };
                (product.element(col, row) - expected).abs() <= tolerance
            })
        })
    }
}
