//! Cached structural classification of 4x4 matrices.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};

bitflags! {
    /// Bitflags encoding structural guarantees known to hold for a
    /// [`Matrix4`](crate::Matrix4). Operations use them to select cheaper
    /// algorithms, so a flag must never be set unless the structure actually
    /// holds. An empty set is always valid.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Zeroable, Pod)]
    pub struct MatrixProperties: u8 {
        /// The matrix is the identity matrix. Always accompanied by
        /// `AFFINE` and `TRANSLATION`.
        const IDENTITY    = 1 << 0;
        /// The last row is `(0, 0, 0, 1)`.
        const AFFINE      = 1 << 1;
        /// The matrix is a pure translation: affine with an identity upper-left
        /// 3x3 block.
        const TRANSLATION = 1 << 2;
        /// The matrix has the pattern of a symmetric perspective projection:
        /// only `m00`, `m11`, `m22`, `m32` are free, `m23` is `-1` or `+1` and
        /// every other element is zero.
        const PERSPECTIVE = 1 << 3;
    }
}

impl MatrixProperties {
    /// The flags of the identity matrix.
    pub const IDENTITY_MATRIX: Self = Self::IDENTITY
        .union(Self::AFFINE)
        .union(Self::TRANSLATION);

    /// Derives the flags that provably hold for the given column-major
    /// elements.
    pub fn determine(cols: &[[f64; 4]; 4]) -> Self {
        let [
            [m00, m01, m02, m03],
            [m10, m11, m12, m13],
            [m20, m21, m22, m23],
            [m30, m31, m32, m33],
        ] = *cols;

        let mut properties = Self::empty();

        if m03 == 0.0 && m13 == 0.0 && m23 == 0.0 && m33 == 1.0 {
            properties |= Self::AFFINE;

            let linear_is_identity = m00 == 1.0
                && m01 == 0.0
                && m02 == 0.0
                && m10 == 0.0
                && m11 == 1.0
                && m12 == 0.0
                && m20 == 0.0
                && m21 == 0.0
                && m22 == 1.0;

            if linear_is_identity {
                properties |= Self::TRANSLATION;
                if m30 == 0.0 && m31 == 0.0 && m32 == 0.0 {
                    properties |= Self::IDENTITY;
                }
            }
        } else if m01 == 0.0
            && m02 == 0.0
            && m03 == 0.0
            && m10 == 0.0
            && m12 == 0.0
            && m13 == 0.0
            && m20 == 0.0
            && m21 == 0.0
            && m30 == 0.0
            && m31 == 0.0
            && m33 == 0.0
            && m23.abs() == 1.0
        {
            properties |= Self::PERSPECTIVE;
        }

        properties
    }

    /// The flags that remain valid after writing `value` to the element in
    /// column `col` and row `row`.
    ///
    /// # Panics
    /// If either index is larger than 3.
    pub fn after_setting_element(self, col: usize, row: usize, value: f64) -> Self {
        let cleared = match (col, row) {
            (0, 0) | (1, 1) | (2, 2) => Self::IDENTITY | Self::TRANSLATION,
            (0, 1) | (0, 2) | (1, 0) | (1, 2) | (2, 0) | (2, 1) => {
                Self::IDENTITY | Self::TRANSLATION | Self::PERSPECTIVE
            }
            (2, 3) if value.abs() == 1.0 => Self::IDENTITY | Self::TRANSLATION | Self::AFFINE,
            (3, 0) | (3, 1) => Self::IDENTITY | Self::PERSPECTIVE,
            (3, 2) => Self::IDENTITY,
            (0, 3) | (1, 3) | (2, 3) | (3, 3) => Self::all(),
            _ => panic!("element index ({col}, {row}) out of bounds for Matrix4"),
        };
        self.difference(cleared)
    }

    /// The flags of `a * b` that follow from the flags of the operands
    /// alone.
    pub fn of_product(a: Self, b: Self) -> Self {
        if a.contains(Self::IDENTITY) {
            b
        } else if b.contains(Self::IDENTITY) {
            a
        } else if a.contains(Self::AFFINE) && b.contains(Self::AFFINE) {
            Self::AFFINE | (a & b & Self::TRANSLATION)
        } else {
            Self::empty()
        }
    }
}
