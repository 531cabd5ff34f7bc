//! Quaternions and axis-angle rotations.

use crate::{
    angle::{Angle, Radians},
    vector::Vector3,
};
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// A quaternion `x i + y j + z k + w`. When used as a rotation it is assumed
/// to have unit length.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, PartialEq, Zeroable, Pod)]
pub struct Quaternion {
    inner: glam::DQuat,
}

/// A rotation by an angle (in radians) around a unit-length axis.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Zeroable, Pod)]
pub struct AxisAngle {
    angle: f64,
    axis: Vector3,
}

impl Quaternion {
    /// Creates a quaternion with the given imaginary (`x`, `y`, `z`) and real
    /// (`w`) components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::wrap(glam::DQuat::from_xyzw(x, y, z, w))
    }

    /// Creates the identity rotation.
    #[inline]
    pub const fn identity() -> Self {
        Self::wrap(glam::DQuat::IDENTITY)
    }

    /// Creates the rotation by the given angle around the given axis. The
    /// axis is assumed to have unit length.
    #[inline]
    pub fn from_axis_angle<A: Angle>(axis: &Vector3, angle: A) -> Self {
        Self::wrap(glam::DQuat::from_axis_angle(axis.unwrap(), angle.radians()))
    }

    /// Creates a rotation quaternion from the elements of a 3x3 rotation
    /// matrix (`mCR` is column `C`, row `R`) whose columns have unit length.
    ///
    /// The construction branches on the trace and on the largest diagonal
    /// element to avoid cancellation.
    #[inline]
    pub fn from_normalized_rotation_elements(m: &[[f64; 3]; 3]) -> Self {
        Self::wrap(glam::DQuat::from_mat3(&glam::DMat3::from_cols_array_2d(m)))
    }

    /// Like [`Self::from_normalized_rotation_elements`], but first divides
    /// each column by its length so that a scaled rotation matrix is accepted.
    pub fn from_unnormalized_rotation_elements(m: &[[f64; 3]; 3]) -> Self {
        let m = glam::DMat3::from_cols_array_2d(m);
        let normalized = glam::DMat3::from_cols(
            m.x_axis / m.x_axis.length(),
            m.y_axis / m.y_axis.length(),
            m.z_axis / m.z_axis.length(),
        );
        Self::wrap(glam::DQuat::from_mat3(&normalized))
    }

    #[inline]
    pub const fn x(&self) -> f64 {
        self.inner.x
    }

    #[inline]
    pub const fn y(&self) -> f64 {
        self.inner.y
    }

    #[inline]
    pub const fn z(&self) -> f64 {
        self.inner.z
    }

    #[inline]
    pub const fn w(&self) -> f64 {
        self.inner.w
    }

    /// The imaginary part `(x, y, z)`.
    #[inline]
    pub const fn imag(&self) -> Vector3 {
        Vector3::new(self.inner.x, self.inner.y, self.inner.z)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.inner.dot(other.inner)
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.inner.length()
    }

    #[inline]
    pub fn normalized(&self) -> Self {
        Self::wrap(self.inner * self.inner.length_recip())
    }

    #[inline]
    pub fn conjugated(&self) -> Self {
        Self::wrap(self.inner.conjugate())
    }

    /// Rotates the given vector by this (unit) quaternion.
    #[inline]
    pub fn rotate_vector(&self, vector: &Vector3) -> Vector3 {
        Vector3::wrap(self.inner * vector.unwrap())
    }

    /// Converts the (unit) quaternion into the equivalent axis-angle rotation.
    pub fn to_axis_angle(&self) -> AxisAngle {
        AxisAngle::from(*self)
    }

    #[inline]
    pub(crate) const fn wrap(inner: glam::DQuat) -> Self {
        Self { inner }
    }

    #[inline]
    pub(crate) const fn unwrap(self) -> glam::DQuat {
        self.inner
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quaternion")
            .field("x", &self.inner.x)
            .field("y", &self.inner.y)
            .field("z", &self.inner.z)
            .field("w", &self.inner.w)
            .finish()
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Quaternion {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let [x, y, z, w] = u.arbitrary::<[f64; 4]>()?;
        Ok(Self::new(x, y, z, w))
    }
}

impl_binop!(Mul, mul, Quaternion, Quaternion, Quaternion, |a, b| {
    Quaternion::wrap(a.inner * b.inner)
});

impl_abs_diff_eq!(Quaternion, |a, b, epsilon| {
    a.inner.abs_diff_eq(b.inner, epsilon)
});

impl_relative_eq!(Quaternion, |a, b, epsilon, max_relative| {
    ::approx::RelativeEq::relative_eq(&a.inner, &b.inner, epsilon, max_relative)
});

impl AxisAngle {
    /// Creates a rotation by the given angle around the given axis. The axis
    /// is normalized.
    pub fn new<A: Angle>(axis: &Vector3, angle: A) -> Self {
        Self {
            angle: angle.radians(),
            axis: axis.normalized(),
        }
    }

    /// The rotation angle.
    #[inline]
    pub const fn angle(&self) -> Radians {
        Radians(self.angle)
    }

    /// The unit rotation axis.
    #[inline]
    pub const fn axis(&self) -> &Vector3 {
        &self.axis
    }
}

impl From<Quaternion> for AxisAngle {
    fn from(q: Quaternion) -> Self {
        let q = if q.w().abs() > 1.0 { q.normalized() } else { q };
        let angle = 2.0 * q.w().acos();
        let imag = q.imag();
        let imag_norm = imag.norm();
        let axis = if imag_norm == 0.0 {
            // Zero rotation, any axis works
            Vector3::unit_x()
        } else {
            imag / imag_norm
        };
        Self { angle, axis }
    }
}

impl From<AxisAngle> for Quaternion {
    fn from(axis_angle: AxisAngle) -> Self {
        Self::from_axis_angle(&axis_angle.axis, axis_angle.angle())
    }
}

impl_approx_eq_for_components!(AxisAngle, |a| [
    a.angle,
    a.axis.x(),
    a.axis.y(),
    a.axis.z()
]);
