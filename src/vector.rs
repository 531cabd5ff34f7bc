//! Vectors.

use bytemuck::{Pod, Zeroable};
use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// A 2-dimensional vector.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct Vector2 {
    inner: glam::DVec2,
}

/// A 3-dimensional vector.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct Vector3 {
    inner: glam::DVec3,
}

/// A 4-dimensional vector.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct Vector4 {
    inner: glam::DVec4,
}

impl Vector2 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self::wrap(glam::DVec2::new(x, y))
    }

    /// Creates a vector with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::wrap(glam::DVec2::ZERO)
    }

    /// Creates a vector with the same value for all components.
    #[inline]
    pub const fn same(value: f64) -> Self {
        Self::wrap(glam::DVec2::splat(value))
    }

    /// The x-component.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.inner.x
    }

    /// The y-component.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.inner.y
    }

    #[inline]
    pub const fn x_mut(&mut self) -> &mut f64 {
        &mut self.inner.x
    }

    #[inline]
    pub const fn y_mut(&mut self) -> &mut f64 {
        &mut self.inner.y
    }

    /// Creates a 3D vector with the given z-component.
    #[inline]
    pub const fn extended(&self, z: f64) -> Vector3 {
        Vector3::new(self.inner.x, self.inner.y, z)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.inner.dot(other.inner)
    }

    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.inner.length_squared()
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.inner.length()
    }

    /// Returns the vector scaled to unit length. A zero vector gives NaN
    /// components.
    #[inline]
    pub fn normalized(&self) -> Self {
        Self::wrap(self.inner / self.inner.length())
    }

    #[inline]
    pub(crate) const fn wrap(inner: glam::DVec2) -> Self {
        Self { inner }
    }

    #[inline]
    pub(crate) const fn unwrap(self) -> glam::DVec2 {
        self.inner
    }
}

impl Vector3 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self::wrap(glam::DVec3::new(x, y, z))
    }

    /// Creates a vector with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::wrap(glam::DVec3::ZERO)
    }

    /// Creates a vector with the same value for all components.
    #[inline]
    pub const fn same(value: f64) -> Self {
        Self::wrap(glam::DVec3::splat(value))
    }

    #[inline]
    pub const fn unit_x() -> Self {
        Self::wrap(glam::DVec3::X)
    }

    #[inline]
    pub const fn unit_y() -> Self {
        Self::wrap(glam::DVec3::Y)
    }

    #[inline]
    pub const fn unit_z() -> Self {
        Self::wrap(glam::DVec3::Z)
    }

    /// The x-component.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.inner.x
    }

    /// The y-component.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.inner.y
    }

    /// The z-component.
    #[inline]
    pub const fn z(&self) -> f64 {
        self.inner.z
    }

    #[inline]
    pub const fn x_mut(&mut self) -> &mut f64 {
        &mut self.inner.x
    }

    #[inline]
    pub const fn y_mut(&mut self) -> &mut f64 {
        &mut self.inner.y
    }

    #[inline]
    pub const fn z_mut(&mut self) -> &mut f64 {
        &mut self.inner.z
    }

    /// The x- and y-components.
    #[inline]
    pub const fn xy(&self) -> Vector2 {
        Vector2::new(self.inner.x, self.inner.y)
    }

    /// Creates a 4D vector with the given w-component.
    #[inline]
    pub const fn extended(&self, w: f64) -> Vector4 {
        Vector4::new(self.inner.x, self.inner.y, self.inner.z, w)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.inner.dot(other.inner)
    }

    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::wrap(self.inner.cross(other.inner))
    }

    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.inner.length_squared()
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.inner.length()
    }

    /// Returns the vector scaled to unit length. A zero vector gives NaN
    /// components.
    #[inline]
    pub fn normalized(&self) -> Self {
        Self::wrap(self.inner / self.inner.length())
    }

    #[inline]
    pub fn component_mul(&self, other: &Self) -> Self {
        Self::wrap(self.inner * other.inner)
    }

    #[inline]
    pub fn component_min(&self, other: &Self) -> Self {
        Self::wrap(self.inner.min(other.inner))
    }

    #[inline]
    pub fn component_max(&self, other: &Self) -> Self {
        Self::wrap(self.inner.max(other.inner))
    }

    /// Linearly interpolates between `self` (at `t = 0`) and `other`
    /// (at `t = 1`).
    #[inline]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::wrap(self.inner.lerp(other.inner, t))
    }

    #[inline]
    pub fn mapped(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::wrap(self.inner.map(f))
    }

    #[inline]
    pub(crate) const fn wrap(inner: glam::DVec3) -> Self {
        Self { inner }
    }

    #[inline]
    pub(crate) const fn unwrap(self) -> glam::DVec3 {
        self.inner
    }
}

impl Vector4 {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::wrap(glam::DVec4::new(x, y, z, w))
    }

    /// Creates a vector with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::wrap(glam::DVec4::ZERO)
    }

    #[inline]
    pub const fn unit_x() -> Self {
        Self::wrap(glam::DVec4::X)
    }

    #[inline]
    pub const fn unit_y() -> Self {
        Self::wrap(glam::DVec4::Y)
    }

    #[inline]
    pub const fn unit_z() -> Self {
        Self::wrap(glam::DVec4::Z)
    }

    #[inline]
    pub const fn unit_w() -> Self {
        Self::wrap(glam::DVec4::W)
    }

    /// The x-component.
    #[inline]
    pub const fn x(&self) -> f64 {
        self.inner.x
    }

    /// The y-component.
    #[inline]
    pub const fn y(&self) -> f64 {
        self.inner.y
    }

    /// The z-component.
    #[inline]
    pub const fn z(&self) -> f64 {
        self.inner.z
    }

    /// The w-component.
    #[inline]
    pub const fn w(&self) -> f64 {
        self.inner.w
    }

    #[inline]
    pub const fn x_mut(&mut self) -> &mut f64 {
        &mut self.inner.x
    }

    #[inline]
    pub const fn y_mut(&mut self) -> &mut f64 {
        &mut self.inner.y
    }

    #[inline]
    pub const fn z_mut(&mut self) -> &mut f64 {
        &mut self.inner.z
    }

    #[inline]
    pub const fn w_mut(&mut self) -> &mut f64 {
        &mut self.inner.w
    }

    /// The x-, y- and z-components.
    #[inline]
    pub const fn xyz(&self) -> Vector3 {
        Vector3::new(self.inner.x, self.inner.y, self.inner.z)
    }

    /// Divides the x-, y- and z-components by the w-component.
    #[inline]
    pub fn perspective_divided(&self) -> Vector3 {
        Vector3::wrap(self.inner.truncate() * self.inner.w.recip())
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.inner.dot(other.inner)
    }

    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.inner.length_squared()
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.inner.length()
    }

    #[inline]
    pub fn normalized(&self) -> Self {
        Self::wrap(self.inner / self.inner.length())
    }

    #[inline]
    pub const fn to_array(&self) -> [f64; 4] {
        [self.inner.x, self.inner.y, self.inner.z, self.inner.w]
    }

    #[inline]
    pub(crate) const fn wrap(inner: glam::DVec4) -> Self {
        Self { inner }
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from(array: [f64; 2]) -> Self {
        Self::wrap(glam::DVec2::from_array(array))
    }
}

impl From<Vector2> for [f64; 2] {
    fn from(v: Vector2) -> Self {
        v.inner.to_array()
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(array: [f64; 3]) -> Self {
        Self::wrap(glam::DVec3::from_array(array))
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        v.inner.to_array()
    }
}

impl From<[f64; 4]> for Vector4 {
    fn from(array: [f64; 4]) -> Self {
        Self::wrap(glam::DVec4::from_array(array))
    }
}

impl From<Vector4> for [f64; 4] {
    fn from(v: Vector4) -> Self {
        v.to_array()
    }
}

macro_rules! impl_vector_ops {
    ($t:ident, $n:literal, $($c:ident),+) => {
        impl_binop!(Add, add, $t, $t, $t, |a, b| {
            $t::wrap(a.inner + b.inner)
        });

        impl_binop!(Sub, sub, $t, $t, $t, |a, b| {
            $t::wrap(a.inner - b.inner)
        });

        impl_binop!(Mul, mul, $t, f64, $t, |a, b| {
            $t::wrap(a.inner * *b)
        });

        impl_binop!(Mul, mul, f64, $t, $t, |a, b| {
            $t::wrap(*a * b.inner)
        });

        impl_binop!(Div, div, $t, f64, $t, |a, b| {
            $t::wrap(a.inner / *b)
        });

        impl_binop_assign!(AddAssign, add_assign, $t, $t, |a, b| {
            a.inner += b.inner;
        });

        impl_binop_assign!(SubAssign, sub_assign, $t, $t, |a, b| {
            a.inner -= b.inner;
        });

        impl_binop_assign!(MulAssign, mul_assign, $t, f64, |a, b| {
            a.inner *= *b;
        });

        impl_unary_op!(Neg, neg, $t, $t, |val| {
            $t::wrap(-val.inner)
        });

        impl Index<usize> for $t {
            type Output = f64;

            #[inline]
            fn index(&self, index: usize) -> &Self::Output {
                &self.inner[index]
            }
        }

        impl IndexMut<usize> for $t {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                &mut self.inner[index]
            }
        }

        impl_abs_diff_eq!($t, |a, b, epsilon| {
            a.inner.abs_diff_eq(b.inner, epsilon)
        });

        impl_relative_eq!($t, |a, b, epsilon, max_relative| {
            ::approx::RelativeEq::relative_eq(&a.inner, &b.inner, epsilon, max_relative)
        });

        impl fmt::Debug for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($t))
                    $(.field(stringify!($c), &self.inner.$c))+
                    .finish()
            }
        }

        #[cfg(feature = "arbitrary")]
        impl<'a> arbitrary::Arbitrary<'a> for $t {
            fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
                Ok(Self::from(u.arbitrary::<[f64; $n]>()?))
            }
        }
    };
}

impl_vector_ops!(Vector2, 2, x, y);
impl_vector_ops!(Vector3, 3, x, y, z);
impl_vector_ops!(Vector4, 4, x, y, z, w);

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn vector3_cross_product_of_unit_axes_follows_right_hand_rule() {
        assert_eq!(Vector3::unit_x().cross(&Vector3::unit_y()), Vector3::unit_z());
        assert_eq!(Vector3::unit_y().cross(&Vector3::unit_z()), Vector3::unit_x());
        assert_eq!(Vector3::unit_z().cross(&Vector3::unit_x()), Vector3::unit_y());
    }

    #[test]
    fn normalizing_vector3_gives_unit_length() {
        let v = Vector3::new(3.0, -4.0, 12.0).normalized();
        assert_abs_diff_eq!(v.norm(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(v, Vector3::new(3.0, -4.0, 12.0) / 13.0, epsilon = EPSILON);
    }

    #[test]
    fn normalizing_zero_vector_gives_nan() {
        assert!(Vector3::zeros().normalized().x().is_nan());
    }

    #[test]
    fn vector_arithmetic_operations_work() {
        let a = Vector4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vector4::new(4.0, 3.0, 2.0, 1.0);
        assert_eq!(a + b, Vector4::new(5.0, 5.0, 5.0, 5.0));
        assert_eq!(&a - &b, Vector4::new(-3.0, -1.0, 1.0, 3.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(-a, Vector4::new(-1.0, -2.0, -3.0, -4.0));

        let mut c = Vector2::new(1.0, 1.0);
        c += Vector2::new(1.0, 2.0);
        c *= 2.0;
        assert_eq!(c, Vector2::new(4.0, 6.0));
    }

    #[test]
    fn component_wise_min_max_and_lerp_work() {
        let a = Vector3::new(1.0, 5.0, -2.0);
        let b = Vector3::new(3.0, -1.0, -2.0);
        assert_eq!(a.component_min(&b), Vector3::new(1.0, -1.0, -2.0));
        assert_eq!(a.component_max(&b), Vector3::new(3.0, 5.0, -2.0));
        assert_eq!(a.component_mul(&b), Vector3::new(3.0, -5.0, 4.0));
        assert_eq!(a.lerp(&b, 0.5), Vector3::new(2.0, 2.0, -2.0));
        assert_eq!(a.mapped(f64::abs), Vector3::new(1.0, 5.0, 2.0));
    }

    #[test]
    fn perspective_division_of_vector4_works() {
        let v = Vector4::new(2.0, 4.0, 6.0, 2.0);
        assert_eq!(v.perspective_divided(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn indexing_vector4_matches_named_components() {
        let mut v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v[0], v.x());
        assert_eq!(v[3], v.w());
        v[2] = 7.0;
        assert_eq!(v.z(), 7.0);
    }

    #[test]
    fn vectors_are_transparent_over_glam() {
        assert_eq!(std::mem::size_of::<Vector3>(), std::mem::size_of::<glam::DVec3>());
        assert_eq!(std::mem::size_of::<Vector4>(), std::mem::size_of::<glam::DVec4>());
        let v = Vector3::wrap(glam::DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(v, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(v.unwrap().cross(glam::DVec3::X), v.cross(&Vector3::unit_x()).unwrap());
        let bytes: &[f64] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(bytes, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn debug_output_lists_components() {
        assert_eq!(
            format!("{:?}", Vector2::new(1.0, 2.0)),
            "Vector2 { x: 1.0, y: 2.0 }"
        );
    }
}
