//! Different units for angles.

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use std::{
    f64::consts::PI,
    ops::{Add, Div, Mul, Neg, Sub},
};

/// Represents an angle.
pub trait Angle: Copy {
    /// Returns the angle as degrees.
    fn as_degrees(self) -> Degrees;

    /// Returns the angle as radians.
    fn as_radians(self) -> Radians;

    /// Returns the value of the angle in degrees.
    fn degrees(self) -> f64 {
        self.as_degrees().0
    }

    /// Returns the value of the angle in radians.
    fn radians(self) -> f64 {
        self.as_radians().0
    }
}

/// An angle in degrees.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Zeroable, Pod)]
pub struct Degrees(pub f64);

/// An angle in radians.
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Zeroable, Pod)]
pub struct Radians(pub f64);

impl Angle for Degrees {
    fn as_degrees(self) -> Degrees {
        self
    }

    fn as_radians(self) -> Radians {
        Radians(degrees_to_radians(self.0))
    }
}

impl Angle for Radians {
    fn as_degrees(self) -> Degrees {
        Degrees(radians_to_degrees(self.0))
    }

    fn as_radians(self) -> Radians {
        self
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        rad.as_degrees()
    }
}

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        deg.as_radians()
    }
}

macro_rules! impl_angle_arithmetic {
    ($t:ident) => {
        impl<A: Angle> Add<A> for $t {
            type Output = Self;
            fn add(self, rhs: A) -> Self {
                Self(self.0 + Self::from_angle(rhs).0)
            }
        }

        impl<A: Angle> Sub<A> for $t {
            type Output = Self;
            fn sub(self, rhs: A) -> Self {
                Self(self.0 - Self::from_angle(rhs).0)
            }
        }

        impl Mul<f64> for $t {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $t {
            type Output = Self;
            fn div(self, rhs: f64) -> Self {
                Self(self.0 / rhs)
            }
        }

        impl Neg for $t {
            type Output = Self;
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl AbsDiffEq for $t {
            type Epsilon = f64;

            fn default_epsilon() -> f64 {
                f64::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
                f64::abs_diff_eq(&self.0, &other.0, epsilon)
            }
        }

        impl RelativeEq for $t {
            fn default_max_relative() -> f64 {
                f64::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
                f64::relative_eq(&self.0, &other.0, epsilon, max_relative)
            }
        }
    };
}

impl_angle_arithmetic!(Degrees);
impl_angle_arithmetic!(Radians);

impl Degrees {
    fn from_angle(angle: impl Angle) -> Self {
        angle.as_degrees()
    }
}

impl Radians {
    fn from_angle(angle: impl Angle) -> Self {
        angle.as_radians()
    }
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn converting_special_degree_angles_to_radians_works() {
        assert_abs_diff_eq!(Degrees(0.0).radians(), 0.0);
        assert_abs_diff_eq!(Degrees(90.0).radians(), PI / 2.0);
        assert_abs_diff_eq!(Degrees(180.0).radians(), PI);
        assert_abs_diff_eq!(Degrees(-270.0).radians(), -3.0 * PI / 2.0);
        assert_abs_diff_eq!(Degrees(360.0).radians(), 2.0 * PI);
    }

    #[test]
    fn converting_special_radian_angles_to_degrees_works() {
        assert_abs_diff_eq!(Radians(0.0).degrees(), 0.0);
        assert_abs_diff_eq!(Radians(PI / 2.0).degrees(), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(Radians(-PI).degrees(), -180.0, epsilon = 1e-12);
    }

    #[test]
    fn angle_arithmetic_mixing_units_works() {
        assert_abs_diff_eq!(Degrees(45.0) + Radians(PI / 2.0), Degrees(135.0), epsilon = 1e-12);
        assert_abs_diff_eq!(
            Radians(PI / 2.0) - Degrees(45.0),
            Radians(PI / 4.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(Degrees(42.0) * 2.5, Degrees(105.0));
        assert_abs_diff_eq!(Radians(42.0) / 4.0, Radians(10.5));
        assert_abs_diff_eq!(-Degrees(30.0), Degrees(-30.0));
    }
}
