//! Double-precision 4x4 matrix algebra for real-time 3D graphics.
//!
//! [`Matrix4`] caches a classification of its own structure in
//! [`MatrixProperties`], which lets composition, inversion and
//! transformation pick cheaper formulas for identity, translation, affine
//! and perspective matrices. Projection and view builders, frustum culling
//! and buffer packing are built on top of it.

#[macro_use]
mod macros;

pub mod angle;
#[cfg(feature = "benchmark")]
pub mod benchmark;
pub mod buffer;
pub mod frustum;
pub mod matrix3;
pub mod matrix3x2;
pub mod matrix4;
pub mod quaternion;
pub mod stack;
pub mod vector;

pub use angle::{Angle, Degrees, Radians};
pub use frustum::{FrustumCorner, FrustumIntersection, FrustumPlane, Intersection, PlaneMask};
pub use matrix3::Matrix3;
pub use matrix3x2::Matrix3x2;
pub use matrix4::{DepthRange, Handedness, Matrix4, MatrixProperties, Viewport};
pub use quaternion::{AxisAngle, Quaternion};
pub use stack::MatrixStack;
pub use vector::{Vector2, Vector3, Vector4};
