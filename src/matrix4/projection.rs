//! Projection and view matrix builders.

use super::{Matrix4, MatrixProperties, Viewport};
use crate::{angle::Angle, vector::Vector3};

/// Bias keeping the depth of points at an infinite distance finite.
const INFINITE_DEPTH_EPSILON: f64 = 1e-6;

/// Which way the view space z-axis points relative to the viewing
/// direction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Handedness {
    /// The camera looks down the negative z-axis.
    #[default]
    Right,
    /// The camera looks down the positive z-axis.
    Left,
}

/// The range that view space depth between the near and far plane is
/// mapped to in normalized device coordinates.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DepthRange {
    /// `[-1, 1]`, as in OpenGL.
    #[default]
    NegativeOneToOne,
    /// `[0, 1]`, as in Vulkan, Direct3D and WebGPU.
    ZeroToOne,
}

impl DepthRange {
    const fn is_zero_to_one(self) -> bool {
        matches!(self, Self::ZeroToOne)
    }

    /// The width of the range.
    const fn extent(self) -> f64 {
        match self {
            Self::NegativeOneToOne => 2.0,
            Self::ZeroToOne => 1.0,
        }
    }
}

/// Computes `(m22, m32)` of a right-handed perspective projection. An
/// infinite far or near plane gives the limiting matrix with a small bias
/// instead of NaN. Having both planes infinite is not supported.
fn perspective_depth_terms(near: f64, far: f64, depth_range: DepthRange) -> (f64, f64) {
    let far_is_infinite = far > 0.0 && far.is_infinite();
    let near_is_infinite = near > 0.0 && near.is_infinite();
    let k = depth_range.extent();
    let e = INFINITE_DEPTH_EPSILON;

    if far_is_infinite {
        (e - 1.0, (e - k) * near)
    } else if near_is_infinite {
        let m22 = if depth_range.is_zero_to_one() { 0.0 } else { 1.0 };
        (m22 - e, (k - e) * far)
    } else if depth_range.is_zero_to_one() {
        (far / (near - far), far * near / (near - far))
    } else {
        ((far + near) / (near - far), (far + far) * near / (near - far))
    }
}

impl Matrix4 {
    /// Creates a symmetric perspective projection with the given vertical
    /// field of view and width-to-height aspect ratio.
    ///
    /// `far` may be [`f64::INFINITY`] for an infinite far plane, or `near`
    /// may be infinite for a reversed projection, but not both.
    pub fn perspective<A: Angle>(
        vertical_field_of_view: A,
        aspect_ratio: f64,
        near: f64,
        far: f64,
        handedness: Handedness,
        depth_range: DepthRange,
    ) -> Self {
        let inv_tan_half_fov = (0.5 * vertical_field_of_view.radians()).tan().recip();
        Self::projection_with_depth_terms(
            inv_tan_half_fov / aspect_ratio,
            inv_tan_half_fov,
            0.0,
            0.0,
            near,
            far,
            handedness,
            depth_range,
        )
    }

    /// Creates a symmetric perspective projection whose near plane has the
    /// given width and height.
    pub fn perspective_rect(
        width: f64,
        height: f64,
        near: f64,
        far: f64,
        handedness: Handedness,
        depth_range: DepthRange,
    ) -> Self {
        Self::projection_with_depth_terms(
            (near + near) / width,
            (near + near) / height,
            0.0,
            0.0,
            near,
            far,
            handedness,
            depth_range,
        )
    }

    /// Creates a perspective projection like [`Self::perspective`] whose
    /// center of view is tilted by the given horizontal and vertical angles.
    pub fn perspective_off_center<A: Angle>(
        vertical_field_of_view: A,
        horizontal_offset: A,
        vertical_offset: A,
        aspect_ratio: f64,
        near: f64,
        far: f64,
        handedness: Handedness,
        depth_range: DepthRange,
    ) -> Self {
        let y_scale = (0.5 * vertical_field_of_view.radians()).tan().recip();
        let x_scale = y_scale / aspect_ratio;
        Self::projection_with_depth_terms(
            x_scale,
            y_scale,
            horizontal_offset.radians().tan() * x_scale,
            vertical_offset.radians().tan() * y_scale,
            near,
            far,
            handedness,
            depth_range,
        )
    }

    /// Creates a perspective projection of the frustum whose near plane
    /// spans `[left, right] x [bottom, top]`. The same infinite plane
    /// handling as in [`Self::perspective`] applies.
    pub fn frustum(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
        handedness: Handedness,
        depth_range: DepthRange,
    ) -> Self {
        Self::projection_with_depth_terms(
            (near + near) / (right - left),
            (near + near) / (top - bottom),
            (right + left) / (right - left),
            (top + bottom) / (top - bottom),
            near,
            far,
            handedness,
            depth_range,
        )
    }

    /// Creates the perspective projection of a pinhole camera with focal
    /// lengths `alpha_x` and `alpha_y`, skew `gamma` and principal point
    /// `(u0, v0)`, all in pixels, for an image of the given size.
    ///
    /// Without skew this equals [`Self::frustum`] for the near plane bounds
    /// the calibration implies.
    pub fn from_intrinsic(
        alpha_x: f64,
        alpha_y: f64,
        gamma: f64,
        u0: f64,
        v0: f64,
        image_width: u32,
        image_height: u32,
        near: f64,
        far: f64,
        handedness: Handedness,
        depth_range: DepthRange,
    ) -> Self {
        let width = f64::from(image_width);
        let height = f64::from(image_height);
        let mut cols = Self::frustum(
            -u0 * near / alpha_x,
            (width - u0) * near / alpha_x,
            -v0 * near / alpha_y,
            (height - v0) * near / alpha_y,
            near,
            far,
            handedness,
            depth_range,
        )
        .cols;
        cols[1][0] = 2.0 * gamma / width;
        Self::from_cols_array_2d(cols)
    }

    /// Creates an orthographic projection of the box spanning
    /// `[left, right] x [bottom, top]` and the depths `near` to `far`.
    pub fn ortho(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
        handedness: Handedness,
        depth_range: DepthRange,
    ) -> Self {
        let near_term = if depth_range.is_zero_to_one() {
            near
        } else {
            far + near
        };
        let cols = [
            [2.0 / (right - left), 0.0, 0.0, 0.0],
            [0.0, 2.0 / (top - bottom), 0.0, 0.0],
            [0.0, 0.0, depth_range.extent() / (near - far), 0.0],
            [
                (right + left) / (left - right),
                (top + bottom) / (bottom - top),
                near_term / (near - far),
                1.0,
            ],
        ];
        Self::with_handedness(cols, handedness, MatrixProperties::AFFINE)
    }

    /// Creates an orthographic projection of a box of the given width and
    /// height centered on the z-axis.
    pub fn ortho_symmetric(
        width: f64,
        height: f64,
        near: f64,
        far: f64,
        handedness: Handedness,
        depth_range: DepthRange,
    ) -> Self {
        let half_width = 0.5 * width;
        let half_height = 0.5 * height;
        Self::ortho(
            -half_width,
            half_width,
            -half_height,
            half_height,
            near,
            far,
            handedness,
            depth_range,
        )
    }

    /// Creates a right-handed orthographic projection for 2D content, with
    /// depths from -1 to 1 mapped to `[-1, 1]`.
    pub fn ortho_2d(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self::ortho(
            left,
            right,
            bottom,
            top,
            -1.0,
            1.0,
            Handedness::Right,
            DepthRange::NegativeOneToOne,
        )
    }

    /// Creates a view matrix for a camera at `eye` looking at `center`, with
    /// `up` giving the approximate upward direction.
    pub fn look_at(eye: &Vector3, center: &Vector3, up: &Vector3, handedness: Handedness) -> Self {
        Self::look_along(&(center - eye), up, handedness).translated(&-eye)
    }

    /// Creates a view matrix for a camera at the origin looking along
    /// `direction`.
    pub fn look_along(direction: &Vector3, up: &Vector3, handedness: Handedness) -> Self {
        // View space z-axis, pointing away from the scene for right-handed
        let z_axis = match handedness {
            Handedness::Right => -direction.normalized(),
            Handedness::Left => direction.normalized(),
        };
        let x_axis = up.cross(&z_axis).normalized();
        let y_axis = z_axis.cross(&x_axis);
        Self::with_properties(
            [
                [x_axis.x(), y_axis.x(), z_axis.x(), 0.0],
                [x_axis.y(), y_axis.y(), z_axis.y(), 0.0],
                [x_axis.z(), y_axis.z(), z_axis.z(), 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            MatrixProperties::AFFINE,
        )
    }

    /// Moves the near and far planes of a perspective projection built by
    /// [`Self::perspective`], [`Self::perspective_off_center`] or
    /// [`Self::frustum`], keeping its field of view, handedness and center.
    /// `depth_range` must be the one the projection was built with.
    pub fn perspective_frustum_slice(&self, near: f64, far: f64, depth_range: DepthRange) -> Self {
        let (m22, m32) = perspective_depth_terms(near, far, depth_range);
        // m23 is -1 for right-handed and 1 for left-handed projections
        let handedness_sign = -self.cols[2][3];
        let mut result = *self;
        result.cols[2][2] = handedness_sign * m22;
        result.cols[3][2] = m32;
        result.properties &= MatrixProperties::PERSPECTIVE;
        result
    }

    /// Creates the orthographic projection that tightly encloses the frustum
    /// of this view-projection matrix as seen through the affine `view`
    /// transform, as used for fitting a directional shadow map to a camera.
    pub fn ortho_crop(&self, view: &Self, handedness: Handedness, depth_range: DepthRange) -> Self {
        let corners = self
            .frustum_corners()
            .map(|corner| view.transform_project(&corner));
        let (min, max) = corners[1..]
            .iter()
            .fold((corners[0], corners[0]), |(min, max), corner| {
                (min.component_min(corner), max.component_max(corner))
            });
        let (near, far) = match handedness {
            Handedness::Right => (-max.z(), -min.z()),
            Handedness::Left => (min.z(), max.z()),
        };
        Self::ortho(
            min.x(),
            max.x(),
            min.y(),
            max.y(),
            near,
            far,
            handedness,
            depth_range,
        )
    }

    /// Creates the matrix that enlarges the window region of the given size
    /// centered on `(x, y)` to the whole viewport. Applied after a projection
    /// it restricts rendering to the region, as used for picking.
    pub fn pick_region(x: f64, y: f64, width: f64, height: f64, viewport: &Viewport) -> Self {
        let scale_x = viewport.width / width;
        let scale_y = viewport.height / height;
        let offset_x = (viewport.width + 2.0 * (viewport.x - x)) / width;
        let offset_y = (viewport.height + 2.0 * (viewport.y - y)) / height;
        Self::with_properties(
            [
                [scale_x, 0.0, 0.0, 0.0],
                [0.0, scale_y, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [offset_x, offset_y, 0.0, 1.0],
            ],
            MatrixProperties::AFFINE,
        )
    }

    /// Computes `self * P`, where `P` is [`Self::pick_region`].
    pub fn picked(&self, x: f64, y: f64, width: f64, height: f64, viewport: &Viewport) -> Self {
        self.product(&Self::pick_region(x, y, width, height, viewport))
    }

    fn projection_with_depth_terms(
        m00: f64,
        m11: f64,
        m20: f64,
        m21: f64,
        near: f64,
        far: f64,
        handedness: Handedness,
        depth_range: DepthRange,
    ) -> Self {
        let (m22, m32) = perspective_depth_terms(near, far, depth_range);
        let cols = [
            [m00, 0.0, 0.0, 0.0],
            [0.0, m11, 0.0, 0.0],
            [m20, m21, m22, -1.0],
            [0.0, 0.0, m32, 0.0],
        ];
        let properties = if m20 == 0.0 && m21 == 0.0 {
            MatrixProperties::PERSPECTIVE
        } else {
            MatrixProperties::empty()
        };
        Self::with_handedness(cols, handedness, properties)
    }

    /// Turns the elements of a right-handed projection into those of the
    /// requested handedness by negating the third column.
    fn with_handedness(
        mut cols: [[f64; 4]; 4],
        handedness: Handedness,
        properties: MatrixProperties,
    ) -> Self {
        if handedness == Handedness::Left {
            for value in &mut cols[2] {
                *value = -*value;
            }
        }
        Self::with_properties(cols, properties)
    }
}
