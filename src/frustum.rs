//! Culling against the view frustum of a projection matrix.

use crate::{
    matrix4::Matrix4,
    vector::{Vector3, Vector4},
};
use approx::{AbsDiffEq, RelativeEq};
use bitflags::bitflags;

/// One of the six planes bounding the frustum, named by the clip space
/// boundary it corresponds to.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrustumPlane {
    /// `x = -w`, the left plane.
    NegativeX,
    /// `x = w`, the right plane.
    PositiveX,
    /// `y = -w`, the bottom plane.
    NegativeY,
    /// `y = w`, the top plane.
    PositiveY,
    /// `z = -w`, the near plane.
    NegativeZ,
    /// `z = w`, the far plane.
    PositiveZ,
}

/// One of the eight corners of the frustum.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrustumCorner {
    NearBottomLeft,
    NearBottomRight,
    NearTopRight,
    NearTopLeft,
    FarBottomRight,
    FarBottomLeft,
    FarTopLeft,
    FarTopRight,
}

/// How a volume relates to the frustum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intersection {
    /// The volume lies entirely inside.
    Inside,
    /// The volume may straddle one or more planes.
    Intersect,
    /// The volume lies entirely outside the given plane.
    Outside(FrustumPlane),
}

bitflags! {
    /// A set of frustum planes to test against.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PlaneMask: u8 {
        const NEGATIVE_X = 1 << 0;
        const POSITIVE_X = 1 << 1;
        const NEGATIVE_Y = 1 << 2;
        const POSITIVE_Y = 1 << 3;
        const NEGATIVE_Z = 1 << 4;
        const POSITIVE_Z = 1 << 5;
    }
}

/// The frustum planes of a matrix, cached for repeated culling tests.
///
/// Each plane is stored as `(a, b, c, d)` with a unit normal `(a, b, c)`
/// pointing into the frustum, so that `a x + b y + c z + d` is the signed
/// distance of a point from the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrustumIntersection {
    planes: [Vector4; 6],
    positive_vertex_corners: [usize; 6],
}

impl FrustumPlane {
    pub const ALL: [Self; 6] = [
        Self::NegativeX,
        Self::PositiveX,
        Self::NegativeY,
        Self::PositiveY,
        Self::NegativeZ,
        Self::PositiveZ,
    ];

    /// The position of the plane in [`Self::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The mask containing only this plane.
    pub const fn mask(self) -> PlaneMask {
        PlaneMask::from_bits_truncate(1 << self.index())
    }

    /// The row of the matrix that is added to or subtracted from the last
    /// row to obtain the plane, and whether it is added.
    pub(crate) const fn row_and_sign(self) -> (usize, f64) {
        match self {
            Self::NegativeX => (0, 1.0),
            Self::PositiveX => (0, -1.0),
            Self::NegativeY => (1, 1.0),
            Self::PositiveY => (1, -1.0),
            Self::NegativeZ => (2, 1.0),
            Self::PositiveZ => (2, -1.0),
        }
    }
}

impl FrustumCorner {
    pub const ALL: [Self; 8] = [
        Self::NearBottomLeft,
        Self::NearBottomRight,
        Self::NearTopRight,
        Self::NearTopLeft,
        Self::FarBottomRight,
        Self::FarBottomLeft,
        Self::FarTopLeft,
        Self::FarTopRight,
    ];

    /// The three planes meeting at the corner, ordered x, y, z.
    pub const fn planes(self) -> [FrustumPlane; 3] {
        use FrustumPlane::{NegativeX, NegativeY, NegativeZ, PositiveX, PositiveY, PositiveZ};
        match self {
            Self::NearBottomLeft => [NegativeX, NegativeY, NegativeZ],
            Self::NearBottomRight => [PositiveX, NegativeY, NegativeZ],
            Self::NearTopRight => [PositiveX, PositiveY, NegativeZ],
            Self::NearTopLeft => [NegativeX, PositiveY, NegativeZ],
            Self::FarBottomRight => [PositiveX, NegativeY, PositiveZ],
            Self::FarBottomLeft => [NegativeX, NegativeY, PositiveZ],
            Self::FarTopLeft => [NegativeX, PositiveY, PositiveZ],
            Self::FarTopRight => [PositiveX, PositiveY, PositiveZ],
        }
    }
}

impl PlaneMask {
    pub const fn contains_plane(self, plane: FrustumPlane) -> bool {
        self.contains(plane.mask())
    }
}

impl FrustumIntersection {
    /// Extracts and caches the frustum planes of the given matrix.
    pub fn new(matrix: &Matrix4) -> Self {
        let planes = matrix.frustum_planes();
        Self {
            planes,
            positive_vertex_corners: planes
                .map(|plane| Self::determine_positive_vertex_corner_index_for_plane(&plane)),
        }
    }

    /// Replaces the cached planes with those of the given matrix.
    pub fn set(&mut self, matrix: &Matrix4) {
        *self = Self::new(matrix);
    }

    pub fn planes(&self) -> &[Vector4; 6] {
        &self.planes
    }

    pub fn plane(&self, plane: FrustumPlane) -> &Vector4 {
        &self.planes[plane.index()]
    }

    /// Whether the point lies inside the frustum or on its boundary.
    pub fn test_point(&self, point: &Vector3) -> bool {
        self.planes
            .iter()
            .all(|plane| signed_distance(plane, point) >= 0.0)
    }

    /// Whether any part of the given sphere could be inside the frustum.
    ///
    /// May return `true` for a sphere just outside a corner or edge of the
    /// frustum, but never returns `false` for a sphere with any part inside.
    pub fn test_sphere(&self, center: &Vector3, radius: f64) -> bool {
        self.planes
            .iter()
            .all(|plane| signed_distance(plane, center) >= -radius)
    }

    /// Whether any part of the axis-aligned box with the given minimum and
    /// maximum corners could be inside the frustum.
    ///
    /// May return `true` for a box just outside a corner or edge of the
    /// frustum, but never returns `false` for a box with any part inside.
    pub fn test_aab(&self, min: &Vector3, max: &Vector3) -> bool {
        self.planes
            .iter()
            .zip(self.positive_vertex_corners)
            .all(|(plane, corner)| signed_distance(plane, &aab_corner(min, max, corner)) >= 0.0)
    }

    /// Classifies the given sphere against the frustum. A sphere reported as
    /// [`Intersection::Intersect`] may in fact lie outside near a corner.
    pub fn intersect_sphere(&self, center: &Vector3, radius: f64) -> Intersection {
        let mut inside = true;
        for (plane, coefficients) in FrustumPlane::ALL.into_iter().zip(&self.planes) {
            let distance = signed_distance(coefficients, center);
            if distance < -radius {
                return Intersection::Outside(plane);
            }
            inside &= distance >= radius;
        }
        if inside {
            Intersection::Inside
        } else {
            Intersection::Intersect
        }
    }

    /// Classifies the axis-aligned box with the given minimum and maximum
    /// corners against the frustum. A box reported as
    /// [`Intersection::Intersect`] may in fact lie outside near a corner.
    pub fn intersect_aab(&self, min: &Vector3, max: &Vector3) -> Intersection {
        self.intersect_aab_masked(min, max, PlaneMask::all())
    }

    /// Like [`Self::intersect_aab`], but only tests the planes in `mask`.
    /// Planes left out of the mask are treated as if the box were fully on
    /// their inner side, which lets a caller skip planes that a parent
    /// volume is already known to be inside of.
    pub fn intersect_aab_masked(&self, min: &Vector3, max: &Vector3, mask: PlaneMask) -> Intersection {
        let mut inside = true;
        for plane in FrustumPlane::ALL {
            if !mask.contains_plane(plane) {
                continue;
            }
            let coefficients = &self.planes[plane.index()];
            let positive_corner = self.positive_vertex_corners[plane.index()];

            if signed_distance(coefficients, &aab_corner(min, max, positive_corner)) < 0.0 {
                return Intersection::Outside(plane);
            }
            // The opposite corner has the smallest signed distance
            inside &= signed_distance(coefficients, &aab_corner(min, max, 7 - positive_corner)) >= 0.0;
        }
        if inside {
            Intersection::Inside
        } else {
            Intersection::Intersect
        }
    }

    /// Determines the index of the corner of any axis-aligned box that lies
    /// furthest along the normal of the given plane. Bit 2, 1 and 0 of the
    /// index select the maximum x-, y- and z-coordinate respectively.
    fn determine_positive_vertex_corner_index_for_plane(plane: &Vector4) -> usize {
        match (
            plane.x().is_sign_negative(),
            plane.y().is_sign_negative(),
            plane.z().is_sign_negative(),
        ) {
            (true, true, true) => 0,
            (true, true, false) => 1,
            (true, false, true) => 2,
            (true, false, false) => 3,
            (false, true, true) => 4,
            (false, true, false) => 5,
            (false, false, true) => 6,
            (false, false, false) => 7,
        }
    }
}

impl From<&Matrix4> for FrustumIntersection {
    fn from(matrix: &Matrix4) -> Self {
        Self::new(matrix)
    }
}

impl AbsDiffEq for FrustumIntersection {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.planes
            .iter()
            .zip(&other.planes)
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for FrustumIntersection {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.planes
            .iter()
            .zip(&other.planes)
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

fn signed_distance(plane: &Vector4, point: &Vector3) -> f64 {
    plane.xyz().dot(point) + plane.w()
}

fn aab_corner(min: &Vector3, max: &Vector3, index: usize) -> Vector3 {
    Vector3::new(
        if index & 0b100 == 0 { min.x() } else { max.x() },
        if index & 0b010 == 0 { min.y() } else { max.y() },
        if index & 0b001 == 0 { min.z() } else { max.z() },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{angle::Degrees, DepthRange, Handedness};
    use proptest::prelude::*;

    fn camera_frustum() -> FrustumIntersection {
        FrustumIntersection::new(&Matrix4::perspective(
            Degrees(90.0),
            1.0,
            1.0,
            10.0,
            Handedness::Right,
            DepthRange::NegativeOneToOne,
        ))
    }

    #[test]
    fn plane_masks_correspond_to_plane_order() {
        for (index, plane) in FrustumPlane::ALL.into_iter().enumerate() {
            assert_eq!(plane.index(), index);
            assert_eq!(plane.mask().bits(), 1 << index);
        }
        assert_eq!(
            FrustumPlane::ALL
                .into_iter()
                .fold(PlaneMask::empty(), |mask, plane| mask | plane.mask()),
            PlaneMask::all()
        );
    }

    #[test]
    fn corners_of_aab_are_indexed_by_bits() {
        let min = Vector3::new(-1.0, -2.0, -3.0);
        let max = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(aab_corner(&min, &max, 0), min);
        assert_eq!(aab_corner(&min, &max, 7), max);
        assert_eq!(aab_corner(&min, &max, 0b100), Vector3::new(1.0, -2.0, -3.0));
        assert_eq!(aab_corner(&min, &max, 0b001), Vector3::new(-1.0, -2.0, 3.0));
    }

    #[test]
    fn sphere_in_front_of_camera_is_inside() {
        let frustum = camera_frustum();
        let center = Vector3::new(0.0, 0.0, -5.0);
        assert!(frustum.test_sphere(&center, 1.0));
        assert_eq!(frustum.intersect_sphere(&center, 1.0), Intersection::Inside);
    }

    #[test]
    fn sphere_straddling_near_plane_intersects() {
        let frustum = camera_frustum();
        assert_eq!(
            frustum.intersect_sphere(&Vector3::new(0.0, 0.0, -1.0), 0.5),
            Intersection::Intersect
        );
    }

    #[test]
    fn sphere_behind_camera_is_outside_near_plane() {
        let frustum = camera_frustum();
        let center = Vector3::new(0.0, 0.0, 3.0);
        assert!(!frustum.test_sphere(&center, 1.0));
        assert_eq!(
            frustum.intersect_sphere(&center, 1.0),
            Intersection::Outside(FrustumPlane::NegativeZ)
        );
    }

    #[test]
    fn box_beyond_far_plane_is_outside_far_plane() {
        let frustum = camera_frustum();
        let (min, max) = (Vector3::new(-1.0, -1.0, -20.0), Vector3::new(1.0, 1.0, -11.0));
        assert!(!frustum.test_aab(&min, &max));
        assert_eq!(
            frustum.intersect_aab(&min, &max),
            Intersection::Outside(FrustumPlane::PositiveZ)
        );
    }

    #[test]
    fn box_to_the_side_is_outside_side_plane() {
        let frustum = camera_frustum();
        let (min, max) = (Vector3::new(6.0, -1.0, -5.0), Vector3::new(7.0, 1.0, -4.0));
        assert_eq!(
            frustum.intersect_aab(&min, &max),
            Intersection::Outside(FrustumPlane::PositiveX)
        );
    }

    #[test]
    fn box_containing_frustum_intersects() {
        let frustum = camera_frustum();
        let (min, max) = (Vector3::same(-100.0), Vector3::same(100.0));
        assert!(frustum.test_aab(&min, &max));
        assert_eq!(frustum.intersect_aab(&min, &max), Intersection::Intersect);
    }

    #[test]
    fn masked_out_planes_are_not_tested() {
        let frustum = camera_frustum();
        let (min, max) = (Vector3::new(-1.0, -1.0, -20.0), Vector3::new(1.0, 1.0, -11.0));
        let mask = PlaneMask::all() - FrustumPlane::PositiveZ.mask();
        assert_eq!(
            frustum.intersect_aab_masked(&min, &max, mask),
            Intersection::Inside
        );
        assert_eq!(
            frustum.intersect_aab_masked(&min, &max, PlaneMask::empty()),
            Intersection::Inside
        );
    }

    #[test]
    fn cached_planes_match_matrix_planes() {
        let matrix = Matrix4::perspective(
            Degrees(50.0),
            1.5,
            0.1,
            50.0,
            Handedness::Left,
            DepthRange::NegativeOneToOne,
        );
        let mut frustum = camera_frustum();
        frustum.set(&matrix);
        for plane in FrustumPlane::ALL {
            assert_eq!(*frustum.plane(plane), matrix.frustum_plane(plane));
        }
        assert_eq!(frustum, FrustumIntersection::from(&matrix));
    }

    proptest! {
        #[test]
        fn sphere_classification_agrees_with_sphere_test(
            x in -12.0..12.0_f64,
            y in -12.0..12.0_f64,
            z in -15.0..5.0_f64,
            radius in 0.0..3.0_f64,
        ) {
            let frustum = camera_frustum();
            let center = Vector3::new(x, y, z);
            let outside = matches!(frustum.intersect_sphere(&center, radius), Intersection::Outside(_));
            prop_assert_eq!(outside, !frustum.test_sphere(&center, radius));
        }

        #[test]
        fn box_containing_inside_point_is_never_culled(
            x in -12.0..12.0_f64,
            y in -12.0..12.0_f64,
            z in -15.0..5.0_f64,
            half_extent in 0.0..2.0_f64,
        ) {
            let frustum = camera_frustum();
            let point = Vector3::new(x, y, z);
            let (min, max) = (point - Vector3::same(half_extent), point + Vector3::same(half_extent));
            if frustum.test_point(&point) {
                prop_assert!(frustum.test_aab(&min, &max));
                prop_assert!(!matches!(frustum.intersect_aab(&min, &max), Intersection::Outside(_)));
            }
            if matches!(frustum.intersect_aab(&min, &max), Intersection::Inside) {
                prop_assert!(frustum.test_point(&point));
            }
        }
    }
}
