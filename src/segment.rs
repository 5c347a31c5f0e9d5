//! The segment value type and the shared collinearity test.

use crate::math::Point;

/// Tolerance applied to slope differences when judging near-collinearity.
///
/// The tolerance is expressed in slope units rather than as a distance or
/// an angle, which keeps the test to a subtraction and a comparison. The
/// flip side is that it is direction dependent: because Δx/Δy compresses
/// angle changes near the vertical axis, near-vertical segment pairs get a
/// much more forgiving implicit angular tolerance than near-horizontal
/// ones. This asymmetry is intentional and relied upon by the scanline
/// consumers this crate feeds.
pub const SLOPE_EPSILON: f32 = 1e-3;

/// A straight path element between two endpoints.
///
/// Plain value type, freely copied; a segment has no identity beyond its
/// coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    #[inline]
    pub fn new(from: Point, to: Point) -> Self {
        Segment { from, to }
    }

    /// Whether both endpoints are exactly the same coordinates.
    #[inline]
    pub fn is_zero_length(&self) -> bool {
        self.from == self.to
    }

    /// The inverse slope of this segment (see [`slope`](fn.slope.html)).
    #[inline]
    pub fn slope(&self) -> f32 {
        slope(self.from, self.to)
    }
}

/// Returns the inverse slope Δx/Δy of the segment `from`→`to`.
///
/// Scanline consumers walk the geometry row by row, so segments are
/// classified by how much x changes per unit y rather than by the
/// conventional Δy/Δx. A perfectly vertical segment therefore has slope
/// zero, and a perfectly horizontal one has no finite ratio at all: it is
/// mapped to `f32::INFINITY` or `f32::NEG_INFINITY` depending on its x
/// direction, so that a horizontal segment can only ever be judged
/// collinear with another horizontal segment heading the same way.
#[inline]
pub fn slope(from: Point, to: Point) -> f32 {
    let dy = to.y - from.y;
    if dy == 0.0 {
        if to.x > from.x {
            f32::INFINITY
        } else {
            f32::NEG_INFINITY
        }
    } else {
        (to.x - from.x) / dy
    }
}

/// Whether two slopes are equal or within [`SLOPE_EPSILON`] of each other.
///
/// The exact-equality arm is what makes matching infinities compare equal
/// (their difference is NaN, so the tolerance arm can never see them).
/// Opposite infinities and NaN operands always compare unequal.
///
/// [`SLOPE_EPSILON`]: constant.SLOPE_EPSILON.html
#[inline]
pub fn nearly_equal(a: f32, b: f32) -> bool {
    a == b || num_traits::Float::abs(a - b) < SLOPE_EPSILON
}

#[cfg(test)]
use crate::math::point;

#[test]
fn slope_follows_scanline_orientation() {
    // Vertical movement has slope 0, a diagonal moving one x per y has
    // slope 1.
    assert_eq!(slope(point(0.0, 0.0), point(0.0, 10.0)), 0.0);
    assert_eq!(slope(point(0.0, 0.0), point(2.0, 2.0)), 1.0);
    assert_eq!(slope(point(1.0, 1.0), point(0.0, 3.0)), -0.5);
    assert_eq!(Segment::new(point(0.0, 0.0), point(2.0, 2.0)).slope(), 1.0);
}

#[test]
fn horizontal_slope_sentinels() {
    assert_eq!(slope(point(0.0, 1.0), point(5.0, 1.0)), f32::INFINITY);
    assert_eq!(slope(point(5.0, 1.0), point(0.0, 1.0)), f32::NEG_INFINITY);
    // A zero-length segment degenerates to the negative sentinel.
    assert_eq!(slope(point(2.0, 2.0), point(2.0, 2.0)), f32::NEG_INFINITY);
}

#[test]
fn nearly_equal_tolerance() {
    assert!(nearly_equal(1.0, 1.0));
    assert!(nearly_equal(1.0, 1.0 + 0.9e-3));
    assert!(nearly_equal(1.0 + 0.9e-3, 1.0));
    assert!(!nearly_equal(1.0, 1.0 + 1.1e-3));
    assert!(!nearly_equal(0.0, SLOPE_EPSILON));
}

#[test]
fn nearly_equal_sentinels() {
    assert!(nearly_equal(f32::INFINITY, f32::INFINITY));
    assert!(nearly_equal(f32::NEG_INFINITY, f32::NEG_INFINITY));
    assert!(!nearly_equal(f32::INFINITY, f32::NEG_INFINITY));
    assert!(!nearly_equal(f32::NEG_INFINITY, f32::INFINITY));
    assert!(!nearly_equal(f32::INFINITY, 1e6));
}

#[test]
fn nearly_equal_nan_is_never_collinear() {
    assert!(!nearly_equal(f32::NAN, f32::NAN));
    assert!(!nearly_equal(f32::NAN, 0.0));
    assert!(!nearly_equal(0.0, f32::NAN));
    assert!(!nearly_equal(f32::NAN, f32::INFINITY));
}

#[test]
fn zero_length_segment() {
    let s = Segment::new(point(1.0, 2.0), point(1.0, 2.0));
    assert!(s.is_zero_length());
    let s = Segment::new(point(1.0, 2.0), point(1.0, 2.5));
    assert!(!s.is_zero_length());
}
