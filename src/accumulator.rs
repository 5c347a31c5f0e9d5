//! A pull-style accumulator that merges collinear line segments.

use crate::math::Point;
use crate::segment::{nearly_equal, Segment};

/// Merges runs of collinear segments fed one at a time by the caller.
///
/// Unlike [`CollinearFilter`](../filter/struct.CollinearFilter.html), the
/// accumulator forwards nothing on its own: each call to
/// [`add_segment`](#method.add_segment) reports whether a completed segment
/// became available, and the caller retrieves it with
/// [`segment`](#method.segment). After the last input,
/// [`flush`](#method.flush) must be called to retrieve the final pending
/// segment; the accumulator never releases it by itself.
///
/// At most one segment is buffered at any time. A new segment extends the
/// buffered one when it starts at the buffered end point and its slope is
/// within tolerance of the buffered slope; merging moves only the buffered
/// end point, the start point and the slope stay fixed at the values of the
/// run's first segment.
///
/// ```
/// use collinear::accumulator::SegmentAccumulator;
/// use collinear::math::point;
///
/// let mut acc = SegmentAccumulator::new();
/// let mut output = std::vec::Vec::new();
///
/// let polyline = [
///     (point(0.0, 0.0), point(1.0, 1.0)),
///     (point(1.0, 1.0), point(3.0, 3.0)),
///     (point(3.0, 3.0), point(3.0, 5.0)),
/// ];
/// for &(from, to) in &polyline {
///     if acc.add_segment(from, to) {
///         output.push(acc.segment());
///     }
/// }
/// if acc.flush() {
///     output.push(acc.segment());
/// }
///
/// assert_eq!(output.len(), 2);
/// assert_eq!(output[0].to, point(3.0, 3.0));
/// ```
#[derive(Clone, Debug)]
pub struct SegmentAccumulator {
    has_pending: bool,
    pending: Segment,
    pending_slope: f32,
    exposed: Segment,
}

impl SegmentAccumulator {
    pub fn new() -> Self {
        let zero = Segment::new(Point::zero(), Point::zero());
        SegmentAccumulator {
            has_pending: false,
            pending: zero,
            pending_slope: 0.0,
            exposed: zero,
        }
    }

    /// Feeds one segment and returns whether a completed segment is now
    /// available from [`segment`](#method.segment).
    ///
    /// The first segment ever fed always returns false: it becomes the
    /// pending segment and there is nothing to hand out yet. A zero-length
    /// segment arriving as a continuation of the pending segment is
    /// discarded without touching any state.
    pub fn add_segment(&mut self, from: Point, to: Point) -> bool {
        let seg = Segment::new(from, to);
        let seg_slope;
        if self.has_pending && self.pending.to == from {
            if seg.is_zero_length() {
                // Nothing to establish a direction with.
                return false;
            }

            seg_slope = seg.slope();
            if nearly_equal(seg_slope, self.pending_slope) {
                self.pending.to = to;
                return false;
            }
        } else {
            seg_slope = seg.slope();
        }

        // The segment could not be merged; it takes the pending slot and
        // whatever was there before is handed to the caller.
        if self.has_pending {
            self.exposed = self.pending;
        }
        self.pending = seg;
        self.pending_slope = seg_slope;

        if !self.has_pending {
            self.has_pending = true;
            return false;
        }

        true
    }

    /// Releases the pending segment, if any.
    ///
    /// Returns whether a segment was made available from
    /// [`segment`](#method.segment). Callers must invoke this once after
    /// the last `add_segment` or the final run of the polyline is lost.
    pub fn flush(&mut self) -> bool {
        if self.has_pending {
            self.exposed = self.pending;
            self.has_pending = false;

            return true;
        }

        false
    }

    /// The most recently completed segment.
    ///
    /// Only meaningful immediately after `add_segment` or `flush` returned
    /// true; at any other time this returns stale data.
    #[inline]
    pub fn segment(&self) -> Segment {
        self.exposed
    }

    /// Drops any pending segment and starts over, as if freshly created.
    pub fn reset(&mut self) {
        self.has_pending = false;
    }
}

impl Default for SegmentAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn vertical_run_then_turn() {
    let mut acc = SegmentAccumulator::new();

    // First segment: pending, nothing exposed yet.
    assert!(!acc.add_segment(point(0.0, 0.0), point(0.0, 1.0)));
    // Collinear continuation: merged into the pending segment.
    assert!(!acc.add_segment(point(0.0, 1.0), point(0.0, 2.0)));
    // The turn completes the vertical run.
    assert!(acc.add_segment(point(0.0, 2.0), point(5.0, 2.0)));
    assert_eq!(acc.segment(), Segment::new(point(0.0, 0.0), point(0.0, 2.0)));

    assert!(acc.flush());
    assert_eq!(acc.segment(), Segment::new(point(0.0, 2.0), point(5.0, 2.0)));

    // Nothing left.
    assert!(!acc.flush());
}

#[test]
fn first_segment_is_only_exposed_by_flush() {
    let mut acc = SegmentAccumulator::new();

    assert!(!acc.add_segment(point(1.0, 1.0), point(4.0, 2.0)));
    assert!(acc.flush());
    assert_eq!(acc.segment(), Segment::new(point(1.0, 1.0), point(4.0, 2.0)));
}

#[test]
fn zero_length_continuation_is_discarded() {
    let mut acc = SegmentAccumulator::new();

    assert!(!acc.add_segment(point(0.0, 0.0), point(0.0, 1.0)));
    assert!(!acc.add_segment(point(0.0, 1.0), point(0.0, 1.0)));

    // The pending segment is untouched.
    assert!(acc.flush());
    assert_eq!(acc.segment(), Segment::new(point(0.0, 0.0), point(0.0, 1.0)));
}

#[test]
fn zero_length_elsewhere_is_not_discarded() {
    let mut acc = SegmentAccumulator::new();

    assert!(!acc.add_segment(point(0.0, 0.0), point(0.0, 1.0)));
    // A zero-length segment that is not a continuation of the pending one
    // goes through the regular replacement path.
    assert!(acc.add_segment(point(3.0, 3.0), point(3.0, 3.0)));
    assert_eq!(acc.segment(), Segment::new(point(0.0, 0.0), point(0.0, 1.0)));

    assert!(acc.flush());
    assert_eq!(acc.segment(), Segment::new(point(3.0, 3.0), point(3.0, 3.0)));
}

#[test]
fn horizontal_merge_depends_on_direction() {
    let mut acc = SegmentAccumulator::new();

    assert!(!acc.add_segment(point(0.0, 0.0), point(1.0, 0.0)));
    // Same direction: merged.
    assert!(!acc.add_segment(point(1.0, 0.0), point(2.0, 0.0)));
    // Opposite direction: opposite infinities never merge.
    assert!(acc.add_segment(point(2.0, 0.0), point(0.0, 0.0)));
    assert_eq!(acc.segment(), Segment::new(point(0.0, 0.0), point(2.0, 0.0)));

    assert!(acc.flush());
    assert_eq!(acc.segment(), Segment::new(point(2.0, 0.0), point(0.0, 0.0)));
}

#[test]
fn non_contiguous_segments_are_never_merged() {
    let mut acc = SegmentAccumulator::new();

    assert!(!acc.add_segment(point(0.0, 0.0), point(0.0, 1.0)));
    // Collinear but not a continuation (it does not start at the pending
    // end point), so the pending segment completes as-is.
    assert!(acc.add_segment(point(0.0, 5.0), point(0.0, 6.0)));
    assert_eq!(acc.segment(), Segment::new(point(0.0, 0.0), point(0.0, 1.0)));
}

#[test]
fn already_simplified_input_is_reproduced() {
    let input = [
        (point(0.0, 0.0), point(1.0, 0.0)),
        (point(1.0, 0.0), point(1.0, 1.0)),
        (point(1.0, 1.0), point(0.0, 1.0)),
    ];

    let mut acc = SegmentAccumulator::new();
    let mut output = alloc::vec::Vec::new();
    for &(from, to) in &input {
        if acc.add_segment(from, to) {
            output.push(acc.segment());
        }
    }
    if acc.flush() {
        output.push(acc.segment());
    }

    assert_eq!(output.len(), input.len());
    for (seg, &(from, to)) in output.iter().zip(&input) {
        assert_eq!(*seg, Segment::new(from, to));
    }
}

#[test]
fn flush_exposes_the_merged_end_point() {
    let mut acc = SegmentAccumulator::new();

    for i in 0..10 {
        let y0 = i as f32;
        acc.add_segment(point(2.0, y0), point(2.0, y0 + 1.0));
    }

    assert!(acc.flush());
    assert_eq!(acc.segment(), Segment::new(point(2.0, 0.0), point(2.0, 10.0)));
}

#[test]
fn nan_input_never_merges() {
    let mut acc = SegmentAccumulator::new();

    assert!(!acc.add_segment(point(0.0, 0.0), point(0.0, 1.0)));
    // NaN slope is not nearly equal to anything, including itself.
    assert!(acc.add_segment(point(0.0, 1.0), point(f32::NAN, 2.0)));
    assert_eq!(acc.segment(), Segment::new(point(0.0, 0.0), point(0.0, 1.0)));
}

#[test]
fn reset_discards_pending_state() {
    let mut acc = SegmentAccumulator::new();

    assert!(!acc.add_segment(point(0.0, 0.0), point(0.0, 1.0)));
    acc.reset();

    assert!(!acc.flush());
    // Behaves like a fresh accumulator again.
    assert!(!acc.add_segment(point(7.0, 7.0), point(8.0, 8.0)));
    assert!(acc.flush());
    assert_eq!(acc.segment(), Segment::new(point(7.0, 7.0), point(8.0, 8.0)));
}
