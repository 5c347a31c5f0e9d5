//! A push filter that merges collinear line segments out of a command
//! stream.

use crate::math::Point;
use crate::segment::{nearly_equal, slope};
use crate::sink::{NativeHandle, PathSink};

#[derive(Copy, Clone, Debug, PartialEq)]
enum State {
    /// Nothing buffered.
    Empty,
    /// One anchor point buffered, no direction known yet.
    Anchor { at: Point },
    /// One candidate segment buffered, awaiting extension or emission.
    Pending { from: Point, to: Point, slope: f32 },
}

/// Forwards a reduced command stream to the sink it wraps.
///
/// The filter buffers at most one candidate line segment. As long as
/// incoming `line_to` commands keep extending the buffered segment in
/// (nearly) the same direction, the segment's end point is pushed further
/// and nothing reaches the sink; the first command that breaks the run
/// causes the buffered segment to be emitted. Curves, sub-path boundaries
/// and the end of the path always flush the buffer, so only runs of
/// consecutive lines are ever merged.
///
/// The merge is greedy with a single segment of lookback: the slope of a
/// run is fixed by its first segment and each continuation is compared
/// against it, which keeps the filter O(1) in space but does not guarantee
/// a minimal segment count.
pub struct CollinearFilter<Sink> {
    sink: Sink,
    state: State,
}

impl<Sink: PathSink> CollinearFilter<Sink> {
    pub fn new(sink: Sink) -> Self {
        CollinearFilter {
            sink,
            state: State::Empty,
        }
    }

    /// The wrapped sink.
    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut Sink {
        &mut self.sink
    }

    pub fn into_sink(self) -> Sink {
        self.sink
    }

    /// Discards any buffered segment and returns the filter to its initial
    /// state, without emitting anything.
    ///
    /// Call this when reusing the filter for a new path. Mid-stream, prefer
    /// letting `end` flush the buffer instead, otherwise the tail of the
    /// previous run is lost.
    pub fn reset(&mut self) {
        self.state = State::Empty;
    }

    fn flush(&mut self) {
        if let State::Pending { to, .. } = self.state {
            self.sink.line_to(to);
        }
        self.state = State::Empty;
    }
}

impl<Sink: PathSink> PathSink for CollinearFilter<Sink> {
    fn begin(&mut self, at: Point) {
        self.flush();
        self.sink.begin(at);
        self.state = State::Anchor { at };
    }

    fn line_to(&mut self, to: Point) {
        match self.state {
            State::Empty => {
                // A line with no sub-path in progress. Forward it as a
                // degenerate single-point setup and use it as the anchor.
                self.sink.line_to(to);
                self.state = State::Anchor { at: to };
            }
            State::Anchor { at } => {
                self.state = State::Pending {
                    from: at,
                    to,
                    slope: slope(at, to),
                };
            }
            State::Pending {
                to: pending_to,
                slope: pending_slope,
                ..
            } => {
                let next_slope = slope(pending_to, to);
                if nearly_equal(next_slope, pending_slope) {
                    // Extend the buffered segment. The run keeps the slope
                    // of its first segment; it is not recomputed over the
                    // extended span.
                    if let State::Pending { to: end, .. } = &mut self.state {
                        *end = to;
                    }
                } else {
                    self.sink.line_to(pending_to);
                    self.state = State::Pending {
                        from: pending_to,
                        to,
                        slope: next_slope,
                    };
                }
            }
        }
    }

    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.flush();
        self.sink.quadratic_bezier_to(ctrl, to);
    }

    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.flush();
        self.sink.cubic_bezier_to(ctrl1, ctrl2, to);
    }

    fn close(&mut self) {
        self.flush();
        self.sink.close();
    }

    fn end(&mut self) {
        self.flush();
        self.sink.end();
    }

    fn native_consumer(&self) -> Option<NativeHandle> {
        self.sink.native_consumer()
    }
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::sink::{EventSink, SinkEvent};

#[cfg(test)]
fn line(x: f32, y: f32) -> SinkEvent {
    SinkEvent::Line { to: point(x, y) }
}

#[test]
fn merges_vertical_run() {
    let mut filter = CollinearFilter::new(EventSink::new());

    filter.begin(point(0.0, 0.0));
    filter.line_to(point(0.0, 1.0));
    filter.line_to(point(0.0, 2.0));
    filter.line_to(point(5.0, 2.0));
    filter.end();

    assert_eq!(
        filter.sink().events(),
        &[
            SinkEvent::Begin {
                at: point(0.0, 0.0)
            },
            line(0.0, 2.0),
            line(5.0, 2.0),
            SinkEvent::End,
        ]
    );
}

#[test]
fn already_simplified_stream_is_unchanged() {
    let mut filter = CollinearFilter::new(EventSink::new());

    filter.begin(point(0.0, 0.0));
    filter.line_to(point(1.0, 0.0));
    filter.line_to(point(1.0, 1.0));
    filter.line_to(point(0.0, 1.0));
    filter.close();
    filter.end();

    assert_eq!(
        filter.sink().events(),
        &[
            SinkEvent::Begin {
                at: point(0.0, 0.0)
            },
            line(1.0, 0.0),
            line(1.0, 1.0),
            line(0.0, 1.0),
            SinkEvent::Close,
            SinkEvent::End,
        ]
    );
}

#[test]
fn horizontal_runs_merge_only_in_the_same_direction() {
    let mut filter = CollinearFilter::new(EventSink::new());

    filter.begin(point(0.0, 0.0));
    filter.line_to(point(1.0, 0.0));
    filter.line_to(point(2.0, 0.0));
    // Direction reversal: opposite infinities must not merge.
    filter.line_to(point(-1.0, 0.0));
    filter.end();

    assert_eq!(
        filter.sink().events(),
        &[
            SinkEvent::Begin {
                at: point(0.0, 0.0)
            },
            line(2.0, 0.0),
            line(-1.0, 0.0),
            SinkEvent::End,
        ]
    );
}

#[test]
fn curves_flush_the_pending_segment() {
    let mut filter = CollinearFilter::new(EventSink::new());

    filter.begin(point(0.0, 0.0));
    filter.line_to(point(0.0, 1.0));
    filter.line_to(point(0.0, 2.0));
    filter.cubic_bezier_to(point(1.0, 3.0), point(2.0, 3.0), point(3.0, 2.0));
    filter.line_to(point(3.0, 3.0));
    filter.end();

    assert_eq!(
        filter.sink().events(),
        &[
            SinkEvent::Begin {
                at: point(0.0, 0.0)
            },
            line(0.0, 2.0),
            SinkEvent::Cubic {
                ctrl1: point(1.0, 3.0),
                ctrl2: point(2.0, 3.0),
                to: point(3.0, 2.0)
            },
            line(3.0, 3.0),
            SinkEvent::End,
        ]
    );
}

#[test]
fn quadratic_curves_flush_too() {
    let mut filter = CollinearFilter::new(EventSink::new());

    filter.begin(point(0.0, 0.0));
    filter.line_to(point(0.0, 1.0));
    filter.line_to(point(0.0, 2.0));
    filter.quadratic_bezier_to(point(1.0, 3.0), point(2.0, 2.0));
    filter.end();

    assert_eq!(
        filter.sink().events(),
        &[
            SinkEvent::Begin {
                at: point(0.0, 0.0)
            },
            line(0.0, 2.0),
            SinkEvent::Quadratic {
                ctrl: point(1.0, 3.0),
                to: point(2.0, 2.0)
            },
            SinkEvent::End,
        ]
    );
}

#[test]
fn begin_flushes_the_previous_sub_path() {
    let mut filter = CollinearFilter::new(EventSink::new());

    filter.begin(point(0.0, 0.0));
    filter.line_to(point(0.0, 1.0));
    filter.line_to(point(0.0, 2.0));
    filter.begin(point(10.0, 0.0));
    filter.line_to(point(11.0, 0.0));
    filter.end();

    assert_eq!(
        filter.sink().events(),
        &[
            SinkEvent::Begin {
                at: point(0.0, 0.0)
            },
            line(0.0, 2.0),
            SinkEvent::Begin {
                at: point(10.0, 0.0)
            },
            line(11.0, 0.0),
            SinkEvent::End,
        ]
    );
}

#[test]
fn line_without_begin_is_forwarded_immediately() {
    let mut filter = CollinearFilter::new(EventSink::new());

    // Callers should begin a sub-path first, but the filter must cope.
    filter.line_to(point(1.0, 1.0));
    filter.line_to(point(2.0, 2.0));
    filter.line_to(point(3.0, 3.0));
    filter.end();

    // The stray first line becomes the anchor, the rest merges normally.
    assert_eq!(
        filter.sink().events(),
        &[line(1.0, 1.0), line(3.0, 3.0), SinkEvent::End]
    );
}

#[test]
fn run_slope_is_fixed_by_its_first_segment() {
    // Each step tilts a little further, but stays within tolerance of the
    // run's first slope, so the whole drift merges. The comparison is
    // always against the first segment of the run, never the accumulated
    // chord.
    let mut filter = CollinearFilter::new(EventSink::new());

    filter.begin(point(0.0, 0.0));
    filter.line_to(point(0.0, 1.0));
    filter.line_to(point(0.0008, 2.0));
    filter.line_to(point(0.0024, 4.0));
    filter.end();

    assert_eq!(
        filter.sink().events(),
        &[
            SinkEvent::Begin {
                at: point(0.0, 0.0)
            },
            line(0.0024, 4.0),
            SinkEvent::End,
        ]
    );
}

#[test]
fn reset_discards_the_buffer() {
    let mut filter = CollinearFilter::new(EventSink::new());

    filter.begin(point(0.0, 0.0));
    filter.line_to(point(0.0, 1.0));
    filter.line_to(point(0.0, 2.0));
    filter.reset();
    filter.end();

    // The buffered run is gone, only begin and end went through.
    assert_eq!(
        filter.sink().events(),
        &[
            SinkEvent::Begin {
                at: point(0.0, 0.0)
            },
            SinkEvent::End,
        ]
    );
}

#[test]
fn native_consumer_passes_through() {
    struct NativeSink;
    impl PathSink for NativeSink {
        fn begin(&mut self, _: Point) {}
        fn line_to(&mut self, _: Point) {}
        fn quadratic_bezier_to(&mut self, _: Point, _: Point) {}
        fn cubic_bezier_to(&mut self, _: Point, _: Point, _: Point) {}
        fn close(&mut self) {}
        fn end(&mut self) {}
        fn native_consumer(&self) -> Option<NativeHandle> {
            Some(NativeHandle(0xC0FFEE))
        }
    }

    let filter = CollinearFilter::new(NativeSink);
    assert_eq!(filter.native_consumer(), Some(NativeHandle(0xC0FFEE)));

    let filter = CollinearFilter::new(EventSink::new());
    assert_eq!(filter.native_consumer(), None);
}

#[test]
fn emitted_vertices_are_a_subsequence_of_the_input() {
    use alloc::vec::Vec;

    let input = [
        point(0.0, 0.0),
        point(1.0, 1.0),
        point(2.0, 2.0),
        point(3.0, 3.1),
        point(3.0, 4.0),
        point(3.0, 5.0),
        point(4.0, 5.0),
        point(6.0, 5.0),
        point(7.0, 4.0),
    ];

    let mut filter = CollinearFilter::new(EventSink::new());
    filter.begin(input[0]);
    for p in &input[1..] {
        filter.line_to(*p);
    }
    filter.end();

    let mut emitted = Vec::new();
    for evt in filter.sink().events() {
        match evt {
            SinkEvent::Begin { at } => emitted.push(*at),
            SinkEvent::Line { to } => emitted.push(*to),
            _ => {}
        }
    }

    // No new geometry is invented: every emitted vertex is an input
    // vertex, in order, and the endpoints survive.
    let mut input_iter = input.iter();
    for v in &emitted {
        assert!(input_iter.any(|p| p == v), "unexpected vertex {v:?}");
    }
    assert_eq!(emitted.first(), Some(&input[0]));
    assert_eq!(emitted.last(), Some(&input[input.len() - 1]));
}
