//! The downstream path consumer interface.
//!
//! A [`PathSink`](trait.PathSink.html) receives a stream of path commands
//! in absolute coordinates: each sub-path starts with `begin`, carries any
//! number of line and bézier segments, optionally ends with `close`, and
//! the whole stream is terminated by a single `end`. The
//! [`CollinearFilter`](../filter/struct.CollinearFilter.html) both consumes
//! and implements this trait, so filters can be freely inserted in front of
//! any sink.

use crate::math::Point;
use alloc::vec::Vec;

/// An opaque handle to a native backend consumer.
///
/// Some pipelines terminate in a native rendering backend; the sink at the
/// end of the chain can expose the backend object through this handle and
/// adapters are required to pass it through unmodified.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NativeHandle(pub u64);

/// Receiver of a stream of path commands.
pub trait PathSink {
    /// Starts a new sub-path at a given position.
    fn begin(&mut self, at: Point);

    /// Adds a line segment to the current sub-path.
    fn line_to(&mut self, to: Point);

    /// Adds a quadratic bézier curve to the current sub-path.
    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point);

    /// Adds a cubic bézier curve to the current sub-path.
    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point);

    /// Closes the current sub-path.
    fn close(&mut self);

    /// Signals that no further commands will follow.
    fn end(&mut self);

    /// The native backend handle of the sink at the end of the chain, if
    /// there is one. Adapters forward this unmodified.
    fn native_consumer(&self) -> Option<NativeHandle> {
        None
    }
}

/// A path command, as recorded by [`EventSink`](struct.EventSink.html).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SinkEvent {
    Begin {
        at: Point,
    },
    Line {
        to: Point,
    },
    Quadratic {
        ctrl: Point,
        to: Point,
    },
    Cubic {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    Close,
    End,
}

/// A sink that records the commands it receives.
///
/// Useful for inspecting a reduced stream, and as the reference sink in
/// tests.
#[derive(Clone, Debug, Default)]
pub struct EventSink {
    events: Vec<SinkEvent>,
}

impl EventSink {
    pub fn new() -> Self {
        EventSink { events: Vec::new() }
    }

    /// The commands received so far, in order.
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn into_events(self) -> Vec<SinkEvent> {
        self.events
    }
}

impl PathSink for EventSink {
    fn begin(&mut self, at: Point) {
        self.events.push(SinkEvent::Begin { at });
    }

    fn line_to(&mut self, to: Point) {
        self.events.push(SinkEvent::Line { to });
    }

    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.events.push(SinkEvent::Quadratic { ctrl, to });
    }

    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.events.push(SinkEvent::Cubic { ctrl1, ctrl2, to });
    }

    fn close(&mut self) {
        self.events.push(SinkEvent::Close);
    }

    fn end(&mut self) {
        self.events.push(SinkEvent::End);
    }
}

#[test]
fn event_sink_records_in_order() {
    use crate::math::point;

    let mut sink = EventSink::new();
    sink.begin(point(0.0, 0.0));
    sink.line_to(point(1.0, 0.0));
    sink.quadratic_bezier_to(point(2.0, 0.0), point(2.0, 1.0));
    sink.close();
    sink.end();

    assert_eq!(
        sink.events(),
        &[
            SinkEvent::Begin {
                at: point(0.0, 0.0)
            },
            SinkEvent::Line {
                to: point(1.0, 0.0)
            },
            SinkEvent::Quadratic {
                ctrl: point(2.0, 0.0),
                to: point(2.0, 1.0)
            },
            SinkEvent::Close,
            SinkEvent::End,
        ]
    );

    assert_eq!(sink.native_consumer(), None);
}
