#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![no_std]

//! Streaming simplification of straight line segments for 2D path
//! rendering pipelines.
//!
//! When a path is flattened into line segments before being handed to a
//! scanline rasterizer or a stroker, long runs of collinear (or almost
//! collinear) segments are common, for example along the flattened sides
//! of a polygon or the output of a coarse curve approximation. This crate
//! merges those runs so that downstream consumers see fewer segments,
//! without changing the rendered output beyond a small slope tolerance.
//!
//! # Two interfaces, one algorithm
//!
//! - [`CollinearFilter`](filter/struct.CollinearFilter.html) sits between a
//!   path producer and a [`PathSink`](sink/trait.PathSink.html), observing
//!   begin/line/curve/close/end events and forwarding a reduced stream.
//! - [`SegmentAccumulator`](accumulator/struct.SegmentAccumulator.html) is
//!   fed discrete segments by the caller and hands completed, simplified
//!   segments back one at a time.
//!
//! Both apply the same collinearity test: segments are classified by their
//! inverse slope (x change per unit y, the natural orientation for a
//! scanline consumer) and merged when consecutive slopes are within
//! [`SLOPE_EPSILON`](segment/constant.SLOPE_EPSILON.html).
//!
//! # Examples
//!
//! Filtering a pushed event stream:
//!
//! ```
//! use collinear::filter::CollinearFilter;
//! use collinear::math::point;
//! use collinear::sink::{EventSink, PathSink};
//!
//! let mut filter = CollinearFilter::new(EventSink::new());
//!
//! filter.begin(point(0.0, 0.0));
//! filter.line_to(point(0.0, 1.0));
//! filter.line_to(point(0.0, 2.0));
//! filter.line_to(point(5.0, 2.0));
//! filter.end();
//!
//! // The vertical run collapsed into a single segment: the sink saw
//! // begin, two lines and the end event.
//! assert_eq!(filter.sink().events().len(), 4);
//! ```
//!
//! Pulling from an accumulator:
//!
//! ```
//! use collinear::accumulator::SegmentAccumulator;
//! use collinear::math::point;
//!
//! let mut acc = SegmentAccumulator::new();
//!
//! assert!(!acc.add_segment(point(0.0, 0.0), point(0.0, 1.0)));
//! assert!(!acc.add_segment(point(0.0, 1.0), point(0.0, 2.0)));
//! assert!(acc.add_segment(point(0.0, 2.0), point(5.0, 2.0)));
//! assert_eq!(acc.segment().from, point(0.0, 0.0));
//! assert_eq!(acc.segment().to, point(0.0, 2.0));
//!
//! assert!(acc.flush());
//! assert_eq!(acc.segment().to, point(5.0, 2.0));
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod accumulator;
pub mod filter;
pub mod options;
pub mod pool;
pub mod segment;
pub mod sink;

#[doc(inline)]
pub use crate::accumulator::SegmentAccumulator;
#[doc(inline)]
pub use crate::filter::CollinearFilter;
#[doc(inline)]
pub use crate::options::PipelineOptions;
#[doc(inline)]
pub use crate::segment::{Segment, SLOPE_EPSILON};
#[doc(inline)]
pub use crate::sink::{NativeHandle, PathSink};

pub mod math {
    //! f32 versions of the euclid types used everywhere in this crate.

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }
}
