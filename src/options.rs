//! Process-wide tuning options for the surrounding pipeline.

/// Tuning knobs read once when a rendering pipeline starts up.
///
/// These configure the collaborators around the simplification engines
/// (buffer pools, diagnostics); the engines themselves take no
/// configuration beyond the fixed
/// [`SLOPE_EPSILON`](../segment/constant.SLOPE_EPSILON.html).
///
/// Default values: `PipelineOptions::DEFAULT`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PipelineOptions {
    /// Whether pools and other collaborators count their operations.
    ///
    /// Default value: `false`.
    pub enable_stats: bool,

    /// Whether internal consistency checks run, for example verifying the
    /// zero-fill invariant of released buffers.
    ///
    /// Checks never fail the pipeline; detected anomalies are logged and
    /// repaired in place.
    ///
    /// Default value: `false`.
    pub enable_checks: bool,

    /// Whether diagnostic logging is emitted (debug builds only).
    ///
    /// Default value: `false`.
    pub log: bool,

    /// Initial element count of the medium coordinate buffers.
    ///
    /// Default value: `PipelineOptions::DEFAULT_BUFFER_SIZE`.
    pub initial_buffer_size: usize,

    /// Initial element count of the large edge buffers.
    ///
    /// Default value: `PipelineOptions::DEFAULT_EDGE_BUFFER_SIZE`.
    pub initial_edge_buffer_size: usize,
}

impl PipelineOptions {
    /// Large enough to avoid resizing for the vast majority of paths.
    pub const DEFAULT_BUFFER_SIZE: usize = 4096;
    /// Large enough to avoid resizing for the vast majority of edge sets.
    pub const DEFAULT_EDGE_BUFFER_SIZE: usize = 8192;

    pub const DEFAULT: Self = PipelineOptions {
        enable_stats: false,
        enable_checks: false,
        log: false,
        initial_buffer_size: Self::DEFAULT_BUFFER_SIZE,
        initial_edge_buffer_size: Self::DEFAULT_EDGE_BUFFER_SIZE,
    };

    #[inline]
    pub fn with_stats(mut self, enable: bool) -> Self {
        self.enable_stats = enable;
        self
    }

    #[inline]
    pub fn with_checks(mut self, enable: bool) -> Self {
        self.enable_checks = enable;
        self
    }

    #[inline]
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.log = enable;
        self
    }

    #[inline]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.initial_buffer_size = size;
        self
    }

    #[inline]
    pub fn with_edge_buffer_size(mut self, size: usize) -> Self {
        self.initial_edge_buffer_size = size;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn builder_methods_chain() {
    let options = PipelineOptions::DEFAULT
        .with_stats(true)
        .with_checks(true)
        .with_logging(true)
        .with_buffer_size(256)
        .with_edge_buffer_size(512);

    assert!(options.enable_stats);
    assert!(options.enable_checks);
    assert!(options.log);
    assert_eq!(options.initial_buffer_size, 256);
    assert_eq!(options.initial_edge_buffer_size, 512);

    assert_eq!(PipelineOptions::default(), PipelineOptions::DEFAULT);
}
