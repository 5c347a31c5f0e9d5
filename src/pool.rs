//! A recycling pool for fixed-size coordinate buffers.
//!
//! The edge and crossing tables of a scanline pipeline churn through large
//! `f32` buffers on every path. Rather than allocating fresh buffers each
//! time, a [`CoordBufferPool`](struct.CoordBufferPool.html) hands out
//! zeroed buffers of one configured size and takes them back when the
//! pipeline is done with them.
//!
//! The pool's contract is that every buffer it hands out is entirely
//! zero-filled. Callers uphold it by declaring, on release, how much of the
//! buffer they actually wrote; the pool zeroes that prefix and trusts the
//! rest. When consistency checking is enabled the trust is verified, and a
//! dirty buffer is logged and re-zeroed instead of poisoning the pool.

use crate::options::PipelineOptions;
use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

#[cfg(all(debug_assertions, feature = "std"))]
macro_rules! pool_log {
    ($obj:ident, $fmt:expr) => (
        if $obj.log {
            std::println!($fmt);
        }
    );
    ($obj:ident, $fmt:expr, $($arg:tt)*) => (
        if $obj.log {
            std::println!($fmt, $($arg)*);
        }
    );
}

#[cfg(not(all(debug_assertions, feature = "std")))]
macro_rules! pool_log {
    ($obj:ident, $fmt:expr) => {};
    ($obj:ident, $fmt:expr, $($arg:tt)*) => {};
}

/// Counters kept by the pool when statistics are enabled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PoolStats {
    /// Number of buffers handed out.
    pub acquires: usize,
    /// Number of buffers accepted back.
    pub releases: usize,
    /// Number of acquisitions that missed the cache and allocated.
    pub allocations: usize,
}

/// Recycles `f32` buffers of a single configured size.
pub struct CoordBufferPool {
    buffer_size: usize,
    buffers: VecDeque<Vec<f32>>,
    do_stats: bool,
    do_checks: bool,
    log: bool,
    stats: PoolStats,
}

impl CoordBufferPool {
    /// Creates a pool handing out buffers of `buffer_size` elements.
    pub fn new(buffer_size: usize, options: &PipelineOptions) -> Self {
        CoordBufferPool {
            buffer_size,
            buffers: VecDeque::with_capacity(64),
            do_stats: options.enable_stats,
            do_checks: options.enable_checks,
            log: options.log,
            stats: PoolStats::default(),
        }
    }

    /// The configured buffer size, in elements.
    #[inline]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Number of recycled buffers currently cached.
    #[inline]
    pub fn cached_buffers(&self) -> usize {
        self.buffers.len()
    }

    /// Returns a zero-filled buffer of the configured size.
    pub fn acquire(&mut self) -> Vec<f32> {
        if self.do_stats {
            self.stats.acquires += 1;
        }

        if let Some(buffer) = self.buffers.pop_back() {
            return buffer;
        }

        if self.do_stats {
            self.stats.allocations += 1;
        }

        vec![0.0; self.buffer_size]
    }

    /// Returns a buffer to the pool.
    ///
    /// `used_len` is the length of the prefix the caller may have written
    /// to; it is zero-filled before the buffer is cached. Elements past
    /// `used_len` are expected to still be zero. Buffers whose size does
    /// not match the pool's configured size are dropped instead of cached.
    pub fn release(&mut self, mut buffer: Vec<f32>, used_len: usize) {
        if buffer.len() != self.buffer_size {
            pool_log!(
                self,
                "CoordBufferPool[{}]: dropping buffer of size {}",
                self.buffer_size,
                buffer.len()
            );
            return;
        }

        if self.do_stats {
            self.stats.releases += 1;
        }

        buffer[..used_len].fill(0.0);
        if self.do_checks {
            self.check_zeroed(&mut buffer);
        }

        self.buffers.push_back(buffer);
    }

    /// Verifies the zero-fill invariant over the whole buffer, re-zeroing
    /// it if it was found dirty. Never fails: a dirty buffer is a bug in
    /// the releasing caller, and the pool heals it locally.
    fn check_zeroed(&self, buffer: &mut [f32]) {
        for i in 0..buffer.len() {
            if buffer[i] != 0.0 {
                pool_log!(
                    self,
                    "CoordBufferPool[{}]: released buffer not zero-filled at index {}",
                    self.buffer_size,
                    i
                );
                buffer.fill(0.0);
                return;
            }
        }
    }

    /// The counters gathered so far. All zero unless statistics were
    /// enabled in the pipeline options.
    #[inline]
    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Logs the pool counters when diagnostic logging is enabled.
    pub fn dump_stats(&self) {
        if self.stats.acquires > 0 {
            pool_log!(
                self,
                "CoordBufferPool[{}]: acquired: {} allocated: {} - released: {} :: cached: {}",
                self.buffer_size,
                self.stats.acquires,
                self.stats.allocations,
                self.stats.releases,
                self.buffers.len()
            );
        }
    }
}

#[cfg(test)]
fn test_pool(size: usize) -> CoordBufferPool {
    let options = PipelineOptions::DEFAULT
        .with_stats(true)
        .with_checks(true);
    CoordBufferPool::new(size, &options)
}

#[test]
fn acquire_allocates_then_recycles() {
    let mut pool = test_pool(16);

    let a = pool.acquire();
    assert_eq!(a.len(), 16);
    assert!(a.iter().all(|v| *v == 0.0));

    pool.release(a, 0);
    assert_eq!(pool.cached_buffers(), 1);

    let b = pool.acquire();
    assert_eq!(b.len(), 16);
    assert_eq!(pool.cached_buffers(), 0);

    let stats = pool.stats();
    assert_eq!(stats.acquires, 2);
    assert_eq!(stats.allocations, 1);
    assert_eq!(stats.releases, 1);
}

#[test]
fn release_zero_fills_the_used_prefix() {
    let mut pool = test_pool(8);

    let mut buffer = pool.acquire();
    buffer[0] = 1.0;
    buffer[1] = 2.0;
    buffer[2] = 3.0;
    pool.release(buffer, 3);

    let buffer = pool.acquire();
    assert!(buffer.iter().all(|v| *v == 0.0));
}

#[test]
fn wrong_sized_buffers_are_rejected() {
    let mut pool = test_pool(8);

    pool.release(vec![0.0; 4], 0);
    assert_eq!(pool.cached_buffers(), 0);
    assert_eq!(pool.stats().releases, 0);
}

#[test]
fn dirty_release_is_healed() {
    let mut pool = test_pool(8);

    let mut buffer = pool.acquire();
    // Lie about the used length: element 5 stays dirty.
    buffer[5] = 42.0;
    pool.release(buffer, 2);

    let buffer = pool.acquire();
    assert!(buffer.iter().all(|v| *v == 0.0));
}

#[test]
fn stats_are_inert_when_disabled() {
    let mut pool = CoordBufferPool::new(8, &PipelineOptions::DEFAULT);

    let buffer = pool.acquire();
    pool.release(buffer, 8);

    assert_eq!(pool.stats(), PoolStats::default());
    // Recycling still works, only the counters are off.
    assert_eq!(pool.cached_buffers(), 1);
}
