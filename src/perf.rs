//! Handler timing.
//!
//! Input handlers run synchronously inside the host's dispatch, so a slow
//! callback stalls the whole event loop. `ScopedTimer` warns when a handler
//! overruns `SLOW_HANDLER_MS`.
//!
//! Builds with the `profiling` feature also time the state machine step and
//! wheel normalization through `profile_scope!`, tracing anything over 1ms:
//! ```toml
//! [dependencies]
//! unipointer = { features = ["profiling"] }
//! ```

use std::time::Instant;
#[cfg(feature = "profiling")]
use tracing::trace;
use tracing::warn;

/// Time the enclosing scope in `profiling` builds. Expands to nothing otherwise.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
}

pub use profile_scope;

/// Reports the scope's duration on drop once it passes `threshold_ms`.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Timer around user callbacks.
    pub fn for_handler(name: &'static str) -> Self {
        Self::new(name, crate::constants::SLOW_HANDLER_MS)
    }

    /// Timer behind `profile_scope!`.
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms <= self.threshold_ms {
            return;
        }

        #[cfg(feature = "profiling")]
        if self.threshold_ms < crate::constants::SLOW_HANDLER_MS {
            trace!(operation = self.name, elapsed_ms = format!("{elapsed_ms:.2}"), "Input step timing");
            return;
        }

        warn!(
            operation = self.name,
            elapsed_ms = format!("{elapsed_ms:.2}"),
            threshold_ms = format!("{:.2}", self.threshold_ms),
            "Slow input handler"
        );
    }
}
