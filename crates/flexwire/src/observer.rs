//! Optional hook for watching decode outcomes.
//!
//! Decoding never logs on its own. A [`DecodeObserver`] is told about
//! every result after the fact and can report it however it likes, but
//! it only ever sees a shared reference: it can't change what the caller
//! gets back, and a decoder without one behaves identically.

use flexwire_protocol::{DecodeError, FlexContainer};

/// Receives the outcome of each decode.
///
/// - `Send + Sync` → one decoder (and its observer) can be shared by
///   threads decoding in parallel.
/// - `'static` → the observer lives as long as the decoder holding it.
///
/// Both methods default to doing nothing, so an implementation only
/// overrides what it cares about.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use flexwire::{DecodeError, DecodeObserver};
///
/// /// Counts failures, e.g. for a health endpoint.
/// #[derive(Default)]
/// struct FailureCounter(AtomicUsize);
///
/// impl DecodeObserver for FailureCounter {
///     fn on_failure(&self, _err: &DecodeError) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait DecodeObserver: Send + Sync + 'static {
    /// Called with every successfully decoded container.
    fn on_success(&self, container: &FlexContainer) {
        let _ = container;
    }

    /// Called with the error of every failed decode.
    fn on_failure(&self, err: &DecodeError) {
        let _ = err;
    }
}

/// Ignores everything. The default for [`FlexDecoder`](crate::FlexDecoder).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DecodeObserver for NoopObserver {}

/// Reports outcomes through `tracing`.
///
/// Successes are logged at `debug`, failures at `warn` along with the
/// path to the node that failed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DecodeObserver for TracingObserver {
    fn on_success(&self, container: &FlexContainer) {
        tracing::debug!(
            kind = %container.kind(),
            bubbles = container.bubbles().len(),
            components = container.component_count(),
            "flex container decoded"
        );
    }

    fn on_failure(&self, err: &DecodeError) {
        match err.path() {
            Some(path) => tracing::warn!(
                error = %err.root(),
                %path,
                "flex container decode failed"
            ),
            None => tracing::warn!(error = %err, "flex container decode failed"),
        }
    }
}
