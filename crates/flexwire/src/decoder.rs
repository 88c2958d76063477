//! `FlexDecoder` and its builder.
//!
//! The decoder bundles the limits for a decode ([`DecodeConfig`]) with an
//! optional [`DecodeObserver`]. It holds no per-call state, so one
//! instance can be shared freely, including across threads.

use std::fmt;
use std::sync::Arc;

use flexwire_protocol::{DecodeConfig, DecodeError, FlexContainer, decode_container};

use crate::{DecodeObserver, NoopObserver};

/// Builder for configuring a [`FlexDecoder`].
///
/// # Example
///
/// ```rust
/// use flexwire::{FlexDecoder, TracingObserver};
///
/// let decoder = FlexDecoder::builder()
///     .max_depth(32)
///     .observer(TracingObserver)
///     .build();
///
/// let container = decoder
///     .decode(br#"{"type":"bubble","body":{"type":"box","contents":[]}}"#)
///     .unwrap();
/// assert_eq!(container.bubbles().len(), 1);
/// ```
pub struct FlexDecoderBuilder {
    config: DecodeConfig,
    observer: Arc<dyn DecodeObserver>,
}

impl FlexDecoderBuilder {
    /// Creates a builder with default limits and no observer.
    pub fn new() -> Self {
        Self {
            config: DecodeConfig::default(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Sets the maximum node nesting depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Replaces the whole decode configuration.
    pub fn config(mut self, config: DecodeConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the observer told about every decode outcome.
    pub fn observer(mut self, observer: impl DecodeObserver) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Finishes configuration.
    pub fn build(self) -> FlexDecoder {
        FlexDecoder {
            config: self.config,
            observer: self.observer,
        }
    }
}

impl Default for FlexDecoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes raw bytes into a [`FlexContainer`].
///
/// Cloning is cheap: clones share the same observer.
#[derive(Clone)]
pub struct FlexDecoder {
    config: DecodeConfig,
    observer: Arc<dyn DecodeObserver>,
}

impl FlexDecoder {
    /// Creates a new builder.
    pub fn builder() -> FlexDecoderBuilder {
        FlexDecoderBuilder::new()
    }

    /// The limits this decoder applies.
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Decodes one top-level layout.
    ///
    /// The observer runs after the result is final and can't change it.
    ///
    /// # Errors
    /// The first [`DecodeError`] encountered anywhere in the tree.
    pub fn decode(&self, bytes: &[u8]) -> Result<FlexContainer, DecodeError> {
        let decoded = decode_container(bytes, &self.config);
        match &decoded {
            Ok(container) => self.observer.on_success(container),
            Err(err) => self.observer.on_failure(err),
        }
        decoded
    }
}

impl Default for FlexDecoder {
    fn default() -> Self {
        FlexDecoderBuilder::new().build()
    }
}

impl fmt::Debug for FlexDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlexDecoder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
