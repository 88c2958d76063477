//! # Flexwire
//!
//! Decodes Flex Message layouts (cards built from nested boxes, text,
//! images, buttons and tap actions) from JSON into strongly-typed values.
//!
//! The wire model and the recursive decoders live in
//! [`flexwire_protocol`]. This crate adds the entry points, configuration
//! and an optional observer for logging decode outcomes.
//!
//! ## Quick Start
//!
//! ```rust
//! use flexwire::prelude::*;
//!
//! let json = br#"{
//!     "type": "bubble",
//!     "body": {"type": "box", "contents": [{"type": "text", "text": "hi"}]}
//! }"#;
//!
//! let container = flexwire::decode(json)?;
//! let FlexContainer::Bubble(bubble) = container else { unreachable!() };
//! let body = bubble.body.expect("body is set");
//! assert_eq!(body.contents[0].kind(), ComponentType::Text);
//! # Ok::<(), DecodeError>(())
//! ```

mod decoder;
mod observer;

pub use decoder::{FlexDecoder, FlexDecoderBuilder};
pub use flexwire_protocol::{
    DecodeConfig, DecodeError, DecodePath, Family, PathSegment,
    peek_discriminator, peek_tag,
};
pub use observer::{DecodeObserver, NoopObserver, TracingObserver};

/// The wire model, re-exported in full.
pub mod model {
    pub use flexwire_protocol::{
        ActionType, AdjustMode, AltUri, AspectMode, BlockStyle,
        BoxBackground, BoxComponent, BoxLayout, BubbleContainer,
        BubbleDirection, BubbleSize, BubbleStyle, ButtonComponent,
        ButtonHeight, ButtonStyle, CarouselContainer, ComponentType,
        ContainerType, DatetimePickerAction, DatetimePickerMode,
        Discriminator, FillerComponent, FlexComponent, FlexContainer,
        FontStyle, FontWeight, IconComponent, ImageComponent, InputOption,
        MessageAction, Offsets, Position, PostbackAction,
        SeparatorComponent, Span, SpacerComponent, TemplateAction,
        TextComponent, TextDecoration, UriAction, VideoComponent,
    };
}

/// Decodes a top-level layout with default limits and no observer.
///
/// # Errors
/// The first [`DecodeError`] encountered; no partial container is
/// returned.
pub fn decode(bytes: &[u8]) -> Result<model::FlexContainer, DecodeError> {
    flexwire_protocol::decode_container(bytes, &DecodeConfig::default())
}

pub mod prelude {
    pub use crate::model::{
        ActionType, BoxComponent, BubbleContainer, CarouselContainer,
        ComponentType, ContainerType, Discriminator, FlexComponent,
        FlexContainer, TemplateAction,
    };
    pub use crate::{
        DecodeError, DecodeObserver, FlexDecoder, TracingObserver, decode,
    };
}
