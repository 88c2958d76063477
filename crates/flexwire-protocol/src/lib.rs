//! Wire model and decoders for Flex Message layouts.
//!
//! A flex layout is a tree of three independently tagged families:
//!
//! - **Containers** ([`FlexContainer`]): a single bubble or a carousel.
//! - **Components** ([`FlexComponent`]): boxes, text, images, buttons, ...
//!   Boxes nest further components; a video embeds an alternate one.
//! - **Actions** ([`TemplateAction`]): what a tap does.
//!
//! Every node names its own variant in a `type` field. Decoding reads that
//! tag, picks the variant from the family's dispatch table, and decodes
//! straight into it, recursing into child nodes the same way.
//!
//! ```text
//! bytes → Value → container table → component table ⟲ → action table
//! ```
//!
//! This crate has no logging. Callers who want decode failures logged
//! wrap [`decode_container`] (the `flexwire` crate does).

mod action;
mod component;
mod container;
mod decode;
mod discriminator;
mod dispatch;
mod error;

pub use action::{
    AltUri, DatetimePickerAction, DatetimePickerMode, InputOption,
    MessageAction, PostbackAction, TemplateAction, UriAction,
};
pub use component::{
    AdjustMode, AspectMode, BoxBackground, BoxComponent, BoxLayout,
    ButtonComponent, ButtonHeight, ButtonStyle, FillerComponent,
    FlexComponent, FontStyle, FontWeight, IconComponent, ImageComponent,
    Offsets, Position, SeparatorComponent, Span, SpacerComponent,
    TextComponent, TextDecoration, VideoComponent,
};
pub use container::{
    BlockStyle, BubbleContainer, BubbleDirection, BubbleSize, BubbleStyle,
    CarouselContainer, FlexContainer,
};
pub use decode::{DecodeConfig, decode_container};
pub use discriminator::{
    ActionType, ComponentType, ContainerType, Discriminator,
    peek_discriminator, peek_tag,
};
pub use error::{DecodeError, DecodePath, Family, PathSegment};
