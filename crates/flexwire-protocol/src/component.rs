//! The component family: the building blocks laid out inside a bubble.
//!
//! Attribute fields are plain serde derives. The fields that hold further
//! tagged nodes (`contents`, `action`, `altContent`) are `#[serde(skip)]`
//! here and filled in by the walker in `decode.rs`, which dispatches on
//! each child's own `type` tag.

use serde::Deserialize;

use crate::{ComponentType, TemplateAction};

/// A layout element inside a bubble.
///
/// The set of variants is closed: adding a tag means adding a variant
/// here, which makes every `match` on components fail to compile until
/// it handles the new case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlexComponent {
    Box(BoxComponent),
    Button(ButtonComponent),
    Filler(FillerComponent),
    Icon(IconComponent),
    Image(ImageComponent),
    Separator(SeparatorComponent),
    Spacer(SpacerComponent),
    Text(TextComponent),
    Video(VideoComponent),
}

impl FlexComponent {
    /// The wire tag this component was decoded from.
    pub fn kind(&self) -> ComponentType {
        match self {
            Self::Box(_) => ComponentType::Box,
            Self::Button(_) => ComponentType::Button,
            Self::Filler(_) => ComponentType::Filler,
            Self::Icon(_) => ComponentType::Icon,
            Self::Image(_) => ComponentType::Image,
            Self::Separator(_) => ComponentType::Separator,
            Self::Spacer(_) => ComponentType::Spacer,
            Self::Text(_) => ComponentType::Text,
            Self::Video(_) => ComponentType::Video,
        }
    }

    /// The tap action, for the variants that can carry one.
    pub fn action(&self) -> Option<&TemplateAction> {
        match self {
            Self::Box(c) => c.action.as_ref(),
            Self::Button(c) => c.action.as_ref(),
            Self::Image(c) => c.action.as_ref(),
            Self::Text(c) => c.action.as_ref(),
            Self::Video(c) => c.action.as_ref(),
            Self::Filler(_) | Self::Icon(_) | Self::Separator(_) | Self::Spacer(_) => None,
        }
    }

    /// Direct children in layout order. Empty for everything but boxes.
    pub fn children(&self) -> &[FlexComponent] {
        match self {
            Self::Box(c) => &c.contents,
            _ => &[],
        }
    }

    /// Counts this component and everything beneath it, including a
    /// video's alternate content.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Box(c) => 1 + c.contents.iter().map(Self::node_count).sum::<usize>(),
            Self::Video(c) => 1 + c.alt_content.node_count(),
            _ => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared attribute types
// ---------------------------------------------------------------------------

/// How a component is placed relative to its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Relative,
    Absolute,
}

/// Offsets applied on top of `position`. Values are keywords (`md`) or
/// pixel strings (`12px`), passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offsets {
    pub offset_top: Option<String>,
    pub offset_bottom: Option<String>,
    pub offset_start: Option<String>,
    pub offset_end: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AdjustMode {
    #[serde(rename = "shrink-to-fit")]
    ShrinkToFit,
}

// ---------------------------------------------------------------------------
// Box
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxLayout {
    Horizontal,
    Vertical,
    Baseline,
}

/// Background fill for a box. Tagged by its own `type` field, which is
/// unrelated to the component discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoxBackground {
    #[serde(rename_all = "camelCase")]
    LinearGradient {
        angle: String,
        start_color: String,
        end_color: String,
        center_color: Option<String>,
        center_position: Option<String>,
    },
}

/// Lays out `contents` in a row, a column or along a text baseline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxComponent {
    pub layout: Option<BoxLayout>,
    /// Children in wire order. Any mix of variants, including more boxes.
    #[serde(skip)]
    pub contents: Vec<FlexComponent>,
    #[serde(skip)]
    pub action: Option<TemplateAction>,
    pub flex: Option<i32>,
    pub spacing: Option<String>,
    pub margin: Option<String>,
    pub position: Option<Position>,
    #[serde(flatten)]
    pub offsets: Offsets,
    pub padding_all: Option<String>,
    pub padding_top: Option<String>,
    pub padding_bottom: Option<String>,
    pub padding_start: Option<String>,
    pub padding_end: Option<String>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<String>,
    pub corner_radius: Option<String>,
    pub width: Option<String>,
    pub max_width: Option<String>,
    pub height: Option<String>,
    pub max_height: Option<String>,
    pub justify_content: Option<String>,
    pub align_items: Option<String>,
    pub background: Option<BoxBackground>,
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Link,
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonHeight {
    Sm,
    Md,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonComponent {
    #[serde(skip)]
    pub action: Option<TemplateAction>,
    pub flex: Option<i32>,
    pub margin: Option<String>,
    pub position: Option<Position>,
    #[serde(flatten)]
    pub offsets: Offsets,
    pub height: Option<ButtonHeight>,
    pub style: Option<ButtonStyle>,
    pub color: Option<String>,
    pub gravity: Option<String>,
    pub adjust_mode: Option<AdjustMode>,
    pub scaling: Option<bool>,
}

// ---------------------------------------------------------------------------
// Filler, Icon, Separator, Spacer
// ---------------------------------------------------------------------------

/// Takes up free space in a box. Deprecated on the wire, still decoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FillerComponent {
    pub flex: Option<i32>,
}

/// A small image inside a baseline box.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconComponent {
    #[serde(default)]
    pub url: String,
    pub margin: Option<String>,
    pub position: Option<Position>,
    #[serde(flatten)]
    pub offsets: Offsets,
    pub size: Option<String>,
    pub aspect_ratio: Option<String>,
    pub scaling: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeparatorComponent {
    pub margin: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpacerComponent {
    pub size: Option<String>,
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectMode {
    Cover,
    Fit,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageComponent {
    #[serde(default)]
    pub url: String,
    #[serde(skip)]
    pub action: Option<TemplateAction>,
    pub flex: Option<i32>,
    pub margin: Option<String>,
    pub position: Option<Position>,
    #[serde(flatten)]
    pub offsets: Offsets,
    pub align: Option<String>,
    pub gravity: Option<String>,
    pub size: Option<String>,
    pub aspect_ratio: Option<String>,
    pub aspect_mode: Option<AspectMode>,
    pub background_color: Option<String>,
    pub animated: Option<bool>,
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    None,
    Underline,
    LineThrough,
}

/// A run of differently styled text inside a text component.
///
/// Spans only ever appear in `text.contents`, so they are decoded by
/// position rather than by dispatch on their `type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub weight: Option<FontWeight>,
    pub style: Option<FontStyle>,
    pub decoration: Option<TextDecoration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextComponent {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub contents: Vec<Span>,
    #[serde(skip)]
    pub action: Option<TemplateAction>,
    pub flex: Option<i32>,
    pub margin: Option<String>,
    pub position: Option<Position>,
    #[serde(flatten)]
    pub offsets: Offsets,
    pub size: Option<String>,
    pub align: Option<String>,
    pub gravity: Option<String>,
    pub wrap: Option<bool>,
    pub weight: Option<FontWeight>,
    pub color: Option<String>,
    pub style: Option<FontStyle>,
    pub decoration: Option<TextDecoration>,
    pub max_lines: Option<u32>,
    pub line_spacing: Option<String>,
    pub adjust_mode: Option<AdjustMode>,
    pub scaling: Option<bool>,
}

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

/// A video, plus the component shown by clients that can't play it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoComponent {
    pub url: String,
    pub preview_url: String,
    pub aspect_ratio: Option<String>,
    /// Any component variant, another video included.
    pub alt_content: Box<FlexComponent>,
    pub action: Option<TemplateAction>,
}
