//! Recursive descent from raw bytes to a [`FlexContainer`].
//!
//! The input is parsed once into a `serde_json::Value`. From there the
//! [`Walker`] reads each node's `type`, looks the tag up in its family's
//! dispatch table, and decodes straight into the chosen variant. Children
//! (`contents`, `hero`, `altContent`, `action`, ...) go back through the
//! same tables, so the tree is assembled leaf-to-root by a top-down walk.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::dispatch::{ACTIONS, COMPONENTS, CONTAINERS, DispatchTable};
use crate::{
    BoxComponent, BubbleContainer, ButtonComponent, CarouselContainer,
    DatetimePickerAction, DecodeError, Discriminator, FillerComponent,
    FlexComponent, FlexContainer, IconComponent, ImageComponent,
    MessageAction, PathSegment, PostbackAction, SeparatorComponent,
    SpacerComponent, TemplateAction, TextComponent, UriAction,
    VideoComponent,
};

/// Limits applied to a single decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// How many container, component and action nodes may be nested
    /// inside one another before the input is rejected as malformed.
    pub max_depth: usize,
}

impl DecodeConfig {
    /// Default nesting limit. Comfortably above anything a real layout
    /// uses, and low enough that the walk can't exhaust the stack.
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::with_max_depth(Self::DEFAULT_MAX_DEPTH)
    }
}

/// Decodes raw bytes into a fully assembled container.
///
/// # Errors
/// The first [`DecodeError`] encountered. No partially built container is
/// ever returned.
pub fn decode_container(
    bytes: &[u8],
    config: &DecodeConfig,
) -> Result<FlexContainer, DecodeError> {
    let root: Value = serde_json::from_slice(bytes)?;
    Walker::new(config).container(&root)
}

// ---------------------------------------------------------------------------
// Walker
// ---------------------------------------------------------------------------

/// Per-call decode state: just the current depth.
///
/// Each call to [`decode_container`] gets its own walker, so concurrent
/// decodes share nothing.
pub(crate) struct Walker {
    depth: usize,
    max_depth: usize,
}

impl Walker {
    fn new(config: &DecodeConfig) -> Self {
        Self {
            depth: 0,
            max_depth: config.max_depth,
        }
    }

    pub(crate) fn container(
        &mut self,
        node: &Value,
    ) -> Result<FlexContainer, DecodeError> {
        self.descend(&CONTAINERS, node)
    }

    pub(crate) fn component(
        &mut self,
        node: &Value,
    ) -> Result<FlexComponent, DecodeError> {
        self.descend(&COMPONENTS, node)
    }

    pub(crate) fn action(
        &mut self,
        node: &Value,
    ) -> Result<TemplateAction, DecodeError> {
        self.descend(&ACTIONS, node)
    }

    fn descend<K: Discriminator, T: 'static>(
        &mut self,
        table: &DispatchTable<K, T>,
        node: &Value,
    ) -> Result<T, DecodeError> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::malformed(format_args!(
                "nesting exceeds {} levels",
                self.max_depth
            )));
        }
        self.depth += 1;
        let decoded = table.decode(self, node);
        self.depth -= 1;
        decoded
    }

    /// An optional `action` field. Absent or `null` is `Ok(None)`.
    fn optional_action(
        &mut self,
        node: &Value,
    ) -> Result<Option<TemplateAction>, DecodeError> {
        match field(node, "action") {
            Some(child) => self
                .action(child)
                .map(Some)
                .map_err(|e| e.at(PathSegment::Field("action"))),
            None => Ok(None),
        }
    }

    /// An optional component field such as a bubble's `hero`.
    fn optional_component(
        &mut self,
        node: &Value,
        name: &'static str,
    ) -> Result<Option<FlexComponent>, DecodeError> {
        match field(node, name) {
            Some(child) => self
                .component(child)
                .map(Some)
                .map_err(|e| e.at(PathSegment::Field(name))),
            None => Ok(None),
        }
    }

    /// A bubble block: optional, but a box whenever present.
    fn block(
        &mut self,
        node: &Value,
        name: &'static str,
    ) -> Result<Option<BoxComponent>, DecodeError> {
        match self.optional_component(node, name)? {
            None => Ok(None),
            Some(FlexComponent::Box(block)) => Ok(Some(block)),
            Some(other) => Err(DecodeError::UnexpectedVariant {
                expected: "box",
                found: other.kind().as_str(),
            }
            .at(PathSegment::Field(name))),
        }
    }

    /// Every element of the `contents` array, in order.
    fn contents<T>(
        &mut self,
        node: &Value,
        mut decode: impl FnMut(&mut Self, &Value) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        let at = |e: DecodeError, index| {
            e.at(PathSegment::Index(index))
                .at(PathSegment::Field("contents"))
        };
        let items = match field(node, "contents") {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(DecodeError::malformed("expected an array")
                    .at(PathSegment::Field("contents")));
            }
        };
        let mut decoded = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            decoded.push(decode(self, item).map_err(|e| at(e, index))?);
        }
        Ok(decoded)
    }

    fn bubble(&mut self, node: &Value) -> Result<BubbleContainer, DecodeError> {
        let mut bubble: BubbleContainer = attributes(node)?;
        bubble.header = self.block(node, "header")?;
        bubble.hero = self.optional_component(node, "hero")?.map(Box::new);
        bubble.body = self.block(node, "body")?;
        bubble.footer = self.block(node, "footer")?;
        bubble.action = self.optional_action(node)?;
        Ok(bubble)
    }
}

/// Looks up a child field, treating `null` the same as absent.
fn field<'v>(node: &'v Value, name: &str) -> Option<&'v Value> {
    node.get(name).filter(|child| !child.is_null())
}

/// Decodes the plain attribute fields of a node.
fn attributes<T: DeserializeOwned>(node: &Value) -> Result<T, DecodeError> {
    T::deserialize(node).map_err(DecodeError::MalformedInput)
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

pub(crate) fn bubble_container(
    walker: &mut Walker,
    node: &Value,
) -> Result<FlexContainer, DecodeError> {
    walker.bubble(node).map(FlexContainer::Bubble)
}

pub(crate) fn carousel_container(
    walker: &mut Walker,
    node: &Value,
) -> Result<FlexContainer, DecodeError> {
    // Each entry is a full container node that has to turn out a bubble.
    let contents = walker.contents(node, |walker, item| {
        match walker.container(item)? {
            FlexContainer::Bubble(bubble) => Ok(bubble),
            other => Err(DecodeError::UnexpectedVariant {
                expected: "bubble",
                found: other.kind().as_str(),
            }),
        }
    })?;
    Ok(FlexContainer::Carousel(CarouselContainer { contents }))
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

pub(crate) fn box_component(
    walker: &mut Walker,
    node: &Value,
) -> Result<FlexComponent, DecodeError> {
    let mut component: BoxComponent = attributes(node)?;
    component.contents = walker.contents(node, Walker::component)?;
    component.action = walker.optional_action(node)?;
    Ok(FlexComponent::Box(component))
}

pub(crate) fn button_component(
    walker: &mut Walker,
    node: &Value,
) -> Result<FlexComponent, DecodeError> {
    let mut component: ButtonComponent = attributes(node)?;
    component.action = walker.optional_action(node)?;
    Ok(FlexComponent::Button(component))
}

pub(crate) fn filler_component(
    _: &mut Walker,
    node: &Value,
) -> Result<FlexComponent, DecodeError> {
    attributes::<FillerComponent>(node).map(FlexComponent::Filler)
}

pub(crate) fn icon_component(
    _: &mut Walker,
    node: &Value,
) -> Result<FlexComponent, DecodeError> {
    attributes::<IconComponent>(node).map(FlexComponent::Icon)
}

pub(crate) fn image_component(
    walker: &mut Walker,
    node: &Value,
) -> Result<FlexComponent, DecodeError> {
    let mut component: ImageComponent = attributes(node)?;
    component.action = walker.optional_action(node)?;
    Ok(FlexComponent::Image(component))
}

pub(crate) fn separator_component(
    _: &mut Walker,
    node: &Value,
) -> Result<FlexComponent, DecodeError> {
    attributes::<SeparatorComponent>(node).map(FlexComponent::Separator)
}

pub(crate) fn spacer_component(
    _: &mut Walker,
    node: &Value,
) -> Result<FlexComponent, DecodeError> {
    attributes::<SpacerComponent>(node).map(FlexComponent::Spacer)
}

pub(crate) fn text_component(
    walker: &mut Walker,
    node: &Value,
) -> Result<FlexComponent, DecodeError> {
    let mut component: TextComponent = attributes(node)?;
    component.action = walker.optional_action(node)?;
    Ok(FlexComponent::Text(component))
}

/// The attribute half of a video; `altContent` is walked separately.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoAttributes {
    #[serde(default)]
    url: String,
    #[serde(default)]
    preview_url: String,
    aspect_ratio: Option<String>,
}

pub(crate) fn video_component(
    walker: &mut Walker,
    node: &Value,
) -> Result<FlexComponent, DecodeError> {
    let VideoAttributes {
        url,
        preview_url,
        aspect_ratio,
    } = attributes(node)?;
    let alt_content = walker
        .optional_component(node, "altContent")?
        .ok_or_else(|| {
            DecodeError::MissingDiscriminator {
                reason: "required node is absent",
            }
            .at(PathSegment::Field("altContent"))
        })?;
    let action = walker.optional_action(node)?;
    Ok(FlexComponent::Video(VideoComponent {
        url,
        preview_url,
        aspect_ratio,
        alt_content: Box::new(alt_content),
        action,
    }))
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

pub(crate) fn uri_action(
    _: &mut Walker,
    node: &Value,
) -> Result<TemplateAction, DecodeError> {
    attributes::<UriAction>(node).map(TemplateAction::Uri)
}

pub(crate) fn message_action(
    _: &mut Walker,
    node: &Value,
) -> Result<TemplateAction, DecodeError> {
    attributes::<MessageAction>(node).map(TemplateAction::Message)
}

pub(crate) fn postback_action(
    _: &mut Walker,
    node: &Value,
) -> Result<TemplateAction, DecodeError> {
    attributes::<PostbackAction>(node).map(TemplateAction::Postback)
}

pub(crate) fn datetime_picker_action(
    _: &mut Walker,
    node: &Value,
) -> Result<TemplateAction, DecodeError> {
    attributes::<DatetimePickerAction>(node).map(TemplateAction::DatetimePicker)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{ActionType, ComponentType, Family};

    fn decode(value: Value) -> Result<FlexContainer, DecodeError> {
        decode_container(value.to_string().as_bytes(), &DecodeConfig::default())
    }

    fn decode_component(value: Value) -> Result<FlexComponent, DecodeError> {
        Walker::new(&DecodeConfig::default()).component(&value)
    }

    fn minimal_component(tag: &str) -> Value {
        match tag {
            "video" => json!({"type": "video", "altContent": {"type": "spacer"}}),
            _ => json!({"type": tag}),
        }
    }

    // =====================================================================
    // Dispatch per family
    // =====================================================================

    #[test]
    fn test_every_container_tag_decodes() {
        for tag in ["bubble", "carousel"] {
            let container = decode(json!({"type": tag})).unwrap();
            assert_eq!(container.kind().as_str(), tag);
        }
    }

    #[test]
    fn test_every_component_tag_decodes() {
        for kind in ComponentType::ALL {
            let component =
                decode_component(minimal_component(kind.as_str())).unwrap();
            assert_eq!(component.kind(), *kind);
        }
    }

    #[test]
    fn test_every_action_tag_decodes() {
        for kind in ActionType::ALL {
            let node = json!({"type": "button", "action": {"type": kind.as_str()}});
            let button = decode_component(node).unwrap();
            assert_eq!(button.action().unwrap().kind(), *kind);
        }
    }

    #[test]
    fn test_unknown_component_tag() {
        let err = decode_component(json!({"type": "carousel"})).unwrap_err();
        match err {
            DecodeError::UnknownVariant { family, value } => {
                assert_eq!(family, Family::Component);
                assert_eq!(value, "carousel");
            }
            other => panic!("expected UnknownVariant, got {other:?}"),
        }
    }

    // =====================================================================
    // Structure
    // =====================================================================

    #[test]
    fn test_box_children_keep_wire_order() {
        let node = json!({
            "type": "box",
            "layout": "vertical",
            "contents": [
                {"type": "text", "text": "a"},
                {"type": "separator"},
                {"type": "image", "url": "https://example.com/i.png"},
                {"type": "filler"}
            ]
        });
        let component = decode_component(node).unwrap();
        let kinds: Vec<_> = component.children().iter().map(FlexComponent::kind).collect();
        assert_eq!(
            kinds,
            [
                ComponentType::Text,
                ComponentType::Separator,
                ComponentType::Image,
                ComponentType::Filler
            ]
        );
    }

    #[test]
    fn test_box_without_contents_has_no_children() {
        let component = decode_component(json!({"type": "box"})).unwrap();
        assert!(component.children().is_empty());
    }

    #[test]
    fn test_box_contents_must_be_an_array() {
        let err = decode_component(json!({"type": "box", "contents": {}})).unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "contents");
        assert!(matches!(err.root(), DecodeError::MalformedInput(_)));
    }

    #[test]
    fn test_null_action_is_absent() {
        let component =
            decode_component(json!({"type": "text", "text": "t", "action": null})).unwrap();
        assert!(component.action().is_none());
    }

    #[test]
    fn test_bubble_blocks_and_hero() {
        let container = decode(json!({
            "type": "bubble",
            "header": {"type": "box", "contents": []},
            "hero": {"type": "image", "url": "https://example.com/h.png"},
            "footer": {"type": "box", "contents": [{"type": "button", "action": {"type": "postback", "data": "x"}}]},
            "action": {"type": "uri", "uri": "https://example.com"}
        }))
        .unwrap();
        let FlexContainer::Bubble(bubble) = container else {
            panic!("expected a bubble");
        };
        assert!(bubble.header.is_some());
        assert!(bubble.body.is_none());
        assert_eq!(bubble.hero.unwrap().kind(), ComponentType::Image);
        assert_eq!(bubble.footer.unwrap().contents.len(), 1);
        assert_eq!(bubble.action.unwrap().kind(), ActionType::Uri);
    }

    #[test]
    fn test_bubble_block_must_be_a_box() {
        let err = decode(json!({"type": "bubble", "body": {"type": "text", "text": "x"}}))
            .unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "body");
        assert!(matches!(
            err.root(),
            DecodeError::UnexpectedVariant {
                expected: "box",
                found: "text"
            }
        ));
    }

    #[test]
    fn test_carousel_entries_must_be_bubbles() {
        let err = decode(json!({
            "type": "carousel",
            "contents": [{"type": "bubble"}, {"type": "carousel", "contents": []}]
        }))
        .unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "contents[1]");
        assert!(matches!(
            err.root(),
            DecodeError::UnexpectedVariant {
                expected: "bubble",
                found: "carousel"
            }
        ));
    }

    #[test]
    fn test_video_requires_alt_content() {
        let err = decode_component(json!({"type": "video", "url": "u"})).unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "altContent");
        assert!(matches!(err.root(), DecodeError::MissingDiscriminator { .. }));
    }

    #[test]
    fn test_video_alt_content_may_be_a_video() {
        let node = json!({
            "type": "video",
            "altContent": {"type": "video", "altContent": {"type": "text", "text": "fallback"}}
        });
        let FlexComponent::Video(outer) = decode_component(node).unwrap() else {
            panic!("expected a video");
        };
        let FlexComponent::Video(inner) = *outer.alt_content else {
            panic!("expected a nested video");
        };
        assert_eq!(inner.alt_content.kind(), ComponentType::Text);
    }

    // =====================================================================
    // Errors carry the path to the failing node
    // =====================================================================

    #[test]
    fn test_nested_failure_path() {
        let err = decode(json!({
            "type": "bubble",
            "body": {
                "type": "box",
                "contents": [
                    {"type": "text", "text": "ok"},
                    {"type": "box", "contents": [
                        {"type": "button", "action": {"type": "teleport"}}
                    ]}
                ]
            }
        }))
        .unwrap_err();
        assert_eq!(
            err.path().unwrap().to_string(),
            "body.contents[1].contents[0].action"
        );
        match err.root() {
            DecodeError::UnknownVariant { family, value } => {
                assert_eq!(*family, Family::Action);
                assert_eq!(value, "teleport");
            }
            other => panic!("expected UnknownVariant, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_attribute_is_malformed_with_path() {
        let err = decode(json!({
            "type": "bubble",
            "body": {"type": "box", "contents": [{"type": "text", "maxLines": "two"}]}
        }))
        .unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "body.contents[0]");
        assert!(matches!(err.root(), DecodeError::MalformedInput(_)));
    }

    // =====================================================================
    // Depth limit
    // =====================================================================

    fn nested_boxes(levels: usize) -> Value {
        let mut node = json!({"type": "box", "contents": []});
        for _ in 1..levels {
            node = json!({"type": "box", "contents": [node]});
        }
        node
    }

    #[test]
    fn test_depth_limit_is_enforced() {
        let config = DecodeConfig::with_max_depth(4);
        let mut walker = Walker::new(&config);
        assert!(walker.component(&nested_boxes(4)).is_ok());

        let mut walker = Walker::new(&config);
        let err = walker.component(&nested_boxes(5)).unwrap_err();
        assert!(matches!(err.root(), DecodeError::MalformedInput(_)));
        assert!(err.to_string().contains("nesting exceeds 4 levels"));
    }

    #[test]
    fn test_depth_counts_actions() {
        let config = DecodeConfig::with_max_depth(1);
        let node = json!({"type": "button", "action": {"type": "message", "text": "x"}});
        let err = Walker::new(&config).component(&node).unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), "action");
    }

    #[test]
    fn test_default_config() {
        assert_eq!(DecodeConfig::default().max_depth, DecodeConfig::DEFAULT_MAX_DEPTH);
    }
}
