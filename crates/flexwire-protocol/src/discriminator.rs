//! Discriminator tags and the reader that extracts them.
//!
//! Every node on the wire says what it is through a reserved `type`
//! field: `{"type": "box", ...}`. Each family has its own closed set of
//! tags, modelled here as a fieldless enum implementing [`Discriminator`].

use std::borrow::Cow;
use std::fmt;

use serde::de::{Deserializer as _, IgnoredAny, MapAccess, Visitor};
use serde_json::Value;

use crate::{DecodeError, Family};

/// A closed set of wire tags belonging to one [`Family`].
pub trait Discriminator: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// The family these tags select within.
    const FAMILY: Family;

    /// Every tag, in wire-table order.
    const ALL: &'static [Self];

    /// The exact, case-sensitive wire string.
    fn as_str(self) -> &'static str;

    /// Looks up a wire string. `None` means it isn't a tag of this family.
    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == tag)
    }
}

// ---------------------------------------------------------------------------
// Tag enums
// ---------------------------------------------------------------------------

/// Tags of the container family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerType {
    Bubble,
    Carousel,
}

impl Discriminator for ContainerType {
    const FAMILY: Family = Family::Container;
    const ALL: &'static [Self] = &[Self::Bubble, Self::Carousel];

    fn as_str(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Carousel => "carousel",
        }
    }
}

/// Tags of the component family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Box,
    Button,
    Filler,
    Icon,
    Image,
    Separator,
    Spacer,
    Text,
    Video,
}

impl Discriminator for ComponentType {
    const FAMILY: Family = Family::Component;
    const ALL: &'static [Self] = &[
        Self::Box,
        Self::Button,
        Self::Filler,
        Self::Icon,
        Self::Image,
        Self::Separator,
        Self::Spacer,
        Self::Text,
        Self::Video,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Button => "button",
            Self::Filler => "filler",
            Self::Icon => "icon",
            Self::Image => "image",
            Self::Separator => "separator",
            Self::Spacer => "spacer",
            Self::Text => "text",
            Self::Video => "video",
        }
    }
}

/// Tags of the action family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Uri,
    Message,
    Postback,
    DatetimePicker,
}

impl Discriminator for ActionType {
    const FAMILY: Family = Family::Action;
    const ALL: &'static [Self] = &[
        Self::Uri,
        Self::Message,
        Self::Postback,
        Self::DatetimePicker,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Uri => "uri",
            Self::Message => "message",
            Self::Postback => "postback",
            Self::DatetimePicker => "datetimepicker",
        }
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Reading the tag
// ---------------------------------------------------------------------------

/// Reads the raw `type` string of an already parsed node.
pub(crate) fn read_tag(node: &Value) -> Result<&str, DecodeError> {
    let object = node
        .as_object()
        .ok_or_else(|| DecodeError::malformed("expected a JSON object"))?;
    match object.get("type") {
        Some(Value::String(tag)) => Ok(tag),
        Some(Value::Null) | None => Err(DecodeError::MissingDiscriminator {
            reason: "`type` is absent",
        }),
        Some(_) => Err(DecodeError::MissingDiscriminator {
            reason: "`type` is not a string",
        }),
    }
}

/// Extracts the `type` tag from raw bytes without building the node.
///
/// The rest of the object is scanned for well-formedness but skipped
/// over, so this is cheap enough to route a payload before committing to
/// a full decode.
///
/// # Errors
/// [`DecodeError::MalformedInput`] if the bytes aren't a single JSON
/// object, [`DecodeError::MissingDiscriminator`] if `type` is absent or
/// not a string.
pub fn peek_tag(bytes: &[u8]) -> Result<String, DecodeError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let tag = (&mut de).deserialize_map(TagVisitor)?;
    de.end()?;
    match tag {
        Some(Value::String(tag)) => Ok(tag),
        Some(Value::Null) | None => Err(DecodeError::MissingDiscriminator {
            reason: "`type` is absent",
        }),
        Some(_) => Err(DecodeError::MissingDiscriminator {
            reason: "`type` is not a string",
        }),
    }
}

/// Like [`peek_tag`], scoped to the family the caller expects.
///
/// # Errors
/// Everything [`peek_tag`] returns, plus [`DecodeError::UnknownVariant`]
/// when the tag isn't part of `K`'s family.
pub fn peek_discriminator<K: Discriminator>(
    bytes: &[u8],
) -> Result<K, DecodeError> {
    let tag = peek_tag(bytes)?;
    K::from_tag(&tag).ok_or(DecodeError::UnknownVariant {
        family: K::FAMILY,
        value: tag,
    })
}

/// Walks the top-level object keeping only the value under `type`.
struct TagVisitor;

impl<'de> Visitor<'de> for TagVisitor {
    type Value = Option<Value>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        // Last occurrence wins, matching how a full parse resolves
        // duplicate keys.
        let mut tag = None;
        while let Some(key) = map.next_key::<Cow<'de, str>>()? {
            if key == "type" {
                tag = Some(map.next_value::<Value>()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trips<K: Discriminator>() {
        for kind in K::ALL {
            assert_eq!(K::from_tag(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn test_every_tag_maps_back_to_its_kind() {
        assert_round_trips::<ContainerType>();
        assert_round_trips::<ComponentType>();
        assert_round_trips::<ActionType>();
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert_eq!(ContainerType::from_tag("Bubble"), None);
        assert_eq!(ComponentType::from_tag("BOX"), None);
        assert_eq!(ActionType::from_tag("datetimePicker"), None);
    }

    #[test]
    fn test_families_do_not_share_tags() {
        assert_eq!(ContainerType::from_tag("box"), None);
        assert_eq!(ComponentType::from_tag("bubble"), None);
        assert_eq!(ActionType::from_tag("text"), None);
    }

    #[test]
    fn test_display_is_wire_tag() {
        assert_eq!(ComponentType::Separator.to_string(), "separator");
        assert_eq!(ActionType::DatetimePicker.to_string(), "datetimepicker");
        assert_eq!(ContainerType::Carousel.to_string(), "carousel");
    }

    // =====================================================================
    // read_tag
    // =====================================================================

    #[test]
    fn test_read_tag_returns_type_string() {
        let node = serde_json::json!({"type": "spacer", "size": "md"});
        assert_eq!(read_tag(&node).unwrap(), "spacer");
    }

    #[test]
    fn test_read_tag_absent_type() {
        let node = serde_json::json!({"size": "md"});
        assert!(matches!(
            read_tag(&node),
            Err(DecodeError::MissingDiscriminator { .. })
        ));
    }

    #[test]
    fn test_read_tag_non_string_type() {
        let node = serde_json::json!({"type": 7});
        assert!(matches!(
            read_tag(&node),
            Err(DecodeError::MissingDiscriminator { .. })
        ));
    }

    #[test]
    fn test_read_tag_non_object_node() {
        let node = serde_json::json!(["box"]);
        assert!(matches!(
            read_tag(&node),
            Err(DecodeError::MalformedInput(_))
        ));
    }

    // =====================================================================
    // peek_tag / peek_discriminator
    // =====================================================================

    #[test]
    fn test_peek_tag_skips_other_fields() {
        let bytes = br#"{"body": {"type": "box", "contents": []}, "type": "bubble"}"#;
        assert_eq!(peek_tag(bytes).unwrap(), "bubble");
    }

    #[test]
    fn test_peek_tag_last_duplicate_wins() {
        let bytes = br#"{"type": "bubble", "type": "carousel"}"#;
        assert_eq!(peek_tag(bytes).unwrap(), "carousel");
    }

    #[test]
    fn test_peek_tag_rejects_truncated_input() {
        let bytes = br#"{"type": "bubble", "body": {"#;
        assert!(matches!(
            peek_tag(bytes),
            Err(DecodeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_peek_tag_rejects_arrays() {
        assert!(matches!(
            peek_tag(br#"["bubble"]"#),
            Err(DecodeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_peek_tag_rejects_trailing_garbage() {
        assert!(matches!(
            peek_tag(br#"{"type": "bubble"} {"#),
            Err(DecodeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_peek_tag_absent_and_null_are_missing() {
        assert!(matches!(
            peek_tag(br#"{}"#),
            Err(DecodeError::MissingDiscriminator { .. })
        ));
        assert!(matches!(
            peek_tag(br#"{"type": null}"#),
            Err(DecodeError::MissingDiscriminator { .. })
        ));
    }

    #[test]
    fn test_peek_discriminator_scopes_to_family() {
        let kind: ComponentType =
            peek_discriminator(br#"{"type": "video"}"#).unwrap();
        assert_eq!(kind, ComponentType::Video);

        let err = peek_discriminator::<ActionType>(br#"{"type": "video"}"#)
            .unwrap_err();
        match err {
            DecodeError::UnknownVariant { family, value } => {
                assert_eq!(family, Family::Action);
                assert_eq!(value, "video");
            }
            other => panic!("expected UnknownVariant, got {other:?}"),
        }
    }
}
