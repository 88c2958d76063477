//! Tag → decoder tables for the three families.
//!
//! Each table is a plain static slice, so the only place a family's tags
//! are paired with their decoders is right here, and all three dispatch
//! sites share the same lookup code.

use serde_json::Value;

use crate::decode::{self, Walker};
use crate::discriminator::read_tag;
use crate::{
    ActionType, ComponentType, ContainerType, DecodeError, Discriminator,
    FlexComponent, FlexContainer, TemplateAction,
};

/// Decodes one node whose tag has already been matched.
pub(crate) type DecodeFn<T> = fn(&mut Walker, &Value) -> Result<T, DecodeError>;

/// Maps each tag of family `K` to the decoder producing a `T`.
pub(crate) struct DispatchTable<K: 'static, T: 'static> {
    entries: &'static [(K, DecodeFn<T>)],
}

impl<K: Discriminator, T: 'static> DispatchTable<K, T> {
    /// Finds the decoder for a wire tag.
    ///
    /// # Errors
    /// [`DecodeError::UnknownVariant`] if no entry matches.
    pub(crate) fn select(&self, tag: &str) -> Result<DecodeFn<T>, DecodeError> {
        self.entries
            .iter()
            .find(|(kind, _)| kind.as_str() == tag)
            .map(|(_, decode)| *decode)
            .ok_or_else(|| DecodeError::UnknownVariant {
                family: K::FAMILY,
                value: tag.to_owned(),
            })
    }

    /// Reads the node's tag, then hands the node to the matching decoder.
    pub(crate) fn decode(
        &self,
        walker: &mut Walker,
        node: &Value,
    ) -> Result<T, DecodeError> {
        let tag = read_tag(node)?;
        let decode = self.select(tag)?;
        decode(walker, node)
    }

    #[cfg(test)]
    fn kinds(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

static CONTAINER_ENTRIES: [(ContainerType, DecodeFn<FlexContainer>); 2] = [
    (ContainerType::Bubble, decode::bubble_container),
    (ContainerType::Carousel, decode::carousel_container),
];

static COMPONENT_ENTRIES: [(ComponentType, DecodeFn<FlexComponent>); 9] = [
    (ComponentType::Box, decode::box_component),
    (ComponentType::Button, decode::button_component),
    (ComponentType::Filler, decode::filler_component),
    (ComponentType::Icon, decode::icon_component),
    (ComponentType::Image, decode::image_component),
    (ComponentType::Separator, decode::separator_component),
    (ComponentType::Spacer, decode::spacer_component),
    (ComponentType::Text, decode::text_component),
    (ComponentType::Video, decode::video_component),
];

static ACTION_ENTRIES: [(ActionType, DecodeFn<TemplateAction>); 4] = [
    (ActionType::Uri, decode::uri_action),
    (ActionType::Message, decode::message_action),
    (ActionType::Postback, decode::postback_action),
    (ActionType::DatetimePicker, decode::datetime_picker_action),
];

pub(crate) static CONTAINERS: DispatchTable<ContainerType, FlexContainer> =
    DispatchTable {
        entries: &CONTAINER_ENTRIES,
    };

pub(crate) static COMPONENTS: DispatchTable<ComponentType, FlexComponent> =
    DispatchTable {
        entries: &COMPONENT_ENTRIES,
    };

pub(crate) static ACTIONS: DispatchTable<ActionType, TemplateAction> =
    DispatchTable {
        entries: &ACTION_ENTRIES,
    };
