//! The container family: the top-level unit of a flex layout.

use serde::Deserialize;

use crate::{BoxComponent, ContainerType, FlexComponent, TemplateAction};

/// A single bubble or a horizontally scrollable carousel of bubbles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlexContainer {
    Bubble(BubbleContainer),
    Carousel(CarouselContainer),
}

impl FlexContainer {
    /// The wire tag this container was decoded from.
    pub fn kind(&self) -> ContainerType {
        match self {
            Self::Bubble(_) => ContainerType::Bubble,
            Self::Carousel(_) => ContainerType::Carousel,
        }
    }

    /// The bubbles in display order. A lone bubble is a slice of one.
    pub fn bubbles(&self) -> &[BubbleContainer] {
        match self {
            Self::Bubble(bubble) => std::slice::from_ref(bubble),
            Self::Carousel(carousel) => &carousel.contents,
        }
    }

    /// Total number of components across every bubble.
    pub fn component_count(&self) -> usize {
        self.bubbles().iter().map(BubbleContainer::component_count).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleSize {
    Nano,
    Micro,
    Deca,
    Hecto,
    Kilo,
    Mega,
    Giga,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleDirection {
    Ltr,
    Rtl,
}

/// Per-block styling of a bubble.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BubbleStyle {
    pub header: Option<BlockStyle>,
    pub hero: Option<BlockStyle>,
    pub body: Option<BlockStyle>,
    pub footer: Option<BlockStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    pub background_color: Option<String>,
    pub separator: Option<bool>,
    pub separator_color: Option<String>,
}

/// One card: up to four blocks stacked header, hero, body, footer.
///
/// `header`, `body` and `footer` are always boxes. `hero` may be any
/// component, typically an image or a video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BubbleContainer {
    pub size: Option<BubbleSize>,
    pub direction: Option<BubbleDirection>,
    #[serde(skip)]
    pub header: Option<BoxComponent>,
    #[serde(skip)]
    pub hero: Option<Box<FlexComponent>>,
    #[serde(skip)]
    pub body: Option<BoxComponent>,
    #[serde(skip)]
    pub footer: Option<BoxComponent>,
    pub styles: Option<BubbleStyle>,
    #[serde(skip)]
    pub action: Option<TemplateAction>,
}

impl BubbleContainer {
    /// Number of components in all four blocks.
    pub fn component_count(&self) -> usize {
        let blocks = [&self.header, &self.body, &self.footer]
            .into_iter()
            .flatten()
            .map(|block| {
                1 + block
                    .contents
                    .iter()
                    .map(FlexComponent::node_count)
                    .sum::<usize>()
            })
            .sum::<usize>();
        blocks + self.hero.as_deref().map_or(0, FlexComponent::node_count)
    }
}

/// Bubbles shown side by side, scrolled horizontally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselContainer {
    pub contents: Vec<BubbleContainer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubble_attributes() {
        let json = serde_json::json!({
            "type": "bubble",
            "size": "kilo",
            "direction": "rtl",
            "styles": {"footer": {"separator": true, "backgroundColor": "#eeeeee"}},
            "body": {"type": "box", "contents": []}
        });
        let bubble = BubbleContainer::deserialize(&json).unwrap();
        assert_eq!(bubble.size, Some(BubbleSize::Kilo));
        assert_eq!(bubble.direction, Some(BubbleDirection::Rtl));
        let footer = bubble.styles.unwrap().footer.unwrap();
        assert_eq!(footer.separator, Some(true));
        assert_eq!(footer.background_color.as_deref(), Some("#eeeeee"));
        // Blocks are left for the walker.
        assert!(bubble.body.is_none());
    }

    #[test]
    fn test_bubbles_of_single_bubble() {
        let container = FlexContainer::Bubble(BubbleContainer::default());
        assert_eq!(container.bubbles().len(), 1);
        assert_eq!(container.kind(), ContainerType::Bubble);
        assert_eq!(container.component_count(), 0);
    }

    #[test]
    fn test_bubbles_of_carousel_keep_order() {
        let first = BubbleContainer {
            size: Some(BubbleSize::Nano),
            ..BubbleContainer::default()
        };
        let second = BubbleContainer {
            size: Some(BubbleSize::Giga),
            ..BubbleContainer::default()
        };
        let container = FlexContainer::Carousel(CarouselContainer {
            contents: vec![first, second],
        });
        let sizes: Vec<_> = container.bubbles().iter().map(|b| b.size).collect();
        assert_eq!(sizes, [Some(BubbleSize::Nano), Some(BubbleSize::Giga)]);
        assert_eq!(container.kind(), ContainerType::Carousel);
    }
}
