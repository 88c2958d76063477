//! The action family: what happens when a user taps a component.
//!
//! Actions are leaves. They never own further tree structure, so every
//! variant decodes straight from its attributes.

use serde::Deserialize;

use crate::ActionType;

/// A tappable interaction attached to a bubble or component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateAction {
    /// Opens a link.
    Uri(UriAction),
    /// Sends a text message as the user.
    Message(MessageAction),
    /// Sends a postback event carrying `data` to the bot's webhook.
    Postback(PostbackAction),
    /// Opens a date/time picker, then posts the selection back.
    DatetimePicker(DatetimePickerAction),
}

impl TemplateAction {
    /// The wire tag this action was decoded from.
    pub fn kind(&self) -> ActionType {
        match self {
            Self::Uri(_) => ActionType::Uri,
            Self::Message(_) => ActionType::Message,
            Self::Postback(_) => ActionType::Postback,
            Self::DatetimePicker(_) => ActionType::DatetimePicker,
        }
    }

    /// The label shown to the user, if one was given.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Uri(a) => a.label.as_deref(),
            Self::Message(a) => a.label.as_deref(),
            Self::Postback(a) => a.label.as_deref(),
            Self::DatetimePicker(a) => a.label.as_deref(),
        }
    }
}

/// `{"type": "uri", "uri": "https://...", "altUri": {"desktop": "..."}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UriAction {
    pub label: Option<String>,
    #[serde(default)]
    pub uri: String,
    pub alt_uri: Option<AltUri>,
}

/// Overrides the link on desktop clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AltUri {
    #[serde(default)]
    pub desktop: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageAction {
    pub label: Option<String>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostbackAction {
    pub label: Option<String>,
    #[serde(default)]
    pub data: String,
    /// Deprecated on the wire in favour of `displayText`, still accepted.
    pub text: Option<String>,
    pub display_text: Option<String>,
    pub input_option: Option<InputOption>,
    pub fill_in_text: Option<String>,
}

/// What the chat UI does right after a postback is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputOption {
    CloseRichMenu,
    OpenRichMenu,
    OpenKeyboard,
    OpenVoice,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatetimePickerAction {
    pub label: Option<String>,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub mode: DatetimePickerMode,
    pub initial: Option<String>,
    pub max: Option<String>,
    pub min: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatetimePickerMode {
    Date,
    Time,
    #[default]
    Datetime,
}
