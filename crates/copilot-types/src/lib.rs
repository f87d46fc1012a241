//! Shared types for the Architect Copilot chat UI.
//!
//! This crate provides the types used by the image utility and the web crate:
//! - `CopilotError` — unified error taxonomy
//! - `MessageContent` — what the question input hands to its parent on send
//! - `FrontendSettings` — feature switches served to the browser
//! - `ChatMessage` — a message in the demo conversation

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Unified error type for the chat UI crates.
#[derive(Debug, thiserror::Error)]
pub enum CopilotError {
    // === Image Errors ===
    #[error("Image is empty")]
    EmptyImage,

    #[error("Unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    #[error("Failed to encode image as {format}: {message}")]
    ImageEncode { format: String, message: String },

    #[error("Invalid resize bounds {max_width}x{max_height}")]
    InvalidDimensions { max_width: u32, max_height: u32 },

    #[error("Failed to read file '{name}': {message}")]
    FileRead { name: String, message: String },

    // === Content Errors ===
    #[error("Invalid message content: {0}")]
    InvalidContent(String),
}

impl CopilotError {
    /// Returns `true` if the error came from the image pipeline. The question
    /// input swallows these and keeps text sending available.
    pub fn is_image_error(&self) -> bool {
        matches!(
            self,
            CopilotError::EmptyImage
                | CopilotError::UnsupportedImageFormat(_)
                | CopilotError::ImageDecode(_)
                | CopilotError::ImageEncode { .. }
                | CopilotError::InvalidDimensions { .. }
                | CopilotError::FileRead { .. }
        )
    }
}

/// A convenience alias for `Result<T, CopilotError>`.
pub type Result<T> = std::result::Result<T, CopilotError>;

// ---------------------------------------------------------------------------
// ContentPart — one typed part of a multi-modal message
// ---------------------------------------------------------------------------

/// Reference to an image, usually a `data:` URL produced by the image utility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ImageUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

// ---------------------------------------------------------------------------
// MessageContent — plain text, or text followed by an image
// ---------------------------------------------------------------------------

/// Content produced by a send.
///
/// On the wire `TextOnly` is a bare JSON string and `TextWithImage` is the
/// ordered array `[text part, image_url part]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WireContent")]
pub enum MessageContent {
    TextOnly(String),
    TextWithImage { text: String, image: ImageUrl },
}

impl MessageContent {
    /// Build content from the question text and an optional staged image.
    pub fn new(text: impl Into<String>, image: Option<ImageUrl>) -> Self {
        match image {
            Some(image) => MessageContent::TextWithImage {
                text: text.into(),
                image,
            },
            None => MessageContent::TextOnly(text.into()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            MessageContent::TextOnly(text) | MessageContent::TextWithImage { text, .. } => text,
        }
    }

    pub fn image(&self) -> Option<&ImageUrl> {
        match self {
            MessageContent::TextOnly(_) => None,
            MessageContent::TextWithImage { image, .. } => Some(image),
        }
    }

    /// Ordered parts: the text part, then the image part if there is one.
    pub fn parts(&self) -> Vec<ContentPart> {
        let mut parts = vec![ContentPart::Text {
            text: self.text().to_owned(),
        }];
        if let Some(image) = self.image() {
            parts.push(ContentPart::ImageUrl {
                image_url: image.clone(),
            });
        }
        parts
    }
}

impl Serialize for MessageContent {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MessageContent::TextOnly(text) => serializer.serialize_str(text),
            MessageContent::TextWithImage { .. } => self.parts().serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl TryFrom<WireContent> for MessageContent {
    type Error = CopilotError;

    fn try_from(wire: WireContent) -> Result<Self> {
        let parts = match wire {
            WireContent::Text(text) => return Ok(MessageContent::TextOnly(text)),
            WireContent::Parts(parts) => parts,
        };

        let mut text = None;
        let mut image = None;
        for part in parts {
            match part {
                ContentPart::Text { text: t } if text.is_none() => text = Some(t),
                ContentPart::ImageUrl { image_url } if image.is_none() => image = Some(image_url),
                ContentPart::Text { .. } => {
                    return Err(CopilotError::InvalidContent("more than one text part".into()))
                }
                ContentPart::ImageUrl { .. } => {
                    return Err(CopilotError::InvalidContent("more than one image part".into()))
                }
            }
        }

        let text = text.ok_or_else(|| CopilotError::InvalidContent("missing text part".into()))?;
        Ok(MessageContent::new(text, image))
    }
}

// ---------------------------------------------------------------------------
// ConversationId
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Fresh random id for a new conversation.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ConversationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

// ---------------------------------------------------------------------------
// FrontendSettings — feature switches served to the browser
// ---------------------------------------------------------------------------

/// Settings the server hands to the browser. Every field is optional on the
/// wire; a missing `oyd_enabled` means image upload stays available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendSettings {
    /// "On your data" mode. Disables image attachments.
    pub oyd_enabled: bool,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub title: String,
    pub chat_title: String,
    pub chat_description: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            title: "Architect Copilot".into(),
            chat_title: "Start chatting".into(),
            chat_description: "Ask about your application portfolio, tech debt, or standards."
                .into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ChatMessage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: uuid::Uuid,
    pub role: Role,
    pub content: MessageContent,
    pub date: chrono::DateTime<chrono::Utc>,
}

impl ChatMessage {
    pub fn user(content: MessageContent) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            role: Role::User,
            content,
            date: chrono::Utc::now(),
        }
    }
}
