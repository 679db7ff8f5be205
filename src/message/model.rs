use serde::Deserialize;

use crate::{
    foundation::core::Rgb,
    foundation::error::{QuoteError, QuoteResult},
    message::entities::Style,
};

/// Maximum body length in UTF-16 code units; longer text is cut before any processing.
pub const MAX_TEXT_UNITS: usize = 4096;

/// Sender identity shown on the card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct User {
    /// Numeric identifier; only used to pick identity colors.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Given name, used for avatar initials.
    pub first_name: String,
    /// Family name, used for avatar initials.
    pub last_name: String,
    /// Avatar locator (filesystem path or `file://` URL). Empty means none.
    pub avatar: String,
}

/// One inline formatting span as supplied by the chat platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Entity {
    /// Formatting style.
    #[serde(rename = "type")]
    pub style: Style,
    /// Start offset in UTF-16 code units; may be out of range.
    #[serde(default)]
    pub offset: i64,
    /// Length in UTF-16 code units; non-positive lengths are ignored.
    #[serde(default)]
    pub length: i64,
}

/// A chat message with an optional one-level reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Message {
    /// Sender.
    pub from: User,
    /// Body text.
    pub text: String,
    /// Formatting entities over `text`.
    pub entities: Vec<Entity>,
    /// Message this one replies to.
    #[serde(rename = "replyMessage", alias = "reply_to_message")]
    pub reply_to: Option<Box<Message>>,
}

impl Message {
    /// Plain message from `from` with `text` and no entities.
    pub fn new(from: User, text: impl Into<String>) -> Self {
        Self {
            from,
            text: text.into(),
            entities: Vec::new(),
            reply_to: None,
        }
    }

    /// Attach formatting entities.
    pub fn with_entities(mut self, entities: Vec<Entity>) -> Self {
        self.entities = entities;
        self
    }

    /// Attach a replied-to message.
    pub fn with_reply(mut self, reply: Message) -> Self {
        self.reply_to = Some(Box::new(reply));
        self
    }

    /// True when there is nothing to render at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.entities.is_empty()
            && self.from == User::default()
            && self.reply_to.is_none()
    }

    /// Reject messages that cannot be rendered (empty, or a reply chain deeper than one level).
    pub fn validate(&self) -> QuoteResult<()> {
        if self.is_empty() {
            return Err(QuoteError::validation("message is empty"));
        }
        if let Some(reply) = &self.reply_to
            && reply.reply_to.is_some()
        {
            return Err(QuoteError::validation(
                "reply chains deeper than one level are not supported",
            ));
        }
        Ok(())
    }

    /// Body text cut to [`MAX_TEXT_UNITS`] UTF-16 code units.
    pub fn truncated_text(&self) -> &str {
        truncate_utf16(&self.text, MAX_TEXT_UNITS)
    }
}

/// Top-level render request, as decoded from the JSON envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QuoteRequest {
    /// Background (bubble) color.
    #[serde(rename = "backgroundColor")]
    pub background_color: Rgb,
    /// Target width in unscaled pixels; 0 selects the default.
    pub width: u32,
    /// Scale factor; 0 or negative selects the default.
    pub scale: i32,
    /// Message to render.
    pub message: Option<Message>,
}

impl QuoteRequest {
    /// Decode a request from JSON text.
    pub fn from_json(json: &str) -> QuoteResult<Self> {
        if json.trim().is_empty() {
            return Err(QuoteError::validation("empty input"));
        }
        Ok(serde_json::from_str(json)?)
    }

    /// The message, validated.
    pub fn message(&self) -> QuoteResult<&Message> {
        let message = self
            .message
            .as_ref()
            .ok_or_else(|| QuoteError::validation("request has no message"))?;
        message.validate()?;
        Ok(message)
    }
}

/// Longest prefix of `text` spanning at most `max_units` UTF-16 code units.
///
/// Never splits a character, so surrogate pairs survive intact.
pub fn truncate_utf16(text: &str, max_units: usize) -> &str {
    let mut units = 0usize;
    for (idx, ch) in text.char_indices() {
        units += ch.len_utf16();
        if units > max_units {
            return &text[..idx];
        }
    }
    text
}

#[cfg(test)]
#[path = "../../tests/unit/message/model.rs"]
mod tests;
