use crate::message::model::Entity;

/// Closed set of inline formatting styles a message entity can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(from = "String")]
pub enum Style {
    /// Bold text.
    Bold,
    /// `/command` addressed to a bot.
    BotCommand,
    /// `$TICKER` symbol.
    Cashtag,
    /// Inline monospace code.
    Code,
    /// E-mail address.
    Email,
    /// `#hashtag`.
    Hashtag,
    /// Italic text.
    Italic,
    /// `@username` mention.
    Mention,
    /// Phone number; rendered without decoration.
    PhoneNumber,
    /// Monospace block.
    Pre,
    /// Struck-through text.
    Strikethrough,
    /// Clickable text with a hidden URL.
    TextLink,
    /// Underlined text.
    Underline,
    /// Bare URL.
    Url,
    /// Any style name outside the known set.
    Unknown,
}

impl Style {
    /// Map a wire style name to a [`Style`]; unrecognized names become [`Style::Unknown`].
    pub fn parse(name: &str) -> Self {
        match name {
            "bold" => Self::Bold,
            "bot_command" => Self::BotCommand,
            "cashtag" => Self::Cashtag,
            "code" => Self::Code,
            "email" => Self::Email,
            "hashtag" => Self::Hashtag,
            "italic" => Self::Italic,
            "mention" => Self::Mention,
            "phone_number" => Self::PhoneNumber,
            "pre" => Self::Pre,
            "strikethrough" => Self::Strikethrough,
            "text_link" => Self::TextLink,
            "underline" => Self::Underline,
            "url" => Self::Url,
            _ => Self::Unknown,
        }
    }

    /// Wire name of the style (`"unknown"` for [`Style::Unknown`]).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::BotCommand => "bot_command",
            Self::Cashtag => "cashtag",
            Self::Code => "code",
            Self::Email => "email",
            Self::Hashtag => "hashtag",
            Self::Italic => "italic",
            Self::Mention => "mention",
            Self::PhoneNumber => "phone_number",
            Self::Pre => "pre",
            Self::Strikethrough => "strikethrough",
            Self::TextLink => "text_link",
            Self::Underline => "underline",
            Self::Url => "url",
            Self::Unknown => "unknown",
        }
    }
}

impl From<String> for Style {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

/// An entity clipped to the text bounds, in UTF-16 code units.
///
/// Always satisfies `start < end <= text length`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// Formatting style.
    pub style: Style,
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

/// Length of `text` in UTF-16 code units, the index space entity offsets use.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Clip entities against a text of `text_len` code units.
///
/// Entities with a non-positive length or lying fully outside `[0, text_len)` are dropped.
/// The output keeps input order, one span per surviving entity.
pub fn resolve_spans(entities: &[Entity], text_len: usize) -> Vec<ResolvedSpan> {
    let n = i64::try_from(text_len).unwrap_or(i64::MAX);
    let mut out = Vec::with_capacity(entities.len());
    for entity in entities {
        if entity.length <= 0 {
            tracing::trace!(style = entity.style.as_str(), "dropping empty entity");
            continue;
        }
        let end = entity.offset.saturating_add(entity.length);
        if end <= 0 || entity.offset >= n {
            tracing::trace!(
                style = entity.style.as_str(),
                offset = entity.offset,
                length = entity.length,
                "dropping out-of-range entity"
            );
            continue;
        }

        let start = entity.offset.max(0);
        let end = end.min(n);
        out.push(ResolvedSpan {
            style: entity.style,
            start: start as usize,
            end: end as usize,
        });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/message/entities.rs"]
mod tests;
