//! quote-card renders a chat message as a single "quote card" image: a circular avatar, the
//! sender's name, the rich-text body and an optional reply block inside a rounded bubble.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: raw `(type, offset, length)` entities are clipped to the UTF-16 bounds of the
//!    body text ([`resolve_spans`]).
//! 2. **Markup**: resolved spans become nested, escaped markup ([`build_markup`]).
//! 3. **Text**: markup is laid out and rasterized through a [`TextRenderer`]
//!    ([`ParleyTextRenderer`] in production).
//! 4. **Avatar**: an [`AvatarLoader`] supplies the image, with a generated letter avatar as the
//!    fallback ([`resolve_avatar`]).
//! 5. **Compose**: a pure [`QuoteLayout`] plan places every part on one premultiplied canvas.
//!
//! [`generate`] runs all of it for one [`QuoteRequest`].
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: colors and layout depend only on the input and the text renderer.
//! - **IO at the edges**: fonts and avatars come in through [`FontConfig`] and [`AvatarLoader`].
//! - **Premultiplied RGBA8** end-to-end; [`Bitmap::to_rgba_image`] converts for encoding.
#![forbid(unsafe_code)]

mod avatar;
mod color;
mod foundation;
mod markup;
mod message;
mod render;
mod text;

pub use avatar::decode::{decode_image, looks_like_svg, rasterize_svg};
pub use avatar::letters::{LETTER_CANVAS_SIDE, initials, letter_avatar};
pub use avatar::resolver::{
    AvatarLoader, FsAvatarLoader, MAX_AVATAR_SIDE, apply_circle_mask, avatar_path, resolve_avatar,
};
pub use color::contrast::{ink_for, is_light, perceived_brightness};
pub use color::palette::{
    AVATAR_COLORS, BUCKET_TO_INDEX, LINK_COLOR, NAME_COLORS_DARK, NAME_COLORS_LIGHT,
    avatar_color, identity_index, name_color,
};
pub use foundation::core::{Point, Rect, Rgb, Size, Vec2};
pub use foundation::error::{QuoteError, QuoteResult};
pub use markup::builder::{
    LINE_BREAK, POSTAMBLE, PREAMBLE, build_markup, close_marker, markup_for,
    normalize_escaped_newlines, open_marker,
};
pub use markup::parse::{RunStyle, StyledRun, StyledText, parse_markup};
pub use message::entities::{ResolvedSpan, Style, resolve_spans, utf16_len};
pub use message::model::{Entity, MAX_TEXT_UNITS, Message, QuoteRequest, User, truncate_utf16};
pub use render::bitmap::{Bitmap, PremulRgba8, fit_within, over};
pub use render::compositor::{CardColors, QuoteParts, ReplyParts, compose, draw_plan};
pub use render::layout::{
    AVATAR_ORIGIN, LayoutInput, Metrics, QuoteLayout, ReplyPlacement, ReplySizes, plan_layout,
};
pub use render::pipeline::{DEFAULT_SCALE, DEFAULT_WIDTH, MAX_SCALE, RenderOptions, generate};
pub use render::shapes::{circle_mask, rounded_rect};
pub use text::engine::{BOLD_FONT_ENV, FONT_ENV, FontConfig, MONO_FONT_ENV, ParleyTextRenderer};
pub use text::wrap::{
    MAX_WIDTH_CLAMP, NAME_SLACK, SAMPLE_CHARS, WrapDecision, WrapMetrics, clamp_max_width,
    decide_wrap,
};
pub use text::{RenderedText, TextRenderer, TextRequest};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
