use crate::{
    avatar::resolver::{AvatarLoader, resolve_avatar},
    color::{contrast::ink_for, palette::name_color},
    foundation::{core::Rgb, error::QuoteResult},
    markup::builder::markup_for,
    message::{
        entities::{Style, utf16_len},
        model::{Entity, Message, QuoteRequest},
    },
    render::{
        bitmap::Bitmap,
        compositor::{CardColors, QuoteParts, ReplyParts, compose},
    },
    text::{TextRenderer, TextRequest},
};

/// Width used when the request leaves it at 0.
pub const DEFAULT_WIDTH: u32 = 512;
/// Scale used when the request leaves it at 0 (or negative).
pub const DEFAULT_SCALE: u32 = 2;
/// Largest accepted scale factor.
pub const MAX_SCALE: u32 = 20;

/// Output geometry derived from a [`QuoteRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Unscaled target width.
    pub width: u32,
    /// Pixel scale, clamped to `1..=MAX_SCALE`.
    pub scale: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            scale: DEFAULT_SCALE,
        }
    }
}

impl RenderOptions {
    /// Apply defaults to a zero width or a non-positive scale; cap the scale at [`MAX_SCALE`].
    pub fn from_request(req: &QuoteRequest) -> Self {
        let width = if req.width == 0 {
            DEFAULT_WIDTH
        } else {
            req.width
        };
        let scale = if req.scale <= 0 {
            DEFAULT_SCALE
        } else {
            req.scale.unsigned_abs().min(MAX_SCALE)
        };
        Self { width, scale }
    }

    /// Width in output pixels.
    pub fn scaled_width(&self) -> u32 {
        self.width.saturating_mul(self.scale)
    }
}

/// Render one quote card.
///
/// Pipeline:
/// 1. [`QuoteRequest::message`] (validation)
/// 2. name, body and reply text through `text`
/// 3. [`resolve_avatar`](crate::resolve_avatar) through `avatars`
/// 4. [`compose`](crate::compose)
///
/// Returns a **premultiplied** bitmap; see [`Bitmap::to_rgba_image`] for encoding.
#[tracing::instrument(skip(request, text, avatars))]
pub fn generate(
    request: &QuoteRequest,
    text: &mut dyn TextRenderer,
    avatars: &dyn AvatarLoader,
) -> QuoteResult<Bitmap> {
    let message = request.message()?;
    let opts = RenderOptions::from_request(request);
    let s = opts.scale as f32;
    let width = opts.scaled_width() as f32;
    let background = request.background_color;
    let ink = ink_for(background);

    let name = if message.from.name.is_empty() {
        None
    } else {
        let markup = bold_markup(&message.from.name);
        let req = TextRequest::new(&markup, 22.0 * s, name_color(message.from.id, background))
            .with_max_width(width)
            .as_name();
        Some(text.render(&req)?.bitmap)
    };

    let body_text = message.truncated_text();
    let body = if body_text.is_empty() {
        None
    } else {
        let markup = markup_for(body_text, &message.entities);
        let req = TextRequest::new(&markup, 24.0 * s, ink).with_max_width(width);
        Some(text.render(&req)?.bitmap)
    };

    let avatar = resolve_avatar(&message.from, avatars, text)?;

    let reply = match message.reply_to.as_deref() {
        Some(reply) if !reply.from.name.is_empty() && !reply.text.is_empty() => {
            Some(render_reply(text, reply, background, ink, s, width)?)
        }
        _ => None,
    };

    let parts = QuoteParts {
        avatar: Some(avatar),
        name,
        body,
        reply,
    };
    compose(
        &parts,
        CardColors {
            bubble: background,
            accent: ink,
        },
        f64::from(opts.scale),
    )
}

/// Markup for `name` with a single bold span over all of it.
fn bold_markup(name: &str) -> String {
    let bold = [Entity {
        style: Style::Bold,
        offset: 0,
        length: utf16_len(name) as i64,
    }];
    markup_for(name, &bold)
}

/// Reply sender name and reply text; the caller checks that both are non-empty.
fn render_reply(
    text: &mut dyn TextRenderer,
    reply: &Message,
    background: Rgb,
    ink: Rgb,
    s: f32,
    width: f32,
) -> QuoteResult<ReplyParts> {
    let name_size = 16.0 * s;
    let markup = bold_markup(&reply.from.name);
    let req = TextRequest::new(&markup, name_size, name_color(reply.from.id, background))
        .with_offset(0.0, name_size)
        .with_max_width(width * 0.9)
        .as_name();
    let name = text.render(&req)?.bitmap;

    let text_size = 21.0 * s;
    let markup = markup_for(reply.truncated_text(), &[]);
    let req = TextRequest::new(&markup, text_size, ink)
        .with_offset(0.0, text_size)
        .with_max_width((width * 0.9).round());
    let body = text.render(&req)?.bitmap;

    Ok(ReplyParts { name, text: body })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
