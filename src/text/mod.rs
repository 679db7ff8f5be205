//! Text rendering boundary.
//!
//! The compositor only sees [`TextRenderer`]: markup in, bitmap plus measured size out.
//! [`ParleyTextRenderer`](engine::ParleyTextRenderer) is the shipped implementation; tests
//! substitute deterministic fakes.

pub(crate) mod engine;
pub(crate) mod wrap;

use crate::{foundation::core::Rgb, foundation::error::QuoteResult, render::bitmap::Bitmap};

/// One text rendering call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextRequest<'a> {
    /// Markup produced by the markup builder.
    pub markup: &'a str,
    /// Font size in pixels.
    pub font_size_px: f32,
    /// Default ink color.
    pub ink: Rgb,
    /// Horizontal offset of the text inside the output bitmap.
    pub offset_x: f32,
    /// Vertical offset of the text inside the output bitmap.
    pub offset_y: f32,
    /// Maximum line width before wrapping (clamped to 10000).
    pub max_width_px: f32,
    /// Selects the name sizing heuristics instead of the body ones.
    pub is_name: bool,
}

impl<'a> TextRequest<'a> {
    /// Body text request at the origin with the maximum width unclamped.
    pub fn new(markup: &'a str, font_size_px: f32, ink: Rgb) -> Self {
        Self {
            markup,
            font_size_px,
            ink,
            offset_x: 0.0,
            offset_y: 0.0,
            max_width_px: wrap::MAX_WIDTH_CLAMP,
            is_name: false,
        }
    }

    /// Set the draw offset.
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Set the maximum line width.
    pub fn with_max_width(mut self, max_width_px: f32) -> Self {
        self.max_width_px = max_width_px;
        self
    }

    /// Use name heuristics.
    pub fn as_name(mut self) -> Self {
        self.is_name = true;
        self
    }
}

/// Output of a [`TextRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedText {
    /// Text box of `(box width, text height + font size)` with the text drawn at the offset.
    pub bitmap: Bitmap,
    /// Width of the text box.
    pub text_width: f32,
    /// Height of the laid out text.
    pub text_height: f32,
}

/// Renders markup into bitmaps.
pub trait TextRenderer {
    /// Lay out and draw `req.markup`.
    fn render(&mut self, req: &TextRequest<'_>) -> QuoteResult<RenderedText>;
}

impl<T: TextRenderer + ?Sized> TextRenderer for &mut T {
    fn render(&mut self, req: &TextRequest<'_>) -> QuoteResult<RenderedText> {
        (**self).render(req)
    }
}
