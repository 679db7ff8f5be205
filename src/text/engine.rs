use std::{borrow::Cow, collections::HashMap, path::Path};

use anyhow::Context as _;
use parley::style::{FontStack, FontStyle, FontWeight, StyleProperty};

use crate::{
    color::palette::LINK_COLOR,
    foundation::core::Rgb,
    foundation::error::{QuoteError, QuoteResult},
    markup::parse::{StyledText, parse_markup},
    render::shapes::rasterize,
    text::{
        RenderedText, TextRenderer, TextRequest,
        wrap::{SAMPLE_CHARS, WrapDecision, WrapMetrics, decide_wrap},
    },
};

/// Environment variable naming the regular font file.
pub const FONT_ENV: &str = "QUOTE_CARD_FONT";
/// Environment variable naming an optional bold font file.
pub const BOLD_FONT_ENV: &str = "QUOTE_CARD_BOLD_FONT";
/// Environment variable naming an optional monospace font file.
pub const MONO_FONT_ENV: &str = "QUOTE_CARD_MONO_FONT";

/// Font faces available to [`ParleyTextRenderer`].
#[derive(Clone, Default)]
pub struct FontConfig {
    /// Primary face (required).
    pub regular: Vec<u8>,
    /// Bold face of the same family; without it bold runs use the regular outlines.
    pub bold: Option<Vec<u8>>,
    /// Face used for `code`/`pre` runs.
    pub monospace: Option<Vec<u8>>,
}

impl std::fmt::Debug for FontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontConfig")
            .field("regular_len", &self.regular.len())
            .field("bold_len", &self.bold.as_ref().map(Vec::len))
            .field("monospace_len", &self.monospace.as_ref().map(Vec::len))
            .finish()
    }
}

impl FontConfig {
    /// Read font files from disk.
    pub fn load(
        regular: &Path,
        bold: Option<&Path>,
        monospace: Option<&Path>,
    ) -> QuoteResult<Self> {
        fn read(path: &Path) -> QuoteResult<Vec<u8>> {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read font file {}", path.display()))?;
            Ok(bytes)
        }

        Ok(Self {
            regular: read(regular)?,
            bold: bold.map(read).transpose()?,
            monospace: monospace.map(read).transpose()?,
        })
    }

    /// Read font files named by [`FONT_ENV`], [`BOLD_FONT_ENV`] and [`MONO_FONT_ENV`].
    pub fn from_env() -> QuoteResult<Self> {
        Self::resolve(None, None, None)
    }

    /// Read font files, taking each path not given from its environment variable.
    ///
    /// A regular face is required: without a path and without [`FONT_ENV`] this is a
    /// validation error.
    pub fn resolve(
        regular: Option<&Path>,
        bold: Option<&Path>,
        monospace: Option<&Path>,
    ) -> QuoteResult<Self> {
        fn or_env<'a>(given: Option<&'a Path>, var: &str) -> Option<Cow<'a, Path>> {
            given
                .map(Cow::Borrowed)
                .or_else(|| std::env::var_os(var).map(|v| Cow::Owned(v.into())))
        }

        let regular = or_env(regular, FONT_ENV).ok_or_else(|| {
            QuoteError::validation(format!("no regular font given and {FONT_ENV} is not set"))
        })?;
        let bold = or_env(bold, BOLD_FONT_ENV);
        let monospace = or_env(monospace, MONO_FONT_ENV);
        tracing::debug!(
            regular = %regular.display(),
            bold = ?bold.as_deref().map(Path::display),
            monospace = ?monospace.as_deref().map(Path::display),
            "font files"
        );
        Self::load(&regular, bold.as_deref(), monospace.as_deref())
    }
}

/// [`TextRenderer`] backed by Parley for shaping/layout and `vello_cpu` for rasterization.
pub struct ParleyTextRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgb>,
    family: String,
    mono_family: Option<String>,
    link_color: Rgb,
    faces: HashMap<u64, vello_cpu::peniko::Blob<u8>>,
}

impl std::fmt::Debug for ParleyTextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyTextRenderer")
            .field("family", &self.family)
            .field("mono_family", &self.mono_family)
            .field("link_color", &self.link_color)
            .field("cached_faces", &self.faces.len())
            .finish()
    }
}

impl ParleyTextRenderer {
    /// Register the configured faces with fresh Parley contexts.
    pub fn new(config: FontConfig) -> QuoteResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, config.regular)?;
        if let Some(bold) = config.bold {
            register_family(&mut font_ctx, bold)?;
        }
        let mono_family = config
            .monospace
            .map(|bytes| register_family(&mut font_ctx, bytes))
            .transpose()?;

        tracing::debug!(%family, ?mono_family, "registered text faces");
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            mono_family,
            link_color: LINK_COLOR,
            faces: HashMap::new(),
        })
    }

    /// Override the ink used for link-styled runs.
    pub fn with_link_color(mut self, color: Rgb) -> Self {
        self.link_color = color;
        self
    }

    /// Primary family name resolved from the regular face.
    pub fn family(&self) -> &str {
        &self.family
    }

    fn build_layout(&mut self, styled: &StyledText, size_px: f32, ink: Rgb) -> parley::Layout<Rgb> {
        let mut builder =
            self.layout_ctx
                .ranged_builder(&mut self.font_ctx, &styled.text, 1.0, true);
        builder.push_default(StyleProperty::FontStack(FontStack::Source(Cow::Owned(
            self.family.clone(),
        ))));
        builder.push_default(StyleProperty::FontSize(size_px));
        builder.push_default(StyleProperty::Brush(ink));

        for run in &styled.runs {
            let style = run.style;
            let range = run.range.clone();
            if style.bold {
                builder.push(StyleProperty::FontWeight(FontWeight::BOLD), range.clone());
            }
            if style.italic {
                builder.push(StyleProperty::FontStyle(FontStyle::Italic), range.clone());
            }
            if style.underline || style.link {
                builder.push(StyleProperty::Underline(true), range.clone());
            }
            if style.strikethrough {
                builder.push(StyleProperty::Strikethrough(true), range.clone());
            }
            if style.link {
                builder.push(StyleProperty::Brush(self.link_color), range.clone());
            }
            if style.monospace
                && let Some(mono) = &self.mono_family
            {
                builder.push(
                    StyleProperty::FontStack(FontStack::Source(Cow::Owned(mono.clone()))),
                    range,
                );
            }
        }

        let mut layout: parley::Layout<Rgb> = builder.build(&styled.text);
        layout.break_all_lines(None);
        layout
    }

    fn measure(&mut self, styled: &StyledText, size_px: f32, ink: Rgb) -> WrapMetrics {
        let layout = self.build_layout(styled, size_px, ink);
        let line_height = layout
            .lines()
            .next()
            .map(|line| {
                let m = line.metrics();
                m.ascent + m.descent
            })
            .unwrap_or(size_px);
        let sample = styled.prefix_chars(SAMPLE_CHARS);
        let sample_width = if sample.text.len() == styled.text.len() {
            layout.width()
        } else {
            self.build_layout(&sample, size_px, ink).width()
        };
        WrapMetrics {
            natural_width: layout.width(),
            natural_height: layout.height(),
            line_height,
            sample_width,
        }
    }
}

impl TextRenderer for ParleyTextRenderer {
    #[tracing::instrument(skip(self, req), fields(size = req.font_size_px, is_name = req.is_name))]
    fn render(&mut self, req: &TextRequest<'_>) -> QuoteResult<RenderedText> {
        if !req.font_size_px.is_finite() || req.font_size_px <= 0.0 {
            return Err(QuoteError::validation(
                "text font_size_px must be finite and > 0",
            ));
        }

        let styled = parse_markup(req.markup)?;
        let metrics = self.measure(&styled, req.font_size_px, req.ink);
        let decision = decide_wrap(&metrics, req.max_width_px, req.is_name);
        tracing::debug!(?decision, ?metrics, "text box sizing");

        let mut layout = self.build_layout(&styled, req.font_size_px, req.ink);
        match decision {
            WrapDecision::WrapAt(w) => {
                layout.break_all_lines(Some(w));
                layout.align(
                    Some(w),
                    parley::Alignment::Start,
                    parley::AlignmentOptions::default(),
                );
            }
            WrapDecision::Widen(w) => layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            ),
            WrapDecision::Natural => layout.align(
                None,
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            ),
        }

        let text_width = decision.box_width(layout.width());
        let text_height = layout.height();
        let width = text_width.max(0.0).ceil() as u32;
        let height = (text_height + req.font_size_px).max(0.0).ceil() as u32;

        let faces = &mut self.faces;
        let offset = (f64::from(req.offset_x), f64::from(req.offset_y));
        let bitmap = rasterize(width, height, |ctx, band| {
            ctx.set_transform(band * vello_cpu::kurbo::Affine::translate(offset));
            draw_layout(ctx, &layout, faces);
        })?;

        Ok(RenderedText {
            bitmap,
            text_width,
            text_height,
        })
    }
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: Vec<u8>) -> QuoteResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| QuoteError::validation("no font families registered from font bytes"))?;
    let name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| QuoteError::validation("registered font family has no name"))?;
    Ok(name.to_string())
}

fn paint(c: Rgb) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn draw_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<Rgb>,
    faces: &mut HashMap<u64, vello_cpu::peniko::Blob<u8>>,
) {
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                continue;
            };
            let style = glyph_run.style();
            let run = glyph_run.run();

            let font_ref = run.font();
            let blob = faces
                .entry(font_ref.data.id())
                .or_insert_with(|| vello_cpu::peniko::Blob::from(font_ref.data.data().to_vec()))
                .clone();
            let font = vello_cpu::peniko::FontData::new(blob, font_ref.index);

            ctx.set_paint(paint(style.brush));
            let glyphs = glyph_run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.font_size())
                .fill_glyphs(glyphs);

            let metrics = run.metrics();
            if let Some(deco) = &style.underline {
                let offset = deco.offset.unwrap_or(metrics.underline_offset);
                let size = deco.size.unwrap_or(metrics.underline_size);
                fill_decoration(ctx, &glyph_run, deco.brush, offset, size);
            }
            if let Some(deco) = &style.strikethrough {
                let offset = deco.offset.unwrap_or(metrics.strikethrough_offset);
                let size = deco.size.unwrap_or(metrics.strikethrough_size);
                fill_decoration(ctx, &glyph_run, deco.brush, offset, size);
            }
        }
    }
}

fn fill_decoration(
    ctx: &mut vello_cpu::RenderContext,
    glyph_run: &parley::layout::GlyphRun<'_, Rgb>,
    brush: Rgb,
    offset: f32,
    size: f32,
) {
    ctx.set_paint(paint(brush));
    let x0 = glyph_run.offset();
    let x1 = x0 + glyph_run.advance();
    let y = glyph_run.baseline() - offset;
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        f64::from(x0),
        f64::from(y - size * 0.5),
        f64::from(x1),
        f64::from(y + size * 0.5),
    ));
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
