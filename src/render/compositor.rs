use crate::{
    foundation::core::{Point, Rgb},
    foundation::error::QuoteResult,
    render::{
        bitmap::Bitmap,
        layout::{LayoutInput, Metrics, QuoteLayout, ReplySizes, plan_layout},
        shapes::rounded_rect,
    },
};

/// Reply block bitmaps; both are required for the block to be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplyParts {
    /// Reply sender name.
    pub name: Bitmap,
    /// Reply text.
    pub text: Bitmap,
}

/// The rendered pieces of one card.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuoteParts {
    /// Avatar image; resampled into the avatar box.
    pub avatar: Option<Bitmap>,
    /// Sender name.
    pub name: Option<Bitmap>,
    /// Message body.
    pub body: Option<Bitmap>,
    /// Reply block.
    pub reply: Option<ReplyParts>,
}

impl QuoteParts {
    /// Layout input describing these parts at `scale`.
    pub fn layout_input(&self, scale: f64) -> LayoutInput {
        LayoutInput {
            avatar: self.avatar.as_ref().map(Bitmap::size),
            name: self.name.as_ref().map(Bitmap::size),
            body: self.body.as_ref().map(Bitmap::size),
            reply: self.reply.as_ref().map(|r| ReplySizes {
                name: r.name.size(),
                text: r.text.size(),
            }),
            scale,
        }
    }
}

/// Colors of the non-text elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardColors {
    /// Bubble fill, the request background color.
    pub bubble: Rgb,
    /// Reply accent line.
    pub accent: Rgb,
}

/// Lay out and composite `parts` into one canvas.
pub fn compose(parts: &QuoteParts, colors: CardColors, scale: f64) -> QuoteResult<Bitmap> {
    let plan = plan_layout(&parts.layout_input(scale));
    tracing::debug!(
        width = plan.canvas_width,
        height = plan.canvas_height,
        "card layout"
    );
    draw_plan(parts, &plan, colors, Metrics::for_scale(scale).radius)
}

/// Execute `plan`: avatar, bubble, name, body, accent line, reply name, reply text.
pub fn draw_plan(
    parts: &QuoteParts,
    plan: &QuoteLayout,
    colors: CardColors,
    radius: f64,
) -> QuoteResult<Bitmap> {
    let mut canvas = Bitmap::new(plan.canvas_width, plan.canvas_height);

    if let (Some(avatar), Some(target)) = (&parts.avatar, plan.avatar) {
        let scaled = avatar.resized(target.width() as u32, target.height() as u32)?;
        blit(&mut canvas, &scaled, target.origin());
    }

    if let Some(bubble) = plan.bubble {
        let rect = rounded_rect(
            bubble.width() as u32,
            bubble.height() as u32,
            radius,
            colors.bubble,
        )?;
        blit(&mut canvas, &rect, bubble.origin());
    }

    if let (Some(name), Some(at)) = (&parts.name, plan.name) {
        blit(&mut canvas, name, at);
    }
    if let (Some(body), Some(at)) = (&parts.body, plan.body) {
        blit(&mut canvas, body, at);
    }

    if let (Some(reply), Some(place)) = (&parts.reply, plan.reply) {
        let line = Bitmap::filled(
            place.line.width() as u32,
            place.line.height() as u32,
            colors.accent.to_premul(),
        );
        blit(&mut canvas, &line, place.line.origin());
        blit(&mut canvas, &reply.name, place.name);
        blit(&mut canvas, &reply.text, place.text);
    }

    Ok(canvas)
}

fn blit(canvas: &mut Bitmap, src: &Bitmap, at: Point) {
    canvas.draw_over(src, at.x as i32, at.y as i32);
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
