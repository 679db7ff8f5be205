use crate::{
    foundation::core::{Point, Rect, Size},
    render::bitmap::fit_within,
};

/// Unscaled top-left corner of the avatar.
pub const AVATAR_ORIGIN: Point = Point::new(0.0, 15.0);

/// Sizes of the two reply bitmaps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplySizes {
    /// Reply sender name bitmap.
    pub name: Size,
    /// Reply text bitmap.
    pub text: Size,
}

/// Sizes of whatever sub-bitmaps exist for one card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutInput {
    /// Avatar image before resampling.
    pub avatar: Option<Size>,
    /// Sender name bitmap.
    pub name: Option<Size>,
    /// Message body bitmap.
    pub body: Option<Size>,
    /// Reply block bitmaps.
    pub reply: Option<ReplySizes>,
    /// Render scale applied to every card constant.
    pub scale: f64,
}

/// Where the reply block goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplyPlacement {
    /// Accent line to the left of the reply.
    pub line: Rect,
    /// Top-left of the reply name bitmap.
    pub name: Point,
    /// Top-left of the reply text bitmap.
    pub text: Point,
}

/// Placement of every part of a card, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuoteLayout {
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels, never less than 1.
    pub canvas_height: u32,
    /// Avatar target box; the avatar is resampled to its size.
    pub avatar: Option<Rect>,
    /// Rounded bubble behind the text; absent without a name or reply.
    pub bubble: Option<Rect>,
    /// Top-left of the name bitmap.
    pub name: Option<Point>,
    /// Top-left of the body bitmap.
    pub body: Option<Point>,
    /// Reply block placement.
    pub reply: Option<ReplyPlacement>,
}

/// Scaled constants of the card geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    /// Left edge of the bubble, right of the avatar column.
    pub block_x: f64,
    /// Padding inside the bubble.
    pub indent: f64,
    /// Side of the avatar box.
    pub avatar_side: f64,
    /// Bubble corner radius.
    pub radius: f64,
    /// Width of the reply accent line.
    pub line_width: f64,
}

impl Metrics {
    /// Card constants multiplied by `scale`.
    pub fn for_scale(scale: f64) -> Self {
        Self {
            block_x: 55.0 * scale,
            indent: 15.0 * scale,
            avatar_side: 50.0 * scale,
            radius: 25.0 * scale,
            line_width: 3.0 * scale,
        }
    }
}

/// Compute the card layout from the sizes of its parts.
///
/// Absent parts contribute nothing. The bubble only exists when there is a name or a reply
/// block, and the canvas is always tall enough for the avatar.
pub fn plan_layout(input: &LayoutInput) -> QuoteLayout {
    let s = input.scale;
    let m = Metrics::for_scale(s);

    let mut content_w = 0.0f64;
    if let Some(name) = input.name {
        content_w = content_w.max(name.width);
    }
    if let Some(body) = input.body {
        content_w = content_w.max(body.width + m.indent);
    }
    if let Some(reply) = input.reply {
        content_w = content_w
            .max(reply.name.width + m.indent)
            .max(reply.text.width + m.indent);
    }
    let width = content_w + m.block_x + 2.0 * m.indent;

    let mut height = match (input.name, input.body) {
        (None, Some(body)) => body.height + m.indent,
        (Some(name), Some(body)) => body.height + name.height,
        (Some(_), None) => 2.0 * m.indent,
        (None, None) => 0.0,
    };

    let name_y = if input.name.is_some() {
        m.indent
    } else {
        -m.indent - 5.0 * s
    };
    let body_x = m.block_x + m.indent;
    let mut body_y = match input.name {
        Some(name) => name.height - 5.0 * s,
        None => m.indent,
    };

    let reply = input.reply.map(|reply| {
        let name_h = reply.name.height * 1.2;
        let text_h = reply.text.height * 0.5;
        body_y += name_h + text_h;
        height += name_h + text_h;

        let x = body_x + m.indent;
        let reply_name_y = name_y + name_h;
        ReplyPlacement {
            line: Rect::from_origin_size(
                (body_x, reply_name_y),
                (m.line_width, reply.name.height + reply.text.height * 0.4),
            ),
            name: Point::new(x, reply_name_y),
            text: Point::new(x, reply_name_y + text_h),
        }
    });

    height -= 11.0 * s;

    let avatar = input.avatar.map(|size| {
        let side = m.avatar_side.round() as u32;
        let (w, h) = fit_within(
            size.width.round() as u32,
            size.height.round() as u32,
            side,
            side,
        );
        Rect::from_origin_size(AVATAR_ORIGIN, (f64::from(w), f64::from(h)))
    });

    let bubble = if (input.name.is_some() || reply.is_some()) && height > 0.0 {
        Some(Rect::new(m.block_x, 0.0, width, height))
    } else {
        None
    };

    let avatar_bottom = avatar.map_or(0.0, |r| r.y1);
    let canvas_height = height.max(avatar_bottom).max(1.0);

    QuoteLayout {
        canvas_width: width.round().max(1.0) as u32,
        canvas_height: canvas_height as u32,
        avatar,
        bubble,
        name: input.name.map(|_| Point::new(body_x, name_y - s)),
        body: input.body.map(|_| Point::new(body_x, body_y)),
        reply,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
