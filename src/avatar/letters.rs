use unicode_segmentation::UnicodeSegmentation;

use crate::{
    color::palette::avatar_color,
    foundation::core::Rgb,
    foundation::error::QuoteResult,
    markup::builder::markup_for,
    message::model::User,
    render::bitmap::Bitmap,
    text::{TextRenderer, TextRequest},
};

/// Side of the generated letter avatar, before it is scaled into the card.
pub const LETTER_CANVAS_SIDE: u32 = 500;

fn first_grapheme(s: &str) -> &str {
    s.graphemes(true).next().unwrap_or("")
}

/// One or two grapheme clusters identifying `user`.
///
/// With both first and last name present this is the first cluster of each. Otherwise the
/// first name (or display name) is uppercased and split on word boundaries; the result is the
/// first cluster of the first word plus, if there are several words, the first cluster of
/// the last one. Whitespace-only segments do not count as words.
pub fn initials(user: &User) -> String {
    if !user.first_name.is_empty() && !user.last_name.is_empty() {
        let mut out = String::from(first_grapheme(&user.first_name));
        out.push_str(first_grapheme(&user.last_name));
        return out;
    }

    let source = if user.first_name.is_empty() {
        &user.name
    } else {
        &user.first_name
    };
    let upper = source.to_uppercase();
    let words: Vec<&str> = upper
        .split_word_bounds()
        .filter(|w| !w.trim().is_empty())
        .collect();

    let mut out = String::new();
    if let Some(first) = words.first() {
        out.push_str(first_grapheme(first));
    }
    if words.len() > 1
        && let Some(last) = words.last()
    {
        out.push_str(first_grapheme(last));
    }
    out
}

/// Square avatar filled with the user's identity color, initials centered in white.
pub fn letter_avatar(user: &User, text: &mut dyn TextRenderer) -> QuoteResult<Bitmap> {
    let side = LETTER_CANVAS_SIDE;
    let mut canvas = Bitmap::filled(side, side, avatar_color(user.id).to_premul());

    let letters = initials(user);
    if letters.is_empty() {
        return Ok(canvas);
    }

    let markup = markup_for(&letters, &[]);
    let req = TextRequest::new(&markup, side as f32 / 2.5, Rgb::WHITE)
        .with_max_width(side as f32 / 1.1);
    let drawn = text.render(&req)?;

    let x = ((side as f32 - drawn.text_width) / 2.0).round() as i32;
    let y = ((side as f32 - drawn.text_height) / 2.0).round() as i32;
    canvas.draw_over(&drawn.bitmap, x, y);
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/avatar/letters.rs"]
mod tests;
