use std::{borrow::Cow, cmp::Reverse};

use crate::message::{
    entities::{ResolvedSpan, Style, resolve_spans, utf16_len},
    model::Entity,
};

/// Opening wrapper of every markup document.
pub const PREAMBLE: &str = "<div style='line-height: 90%;'>";
/// Closing wrapper of every markup document.
pub const POSTAMBLE: &str = "</div>";
/// Marker emitted after a literal newline.
pub const LINE_BREAK: &str = "<br/>";

const CODE_OPEN: &str = "<code style='font-weight: 100; font-family: \"Noto Mono\", Courier, monospace, ui-monospace;'>";
const PRE_OPEN: &str = "<pre style='font-weight: 100; font-family: \"Noto Mono\", Courier, monospace, ui-monospace;'>";
const LINK_OPEN: &str = "<a href='about:blank'>";

/// Opening marker for `style`. Styles without decoration map to `""`.
pub fn open_marker(style: Style) -> &'static str {
    match style {
        Style::Bold => "<b>",
        Style::Italic => "<i>",
        Style::Underline => "<u>",
        Style::Strikethrough => "<s>",
        Style::BotCommand
        | Style::Cashtag
        | Style::Email
        | Style::Hashtag
        | Style::Mention
        | Style::TextLink
        | Style::Url => LINK_OPEN,
        Style::Code => CODE_OPEN,
        Style::Pre => PRE_OPEN,
        Style::PhoneNumber | Style::Unknown => "",
    }
}

/// Closing marker for `style`. Mirrors [`open_marker`].
pub fn close_marker(style: Style) -> &'static str {
    match style {
        Style::Bold => "</b>",
        Style::Italic => "</i>",
        Style::Underline => "</u>",
        Style::Strikethrough => "</s>",
        Style::BotCommand
        | Style::Cashtag
        | Style::Email
        | Style::Hashtag
        | Style::Mention
        | Style::TextLink
        | Style::Url => "</a>",
        Style::Code => "</code>",
        Style::Pre => "</pre>",
        Style::PhoneNumber | Style::Unknown => "",
    }
}

/// Replace the two-character sequence `\n` (backslash, `n`) with a real newline.
pub fn normalize_escaped_newlines(text: &str) -> Cow<'_, str> {
    if text.contains("\\n") {
        Cow::Owned(text.replace("\\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Spans that are currently open, innermost last.
#[derive(Debug, Default)]
struct SpanStack {
    open: Vec<ResolvedSpan>,
}

impl SpanStack {
    fn push(&mut self, span: ResolvedSpan, out: &mut String) {
        out.push_str(open_marker(span.style));
        self.open.push(span);
    }

    /// Close spans from the top while their end falls inside `(from, to]`.
    fn close_ending_in(&mut self, from: usize, to: usize, out: &mut String) {
        while let Some(top) = self.open.last()
            && top.end > from
            && top.end <= to
        {
            out.push_str(close_marker(top.style));
            self.open.pop();
        }
    }

    fn close_all(&mut self, out: &mut String) {
        while let Some(top) = self.open.pop() {
            out.push_str(close_marker(top.style));
        }
    }
}

/// Emit nested markup for `text` with `spans` (offsets in UTF-16 code units).
///
/// Spans sharing a start open longest first, so properly nested spans always close in
/// place whatever their input order. Partially overlapping spans still produce
/// balanced markup, but closing order follows the stack rather than the input.
pub fn build_markup(text: &str, spans: &[ResolvedSpan]) -> String {
    // Outer spans open first when several share a start.
    let mut sorted = spans.to_vec();
    sorted.sort_by_key(|s| (s.start, Reverse(s.end)));

    let mut out = String::with_capacity(PREAMBLE.len() + text.len() * 2 + POSTAMBLE.len());
    out.push_str(PREAMBLE);

    let mut stack = SpanStack::default();
    let mut next = 0usize;
    let mut pos = 0usize;
    let mut utf8 = [0u8; 4];
    for ch in text.chars() {
        let end = pos + ch.len_utf16();
        while let Some(span) = sorted.get(next)
            && span.start < end
        {
            stack.push(*span, &mut out);
            next += 1;
        }

        out.push_str(&quick_xml::escape::escape(&*ch.encode_utf8(&mut utf8)));
        stack.close_ending_in(pos, end, &mut out);

        if ch == '\n' {
            out.push_str(LINE_BREAK);
        }
        pos = end;
    }

    stack.close_all(&mut out);
    out.push_str(POSTAMBLE);
    out
}

/// Full text-to-markup pass: newline normalization, span resolution, emission.
pub fn markup_for(text: &str, entities: &[Entity]) -> String {
    let text = normalize_escaped_newlines(text);
    let spans = resolve_spans(entities, utf16_len(&text));
    build_markup(&text, &spans)
}

#[cfg(test)]
#[path = "../../tests/unit/markup/builder.rs"]
mod tests;
