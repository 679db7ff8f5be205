use std::ops::Range;

use quick_xml::{Reader, events::Event};

use crate::foundation::error::{QuoteError, QuoteResult};

/// Style flags carried by a run of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStyle {
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Underline decoration.
    pub underline: bool,
    /// Strikethrough decoration.
    pub strikethrough: bool,
    /// Link styling (underline plus link ink).
    pub link: bool,
    /// Monospace family.
    pub monospace: bool,
}

impl RunStyle {
    /// Bold, nothing else.
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    fn with_tag(self, tag: &[u8]) -> Self {
        let mut next = self;
        match tag {
            b"b" | b"strong" => next.bold = true,
            b"i" | b"em" => next.italic = true,
            b"u" => next.underline = true,
            b"s" | b"strike" | b"del" => next.strikethrough = true,
            b"a" => next.link = true,
            b"code" | b"pre" => next.monospace = true,
            _ => {}
        }
        next
    }
}

/// A byte range of [`StyledText::text`] sharing one [`RunStyle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledRun {
    /// Byte range into the plain text.
    pub range: Range<usize>,
    /// Style applied to the range.
    pub style: RunStyle,
}

/// Plain text plus contiguous style runs covering all of it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledText {
    /// Text with markup removed; `<br/>` becomes `'\n'`.
    pub text: String,
    /// Runs in text order, adjacent runs never share a style.
    pub runs: Vec<StyledRun>,
}

impl StyledText {
    /// Single unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        let mut out = Self::default();
        out.push(&text.into(), RunStyle::default());
        out
    }

    fn push(&mut self, text: &str, style: RunStyle) {
        if text.is_empty() {
            return;
        }
        let start = self.text.len();
        self.text.push_str(text);
        let end = self.text.len();
        match self.runs.last_mut() {
            Some(last) if last.style == style && last.range.end == start => last.range.end = end,
            _ => self.runs.push(StyledRun {
                range: start..end,
                style,
            }),
        }
    }

    /// Prefix holding at most `max_chars` characters, with runs cut to match.
    pub fn prefix_chars(&self, max_chars: usize) -> Self {
        let cut = self
            .text
            .char_indices()
            .nth(max_chars)
            .map_or(self.text.len(), |(idx, _)| idx);
        let runs = self
            .runs
            .iter()
            .filter(|r| r.range.start < cut)
            .map(|r| StyledRun {
                range: r.range.start..r.range.end.min(cut),
                style: r.style,
            })
            .collect();
        Self {
            text: self.text[..cut].to_string(),
            runs,
        }
    }
}

/// Parse markup produced by the builder into plain text and style runs.
///
/// Literal newlines are layout whitespace and are dropped; line breaks come from `<br/>`.
pub fn parse_markup(markup: &str) -> QuoteResult<StyledText> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);

    let mut out = StyledText::default();
    let mut stack: Vec<RunStyle> = Vec::with_capacity(8);
    let mut entity_buf = String::with_capacity(16);

    loop {
        let current = stack.last().copied().unwrap_or_default();
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(current.with_tag(e.name().as_ref())),
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"br" {
                    out.push("\n", current);
                }
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .decode()
                    .map_err(|err| QuoteError::render(format!("markup text decode: {err}")))?;
                out.push(&text.replace('\n', ""), current);
            }
            Ok(Event::GeneralRef(e)) => {
                let name = e
                    .decode()
                    .map_err(|err| QuoteError::render(format!("markup entity decode: {err}")))?;
                entity_buf.clear();
                entity_buf.push('&');
                entity_buf.push_str(&name);
                entity_buf.push(';');
                let resolved = quick_xml::escape::unescape(&entity_buf)
                    .map_err(|err| QuoteError::render(format!("markup entity: {err}")))?;
                out.push(&resolved, current);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(QuoteError::render(format!("malformed markup: {err}"))),
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/markup/parse.rs"]
mod tests;
