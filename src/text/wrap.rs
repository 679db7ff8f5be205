/// Upper bound applied to every requested maximum width.
pub const MAX_WIDTH_CLAMP: f32 = 10_000.0;
/// Characters of the text used as the body "comfortable line" sample.
pub const SAMPLE_CHARS: usize = 45;
/// Horizontal slack given to names that fit on one line.
pub const NAME_SLACK: f32 = 1.5;

/// Measurements of a text laid out without wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WrapMetrics {
    /// Width of the unwrapped layout.
    pub natural_width: f32,
    /// Height of the unwrapped layout (explicit line breaks still apply).
    pub natural_height: f32,
    /// Height of one line at the requested font size.
    pub line_height: f32,
    /// Unwrapped width of the first [`SAMPLE_CHARS`] characters.
    pub sample_width: f32,
}

/// How the text box is sized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WrapDecision {
    /// Keep natural lines; the box is the natural width.
    Natural,
    /// Break lines at this width; the box has this width.
    WrapAt(f32),
    /// Keep natural lines, start-aligned in a box of this width.
    Widen(f32),
}

impl WrapDecision {
    /// Width of the text box for a layout with `natural_width`.
    pub fn box_width(self, natural_width: f32) -> f32 {
        match self {
            Self::Natural => natural_width,
            Self::WrapAt(w) | Self::Widen(w) => w,
        }
    }
}

/// Clamp a requested maximum width into `0..=MAX_WIDTH_CLAMP`.
pub fn clamp_max_width(max_width: f32) -> f32 {
    if max_width.is_finite() {
        max_width.clamp(0.0, MAX_WIDTH_CLAMP)
    } else {
        MAX_WIDTH_CLAMP
    }
}

/// Pick the box sizing for a text measured as `m`.
///
/// Text only wraps when its natural width exceeds `max_width`. Names that fit get
/// [`NAME_SLACK`] extra room; body text spanning more than 1.5 lines while narrower than
/// its own sample is widened to the sample width.
pub fn decide_wrap(m: &WrapMetrics, max_width: f32, is_name: bool) -> WrapDecision {
    let max_width = clamp_max_width(max_width);
    if m.natural_width > max_width {
        return WrapDecision::WrapAt(max_width);
    }
    if is_name {
        return WrapDecision::Widen(m.natural_width * NAME_SLACK);
    }
    if m.natural_width < m.sample_width && m.natural_height > m.line_height * 1.5 {
        return WrapDecision::Widen(m.sample_width + 1.0);
    }
    WrapDecision::Natural
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
