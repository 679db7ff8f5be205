use super::*;
use crate::markup::builder::{build_markup, markup_for};

const CANDIDATE_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
];

/// A usable font from the environment or a common system location; tests skip without one.
fn test_font() -> Option<FontConfig> {
    if std::env::var_os(FONT_ENV).is_some() {
        return FontConfig::from_env().ok();
    }
    CANDIDATE_FONTS
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .and_then(|p| FontConfig::load(p, None, None).ok())
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let err = ParleyTextRenderer::new(FontConfig {
        regular: b"not a font".to_vec(),
        ..FontConfig::default()
    })
    .unwrap_err();
    assert!(matches!(err, QuoteError::Validation(_)));
}

#[test]
fn missing_font_file_reports_path() {
    let err = FontConfig::load(Path::new("/nonexistent/quote-card.ttf"), None, None).unwrap_err();
    assert!(err.to_string().contains("quote-card.ttf"));
}

#[test]
fn config_debug_omits_bytes() {
    let cfg = FontConfig {
        regular: vec![0; 1024],
        ..FontConfig::default()
    };
    let dbg = format!("{cfg:?}");
    assert!(dbg.contains("regular_len: 1024"));
}

#[test]
fn body_text_renders_visible_pixels() {
    let Some(fonts) = test_font() else {
        return;
    };
    let mut renderer = ParleyTextRenderer::new(fonts).unwrap();
    let markup = build_markup("Hello", &[]);
    let out = renderer
        .render(&TextRequest::new(&markup, 24.0, Rgb::BLACK).with_max_width(500.0))
        .unwrap();
    assert!(out.text_width > 0.0);
    assert!(out.text_height > 0.0);
    assert_eq!(
        out.bitmap.height(),
        (out.text_height + 24.0).ceil() as u32
    );
    assert!(!out.bitmap.is_blank());
}

#[test]
fn names_get_horizontal_slack() {
    let Some(fonts) = test_font() else {
        return;
    };
    let mut renderer = ParleyTextRenderer::new(fonts).unwrap();
    let markup = build_markup("Chris", &[]);
    let body = renderer
        .render(&TextRequest::new(&markup, 22.0, Rgb::WHITE).with_max_width(1024.0))
        .unwrap();
    let name = renderer
        .render(
            &TextRequest::new(&markup, 22.0, Rgb::WHITE)
                .with_max_width(1024.0)
                .as_name(),
        )
        .unwrap();
    assert!((name.text_width - body.text_width * 1.5).abs() < 0.01);
}

#[test]
fn long_text_wraps_to_max_width() {
    let Some(fonts) = test_font() else {
        return;
    };
    let mut renderer = ParleyTextRenderer::new(fonts).unwrap();
    let markup = markup_for(&"word ".repeat(80), &[]);
    let out = renderer
        .render(&TextRequest::new(&markup, 24.0, Rgb::BLACK).with_max_width(300.0))
        .unwrap();
    assert_eq!(out.text_width, 300.0);
    assert_eq!(out.bitmap.width(), 300);
    assert!(out.text_height > 24.0 * 2.0);
}

#[test]
fn invalid_font_size_is_rejected() {
    let Some(fonts) = test_font() else {
        return;
    };
    let mut renderer = ParleyTextRenderer::new(fonts).unwrap();
    let markup = build_markup("x", &[]);
    assert!(matches!(
        renderer.render(&TextRequest::new(&markup, 0.0, Rgb::BLACK)),
        Err(QuoteError::Validation(_))
    ));
}

#[test]
fn resolve_prefers_given_paths() {
    let err = FontConfig::resolve(Some(Path::new("/nonexistent/given.ttf")), None, None)
        .unwrap_err();
    assert!(err.to_string().contains("given.ttf"));
}

#[test]
fn resolve_without_regular_font_is_a_validation_error() {
    if std::env::var_os(FONT_ENV).is_some() {
        return;
    }
    let err = FontConfig::resolve(None, None, None).unwrap_err();
    assert!(matches!(err, QuoteError::Validation(_)));
    assert!(err.to_string().contains(FONT_ENV));
}

#[test]
fn many_lines_render_past_u16_height() {
    let Some(fonts) = test_font() else {
        return;
    };
    let mut renderer = ParleyTextRenderer::new(fonts).unwrap();
    let markup = markup_for(&"x\n".repeat(1500), &[]);
    let out = renderer
        .render(&TextRequest::new(&markup, 48.0, Rgb::WHITE).with_max_width(1024.0))
        .unwrap();

    let limit = u32::from(u16::MAX);
    assert!(out.bitmap.height() > limit);
    let inked_below_limit = (limit..out.bitmap.height()).any(|y| {
        (0..out.bitmap.width()).any(|x| out.bitmap.pixel(x, y).is_some_and(|p| p[3] > 0))
    });
    assert!(inked_below_limit);
}
