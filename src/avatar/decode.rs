use anyhow::Context;

use crate::{
    foundation::error::{QuoteError, QuoteResult},
    foundation::math::premultiply_rgba8_in_place,
    render::bitmap::Bitmap,
};

/// Decode encoded raster bytes (PNG, JPEG, ...) into a premultiplied bitmap.
pub fn decode_image(bytes: &[u8]) -> QuoteResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    Bitmap::from_premul_rgba8(width, height, rgba8_premul)
}

/// Parse and rasterize SVG bytes at their intrinsic size.
pub fn rasterize_svg(bytes: &[u8]) -> QuoteResult<Bitmap> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

    let size = tree.size();
    let width = size.width().ceil().max(1.0) as u32;
    let height = size.height().ceil().max(1.0) as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| QuoteError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    Bitmap::from_premul_rgba8(width, height, pixmap.data().to_vec())
}

/// Sniff whether `bytes` look like an SVG document.
pub fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

#[cfg(test)]
#[path = "../../tests/unit/avatar/decode.rs"]
mod tests;
