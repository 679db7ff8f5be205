use vello_cpu::kurbo::{Affine, Shape as _};

use crate::{
    foundation::core::Rgb,
    foundation::error::{QuoteError, QuoteResult},
    render::bitmap::Bitmap,
};

const PATH_TOLERANCE: f64 = 0.1;

/// Rows rendered per `vello_cpu` pass; pixmap sides are limited to `u16`.
pub(crate) const BAND_ROWS: u32 = 8192;

/// Rasterize vector drawing commands into a fresh `width x height` bitmap.
///
/// Tall bitmaps are drawn in bands of at most [`BAND_ROWS`] rows. `draw` runs once per band
/// and must compose the band transform in front of its own transforms.
pub(crate) fn rasterize(
    width: u32,
    height: u32,
    draw: impl FnMut(&mut vello_cpu::RenderContext, Affine),
) -> QuoteResult<Bitmap> {
    rasterize_in_bands(width, height, BAND_ROWS, draw)
}

pub(crate) fn rasterize_in_bands(
    width: u32,
    height: u32,
    band_rows: u32,
    mut draw: impl FnMut(&mut vello_cpu::RenderContext, Affine),
) -> QuoteResult<Bitmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| QuoteError::render("raster width exceeds u16"))?;
    let band_rows = band_rows.clamp(1, u32::from(u16::MAX));
    let mut out = Bitmap::new(width, height);
    if w == 0 || height == 0 {
        return Ok(out);
    }

    let mut band_y = 0u32;
    while band_y < height {
        let h = u16::try_from((height - band_y).min(band_rows))
            .map_err(|_| QuoteError::render("raster band exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        draw(&mut ctx, Affine::translate((0.0, -f64::from(band_y))));
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        out.write_rows(band_y, &Bitmap::from_pixmap(&pixmap, w, h))?;
        band_y += u32::from(h);
    }
    Ok(out)
}

/// Solid rounded rectangle filling the whole bitmap; `radius` is capped at half the short side.
pub fn rounded_rect(width: u32, height: u32, radius: f64, color: Rgb) -> QuoteResult<Bitmap> {
    let w = f64::from(width);
    let h = f64::from(height);
    let r = radius.max(0.0).min(w.min(h) / 2.0);
    rasterize(width, height, |ctx, band| {
        ctx.set_transform(band);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, 255,
        ));
        let shape = vello_cpu::kurbo::RoundedRect::new(0.0, 0.0, w, h, r);
        ctx.fill_path(&shape.to_path(PATH_TOLERANCE));
    })
}

/// Coverage mask of the circle (ellipse for non-square sizes) inscribed in `width x height`.
pub fn circle_mask(width: u32, height: u32) -> QuoteResult<Bitmap> {
    let r = f64::from(width.min(height)) / 2.0;
    rounded_rect(width, height, r, Rgb::WHITE)
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
