use anyhow::Context as _;

use crate::foundation::{
    core::Size,
    error::{QuoteError, QuoteResult},
    math::{mul_div255_u8, unpremultiply_rgba8_in_place},
};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Owned premultiplied RGBA8 raster, row-major, tightly packed.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl Bitmap {
    /// Fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Bitmap with every pixel set to `px`.
    pub fn filled(width: u32, height: u32, px: PremulRgba8) -> Self {
        let len = width as usize * height as usize;
        let mut data = Vec::with_capacity(len * 4);
        for _ in 0..len {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap existing premultiplied bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> QuoteResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(QuoteError::render(format!(
                "bitmap byte length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub(crate) fn from_pixmap(pixmap: &vello_cpu::Pixmap, width: u16, height: u16) -> Self {
        Self {
            width: u32::from(width),
            height: u32::from(height),
            data: pixmap.data_as_u8_slice().to_vec(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as floating point, for layout arithmetic.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Raw premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// `true` when the bitmap has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `true` when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Source-over `src` with its top-left corner at `(x, y)`; out-of-bounds parts are clipped.
    pub fn draw_over(&mut self, src: &Bitmap, x: i32, y: i32) {
        let dst_w = i64::from(self.width);
        let dst_h = i64::from(self.height);
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(src.width)).min(dst_w);
        let y1 = (i64::from(y) + i64::from(src.height)).min(dst_h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let run = (x1 - x0) as usize * 4;
        for dy in y0..y1 {
            let sy = (dy - i64::from(y)) as usize;
            let sx = (x0 - i64::from(x)) as usize;
            let s_start = (sy * src.width as usize + sx) * 4;
            let d_start = (dy as usize * self.width as usize + x0 as usize) * 4;
            let s_row = &src.data[s_start..s_start + run];
            let d_row = &mut self.data[d_start..d_start + run];
            for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
                let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
                d.copy_from_slice(&out);
            }
        }
    }

    /// Overwrite the rows starting at `y` with `src`, which must have the same width.
    pub(crate) fn write_rows(&mut self, y: u32, src: &Bitmap) -> QuoteResult<()> {
        if src.width != self.width || u64::from(y) + u64::from(src.height) > u64::from(self.height)
        {
            return Err(QuoteError::render(format!(
                "rows {}x{} at y={y} do not fit bitmap {}x{}",
                src.width, src.height, self.width, self.height
            )));
        }
        let start = y as usize * self.width as usize * 4;
        self.data[start..start + src.data.len()].copy_from_slice(&src.data);
        Ok(())
    }

    /// Multiply every pixel by the coverage (alpha) of `mask`, which must match in size.
    pub fn mask_with(&mut self, mask: &Bitmap) -> QuoteResult<()> {
        if self.width != mask.width || self.height != mask.height {
            return Err(QuoteError::render(format!(
                "mask {}x{} does not match bitmap {}x{}",
                mask.width, mask.height, self.width, self.height
            )));
        }
        for (d, m) in self.data.chunks_exact_mut(4).zip(mask.data.chunks_exact(4)) {
            let coverage = u16::from(m[3]);
            for c in d.iter_mut() {
                *c = mul_div255_u8(u16::from(*c), coverage);
            }
        }
        Ok(())
    }

    /// Resample to exactly `width x height` (premultiplied data filters without fringes).
    pub fn resized(&self, width: u32, height: u32) -> QuoteResult<Self> {
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }
        if self.is_empty() || width == 0 || height == 0 {
            return Ok(Self::new(width, height));
        }
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .context("wrap bitmap as image buffer")?;
        let out = image::imageops::resize(
            &img,
            width,
            height,
            image::imageops::FilterType::Triangle,
        );
        Ok(Self {
            width,
            height,
            data: out.into_raw(),
        })
    }

    /// Largest aspect-preserving resample that fits inside `max_w x max_h`.
    pub fn scaled_to_fit(&self, max_w: u32, max_h: u32) -> QuoteResult<Self> {
        let (w, h) = fit_within(self.width, self.height, max_w, max_h);
        self.resized(w, h)
    }

    /// Straight-alpha copy for encoding.
    pub fn to_rgba_image(&self) -> QuoteResult<image::RgbaImage> {
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        let img = image::RgbaImage::from_raw(self.width, self.height, data)
            .context("wrap bitmap as image buffer")?;
        Ok(img)
    }
}

/// Aspect-preserving size of `w x h` scaled to fit `max_w x max_h` (at least 1 px per side).
pub fn fit_within(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if w == 0 || h == 0 {
        return (0, 0);
    }
    let sx = f64::from(max_w) / f64::from(w);
    let sy = f64::from(max_h) / f64::from(h);
    let s = sx.min(sy);
    let fw = ((f64::from(w) * s).round() as u32).clamp(1, max_w.max(1));
    let fh = ((f64::from(h) * s).round() as u32).clamp(1, max_h.max(1));
    (fw, fh)
}

/// Premultiplied source-over.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/bitmap.rs"]
mod tests;
