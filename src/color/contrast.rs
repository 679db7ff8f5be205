use crate::foundation::core::Rgb;

/// Perceived brightness (HSP model), in `0.0..=255.0`.
pub fn perceived_brightness(c: Rgb) -> f64 {
    let r = f64::from(c.r);
    let g = f64::from(c.g);
    let b = f64::from(c.b);
    (0.299 * r * r + 0.587 * g * g + 0.114 * b * b).sqrt()
}

/// `true` when `c` reads as a light background.
pub fn is_light(c: Rgb) -> bool {
    perceived_brightness(c) > 127.5
}

/// Default ink for text and accents drawn over `background`.
pub fn ink_for(background: Rgb) -> Rgb {
    if is_light(background) {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/contrast.rs"]
mod tests;
