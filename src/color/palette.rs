use crate::{color::contrast::is_light, foundation::core::Rgb};

/// Name colors used over light backgrounds.
pub static NAME_COLORS_LIGHT: [Rgb; 8] = [
    Rgb::from_packed(0x862a23),
    Rgb::from_packed(0x37791f),
    Rgb::from_packed(0x916604),
    Rgb::from_packed(0x0f608f),
    Rgb::from_packed(0x5d2f95),
    Rgb::from_packed(0x8f2c50),
    Rgb::from_packed(0x1c6979),
    Rgb::from_packed(0x904812),
];

/// Name colors used over dark backgrounds.
pub static NAME_COLORS_DARK: [Rgb; 8] = [
    Rgb::from_packed(0xfb6169),
    Rgb::from_packed(0x85de85),
    Rgb::from_packed(0xf3bc5c),
    Rgb::from_packed(0x65bdf3),
    Rgb::from_packed(0xb48bf2),
    Rgb::from_packed(0xff5694),
    Rgb::from_packed(0x62d4e3),
    Rgb::from_packed(0xfaa357),
];

/// Fill colors for generated letter avatars, independent of the background.
pub static AVATAR_COLORS: [Rgb; 8] = [
    Rgb::from_packed(0xc03d33),
    Rgb::from_packed(0x4fad2d),
    Rgb::from_packed(0xd09306),
    Rgb::from_packed(0x168acd),
    Rgb::from_packed(0x8544d6),
    Rgb::from_packed(0xcd4073),
    Rgb::from_packed(0x2996ad),
    Rgb::from_packed(0xce671b),
];

/// Maps a hash bucket (`|id| mod 7`) to a palette index. Index 2 is never selected.
pub static BUCKET_TO_INDEX: [usize; 7] = [0, 7, 4, 1, 6, 3, 5];

/// Ink used for link-styled runs.
pub const LINK_COLOR: Rgb = Rgb::from_packed(0x6ab7ec);

/// Palette index assigned to `user_id`.
pub fn identity_index(user_id: i64) -> usize {
    let bucket = (user_id.unsigned_abs() % 7) as usize;
    BUCKET_TO_INDEX[bucket]
}

/// Name color for `user_id`, picked from the palette matching `background`.
pub fn name_color(user_id: i64, background: Rgb) -> Rgb {
    let palette = if is_light(background) {
        &NAME_COLORS_LIGHT
    } else {
        &NAME_COLORS_DARK
    };
    palette[identity_index(user_id)]
}

/// Fill color of the generated avatar for `user_id`.
pub fn avatar_color(user_id: i64) -> Rgb {
    AVATAR_COLORS[identity_index(user_id)]
}

#[cfg(test)]
#[path = "../../tests/unit/color/palette.rs"]
mod tests;
