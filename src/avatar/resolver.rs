use std::path::PathBuf;

use anyhow::Context as _;

use crate::{
    avatar::{
        decode::{decode_image, looks_like_svg, rasterize_svg},
        letters::letter_avatar,
    },
    foundation::error::{QuoteError, QuoteResult},
    message::model::User,
    render::{bitmap::Bitmap, shapes::circle_mask},
    text::TextRenderer,
};

/// Loaded avatars larger than this on either side are downscaled before masking.
pub const MAX_AVATAR_SIDE: u32 = 2048;

/// Source of avatar images.
pub trait AvatarLoader {
    /// Load and decode the image behind `reference`.
    fn load(&self, reference: &str) -> QuoteResult<Bitmap>;
}

/// Loads avatars from the local filesystem: plain paths or `file://` URLs, raster or SVG.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsAvatarLoader;

impl AvatarLoader for FsAvatarLoader {
    fn load(&self, reference: &str) -> QuoteResult<Bitmap> {
        let path = avatar_path(reference)?;
        let bytes =
            std::fs::read(&path).with_context(|| format!("read avatar {}", path.display()))?;
        if looks_like_svg(&bytes) {
            rasterize_svg(&bytes)
        } else {
            decode_image(&bytes)
        }
    }
}

/// Map an avatar reference to a local path. Only plain paths and `file://` URLs are accepted.
pub fn avatar_path(reference: &str) -> QuoteResult<PathBuf> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(QuoteError::validation("empty avatar reference"));
    }
    if !reference.contains("://") {
        return Ok(PathBuf::from(reference));
    }

    let url = url::Url::parse(reference).context("parse avatar url")?;
    if url.scheme() != "file" {
        return Err(QuoteError::validation(format!(
            "unsupported avatar url scheme \"{}\"",
            url.scheme()
        )));
    }
    url.to_file_path()
        .map_err(|_| QuoteError::validation("avatar url does not name a local file"))
}

/// Load `user`'s avatar, falling back to a letter avatar, and clip it to a circle.
#[tracing::instrument(skip(user, loader, text), fields(user_id = user.id))]
pub fn resolve_avatar(
    user: &User,
    loader: &dyn AvatarLoader,
    text: &mut dyn TextRenderer,
) -> QuoteResult<Bitmap> {
    let image = match loader.load(&user.avatar) {
        Ok(image) if !image.is_empty() => image,
        Ok(_) => {
            tracing::debug!("avatar decoded to an empty image; drawing letters");
            letter_avatar(user, text)?
        }
        Err(err) => {
            tracing::debug!(error = %err, "avatar unavailable; drawing letters");
            letter_avatar(user, text)?
        }
    };

    let image = if image.width() > MAX_AVATAR_SIDE || image.height() > MAX_AVATAR_SIDE {
        image.scaled_to_fit(MAX_AVATAR_SIDE, MAX_AVATAR_SIDE)?
    } else {
        image
    };
    apply_circle_mask(image)
}

/// Clip `image` to the circle (ellipse) inscribed with radius `min(w, h) / 2`.
pub fn apply_circle_mask(mut image: Bitmap) -> QuoteResult<Bitmap> {
    let mask = circle_mask(image.width(), image.height())?;
    image.mask_with(&mask)?;
    Ok(image)
}

#[cfg(test)]
#[path = "../../tests/unit/avatar/resolver.rs"]
mod tests;
