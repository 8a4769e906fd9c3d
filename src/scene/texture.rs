//! Provides decoded texture data and loaders for scene texture sources.
//!
//! A source is either a base64 data URL (`data:image/png;base64,...`) or an
//! image file path, resolved against the scene's directory.
//!
//! # Examples
//! ```
//! use rawcube::scene::texture::load_texture_from_data_url;
//!
//! let data_url = "data:image/png;base64,\
//! iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAAEElEQVR4AQEFAPr/AP////8J+wP9o9FJCgAAAABJRU5ErkJggg==";
//! let texture = load_texture_from_data_url("dot", data_url).unwrap();
//! assert_eq!(texture.width, 1);
//! ```

use std::path::Path;

use base64::Engine;
use image::{DynamicImage, GenericImageView};

use super::SceneError;

/// Decoded RGBA texture data for sampling.
///
/// # Examples
/// ```
/// use rawcube::scene::TextureData;
///
/// let tex = TextureData {
///     name: "white".to_string(),
///     width: 1,
///     height: 1,
///     data: vec![255, 255, 255, 255],
/// };
/// assert_eq!(tex.sample(0.5, 0.5), [1.0, 1.0, 1.0, 1.0]);
/// ```
#[derive(Clone, Debug)]
pub struct TextureData {
    /// The name the scene refers to this texture by.
    pub name: String,
    /// The texture width in pixels.
    pub width: u32,
    /// The texture height in pixels.
    pub height: u32,
    /// RGBA pixel data stored row-major.
    pub data: Vec<u8>,
}

impl TextureData {
    fn from_image(name: &str, img: DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            name: name.to_string(),
            width,
            height,
            data: img.to_rgba8().into_raw(),
        }
    }

    /// Samples the texture at normalized UV coordinates (with wrapping).
    pub fn sample(&self, u: f32, v: f32) -> [f32; 4] {
        let u = u.rem_euclid(1.0);
        let v = v.rem_euclid(1.0);

        let x = ((u * self.width as f32) as u32).min(self.width.saturating_sub(1));
        let y = ((v * self.height as f32) as u32).min(self.height.saturating_sub(1));
        let idx = ((y * self.width + x) * 4) as usize;

        match self.data.get(idx..idx + 4) {
            Some(px) => [
                px[0] as f32 / 255.0,
                px[1] as f32 / 255.0,
                px[2] as f32 / 255.0,
                px[3] as f32 / 255.0,
            ],
            None => [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Loads a texture from a base64-encoded data URL.
///
/// # Errors
/// Returns [`SceneError::Texture`] if the source is not a data URL or cannot be decoded.
pub fn load_texture_from_data_url(name: &str, source: &str) -> Result<TextureData, SceneError> {
    let invalid = |reason: String| SceneError::Texture {
        name: name.to_string(),
        reason,
    };

    if !source.starts_with("data:") {
        return Err(invalid("not a data URL".to_string()));
    }
    let comma_pos = source
        .find(',')
        .ok_or_else(|| invalid("data URL has no payload".to_string()))?;
    let encoded = &source[(comma_pos + 1)..];

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| invalid(format!("bad base64: {}", e)))?;
    let img = image::load_from_memory(&bytes).map_err(|e| invalid(e.to_string()))?;

    Ok(TextureData::from_image(name, img))
}

/// Loads a texture from an image file.
///
/// # Errors
/// Returns [`SceneError::Texture`] if the file cannot be opened or decoded.
pub fn load_texture_from_path(name: &str, path: &Path) -> Result<TextureData, SceneError> {
    let img = image::open(path).map_err(|e| SceneError::Texture {
        name: name.to_string(),
        reason: format!("{}: {}", path.display(), e),
    })?;
    Ok(TextureData::from_image(name, img))
}

/// Loads a texture from a data URL or a path relative to `base_dir`.
///
/// # Errors
/// Returns [`SceneError::Texture`] if the source cannot be read or decoded.
pub fn load_texture(name: &str, source: &str, base_dir: &Path) -> Result<TextureData, SceneError> {
    let texture = if source.starts_with("data:") {
        load_texture_from_data_url(name, source)?
    } else {
        load_texture_from_path(name, &base_dir.join(source))?
    };
    tracing::debug!(
        texture = name,
        width = texture.width,
        height = texture.height,
        "loaded texture"
    );
    Ok(texture)
}
