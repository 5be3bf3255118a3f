// Copyright @yucwang 2026

pub mod exr_utils;
pub mod ldr_utils;
pub mod obj_utils;

use crate::math::bitmap::Bitmap;

use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum ImageWriteError {
    Exr(exr::error::Error),
    Image(image::ImageError),
    UnsupportedFormat(String),
}

impl From<exr::error::Error> for ImageWriteError {
    fn from(err: exr::error::Error) -> Self {
        ImageWriteError::Exr(err)
    }
}

impl From<image::ImageError> for ImageWriteError {
    fn from(err: image::ImageError) -> Self {
        ImageWriteError::Image(err)
    }
}

impl fmt::Display for ImageWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageWriteError::Exr(err) => write!(f, "exr error: {}", err),
            ImageWriteError::Image(err) => write!(f, "image error: {}", err),
            ImageWriteError::UnsupportedFormat(ext) => write!(f, "unsupported output format: '{}'", ext),
        }
    }
}

impl std::error::Error for ImageWriteError {}

/// Save a rendered bitmap, `.exr` keeps linear radiance, `.png` / `.jpg` /
/// `.bmp` / `.tga` are tonemapped to 8-bit sRGB.
pub fn write_image(image: &Bitmap, file_path: &str) -> Result<(), ImageWriteError> {
    let ext = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "exr" => exr_utils::write_exr_to_file(image, file_path)?,
        "png" | "jpg" | "jpeg" | "bmp" | "tga" => ldr_utils::write_ldr_to_file(image, file_path)?,
        _ => return Err(ImageWriteError::UnsupportedFormat(ext)),
    }
    Ok(())
}
