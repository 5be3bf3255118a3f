// Copyright @yucwang 2026

use crate::math::bitmap::Bitmap;
use crate::math::constants::Float;

use image::{Rgb, RgbImage};

fn linear_to_srgb(v: Float) -> Float {
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

// Clamp to [0, 1], gamma encode and quantize to 8 bits.
pub fn quantize(v: Float) -> u8 {
    if v.is_nan() {
        return 0;
    }
    let encoded = linear_to_srgb(v.max(0.0).min(1.0));
    (encoded * 255.0 + 0.5).min(255.0) as u8
}

pub fn to_rgb_image(image: &Bitmap) -> RgbImage {
    RgbImage::from_fn(image.width() as u32, image.height() as u32, |x, y| {
        let c = image[(x as usize, y as usize)];
        Rgb([quantize(c[0]), quantize(c[1]), quantize(c[2])])
    })
}

// Write an 8-bit image; the format is picked by the image crate from the extension.
pub fn write_ldr_to_file(image: &Bitmap, file_path: &str) -> image::ImageResult<()> {
    log::info!("Starting writing LDR image: {}.", file_path);
    to_rgb_image(image).save(file_path)?;
    log::info!("LDR image written to: {}.", file_path);
    Ok(())
}
