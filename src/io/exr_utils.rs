/* Copyright 2020 @TwoCookingMice */

use crate::math::bitmap::Bitmap;

use exr::prelude::*;

// Write EXR Image to file, linear radiance is stored untouched.
pub fn write_exr_to_file(image: &Bitmap, file_path: &str) -> std::result::Result<(), exr::error::Error> {
    log::info!("Starting writing openexr images: {}.", file_path);

    let width = image.width();
    let pixels = image.raw_copy();
    write_rgb_file(file_path, width, image.height(), |x, y| {
        pixels[y * width + x]
    })?;

    log::info!("EXR written to: {}.", file_path);
    Ok(())
}
