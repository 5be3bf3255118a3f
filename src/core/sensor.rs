// Copyright @yucwang 2026

use crate::math::bitmap::Bitmap;
use crate::math::constants::Vector2f;
use crate::math::ray::Ray3f;

pub trait Sensor: Sync {
    /// Primary ray through normalized film coordinates, (0, 0) is the top-left corner.
    fn sample_ray(&self, u: &Vector2f) -> Ray3f;
    fn bitmap(&self) -> &Bitmap;
    fn bitmap_mut(&mut self) -> &mut Bitmap;

    /// Film size as (width, height).
    fn resolution(&self) -> (usize, usize) {
        self.bitmap().resolution()
    }

    fn describe(&self) -> String {
        let (width, height) = self.resolution();
        format!("Sensor {}x{}", width, height)
    }
}
