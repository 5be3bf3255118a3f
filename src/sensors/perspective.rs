// Copyright @yucwang 2026

use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector2f, Vector3f, FLOAT_MAX};
use crate::math::ray::Ray3f;

pub struct PerspectiveCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    tan_half_fov_y: Float,
    aspect: Float,
    near_clip: Float,
    far_clip: Float,
    bitmap: Bitmap,
}

impl PerspectiveCamera {
    pub fn new(origin: Vector3f,
               target: Vector3f,
               up: Vector3f,
               fov_y_radians: Float,
               width: usize,
               height: usize,
               near_clip: Float,
               far_clip: Float) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward).normalize();
        let aspect = if height > 0 { width as Float / height as Float } else { 1.0 };

        Self {
            origin,
            forward,
            right,
            up,
            tan_half_fov_y: (0.5 * fov_y_radians).tan(),
            aspect,
            near_clip,
            far_clip,
            bitmap: Bitmap::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.bitmap.width()
    }

    pub fn height(&self) -> usize {
        self.bitmap.height()
    }
}

impl Sensor for PerspectiveCamera {
    fn sample_ray(&self, u: &Vector2f) -> Ray3f {
        let px = (2.0 * u.x - 1.0) * self.aspect * self.tan_half_fov_y;
        let py = (1.0 - 2.0 * u.y) * self.tan_half_fov_y;

        let d_camera = Vector3f::new(px, py, 1.0).normalize();
        let dir = (self.right * d_camera.x + self.up * d_camera.y + self.forward * d_camera.z).normalize();

        // Clip distances are measured along the view axis.
        let inv_z = if d_camera.z != 0.0 { 1.0 / d_camera.z } else { FLOAT_MAX };
        let near_t = self.near_clip * inv_z;
        let far_t = self.far_clip * inv_z;
        let origin = self.origin + dir * near_t;
        Ray3f::new(origin, dir, Some(0.0), Some(far_t - near_t))
    }

    fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    fn bitmap_mut(&mut self) -> &mut Bitmap {
        &mut self.bitmap
    }

    fn describe(&self) -> String {
        format!("PerspectiveCamera {}x{} at {:?} looking along {:?}",
                self.width(), self.height(), self.origin.as_slice(), self.forward.as_slice())
    }
}
