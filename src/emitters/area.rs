// Copyright @yucwang 2026

use crate::core::emitter::EmitterSample;
use crate::core::interaction::SurfaceIntersection;
use crate::core::rng::LcgRng;
use crate::core::shape::Shape;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use crate::shapes::triangle::Triangle;

/// One-sided rectangular emitter spanning `center ± vx ± vy`, emitting
/// constant radiance on the side `normal` points to.
#[derive(Debug, Clone)]
pub struct AreaEmitter {
    center: Vector3f,
    vx: Vector3f,
    vy: Vector3f,
    normal: Vector3f,
    radiance: RGBSpectrum,
    triangles: [Triangle; 2],
}

impl AreaEmitter {
    pub fn new(center: Vector3f, vx: Vector3f, vy: Vector3f, normal: Vector3f, radiance: RGBSpectrum) -> Self {
        let len = normal.norm();
        let normal = if len > 0.0 { normal / len } else { normal };

        let v1 = center + vx - vy;
        let v2 = center + vx + vy;
        let v3 = center - vx + vy;
        let v4 = center - vx - vy;

        Self {
            center,
            vx,
            vy,
            normal,
            radiance,
            triangles: [Triangle::new(v1, v2, v3), Triangle::new(v1, v3, v4)],
        }
    }

    pub fn center(&self) -> Vector3f {
        self.center
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    pub fn radiance(&self) -> RGBSpectrum {
        self.radiance
    }

    pub fn surface_area(&self) -> Float {
        4.0 * self.vx.cross(&self.vy).norm()
    }

    // Uniform point on the rectangle, converted from area to solid angle measure.
    pub fn sample(&self, p: &Vector3f, rng: &mut LcgRng) -> Option<EmitterSample> {
        let u = rng.next_f32() - 0.5;
        let v = rng.next_f32() - 0.5;
        let light_p = self.center + 2.0 * u * self.vx + 2.0 * v * self.vy;

        let to_light = light_p - p;
        let distance = to_light.norm();
        if distance <= 0.0 {
            return None;
        }
        let wo = to_light / distance;

        // The emitting face must look back at the shading point.
        let cos_light = wo.dot(&self.normal);
        if cos_light >= 0.0 {
            return None;
        }

        let scale = self.surface_area() / (distance * distance) * cos_light.abs();
        Some(EmitterSample { wo, distance, radiance: self.radiance * scale })
    }

    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        if self.normal.dot(&ray.dir()) >= 0.0 {
            return None;
        }

        self.triangles
            .iter()
            .find_map(|tri| tri.ray_intersection(ray))
            .map(|hit| SurfaceIntersection::new(hit.p(), self.normal, hit.t()).with_le(self.radiance))
    }
}
