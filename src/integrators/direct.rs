// Copyright @yucwang 2026

use std::fmt;
use std::str::FromStr;

use crate::core::bsdf::{BSDFSampleRecord, BSDF};
use crate::core::emitter::Emitter;
use crate::core::integrator::Integrator;
use crate::core::interaction::SurfaceIntersection;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector2f, Vector3f, SHADOW_EPSILON};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{sample_cosine_hemisphere, sample_cosine_hemisphere_pdf,
                        sample_uniform_hemisphere, sample_uniform_hemisphere_pdf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingStrategy {
    Uniform,
    CosineWeighted,
    Importance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError(pub String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sampling strategy '{}' (expected uniform, cosine or importance)", self.0)
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for SamplingStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "uniform" => Ok(SamplingStrategy::Uniform),
            "cosine" => Ok(SamplingStrategy::CosineWeighted),
            "importance" => Ok(SamplingStrategy::Importance),
            other => Err(ParseStrategyError(other.to_string())),
        }
    }
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SamplingStrategy::Uniform => "uniform",
            SamplingStrategy::CosineWeighted => "cosine",
            SamplingStrategy::Importance => "importance",
        };
        f.write_str(name)
    }
}

impl Default for SamplingStrategy {
    fn default() -> Self {
        SamplingStrategy::Importance
    }
}

/// Single-bounce estimator: radiance reflected once off the first visible
/// surface, plus emitters the camera ray sees directly.
pub struct DirectIntegrator {
    pub strategy: SamplingStrategy,
    pub samples_per_pixel: u32,
}

impl DirectIntegrator {
    pub fn new(strategy: SamplingStrategy, samples_per_pixel: u32) -> Self {
        Self { strategy, samples_per_pixel }
    }

    // Unoccluded light arriving at `its` from one emitter sample, times the
    // BSDF and the cosine at the receiver.
    fn shade_emitter_sample(&self,
                            scene: &Scene,
                            its: &SurfaceIntersection,
                            bsdf: &dyn BSDF,
                            view_local: &Vector3f,
                            emitter: &Emitter,
                            rng: &mut LcgRng) -> RGBSpectrum {
        let sample = match emitter.sample(&its.p(), rng) {
            Some(sample) => sample,
            None => return RGBSpectrum::default(),
        };

        let shadow_ray = Ray3f::new(its.spawn_origin(SHADOW_EPSILON), sample.wo, None, Some(sample.distance));
        if scene.ray_intersection_t(&shadow_ray) {
            return RGBSpectrum::default();
        }

        let f = bsdf.f(&its.to_local(&sample.wo), view_local);
        f * sample.radiance * its.geo_normal().dot(&sample.wo).abs()
    }

    fn estimate_hemisphere(&self,
                           scene: &Scene,
                           its: &SurfaceIntersection,
                           bsdf: &dyn BSDF,
                           view_local: &Vector3f,
                           rng: &mut LcgRng) -> RGBSpectrum {
        let u = rng.next_2d();
        let (local_dir, pdf) = match self.strategy {
            SamplingStrategy::CosineWeighted => {
                let d = sample_cosine_hemisphere(&u);
                (d, sample_cosine_hemisphere_pdf(d.z))
            }
            _ => (sample_uniform_hemisphere(&u), sample_uniform_hemisphere_pdf()),
        };

        let mut result = RGBSpectrum::default();
        if pdf > 0.0 {
            let wo = its.to_world(&local_dir).normalize();
            let ray = Ray3f::new(its.spawn_origin(SHADOW_EPSILON), wo, None, None);

            if let Some(light_hit) = scene.ray_emitter_intersection(&ray) {
                let unblocked = scene.ray_intersection(&ray)
                    .map_or(true, |occluder| occluder.t() > light_hit.t());
                if unblocked {
                    let record = BSDFSampleRecord::new(local_dir, *view_local, pdf);
                    let f = bsdf.eval(&record).value;
                    let weight = local_dir.z.abs() / pdf;
                    result += f * light_hit.le() * weight;
                }
            }
        }

        // Delta lights cannot be hit by a hemisphere direction.
        for emitter in scene.emitters().iter().filter(|e| !e.is_area()) {
            result += self.shade_emitter_sample(scene, its, bsdf, view_local, emitter, rng);
        }

        result
    }

    fn estimate_importance(&self,
                           scene: &Scene,
                           its: &SurfaceIntersection,
                           bsdf: &dyn BSDF,
                           view_local: &Vector3f,
                           rng: &mut LcgRng) -> RGBSpectrum {
        let emitters = scene.emitters();
        if emitters.is_empty() {
            return RGBSpectrum::default();
        }

        // One light picked uniformly; its term is added unscaled.
        let count = emitters.len();
        let index = ((rng.next_f32() * count as Float) as usize).min(count - 1);
        self.shade_emitter_sample(scene, its, bsdf, view_local, &emitters[index], rng)
    }
}

impl Integrator for DirectIntegrator {
    fn trace_ray_forward(&self, scene: &Scene, sensor: &dyn Sensor, pixel: Vector2f, rng: &mut LcgRng) -> RGBSpectrum {
        let (width, height) = sensor.resolution();
        let jitter_x = rng.next_f32() - 0.5;
        let jitter_y = rng.next_f32() - 0.5;
        let film = Vector2f::new((pixel.x + 0.5 + jitter_x) / width as Float,
                                 (pixel.y + 0.5 + jitter_y) / height as Float);
        let ray = sensor.sample_ray(&film);

        let mut radiance = RGBSpectrum::default();
        if let Some(its) = scene.ray_intersection(&ray) {
            if let Some(bsdf) = its.material() {
                let view_local = its.to_local(&(-ray.dir()));
                radiance += match self.strategy {
                    SamplingStrategy::Uniform | SamplingStrategy::CosineWeighted =>
                        self.estimate_hemisphere(scene, &its, bsdf, &view_local, rng),
                    SamplingStrategy::Importance =>
                        self.estimate_importance(scene, &its, bsdf, &view_local, rng),
                };
            }
        }

        // Emitters seen directly, regardless of what the geometry query found.
        for emitter in scene.emitters() {
            if let Some(light_hit) = emitter.ray_intersection(&ray) {
                radiance += light_hit.le();
            }
        }

        radiance
    }

    fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    fn describe(&self) -> String {
        format!("DirectIntegrator({} sampling, {} spp)", self.strategy, self.samples_per_pixel)
    }
}
