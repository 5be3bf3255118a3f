// Copyright @yucwang 2021

use std::time::Instant;

use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector2f};
use crate::math::spectrum::RGBSpectrum;
use indicatif::{ProgressBar, ProgressStyle};

pub use super::renderer::{RenderError, Renderer};

pub struct SimpleRenderer {
    integrator: Box<dyn Integrator>,
    camera_id: usize,
    seed: u64,
}

impl Renderer for SimpleRenderer {
    fn render(&self, scene: &mut Scene) -> Result<u128, RenderError> {
        let spp = self.integrator.samples_per_pixel();
        if spp == 0 {
            return Err(RenderError::ZeroSamplesPerPixel);
        }

        let (width, height) = scene.image_resolution(self.camera_id)
            .ok_or(RenderError::MissingSensor(self.camera_id))?;
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyFilm);
        }

        let mut sensor = scene.take_sensor(self.camera_id)
            .ok_or(RenderError::MissingSensor(self.camera_id))?;
        log::info!("Rendering {}x{} with {} through {}", width, height,
                   self.integrator.describe(), sensor.describe());

        let start = Instant::now();
        render_rows(self.integrator.as_ref(), scene, sensor.as_mut(), spp, self.seed);
        let elapsed = start.elapsed().as_micros();

        scene.insert_sensor(self.camera_id, sensor);
        log::info!("Render finished in {:.3} s", elapsed as f64 * 1e-6);
        Ok(elapsed)
    }
}

// One random stream for the whole image, consumed row by row.
fn render_rows(integrator: &dyn Integrator, scene: &Scene, sensor: &mut dyn Sensor, spp: u32, seed: u64) {
    let (width, height) = sensor.resolution();
    let inv_spp = 1.0 / spp as Float;
    let mut rng = LcgRng::new(seed);

    let progress = ProgressBar::new(height as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut row = vec![RGBSpectrum::default(); width];
    for y in 0..height {
        for (x, pixel) in row.iter_mut().enumerate() {
            let mut color = RGBSpectrum::default();
            let coords = Vector2f::new(x as Float, y as Float);
            for _ in 0..spp {
                color += integrator.trace_ray_forward(scene, &*sensor, coords, &mut rng);
            }
            *pixel = color * inv_spp;
        }

        let bitmap = sensor.bitmap_mut();
        for (x, pixel) in row.iter().enumerate() {
            bitmap[(x, y)] = *pixel;
        }
        progress.inc(1);
    }
    progress.finish_and_clear();
}

impl SimpleRenderer {
    pub fn new(integrator: Box<dyn Integrator>, camera_id: usize, seed: u64) -> Self {
        Self {
            integrator,
            camera_id,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::bitmap::Bitmap;
    use crate::math::constants::Vector3f;
    use crate::math::ray::Ray3f;

    struct TestSensor {
        bitmap: Bitmap,
    }

    impl Sensor for TestSensor {
        fn sample_ray(&self, _u: &Vector2f) -> Ray3f {
            Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None)
        }

        fn bitmap(&self) -> &Bitmap {
            &self.bitmap
        }

        fn bitmap_mut(&mut self) -> &mut Bitmap {
            &mut self.bitmap
        }
    }

    // Returns the pixel coordinates plus a random component in [0, 1).
    struct CoordIntegrator {
        spp: u32,
    }

    impl Integrator for CoordIntegrator {
        fn trace_ray_forward(&self, _scene: &Scene, _sensor: &dyn Sensor, pixel: Vector2f, rng: &mut LcgRng) -> RGBSpectrum {
            RGBSpectrum::new(pixel.x, pixel.y, rng.next_f32())
        }

        fn samples_per_pixel(&self) -> u32 {
            self.spp
        }
    }

    fn scene_with_film(width: usize, height: usize) -> Scene {
        let mut scene = Scene::new();
        scene.add_sensor(Box::new(TestSensor { bitmap: Bitmap::new(width, height) }));
        scene
    }

    #[test]
    fn test_render_fills_every_pixel_with_sample_mean() {
        let mut scene = scene_with_film(3, 2);
        let renderer = SimpleRenderer::new(Box::new(CoordIntegrator { spp: 64 }), 0, 9);
        renderer.render(&mut scene).expect("render");

        let bitmap = scene.camera(0).expect("sensor returned to scene").bitmap();
        for y in 0..2 {
            for x in 0..3 {
                let p = bitmap[(x, y)];
                assert_eq!(p[0], x as Float);
                assert_eq!(p[1], y as Float);
                assert!(p[2] > 0.3 && p[2] < 0.7);
                assert!(!p.has_nan());
            }
        }
    }

    #[test]
    fn test_render_is_deterministic_for_seed() {
        let mut a = scene_with_film(2, 2);
        let mut b = scene_with_film(2, 2);
        SimpleRenderer::new(Box::new(CoordIntegrator { spp: 3 }), 0, 42).render(&mut a).expect("render");
        SimpleRenderer::new(Box::new(CoordIntegrator { spp: 3 }), 0, 42).render(&mut b).expect("render");

        let pa = a.camera(0).expect("sensor").bitmap().raw_copy();
        let pb = b.camera(0).expect("sensor").bitmap().raw_copy();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_render_rejects_zero_spp() {
        let mut scene = scene_with_film(2, 2);
        let renderer = SimpleRenderer::new(Box::new(CoordIntegrator { spp: 0 }), 0, 0);
        assert_eq!(renderer.render(&mut scene), Err(RenderError::ZeroSamplesPerPixel));
        // The film is left untouched.
        let bitmap = scene.camera(0).expect("sensor").bitmap();
        assert!(bitmap[(1, 1)].is_black());
    }

    #[test]
    fn test_render_reports_missing_camera_and_empty_film() {
        let mut scene = scene_with_film(2, 2);
        let renderer = SimpleRenderer::new(Box::new(CoordIntegrator { spp: 1 }), 3, 0);
        assert_eq!(renderer.render(&mut scene), Err(RenderError::MissingSensor(3)));

        let mut empty = scene_with_film(0, 4);
        let renderer = SimpleRenderer::new(Box::new(CoordIntegrator { spp: 1 }), 0, 0);
        assert_eq!(renderer.render(&mut empty), Err(RenderError::EmptyFilm));
        assert!(empty.camera(0).is_some());
    }
}
