// Copyright @yucwang 2026

use crate::core::emitter::EmitterSample;
use crate::math::constants::Vector3f;
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug, Clone)]
pub struct PointEmitter {
    pub position: Vector3f,
    pub radiance: RGBSpectrum,
}

impl PointEmitter {
    pub fn new(position: Vector3f, radiance: RGBSpectrum) -> Self {
        Self { position, radiance }
    }

    // Inverse-square falloff from the light position.
    pub fn sample(&self, p: &Vector3f) -> Option<EmitterSample> {
        let to_light = self.position - p;
        let distance = to_light.norm();
        if distance <= 0.0 {
            return None;
        }

        Some(EmitterSample {
            wo: to_light / distance,
            distance,
            radiance: self.radiance / (distance * distance),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_light_inverse_square() {
        let light = PointEmitter::new(Vector3f::new(0.0, 0.0, 0.0), RGBSpectrum::new(4.0, 8.0, 16.0));

        let near = light.sample(&Vector3f::new(0.0, -1.0, 0.0)).expect("sample");
        let far = light.sample(&Vector3f::new(0.0, -2.0, 0.0)).expect("sample");

        assert!((near.distance - 1.0).abs() < 1e-6);
        assert!((far.distance - 2.0).abs() < 1e-6);
        assert!((near.wo - Vector3f::new(0.0, 1.0, 0.0)).norm() < 1e-6);
        for c in 0..3 {
            assert!((far.radiance[c] * 4.0 - near.radiance[c]).abs() < 1e-5);
        }
        assert_eq!(near.radiance, RGBSpectrum::new(4.0, 8.0, 16.0));
    }

    #[test]
    fn test_point_light_at_shading_point() {
        let light = PointEmitter::new(Vector3f::new(1.0, 1.0, 1.0), RGBSpectrum::splat(1.0));
        assert!(light.sample(&Vector3f::new(1.0, 1.0, 1.0)).is_none());
    }
}
