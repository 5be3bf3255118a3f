// Copyright @yucwang 2026

use crate::core::emitter::EmitterSample;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;

// Shadow rays toward a directional light run this far.
pub const DIRECTIONAL_DISTANCE: Float = 1e10;

#[derive(Debug, Clone)]
pub struct DirectionalEmitter {
    /// Unit vector pointing toward the light, which sits at infinity.
    pub direction: Vector3f,
    pub radiance: RGBSpectrum,
}

impl DirectionalEmitter {
    pub fn new_with(direction: Vector3f, radiance: RGBSpectrum) -> Self {
        let len = direction.norm();
        let direction = if len > 0.0 { direction / len } else { Vector3f::zeros() };
        Self { direction, radiance }
    }

    pub fn sample(&self, _p: &Vector3f) -> Option<EmitterSample> {
        if self.direction.norm() <= 0.0 {
            return None;
        }

        Some(EmitterSample {
            wo: self.direction,
            distance: DIRECTIONAL_DISTANCE,
            radiance: self.radiance,
        })
    }
}
