// Copyright @yucwang 2023

use crate::core::bsdf::BSDF;
use crate::math::constants::{ Float, Vector3f };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

/// Result of a successful ray query. A miss is reported as `None` by the
/// querying function, never as a flagged record.
#[derive(Clone)]
pub struct SurfaceIntersection {
    p: Vector3f,
    geo_normal: Vector3f,
    frame: Frame,
    t: Float,
    le: RGBSpectrum,
    material: Option<Arc<dyn BSDF>>,
}

impl SurfaceIntersection {
    pub fn new(new_p: Vector3f,
               new_geo_normal: Vector3f,
               new_t: Float) -> Self {
        Self { p: new_p, geo_normal: new_geo_normal,
               frame: Frame::from_normal(&new_geo_normal),
               t: new_t, le: RGBSpectrum::default(), material: None }
    }

    pub fn t(&self) -> Float {
        self.t
    }

    /// Emitted radiance, non-black only when the hit surface is a light.
    pub fn le(&self) -> RGBSpectrum {
        self.le
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn geo_normal(&self) -> Vector3f {
        self.geo_normal
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        self.frame.to_local(v)
    }

    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.frame.to_world(v)
    }

    pub fn with_le(self, new_le: RGBSpectrum) -> Self {
        Self { le: new_le, ..self }
    }

    pub fn material(&self) -> Option<&dyn BSDF> {
        self.material.as_deref()
    }

    pub fn with_material(self, new_material: Arc<dyn BSDF>) -> Self {
        Self { material: Some(new_material), ..self }
    }

    // Origin for secondary rays, pushed off the surface along the normal.
    pub fn spawn_origin(&self, epsilon: Float) -> Vector3f {
        self.p + self.geo_normal * epsilon
    }
}
