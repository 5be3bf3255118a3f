// Copyright @yucwang 2023

use crate::math::constants::{ Float, Vector3f };
use crate::math::spectrum::RGBSpectrum;

// Definitions of types used in BSDF eval processes.
// Both directions live in the local shading frame.
pub type BSDFValue = RGBSpectrum;

#[derive(Debug, PartialEq)]
pub struct BSDFSampleRecord {
    pub wi: Vector3f,
    pub wo: Vector3f,
    pub pdf: Float,
}

#[derive(Debug, PartialEq)]
pub struct BSDFEvalResult {
    pub value: BSDFValue,
    pub pdf: Float,
}

pub trait BSDF: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
    fn eval(&self, sample_record: &BSDFSampleRecord) -> BSDFEvalResult;

    // BSDF value only, for callers that do not need the density.
    fn f(&self, wi: &Vector3f, wo: &Vector3f) -> BSDFValue {
        self.eval(&BSDFSampleRecord::new(*wi, *wo, 0.0)).value
    }
}

impl Default for BSDFSampleRecord {
    fn default() -> Self {
        Self {
            wi: Vector3f::zeros(),
            wo: Vector3f::zeros(),
            pdf: 0.0,
        }
    }
}

impl BSDFSampleRecord {
    pub fn new(wi: Vector3f, wo: Vector3f, pdf: Float) -> Self {
        Self { wi, wo, pdf }
    }
}

impl Default for BSDFEvalResult {
    fn default() -> Self {
        Self {
            value: RGBSpectrum::default(),
            pdf: 0.0,
        }
    }
}
