// Copyright @yucwang 2023

use crate::core::bsdf::{BSDFSampleRecord, BSDFEvalResult, BSDF};
use crate::math::constants::INV_PI;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::sample_cosine_hemisphere_pdf;

pub struct LambertianDiffuseBSDF {
    color: RGBSpectrum
}

impl BSDF for LambertianDiffuseBSDF {
    fn eval(&self, sample_record: &BSDFSampleRecord) -> BSDFEvalResult {
        BSDFEvalResult {
            value: self.color * INV_PI,
            pdf: sample_cosine_hemisphere_pdf(sample_record.wi.z),
        }
    }
}

impl LambertianDiffuseBSDF {
    pub fn new(rgb: RGBSpectrum) -> Self {
        Self {
            color: rgb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::{ PI, Vector3f };

    #[test]
    fn test_lambertian_eval() {
        let bsdf = LambertianDiffuseBSDF::new(RGBSpectrum::new(0.5, 0.25, 1.0));
        let record = BSDFSampleRecord::new(Vector3f::new(0.0, 0.0, 1.0),
                                           Vector3f::new(0.0, 0.6, 0.8),
                                           0.0);
        let result = bsdf.eval(&record);
        assert!((result.value[0] * PI - 0.5).abs() < 1e-5);
        assert!((result.value[1] * PI - 0.25).abs() < 1e-5);
        assert!((result.value[2] * PI - 1.0).abs() < 1e-5);
        assert!((result.pdf * PI - 1.0).abs() < 1e-5);
        assert!(bsdf.name().contains("LambertianDiffuseBSDF"));
    }
}
