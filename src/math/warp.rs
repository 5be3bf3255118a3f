// Copyright @yucwang 2023

use super::constants::{ INV_PI, INV_2PI, PI, Float, Vector2f, Vector3f };

// Directions are expressed in the local shading frame, normal = +z.

pub fn sample_uniform_hemisphere(u: &Vector2f) -> Vector3f {
    // theta = acos(u.x), so cos(theta) is u.x itself.
    let z: Float = u.x;
    let r: Float = (1. - z * z).max(0.).sqrt();
    let phi: Float = 2. * PI * u.y;

    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

pub fn sample_uniform_hemisphere_pdf() -> Float {
    INV_2PI
}

pub fn sample_cosine_hemisphere(u: &Vector2f) -> Vector3f {
    let r: Float = u.x.max(0.).sqrt();
    let phi: Float = 2. * PI * u.y;

    Vector3f::new(r * phi.cos(), r * phi.sin(), (1. - u.x).max(0.).sqrt())
}

pub fn sample_cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta.max(0.) * INV_PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;

    #[test]
    fn test_hemisphere_samples_are_unit_and_upper() {
        let mut rng = LcgRng::new(7);
        for _ in 0..2048 {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            for v in &[sample_uniform_hemisphere(&u), sample_cosine_hemisphere(&u)] {
                assert!((v.norm() - 1.0).abs() < 1e-4);
                assert!(v.z >= -1e-6);
            }
        }
    }

    #[test]
    fn test_hemisphere_sample_corners() {
        let up = sample_uniform_hemisphere(&Vector2f::new(1.0, 0.0));
        assert!((up.z - 1.0).abs() < 1e-6);

        let grazing = sample_cosine_hemisphere(&Vector2f::new(1.0, 0.25));
        assert!(grazing.z.abs() < 1e-6);
        assert!((grazing.y - 1.0).abs() < 1e-5);

        let straight = sample_cosine_hemisphere(&Vector2f::new(0.0, 0.5));
        assert!((straight.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_hemisphere_pdfs() {
        assert!((sample_uniform_hemisphere_pdf() * 2.0 * PI - 1.0).abs() < 1e-5);
        assert!((sample_cosine_hemisphere_pdf(1.0) * PI - 1.0).abs() < 1e-5);
        assert_eq!(sample_cosine_hemisphere_pdf(-0.5), 0.0);
    }

    #[test]
    fn test_cosine_samples_mean_cosine() {
        // E[cos] under pdf cos/pi is 2/3.
        let mut rng = LcgRng::new(11);
        let n = 20000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            sum += sample_cosine_hemisphere(&u).z as f64;
        }
        let mean = sum / n as f64;
        assert!((mean - 2.0 / 3.0).abs() < 0.01);
    }
}
