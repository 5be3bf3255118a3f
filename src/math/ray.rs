// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f, FLOAT_MAX};

#[derive(Debug, Clone, Copy)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        Self { origin: o, dir: d.normalize(),
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(FLOAT_MAX) }
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray3f() {
        let o = Vector3f::new(0.0, 0.0, 0.0);
        let d = Vector3f::new(1.0, 0.0, 1.0);
        let ray = Ray3f::new(o, d, None, Some(10.0));
        assert_eq!(o, ray.origin());
        assert!((ray.dir().norm() - 1.0).abs() < 1e-6);

        let v1 = ray.at(std::f32::consts::SQRT_2);
        assert!((v1[0] - 1.0).abs() < 1e-5);
        assert!(v1[1].abs() < 1e-6);
        assert!((v1[2] - 1.0).abs() < 1e-5);

        assert!(ray.test_segment(5.0));
        assert!(!ray.test_segment(10.5));
        assert!(!ray.test_segment(-0.1));
    }
}
