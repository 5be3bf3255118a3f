// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

use std::ops;

/// Linear RGB radiance / reflectance triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RGBSpectrum {
    rgb: Vector3f
}

impl Default for RGBSpectrum {
    fn default() -> Self {
        Self { rgb: Vector3f::new(0.0f32, 0.0f32, 0.0f32) }
    }
}

impl RGBSpectrum {
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Self { rgb: Vector3f::new(r, g, b) }
    }

    pub fn from_vector(rgb: Vector3f) -> Self {
        Self { rgb }
    }

    pub fn splat(v: Float) -> Self {
        Self::new(v, v, v)
    }

    pub fn to_vector(&self) -> Vector3f {
        self.rgb
    }

    pub fn is_black(&self) -> bool {
        self.rgb.iter().all(|c| *c == 0.0)
    }

    pub fn has_negative(&self) -> bool {
        self.rgb.iter().any(|c| *c < 0.0)
    }

    pub fn has_nan(&self) -> bool {
        self.rgb.iter().any(|c| c.is_nan())
    }

    pub fn max_component(&self) -> Float {
        self.rgb.max()
    }
}

impl ops::Index<usize> for RGBSpectrum {
    type Output = Float;

    fn index(&self, idx: usize) -> &Float {
        &self.rgb[idx]
    }
}

impl ops::Add for RGBSpectrum {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { rgb: self.rgb + rhs.rgb }
    }
}

impl ops::AddAssign for RGBSpectrum {
    fn add_assign(&mut self, rhs: Self) {
        self.rgb += rhs.rgb;
    }
}

impl ops::Sub for RGBSpectrum {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { rgb: self.rgb - rhs.rgb }
    }
}

// Component-wise product.
impl ops::Mul for RGBSpectrum {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self { rgb: self.rgb.component_mul(&rhs.rgb) }
    }
}

impl ops::Mul<Float> for RGBSpectrum {
    type Output = Self;

    fn mul(self, rhs: Float) -> Self {
        Self { rgb: self.rgb * rhs }
    }
}

impl ops::Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    fn mul(self, rhs: RGBSpectrum) -> RGBSpectrum {
        RGBSpectrum { rgb: rhs.rgb * self }
    }
}

impl ops::Div<Float> for RGBSpectrum {
    type Output = Self;

    fn div(self, rhs: Float) -> Self {
        Self { rgb: self.rgb / rhs }
    }
}

impl ops::DivAssign<Float> for RGBSpectrum {
    fn div_assign(&mut self, rhs: Float) {
        self.rgb /= rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::RGBSpectrum;

    #[test]
    fn test_spectrum_arithmetic() {
        let a = RGBSpectrum::new(1.0, 2.0, 3.0);
        let b = RGBSpectrum::new(0.5, 0.5, 2.0);

        let prod = a * b;
        assert_eq!(prod, RGBSpectrum::new(0.5, 1.0, 6.0));

        let mut acc = RGBSpectrum::default();
        assert!(acc.is_black());
        acc += a;
        acc += a;
        acc /= 2.0;
        assert_eq!(acc, a);
        assert!(!acc.is_black());
        assert_eq!(2.0 * b, b * 2.0);
        assert_eq!(a.max_component(), 3.0);
    }

    #[test]
    fn test_spectrum_negative_and_nan() {
        assert!(RGBSpectrum::new(0.0, -1.0, 0.0).has_negative());
        assert!(!RGBSpectrum::splat(0.2).has_negative());
        assert!(RGBSpectrum::new(std::f32::NAN, 0.0, 0.0).has_nan());
    }
}
