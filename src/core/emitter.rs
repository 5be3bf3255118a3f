// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::core::rng::LcgRng;
use crate::emitters::area::AreaEmitter;
use crate::emitters::directional::DirectionalEmitter;
use crate::emitters::point::PointEmitter;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitterFlag(u8);

impl EmitterFlag {
    pub const NONE: Self = Self(0);
    pub const DIRECTION: Self = Self(1 << 0);
    pub const SURFACE: Self = Self(1 << 1);
    pub const DELTA: Self = Self(1 << 2);
    pub const POSITION: Self = Self(1 << 3);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for EmitterFlag {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Incident light from one emitter at a shading point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterSample {
    /// Unit direction from the shading point toward the light.
    pub wo: Vector3f,
    /// Distance to the sampled point on the light; shadow rays stop here.
    pub distance: Float,
    pub radiance: RGBSpectrum,
}

#[derive(Debug, Clone)]
pub enum Emitter {
    Point(PointEmitter),
    Directional(DirectionalEmitter),
    Area(AreaEmitter),
}

impl Emitter {
    pub fn get_flag(&self) -> EmitterFlag {
        match self {
            Emitter::Point(_) => EmitterFlag::POSITION | EmitterFlag::DELTA,
            Emitter::Directional(_) => EmitterFlag::DIRECTION | EmitterFlag::DELTA,
            Emitter::Area(_) => EmitterFlag::SURFACE,
        }
    }

    pub fn is_area(&self) -> bool {
        self.get_flag().contains(EmitterFlag::SURFACE)
    }

    /// Sample incident light at `p`. `None` means this sample carries no
    /// light, e.g. the back of an area emitter was picked.
    pub fn sample(&self, p: &Vector3f, rng: &mut LcgRng) -> Option<EmitterSample> {
        match self {
            Emitter::Point(light) => light.sample(p),
            Emitter::Directional(light) => light.sample(p),
            Emitter::Area(light) => light.sample(p, rng),
        }
    }

    /// Hit against the emitter's own geometry. Only the front face of an
    /// area emitter can be hit; delta emitters are never hit.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        match self {
            Emitter::Area(light) => light.ray_intersection(ray),
            Emitter::Point(_) | Emitter::Directional(_) => None,
        }
    }

    pub fn radiance(&self) -> RGBSpectrum {
        match self {
            Emitter::Point(light) => light.radiance,
            Emitter::Directional(light) => light.radiance,
            Emitter::Area(light) => light.radiance(),
        }
    }

    pub fn describe(&self) -> String {
        let le = self.radiance();
        let kind = match self {
            Emitter::Point(light) => format!("PointEmitter at {:?}", light.position.as_slice()),
            Emitter::Directional(light) => format!("DirectionalEmitter toward {:?}", light.direction.as_slice()),
            Emitter::Area(light) => format!("AreaEmitter at {:?} facing {:?}",
                                            light.center().as_slice(), light.normal().as_slice()),
        };
        format!("{} with radiance ({}, {}, {})", kind, le[0], le[1], le[2])
    }
}

impl From<PointEmitter> for Emitter {
    fn from(light: PointEmitter) -> Self {
        Emitter::Point(light)
    }
}

impl From<DirectionalEmitter> for Emitter {
    fn from(light: DirectionalEmitter) -> Self {
        Emitter::Directional(light)
    }
}

impl From<AreaEmitter> for Emitter {
    fn from(light: AreaEmitter) -> Self {
        Emitter::Area(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitters() -> Vec<Emitter> {
        vec![
            PointEmitter::new(Vector3f::new(0.0, 2.0, 0.0), RGBSpectrum::splat(1.0)).into(),
            DirectionalEmitter::new_with(Vector3f::new(0.0, 1.0, 0.0), RGBSpectrum::splat(1.0)).into(),
            AreaEmitter::new(Vector3f::new(0.0, 2.0, 0.0),
                             Vector3f::new(0.5, 0.0, 0.0),
                             Vector3f::new(0.0, 0.0, 0.5),
                             Vector3f::new(0.0, -1.0, 0.0),
                             RGBSpectrum::splat(1.0)).into(),
        ]
    }

    #[test]
    fn test_emitter_flags() {
        let e = emitters();
        assert!(e[0].get_flag().contains(EmitterFlag::DELTA));
        assert!(e[1].get_flag().contains(EmitterFlag::DIRECTION));
        assert!(!e[0].is_area());
        assert!(!e[1].is_area());
        assert!(e[2].is_area());
        assert!(!EmitterFlag::NONE.contains(EmitterFlag::SURFACE));
    }

    #[test]
    fn test_delta_emitters_are_never_hit() {
        let e = emitters();
        // Rays aimed straight at the point light position and along the directional light.
        let rays = [
            Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 1.0, 0.0), None, None),
            Ray3f::new(Vector3f::new(0.0, 5.0, 0.0), Vector3f::new(0.0, -1.0, 0.0), None, None),
            Ray3f::new(Vector3f::new(1.0, 1.0, 1.0), Vector3f::new(-1.0, 0.3, -1.0), None, None),
        ];
        for ray in &rays {
            assert!(e[0].ray_intersection(ray).is_none());
            assert!(e[1].ray_intersection(ray).is_none());
        }
        // The area light above the origin faces down, so the first ray hits it.
        assert!(e[2].ray_intersection(&rays[0]).is_some());
    }

    #[test]
    fn test_emitter_describe() {
        let e = emitters();
        assert_eq!(e[2].radiance(), RGBSpectrum::splat(1.0));
        let area = e[2].describe();
        assert!(area.starts_with("AreaEmitter"));
        assert!(area.contains("facing [0.0, -1.0, 0.0]"));
        assert!(e[0].describe().contains("with radiance (1, 1, 1)"));
    }
}
