// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::core::shape::Shape;
use crate::math::constants::{EPSILON, Float, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::transform::Transform;

/// Parallelogram `center ± vx ± vy`, stored as the image of the local
/// square [-1, 1]^2 x {0}.
pub struct Rectangle {
    to_world: Transform,
    normal: Vector3f,
    area: Float,
}

impl Rectangle {
    pub fn new(to_world: Transform) -> Self {
        let dp_du = to_world.apply_vector(Vector3f::new(2.0, 0.0, 0.0));
        let dp_dv = to_world.apply_vector(Vector3f::new(0.0, 2.0, 0.0));
        let area = dp_du.cross(&dp_dv).norm();
        let mut normal = dp_du.cross(&dp_dv);
        if normal.norm() > 0.0 {
            normal = normal.normalize();
        } else {
            normal = to_world.apply_normal(Vector3f::new(0.0, 0.0, 1.0));
            if normal.norm() > 0.0 {
                normal = normal.normalize();
            }
        }

        Self { to_world, normal, area }
    }

    pub fn from_center(center: Vector3f, vx: Vector3f, vy: Vector3f) -> Self {
        let n = vx.cross(&vy);
        let n = if n.norm() > 0.0 { n.normalize() } else { n };
        Self::new(Transform::from_frame(vx, vy, n, center))
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    pub fn surface_area(&self) -> Float {
        self.area
    }

    // World-space distance of the hit along `ray`.
    fn hit_distance(&self, ray: &Ray3f) -> Option<Float> {
        let ray_local = self.to_world.inv_apply_ray(ray);
        let dir = ray_local.dir();
        if dir.z.abs() < EPSILON {
            return None;
        }

        let t_local = -ray_local.origin().z / dir.z;
        let p_local = ray_local.at(t_local);
        if p_local.x.abs() > 1.0 || p_local.y.abs() > 1.0 {
            return None;
        }

        let p_world = self.to_world.apply_point(p_local);
        let t_world = (p_world - ray.origin()).dot(&ray.dir());
        if ray.test_segment(t_world) {
            Some(t_world)
        } else {
            None
        }
    }
}

impl Shape for Rectangle {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let t = self.hit_distance(ray)?;
        Some(SurfaceIntersection::new(ray.at(t), self.normal, t))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.hit_distance(ray).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Rectangle {
        Rectangle::from_center(Vector3f::new(0.0, 0.0, 0.0),
                               Vector3f::new(1.0, 0.0, 0.0),
                               Vector3f::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_rectangle_geometry() {
        let rect = floor();
        assert!((rect.normal() - Vector3f::new(0.0, 1.0, 0.0)).norm() < 1e-6);
        assert!((rect.surface_area() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_rectangle_intersection() {
        let rect = floor();

        let hit_ray = Ray3f::new(Vector3f::new(0.5, 2.0, 0.5), Vector3f::new(0.0, -1.0, 0.0), None, None);
        let hit = rect.ray_intersection(&hit_ray).expect("expected hit");
        assert!((hit.t() - 2.0).abs() < 1e-5);
        assert!((hit.p() - Vector3f::new(0.5, 0.0, 0.5)).norm() < 1e-5);

        let outside = Ray3f::new(Vector3f::new(1.5, 2.0, 0.0), Vector3f::new(0.0, -1.0, 0.0), None, None);
        assert!(!rect.ray_intersection_t(&outside));

        let parallel = Ray3f::new(Vector3f::new(0.0, 1.0, 0.0), Vector3f::new(1.0, 0.0, 0.0), None, None);
        assert!(!rect.ray_intersection_t(&parallel));

        let behind = Ray3f::new(Vector3f::new(0.0, 2.0, 0.0), Vector3f::new(0.0, 1.0, 0.0), None, None);
        assert!(!rect.ray_intersection_t(&behind));

        let short = Ray3f::new(Vector3f::new(0.0, 2.0, 0.0), Vector3f::new(0.0, -1.0, 0.0), None, Some(1.0));
        assert!(!rect.ray_intersection_t(&short));
    }
}
