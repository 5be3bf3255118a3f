// Copyright @yucwang 2023

use crate::core::shape::Shape;
use crate::core::interaction::SurfaceIntersection;
use crate::math::aabb::AABB;
use crate::math::constants::{ EPSILON, Float, Vector3f };
use crate::math::ray::Ray3f;

#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    p0: Vector3f,
    p1: Vector3f,
    p2: Vector3f
}

impl Shape for Triangle {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let t = self.hit_distance(ray)?;
        Some(SurfaceIntersection::new(ray.at(t), self.geometric_normal(), t))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.hit_distance(ray).is_some()
    }
}

impl Triangle {
    pub fn new(new_p0: Vector3f, new_p1: Vector3f, new_p2: Vector3f) -> Self {
        Triangle {
            p0: new_p0,
            p1: new_p1,
            p2: new_p2,
        }
    }

    // Plane hit followed by an inside-edges test; both faces are hit.
    fn hit_distance(&self, ray: &Ray3f) -> Option<Float> {
        let geo_normal = self.geometric_normal();
        let n_dot_dir = geo_normal.dot(&ray.dir());

        if n_dot_dir > -EPSILON && n_dot_dir < EPSILON {
            return None;
        }

        let plane_d = geo_normal.dot(&self.p0);
        let t = (plane_d - geo_normal.dot(&ray.origin())) / n_dot_dir;
        if !ray.test_segment(t) {
            return None;
        }

        if self.is_in_triangle(&ray.at(t)) {
            Some(t)
        } else {
            None
        }
    }

    fn is_in_triangle(&self, p: &Vector3f) -> bool {
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        let geo_normal = edge0.cross(&edge1);

        let n0 = (self.p1 - self.p0).cross(&(p - self.p0));
        let n1 = (self.p2 - self.p1).cross(&(p - self.p1));
        let n2 = (self.p0 - self.p2).cross(&(p - self.p2));

        (n0.dot(&geo_normal) >= 0.0) && (n1.dot(&geo_normal) >= 0.0) && (n2.dot(&geo_normal) >= 0.0)
    }

    pub fn geometric_normal(&self) -> Vector3f {
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        edge0.cross(&edge1).normalize()
    }

    pub fn bounding_box(&self) -> AABB {
        let mut bound = AABB::new(self.p0, self.p1);
        bound.expand_by_point(&self.p2);
        bound
    }

    pub fn surface_area(&self) -> Float {
        0.5 * ((self.p1 - self.p0).cross(&(self.p2 - self.p0))).norm()
    }

    pub fn apply_transform(&mut self, scale: &Vector3f, translate: &Vector3f) {
        self.p0 = self.p0.component_mul(scale) + translate;
        self.p1 = self.p1.component_mul(scale) + translate;
        self.p2 = self.p2.component_mul(scale) + translate;
    }
}
