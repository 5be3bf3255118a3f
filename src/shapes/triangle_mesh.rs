// Copyright @yucwang 2023

use super::triangle::Triangle;

use crate::core::interaction::SurfaceIntersection;
use crate::core::shape::Shape;
use crate::io::obj_utils;
use crate::io::obj_utils::ObjLoadError;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;

use std::path::Path;
use std::vec::Vec;

pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    bounds: AABB,
    total_area: Float,
}

impl TriangleMesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let mut mesh = Self { triangles, bounds: AABB::default(), total_area: 0.0 };
        mesh.update_bounds();
        mesh
    }

    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, ObjLoadError> {
        let obj_set = obj_utils::load_obj_from_file(path)?;
        Ok(Self::from_obj_set(obj_set))
    }

    pub fn from_obj_str(input: &str) -> Result<Self, ObjLoadError> {
        let obj_set = obj_utils::load_obj_from_str(input)?;
        Ok(Self::from_obj_set(obj_set))
    }

    fn from_obj_set(obj_set: wavefront_obj::obj::ObjSet) -> Self {
        let mut triangles = Vec::new();

        for object in obj_set.objects {
            let vertices: Vec<Vector3f> = object.vertices.iter()
                .map(|v| Vector3f::new(v.x as Float, v.y as Float, v.z as Float))
                .collect();
            for geom in object.geometry {
                for shape in geom.shapes {
                    if let wavefront_obj::obj::Primitive::Triangle(a, b, c) = shape.primitive {
                        triangles.push(Triangle::new(vertices[a.0], vertices[b.0], vertices[c.0]));
                    }
                }
            }
        }

        Self::new(triangles)
    }

    pub fn apply_transform(&mut self, scale: &Vector3f, translate: &Vector3f) {
        for tri in &mut self.triangles {
            tri.apply_transform(scale, translate);
        }
        self.update_bounds();
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn surface_area(&self) -> Float {
        self.total_area
    }

    fn update_bounds(&mut self) {
        self.bounds = AABB::default();
        self.total_area = 0.0;
        for tri in &self.triangles {
            let bbox = tri.bounding_box();
            self.bounds.expand_by_point(&bbox.p_min);
            self.bounds.expand_by_point(&bbox.p_max);
            self.total_area += tri.surface_area();
        }
    }
}

impl Shape for TriangleMesh {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        if !self.bounds.ray_intersect(ray) {
            return None;
        }

        let mut closest_hit: Option<SurfaceIntersection> = None;
        let mut closest_t = std::f32::MAX;
        for tri in &self.triangles {
            if let Some(hit) = tri.ray_intersection(ray) {
                if hit.t() < closest_t {
                    closest_t = hit.t();
                    closest_hit = Some(hit);
                }
            }
        }

        closest_hit
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        if !self.bounds.ray_intersect(ray) {
            return false;
        }

        self.triangles.iter().any(|tri| tri.ray_intersection_t(ray))
    }
}
