// Copyright @yucwang 2026

use crate::core::bsdf::BSDF;
use crate::core::emitter::Emitter;
use crate::core::interaction::SurfaceIntersection;
use crate::core::sensor::Sensor;
use crate::core::shape::Shape;
use crate::math::ray::Ray3f;
use std::sync::Arc;

pub struct SceneObject {
    pub shape: Arc<dyn Shape>,
    pub material: Arc<dyn BSDF>,
    pub name: Option<String>,
}

impl SceneObject {
    pub fn new(shape: Arc<dyn Shape>, material: Arc<dyn BSDF>) -> Self {
        Self { shape, material, name: None }
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }
}

/// Geometry, emitters and cameras. Emitters are not part of the geometry:
/// `ray_intersection` never reports them, `ray_emitter_intersection` only
/// reports them.
pub struct Scene {
    objects: Vec<SceneObject>,
    sensors: Vec<Box<dyn Sensor>>,
    emitters: Vec<Emitter>,
    base_dir: std::path::PathBuf,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            sensors: Vec::new(),
            emitters: Vec::new(),
            base_dir: std::path::PathBuf::new(),
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn add_sensor(&mut self, sensor: Box<dyn Sensor>) {
        self.sensors.push(sensor);
    }

    pub fn sensors(&self) -> &[Box<dyn Sensor>] {
        &self.sensors
    }

    pub fn add_emitter(&mut self, emitter: Emitter) {
        self.emitters.push(emitter);
    }

    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    pub fn take_sensor(&mut self, camera_id: usize) -> Option<Box<dyn Sensor>> {
        if camera_id < self.sensors.len() {
            Some(self.sensors.remove(camera_id))
        } else {
            None
        }
    }

    pub fn insert_sensor(&mut self, camera_id: usize, sensor: Box<dyn Sensor>) {
        if camera_id <= self.sensors.len() {
            self.sensors.insert(camera_id, sensor);
        } else {
            self.sensors.push(sensor);
        }
    }

    pub fn camera(&self, camera_id: usize) -> Option<&dyn Sensor> {
        self.sensors.get(camera_id).map(|s| s.as_ref())
    }

    /// Film resolution of the given camera.
    pub fn image_resolution(&self, camera_id: usize) -> Option<(usize, usize)> {
        self.camera(camera_id).map(|s| s.bitmap().resolution())
    }

    pub fn set_base_dir(&mut self, base_dir: std::path::PathBuf) {
        self.base_dir = base_dir;
    }

    pub fn base_dir(&self) -> &std::path::Path {
        &self.base_dir
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Closest hit against scene geometry, with the object's material attached.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let mut closest: Option<(usize, SurfaceIntersection)> = None;
        for (idx, object) in self.objects.iter().enumerate() {
            if let Some(hit) = object.shape.ray_intersection(ray) {
                let nearer = closest.as_ref().map_or(true, |(_, best)| hit.t() < best.t());
                if nearer {
                    closest = Some((idx, hit));
                }
            }
        }

        closest.map(|(idx, hit)| hit.with_material(self.objects[idx].material.clone()))
    }

    /// Occlusion query over [ray.min_t, ray.max_t].
    pub fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.objects.iter().any(|object| object.shape.ray_intersection_t(ray))
    }

    /// Closest front-face hit against emitter geometry only.
    pub fn ray_emitter_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let mut closest: Option<SurfaceIntersection> = None;
        for emitter in &self.emitters {
            if let Some(hit) = emitter.ray_intersection(ray) {
                if closest.as_ref().map_or(true, |best| hit.t() < best.t()) {
                    closest = Some(hit);
                }
            }
        }
        closest
    }
}
