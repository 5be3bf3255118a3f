// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::bsdf::BSDF;
use crate::core::emitter::Emitter;
use crate::core::scene::{Scene, SceneObject};
use crate::core::shape::Shape;
use crate::emitters::area::AreaEmitter;
use crate::emitters::directional::DirectionalEmitter;
use crate::emitters::point::PointEmitter;
use crate::integrators::direct::{ParseStrategyError, SamplingStrategy};
use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
use crate::math::constants::{Float, Vector3f, FLOAT_MAX};
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::perspective::PerspectiveCamera;
use crate::shapes::rectangle::Rectangle;
use crate::shapes::triangle_mesh::TriangleMesh;

#[derive(Debug)]
pub enum SceneLoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
}

impl From<std::io::Error> for SceneLoadError {
    fn from(err: std::io::Error) -> Self {
        SceneLoadError::Io(err)
    }
}

impl From<ParseStrategyError> for SceneLoadError {
    fn from(err: ParseStrategyError) -> Self {
        SceneLoadError::Parse(err.to_string())
    }
}

impl fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneLoadError::Io(err) => write!(f, "failed to read scene: {}", err),
            SceneLoadError::Parse(msg) => write!(f, "failed to parse scene: {}", msg),
            SceneLoadError::MissingField(field) => write!(f, "scene is missing required field {}", field),
        }
    }
}

impl std::error::Error for SceneLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneLoadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

pub struct SceneLoadResult {
    pub scene: Scene,
    pub samples_per_pixel: Option<u32>,
    pub strategy: Option<SamplingStrategy>,
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneLoadError> {
    let result = load_scene_with_settings(path)?;
    Ok(result.scene)
}

pub fn load_scene_with_settings<P: AsRef<Path>>(path: P) -> Result<SceneLoadResult, SceneLoadError> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    log::info!("Loading scene {}", path.display());
    load_scene_from_str(&xml, base_dir)
}

#[derive(Default)]
struct SensorBuilder {
    fov_deg: Option<Float>,
    origin: Option<Vector3f>,
    target: Option<Vector3f>,
    up: Option<Vector3f>,
    near_clip: Option<Float>,
    far_clip: Option<Float>,
    width: Option<usize>,
    height: Option<usize>,
    in_film: bool,
    in_transform: bool,
}

impl SensorBuilder {
    fn build(self) -> Result<PerspectiveCamera, SceneLoadError> {
        let fov_deg = self.fov_deg.ok_or(SceneLoadError::MissingField("sensor.fov"))?;
        let origin = self.origin.ok_or(SceneLoadError::MissingField("sensor.origin"))?;
        let target = self.target.ok_or(SceneLoadError::MissingField("sensor.target"))?;
        let up = self.up.ok_or(SceneLoadError::MissingField("sensor.up"))?;
        let width = self.width.ok_or(SceneLoadError::MissingField("film.width"))?;
        let height = self.height.ok_or(SceneLoadError::MissingField("film.height"))?;

        Ok(PerspectiveCamera::new(origin,
                                  target,
                                  up,
                                  fov_deg.to_radians(),
                                  width,
                                  height,
                                  self.near_clip.unwrap_or(0.0),
                                  self.far_clip.unwrap_or(FLOAT_MAX)))
    }
}

#[derive(PartialEq)]
enum ShapeKind {
    Obj,
    Rectangle,
}

struct ShapeBuilder {
    kind: ShapeKind,
    id: Option<String>,
    filename: Option<String>,
    bsdf_ref: Option<String>,
    center: Option<Vector3f>,
    vx: Option<Vector3f>,
    vy: Option<Vector3f>,
    translate: Vector3f,
    scale: Vector3f,
    in_transform: bool,
}

impl ShapeBuilder {
    fn new(kind: ShapeKind, id: Option<String>) -> Self {
        Self {
            kind,
            id,
            filename: None,
            bsdf_ref: None,
            center: None,
            vx: None,
            vy: None,
            translate: Vector3f::zeros(),
            scale: Vector3f::new(1.0, 1.0, 1.0),
            in_transform: false,
        }
    }

    fn build(self, base_dir: &Path, bsdfs: &HashMap<String, Arc<dyn BSDF>>) -> Result<SceneObject, SceneLoadError> {
        let bsdf_id = self.bsdf_ref.ok_or(SceneLoadError::MissingField("shape.bsdf_ref"))?;
        let material = bsdfs.get(&bsdf_id)
            .ok_or_else(|| SceneLoadError::Parse(format!("missing bsdf ref: {}", bsdf_id)))?
            .clone();

        let shape: Arc<dyn Shape> = match self.kind {
            ShapeKind::Obj => {
                let filename = self.filename.ok_or(SceneLoadError::MissingField("shape.filename"))?;
                let filename = if Path::new(&filename).is_absolute() {
                    filename
                } else {
                    base_dir.join(filename).to_string_lossy().to_string()
                };

                let mut mesh = TriangleMesh::from_obj(&filename)
                    .map_err(|e| SceneLoadError::Parse(format!("obj load failed: {}", e)))?;
                if self.scale != Vector3f::new(1.0, 1.0, 1.0) || self.translate != Vector3f::zeros() {
                    mesh.apply_transform(&self.scale, &self.translate);
                }
                log::debug!("Loaded {} with {} triangles", filename, mesh.triangle_count());
                Arc::new(mesh)
            }
            ShapeKind::Rectangle => {
                let center = self.center.ok_or(SceneLoadError::MissingField("rectangle.center"))?;
                let vx = self.vx.ok_or(SceneLoadError::MissingField("rectangle.vx"))?;
                let vy = self.vy.ok_or(SceneLoadError::MissingField("rectangle.vy"))?;
                Arc::new(Rectangle::from_center(center.component_mul(&self.scale) + self.translate,
                                                vx.component_mul(&self.scale),
                                                vy.component_mul(&self.scale)))
            }
        };

        let mut object = SceneObject::new(shape, material);
        if let Some(id) = self.id {
            object = object.with_name(id);
        }
        Ok(object)
    }
}

#[derive(Default)]
struct EmitterBuilder {
    kind: String,
    position: Option<Vector3f>,
    direction: Option<Vector3f>,
    center: Option<Vector3f>,
    vx: Option<Vector3f>,
    vy: Option<Vector3f>,
    normal: Option<Vector3f>,
    radiance: Option<RGBSpectrum>,
}

impl EmitterBuilder {
    // Missing fields are warned about and left at zero.
    fn field(&self, value: Option<Vector3f>, name: &str) -> Vector3f {
        value.unwrap_or_else(|| {
            log::warn!("{} emitter has no '{}', using zero", self.kind, name);
            Vector3f::zeros()
        })
    }

    fn build(self) -> Option<Emitter> {
        let radiance = match self.radiance {
            Some(radiance) => radiance,
            None => {
                log::warn!("{} emitter has no 'radiance', using zero", self.kind);
                RGBSpectrum::default()
            }
        };
        if radiance.has_negative() {
            log::warn!("{} emitter has negative radiance {:?}", self.kind, radiance);
        }

        match self.kind.as_str() {
            "point" => {
                let position = self.field(self.position, "position");
                Some(PointEmitter::new(position, radiance).into())
            }
            "directional" => {
                let direction = self.field(self.direction, "direction");
                Some(DirectionalEmitter::new_with(direction, radiance).into())
            }
            "area" => {
                let center = self.field(self.center, "center");
                let vx = self.field(self.vx, "vx");
                let vy = self.field(self.vy, "vy");
                let normal = self.field(self.normal, "normal");
                Some(AreaEmitter::new(center, vx, vy, normal, radiance).into())
            }
            other => {
                log::warn!("Skipping emitter of unknown type '{}'", other);
                None
            }
        }
    }
}

struct Property {
    name: String,
    value: String,
}

// Reads `name` and `value` of a property tag. Points and vectors may also
// be given as separate x, y, z attributes.
fn read_property(e: &BytesStart, defaults: &HashMap<String, String>) -> Option<Property> {
    let mut name: Option<String> = None;
    let mut value: Option<String> = None;
    let mut xyz: [Option<String>; 3] = [None, None, None];
    for attr in e.attributes().flatten() {
        let raw = attr.unescape_value().unwrap_or_default();
        match attr.key.as_ref() {
            b"name" => name = Some(raw.to_string()),
            b"value" => value = Some(resolve_value(&raw, defaults)),
            b"x" => xyz[0] = Some(resolve_value(&raw, defaults)),
            b"y" => xyz[1] = Some(resolve_value(&raw, defaults)),
            b"z" => xyz[2] = Some(resolve_value(&raw, defaults)),
            _ => {}
        }
    }

    if value.is_none() && xyz.iter().any(|c| c.is_some()) {
        let parts: Vec<String> = xyz.iter().map(|c| c.clone().unwrap_or_else(|| "0".to_string())).collect();
        value = Some(parts.join(","));
    }

    match (name, value) {
        (Some(name), Some(value)) => Some(Property { name, value }),
        _ => None,
    }
}

fn read_attr(e: &BytesStart, key: &[u8], defaults: &HashMap<String, String>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| resolve_value(&attr.unescape_value().unwrap_or_default(), defaults))
}

enum Tag {
    Open(BytesStart<'static>, bool),
    Close(Vec<u8>),
    Skip,
}

pub fn load_scene_from_str(xml: &str, base_dir: &Path) -> Result<SceneLoadResult, SceneLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut defaults: HashMap<String, String> = HashMap::new();
    let mut bsdfs: HashMap<String, Arc<dyn BSDF>> = HashMap::new();

    let mut in_integrator = false;
    let mut samples_per_pixel: Option<u32> = None;
    let mut strategy: Option<SamplingStrategy> = None;

    let mut sensor: Option<SensorBuilder> = None;
    let mut shape: Option<ShapeBuilder> = None;
    let mut emitter: Option<EmitterBuilder> = None;
    let mut bsdf: Option<(String, Option<RGBSpectrum>)> = None;

    let mut scene = Scene::new();
    scene.set_base_dir(base_dir.to_path_buf());

    loop {
        let tag = match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => Tag::Open(e.into_owned(), false),
            Ok(Event::Empty(e)) => Tag::Open(e.into_owned(), true),
            Ok(Event::End(e)) => Tag::Close(e.name().as_ref().to_vec()),
            Err(e) => return Err(SceneLoadError::Parse(e.to_string())),
            _ => Tag::Skip,
        };
        buf.clear();

        let (e, is_empty) = match tag {
            Tag::Open(e, is_empty) => (e, is_empty),
            Tag::Close(name) => {
                close_element(&name, &mut sensor, &mut shape, &mut emitter, &mut bsdf,
                              &mut in_integrator, &mut scene, &mut bsdfs, base_dir)?;
                continue;
            }
            Tag::Skip => continue,
        };

        match e.name().as_ref() {
            b"default" => {
                let key = read_attr(&e, b"name", &defaults);
                let value = read_attr(&e, b"value", &defaults);
                if let (Some(k), Some(v)) = (key, value) {
                    defaults.insert(k, v);
                }
            }
            b"integrator" => {
                let integrator_type = read_attr(&e, b"type", &defaults).unwrap_or_default();
                if integrator_type != "direct" {
                    return Err(SceneLoadError::Parse(format!("unsupported integrator: {}", integrator_type)));
                }
                in_integrator = true;
            }
            b"sensor" => {
                let sensor_type = read_attr(&e, b"type", &defaults);
                if sensor_type.as_deref() == Some("perspective") {
                    sensor = Some(SensorBuilder::default());
                } else {
                    log::warn!("Skipping sensor of unsupported type {:?}", sensor_type);
                }
            }
            b"film" => {
                if let Some(s) = sensor.as_mut() {
                    s.in_film = true;
                }
            }
            b"transform" => {
                let to_world = read_attr(&e, b"name", &defaults).as_deref() == Some("to_world");
                if let Some(s) = sensor.as_mut() {
                    s.in_transform = to_world;
                } else if let Some(s) = shape.as_mut() {
                    s.in_transform = to_world;
                }
            }
            b"lookat" => {
                if let Some(s) = sensor.as_mut().filter(|s| s.in_transform) {
                    if let Some(v) = read_attr(&e, b"origin", &defaults) {
                        s.origin = Some(parse_vec3(&v)?);
                    }
                    if let Some(v) = read_attr(&e, b"target", &defaults) {
                        s.target = Some(parse_vec3(&v)?);
                    }
                    if let Some(v) = read_attr(&e, b"up", &defaults) {
                        s.up = Some(parse_vec3(&v)?);
                    }
                }
            }
            b"translate" => {
                if let Some(s) = shape.as_mut().filter(|s| s.in_transform) {
                    let mut t = Vector3f::zeros();
                    for (i, key) in [&b"x"[..], &b"y"[..], &b"z"[..]].iter().enumerate() {
                        if let Some(v) = read_attr(&e, key, &defaults) {
                            t[i] = parse_float(&v)?;
                        }
                    }
                    s.translate += t;
                }
            }
            b"scale" => {
                if let Some(s) = shape.as_mut().filter(|s| s.in_transform) {
                    let factor = if let Some(v) = read_attr(&e, b"value", &defaults) {
                        let u = parse_float(&v)?;
                        Vector3f::new(u, u, u)
                    } else {
                        let mut f = Vector3f::new(1.0, 1.0, 1.0);
                        for (i, key) in [&b"x"[..], &b"y"[..], &b"z"[..]].iter().enumerate() {
                            if let Some(v) = read_attr(&e, key, &defaults) {
                                f[i] = parse_float(&v)?;
                            }
                        }
                        f
                    };
                    s.scale = s.scale.component_mul(&factor);
                }
            }
            b"bsdf" => {
                let bsdf_type = read_attr(&e, b"type", &defaults);
                let bsdf_id = read_attr(&e, b"id", &defaults);
                match (bsdf_type.as_deref(), bsdf_id) {
                    (Some("diffuse"), Some(id)) => bsdf = Some((id, None)),
                    (other, _) => log::warn!("Skipping bsdf of type {:?} without a usable id", other),
                }
            }
            b"shape" => {
                let shape_type = read_attr(&e, b"type", &defaults);
                let shape_id = read_attr(&e, b"id", &defaults);
                shape = match shape_type.as_deref() {
                    Some("obj") => Some(ShapeBuilder::new(ShapeKind::Obj, shape_id)),
                    Some("rectangle") => Some(ShapeBuilder::new(ShapeKind::Rectangle, shape_id)),
                    other => {
                        log::warn!("Skipping shape of unsupported type {:?}", other);
                        None
                    }
                };
            }
            b"ref" => {
                if let Some(s) = shape.as_mut() {
                    s.bsdf_ref = read_attr(&e, b"id", &defaults);
                }
            }
            b"emitter" => {
                emitter = Some(EmitterBuilder {
                    kind: read_attr(&e, b"type", &defaults).unwrap_or_default(),
                    ..EmitterBuilder::default()
                });
            }
            b"float" | b"integer" | b"string" | b"rgb" | b"point" | b"vector" => {
                if let Some(prop) = read_property(&e, &defaults) {
                    apply_property(&prop, in_integrator, &mut samples_per_pixel, &mut strategy,
                                   &mut sensor, &mut shape, &mut emitter, &mut bsdf)?;
                }
            }
            _ => {}
        }

        if is_empty {
            let name = e.name().as_ref().to_vec();
            close_element(&name, &mut sensor, &mut shape, &mut emitter, &mut bsdf,
                          &mut in_integrator, &mut scene, &mut bsdfs, base_dir)?;
        }
    }

    if samples_per_pixel == Some(0) {
        return Err(SceneLoadError::Parse("sample_count must be at least 1".to_string()));
    }

    log::info!("Scene loaded: {} objects, {} emitters, {} cameras",
               scene.len(), scene.emitters().len(), scene.sensors().len());
    for object in scene.objects() {
        log::debug!("  shape {} with {}", object.name.as_deref().unwrap_or("<unnamed>"), object.material.name());
    }
    for light in scene.emitters() {
        log::debug!("  {}", light.describe());
    }

    Ok(SceneLoadResult {
        scene,
        samples_per_pixel,
        strategy,
    })
}

#[allow(clippy::too_many_arguments)]
fn apply_property(prop: &Property,
                  in_integrator: bool,
                  samples_per_pixel: &mut Option<u32>,
                  strategy: &mut Option<SamplingStrategy>,
                  sensor: &mut Option<SensorBuilder>,
                  shape: &mut Option<ShapeBuilder>,
                  emitter: &mut Option<EmitterBuilder>,
                  bsdf: &mut Option<(String, Option<RGBSpectrum>)>) -> Result<(), SceneLoadError> {
    let name = prop.name.as_str();
    let value = prop.value.as_str();

    if let Some(e) = emitter.as_mut() {
        match name {
            "radiance" => e.radiance = Some(parse_vec3_spectrum(value)?),
            "position" => e.position = Some(parse_vec3(value)?),
            "direction" => e.direction = Some(parse_vec3(value)?),
            "center" => e.center = Some(parse_vec3(value)?),
            "vx" => e.vx = Some(parse_vec3(value)?),
            "vy" => e.vy = Some(parse_vec3(value)?),
            "normal" => e.normal = Some(parse_vec3(value)?),
            other => log::warn!("Ignoring emitter property '{}'", other),
        }
    } else if let Some((_, reflectance)) = bsdf.as_mut() {
        if name == "reflectance" {
            *reflectance = Some(parse_vec3_spectrum(value)?);
        }
    } else if let Some(s) = sensor.as_mut() {
        match name {
            "fov" => s.fov_deg = Some(parse_float(value)?),
            "near_clip" => s.near_clip = Some(parse_float(value)?),
            "far_clip" => s.far_clip = Some(parse_float(value)?),
            "width" if s.in_film => s.width = Some(parse_usize(value)?),
            "height" if s.in_film => s.height = Some(parse_usize(value)?),
            _ => {}
        }
    } else if let Some(s) = shape.as_mut() {
        match name {
            "filename" => s.filename = Some(value.to_string()),
            "center" => s.center = Some(parse_vec3(value)?),
            "vx" => s.vx = Some(parse_vec3(value)?),
            "vy" => s.vy = Some(parse_vec3(value)?),
            _ => {}
        }
    } else if in_integrator {
        match name {
            "sample_count" => *samples_per_pixel = Some(parse_u32(value)?),
            "strategy" => *strategy = Some(value.parse::<SamplingStrategy>()?),
            _ => {}
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn close_element(name: &[u8],
                 sensor: &mut Option<SensorBuilder>,
                 shape: &mut Option<ShapeBuilder>,
                 emitter: &mut Option<EmitterBuilder>,
                 bsdf: &mut Option<(String, Option<RGBSpectrum>)>,
                 in_integrator: &mut bool,
                 scene: &mut Scene,
                 bsdfs: &mut HashMap<String, Arc<dyn BSDF>>,
                 base_dir: &Path) -> Result<(), SceneLoadError> {
    match name {
        b"integrator" => *in_integrator = false,
        b"sensor" => {
            if let Some(s) = sensor.take() {
                let camera = s.build()?;
                log::debug!("{}", crate::core::sensor::Sensor::describe(&camera));
                scene.add_sensor(Box::new(camera));
            }
        }
        b"film" => {
            if let Some(s) = sensor.as_mut() {
                s.in_film = false;
            }
        }
        b"transform" => {
            if let Some(s) = sensor.as_mut() {
                s.in_transform = false;
            }
            if let Some(s) = shape.as_mut() {
                s.in_transform = false;
            }
        }
        b"bsdf" => {
            if let Some((id, reflectance)) = bsdf.take() {
                let reflectance = reflectance.unwrap_or_else(|| RGBSpectrum::splat(0.5));
                bsdfs.insert(id, Arc::new(LambertianDiffuseBSDF::new(reflectance)));
            }
        }
        b"shape" => {
            if let Some(s) = shape.take() {
                scene.add_object(s.build(base_dir, bsdfs)?);
            }
        }
        b"emitter" => {
            if let Some(light) = emitter.take().and_then(EmitterBuilder::build) {
                scene.add_emitter(light);
            }
        }
        _ => {}
    }
    Ok(())
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = raw.to_string();
    for (k, v) in defaults {
        out = out.replace(&format!("${}", k), v);
    }
    out
}

fn parse_float(value: &str) -> Result<Float, SceneLoadError> {
    value.trim().parse::<Float>().map_err(|_| SceneLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_u32(value: &str) -> Result<u32, SceneLoadError> {
    value.trim().parse::<u32>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_usize(value: &str) -> Result<usize, SceneLoadError> {
    value.trim().parse::<usize>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_vec3(value: &str) -> Result<Vector3f, SceneLoadError> {
    let mut parts = value.split(|c: char| c == ',' || c.is_whitespace()).filter(|s| !s.is_empty());
    let mut next = || parts.next().ok_or_else(|| SceneLoadError::Parse(format!("invalid vec3: {}", value)));
    let x = parse_float(next()?)?;
    let y = parse_float(next()?)?;
    let z = parse_float(next()?)?;
    Ok(Vector3f::new(x, y, z))
}

// A single number is a grey spectrum.
fn parse_vec3_spectrum(value: &str) -> Result<RGBSpectrum, SceneLoadError> {
    if let Ok(v) = value.trim().parse::<Float>() {
        return Ok(RGBSpectrum::splat(v));
    }
    let v = parse_vec3(value)?;
    Ok(RGBSpectrum::new(v.x, v.y, v.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ray::Ray3f;

    const CORNELL_LIKE: &str = r#"
        <scene version="3.0.0">
            <default name="spp" value="16"/>
            <default name="res" value="8"/>
            <integrator type="direct">
                <integer name="sample_count" value="$spp"/>
                <string name="strategy" value="cosine"/>
            </integrator>
            <sensor type="perspective">
                <float name="fov" value="40"/>
                <transform name="to_world">
                    <lookat origin="0, 1, 5" target="0, 1, 0" up="0, 1, 0"/>
                </transform>
                <film type="hdrfilm">
                    <integer name="width" value="$res"/>
                    <integer name="height" value="4"/>
                </film>
            </sensor>
            <bsdf type="diffuse" id="white">
                <rgb name="reflectance" value="0.8, 0.8, 0.8"/>
            </bsdf>
            <shape type="rectangle" id="floor">
                <point name="center" value="0, 0, 0"/>
                <vector name="vx" x="1" y="0" z="0"/>
                <vector name="vy" value="0 0 -1"/>
                <ref id="white"/>
            </shape>
            <emitter type="area">
                <point name="center" value="0, 2, 0"/>
                <vector name="vx" value="0.25, 0, 0"/>
                <vector name="vy" value="0, 0, 0.25"/>
                <vector name="normal" value="0, -1, 0"/>
                <rgb name="radiance" value="10"/>
            </emitter>
            <emitter type="point">
                <point name="position" value="1, 1, 1"/>
                <rgb name="radiance" value="1, 2, 3"/>
            </emitter>
            <emitter type="directional">
                <vector name="direction" value="0, 1, 0"/>
                <rgb name="radiance" value="0.5"/>
            </emitter>
        </scene>
    "#;

    #[test]
    fn test_load_scene_from_str() {
        let result = load_scene_from_str(CORNELL_LIKE, Path::new(".")).expect("scene should load");
        assert_eq!(result.samples_per_pixel, Some(16));
        assert_eq!(result.strategy, Some(SamplingStrategy::CosineWeighted));

        let scene = result.scene;
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.objects()[0].name.as_deref(), Some("floor"));
        assert_eq!(scene.image_resolution(0), Some((8, 4)));

        let emitters = scene.emitters();
        assert_eq!(emitters.len(), 3);
        assert!(emitters[0].is_area());
        assert_eq!(emitters[1].radiance(), RGBSpectrum::new(1.0, 2.0, 3.0));
        assert_eq!(emitters[2].radiance(), RGBSpectrum::splat(0.5));

        let down = Ray3f::new(Vector3f::new(0.0, 1.0, 0.0), Vector3f::new(0.0, -1.0, 0.0), None, None);
        let hit = scene.ray_intersection(&down).expect("floor hit");
        assert!((hit.t() - 1.0).abs() < 1e-5);
        assert!(hit.material().is_some());

        let up = Ray3f::new(Vector3f::new(0.0, 1.0, 0.0), Vector3f::new(0.0, 1.0, 0.0), None, None);
        let light = scene.ray_emitter_intersection(&up).expect("area light hit");
        assert_eq!(light.le(), RGBSpectrum::splat(10.0));
    }

    #[test]
    fn test_malformed_emitters_are_permissive() {
        let xml = r#"
            <scene>
                <emitter type="point">
                    <rgb name="radiance" value="1, 1, 1"/>
                </emitter>
                <emitter type="spot">
                    <rgb name="radiance" value="1, 1, 1"/>
                </emitter>
                <emitter type="directional"/>
            </scene>
        "#;
        let scene = load_scene_from_str(xml, Path::new(".")).expect("scene should load").scene;
        let emitters = scene.emitters();
        assert_eq!(emitters.len(), 2);
        match &emitters[0] {
            Emitter::Point(light) => assert_eq!(light.position, Vector3f::zeros()),
            other => panic!("expected point emitter, got {}", other.describe()),
        }
        assert!(emitters[1].radiance().is_black());
    }

    #[test]
    fn test_unknown_strategy_is_an_error() {
        let xml = r#"
            <scene>
                <integrator type="direct">
                    <string name="strategy" value="stratified"/>
                </integrator>
            </scene>
        "#;
        match load_scene_from_str(xml, Path::new(".")) {
            Err(SceneLoadError::Parse(msg)) => assert!(msg.contains("stratified")),
            _ => panic!("expected a parse error"),
        }
    }

    #[test]
    fn test_zero_sample_count_is_rejected() {
        let xml = r#"<scene><integrator type="direct"><integer name="sample_count" value="0"/></integrator></scene>"#;
        assert!(load_scene_from_str(xml, Path::new(".")).is_err());
    }

    #[test]
    fn test_missing_bsdf_ref_and_sensor_fields() {
        let xml = r#"
            <scene>
                <shape type="rectangle">
                    <point name="center" value="0, 0, 0"/>
                    <vector name="vx" value="1, 0, 0"/>
                    <vector name="vy" value="0, 1, 0"/>
                    <ref id="nowhere"/>
                </shape>
            </scene>
        "#;
        assert!(matches!(load_scene_from_str(xml, Path::new(".")), Err(SceneLoadError::Parse(_))));

        let xml = r#"<scene><sensor type="perspective"><float name="fov" value="45"/></sensor></scene>"#;
        assert!(matches!(load_scene_from_str(xml, Path::new(".")),
                         Err(SceneLoadError::MissingField("sensor.origin"))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_scene("/definitely/not/here.xml").err().expect("should fail");
        assert!(matches!(err, SceneLoadError::Io(_)));
        assert!(err.to_string().contains("failed to read scene"));
    }
}
