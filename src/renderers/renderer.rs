// Copyright @yucwang 2021

use std::fmt;

use crate::core::scene::Scene;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    ZeroSamplesPerPixel,
    MissingSensor(usize),
    EmptyFilm,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::ZeroSamplesPerPixel => write!(f, "samples per pixel must be at least 1"),
            RenderError::MissingSensor(id) => write!(f, "scene has no camera with index {}", id),
            RenderError::EmptyFilm => write!(f, "camera film has zero width or height"),
        }
    }
}

impl std::error::Error for RenderError {}

pub trait Renderer {
    /// Fills the camera's bitmap and returns the elapsed time in microseconds.
    fn render(&self, scene: &mut Scene) -> Result<u128, RenderError>;
}
