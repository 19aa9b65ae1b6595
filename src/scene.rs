use super::geometry::Geometry;
use super::hit::World;
use super::light::{AmbientLight, Light};
use super::vec::Color;

/// Everything a trace needs: geometry, lights and the colors used when
/// nothing is hit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub name: String,
    pub background: Color,
    pub ambient_light: AmbientLight,
    pub geometries: World,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_background(self, background: Color) -> Self {
        Self { background, ..self }
    }

    pub fn with_ambient_light(self, ambient_light: AmbientLight) -> Self {
        Self {
            ambient_light,
            ..self
        }
    }

    pub fn with_geometries(self, geometries: World) -> Self {
        Self { geometries, ..self }
    }

    pub fn with_geometry(mut self, geometry: impl Into<Geometry>) -> Self {
        self.geometries.push(geometry);
        self
    }

    pub fn with_lights(self, lights: Vec<Light>) -> Self {
        Self { lights, ..self }
    }

    pub fn with_light(mut self, light: impl Into<Light>) -> Self {
        self.lights.push(light.into());
        self
    }
}
