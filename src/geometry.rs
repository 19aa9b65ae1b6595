//! The closed set of renderable surfaces and the material they carry.

use super::material::Material;
use super::plane::Plane;
use super::polygon::Polygon;
use super::ray::Ray;
use super::sphere::Sphere;
use super::tube::{Cylinder, Tube};
use super::vec::{align_zero, Color, Point3, Unit};

/// Capability shared by every primitive.
pub trait Surface {
    /// Outward unit normal at a point on the surface.
    ///
    /// `None` only where the normal is undefined, such as a sphere center.
    fn normal_at(&self, point: Point3) -> Option<Unit>;

    /// Points where the ray meets the surface.
    ///
    /// `None` when the ray's line never meets the surface (miss, parallel,
    /// tangent). Otherwise the hits with `0 < t <= max_distance`, which may
    /// be none at all.
    fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point3>>;
}

/// Accept a ray parameter strictly in front of the origin and within range.
///
/// Ray directions are unit length, so `t` is also the distance.
pub(crate) fn in_range(t: f64, max_distance: f64) -> bool {
    align_zero(t) > 0.0 && align_zero(t - max_distance) <= 0.0
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Polygon(Polygon),
    Tube(Tube),
    Cylinder(Cylinder),
}

impl Surface for Shape {
    fn normal_at(&self, point: Point3) -> Option<Unit> {
        match self {
            Shape::Sphere(s) => s.normal_at(point),
            Shape::Plane(p) => p.normal_at(point),
            Shape::Polygon(p) => p.normal_at(point),
            Shape::Tube(t) => t.normal_at(point),
            Shape::Cylinder(c) => c.normal_at(point),
        }
    }

    fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point3>> {
        match self {
            Shape::Sphere(s) => s.intersect(ray, max_distance),
            Shape::Plane(p) => p.intersect(ray, max_distance),
            Shape::Polygon(p) => p.intersect(ray, max_distance),
            Shape::Tube(t) => t.intersect(ray, max_distance),
            Shape::Cylinder(c) => c.intersect(ray, max_distance),
        }
    }
}

/// A shape placed in a scene, with its material and emitted light.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    shape: Shape,
    material: Material,
    emission: Color,
}

impl Geometry {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            material: Material::default(),
            emission: Color::zero(),
        }
    }

    pub fn with_material(self, material: Material) -> Self {
        Self { material, ..self }
    }

    pub fn with_emission(self, emission: Color) -> Self {
        Self { emission, ..self }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn emission(&self) -> Color {
        self.emission
    }

    pub fn normal_at(&self, point: Point3) -> Option<Unit> {
        self.shape.normal_at(point)
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(value: $variant) -> Self {
                    Shape::$variant(value)
                }
            }

            impl From<$variant> for Geometry {
                fn from(value: $variant) -> Self {
                    Geometry::new(Shape::$variant(value))
                }
            }
        )*
    };
}

impl_from_shape!(Sphere, Plane, Polygon, Tube, Cylinder);
