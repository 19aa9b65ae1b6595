use super::geometry::{Geometry, Surface};
use super::material::Material;
use super::ray::Ray;
use super::vec::Point3;

/// One point where a ray meets a geometry.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    pub geometry: &'a Geometry,
    pub point: Point3,
    // Snapshot of the geometry's material at hit time
    pub material: Material,
}

impl<'a> Intersection<'a> {
    pub fn new(geometry: &'a Geometry, point: Point3) -> Self {
        Self {
            geometry,
            point,
            material: geometry.material(),
        }
    }
}

impl PartialEq for Intersection<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.geometry, other.geometry) && self.point.approx_eq(other.point)
    }
}

pub trait Hit: Send + Sync {
    /// Every intersection within `max_distance` of the ray origin.
    ///
    /// `None` means the ray misses outright; `Some` may still be empty when
    /// all crossings were behind the origin or out of range.
    fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Intersection<'_>>>;

    fn closest_intersection(&self, ray: &Ray) -> Option<Intersection<'_>> {
        ray.closest(self.find_intersections(ray, f64::INFINITY)?)
    }
}

impl Hit for Geometry {
    fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Intersection<'_>>> {
        let points = self.shape().intersect(ray, max_distance)?;
        Some(
            points
                .into_iter()
                .map(|point| Intersection::new(self, point))
                .collect(),
        )
    }
}

/// Ordered collection of scene geometries, searched linearly.
///
/// A world may hold nested worlds, which are searched after its own
/// geometries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct World {
    objects: Vec<Geometry>,
    groups: Vec<World>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, geometry: impl Into<Geometry>) {
        self.objects.push(geometry.into());
    }

    pub fn with(mut self, geometry: impl Into<Geometry>) -> Self {
        self.push(geometry);
        self
    }

    pub fn push_group(&mut self, group: World) {
        self.groups.push(group);
    }

    pub fn with_group(mut self, group: World) -> Self {
        self.push_group(group);
        self
    }

    /// Number of geometries, nested ones included.
    pub fn len(&self) -> usize {
        self.objects.len() + self.groups.iter().map(World::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every geometry, own ones first, then each nested world in order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Geometry> + '_> {
        Box::new(self.objects.iter().chain(self.groups.iter().flat_map(World::iter)))
    }
}

impl FromIterator<Geometry> for World {
    fn from_iter<I: IntoIterator<Item = Geometry>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
            groups: Vec::new(),
        }
    }
}

impl Hit for World {
    fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Intersection<'_>>> {
        let mut intersections: Option<Vec<Intersection<'_>>> = None;

        let own = self.objects.iter().map(|object| object.find_intersections(ray, max_distance));
        let nested = self.groups.iter().map(|group| group.find_intersections(ray, max_distance));
        for found in own.chain(nested).flatten() {
            intersections.get_or_insert_with(Vec::new).extend(found);
        }

        intersections
    }
}
