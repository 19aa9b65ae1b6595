use super::error::Result;
use super::geometry::{in_range, Surface};
use super::ray::Ray;
use super::vec::{is_zero, Point3, Unit, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    point: Point3,
    normal: Unit,
}

impl Plane {
    pub fn new(point: Point3, normal: Vec3) -> Result<Self> {
        Ok(Self {
            point,
            normal: normal.unit()?,
        })
    }

    /// Plane through three points; fails when they are collinear or repeated.
    pub fn from_points(p1: Point3, p2: Point3, p3: Point3) -> Result<Self> {
        let v1 = (p2 - p1).unit()?;
        let v2 = (p3 - p1).unit()?;
        Ok(Self {
            point: p1,
            normal: v1.cross(*v2).unit()?,
        })
    }

    pub fn point(&self) -> Point3 {
        self.point
    }

    pub fn normal(&self) -> Unit {
        self.normal
    }

    /// Ray parameter where the ray's line crosses the plane, of either sign.
    ///
    /// `None` when the ray is parallel to the plane or starts on the plane's
    /// reference point.
    pub(crate) fn crossing(&self, ray: &Ray) -> Option<f64> {
        let denominator = self.normal.dot(*ray.direction());
        if is_zero(denominator) || self.point.approx_eq(ray.origin()) {
            return None;
        }
        Some(self.normal.dot(self.point - ray.origin()) / denominator)
    }
}

impl Surface for Plane {
    fn normal_at(&self, _point: Point3) -> Option<Unit> {
        Some(self.normal)
    }

    fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point3>> {
        let t = self.crossing(ray)?;
        let hits = if in_range(t, max_distance) {
            vec![ray.at(t)]
        } else {
            Vec::new()
        };
        Some(hits)
    }
}
