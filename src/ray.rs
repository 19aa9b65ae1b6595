use super::error::Result;
use super::hit::Intersection;
use super::vec::{is_zero, Point3, Unit, Vec3};

/// Distance secondary rays are pushed off the surface they start on.
pub const DELTA: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Unit,
}

impl Ray {
    pub fn new(origin: Point3, direction: Unit) -> Self {
        Self { origin, direction }
    }

    /// Ray from an arbitrary direction vector, normalized here.
    pub fn towards(origin: Point3, direction: Vec3) -> Result<Self> {
        Ok(Self::new(origin, direction.unit()?))
    }

    /// Secondary ray leaving a surface point.
    ///
    /// The origin is nudged by [`DELTA`] along the normal, to the side the
    /// direction heads into, so the ray does not re-hit its own surface.
    /// A direction tangent to the surface leaves the origin in place.
    pub fn offset(point: Point3, direction: Unit, normal: Unit) -> Self {
        let dn = direction.dot(*normal);
        if is_zero(dn) {
            return Self::new(point, direction);
        }
        let delta = if dn > 0.0 { DELTA } else { -DELTA };
        Self::new(point + delta * *normal, direction)
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn direction(&self) -> Unit {
        self.direction
    }

    pub fn at(&self, t: f64) -> Point3 {
        if is_zero(t) {
            return self.origin;
        }
        self.origin + t * *self.direction
    }

    /// The intersection nearest to the ray origin.
    pub fn closest<'a>(&self, intersections: Vec<Intersection<'a>>) -> Option<Intersection<'a>> {
        intersections.into_iter().min_by(|a, b| {
            let da = self.origin.distance_squared(a.point);
            let db = self.origin.distance_squared(b.point);
            da.total_cmp(&db)
        })
    }
}
