//! Cylindrical surfaces around an axis ray.

use super::geometry::{in_range, Surface};
use super::ray::Ray;
use super::vec::{align_zero, is_zero, Point3, Unit};

/// Infinite cylindrical surface of `radius` around `axis`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tube {
    axis: Ray,
    radius: f64,
}

impl Tube {
    pub fn new(radius: f64, axis: Ray) -> Self {
        Self { axis, radius }
    }

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Ray parameters where the ray's line is exactly `radius` from the axis.
    ///
    /// Solves |Δ⊥ + t·d⊥|² = r², where ⊥ removes the axial component. `None`
    /// for rays parallel to the axis and for tangent or missing lines.
    fn side_crossings(&self, ray: &Ray) -> Option<[f64; 2]> {
        let a = *self.axis.direction();
        let d = *ray.direction();
        let delta = ray.origin() - self.axis.origin();

        let d_perp = d - d.dot(a) * a;
        let delta_perp = delta - delta.dot(a) * a;

        let qa = d_perp.length_squared();
        if is_zero(qa) {
            return None;
        }
        let qb = 2.0 * delta_perp.dot(d_perp);
        let qc = delta_perp.length_squared() - self.radius * self.radius;

        let discriminant = align_zero(qb * qb - 4.0 * qa * qc);
        if discriminant <= 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        Some([(-qb - sqrt_d) / (2.0 * qa), (-qb + sqrt_d) / (2.0 * qa)])
    }
}

impl Surface for Tube {
    fn normal_at(&self, point: Point3) -> Option<Unit> {
        // Project the point onto the axis
        let t = align_zero(self.axis.direction().dot(point - self.axis.origin()));
        (point - self.axis.at(t)).unit().ok()
    }

    fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point3>> {
        let hits = self
            .side_crossings(ray)?
            .into_iter()
            .filter(|&t| in_range(t, max_distance))
            .map(|t| ray.at(t))
            .collect();
        Some(hits)
    }
}

/// A [`Tube`] cut to `height` along its axis and closed by two flat caps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
}

impl Cylinder {
    pub fn new(radius: f64, axis: Ray, height: f64) -> Self {
        Self {
            tube: Tube::new(radius, axis),
            height,
        }
    }

    pub fn tube(&self) -> &Tube {
        &self.tube
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    fn base(&self) -> Point3 {
        self.tube.axis.origin()
    }

    fn top(&self) -> Point3 {
        self.tube.axis.at(self.height)
    }

    /// Axial coordinate of a point, measured from the base.
    fn height_of(&self, point: Point3) -> f64 {
        self.tube.axis.direction().dot(point - self.base())
    }

    /// Ray parameter where the line crosses the cap centered at `center`,
    /// if the crossing lies on the cap disc.
    fn cap_crossing(&self, ray: &Ray, center: Point3) -> Option<f64> {
        let a = *self.tube.axis.direction();
        let denominator = a.dot(*ray.direction());
        if is_zero(denominator) {
            return None;
        }
        let t = a.dot(center - ray.origin()) / denominator;
        let on_disc = align_zero(ray.at(t).distance_squared(center) - self.tube.radius.powi(2)) <= 0.0;
        on_disc.then_some(t)
    }
}

impl Surface for Cylinder {
    fn normal_at(&self, point: Point3) -> Option<Unit> {
        let direction = self.tube.axis.direction();
        if point.approx_eq(self.base()) {
            return Some(-direction);
        }
        if point.approx_eq(self.top()) {
            return Some(direction);
        }
        if is_zero((self.base() - point).dot(*direction)) {
            return Some(-direction);
        }
        if is_zero((self.top() - point).dot(*direction)) {
            return Some(direction);
        }
        self.tube.normal_at(point)
    }

    fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point3>> {
        let mut crossings: Vec<f64> = Vec::with_capacity(4);

        // Side hits strictly between the caps; rim points belong to the caps
        if let Some(ts) = self.tube.side_crossings(ray) {
            crossings.extend(ts.into_iter().filter(|&t| {
                let h = self.height_of(ray.at(t));
                align_zero(h) > 0.0 && align_zero(h - self.height) < 0.0
            }));
        }
        crossings.extend(self.cap_crossing(ray, self.base()));
        crossings.extend(self.cap_crossing(ray, self.top()));

        if crossings.is_empty() {
            return None;
        }
        let hits = crossings
            .into_iter()
            .filter(|&t| in_range(t, max_distance))
            .map(|t| ray.at(t))
            .collect();
        Some(hits)
    }
}
