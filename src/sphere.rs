use super::geometry::{in_range, Surface};
use super::ray::Ray;
use super::vec::{align_zero, Point3, Unit};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Surface for Sphere {
    fn normal_at(&self, point: Point3) -> Option<Unit> {
        (point - self.center).unit().ok()
    }

    fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point3>> {
        // From the center every direction leaves through the surface at distance r
        if ray.origin().approx_eq(self.center) {
            let hits = if in_range(self.radius, max_distance) {
                vec![ray.at(self.radius)]
            } else {
                Vec::new()
            };
            return Some(hits);
        }

        // Project the center onto the ray
        let u = self.center - ray.origin();
        let tm = u.dot(*ray.direction());
        let d_squared = u.length_squared() - tm * tm;
        let r_squared = self.radius * self.radius;

        // Tangent rays count as a miss
        if align_zero(d_squared - r_squared) >= 0.0 {
            return None;
        }

        let th = (r_squared - d_squared).sqrt();
        let hits = [tm - th, tm + th]
            .into_iter()
            .filter(|&t| in_range(t, max_distance))
            .map(|t| ray.at(t))
            .collect();
        Some(hits)
    }
}
