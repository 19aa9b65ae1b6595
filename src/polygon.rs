use super::error::{Result, TracerError};
use super::geometry::{in_range, Surface};
use super::plane::Plane;
use super::ray::Ray;
use super::vec::{align_zero, is_zero, Point3, Unit};

/// Convex planar polygon. A triangle is the three-vertex case.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3>,
    plane: Plane,
}

impl Polygon {
    /// Build a polygon from vertices given in edge order.
    ///
    /// All vertices must lie in the plane of the first three and describe a
    /// convex polygon.
    pub fn new(vertices: Vec<Point3>) -> Result<Self> {
        let size = vertices.len();
        if size < 3 {
            return Err(TracerError::TooFewVertices { count: size });
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        if size == 3 {
            return Ok(Self { vertices, plane });
        }

        let n = *plane.normal();
        let mut edge1 = (vertices[size - 1] - vertices[size - 2]).unit()?;
        let mut edge2 = (vertices[0] - vertices[size - 1]).unit()?;
        // Every turn between consecutive edges must have the same orientation
        let positive = edge1.cross(*edge2).unit()?.dot(n) > 0.0;
        for i in 1..size {
            if !is_zero((vertices[i] - vertices[0]).dot(n)) {
                return Err(TracerError::NonCoplanarVertex { index: i });
            }
            edge1 = edge2;
            edge2 = (vertices[i] - vertices[i - 1]).unit()?;
            if positive != (edge1.cross(*edge2).unit()?.dot(n) > 0.0) {
                return Err(TracerError::NonConvexPolygon { index: i });
            }
        }
        Ok(Self { vertices, plane })
    }

    pub fn triangle(p1: Point3, p2: Point3, p3: Point3) -> Result<Self> {
        Self::new(vec![p1, p2, p3])
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Whether the ray's line passes strictly inside the polygon.
    ///
    /// Each edge and the ray origin span a side of a pyramid; the ray is
    /// inside when it sits on the same side of all of them. Touching an edge
    /// or vertex is outside.
    fn contains_line(&self, ray: &Ray) -> bool {
        let origin = ray.origin();
        let direction = *ray.direction();
        let size = self.vertices.len();
        let mut positive = None;
        for i in 0..size {
            let v1 = self.vertices[i] - origin;
            let v2 = self.vertices[(i + 1) % size] - origin;
            let Ok(side) = v1.cross(v2).unit() else {
                return false;
            };
            let sign = align_zero(direction.dot(*side));
            if sign == 0.0 {
                return false;
            }
            match positive {
                None => positive = Some(sign > 0.0),
                Some(p) if p != (sign > 0.0) => return false,
                Some(_) => {}
            }
        }
        true
    }
}

impl Surface for Polygon {
    fn normal_at(&self, point: Point3) -> Option<Unit> {
        self.plane.normal_at(point)
    }

    fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point3>> {
        let t = self.plane.crossing(ray)?;
        if !self.contains_line(ray) {
            return None;
        }
        let hits = if in_range(t, max_distance) {
            vec![ray.at(t)]
        } else {
            Vec::new()
        };
        Some(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    fn triangle() -> Polygon {
        Polygon::triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap()
    }

    /// Shoot straight down at a point of the z = 0 plane.
    fn count_through(polygon: &Polygon, x: f64, y: f64) -> usize {
        let ray = Ray::towards(Point3::new(x, y, 1.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        polygon
            .intersect(&ray, f64::INFINITY)
            .map_or(0, |hits| hits.len())
    }

    #[test]
    fn test_polygon_construction() {
        let square = Polygon::new(vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, 1.0, 1.0),
        ]);
        assert!(square.is_ok());

        let too_few = Polygon::new(vec![Point3::zero(), Point3::new(1.0, 0.0, 0.0)]);
        assert_eq!(too_few, Err(TracerError::TooFewVertices { count: 2 }));

        let bent = Polygon::new(vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 2.0, 2.0),
        ]);
        assert_eq!(bent, Err(TracerError::NonCoplanarVertex { index: 3 }));

        let bow_tie = Polygon::new(vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        assert!(matches!(bow_tie, Err(TracerError::NonConvexPolygon { .. })));

        // Three consecutive collinear vertices produce a degenerate turn
        let collinear = Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        assert_eq!(collinear, Err(TracerError::ZeroVector));
    }

    #[test]
    fn test_polygon_normal() {
        let square = Polygon::new(vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, 1.0, 1.0),
        ])
        .unwrap();
        let n = square.normal_at(Point3::new(0.0, 0.0, 1.0)).unwrap();
        let expected = 1.0 / 3f64.sqrt();
        assert!(n.approx_eq(Vec3::splat(expected)) || n.approx_eq(Vec3::splat(-expected)));
    }

    #[test]
    fn test_triangle_inside() {
        let t = triangle();
        let ray = Ray::towards(Point3::new(0.25, 0.25, 1.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let hits = t.intersect(&ray, f64::INFINITY).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].approx_eq(Point3::new(0.25, 0.25, 0.0)));
    }

    #[test]
    fn test_triangle_oblique_inside() {
        let t = triangle();
        let ray = Ray::towards(Point3::new(-1.0, -1.0, 1.0), Vec3::new(1.25, 1.25, -1.0)).unwrap();
        let hits = t.intersect(&ray, f64::INFINITY).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].approx_eq(Point3::new(0.25, 0.25, 0.0)));
    }

    #[test]
    fn test_triangle_outside() {
        let t = triangle();
        // Against an edge
        assert_eq!(count_through(&t, 1.0, 1.0), 0);
        // Against a vertex
        assert_eq!(count_through(&t, -1.0, -1.0), 0);
    }

    #[test]
    fn test_triangle_boundaries_are_misses() {
        let t = triangle();
        // Edge midpoints
        assert_eq!(count_through(&t, 0.5, 0.0), 0);
        assert_eq!(count_through(&t, 0.0, 0.5), 0);
        assert_eq!(count_through(&t, 0.5, 0.5), 0);
        // Vertices
        assert_eq!(count_through(&t, 0.0, 0.0), 0);
        assert_eq!(count_through(&t, 1.0, 0.0), 0);
        assert_eq!(count_through(&t, 0.0, 1.0), 0);
        // Edge extensions
        assert_eq!(count_through(&t, 2.0, 0.0), 0);
        assert_eq!(count_through(&t, 0.0, -1.0), 0);
        assert_eq!(count_through(&t, -1.0, 2.0), 0);
    }

    #[test]
    fn test_triangle_behind_and_out_of_range() {
        let t = triangle();
        let away = Ray::towards(Point3::new(0.25, 0.25, 1.0), Vec3::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(t.intersect(&away, f64::INFINITY).map_or(0, |h| h.len()), 0);

        let down = Ray::towards(Point3::new(0.25, 0.25, 1.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert_eq!(t.intersect(&down, 0.5), Some(Vec::new()));
    }
}
