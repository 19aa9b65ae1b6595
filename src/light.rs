//! Light sources.
//!
//! The ambient term is a plain intensity; every other light implements
//! [`LightSource`] and is evaluated per shaded point.

use super::error::{Result, TracerError};
use super::ray::Ray;
use super::sampling::random_in_unit_disc;
use super::vec::{orthonormal_basis, Color, Point3, Unit, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::zero(),
    };

    pub fn new(intensity: Color) -> Self {
        Self { intensity }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// A ray used to test whether a point sees a light, bounded by how far away
/// the light (or the sampled part of it) is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowRay {
    pub ray: Ray,
    pub max_distance: f64,
}

pub trait LightSource: Send + Sync {
    fn intensity_at(&self, point: Point3) -> Color;

    /// Direction the light travels to reach `point`.
    ///
    /// `None` when the point sits on the light itself.
    fn direction_to(&self, point: Point3) -> Option<Unit>;

    fn distance_to(&self, point: Point3) -> f64;

    /// Rays from a surface point back towards the light.
    fn shadow_rays(&self, point: Point3, normal: Unit) -> Vec<ShadowRay> {
        hard_shadow_ray(self, point, normal)
    }
}

/// The single shadow ray straight back along the light direction.
fn hard_shadow_ray<L: LightSource + ?Sized>(light: &L, point: Point3, normal: Unit) -> Vec<ShadowRay> {
    let Some(l) = light.direction_to(point) else {
        return Vec::new();
    };
    vec![ShadowRay {
        ray: Ray::offset(point, -l, normal),
        max_distance: light.distance_to(point),
    }]
}

/// Infinitely distant light with a constant direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Unit,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vec3) -> Result<Self> {
        Ok(Self {
            intensity,
            direction: direction.unit()?,
        })
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: Point3) -> Color {
        self.intensity
    }

    fn direction_to(&self, _point: Point3) -> Option<Unit> {
        Some(self.direction)
    }

    fn distance_to(&self, _point: Point3) -> f64 {
        f64::INFINITY
    }
}

/// Disc of jittered shadow-ray targets around a point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaSampling {
    pub radius: f64,
    pub samples: usize,
}

/// Omnidirectional light at a position, attenuated by
/// `1 / (kc + kl·d + kq·d²)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: Point3,
    kc: f64,
    kl: f64,
    kq: f64,
    area: Option<AreaSampling>,
}

impl PointLight {
    pub fn new(intensity: Color, position: Point3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
            area: None,
        }
    }

    pub fn with_kc(self, kc: f64) -> Self {
        Self { kc, ..self }
    }

    pub fn with_kl(self, kl: f64) -> Self {
        Self { kl, ..self }
    }

    pub fn with_kq(self, kq: f64) -> Self {
        Self { kq, ..self }
    }

    /// Emulate a disc-shaped area light for soft shadows.
    ///
    /// A zero radius or sample count keeps the single hard shadow ray.
    pub fn with_area(self, radius: f64, samples: usize) -> Self {
        let area = (radius > 0.0 && samples > 0).then_some(AreaSampling { radius, samples });
        Self { area, ..self }
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn area(&self) -> Option<AreaSampling> {
        self.area
    }

    fn sample_area(&self, area: AreaSampling, point: Point3, normal: Unit) -> Vec<ShadowRay> {
        let Ok(to_light) = (self.position - point).unit() else {
            return Vec::new();
        };
        let (u, v) = orthonormal_basis(to_light);

        (0..area.samples)
            .filter_map(|_| {
                let (dx, dy) = random_in_unit_disc();
                let target = self.position + area.radius * (dx * *u + dy * *v);
                let direction = (target - point).unit().ok()?;
                Some(ShadowRay {
                    ray: Ray::offset(point, direction, normal),
                    max_distance: point.distance(target),
                })
            })
            .collect()
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: Point3) -> Color {
        let d_squared = point.distance_squared(self.position);
        let d = d_squared.sqrt();
        self.intensity / (self.kc + self.kl * d + self.kq * d_squared)
    }

    fn direction_to(&self, point: Point3) -> Option<Unit> {
        (point - self.position).unit().ok()
    }

    fn distance_to(&self, point: Point3) -> f64 {
        self.position.distance(point)
    }

    fn shadow_rays(&self, point: Point3, normal: Unit) -> Vec<ShadowRay> {
        match self.area {
            Some(area) => self.sample_area(area, point, normal),
            None => hard_shadow_ray(self, point, normal),
        }
    }
}

/// A [`PointLight`] whose intensity falls off away from a beam direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    point: PointLight,
    direction: Unit,
    narrow_beam: f64,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point3, direction: Vec3) -> Result<Self> {
        Ok(Self {
            point: PointLight::new(intensity, position),
            direction: direction.unit()?,
            narrow_beam: 1.0,
        })
    }

    pub fn with_kc(self, kc: f64) -> Self {
        Self {
            point: self.point.with_kc(kc),
            ..self
        }
    }

    pub fn with_kl(self, kl: f64) -> Self {
        Self {
            point: self.point.with_kl(kl),
            ..self
        }
    }

    pub fn with_kq(self, kq: f64) -> Self {
        Self {
            point: self.point.with_kq(kq),
            ..self
        }
    }

    pub fn with_area(self, radius: f64, samples: usize) -> Self {
        Self {
            point: self.point.with_area(radius, samples),
            ..self
        }
    }

    /// Sharpen the beam; larger exponents give a tighter spot.
    pub fn with_narrow_beam(self, narrow_beam: f64) -> Result<Self> {
        if narrow_beam <= 0.0 || !narrow_beam.is_finite() {
            return Err(TracerError::InvalidNarrowBeam(narrow_beam));
        }
        Ok(Self {
            narrow_beam,
            ..self
        })
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: Point3) -> Color {
        let Some(l) = self.point.direction_to(point) else {
            return Color::zero();
        };
        let dir_dot_l = self.direction.dot(*l);
        if dir_dot_l <= 0.0 {
            return Color::zero();
        }
        self.point.intensity_at(point) * dir_dot_l.powf(self.narrow_beam)
    }

    fn direction_to(&self, point: Point3) -> Option<Unit> {
        self.point.direction_to(point)
    }

    fn distance_to(&self, point: Point3) -> f64 {
        self.point.distance_to(point)
    }

    fn shadow_rays(&self, point: Point3, normal: Unit) -> Vec<ShadowRay> {
        self.point.shadow_rays(point, normal)
    }
}

/// The closed set of scene lights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl Light {
    fn source(&self) -> &dyn LightSource {
        match self {
            Light::Directional(light) => light,
            Light::Point(light) => light,
            Light::Spot(light) => light,
        }
    }
}

impl LightSource for Light {
    fn intensity_at(&self, point: Point3) -> Color {
        self.source().intensity_at(point)
    }

    fn direction_to(&self, point: Point3) -> Option<Unit> {
        self.source().direction_to(point)
    }

    fn distance_to(&self, point: Point3) -> f64 {
        self.source().distance_to(point)
    }

    fn shadow_rays(&self, point: Point3, normal: Unit) -> Vec<ShadowRay> {
        self.source().shadow_rays(point, normal)
    }
}

impl From<DirectionalLight> for Light {
    fn from(value: DirectionalLight) -> Self {
        Light::Directional(value)
    }
}

impl From<PointLight> for Light {
    fn from(value: PointLight) -> Self {
        Light::Point(value)
    }
}

impl From<SpotLight> for Light {
    fn from(value: SpotLight) -> Self {
        Light::Spot(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ray::DELTA;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_directional_light() {
        let light = DirectionalLight::new(Color::one(), Vec3::new(0.0, -2.0, 0.0)).unwrap();
        let p = Point3::new(5.0, 1.0, -3.0);
        assert_eq!(light.intensity_at(p), Color::one());
        assert_eq!(light.direction_to(p).unwrap().get(), Vec3::new(0.0, -1.0, 0.0));
        assert!(light.distance_to(p).is_infinite());
        assert!(DirectionalLight::new(Color::one(), Vec3::zero()).is_err());
    }

    #[test]
    fn test_point_light_attenuation() {
        let light = PointLight::new(Color::splat(100.0), Point3::zero())
            .with_kc(1.0)
            .with_kl(0.5)
            .with_kq(0.25);
        let p = Point3::new(0.0, 2.0, 0.0);
        // 100 / (1 + 0.5·2 + 0.25·4) = 100 / 3
        assert_abs_diff_eq!(light.intensity_at(p).x(), 100.0 / 3.0, epsilon = 1e-12);
        assert_eq!(light.direction_to(p).unwrap().get(), Vec3::new(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(light.distance_to(p), 2.0);
        assert!(light.direction_to(Point3::zero()).is_none());
    }

    #[test]
    fn test_point_light_defaults_are_unattenuated() {
        let light = PointLight::new(Color::new(0.1, 0.2, 0.3), Point3::zero());
        assert_eq!(light.intensity_at(Point3::new(7.0, 0.0, 0.0)), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_spot_light_beam() {
        let spot = SpotLight::new(Color::one(), Point3::zero(), Vec3::new(0.0, 0.0, -1.0))
            .unwrap()
            .with_narrow_beam(2.0)
            .unwrap();
        // On the axis: full intensity
        assert_abs_diff_eq!(spot.intensity_at(Point3::new(0.0, 0.0, -1.0)).x(), 1.0);
        // 60 degrees off axis at distance 1: cos = 0.5, squared
        let p = Point3::new(3f64.sqrt() / 2.0, 0.0, -0.5);
        assert_abs_diff_eq!(spot.intensity_at(p).x(), 0.25, epsilon = 1e-12);
        // Sideways and behind: dark
        assert_eq!(spot.intensity_at(Point3::new(1.0, 0.0, 0.0)), Color::zero());
        assert_eq!(spot.intensity_at(Point3::new(0.0, 0.0, 1.0)), Color::zero());
    }

    #[test]
    fn test_spot_light_narrow_beam_must_be_positive() {
        let spot = SpotLight::new(Color::one(), Point3::zero(), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        assert_eq!(spot.with_narrow_beam(0.0), Err(TracerError::InvalidNarrowBeam(0.0)));
        assert!(spot.with_narrow_beam(-3.0).is_err());
    }

    #[test]
    fn test_single_shadow_ray() {
        let light = PointLight::new(Color::one(), Point3::new(0.0, 0.0, 10.0));
        let normal = Vec3::new(0.0, 0.0, 1.0).unit().unwrap();
        let rays = light.shadow_rays(Point3::zero(), normal);
        assert_eq!(rays.len(), 1);
        assert_eq!(rays[0].ray.origin(), Point3::new(0.0, 0.0, DELTA));
        assert!(rays[0].ray.direction().approx_eq(Vec3::new(0.0, 0.0, 1.0)));
        assert_abs_diff_eq!(rays[0].max_distance, 10.0);
    }

    #[test]
    fn test_area_light_shadow_rays() {
        let position = Point3::new(0.0, 0.0, 10.0);
        let light = PointLight::new(Color::one(), position).with_area(1.0, 16);
        let normal = Vec3::new(0.0, 0.0, 1.0).unit().unwrap();
        let rays = light.shadow_rays(Point3::zero(), normal);
        assert_eq!(rays.len(), 16);
        for shadow in rays {
            assert_eq!(shadow.ray.origin(), Point3::new(0.0, 0.0, DELTA));
            // Every target lies on the disc around the light
            let target = Point3::zero() + shadow.max_distance * shadow.ray.direction().get();
            assert_abs_diff_eq!(target.z(), 10.0, epsilon = 1e-9);
            assert!(target.distance(position) <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn test_light_enum_delegates() {
        let light: Light = PointLight::new(Color::one(), Point3::zero()).into();
        let p = Point3::new(0.0, 3.0, 4.0);
        assert_abs_diff_eq!(light.distance_to(p), 5.0);
        assert!(light.direction_to(p).unwrap().approx_eq(Vec3::new(0.0, 0.6, 0.8)));
    }
}
