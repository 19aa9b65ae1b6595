//! Recursive Whitted shading.
//!
//! Local effects (emission plus diffuse and specular terms from every light
//! that reaches the point) are combined with mirror reflection and straight
//! transmission, recursing until the level runs out or the accumulated
//! attenuation drops under [`TracerSettings::min_k`].

use log::debug;

use super::config::TracerSettings;
use super::hit::{Hit, Intersection};
use super::light::{Light, LightSource, ShadowRay};
use super::material::Material;
use super::ray::Ray;
use super::scene::Scene;
use super::vec::{align_zero, Color, Unit};

/// What one hit looks like from the ray that found it.
struct ShadingContext<'a> {
    intersection: Intersection<'a>,
    view: Unit,
    normal: Unit,
    view_dot_normal: f64,
}

/// A light's direction at the shaded point.
struct LightContext {
    direction: Unit,
    dot_normal: f64,
}

impl<'a> ShadingContext<'a> {
    /// `None` when the hit cannot be shaded: the normal is undefined or the
    /// ray runs along the surface.
    fn new(intersection: Intersection<'a>, ray: &Ray) -> Option<Self> {
        let normal = intersection.geometry.normal_at(intersection.point)?;
        let view = ray.direction();
        let view_dot_normal = align_zero(view.dot(*normal));
        if view_dot_normal == 0.0 {
            return None;
        }

        Some(Self {
            intersection,
            view,
            normal,
            view_dot_normal,
        })
    }

    /// `None` when the light does not illuminate the side being viewed.
    fn light(&self, light: &Light) -> Option<LightContext> {
        let direction = light.direction_to(self.intersection.point)?;
        let dot_normal = align_zero(direction.dot(*self.normal));
        (dot_normal * self.view_dot_normal > 0.0).then_some(LightContext {
            direction,
            dot_normal,
        })
    }

    fn material(&self) -> Material {
        self.intersection.material
    }

    fn reflected_ray(&self) -> Option<Ray> {
        let direction = self.view.reflect(*self.normal).unit().ok()?;
        Some(Ray::offset(self.intersection.point, direction, self.normal))
    }

    fn transmitted_ray(&self) -> Ray {
        Ray::offset(self.intersection.point, self.view, self.normal)
    }

    fn diffuse(&self, light: &LightContext) -> Color {
        self.material().kd * light.dot_normal.abs()
    }

    fn specular(&self, light: &LightContext) -> Color {
        let material = self.material();
        let r = light.direction.get() - 2.0 * light.dot_normal * self.normal.get();
        let minus_vr = align_zero(-self.view.dot(r));
        material.ks * minus_vr.max(0.0).powi(material.shininess)
    }
}

/// Colors rays against one scene.
#[derive(Clone, Copy, Debug)]
pub struct RayTracer<'a> {
    scene: &'a Scene,
    settings: TracerSettings,
}

impl<'a> RayTracer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self::with_settings(scene, TracerSettings::default())
    }

    pub fn with_settings(scene: &'a Scene, settings: TracerSettings) -> Self {
        debug!(
            "Ray tracer for scene '{}': {} geometries, {} lights, max level {}",
            scene.name,
            scene.geometries.len(),
            scene.lights.len(),
            settings.max_level
        );
        Self { scene, settings }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    pub fn settings(&self) -> TracerSettings {
        self.settings
    }

    /// Color seen along `ray`; the background when nothing is hit.
    pub fn trace_ray(&self, ray: &Ray) -> Color {
        match self.scene.geometries.closest_intersection(ray) {
            Some(intersection) => self.color_at(intersection, ray),
            None => self.scene.background,
        }
    }

    fn color_at(&self, intersection: Intersection<'a>, ray: &Ray) -> Color {
        let Some(context) = ShadingContext::new(intersection, ray) else {
            return Color::zero();
        };

        self.scene.ambient_light.intensity() * context.material().ka
            + self.recursive_color(&context, self.settings.max_level, Color::one())
    }

    fn recursive_color(&self, context: &ShadingContext<'a>, level: u32, k: Color) -> Color {
        let color = self.local_effects(context);
        if level <= 1 {
            return color;
        }
        color + self.global_effects(context, level, k)
    }

    fn local_effects(&self, context: &ShadingContext<'a>) -> Color {
        let point = context.intersection.point;
        let mut color = context.intersection.geometry.emission();

        for light in &self.scene.lights {
            let Some(light_context) = context.light(light) else {
                continue;
            };

            let ktr = self.transparency(context, light);
            if ktr.all_below(self.settings.min_k) {
                continue;
            }

            let intensity = light.intensity_at(point) * ktr;
            color += intensity * (context.diffuse(&light_context) + context.specular(&light_context));
        }

        color
    }

    /// Fraction of a light that reaches the point, averaged over the light's
    /// shadow rays.
    fn transparency(&self, context: &ShadingContext<'a>, light: &Light) -> Color {
        let shadow_rays = light.shadow_rays(context.intersection.point, context.normal);
        if shadow_rays.is_empty() {
            return Color::one();
        }

        let count = shadow_rays.len() as f64;
        let total = shadow_rays
            .iter()
            .fold(Color::zero(), |acc, shadow| acc + self.shadow_ray_transparency(shadow));
        total / count
    }

    fn shadow_ray_transparency(&self, shadow: &ShadowRay) -> Color {
        let mut ktr = Color::one();
        let Some(blockers) = self
            .scene
            .geometries
            .find_intersections(&shadow.ray, shadow.max_distance)
        else {
            return ktr;
        };

        for blocker in blockers {
            ktr *= blocker.material.kt;
            if ktr.all_below(self.settings.min_k) {
                return Color::zero();
            }
        }
        ktr
    }

    fn global_effects(&self, context: &ShadingContext<'a>, level: u32, k: Color) -> Color {
        let material = context.material();

        let reflection = match context.reflected_ray() {
            Some(ray) => self.global_effect(&ray, level, k, material.kr),
            None => Color::zero(),
        };
        let transmission = self.global_effect(&context.transmitted_ray(), level, k, material.kt);

        reflection + transmission
    }

    fn global_effect(&self, ray: &Ray, level: u32, k: Color, kx: Color) -> Color {
        let kkx = k * kx;
        if kkx.all_below(self.settings.min_k) {
            return Color::zero();
        }

        let Some(intersection) = self.scene.geometries.closest_intersection(ray) else {
            return self.scene.background * kx;
        };

        match ShadingContext::new(intersection, ray) {
            Some(context) => self.recursive_color(&context, level - 1, kkx) * kx,
            None => Color::zero(),
        }
    }
}
