//! A Whitted-style ray tracer.
//!
//! Scenes are built from analytic primitives ([`sphere`], [`plane`],
//! [`polygon`], [`tube`]) wrapped as [`geometry::Geometry`], lit by the
//! sources in [`light`], and colored by [`shading::RayTracer`]. The
//! [`camera`] turns pixels into rays and renders them in parallel.

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod light;
pub mod logger;
pub mod material;
pub mod plane;
pub mod polygon;
pub mod ray;
pub mod sampling;
pub mod scene;
pub mod shading;
pub mod sphere;
pub mod tube;
pub mod vec;

pub use camera::{Camera, CameraConfig, Image};
pub use config::TracerSettings;
pub use error::{Result, TracerError};
pub use geometry::{Geometry, Shape, Surface};
pub use hit::{Hit, Intersection, World};
pub use light::{AmbientLight, DirectionalLight, Light, LightSource, PointLight, SpotLight};
pub use material::Material;
pub use ray::Ray;
pub use scene::Scene;
pub use shading::RayTracer;
pub use vec::{Color, Point3, Unit, Vec3};
