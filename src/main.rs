use std::io::{self, BufWriter, Write};
use std::process;

use log::{error, LevelFilter};
use whitted_raytracer_rs::logger::init_logger;
use whitted_raytracer_rs::plane::Plane;
use whitted_raytracer_rs::polygon::Polygon;
use whitted_raytracer_rs::sphere::Sphere;
use whitted_raytracer_rs::tube::Cylinder;
use whitted_raytracer_rs::{
    AmbientLight, Camera, CameraConfig, Color, DirectionalLight, Geometry, Image, Material,
    Point3, PointLight, Ray, RayTracer, Result, Scene, SpotLight, Vec3,
};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

// Image
const IMAGE_WIDTH: usize = 400;
const IMAGE_HEIGHT: usize = 300;
const VIEW_PLANE_WIDTH: f64 = 200.0;
const VIEW_PLANE_HEIGHT: f64 = 150.0;
const VIEW_PLANE_DISTANCE: f64 = 500.0;

fn build_scene() -> Result<Scene> {
    let floor = Material::new()
        .with_ka(Color::splat(0.2))
        .with_kd(Color::splat(0.5))
        .with_ks(Color::splat(0.3))
        .with_shininess(20)
        .with_kr(Color::splat(0.3));
    let glass = Material::new()
        .with_ka(Color::zero())
        .with_kd(Color::splat(0.2))
        .with_ks(Color::splat(0.8))
        .with_shininess(100)
        .with_kt(Color::splat(0.6));
    let matte = Material::new()
        .with_ka(Color::splat(0.1))
        .with_kd(Color::splat(0.6))
        .with_ks(Color::splat(0.4))
        .with_shininess(40);

    let axis = Ray::towards(Point3::new(70.0, -50.0, -120.0), Vec3::new(0.0, 1.0, 0.0))?;

    Ok(Scene::new("demo")
        .with_background(Color::new(0.05, 0.05, 0.1))
        .with_ambient_light(AmbientLight::new(Color::splat(0.15)))
        .with_geometry(
            Geometry::from(Plane::new(Point3::new(0.0, -50.0, 0.0), Vec3::new(0.0, 1.0, 0.0))?)
                .with_material(floor),
        )
        .with_geometry(
            Geometry::from(Sphere::new(Point3::new(0.0, 0.0, -150.0), 50.0))
                .with_material(glass)
                .with_emission(Color::new(0.1, 0.0, 0.2)),
        )
        .with_geometry(
            Geometry::from(Sphere::new(Point3::new(0.0, 0.0, -150.0), 25.0))
                .with_material(matte)
                .with_emission(Color::new(0.4, 0.1, 0.0)),
        )
        .with_geometry(
            Geometry::from(Polygon::triangle(
                Point3::new(-120.0, -50.0, -200.0),
                Point3::new(-60.0, -50.0, -200.0),
                Point3::new(-90.0, 40.0, -220.0),
            )?)
            .with_material(matte)
            .with_emission(Color::new(0.0, 0.2, 0.1)),
        )
        .with_geometry(
            Geometry::from(Cylinder::new(15.0, axis, 60.0))
                .with_material(matte)
                .with_emission(Color::new(0.2, 0.2, 0.0)),
        )
        .with_light(DirectionalLight::new(Color::splat(0.3), Vec3::new(1.0, -1.0, -1.0))?)
        .with_light(
            PointLight::new(Color::new(0.8, 0.6, 0.4), Point3::new(-100.0, 100.0, 0.0))
                .with_kl(0.0005)
                .with_kq(0.00001)
                .with_area(5.0, 16),
        )
        .with_light(
            SpotLight::new(
                Color::new(0.9, 0.9, 1.0),
                Point3::new(100.0, 100.0, -50.0),
                Vec3::new(-1.0, -1.0, -1.0),
            )?
            .with_kl(0.0001)
            .with_kq(0.000005)
            .with_narrow_beam(4.0)?,
        ))
}

fn render() -> Result<Image> {
    let scene = build_scene()?;
    let camera = Camera::new(
        CameraConfig::looking_at(
            Point3::new(0.0, 20.0, 400.0),
            Point3::new(0.0, 0.0, -150.0),
            Vec3::new(0.0, 1.0, 0.0),
        )?
        .with_view_plane(VIEW_PLANE_WIDTH, VIEW_PLANE_HEIGHT)
        .with_distance(VIEW_PLANE_DISTANCE)
        .with_resolution(IMAGE_WIDTH, IMAGE_HEIGHT),
    )?;

    let tracer = RayTracer::new(&scene);
    Ok(camera.render(&tracer))
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    init_logger(LevelFilter::Info);

    let image = match render() {
        Ok(image) => image,
        Err(e) => {
            error!("Failed to build scene: {}", e);
            process::exit(1);
        }
    };

    // Output format: ASCII PPM on stdout
    let mut out = BufWriter::new(io::stdout().lock());
    if let Err(e) = image.write_ppm(&mut out).and_then(|_| out.flush()) {
        error!("Failed to write image: {}", e);
        process::exit(1);
    }
}
