use std::io::{self, Write};
use std::time::Instant;

use log::{info, warn};
use rayon::prelude::*;

use super::error::{Result, TracerError};
use super::ray::Ray;
use super::shading::RayTracer;
use super::vec::{is_zero, Color, Point3, Unit, Vec3};

/// Where the camera sits and what its view plane looks like.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub location: Point3,
    pub forward: Vec3,
    /// Must be orthogonal to `forward`.
    pub up: Vec3,
    pub width: f64,
    pub height: f64,
    /// Distance from the location to the view plane.
    pub distance: f64,
    /// Image size as (columns, rows).
    pub resolution: (usize, usize),
}

impl CameraConfig {
    /// Camera aimed at `target`, with `up` only hinting at the roll; the
    /// real up vector is made orthogonal to the line of sight.
    pub fn looking_at(location: Point3, target: Point3, up: Vec3) -> Result<Self> {
        let forward = (target - location)
            .unit()
            .map_err(|_| invalid_camera("target equals location"))?;
        let right = forward
            .cross(up)
            .unit()
            .map_err(|_| invalid_camera("up is parallel to the line of sight"))?;
        let up = right.cross(*forward);

        Ok(Self {
            location,
            forward: forward.get(),
            up,
            ..Self::default()
        })
    }

    /// [`CameraConfig::looking_at`] with the Y axis as the up hint.
    pub fn looking_at_upright(location: Point3, target: Point3) -> Result<Self> {
        Self::looking_at(location, target, Vec3::new(0.0, 1.0, 0.0))
    }

    pub fn with_view_plane(self, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    pub fn with_distance(self, distance: f64) -> Self {
        Self { distance, ..self }
    }

    pub fn with_resolution(self, columns: usize, rows: usize) -> Self {
        Self {
            resolution: (columns, rows),
            ..self
        }
    }
}

fn invalid_camera(reason: &str) -> TracerError {
    TracerError::InvalidCamera(reason.to_string())
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            location: Point3::zero(),
            forward: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            width: 1.0,
            height: 1.0,
            distance: 1.0,
            resolution: (1, 1),
        }
    }
}

/// Pixel colors, row by row from the top.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
}

impl Image {
    /// `None` outside the image.
    pub fn pixel(&self, column: usize, row: usize) -> Option<Color> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.pixels.get(row * self.width + column).copied()
    }

    /// Paint every `interval`-th row and column with `color`, starting from
    /// the top-left pixel.
    pub fn print_grid(&mut self, interval: usize, color: Color) -> Result<()> {
        if interval == 0 {
            return Err(TracerError::ZeroGridInterval);
        }
        let width = self.width;
        for (index, pixel) in self.pixels.iter_mut().enumerate() {
            let (row, column) = (index / width, index % width);
            if row % interval == 0 || column % interval == 0 {
                *pixel = color;
            }
        }
        Ok(())
    }

    /// Plain-text PPM (P3).
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        // Header: format, dimensions, max color
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;
        for pixel in &self.pixels {
            writeln!(out, "{}", pixel.format_color())?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    location: Point3,
    forward: Unit,
    up: Unit,
    right: Unit,
    width: f64,
    height: f64,
    distance: f64,
    resolution: (usize, usize),
}

impl Camera {
    pub fn new(config: CameraConfig) -> Result<Self> {
        let forward = config.forward.unit().map_err(|_| invalid_camera("zero forward vector"))?;
        let up = config.up.unit().map_err(|_| invalid_camera("zero up vector"))?;
        if !is_zero(forward.dot(*up)) {
            return Err(invalid_camera("forward and up are not orthogonal"));
        }
        let right = forward.cross(*up).unit()?;

        let positive = |value: f64| value > 0.0 && value.is_finite();
        if !positive(config.width) || !positive(config.height) {
            return Err(invalid_camera("view plane size must be positive"));
        }
        if !positive(config.distance) {
            return Err(invalid_camera("view plane distance must be positive"));
        }
        let (columns, rows) = config.resolution;
        if columns == 0 || rows == 0 {
            return Err(invalid_camera("resolution must be non-zero"));
        }

        Ok(Self {
            location: config.location,
            forward,
            up,
            right,
            width: config.width,
            height: config.height,
            distance: config.distance,
            resolution: config.resolution,
        })
    }

    pub fn location(&self) -> Point3 {
        self.location
    }

    pub fn forward(&self) -> Unit {
        self.forward
    }

    pub fn up(&self) -> Unit {
        self.up
    }

    pub fn right(&self) -> Unit {
        self.right
    }

    pub fn resolution(&self) -> (usize, usize) {
        self.resolution
    }

    /// Ray through the center of pixel (`j`, `i`) of an `nx` by `ny` grid
    /// laid over the view plane. Rows count downwards.
    pub fn construct_ray(&self, nx: usize, ny: usize, j: usize, i: usize) -> Ray {
        let (nx, ny) = (nx as f64, ny as f64);
        let y = -(i as f64 - (ny - 1.0) / 2.0) * self.height / ny;
        let x = (j as f64 - (nx - 1.0) / 2.0) * self.width / nx;

        let mut point = self.location + self.distance * *self.forward;
        if !is_zero(x) {
            point += x * *self.right;
        }
        if !is_zero(y) {
            point += y * *self.up;
        }

        // The forward component is at least `distance` long, so this never falls back
        Ray::towards(self.location, point - self.location)
            .unwrap_or_else(|_| Ray::new(self.location, self.forward))
    }

    /// Trace every pixel, rows spread across the rayon pool.
    pub fn render(&self, tracer: &RayTracer) -> Image {
        let (width, height) = self.resolution;
        if tracer.scene().geometries.is_empty() {
            warn!("Scene '{}' has no geometries, image will be background only", tracer.scene().name);
        }

        info!(
            "Rendering {}x{} image using {} threads...",
            width,
            height,
            rayon::current_num_threads()
        );
        let start = Instant::now();

        let mut pixels = vec![Color::zero(); width * height];
        pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(i, row)| {
                for (j, pixel) in row.iter_mut().enumerate() {
                    *pixel = tracer.trace_ray(&self.construct_ray(width, height, j, i));
                }
            });

        info!("Image rendered in {:.2?}", start.elapsed());

        Image {
            width,
            height,
            pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn config() -> CameraConfig {
        CameraConfig {
            location: Point3::zero(),
            forward: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, -1.0, 0.0),
            width: 3.0,
            height: 3.0,
            distance: 1.0,
            resolution: (3, 3),
        }
    }

    #[test]
    fn test_center_pixel_looks_forward() {
        let camera = Camera::new(config()).unwrap();
        let ray = camera.construct_ray(3, 3, 1, 1);
        assert_eq!(ray.origin(), Point3::zero());
        assert!(ray.direction().approx_eq(Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_corner_pixel() {
        let camera = Camera::new(config()).unwrap();
        // right = forward x up = (-1, 0, 0)
        assert!(camera.right().approx_eq(Vec3::new(-1.0, 0.0, 0.0)));

        // Top-left pixel center sits one unit left and one unit up on the plane
        let ray = camera.construct_ray(3, 3, 0, 0);
        let expected = Vec3::new(1.0, -1.0, -1.0).unit().unwrap();
        assert!(ray.direction().approx_eq(expected.get()));
    }

    #[test]
    fn test_even_resolution_pixel_centers() {
        let camera = Camera::new(CameraConfig {
            resolution: (2, 2),
            width: 2.0,
            height: 2.0,
            ..config()
        })
        .unwrap();
        let ray = camera.construct_ray(2, 2, 1, 1);
        // Half a pixel right (-x) and half a pixel down (+y)
        let point = ray.at(1.5f64.sqrt());
        assert_abs_diff_eq!(point.x(), -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(point.y(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(point.z(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_configurations() {
        let bent = CameraConfig {
            up: Vec3::new(0.0, 1.0, 1.0),
            ..config()
        };
        assert!(matches!(Camera::new(bent), Err(TracerError::InvalidCamera(_))));

        let flat = config().with_view_plane(0.0, 3.0);
        assert!(Camera::new(flat).is_err());

        let blind = config().with_distance(-1.0);
        assert!(Camera::new(blind).is_err());

        let empty = config().with_resolution(0, 3);
        assert!(Camera::new(empty).is_err());

        let zero_up = CameraConfig {
            up: Vec3::zero(),
            ..config()
        };
        assert!(Camera::new(zero_up).is_err());
    }

    #[test]
    fn test_looking_at_builds_orthogonal_frame() {
        let config = CameraConfig::looking_at(
            Point3::new(0.0, 0.0, 10.0),
            Point3::new(0.0, 5.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        let camera = Camera::new(config).unwrap();
        assert_abs_diff_eq!(camera.forward().dot(*camera.up()), 0.0, epsilon = 1e-10);
        assert!(camera.up().y() > 0.0);

        let same = CameraConfig::looking_at(Point3::zero(), Point3::zero(), Vec3::new(0.0, 1.0, 0.0));
        assert!(matches!(same, Err(TracerError::InvalidCamera(_))));

        // Looking straight up along the up hint leaves no roll to derive
        let skyward =
            CameraConfig::looking_at(Point3::zero(), Point3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(matches!(skyward, Err(TracerError::InvalidCamera(_))));
    }

    #[test]
    fn test_looking_at_upright_defaults_to_y_up() {
        let location = Point3::new(1.0, 2.0, 3.0);
        let target = Point3::new(-4.0, 0.0, -8.0);
        let upright = CameraConfig::looking_at_upright(location, target).unwrap();
        let explicit = CameraConfig::looking_at(location, target, Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(upright, explicit);
        assert!(matches!(
            CameraConfig::looking_at_upright(location, location),
            Err(TracerError::InvalidCamera(_))
        ));
    }

    #[test]
    fn test_pixel_lookup() {
        let image = Image {
            width: 2,
            height: 2,
            pixels: vec![Color::zero(), Color::one(), Color::splat(0.5), Color::splat(0.25)],
        };
        assert_eq!(image.pixel(1, 0), Some(Color::one()));
        assert_eq!(image.pixel(0, 1), Some(Color::splat(0.5)));
        assert_eq!(image.pixel(2, 0), None);
        assert_eq!(image.pixel(0, 2), None);
    }

    #[test]
    fn test_print_grid() {
        let background = Color::new(0.1, 0.2, 0.3);
        let line = Color::one();
        let mut image = Image {
            width: 7,
            height: 5,
            pixels: vec![background; 35],
        };
        image.print_grid(3, line).unwrap();

        for row in 0..5 {
            for column in 0..7 {
                let expected = if row % 3 == 0 || column % 3 == 0 { line } else { background };
                assert_eq!(image.pixel(column, row), Some(expected), "pixel ({}, {})", column, row);
            }
        }
        // Spot checks: lines at rows 0, 3 and columns 0, 3, 6
        assert_eq!(image.pixel(6, 1), Some(line));
        assert_eq!(image.pixel(4, 4), Some(background));

        assert_eq!(image.print_grid(0, line), Err(TracerError::ZeroGridInterval));
    }

    #[test]
    fn test_write_ppm() {
        let image = Image {
            width: 2,
            height: 1,
            pixels: vec![Color::new(1.0, 0.0, 0.5), Color::new(2.0, -1.0, 0.0)],
        };
        let mut out = Vec::new();
        image.write_ppm(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "P3\n2 1\n255\n255 0 128\n255 0 0\n");
    }
}
