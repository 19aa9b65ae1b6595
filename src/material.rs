use super::vec::Color;

/// Phong-style surface coefficients.
///
/// Each channel is meant to lie in [0, 1]; nothing enforces it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Ambient
    pub ka: Color,
    /// Diffuse
    pub kd: Color,
    /// Specular
    pub ks: Color,
    /// Transmittance
    pub kt: Color,
    /// Reflectance
    pub kr: Color,
    pub shininess: i32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: Color::one(),
            kd: Color::zero(),
            ks: Color::zero(),
            kt: Color::zero(),
            kr: Color::zero(),
            shininess: 0,
        }
    }
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ka(self, ka: Color) -> Self {
        Self { ka, ..self }
    }

    pub fn with_kd(self, kd: Color) -> Self {
        Self { kd, ..self }
    }

    pub fn with_ks(self, ks: Color) -> Self {
        Self { ks, ..self }
    }

    pub fn with_kt(self, kt: Color) -> Self {
        Self { kt, ..self }
    }

    pub fn with_kr(self, kr: Color) -> Self {
        Self { kr, ..self }
    }

    pub fn with_shininess(self, shininess: i32) -> Self {
        Self { shininess, ..self }
    }
}
