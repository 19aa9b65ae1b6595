/// Recursion limits for the shading engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TracerSettings {
    /// Levels of reflection/transmission recursion; 1 means local effects only.
    pub max_level: u32,
    /// Attenuation below which a contribution is dropped, per channel.
    pub min_k: f64,
}

impl TracerSettings {
    pub const MAX_CALC_COLOR_LEVEL: u32 = 10;
    pub const MIN_CALC_COLOR_K: f64 = 0.001;

    pub fn with_max_level(self, max_level: u32) -> Self {
        Self { max_level, ..self }
    }

    pub fn with_min_k(self, min_k: f64) -> Self {
        Self { min_k, ..self }
    }
}

impl Default for TracerSettings {
    fn default() -> Self {
        Self {
            max_level: Self::MAX_CALC_COLOR_LEVEL,
            min_k: Self::MIN_CALC_COLOR_K,
        }
    }
}
