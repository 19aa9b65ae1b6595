//! Error types for scene construction.

use thiserror::Error;

/// Faults raised while building scene entities.
///
/// Tracing itself never fails: misses, parallel rays and cut-off recursion
/// all resolve to "no contribution".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TracerError {
    /// A vector of zero length was constructed or normalized.
    #[error("zero-length vector is not allowed")]
    ZeroVector,

    /// A polygon needs at least three vertices.
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    /// A polygon vertex does not lie in the plane of the first three.
    #[error("polygon vertex {index} is not in the plane of the first three vertices")]
    NonCoplanarVertex { index: usize },

    /// Vertex order does not describe a convex polygon.
    #[error("polygon vertices must be ordered and convex (failed at vertex {index})")]
    NonConvexPolygon { index: usize },

    /// Spot light narrow-beam exponent must be positive.
    #[error("narrow beam exponent must be positive, got {0}")]
    InvalidNarrowBeam(f64),

    /// Grid lines need a positive spacing.
    #[error("grid interval must be positive")]
    ZeroGridInterval,

    /// Camera configuration is unusable.
    #[error("invalid camera: {0}")]
    InvalidCamera(String),
}

/// Result type for scene construction.
pub type Result<T> = std::result::Result<T, TracerError>;
