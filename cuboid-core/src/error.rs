/// Errors raised while constructing carousel state or loading face assets
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CuboidError {
    #[error("face index {0} is outside 0..4")]
    InvalidFace(usize),

    #[error("face sheet must contain exactly 4 faces, found {found}")]
    FaceCount { found: usize },

    #[error("malformed face sheet: {0}")]
    Parse(String),

    #[error("minimum fling velocity {min} must be below maximum {max}")]
    InvalidThresholds { min: f32, max: f32 },
}

pub type Result<T> = std::result::Result<T, CuboidError>;
