//! Error type shared by every fallible entry point.

use thiserror::Error;

/// Errors surfaced at the API boundary. The per-frame passes never fail;
/// out-of-bounds moves inside a frame are skipped, not reported.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("grid size must be positive, got {size}")]
    InvalidSize { size: usize },
    #[error("brush radius must be at least 1, got {radius}")]
    InvalidBrushRadius { radius: i32 },
    #[error("cell ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds { x: i64, y: i64, size: usize },
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("column order is not a permutation of 0..{size}")]
    InvalidColumnOrder { size: usize },
    #[error("window must have non-zero dimensions, got {width}x{height}")]
    InvalidWindow { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = SimError> = std::result::Result<T, E>;
