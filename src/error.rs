use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size must be positive")]
    ZeroGridSize,
    #[error("grid size {0} is too large")]
    GridTooLarge(usize),
    #[error("generations per second must be positive and finite, got {0}")]
    InvalidFps(f64),
    #[error("alive probability {0} must be between 0.0 and 1.0")]
    InvalidProbability(f64),
    #[error("brightness threshold {0} must be between 1 and 255")]
    InvalidThreshold(u8),
}

/// Errors surfaced by the grid, the quantizer and the session.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("cell ({row}, {col}) is outside of the {size}x{size} grid")]
    InvalidCoordinate { row: usize, col: usize, size: usize },
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("raster of {width}x{height} with {len} bytes cannot be sampled")]
    RasterShape { width: u32, height: u32, len: usize },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("the grid cannot be edited while the simulation is running")]
    SimulationRunning,
    #[error("expected a {expected}x{expected} grid, got {actual}x{actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("image loader worker error: {0}")]
    LoadWorker(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;
