use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// The raster surface could not be allocated or presented.
    ///
    /// Fatal to the chart instance that owns the surface only.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
