use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error("timeline has no snapshots")]
    Empty,
    #[error("frame interval must be positive")]
    ZeroFrameInterval,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("map bound {axis} must be positive, got {value}")]
    NonPositiveBound { axis: &'static str, value: f64 },
    #[error("display size must be positive, got {0}")]
    NonPositiveDisplay(f64),
}
