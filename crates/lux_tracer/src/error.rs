use lux_math::MathError;
use thiserror::Error;

/// Construction-time configuration mistakes. A ray missing a primitive is
/// never an error; see [`crate::HitRecord::miss`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TracerError {
    #[error("degenerate geometry: {0}")]
    Math(#[from] MathError),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type TracerResult<T> = Result<T, TracerError>;

/// Fail with `InvalidParameter` unless `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &str, value: f64) -> TracerResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TracerError::InvalidParameter(format!(
            "{name} must be positive, got {value}"
        )))
    }
}
