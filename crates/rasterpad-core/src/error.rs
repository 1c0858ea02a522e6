//! Engine error taxonomy.

use thiserror::Error;

/// Drawing engine errors.
///
/// Only `InvalidInput` and `Config` ever reach callers of the public entry
/// points. The remaining variants describe UI misuse that the session
/// tolerates silently; they are produced internally and logged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Nothing to undo")]
    EmptyUndo,
    #[error("Curve needs two reference points")]
    EmptyBezier,
    #[error("Gesture misuse: {0}")]
    GestureMisuse(&'static str),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Reject points with NaN or infinite coordinates.
pub(crate) fn ensure_finite(point: kurbo::Point) -> EngineResult<kurbo::Point> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(EngineError::invalid(format!(
            "non-finite coordinate ({}, {})",
            point.x, point.y
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_finite_point_passes() {
        let p = Point::new(3.0, -4.5);
        assert_eq!(ensure_finite(p), Ok(p));
    }

    #[test]
    fn test_nan_point_rejected() {
        let result = ensure_finite(Point::new(f64::NAN, 1.0));
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));

        let result = ensure_finite(Point::new(0.0, f64::INFINITY));
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_json_error_maps_to_config() {
        let err: EngineError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
