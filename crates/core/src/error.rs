//! Error types for the Maxwell simulator core.

use thiserror::Error;

/// Errors produced by grid construction, parameter access and frame computation.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A grid axis or image side was zero, or the total size overflowed.
    #[error("invalid dimensions: sizes must be non-zero and fit in memory")]
    InvalidDimensions,

    /// A coordinate range was empty, inverted or non-finite.
    #[error("invalid range: [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    /// A requested parameter name is not declared by the active law.
    #[error("parameter not found: {0}")]
    ParamNotFound(String),

    /// A parameter write carried NaN or an infinity.
    #[error("parameter '{0}' must be a finite number")]
    ParamNotFinite(String),

    /// A law name did not match any known law.
    #[error("unknown law: {0}")]
    UnknownLaw(String),

    /// A model was handed a grid of the wrong shape.
    #[error("grid mismatch: expected {expected} grid, got {got} grid")]
    GridMismatch {
        expected: &'static str,
        got: &'static str,
    },

    /// A scene description was structurally unusable.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// A filesystem or encoding failure while writing output.
    #[error("I/O error: {0}")]
    Io(String),
}
