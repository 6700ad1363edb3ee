//! Error types for ndbridge.

use crate::dtype::DType;
use crate::layout::Contiguity;
use thiserror::Error;

/// Errors raised by native tensor construction and resizing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    /// Data length does not match the number of elements implied by the shape.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Requested shape has a different rank than the tensor's static rank.
    #[error("expected tensor of rank {expected}, got rank {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// Indices out of range or of the wrong rank.
    #[error("index {indices:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds {
        indices: Vec<usize>,
        shape: Vec<usize>,
    },

    /// A fixed-shape tensor cannot take on a different shape.
    #[error("fixed shape {expected:?} cannot be resized to {actual:?}")]
    FixedShape {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

/// Reasons an import was not applicable.
///
/// None of these are fatal: the caller may go on to try another conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastError {
    /// The host value is not an array at all.
    #[error("value is not an array")]
    NotAnArray,

    /// Element types differ; no numeric coercion is attempted.
    #[error("dtype mismatch: expected {expected}, got {actual}")]
    DTypeMismatch { expected: DType, actual: DType },

    /// Array rank differs from the tensor's static rank.
    #[error("rank mismatch: expected {expected}, got {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// Array extents differ from the tensor's static shape.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Array memory is not laid out as required.
    #[error("array is not {required} contiguous")]
    NotContiguous { required: Contiguity },

    /// A writable array was requested but the source is read-only.
    #[error("array is read-only")]
    ReadOnly,

    /// The tensor rejected the array's shape.
    #[error(transparent)]
    Tensor(#[from] TensorError),
}
