//! Native tensor family.
//!
//! ```text
//! FixedTensor<ElT, S, L>   every extent static (S: FixedShape)
//! Tensor<ElT, N, L>        rank N static, extents dynamic
//! DynTensor<ElT, L>        rank and extents dynamic
//! ```
//!
//! `L` is the static layout marker ([`RowMajor`](crate::layout::RowMajor) by
//! default). All three own a flat [`Dense`](crate::storage::Dense) buffer
//! stored in a single memory order.

mod dynamic;
mod fixed;
mod ranked;

pub use dynamic::DynTensor;
pub use fixed::FixedTensor;
pub use ranked::Tensor;

use crate::error::TensorError;
use crate::strides::cartesian_to_linear;

/// Linear index of `indices`, or `None` if out of bounds or of the wrong rank.
pub(crate) fn checked_linear(
    indices: &[usize],
    shape: &[usize],
    strides: &[usize],
) -> Option<usize> {
    if indices.len() != shape.len() {
        return None;
    }
    if indices.iter().zip(shape.iter()).any(|(&idx, &dim)| idx >= dim) {
        return None;
    }
    Some(cartesian_to_linear(indices, strides))
}

/// Check that `data_len` matches the element count of `shape`.
pub(crate) fn check_len(shape: &[usize], data_len: usize) -> Result<(), TensorError> {
    let expected: usize = shape.iter().product();
    if data_len != expected {
        return Err(TensorError::ShapeMismatch {
            expected,
            actual: data_len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_linear() {
        let shape = [2, 3];
        let strides = [3, 1];
        assert_eq!(checked_linear(&[1, 2], &shape, &strides), Some(5));
        assert_eq!(checked_linear(&[2, 0], &shape, &strides), None);
        assert_eq!(checked_linear(&[0], &shape, &strides), None);
        assert_eq!(checked_linear(&[], &[], &[]), Some(0));
    }

    #[test]
    fn test_check_len() {
        assert!(check_len(&[2, 3], 6).is_ok());
        assert!(check_len(&[], 1).is_ok());
        assert!(check_len(&[4, 0], 0).is_ok());
        assert_eq!(
            check_len(&[2, 3], 5),
            Err(TensorError::ShapeMismatch {
                expected: 6,
                actual: 5,
            })
        );
    }
}
