//! Stride computation utilities.
//!
//! Native tensors keep unsigned strides in elements. Foreign arrays may carry
//! arbitrary signed strides, also counted in elements.

use crate::layout::Order;
use smallvec::SmallVec;

/// Compute contiguous strides for `shape` in the given order.
///
/// # Examples
///
/// ```
/// use ndbridge::layout::Order;
/// use ndbridge::strides::compute_strides;
///
/// assert_eq!(compute_strides(&[3, 4, 5], Order::RowMajor), vec![20, 5, 1]);
/// assert_eq!(compute_strides(&[3, 4, 5], Order::ColumnMajor), vec![1, 3, 12]);
/// assert_eq!(compute_strides(&[], Order::RowMajor), Vec::<usize>::new());
/// ```
pub fn compute_strides(shape: &[usize], order: Order) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut stride = 1;

    match order {
        Order::RowMajor => {
            for (s, &dim) in strides.iter_mut().zip(shape.iter()).rev() {
                *s = stride;
                stride *= dim;
            }
        }
        Order::ColumnMajor => {
            for (s, &dim) in strides.iter_mut().zip(shape.iter()) {
                *s = stride;
                stride *= dim;
            }
        }
    }

    strides
}

/// Check whether `strides` describe a contiguous buffer in `order`.
///
/// Extents of 1 place no constraint on their stride, and an array with a
/// zero extent is trivially contiguous.
pub fn is_contiguous(shape: &[usize], strides: &[isize], order: Order) -> bool {
    debug_assert_eq!(shape.len(), strides.len());
    if shape.contains(&0) {
        return true;
    }

    let mut expected: isize = 1;
    let mut check = |dim: usize, stride: isize| {
        if dim != 1 && stride != expected {
            return false;
        }
        expected *= dim as isize;
        true
    };

    match order {
        Order::RowMajor => shape
            .iter()
            .zip(strides.iter())
            .rev()
            .all(|(&d, &s)| check(d, s)),
        Order::ColumnMajor => shape
            .iter()
            .zip(strides.iter())
            .all(|(&d, &s)| check(d, s)),
    }
}

/// Convert cartesian indices to a linear index.
#[inline]
pub fn cartesian_to_linear(indices: &[usize], strides: &[usize]) -> usize {
    indices
        .iter()
        .zip(strides.iter())
        .map(|(&idx, &stride)| idx * stride)
        .sum()
}

/// Iterator over the element offsets of a strided array.
///
/// Elements are visited in logical `order`: for [`Order::RowMajor`] the last
/// index varies fastest, so the i-th offset yielded belongs to the element
/// that sits at position i of a row-major contiguous copy.
pub struct Offsets<'a> {
    shape: &'a [usize],
    strides: &'a [isize],
    order: Order,
    index: SmallVec<[usize; 4]>,
    offset: isize,
    remaining: usize,
}

impl<'a> Offsets<'a> {
    pub fn new(shape: &'a [usize], strides: &'a [isize], order: Order) -> Self {
        debug_assert_eq!(shape.len(), strides.len());
        Self {
            shape,
            strides,
            order,
            index: SmallVec::from_elem(0, shape.len()),
            offset: 0,
            remaining: shape.iter().product(),
        }
    }

    fn advance(&mut self) {
        let ndim = self.shape.len();
        for k in 0..ndim {
            let axis = match self.order {
                Order::RowMajor => ndim - 1 - k,
                Order::ColumnMajor => k,
            };
            self.index[axis] += 1;
            self.offset += self.strides[axis];
            if self.index[axis] < self.shape[axis] {
                return;
            }
            self.offset -= self.strides[axis] * self.shape[axis] as isize;
            self.index[axis] = 0;
        }
    }
}

impl Iterator for Offsets<'_> {
    type Item = isize;

    fn next(&mut self) -> Option<isize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.offset;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Offsets<'_> {}
