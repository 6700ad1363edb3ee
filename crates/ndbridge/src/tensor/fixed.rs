//! Fixed-shape tensors: every extent known at compile time.

use super::{check_len, checked_linear};
use crate::classify::{NativeTensor, TensorKind};
use crate::dtype::Element;
use crate::error::TensorError;
use crate::layout::{Order, RowMajor, StaticLayout};
use crate::shape::{FixedShape, ShapeConstraint};
use crate::storage::Dense;
use crate::strides::compute_strides;
use std::marker::PhantomData;

/// A tensor whose shape is the type parameter `S`.
///
/// # Examples
///
/// ```
/// use ndbridge::FixedTensor;
/// use ndbridge::shape::Shape2;
///
/// let mut t: FixedTensor<f32, Shape2<2, 2>> = FixedTensor::zeros();
/// t.set(&[1, 0], 3.0).unwrap();
/// assert_eq!(t.data(), &[0.0, 0.0, 3.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTensor<ElT: Element, S: FixedShape, L: StaticLayout = RowMajor> {
    storage: Dense<ElT>,
    strides: Vec<usize>,
    order: Order,
    _shape: PhantomData<(S, L)>,
}

impl<ElT: Element, S: FixedShape, L: StaticLayout> FixedTensor<ElT, S, L> {
    /// Create a zero-initialized tensor.
    pub fn zeros() -> Self {
        let order = L::pick(Order::RowMajor);
        Self {
            storage: Dense::zeros(S::size()),
            strides: compute_strides(S::DIMS, order),
            order,
            _shape: PhantomData,
        }
    }

    /// Create a tensor from data laid out in the tensor's order.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if data length doesn't match `S`.
    pub fn from_vec(data: Vec<ElT>) -> Result<Self, TensorError> {
        check_len(S::DIMS, data.len())?;
        let order = L::pick(Order::RowMajor);
        Ok(Self {
            storage: Dense::from_vec(data),
            strides: compute_strides(S::DIMS, order),
            order,
            _shape: PhantomData,
        })
    }

    #[inline]
    pub fn shape(&self) -> &'static [usize] {
        S::DIMS
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn data(&self) -> &[ElT] {
        self.storage.as_slice()
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [ElT] {
        self.storage.as_mut_slice()
    }

    pub fn get(&self, indices: &[usize]) -> Option<&ElT> {
        let linear = checked_linear(indices, S::DIMS, &self.strides)?;
        self.storage.as_slice().get(linear)
    }

    pub fn set(&mut self, indices: &[usize], value: ElT) -> Result<(), TensorError> {
        let linear = checked_linear(indices, S::DIMS, &self.strides).ok_or_else(|| {
            TensorError::IndexOutOfBounds {
                indices: indices.to_vec(),
                shape: S::DIMS.to_vec(),
            }
        })?;
        self.storage[linear] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: ElT) {
        self.storage.as_mut_slice().fill(value);
    }
}

impl<ElT: Element, S: FixedShape, L: StaticLayout> Default for FixedTensor<ElT, S, L> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<ElT: Element, S: FixedShape, L: StaticLayout> NativeTensor for FixedTensor<ElT, S, L> {
    type Elem = ElT;
    type Layout = L;

    const KIND: TensorKind = TensorKind::FixedShape;

    fn shape_constraint() -> ShapeConstraint {
        ShapeConstraint::Exact(S::DIMS)
    }

    fn empty() -> Self {
        Self::default()
    }

    fn resize(&mut self, shape: &[usize], preferred: Order) -> Result<(), TensorError> {
        if shape != S::DIMS {
            return Err(TensorError::FixedShape {
                expected: S::DIMS.to_vec(),
                actual: shape.to_vec(),
            });
        }
        let order = L::pick(preferred);
        if order != self.order {
            self.order = order;
            self.strides = compute_strides(S::DIMS, order);
        }
        Ok(())
    }

    fn shape(&self) -> &[usize] {
        S::DIMS
    }

    fn strides(&self) -> &[usize] {
        &self.strides
    }

    fn order(&self) -> Order {
        self.order
    }

    fn data(&self) -> &[ElT] {
        self.storage.as_slice()
    }

    fn data_mut(&mut self) -> &mut [ElT] {
        self.storage.as_mut_slice()
    }
}
