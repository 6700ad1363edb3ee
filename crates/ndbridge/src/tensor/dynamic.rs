//! Fully dynamic tensors: rank and extents chosen at runtime.

use super::{check_len, checked_linear};
use crate::classify::{NativeTensor, TensorKind};
use crate::dtype::Element;
use crate::error::TensorError;
use crate::layout::{Order, RowMajor, StaticLayout};
use crate::shape::ShapeConstraint;
use crate::storage::Dense;
use crate::strides::compute_strides;
use std::marker::PhantomData;

/// A tensor of any rank.
///
/// # Examples
///
/// ```
/// use ndbridge::DynTensor;
///
/// let mut t: DynTensor<f64> = DynTensor::zeros(&[2, 3]);
/// t.set(&[0, 1], 5.0).unwrap();
/// assert_eq!(t.get(&[0, 1]), Some(&5.0));
/// assert_eq!(t.data()[1], 5.0); // row-major by default
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynTensor<ElT: Element, L: StaticLayout = RowMajor> {
    storage: Dense<ElT>,
    shape: Vec<usize>,
    strides: Vec<usize>,
    order: Order,
    _layout: PhantomData<L>,
}

impl<ElT: Element, L: StaticLayout> DynTensor<ElT, L> {
    /// Create a zero-initialized tensor.
    pub fn zeros(shape: &[usize]) -> Self {
        Self::zeros_in(shape, Order::RowMajor)
    }

    /// Create a zero-initialized tensor, preferring `order` if the layout is dynamic.
    pub fn zeros_in(shape: &[usize], order: Order) -> Self {
        let order = L::pick(order);
        let len = shape.iter().product();
        Self {
            storage: Dense::zeros(len),
            shape: shape.to_vec(),
            strides: compute_strides(shape, order),
            order,
            _layout: PhantomData,
        }
    }

    /// Create a tensor from data laid out in the tensor's order.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if data length doesn't match shape.
    pub fn from_vec(data: Vec<ElT>, shape: &[usize]) -> Result<Self, TensorError> {
        Self::from_vec_in(data, shape, Order::RowMajor)
    }

    /// Create a tensor from data laid out in `order`.
    ///
    /// For static layouts `order` must agree with the layout, otherwise the
    /// data would be reinterpreted; dynamic layouts accept either.
    pub fn from_vec_in(data: Vec<ElT>, shape: &[usize], order: Order) -> Result<Self, TensorError> {
        check_len(shape, data.len())?;
        let order = L::pick(order);
        Ok(Self {
            storage: Dense::from_vec(data),
            shape: shape.to_vec(),
            strides: compute_strides(shape, order),
            order,
            _layout: PhantomData,
        })
    }

    /// Change the shape, keeping the memory order.
    pub fn resize(&mut self, shape: &[usize]) {
        self.resize_in(shape, self.order);
    }

    fn resize_in(&mut self, shape: &[usize], order: Order) {
        self.order = L::pick(order);
        self.storage.resize(shape.iter().product());
        self.shape = shape.to_vec();
        self.strides = compute_strides(shape, self.order);
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
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

    /// Get element by cartesian indices.
    pub fn get(&self, indices: &[usize]) -> Option<&ElT> {
        let linear = checked_linear(indices, &self.shape, &self.strides)?;
        self.storage.as_slice().get(linear)
    }

    /// Set element by cartesian indices.
    ///
    /// # Errors
    ///
    /// Returns error if indices are out of bounds or of the wrong rank.
    pub fn set(&mut self, indices: &[usize], value: ElT) -> Result<(), TensorError> {
        let linear = checked_linear(indices, &self.shape, &self.strides).ok_or_else(|| {
            TensorError::IndexOutOfBounds {
                indices: indices.to_vec(),
                shape: self.shape.clone(),
            }
        })?;
        self.storage[linear] = value;
        Ok(())
    }

    /// Fill with a value.
    pub fn fill(&mut self, value: ElT) {
        self.storage.as_mut_slice().fill(value);
    }

    /// Consume the tensor and return its buffer.
    pub fn into_vec(self) -> Vec<ElT> {
        self.storage.into_vec()
    }
}

impl<ElT: Element, L: StaticLayout> Default for DynTensor<ElT, L> {
    /// A rank-0 tensor holding one zero.
    fn default() -> Self {
        Self::zeros(&[])
    }
}

impl<ElT: Element, L: StaticLayout> NativeTensor for DynTensor<ElT, L> {
    type Elem = ElT;
    type Layout = L;

    const KIND: TensorKind = TensorKind::Dynamic;

    fn shape_constraint() -> ShapeConstraint {
        ShapeConstraint::Any
    }

    fn empty() -> Self {
        Self::default()
    }

    fn resize(&mut self, shape: &[usize], preferred: Order) -> Result<(), TensorError> {
        self.resize_in(shape, preferred);
        Ok(())
    }

    fn shape(&self) -> &[usize] {
        &self.shape
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
