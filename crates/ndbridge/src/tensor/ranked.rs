//! Rank-fixed tensors: `N` dimensions, extents chosen at runtime.

use super::{check_len, checked_linear};
use crate::classify::{NativeTensor, TensorKind};
use crate::dtype::Element;
use crate::error::TensorError;
use crate::layout::{Order, RowMajor, StaticLayout};
use crate::shape::ShapeConstraint;
use crate::storage::Dense;
use crate::strides::compute_strides;
use std::marker::PhantomData;

/// A tensor of static rank `N`.
///
/// # Examples
///
/// ```
/// use ndbridge::Tensor;
///
/// let t: Tensor<f64, 2> = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [2, 3]).unwrap();
/// assert_eq!(t.shape(), &[2, 3]);
/// assert_eq!(t.get([1, 0]), Some(&4.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<ElT: Element, const N: usize, L: StaticLayout = RowMajor> {
    storage: Dense<ElT>,
    shape: [usize; N],
    strides: [usize; N],
    order: Order,
    _layout: PhantomData<L>,
}

fn strides_array<const N: usize>(shape: &[usize; N], order: Order) -> [usize; N] {
    let mut strides = [0; N];
    strides.copy_from_slice(&compute_strides(shape, order));
    strides
}

impl<ElT: Element, const N: usize, L: StaticLayout> Tensor<ElT, N, L> {
    /// Create a zero-initialized tensor.
    pub fn zeros(shape: [usize; N]) -> Self {
        let order = L::pick(Order::RowMajor);
        Self {
            storage: Dense::zeros(shape.iter().product()),
            strides: strides_array(&shape, order),
            shape,
            order,
            _layout: PhantomData,
        }
    }

    /// Create a tensor from data laid out in the tensor's order.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ShapeMismatch` if data length doesn't match shape.
    pub fn from_vec(data: Vec<ElT>, shape: [usize; N]) -> Result<Self, TensorError> {
        check_len(&shape, data.len())?;
        let order = L::pick(Order::RowMajor);
        Ok(Self {
            storage: Dense::from_vec(data),
            strides: strides_array(&shape, order),
            shape,
            order,
            _layout: PhantomData,
        })
    }

    /// Change the extents, keeping the memory order.
    pub fn resize(&mut self, shape: [usize; N]) {
        self.storage.resize(shape.iter().product());
        self.strides = strides_array(&shape, self.order);
        self.shape = shape;
    }

    #[inline]
    pub fn shape(&self) -> &[usize; N] {
        &self.shape
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
    pub fn strides(&self) -> &[usize; N] {
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

    pub fn get(&self, indices: [usize; N]) -> Option<&ElT> {
        let linear = checked_linear(&indices, &self.shape, &self.strides)?;
        self.storage.as_slice().get(linear)
    }

    pub fn set(&mut self, indices: [usize; N], value: ElT) -> Result<(), TensorError> {
        let linear = checked_linear(&indices, &self.shape, &self.strides).ok_or_else(|| {
            TensorError::IndexOutOfBounds {
                indices: indices.to_vec(),
                shape: self.shape.to_vec(),
            }
        })?;
        self.storage[linear] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: ElT) {
        self.storage.as_mut_slice().fill(value);
    }
}

impl<ElT: Element, const N: usize, L: StaticLayout> Default for Tensor<ElT, N, L> {
    /// All extents zero (a single element when `N == 0`).
    fn default() -> Self {
        Self::zeros([0; N])
    }
}

impl<ElT: Element, const N: usize, L: StaticLayout> NativeTensor for Tensor<ElT, N, L> {
    type Elem = ElT;
    type Layout = L;

    const KIND: TensorKind = TensorKind::RankFixed;

    fn shape_constraint() -> ShapeConstraint {
        ShapeConstraint::Rank(N)
    }

    fn empty() -> Self {
        Self::default()
    }

    fn resize(&mut self, shape: &[usize], preferred: Order) -> Result<(), TensorError> {
        let shape: [usize; N] = shape.try_into().map_err(|_| TensorError::RankMismatch {
            expected: N,
            actual: shape.len(),
        })?;
        self.order = L::pick(preferred);
        Tensor::resize(self, shape);
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
